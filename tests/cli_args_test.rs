use std::path::PathBuf;

use clap::Parser;
use vkbackup::{
    cli::{BackupArgs, BackupOptions},
    types::FailurePolicy,
    vk::DEFAULT_PROFILE_COUNT,
};

fn parse(args: &[&str]) -> BackupOptions {
    let mut argv = vec!["backup"];
    argv.extend_from_slice(args);
    BackupArgs::try_parse_from(argv).unwrap().into()
}

#[test]
fn test_defaults() {
    let options = parse(&["--owner-id", "783464"]);

    assert_eq!(options.owner_id, 783464);
    assert_eq!(options.profile, None);
    assert_eq!(options.folder, "vk_photos");
    assert_eq!(options.config_path, PathBuf::from("tokens.ini"));
    assert_eq!(options.policy, FailurePolicy::Continue);
    assert!(!options.wall && !options.yandex && !options.google);
}

#[test]
fn test_community_owner_id() {
    let options = parse(&["--owner-id", "-123", "--wall"]);

    assert_eq!(options.owner_id, -123);
    assert!(options.wall);
}

#[test]
fn test_profile_count() {
    assert_eq!(
        parse(&["--owner-id", "1", "--profile"]).profile,
        Some(DEFAULT_PROFILE_COUNT)
    );
    assert_eq!(parse(&["--owner-id", "1", "--profile", "12"]).profile, Some(12));
    assert_eq!(
        parse(&["--owner-id", "1", "--profile", "--wall"]).profile,
        Some(DEFAULT_PROFILE_COUNT)
    );
}

#[test]
fn test_albums_and_fail_fast() {
    let options = parse(&[
        "--owner-id",
        "1",
        "--album",
        "sweden",
        "--album",
        "BK",
        "--fail-fast",
    ]);

    assert_eq!(options.albums, vec!["sweden", "BK"]);
    assert!(!options.all_albums);
    assert_eq!(options.policy, FailurePolicy::Abort);
}

#[test]
fn test_album_conflicts_with_all_albums() {
    let result = BackupArgs::try_parse_from([
        "backup",
        "--owner-id",
        "1",
        "--album",
        "x",
        "--all-albums",
    ]);

    assert!(result.is_err());
}
