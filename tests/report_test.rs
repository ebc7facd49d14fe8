mod common;

use std::path::PathBuf;

use vkbackup::{
    BackupError,
    cli::{BackupOptions, RunReport, run},
    config::{DEFAULT_REDIRECT_ADDR, Settings},
    types::{DownloadReport, FailurePolicy, ManifestEntry, UploadReport},
};

fn entry(name: &str) -> ManifestEntry {
    ManifestEntry {
        file_name: name.to_string(),
        size_class: "z".to_string(),
    }
}

fn write_ini(name: &str, content: &str) -> PathBuf {
    let path = common::temp_dir(name).join("tokens.ini");
    std::fs::write(&path, content).unwrap();
    path
}

fn options(policy: FailurePolicy) -> BackupOptions {
    BackupOptions {
        config_path: PathBuf::from("tokens.ini"),
        owner_id: 783464,
        folder: "vk_photos".to_string(),
        profile: None,
        wall: false,
        albums: Vec::new(),
        all_albums: false,
        yandex: false,
        google: false,
        policy,
    }
}

#[test]
fn continue_policy_keeps_going_after_failure() {
    let mut report = RunReport::new(FailurePolicy::Continue);

    report.record_download(
        "profile photos",
        Ok(DownloadReport {
            manifest: vec![entry("1.jpg"), entry("2.jpg")],
            failures: vec!["photo 3: HTTP error".to_string()],
        }),
    );
    assert!(!report.should_stop());

    report.record_download("wall photos", Err(BackupError::ResponseMissing));
    assert!(!report.should_stop());
    assert!(report.has_failures());

    let steps = report.steps();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].items, 2);
    assert_eq!(steps[0].failures.len(), 1);
    assert_eq!(steps[1].items, 0);
    assert!(!steps[1].is_ok());
}

#[test]
fn abort_policy_stops_after_failed_step() {
    let mut report = RunReport::new(FailurePolicy::Abort);

    report.record_download(
        "profile photos",
        Ok(DownloadReport {
            manifest: vec![entry("1.jpg")],
            failures: Vec::new(),
        }),
    );
    assert!(!report.should_stop());
    assert!(!report.has_failures());

    report.record("Yandex Disk folder", Err(BackupError::NoUploadFolder));
    assert!(report.should_stop());
}

#[test]
fn aborted_upload_counts_as_failure() {
    let mut report = RunReport::new(FailurePolicy::Continue);

    report.record_upload(
        "Yandex Disk upload",
        Ok(UploadReport {
            uploaded: vec!["1.jpg".to_string()],
            failures: Vec::new(),
            aborted: Some("No upload URL issued for vk_photos/2.jpg".to_string()),
        }),
    );

    let step = &report.steps()[0];
    assert_eq!(step.items, 1);
    assert_eq!(step.failures.len(), 1);
    assert!(step.failures[0].starts_with("aborted"));
    assert!(report.has_failures());
}

#[test]
fn missing_token_file_is_reported() {
    let path = common::temp_dir("no-ini").join("tokens.ini");

    match Settings::load(&path) {
        Err(BackupError::ConfigMissing(missing)) => assert_eq!(missing, path),
        other => panic!("expected missing config, got {:?}", other),
    }
}

#[test]
fn token_file_sections_are_parsed() {
    let path = write_ini(
        "full-ini",
        "[VK]\ntoken=vk1.a.secret\n[YANDEX]\ntoken=OAuth y0_secret\n[GOOGLE]\nclient_id=abc.apps.googleusercontent.com\nclient_secret=shh\n",
    );

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.vk.token, "vk1.a.secret");
    assert_eq!(settings.yandex.token, "OAuth y0_secret");

    let google = settings.google.unwrap();
    assert_eq!(google.client_id, "abc.apps.googleusercontent.com");
    assert_eq!(google.redirect_addr, DEFAULT_REDIRECT_ADDR);
    assert_eq!(google.redirect_uri(), "http://127.0.0.1:8765/callback");
}

#[test]
fn google_section_is_optional() {
    let path = write_ini(
        "no-google-ini",
        "[VK]\ntoken=vk1.a.secret\n[YANDEX]\ntoken=OAuth y0_secret\n",
    );

    let settings = Settings::load(&path).unwrap();
    assert!(settings.google.is_none());

    // Secrets never reach debug output
    let debug = format!("{:?}", settings);
    assert!(!debug.contains("vk1.a.secret"));
    assert!(!debug.contains("y0_secret"));
}

#[test]
fn token_file_without_yandex_section_fails() {
    let path = write_ini("partial-ini", "[VK]\ntoken=vk1.a.secret\n");

    assert!(matches!(Settings::load(&path), Err(BackupError::Config(_))));
}

#[tokio::test]
async fn run_without_google_section_records_failure() {
    let path = write_ini(
        "run-no-google",
        "[VK]\ntoken=vk1.a.secret\n[YANDEX]\ntoken=OAuth y0_secret\n",
    );
    let settings = Settings::load(&path).unwrap();

    let mut opts = options(FailurePolicy::Continue);
    opts.google = true;
    let report = run(&settings, &opts).await;

    assert_eq!(report.steps().len(), 1);
    assert_eq!(report.steps()[0].step, "Google Drive authorization");
    assert!(report.has_failures());
}

#[tokio::test]
async fn run_with_nothing_selected_does_nothing() {
    let path = write_ini(
        "run-nothing",
        "[VK]\ntoken=vk1.a.secret\n[YANDEX]\ntoken=OAuth y0_secret\n",
    );
    let settings = Settings::load(&path).unwrap();

    let report = run(&settings, &options(FailurePolicy::Abort)).await;

    assert!(report.steps().is_empty());
    assert!(!report.has_failures());
}
