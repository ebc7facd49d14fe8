use std::path::PathBuf;

use clap::Parser;

use crate::{cli::BackupOptions, config, types::FailurePolicy, vk};

/// Command-line flags of `vkbackup backup`.
#[derive(Parser, Debug, Clone)]
pub struct BackupArgs {
    /// VK account whose photos are backed up (negative for communities)
    #[clap(long, allow_negative_numbers = true)]
    pub owner_id: i64,

    /// Download profile photos, optionally limiting the count (5 by default)
    #[clap(long, num_args = 0..=1, value_name = "COUNT")]
    pub profile: Option<Option<u32>>,

    /// Download wall photos
    #[clap(long)]
    pub wall: bool,

    /// Album title to download; can be repeated
    #[clap(long = "album", value_name = "TITLE", conflicts_with = "all_albums")]
    pub albums: Vec<String>,

    /// Download every album
    #[clap(long)]
    pub all_albums: bool,

    /// Local folder and remote folder name
    #[clap(long, default_value = vk::DEFAULT_FOLDER)]
    pub folder: String,

    /// Upload to Yandex Disk
    #[clap(long)]
    pub yandex: bool,

    /// Upload to Google Drive (opens a browser for authorization)
    #[clap(long)]
    pub google: bool,

    /// Path of the token file
    #[clap(long, default_value = config::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Stop at the first failed step instead of continuing
    #[clap(long)]
    pub fail_fast: bool,
}

impl From<BackupArgs> for BackupOptions {
    fn from(args: BackupArgs) -> Self {
        Self {
            config_path: args.config,
            owner_id: args.owner_id,
            folder: args.folder,
            profile: args
                .profile
                .map(|count| count.unwrap_or(vk::DEFAULT_PROFILE_COUNT)),
            wall: args.wall,
            albums: args.albums,
            all_albums: args.all_albums,
            yandex: args.yandex,
            google: args.google,
            policy: if args.fail_fast {
                FailurePolicy::Abort
            } else {
                FailurePolicy::Continue
            },
        }
    }
}
