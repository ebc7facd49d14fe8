use std::path::PathBuf;

use crate::{
    auth,
    cli::RunReport,
    config::Settings,
    error, info,
    storage::{GoogleDrive, StorageSink, YandexDisk},
    types::FailurePolicy,
    vk::VkClient,
    warning,
};

#[derive(Debug, Clone)]
pub struct BackupOptions {
    pub config_path: PathBuf,
    pub owner_id: i64,
    pub folder: String,
    pub profile: Option<u32>,
    pub wall: bool,
    pub albums: Vec<String>,
    pub all_albums: bool,
    pub yandex: bool,
    pub google: bool,
    pub policy: FailurePolicy,
}

/// Loads `tokens.ini` and runs the backup.
///
/// A missing or unreadable configuration is fatal and exits before any
/// network request is made.
pub async fn backup(options: BackupOptions) -> RunReport {
    let settings = match Settings::load(&options.config_path) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{e}");
            error!("{}", e);
        }
    };

    run(&settings, &options).await
}

/// Downloads the requested photo sets, then mirrors the folder to each sink.
///
/// Steps run strictly one after another: profile, albums, wall, then for
/// every sink folder creation followed by upload.
pub async fn run(settings: &Settings, options: &BackupOptions) -> RunReport {
    let mut report = RunReport::new(options.policy);
    let vk = VkClient::new(&settings.vk.token, options.owner_id, &options.folder);

    let wants_albums = options.all_albums || !options.albums.is_empty();
    if options.profile.is_none() && !wants_albums && !options.wall {
        warning!("No photo set selected, skipping downloads.");
    }

    if let Some(count) = options.profile {
        info!("Downloading {} profile photos...", count);
        report.record_download("profile photos", vk.download_profile_photos(count).await);
        if report.should_stop() {
            return report;
        }
    }

    if wants_albums {
        let titles: &[String] = if options.all_albums {
            &[]
        } else {
            &options.albums
        };
        info!("Downloading album photos...");
        report.record_download("album photos", vk.download_album_photos(titles).await);
        if report.should_stop() {
            return report;
        }
    }

    if options.wall {
        info!("Downloading wall photos...");
        report.record_download("wall photos", vk.download_wall_photos().await);
        if report.should_stop() {
            return report;
        }
    }

    let mut sinks: Vec<Box<dyn StorageSink>> = Vec::new();
    if options.yandex {
        sinks.push(Box::new(YandexDisk::new(&settings.yandex.token)));
    }
    if options.google {
        match &settings.google {
            Some(google) => match auth::authorize(google).await {
                Ok(token) => sinks.push(Box::new(GoogleDrive::new(token))),
                Err(e) => report.record_failure("Google Drive authorization", e),
            },
            None => report.record_failure(
                "Google Drive authorization",
                "missing [GOOGLE] section in the configuration",
            ),
        }
        if report.should_stop() {
            return report;
        }
    }

    for mut sink in sinks {
        info!("Uploading {} to {}...", options.folder, sink.name());

        let step = format!("{} folder", sink.name());
        report.record(&step, sink.create_folder(&options.folder).await);
        if report.should_stop() {
            return report;
        }

        let step = format!("{} upload", sink.name());
        report.record_upload(&step, sink.upload().await);
        if report.should_stop() {
            return report;
        }
    }

    report
}
