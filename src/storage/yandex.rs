use std::{
    fmt,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use reqwest::{Client, header::AUTHORIZATION};

use crate::{
    error::{BackupError, Result},
    http::send_checked,
    management::list_files,
    storage::{StorageSink, display_name, local_folder},
    types::{UploadLink, UploadReport},
    utils, warning,
};

pub const API_BASE_URL: &str = "https://cloud-api.yandex.net/v1/disk";

/// Yandex Disk REST API sink.
///
/// The token is sent verbatim in the `Authorization` header, so it carries
/// its scheme (`OAuth y0_...`).
#[derive(Clone)]
pub struct YandexDisk {
    http: Client,
    base_url: String,
    token: String,
    local_root: PathBuf,
    folder_name: Option<String>,
}

impl fmt::Debug for YandexDisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YandexDisk")
            .field("base_url", &self.base_url)
            .field("token", &"xxx")
            .field("folder_name", &self.folder_name)
            .finish()
    }
}

impl YandexDisk {
    /// Creates a sink for the Yandex Disk REST API.
    ///
    /// # Arguments
    ///
    /// * `token` - Value of the `Authorization` header including its scheme,
    ///   e.g. `OAuth y0_...`
    ///
    /// # Example
    ///
    /// ```
    /// let mut disk = YandexDisk::new(&settings.yandex.token);
    /// disk.create_folder("vk_photos").await.ok();
    /// let report = disk.upload().await?;
    /// ```
    pub fn new(token: &str) -> Self {
        log::info!("Yandex Disk client created");
        Self {
            http: Client::new(),
            base_url: API_BASE_URL.to_string(),
            token: token.to_string(),
            local_root: PathBuf::from("."),
            folder_name: None,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Directory holding the local folder to upload (the working directory by default).
    pub fn with_local_root<P: AsRef<Path>>(mut self, root: P) -> Self {
        self.local_root = root.as_ref().to_path_buf();
        self
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Asks Yandex for a one-off upload URL for `folder/file`.
    ///
    /// Yandex refuses to issue one when the target already exists (409), and
    /// also for a rejected token or a server error. Every refusal surfaces as
    /// [`BackupError::UploadTargetMissing`] carrying the status.
    async fn upload_url(&self, folder: &str, file: &str) -> Result<String> {
        let remote_path = format!("{folder}/{file}");
        let request = self
            .http
            .get(self.build_url("resources/upload"))
            .header(AUTHORIZATION, &self.token)
            .query(&[("path", &remote_path)]);

        let response = match send_checked(request, "requesting upload url").await {
            Ok(response) => response,
            Err(BackupError::Status { status, .. }) => {
                return Err(BackupError::UploadTargetMissing {
                    path: remote_path,
                    reason: format!("HTTP {status}"),
                });
            }
            Err(e) => return Err(e),
        };

        let link: UploadLink = response.json().await?;
        let href = link
            .href
            .filter(|href| !href.is_empty())
            .ok_or_else(|| BackupError::UploadTargetMissing {
                path: remote_path,
                reason: "empty upload link".to_string(),
            })?;
        log::info!("Retrieved url for uploading {file}");
        Ok(href)
    }

    async fn upload_file(&self, folder: &str, path: &Path) -> Result<()> {
        let file = display_name(path);
        let href = self.upload_url(folder, &file).await?;
        let data = async_fs::read(path).await?;
        send_checked(self.http.put(href).body(data), "uploading photo").await?;
        Ok(())
    }
}

#[async_trait]
impl StorageSink for YandexDisk {
    fn name(&self) -> &'static str {
        "Yandex Disk"
    }

    async fn create_folder(&mut self, name: &str) -> Result<()> {
        self.folder_name = Some(name.to_string());

        let request = self
            .http
            .put(self.build_url("resources"))
            .header(AUTHORIZATION, &self.token)
            .query(&[("path", name)]);

        match send_checked(request, "creating folder").await {
            Ok(_) => {
                log::info!("Folder {name} created on Yandex Disk");
                Ok(())
            }
            Err(e) => {
                log::error!("Failed creating folder {name} on Yandex Disk: {e}");
                Err(e)
            }
        }
    }

    async fn upload(&self) -> Result<UploadReport> {
        let folder = self.folder_name.as_deref().ok_or(BackupError::NoUploadFolder)?;
        let files = list_files(local_folder(&self.local_root, folder)).await?;

        let mut report = UploadReport::default();
        let pb = utils::progress_bar(files.len() as u64, "Uploading photos on Yandex Disk");

        for path in files {
            let file = display_name(&path);
            match self.upload_file(folder, &path).await {
                Ok(()) => {
                    log::info!("Photo {file} uploaded on Yandex Disk");
                    report.uploaded.push(file);
                }
                Err(e @ BackupError::UploadTargetMissing { .. }) => {
                    log::error!("Stopped uploading {folder} on Yandex Disk: {e}");
                    warning!("{}", e);
                    report.aborted = Some(e.to_string());
                    break;
                }
                Err(e) => {
                    log::error!("Failed uploading photo {file} on Yandex Disk: {e}");
                    report.failures.push(format!("{file}: {e}"));
                }
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(report)
    }
}
