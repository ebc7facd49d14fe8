use std::{
    fmt,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::{BackupError, Result},
    http::send_checked,
    management::list_files,
    storage::{StorageSink, display_name, local_folder},
    types::{CreateDriveFileRequest, DriveFile, Token, UploadReport},
    utils,
};

pub const DRIVE_API_URL: &str = "https://www.googleapis.com/drive/v3";
pub const DRIVE_UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3";
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Google Drive v3 sink.
///
/// Built from a token obtained through [`crate::auth::authorize`]. Each file
/// is uploaded in two requests: a metadata create under the remote folder,
/// then a media upload of the bytes into that file.
#[derive(Clone)]
pub struct GoogleDrive {
    http: Client,
    api_url: String,
    upload_url: String,
    token: Token,
    local_root: PathBuf,
    folder_name: Option<String>,
    folder_id: Option<String>,
}

impl fmt::Debug for GoogleDrive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleDrive")
            .field("api_url", &self.api_url)
            .field("upload_url", &self.upload_url)
            .field("token", &"xxx")
            .field("folder_name", &self.folder_name)
            .field("folder_id", &self.folder_id)
            .finish()
    }
}

impl GoogleDrive {
    /// Creates a sink from an authorized session.
    ///
    /// # Arguments
    ///
    /// * `token` - Access token returned by [`crate::auth::authorize`]
    pub fn new(token: Token) -> Self {
        log::info!("Google Drive client created");
        Self {
            http: Client::new(),
            api_url: DRIVE_API_URL.to_string(),
            upload_url: DRIVE_UPLOAD_URL.to_string(),
            token,
            local_root: PathBuf::from("."),
            folder_name: None,
            folder_id: None,
        }
    }

    pub fn with_base_urls(mut self, api_url: &str, upload_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self.upload_url = upload_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_local_root<P: AsRef<Path>>(mut self, root: P) -> Self {
        self.local_root = root.as_ref().to_path_buf();
        self
    }

    /// Drive id of the folder created by the last successful `create_folder`.
    pub fn folder_id(&self) -> Option<&str> {
        self.folder_id.as_deref()
    }

    async fn create_file(&self, metadata: &CreateDriveFileRequest) -> Result<DriveFile> {
        let request = self
            .http
            .post(format!("{}/files", self.api_url))
            .bearer_auth(&self.token.access_token)
            .json(metadata);

        let response = send_checked(request, "creating drive file").await?;
        Ok(response.json::<DriveFile>().await?)
    }

    async fn upload_file(&self, folder_id: &str, path: &Path) -> Result<()> {
        let metadata = CreateDriveFileRequest {
            name: display_name(path),
            mime_type: None,
            parents: vec![folder_id.to_string()],
        };
        let file = self.create_file(&metadata).await?;

        let data = async_fs::read(path).await?;
        let request = self
            .http
            .patch(format!("{}/files/{}", self.upload_url, file.id))
            .query(&[("uploadType", "media")])
            .bearer_auth(&self.token.access_token)
            .body(data);
        send_checked(request, "uploading file content").await?;
        Ok(())
    }
}

#[async_trait]
impl StorageSink for GoogleDrive {
    fn name(&self) -> &'static str {
        "Google Drive"
    }

    async fn create_folder(&mut self, name: &str) -> Result<()> {
        self.folder_name = Some(name.to_string());

        let metadata = CreateDriveFileRequest {
            name: name.to_string(),
            mime_type: Some(FOLDER_MIME_TYPE.to_string()),
            parents: Vec::new(),
        };

        match self.create_file(&metadata).await {
            Ok(folder) => {
                log::info!("Folder {name} created on Google Drive");
                self.folder_id = Some(folder.id);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed creating folder {name} on Google Drive: {e}");
                Err(e)
            }
        }
    }

    async fn upload(&self) -> Result<UploadReport> {
        let folder = self.folder_name.as_deref().ok_or(BackupError::NoUploadFolder)?;
        let folder_id = self.folder_id.as_deref().ok_or(BackupError::NoUploadFolder)?;
        let files = list_files(local_folder(&self.local_root, folder)).await?;

        let mut report = UploadReport::default();
        let pb = utils::progress_bar(files.len() as u64, "Uploading photos on Google Drive");

        for path in files {
            let file = display_name(&path);
            match self.upload_file(folder_id, &path).await {
                Ok(()) => {
                    log::info!("Photo {file} uploaded on Google Drive");
                    report.uploaded.push(file);
                }
                Err(e) => {
                    log::error!("Failed uploading photo {file} on Google Drive: {e}");
                    report.failures.push(format!("{file}: {e}"));
                }
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(report)
    }
}
