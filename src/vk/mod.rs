//! # VK Photo Source
//!
//! Client for the VK API methods the backup needs (`photos.get` and
//! `photos.getAlbums`) and the downloader that turns photo descriptors into
//! local files plus a manifest.
//!
//! Every entry point follows the same pipeline:
//!
//! ```text
//! photos.get JSON → Photo → ResolvedPhoto → <folder>/<name>.jpg → manifest
//! ```
//!
//! A file is written and recorded in the manifest only when the image
//! request answered with a 2xx status.

mod auth;

use std::{
    fmt,
    path::{Path, PathBuf},
};

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::{BackupError, Result},
    http::send_checked,
    management::{
        ALBUM_MANIFEST, ManifestManager, PROFILE_MANIFEST, WALL_MANIFEST, ensure_dir,
        existing_file_names,
    },
    types::{
        Album, DownloadReport, ItemsPage, ManifestEntry, Photo, ResolvedPhoto, VkEnvelope,
    },
    utils, warning,
};

pub use auth::authorize_url;

pub const API_BASE_URL: &str = "https://api.vk.com/method";
pub const API_VERSION: &str = "5.131";
pub const DEFAULT_FOLDER: &str = "vk_photos";
pub const DEFAULT_PROFILE_COUNT: u32 = 5;
pub const MAX_PHOTOS_PER_REQUEST: u32 = 1000;

#[derive(Clone)]
pub struct VkClient {
    http: Client,
    base_url: String,
    token: String,
    owner_id: i64,
    folder: PathBuf,
    manifest_dir: PathBuf,
}

impl fmt::Debug for VkClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VkClient")
            .field("base_url", &self.base_url)
            .field("token", &"xxx")
            .field("owner_id", &self.owner_id)
            .field("folder", &self.folder)
            .finish()
    }
}

impl VkClient {
    /// Creates a client for one VK account.
    ///
    /// # Arguments
    ///
    /// * `token` - VK access token from the `[VK]` section of `tokens.ini`
    /// * `owner_id` - Account whose photos are fetched; communities use a
    ///   negative id
    /// * `folder` - Local destination folder, created on the first download
    ///
    /// # Returns
    ///
    /// A client pointed at the public VK API that writes its manifests to the
    /// working directory.
    ///
    /// # Example
    ///
    /// ```
    /// let client = VkClient::new(&settings.vk.token, 783464, "vk_photos");
    /// let report = client.download_profile_photos(10).await?;
    /// println!("{} photos saved", report.manifest.len());
    /// ```
    pub fn new<P: AsRef<Path>>(token: &str, owner_id: i64, folder: P) -> Self {
        log::info!("VK client created for owner {owner_id}");
        Self {
            http: Client::new(),
            base_url: API_BASE_URL.to_string(),
            token: token.to_string(),
            owner_id,
            folder: folder.as_ref().to_path_buf(),
            manifest_dir: PathBuf::from("."),
        }
    }

    /// Replaces the `https://api.vk.com/method` prefix every method URL is built on.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Directory the JSON manifests are written to (the working directory by default).
    pub fn with_manifest_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.manifest_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Downloads up to `count` profile photos and writes `profile_photos.json`.
    pub async fn download_profile_photos(&self, count: u32) -> Result<DownloadReport> {
        let items = self
            .fetch_photos("profile", count)
            .await
            .inspect_err(|e| log::error!("Failed retrieving profile photos: {e}"))?;
        log::info!("Retrieved JSON string of profile photos");

        let mut report = DownloadReport::default();
        self.download_batch(items, "profile photos", &mut report).await;
        log::info!("Downloaded profile photos in {}", self.folder.display());

        self.save_manifest(PROFILE_MANIFEST, &report).await?;
        Ok(report)
    }

    /// Downloads the wall album and writes `wall_photos.json`.
    pub async fn download_wall_photos(&self) -> Result<DownloadReport> {
        let items = self
            .fetch_photos("wall", MAX_PHOTOS_PER_REQUEST)
            .await
            .inspect_err(|e| log::error!("Failed retrieving wall photos: {e}"))?;
        log::info!("Retrieved JSON string of wall photos");

        let mut report = DownloadReport::default();
        self.download_batch(items, "wall photos", &mut report).await;
        log::info!("Downloaded wall photos in {}", self.folder.display());

        self.save_manifest(WALL_MANIFEST, &report).await?;
        Ok(report)
    }

    /// Downloads the albums named in `titles`, or every album when `titles`
    /// is empty, into one combined `album_photos.json`.
    ///
    /// A title without a matching album is recorded as a failure and the
    /// remaining titles are still processed.
    pub async fn download_album_photos(&self, titles: &[String]) -> Result<DownloadReport> {
        let albums = self
            .list_albums()
            .await
            .inspect_err(|e| log::error!("Failed retrieving album list: {e}"))?;

        let mut report = DownloadReport::default();
        if titles.is_empty() {
            log::warn!("No album titles provided. Started downloading all albums");
            for album in &albums {
                self.download_album(album, &mut report).await;
            }
        } else {
            for title in titles {
                match find_album(&albums, title) {
                    Some(album) => self.download_album(album, &mut report).await,
                    None => {
                        let err = BackupError::AlbumNotFound(title.clone());
                        log::error!("{err}");
                        warning!("{}", err);
                        report.failures.push(err.to_string());
                    }
                }
            }
        }
        log::info!("Downloaded album photos in {}", self.folder.display());

        self.save_manifest(ALBUM_MANIFEST, &report).await?;
        Ok(report)
    }

    /// Lists every album owned by the account.
    ///
    /// Calls `photos.getAlbums` once; the result is in the order VK returns it,
    /// which is the order [`find_album`] searches.
    ///
    /// # Returns
    ///
    /// The `(id, title)` descriptors, or [`BackupError::VkApi`] when VK answers
    /// with an error object.
    pub async fn list_albums(&self) -> Result<Vec<Album>> {
        let page: ItemsPage<Album> = self.call("photos.getAlbums", &[]).await?;
        log::info!("Retrieved {} albums", page.items.len());
        Ok(page.items)
    }

    async fn download_album(&self, album: &Album, report: &mut DownloadReport) {
        match self
            .fetch_photos(&album.id.to_string(), MAX_PHOTOS_PER_REQUEST)
            .await
        {
            Ok(items) => {
                log::info!("Retrieved JSON string of album with title {}", album.title);
                let description = format!("album photos with title {}", album.title);
                self.download_batch(items, &description, report).await;
            }
            Err(e) => {
                log::error!("Failed retrieving album with title {}: {e}", album.title);
                report.failures.push(format!("album {}: {}", album.title, e));
            }
        }
    }

    async fn fetch_photos(&self, album_id: &str, count: u32) -> Result<Vec<Value>> {
        let params = [
            ("album_id", album_id.to_string()),
            ("extended", "1".to_string()),
            ("rev", "1".to_string()),
            ("count", count.to_string()),
        ];
        let page: ItemsPage<Value> = self.call("photos.get", &params).await?;
        Ok(page.items)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let request = self
            .http
            .get(format!("{}/{}", self.base_url, method))
            .query(&self.common_params())
            .query(params);

        let response = send_checked(request, &format!("calling {method}")).await?;
        let body: VkEnvelope<T> = response.json().await?;

        if let Some(err) = body.error {
            return Err(BackupError::VkApi {
                code: err.error_code,
                message: err.error_msg,
            });
        }
        body.response.ok_or(BackupError::ResponseMissing)
    }

    fn common_params(&self) -> [(&'static str, String); 3] {
        [
            ("access_token", self.token.clone()),
            ("v", API_VERSION.to_string()),
            ("owner_id", self.owner_id.to_string()),
        ]
    }

    /// Resolves and downloads one batch of descriptors.
    ///
    /// A descriptor missing expected fields stops the batch; a descriptor
    /// without sizes or a failed download is skipped.
    async fn download_batch(
        &self,
        items: Vec<Value>,
        description: &str,
        report: &mut DownloadReport,
    ) {
        let pb = utils::progress_bar(items.len() as u64, &format!("Downloading {description}"));

        for item in items {
            let photo: Photo = match serde_json::from_value(item) {
                Ok(photo) => photo,
                Err(e) => {
                    let err = BackupError::PhotoNotFound(format!("{description}: {e}"));
                    log::error!("{err}");
                    report.failures.push(err.to_string());
                    break;
                }
            };

            let Some(resolved) = utils::resolve_photo(&photo) else {
                let err =
                    BackupError::PhotoNotFound(format!("photo {} has no usable size", photo.id));
                log::error!("{err}");
                report.failures.push(err.to_string());
                pb.inc(1);
                continue;
            };
            log::info!("Retrieved photo url with id {}", resolved.id);

            match self.download_photo(&resolved).await {
                Ok(entry) => report.manifest.push(entry),
                Err(e) => {
                    log::error!("Failed downloading photo {}: {e}", resolved.id);
                    report.failures.push(format!("photo {}: {}", resolved.id, e));
                }
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
    }

    async fn download_photo(&self, photo: &ResolvedPhoto) -> Result<ManifestEntry> {
        ensure_dir(&self.folder).await?;
        let existing = existing_file_names(&self.folder).await?;

        let response = send_checked(self.http.get(&photo.url), "downloading photo").await?;
        let data = response.bytes().await?;

        let file_name = utils::choose_file_name(&existing, photo.likes, photo.date, photo.id);
        async_fs::write(self.folder.join(&file_name), &data).await?;
        log::info!("Downloaded photo {file_name}");

        Ok(ManifestEntry {
            file_name,
            size_class: photo.size_class.clone(),
        })
    }

    async fn save_manifest(&self, file_name: &str, report: &DownloadReport) -> Result<()> {
        ManifestManager::new(&self.manifest_dir, file_name, report.manifest.clone())
            .persist()
            .await
    }
}

/// First album whose title matches exactly.
pub fn find_album<'a>(albums: &'a [Album], title: &str) -> Option<&'a Album> {
    albums.iter().find(|album| album.title == title)
}
