//! # Storage Sinks
//!
//! Remote destinations the local download folder is mirrored to. Both
//! implementations share one contract:
//!
//! 1. [`StorageSink::create_folder`] creates the remote container and
//!    remembers its name as the upload target, even when the request fails.
//! 2. [`StorageSink::upload`] sends every regular file of the local folder
//!    with that name, one request chain per file.
//!
//! Uploads are never deduplicated: each call re-sends every file.

mod google;
mod yandex;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{error::Result, types::UploadReport};

pub use google::GoogleDrive;
pub use yandex::YandexDisk;

#[async_trait]
pub trait StorageSink: Send + Sync {
    /// Human readable name used in logs and the run summary.
    fn name(&self) -> &'static str;

    async fn create_folder(&mut self, name: &str) -> Result<()>;

    async fn upload(&self) -> Result<UploadReport>;
}

/// Local folder an upload reads from: `root/name`.
pub(crate) fn local_folder(root: &Path, name: &str) -> PathBuf {
    root.join(name)
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
