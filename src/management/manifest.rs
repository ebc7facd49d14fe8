use std::path::{Path, PathBuf};

use crate::{error::Result, types::ManifestEntry};

pub const PROFILE_MANIFEST: &str = "profile_photos.json";
pub const WALL_MANIFEST: &str = "wall_photos.json";
pub const ALBUM_MANIFEST: &str = "album_photos.json";

/// The per-run JSON list of downloaded file names and their size classes.
pub struct ManifestManager {
    path: PathBuf,
    entries: Vec<ManifestEntry>,
}

impl ManifestManager {
    pub fn new<P: AsRef<Path>>(dir: P, file_name: &str, entries: Vec<ManifestEntry>) -> Self {
        Self {
            path: dir.as_ref().join(file_name),
            entries,
        }
    }

    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = async_fs::read_to_string(&path).await?;
        let entries: Vec<ManifestEntry> = serde_json::from_str(&content)?;
        Ok(Self { path, entries })
    }

    /// Writes the manifest, replacing any previous file of the same name.
    pub async fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                async_fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string(&self.entries)?;
        async_fs::write(&self.path, json).await?;
        log::info!("JSON file saved in {}", self.path.display());
        Ok(())
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
