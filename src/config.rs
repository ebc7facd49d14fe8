//! Configuration management for the VK photo backup.
//!
//! Credentials live in an INI file (`tokens.ini` by default) with one
//! section per remote service:
//!
//! ```ini
//! [VK]
//! token=your_oauth_vk_token
//! [YANDEX]
//! token=OAuth your_oauth_yandex_token
//! [GOOGLE]
//! client_id=your_client_id.apps.googleusercontent.com
//! client_secret=your_client_secret
//! ```
//!
//! Values can be overridden with `VKBACKUP_<SECTION>__<KEY>` environment
//! variables, which may also come from a `.env` file in the local data
//! directory. The resulting [`Settings`] value is handed to every client
//! constructor; nothing is read from global state afterwards.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::{BackupError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "tokens.ini";
pub const DEFAULT_REDIRECT_ADDR: &str = "127.0.0.1:8765";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file is optional: a missing `.env` leaves the environment untouched.
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/vkbackup/.env`
/// - macOS: `~/Library/Application Support/vkbackup/.env`
/// - Windows: `%LOCALAPPDATA%/vkbackup/.env`
pub async fn load_env() -> std::result::Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("vkbackup/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

#[derive(Clone, Deserialize)]
pub struct TokenSection {
    pub token: String,
}

impl fmt::Debug for TokenSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSection").field("token", &"xxx").finish()
    }
}

#[derive(Clone, Deserialize)]
pub struct GoogleSection {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_redirect_addr")]
    pub redirect_addr: String,
}

impl GoogleSection {
    pub fn redirect_uri(&self) -> String {
        format!("http://{}/callback", self.redirect_addr)
    }
}

impl fmt::Debug for GoogleSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleSection")
            .field("client_id", &self.client_id)
            .field("client_secret", &"xxx")
            .field("redirect_addr", &self.redirect_addr)
            .finish()
    }
}

fn default_redirect_addr() -> String {
    DEFAULT_REDIRECT_ADDR.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(rename = "vk", alias = "VK")]
    pub vk: TokenSection,

    #[serde(rename = "yandex", alias = "YANDEX")]
    pub yandex: TokenSection,

    #[serde(default, rename = "google", alias = "GOOGLE")]
    pub google: Option<GoogleSection>,
}

impl Settings {
    /// Reads the token file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`BackupError::ConfigMissing`] when the file does not exist and
    /// [`BackupError::Config`] when a section or key is missing.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(BackupError::ConfigMissing(path.to_path_buf()));
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Ini))
            .add_source(
                Environment::with_prefix("VKBACKUP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
