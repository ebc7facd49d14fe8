//! VK Photo Backup Library
//!
//! This library backs up photographs from a VK account (profile photos, wall
//! photos and albums) into a local folder, records a JSON manifest for every
//! download run and mirrors the folder to Yandex Disk and Google Drive.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local OAuth callback server
//! - `auth` - Google OAuth 2.0 PKCE flow driven through the user's browser
//! - `cli` - Command-line operations and the backup orchestration
//! - `config` - `tokens.ini` settings and environment loading
//! - `error` - The crate-wide error type
//! - `http` - Shared request helpers
//! - `logging` - Run log written to `vk.log`
//! - `management` - Manifest persistence and local folder inspection
//! - `server` - Local HTTP server for OAuth callbacks
//! - `storage` - Yandex Disk and Google Drive sinks
//! - `types` - Data structures and type definitions
//! - `utils` - Size resolution, file naming and PKCE helpers
//! - `vk` - VK API client and photo downloader
//!
//! # Example
//!
//! ```
//! use vkbackup::{config::Settings, vk::VkClient};
//!
//! #[tokio::main]
//! async fn main() -> vkbackup::Res<()> {
//!     let settings = Settings::load("tokens.ini")?;
//!     let client = VkClient::new(&settings.vk.token, 783464, "vk_photos");
//!     client.download_profile_photos(10).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod management;
pub mod server;
pub mod storage;
pub mod types;
pub mod utils;
pub mod vk;

pub use error::{BackupError, Result};

/// A convenient Result type alias for the binary boundary.
///
/// Uses a boxed dynamic error trait object so callers can mix the crate's
/// [`BackupError`] with errors from other libraries.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Downloading {} photos", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Uploaded {} photos", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the process with exit code 1 right after printing. Only used
/// for failures that happen before any photo is touched, such as a missing
/// `tokens.ini`.
///
/// # Example
///
/// ```
/// error!("Configuration file not found: {}", path.display());
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for per-item failures that the run recovers from.
///
/// # Example
///
/// ```
/// warning!("Failed uploading photo {}", name);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
