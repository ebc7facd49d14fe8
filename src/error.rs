use std::{io, path::PathBuf};

use reqwest::StatusCode;
use thiserror::Error;

/// Error conditions that can be returned by any stage of a backup run
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Request network error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Not found {} in the current directory", .0.display())]
    ConfigMissing(PathBuf),

    #[error("HTTP error {status} while {context}")]
    Status { status: StatusCode, context: String },

    #[error("VK API error {code}: {message}")]
    VkApi { code: i64, message: String },

    #[error("Expected response missing")]
    ResponseMissing,

    #[error("Photo not found: {0}")]
    PhotoNotFound(String),

    #[error("No album found with title {0}")]
    AlbumNotFound(String),

    #[error("No upload URL issued for {path}: {reason}")]
    UploadTargetMissing { path: String, reason: String },

    #[error("No remote folder created before upload")]
    NoUploadFolder,

    #[error("Authorization error. {0}")]
    Auth(String),
}

pub type Result<T> = std::result::Result<T, BackupError>;
