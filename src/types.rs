use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    pub expires_in: u64,
    #[serde(default)]
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// Envelope every VK API method answers with.
#[derive(Debug, Clone, Deserialize)]
pub struct VkEnvelope<T> {
    pub response: Option<T>,
    pub error: Option<VkApiError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VkApiError {
    pub error_code: i64,
    pub error_msg: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemsPage<T> {
    #[serde(default)]
    pub count: u64,
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub id: i64,
    pub date: i64,
    pub likes: Likes,
    pub sizes: Vec<PhotoSize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Likes {
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoSize {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub width: u64,
    pub height: u64,
}

impl PhotoSize {
    pub fn area(&self) -> u64 {
        self.width * self.height
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: i64,
    pub title: String,
}

/// A photo reduced to the single variant that will be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPhoto {
    pub id: i64,
    pub likes: u64,
    pub date: NaiveDate,
    pub url: String,
    pub size_class: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub file_name: String,
    #[serde(rename = "size")]
    pub size_class: String,
}

/// What one download method produced: the manifest it wrote and the
/// failures it recovered from.
#[derive(Debug, Clone, Default)]
pub struct DownloadReport {
    pub manifest: Vec<ManifestEntry>,
    pub failures: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UploadReport {
    pub uploaded: Vec<String>,
    pub failures: Vec<String>,
    pub aborted: Option<String>,
}

impl UploadReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.aborted.is_none()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadLink {
    pub href: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveFile {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDriveFileRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<String>,
}

/// Whether a run keeps going after a step records a failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    #[default]
    Continue,
    Abort,
}

#[derive(Tabled)]
pub struct StepTableRow {
    pub step: String,
    pub status: String,
    pub items: usize,
    pub failures: usize,
}
