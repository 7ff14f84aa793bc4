//! Object storage for post images.
//!
//! `HttpObjectStorage` speaks the Firebase Storage REST dialect:
//!
//! ```text
//! POST {base}/b/{bucket}/o?name=<file>      (raw bytes, streamed)
//!   → { "name": "<file>", "downloadTokens": "<token>" }
//! download URL: {base}/b/{bucket}/o/<file>?alt=media&token=<token>
//! ```
//!
//! The body is streamed in fixed-size chunks and an `UploadProgress` is
//! emitted as each chunk is handed to the connection.

use std::fmt;
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use log::{debug, info, warn};
use serde::Deserialize;
use tokio::sync::mpsc::Sender;

pub const DEFAULT_STORAGE_BASE_URL: &str = "https://firebasestorage.googleapis.com/v0";
const CHUNK_SIZE: usize = 64 * 1024;

/// Snapshot of an in-flight transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    pub bytes_transferred: u64,
    pub total_bytes: u64,
}

impl UploadProgress {
    /// Whole-number percentage, clamped to 0..=100. An empty file counts as done.
    pub fn percent(&self) -> u8 {
        if self.total_bytes == 0 {
            return 100;
        }
        let ratio = self.bytes_transferred as f64 / self.total_bytes as f64;
        (ratio * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

#[derive(Debug)]
pub enum StorageError {
    /// Reading the local file failed.
    Io(std::io::Error),
    Network(String),
    Api { status: u16, message: String },
    Parse(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "file error: {e}"),
            StorageError::Network(msg) => write!(f, "network error: {msg}"),
            StorageError::Api { status, message } => {
                write!(f, "storage error (HTTP {status}): {message}")
            }
            StorageError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Stores `bytes` under `file_name`, reporting progress on `progress`,
    /// and returns the public download URL.
    async fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        progress: Sender<UploadProgress>,
    ) -> Result<String, StorageError>;
}

/// Object name for an upload: `<unix millis>-<original file name>`.
pub fn upload_file_name(path: &Path, now: DateTime<Utc>) -> String {
    let original = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    format!("{}-{}", now.timestamp_millis(), original)
}

/// Reads a local file and uploads it under a timestamped name.
pub async fn upload_file(
    storage: &dyn ObjectStorage,
    path: &Path,
    progress: Sender<UploadProgress>,
) -> Result<String, StorageError> {
    let bytes = tokio::fs::read(path).await.map_err(StorageError::Io)?;
    let file_name = upload_file_name(path, Utc::now());
    info!(
        "Uploading {} as {} ({} bytes)",
        path.display(),
        file_name,
        bytes.len()
    );
    storage.upload(&file_name, bytes, progress).await
}

/// MIME type from the file extension, for the handful of image formats the
/// editor accepts.
fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[derive(Deserialize, Debug)]
struct UploadedObject {
    name: String,
    #[serde(rename = "downloadTokens", default)]
    download_tokens: Option<String>,
}

pub struct HttpObjectStorage {
    base_url: String,
    bucket: String,
    client: reqwest::Client,
}

impl HttpObjectStorage {
    pub fn new(base_url: String, bucket: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket,
            client: reqwest::Client::new(),
        }
    }

    /// Public URL of a stored object.
    fn download_url(&self, object: &UploadedObject) -> Result<String, StorageError> {
        let mut url =
            reqwest::Url::parse(&self.base_url).map_err(|e| StorageError::Parse(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| StorageError::Parse(format!("invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["b", self.bucket.as_str(), "o", object.name.as_str()]);
        url.query_pairs_mut().append_pair("alt", "media");
        if let Some(token) = &object.download_tokens {
            url.query_pairs_mut().append_pair("token", token);
        }
        Ok(url.to_string())
    }
}

#[async_trait]
impl ObjectStorage for HttpObjectStorage {
    async fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        progress: Sender<UploadProgress>,
    ) -> Result<String, StorageError> {
        let total_bytes = bytes.len() as u64;
        let chunks: Vec<Vec<u8>> = bytes.chunks(CHUNK_SIZE).map(<[u8]>::to_vec).collect();

        let mut bytes_transferred = 0u64;
        let body_stream = futures::stream::iter(chunks).map(move |chunk| {
            bytes_transferred += chunk.len() as u64;
            let snapshot = UploadProgress {
                bytes_transferred,
                total_bytes,
            };
            if progress.try_send(snapshot).is_err() {
                debug!("Progress update dropped at {} bytes", bytes_transferred);
            }
            Ok::<_, std::io::Error>(chunk)
        });

        let response = self
            .client
            .post(format!("{}/b/{}/o", self.base_url, self.bucket))
            .query(&[("name", file_name)])
            .header("Content-Type", content_type_for(file_name))
            .body(reqwest::Body::wrap_stream(body_stream))
            .send()
            .await
            .map_err(|e| StorageError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Storage upload error: {} - {}", status, err_body);
            return Err(StorageError::Api {
                status,
                message: err_body,
            });
        }

        let object: UploadedObject = response
            .json()
            .await
            .map_err(|e| StorageError::Parse(e.to_string()))?;
        let url = self.download_url(&object)?;
        info!("Upload complete: {}", url);
        Ok(url)
    }
}
