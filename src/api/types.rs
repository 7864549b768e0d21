//! Wire and client-side types shared by every [`FileApi`](super::FileApi) implementation.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;

/// A file chosen for upload. Lives only in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Display name (no directory components).
    pub name: String,
    /// MIME type guessed from the name.
    pub content_type: String,
    /// File content.
    pub content: Bytes,
}

impl SelectedFile {
    /// Create a selected file, guessing the content type from `name`.
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let name = name.into();
        let content_type = mime_guess::from_path(&name)
            .first_or_octet_stream()
            .to_string();
        Self {
            name,
            content_type,
            content: content.into(),
        }
    }

    /// Read a file from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(name, content))
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    /// Server-issued file identifier.
    pub file_id: String,
    /// Shareable link.
    pub url: String,
    /// When the file stops being available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Descriptive, non-secret information about a shared file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    /// File identifier.
    pub id: String,
    /// Original file name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type.
    #[serde(rename = "type")]
    pub content_type: String,
    /// Upload time.
    pub created_at: DateTime<Utc>,
    /// Expiry time, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether a password is needed to download.
    pub requires_password: bool,
    /// Completed downloads so far.
    #[serde(default)]
    pub download_count: u64,
}

/// JSON body of the validate and download endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct PasswordRequest {
    /// Plaintext password.
    pub password: String,
}

/// Bytes returned by a successful download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    /// Name suggested by the server, if any.
    pub file_name: Option<String>,
    /// MIME type reported by the server.
    pub content_type: String,
    /// Raw file content.
    pub content: Bytes,
}

impl DownloadedFile {
    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// Name to save under: the server's suggestion, else `fallback`, made
    /// safe for use as a single path component.
    pub fn save_name(&self, fallback: &str) -> String {
        let candidate = self
            .file_name
            .as_deref()
            .map(sanitize_file_name)
            .filter(|n| !n.is_empty());
        candidate
            .or_else(|| Some(sanitize_file_name(fallback)).filter(|n| !n.is_empty()))
            .unwrap_or_else(|| "download".to_string())
    }

    /// Write the content into `dir` under [`save_name`](Self::save_name).
    pub async fn save_to(&self, dir: impl AsRef<Path>, fallback: &str) -> Result<PathBuf> {
        let path = dir.as_ref().join(self.save_name(fallback));
        tokio::fs::write(&path, &self.content).await?;
        tracing::info!(path = %path.display(), bytes = self.size(), "Saved download");
        Ok(path)
    }
}

/// Reduce a server- or user-supplied name to a single safe path component.
///
/// Drops directory components and control characters (CR/LF included) and
/// refuses the special names `.` and `..`.
pub fn sanitize_file_name(name: &str) -> String {
    let last = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let cleaned: String = last.chars().filter(|c| !c.is_control()).collect();
    let cleaned = cleaned.trim().to_string();
    if cleaned == "." || cleaned == ".." {
        String::new()
    } else {
        cleaned
    }
}
