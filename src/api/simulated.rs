//! In-memory backend with artificial latency.
//!
//! Stands in for the real service during demos and offline development.
//! Behaves like the HTTP backend from the client's point of view: uploads get
//! a fresh id and share URL, expired files disappear, wrong passwords are
//! refused.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};

use super::{DownloadedFile, FileApi, FileMetadata, SelectedFile, UploadResult};
use crate::config::SimulateConfig;
use crate::{Result, SdropError};

/// Length of generated file ids.
pub const FILE_ID_LENGTH: usize = 8;

const FILE_ID_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a random lowercase base36 file id.
pub fn generate_file_id() -> String {
    let mut rng = rand::rng();
    (0..FILE_ID_LENGTH)
        .map(|_| FILE_ID_CHARS[rng.random_range(0..FILE_ID_CHARS.len())] as char)
        .collect()
}

struct StoredFile {
    metadata: FileMetadata,
    password_digest: [u8; 32],
    content: Bytes,
}

fn digest(password: &str) -> [u8; 32] {
    Sha256::digest(password.as_bytes()).into()
}

/// In-memory [`FileApi`].
pub struct SimulatedApi {
    config: SimulateConfig,
    files: Mutex<HashMap<String, StoredFile>>,
}

impl SimulatedApi {
    /// Create an empty simulated backend.
    pub fn new(config: SimulateConfig) -> Self {
        Self {
            config,
            files: Mutex::new(HashMap::new()),
        }
    }

    /// Store a file directly, bypassing latency. Useful for demos and tests.
    pub fn seed(
        &self,
        file_id: impl Into<String>,
        file: &SelectedFile,
        password: &str,
        expires_at: Option<DateTime<Utc>>,
    ) {
        let file_id = file_id.into();
        let stored = StoredFile {
            metadata: FileMetadata {
                id: file_id.clone(),
                name: file.name.clone(),
                size: file.size(),
                content_type: file.content_type.clone(),
                created_at: Utc::now(),
                expires_at,
                requires_password: true,
                download_count: 0,
            },
            password_digest: digest(password),
            content: file.content.clone(),
        };
        self.lock().insert(file_id, stored);
    }

    /// Number of stored files, expired ones included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, StoredFile>> {
        // The map is never left half-updated, so a poisoned lock is still usable.
        self.files.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn share_url(&self, file_id: &str) -> String {
        format!("{}/{}", self.config.origin.trim_end_matches('/'), file_id)
    }

    /// Run `f` against a live (present, unexpired) file.
    fn with_live<T>(&self, file_id: &str, f: impl FnOnce(&mut StoredFile) -> T) -> Option<T> {
        let now = Utc::now();
        let mut files = self.lock();
        let stored = files.get_mut(file_id)?;
        if stored.metadata.expires_at.is_some_and(|at| at <= now) {
            return None;
        }
        Some(f(stored))
    }
}

async fn latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

impl FileApi for SimulatedApi {
    async fn upload_file(
        &self,
        file: &SelectedFile,
        password: &str,
        expiry_days: u32,
    ) -> Result<UploadResult> {
        latency(self.config.upload_delay()).await;

        if file.name.is_empty() {
            return Err(SdropError::Validation("no file selected".to_string()));
        }
        if password.trim().is_empty() {
            return Err(SdropError::Validation("password is empty".to_string()));
        }
        if expiry_days == 0 {
            return Err(SdropError::Validation(
                "expiry must be at least one day".to_string(),
            ));
        }

        let mut file_id = generate_file_id();
        while self.lock().contains_key(&file_id) {
            file_id = generate_file_id();
        }
        let expires_at = chrono::Duration::try_days(i64::from(expiry_days))
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .ok_or_else(|| SdropError::Validation("expiry too far in the future".to_string()))?;
        self.seed(file_id.clone(), file, password, Some(expires_at));

        tracing::debug!(%file_id, name = %file.name, "Simulated upload stored");
        Ok(UploadResult {
            url: self.share_url(&file_id),
            file_id,
            expires_at: Some(expires_at),
        })
    }

    async fn get_file_metadata(&self, file_id: &str) -> Result<Option<FileMetadata>> {
        latency(self.config.metadata_delay()).await;
        Ok(self.with_live(file_id, |stored| stored.metadata.clone()))
    }

    async fn validate_password(&self, file_id: &str, password: &str) -> Result<bool> {
        latency(self.config.validate_delay()).await;
        let candidate = digest(password);
        self.with_live(file_id, |stored| stored.password_digest == candidate)
            .ok_or_else(|| SdropError::NotFound(format!("file {file_id}")))
    }

    async fn download_file(&self, file_id: &str, password: &str) -> Result<DownloadedFile> {
        latency(self.config.download_delay()).await;
        let candidate = digest(password);
        self.with_live(file_id, |stored| {
            if stored.password_digest != candidate {
                return Err(SdropError::InvalidPassword);
            }
            stored.metadata.download_count += 1;
            Ok(DownloadedFile {
                file_name: Some(stored.metadata.name.clone()),
                content_type: stored.metadata.content_type.clone(),
                content: stored.content.clone(),
            })
        })
        .ok_or_else(|| SdropError::NotFound(format!("file {file_id}")))?
    }
}
