//! Backend API client.
//!
//! [`FileApi`] is the contract the state machines are written against.
//! [`HttpApi`] talks to the real backend; [`SimulatedApi`] is an in-memory
//! stand-in with artificial latency.

mod http;
mod simulated;
mod types;

use std::future::Future;

pub use http::HttpApi;
pub use simulated::{generate_file_id, SimulatedApi};
pub use types::{
    sanitize_file_name, DownloadedFile, FileMetadata, PasswordRequest, SelectedFile,
    UploadResult,
};

use crate::config::Config;
use crate::Result;

/// Operations the client needs from the backend.
///
/// No implementation retries. A wrong password is an expected outcome:
/// `validate_password` reports it as `Ok(false)` and only `download_file`
/// turns it into [`SdropError::InvalidPassword`](crate::SdropError::InvalidPassword).
pub trait FileApi: Send + Sync {
    /// Upload `file` protected by `password`, expiring after `expiry_days`.
    fn upload_file(
        &self,
        file: &SelectedFile,
        password: &str,
        expiry_days: u32,
    ) -> impl Future<Output = Result<UploadResult>> + Send;

    /// Fetch metadata; `Ok(None)` when the file is missing or expired.
    fn get_file_metadata(
        &self,
        file_id: &str,
    ) -> impl Future<Output = Result<Option<FileMetadata>>> + Send;

    /// Check a password without downloading.
    fn validate_password(
        &self,
        file_id: &str,
        password: &str,
    ) -> impl Future<Output = Result<bool>> + Send;

    /// Download the raw file content.
    fn download_file(
        &self,
        file_id: &str,
        password: &str,
    ) -> impl Future<Output = Result<DownloadedFile>> + Send;
}

/// Either backend, chosen at startup from configuration.
pub enum Backend {
    /// Real HTTP backend.
    Http(HttpApi),
    /// In-memory simulation.
    Simulated(SimulatedApi),
}

impl Backend {
    /// Pick the backend selected by `config.simulate.enabled`.
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.simulate.enabled {
            tracing::info!("Using simulated backend");
            Ok(Backend::Simulated(SimulatedApi::new(config.simulate.clone())))
        } else {
            tracing::debug!(base_url = %config.api.base_url, "Using HTTP backend");
            Ok(Backend::Http(HttpApi::new(&config.api)?))
        }
    }
}

impl FileApi for Backend {
    async fn upload_file(
        &self,
        file: &SelectedFile,
        password: &str,
        expiry_days: u32,
    ) -> Result<UploadResult> {
        match self {
            Backend::Http(api) => api.upload_file(file, password, expiry_days).await,
            Backend::Simulated(api) => api.upload_file(file, password, expiry_days).await,
        }
    }

    async fn get_file_metadata(&self, file_id: &str) -> Result<Option<FileMetadata>> {
        match self {
            Backend::Http(api) => api.get_file_metadata(file_id).await,
            Backend::Simulated(api) => api.get_file_metadata(file_id).await,
        }
    }

    async fn validate_password(&self, file_id: &str, password: &str) -> Result<bool> {
        match self {
            Backend::Http(api) => api.validate_password(file_id, password).await,
            Backend::Simulated(api) => api.validate_password(file_id, password).await,
        }
    }

    async fn download_file(&self, file_id: &str, password: &str) -> Result<DownloadedFile> {
        match self {
            Backend::Http(api) => api.download_file(file_id, password).await,
            Backend::Simulated(api) => api.download_file(file_id, password).await,
        }
    }
}
