//! Access state machine: unlock with a validated password, then download.

use super::AccessError;
use crate::api::{DownloadedFile, FileApi, FileMetadata};
use crate::Result;

/// Where the file page is in its flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessState {
    /// Waiting for a password.
    Locked,
    /// Password validation in flight.
    Unlocking,
    /// Password accepted by the backend.
    Unlocked,
    /// Download in flight. Only reachable from `Unlocked`.
    Downloading,
}

/// Ticket for an in-flight password validation.
#[derive(Debug, Clone)]
pub struct UnlockRequest {
    /// File being unlocked.
    pub file_id: String,
    /// Password being checked.
    pub password: String,
}

/// Ticket for an in-flight download.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    /// File being downloaded.
    pub file_id: String,
    /// Password proven valid by the unlock.
    pub password: String,
}

/// State behind the file page once its metadata is known.
#[derive(Debug, Clone)]
pub struct AccessMachine {
    metadata: FileMetadata,
    password: String,
    state: AccessState,
    error: Option<AccessError>,
}

impl AccessMachine {
    /// Start locked for the given file.
    pub fn new(metadata: FileMetadata) -> Self {
        Self {
            metadata,
            password: String::new(),
            state: AccessState::Locked,
            error: None,
        }
    }

    /// File identifier.
    pub fn file_id(&self) -> &str {
        &self.metadata.id
    }

    /// Metadata the page was opened with.
    pub fn metadata(&self) -> &FileMetadata {
        &self.metadata
    }

    /// Current state.
    pub fn state(&self) -> AccessState {
        self.state
    }

    /// Inline error, if any.
    pub fn error(&self) -> Option<&AccessError> {
        self.error.as_ref()
    }

    /// Password as typed.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Whether the password has been accepted.
    pub fn is_unlocked(&self) -> bool {
        matches!(self.state, AccessState::Unlocked | AccessState::Downloading)
    }

    /// Whether the password field accepts input.
    pub fn can_edit_password(&self) -> bool {
        self.state == AccessState::Locked
    }

    /// Whether the download action should be offered.
    pub fn can_download(&self) -> bool {
        self.state == AccessState::Unlocked
    }

    /// Type into the password field. Ignored unless `Locked`.
    pub fn set_password(&mut self, password: impl Into<String>) {
        if self.can_edit_password() {
            self.password = password.into();
        }
    }

    /// Start validating the typed password.
    ///
    /// Returns `None` (and changes nothing) for a blank password or when not
    /// `Locked`.
    pub fn begin_unlock(&mut self) -> Option<UnlockRequest> {
        if self.state != AccessState::Locked || self.password.trim().is_empty() {
            return None;
        }
        self.state = AccessState::Unlocking;
        self.error = None;
        Some(UnlockRequest {
            file_id: self.metadata.id.clone(),
            password: self.password.clone(),
        })
    }

    /// Apply a validation outcome.
    pub fn finish_unlock(&mut self, request: &UnlockRequest, outcome: Result<bool>) {
        if self.state != AccessState::Unlocking || request.password != self.password {
            tracing::debug!("Dropping stale unlock completion");
            return;
        }

        match outcome {
            Ok(true) => {
                tracing::info!(file_id = %request.file_id, "File unlocked");
                self.state = AccessState::Unlocked;
            }
            Ok(false) => {
                tracing::debug!(file_id = %request.file_id, "Password rejected");
                self.state = AccessState::Locked;
                self.error = Some(AccessError::WrongPassword);
            }
            Err(e) => {
                tracing::error!("Password validation error: {}", e);
                self.state = AccessState::Locked;
                self.error = Some(AccessError::RequestFailed {
                    detail: e.to_string(),
                });
            }
        }
    }

    /// Validate the typed password against the backend.
    pub async fn unlock<A: FileApi>(&mut self, api: &A) -> AccessState {
        if let Some(request) = self.begin_unlock() {
            let outcome = api
                .validate_password(&request.file_id, &request.password)
                .await;
            self.finish_unlock(&request, outcome);
        }
        self.state
    }

    /// Start a download. Only possible once `Unlocked`.
    pub fn begin_download(&mut self) -> std::result::Result<DownloadRequest, AccessError> {
        match self.state {
            AccessState::Unlocked => {}
            AccessState::Downloading => {
                return Err(AccessError::DownloadFailed {
                    detail: "download already in progress".to_string(),
                })
            }
            AccessState::Locked | AccessState::Unlocking => return Err(AccessError::Locked),
        }
        self.state = AccessState::Downloading;
        self.error = None;
        Ok(DownloadRequest {
            file_id: self.metadata.id.clone(),
            password: self.password.clone(),
        })
    }

    /// Apply a download outcome. The page stays unlocked either way.
    pub fn finish_download(
        &mut self,
        request: &DownloadRequest,
        outcome: Result<DownloadedFile>,
    ) -> std::result::Result<DownloadedFile, AccessError> {
        if self.state != AccessState::Downloading {
            tracing::debug!(file_id = %request.file_id, "Dropping stale download completion");
            return Err(AccessError::DownloadFailed {
                detail: "no download in progress".to_string(),
            });
        }
        self.state = AccessState::Unlocked;

        match outcome {
            Ok(file) => Ok(file),
            Err(e) => {
                tracing::error!("Download error: {}", e);
                let error = AccessError::DownloadFailed {
                    detail: e.to_string(),
                };
                self.error = Some(error.clone());
                Err(error)
            }
        }
    }

    /// Download the file with the proven password.
    pub async fn download<A: FileApi>(
        &mut self,
        api: &A,
    ) -> std::result::Result<DownloadedFile, AccessError> {
        let request = self.begin_download()?;
        let outcome = api.download_file(&request.file_id, &request.password).await;
        self.finish_download(&request, outcome)
    }
}
