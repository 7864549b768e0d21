//! Upload flow: file selection, password entry, upload, share link.

mod machine;

pub use machine::{UploadMachine, UploadRequest, UploadState};

use thiserror::Error;

/// Longest expiry, in days, the client will request.
pub const MAX_EXPIRY_DAYS: u32 = 365;

/// Errors shown inline by the upload widget.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// Upload attempted with no file selected.
    #[error("Please select a file to upload")]
    MissingFile,

    /// Upload attempted with a blank password.
    #[error("Please provide a password")]
    MissingPassword,

    /// The backend or transport failed. `detail` is logged, not shown.
    #[error("Error uploading file. Please try again.")]
    Failed {
        /// Underlying error text.
        detail: String,
    },
}

impl UploadError {
    /// Whether the error was caught before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(self, UploadError::MissingFile | UploadError::MissingPassword)
    }
}
