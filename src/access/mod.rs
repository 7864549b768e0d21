//! File page: password-gated unlock and download of one shared file, plus
//! the SSH instructions modal shown next to it.

mod machine;
mod page;
mod ssh_modal;

pub use machine::{AccessMachine, AccessState, DownloadRequest, UnlockRequest};
pub use page::FilePage;
pub use ssh_modal::{SshModal, SshTab};

use thiserror::Error;

/// Errors shown inline on the file page.
///
/// A wrong password and a failed request carry different messages so the
/// user can tell whether retyping will help.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The backend refused the password.
    #[error("Invalid password. Please try again.")]
    WrongPassword,

    /// Password validation could not be completed.
    #[error("Could not verify the password. Please try again.")]
    RequestFailed {
        /// Underlying error text.
        detail: String,
    },

    /// The download failed after a successful unlock.
    #[error("Error downloading file. Please try again.")]
    DownloadFailed {
        /// Underlying error text.
        detail: String,
    },

    /// A download was attempted before unlocking.
    #[error("Enter the password to unlock this file first.")]
    Locked,
}
