//! Error types for SDROP.

use thiserror::Error;

/// Common error type for SDROP.
#[derive(Error, Debug)]
pub enum SdropError {
    /// Validation error for user input, raised before any network call.
    #[error("validation error: {0}")]
    Validation(String),

    /// The backend rejected the password.
    ///
    /// Password validation reports a wrong password as `Ok(false)`; this
    /// variant only surfaces from operations that cannot return a boolean,
    /// such as downloads.
    #[error("invalid password")]
    InvalidPassword,

    /// Resource not found (missing or expired).
    #[error("{0} not found")]
    NotFound(String),

    /// Transport failure: connection refused, DNS, TLS, body read.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body, or the status reason.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl SdropError {
    /// Whether the error came from the transport or the backend rather than
    /// from local input.
    pub fn is_remote(&self) -> bool {
        matches!(self, SdropError::Network(_) | SdropError::Server { .. })
    }
}

impl From<reqwest::Error> for SdropError {
    fn from(e: reqwest::Error) -> Self {
        SdropError::Network(e.to_string())
    }
}

/// Result type alias for SDROP operations.
pub type Result<T> = std::result::Result<T, SdropError>;
