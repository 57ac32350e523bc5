//! Error types for dispatcher operations.

use thiserror::Error;

use crate::message::MessageError;
use crate::transport::HttpError;

/// Error type for [`crate::fcm::FcmClient`] operations.
///
/// Everything except [`FcmError::Http`] is detected locally, before any
/// request leaves the process.
#[derive(Debug, Error)]
pub enum FcmError {
    /// No HTTP client was injected.
    #[error("HTTP client not configured; inject one before making requests")]
    ClientNotConfigured,

    /// The HTTP client failed. Passed through unchanged.
    #[error("HTTP request failed: {0}")]
    Http(#[from] HttpError),

    /// The message cannot be addressed.
    #[error("Invalid message: {0}")]
    Message(#[from] MessageError),

    /// The request body could not be encoded as JSON.
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// An API key or sender id cannot be sent as a header value.
    #[error("Invalid {field}: {reason}")]
    InvalidCredential {
        /// Which credential was rejected
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}
