//! Error types for HTTP transport operations.

use thiserror::Error;

/// Error type for HTTP transport operations.
///
/// The dispatcher never interprets or retries these; they reach the caller
/// as-is inside [`crate::fcm::FcmError::Http`].
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// TLS failures and errors while reading the response body.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built from the given URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The server answered with a non-2xx status.
    ///
    /// Only produced by [`crate::transport::HttpResponse::error_for_status`];
    /// transports themselves return such responses as `Ok`.
    #[error("Server returned {status}")]
    Status {
        /// HTTP status code of the response
        status: http::StatusCode,
        /// Response body, if it was valid UTF-8
        body: Option<String>,
    },
}
