//! Error types for the Braze API client.

use std::fmt;

use thiserror::Error;

use crate::types::ApiResponse;

/// Errors returned by the Braze client.
#[derive(Error, Debug)]
pub enum Error {
    /// A request body could not be encoded as JSON.
    #[error("failed to encode request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// An endpoint path could not be resolved against the configured base URL.
    #[error("invalid request URL: {0}")]
    RequestBuild(#[from] url::ParseError),

    /// The caller's cancellation token fired before a response was received.
    /// The request is abandoned; no classification takes place.
    #[error("request cancelled")]
    Cancelled,

    /// A network-level failure (connect, TLS, timeout) prevented a response.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response carried a body that did not match the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The API answered with an error status code.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The endpoint exists in the API but is not supported by this client.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    /// The request failed client-side validation and was never dispatched.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// A request-level failure reported by the API.
///
/// For statuses Braze documents as carrying an error body (400, 401, 403,
/// 404, 422, 429) the body is decoded into [`ApiResponse`]; for any other
/// non-success status the body is left unread and `response` is empty.
#[derive(Debug, Clone, Default)]
pub struct ApiError {
    /// HTTP status code of the response.
    pub status: u16,
    /// Decoded error envelope, when the status is documented to carry one.
    pub response: ApiResponse,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            self.status,
            self.response.message.as_deref().unwrap_or_default()
        )?;
        if !self.response.errors.is_empty() {
            write!(f, ": {:?}", self.response.errors)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
