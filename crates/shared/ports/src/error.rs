use thiserror::Error;

/// Failure reported by an exchange integration
///
/// The gateway treats these as opaque: it neither retries nor reinterprets
/// them, it hands them back to its caller unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Malformed response: {0}")]
    Parse(String),

    #[error("Request rejected by exchange: {0}")]
    Rejected(String),

    #[error("Operation not supported: {0}")]
    NotSupported(String),

    #[error("Exchange error: {0}")]
    Other(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
