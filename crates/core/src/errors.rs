//! Core error types for the Finfolio application.
//!
//! This module defines transport-agnostic error types. HTTP-specific
//! failures (from reqwest, status codes, etc.) are converted to these
//! types by the connect layer.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the portfolio client.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to fetch holdings: {0}")]
    Fetch(#[from] FetchError),

    #[error("Upload failed: {0}")]
    Upload(#[from] UploadError),

    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("Session store error: {0}")]
    Session(String),

    #[error("Invalid configuration value: {0}")]
    Config(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Errors raised while retrieving holdings from the backend.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("server returned {status}: {detail}")]
    Status { status: u16, detail: String },

    /// The response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Errors raised while uploading a holdings spreadsheet.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("only .xlsx files are supported, got '{0}'")]
    UnsupportedFile(String),

    #[error("failed to read '{file}': {detail}")]
    Read { file: String, detail: String },

    #[error("{0}")]
    Rejected(String),

    #[error("request failed: {0}")]
    Transport(String),
}

/// Errors raised during the credential exchange.
///
/// These never cross the client boundary as `Err`: login and register
/// collapse them into a boolean outcome after logging the cause.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("rejected by server: {0}")]
    Rejected(String),

    #[error("failed to decode token response: {0}")]
    Decode(String),
}
