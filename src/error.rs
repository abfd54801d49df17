//! Error types for the arxiu library.

use std::io;
use thiserror::Error;

/// Result type alias for arxiu operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while composing, uploading or indexing documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (stream compression).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Caller supplied input that cannot be processed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The file name does not carry a `.pdf` extension.
    #[error("Not a PDF file: {0}")]
    NotPdf(String),

    /// The document exceeds the upload size limit.
    #[error("File is {size} bytes, the limit is {limit} bytes")]
    FileTooLarge {
        /// Decoded size in bytes
        size: usize,
        /// Maximum allowed size in bytes
        limit: usize,
    },

    /// A path was not found in the content store.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A write was rejected because its revision token is stale.
    #[error("Revision conflict on {0}")]
    Conflict(String),

    /// The remote proxy or store answered with an error status.
    #[error("Remote error ({status}): {message}")]
    Remote {
        /// HTTP-style status code
        status: u16,
        /// Message reported by the remote side
        message: String,
    },

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base64 payload could not be decoded.
    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Transport-level HTTP failure.
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upload was abandoned before it finished.
    #[error("Upload abandoned")]
    Abandoned,

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// HTTP-style status code used when reporting this error over the proxy.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::InvalidInput(_) | Error::NotPdf(_) | Error::FileTooLarge { .. } => 400,
            Error::Json(_) | Error::Base64(_) => 400,
            Error::NotFound(_) => 404,
            Error::Conflict(_) => 409,
            Error::Remote { status, .. } => *status,
            _ => 500,
        }
    }
}
