use std::fmt;
use std::io;
use std::sync::Arc;

use thiserror::Error;

/// Why a single fetch job failed
#[derive(Error, Debug)]
pub enum FetchError {
    /// The filename is not a plain name inside the destination directory
    #[error("`{0}` is not a plain file name inside the destination directory")]
    InvalidFilename(String),
    /// The HTTP client could not be set up, so no request was made
    #[error("HTTP client could not be initialized")]
    Client(#[source] Arc<reqwest::Error>),
    /// A network error: connecting, sending the request, timing out, or reading the body
    #[error("network I/O error during download")]
    Network(#[from] reqwest::Error),
    /// The server responded, but not with a success status
    #[error("server responded with status {status}")]
    Status {
        /// The status the server responded with
        status: reqwest::StatusCode,
    },
    /// An error accessing the local file for the resource
    #[error("file I/O error during download")]
    File(#[from] io::Error),
}

/// The coarse category of a [FetchError], as reported in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The resource could not be retrieved
    Network,
    /// The resource could not be written
    Filesystem,
    /// Anything else
    Other,
}

impl FetchError {
    /// Returns the category of this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Network(_) | Self::Status { .. } => FailureKind::Network,
            Self::File(_) => FailureKind::Filesystem,
            Self::InvalidFilename(_) | Self::Client(_) => FailureKind::Other,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Network => "network",
            Self::Filesystem => "filesystem",
            Self::Other => "other",
        };
        f.write_str(kind)
    }
}

/// Result type alias that defaults error to [FetchError].
pub type Result<T, E = FetchError> = std::result::Result<T, E>;
