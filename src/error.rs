//! Error types for the driver

use thiserror::Error;

use crate::settings;

/// An error that stops the driver. Failed downloads are not errors; they are only logged.
#[derive(Error, Debug)]
pub enum Error {
    /// The settings file could not be read
    #[error("site settings could not be loaded")]
    Settings(#[from] settings::Error),
}

/// Result type alias that defaults error to [enum@Error].
pub type Result<T, E = Error> = std::result::Result<T, E>;
