//! Site settings, as read by the build process from its settings file

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer};
use tokio::fs;
use toml::Table;

use crate::fetch::{DEFAULT_TIMEOUT, FetchJob};

pub use error::*;

/// The build settings. Only the content path and the `[asset_fetch]` table are interpreted; any
/// other settings belong to the site generator and are kept as they are.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    /// The directory containing the site's content. Defaults to `content`.
    #[serde(default = "default_path")]
    pub path: PathBuf,
    /// Configuration of the asset fetch plugin
    #[serde(default)]
    pub asset_fetch: AssetFetchSettings,
    /// Settings not interpreted by this crate
    #[serde(flatten)]
    pub other: Table,
}

/// Configuration of the asset fetch plugin
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AssetFetchSettings {
    /// Maps file names to the URLs they are downloaded from
    pub urls: BTreeMap<String, String>,
    /// The subdirectory of the content path the files are saved to. Defaults to `js`.
    pub directory: PathBuf,
    /// Timeout for each request, given in seconds. Defaults to 30 seconds.
    #[serde(deserialize_with = "deserialize_timeout")]
    pub timeout: Duration,
    /// Whether the destination directory is created if it doesn't exist. Defaults to `true`.
    pub create_directory: bool,
}

fn default_path() -> PathBuf {
    "content".into()
}

impl Default for AssetFetchSettings {
    fn default() -> Self {
        Self {
            urls: BTreeMap::new(),
            directory: "js".into(),
            timeout: DEFAULT_TIMEOUT,
            create_directory: true,
        }
    }
}

impl Settings {
    /// Parses the contents of a settings file.
    pub fn parse(content: &str) -> Result<Self> {
        let settings = toml::from_str(content)?;
        Ok(settings)
    }

    /// Reads and parses the given settings file.
    pub async fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = fs::read_to_string(path).await?;
        let settings = Self::parse(&settings)?;
        Ok(settings)
    }

    /// Interprets a relative content path as relative to `base`, usually the directory
    /// containing the settings file.
    pub fn rebase(&mut self, base: &Path) {
        if self.path.is_relative() {
            self.path = base.join(&self.path);
        }
    }

    /// The directory fetched assets are written to
    pub fn asset_directory(&self) -> PathBuf {
        self.asset_fetch.destination(&self.path)
    }
}

impl AssetFetchSettings {
    /// Returns the destination directory for the given content path.
    pub fn destination(&self, content: &Path) -> PathBuf {
        content.join(&self.directory)
    }

    /// Returns the configured jobs.
    pub fn jobs(&self) -> Vec<FetchJob> {
        self.urls
            .iter()
            .map(|(filename, url)| FetchJob::new(filename, url))
            .collect()
    }
}

/// Deserializes the `timeout` config: a positive number of seconds, integer or not.
fn deserialize_timeout<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    struct TimeoutVisitor;

    impl Visitor<'_> for TimeoutVisitor {
        type Value = Duration;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a positive number of seconds")
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v <= 0 {
                return Err(E::invalid_value(Unexpected::Signed(v), &self));
            }
            Ok(Duration::from_secs(v.unsigned_abs()))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v == 0 {
                return Err(E::invalid_value(Unexpected::Unsigned(v), &self));
            }
            Ok(Duration::from_secs(v))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            match Duration::try_from_secs_f64(v) {
                // values below one nanosecond round down to zero
                Ok(timeout) if !timeout.is_zero() => Ok(timeout),
                _ => Err(E::invalid_value(Unexpected::Float(v), &self)),
            }
        }
    }

    deserializer.deserialize_any(TimeoutVisitor)
}

mod error {
    use std::io;

    use thiserror::Error;

    /// Errors that can occur when reading the settings file
    #[derive(Error, Debug)]
    pub enum Error {
        /// An I/O error occurred reading the settings file
        #[error("settings file could not be read")]
        Io(#[from] io::Error),
        /// The settings file is not valid TOML or contains invalid values
        #[error("settings file contains invalid settings")]
        Invalid(#[from] toml::de::Error),
    }

    /// Result type alias that defaults error to [enum@Error].
    pub type Result<T, E = Error> = std::result::Result<T, E>;
}
