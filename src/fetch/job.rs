use std::fmt;

/// A resource that should be downloaded. Jobs are identified by their filename; when two jobs
/// share a filename, the one processed later overwrites the other's file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchJob {
    /// The file name to save to, inside the destination directory.
    pub filename: String,
    /// The URL to download from.
    pub url: String,
}

impl FetchJob {
    /// Creates a job downloading `url` to `filename`.
    pub fn new(filename: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            url: url.into(),
        }
    }
}

impl<K, V> From<(K, V)> for FetchJob
where
    K: Into<String>,
    V: Into<String>,
{
    fn from((filename, url): (K, V)) -> Self {
        Self::new(filename, url)
    }
}

impl fmt::Display for FetchJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <- {}", self.filename, self.url)
    }
}
