//! The asset fetcher: downloads a set of remote resources into a local directory

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use derive_more::Debug;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::reporting::ErrorExt;

mod error;
mod job;
mod report;

pub use error::*;
pub use job::FetchJob;
pub use report::FetchReport;

/// Request timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Size of the pieces in which response bodies are written to disk
pub const CHUNK_SIZE: usize = 1024;

/// Downloads fetch jobs one after the other. A failing job is logged and recorded in the returned
/// [FetchReport]; it never stops the remaining jobs from running.
#[derive(Debug, Clone)]
pub struct Fetcher {
    #[debug(skip)]
    client: reqwest::Client,
    chunk_size: usize,
}

impl Fetcher {
    /// Creates a fetcher with the [DEFAULT_TIMEOUT].
    pub fn new() -> reqwest::Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a fetcher whose requests give up after the given timeout.
    pub fn with_timeout(timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::from_client(client))
    }

    /// Creates a fetcher using an already configured client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self {
            client,
            chunk_size: CHUNK_SIZE,
        }
    }

    /// Runs all jobs sequentially, writing into `destination`.
    pub async fn fetch_all<I, J>(&self, jobs: I, destination: &Path) -> FetchReport
    where
        I: IntoIterator<Item = J>,
        J: Into<FetchJob>,
    {
        let mut report = FetchReport::default();
        for job in jobs {
            let job = job.into();
            let result = self.fetch_one(&job, destination).await;
            match &result {
                Ok(bytes) => {
                    tracing::debug!(
                        filename = %job.filename,
                        url = %job.url,
                        bytes,
                        "asset fetched"
                    );
                }
                Err(error) => warn_failed(&job, error),
            }
            report.push(job, result);
        }
        report
    }

    /// Runs a single job and returns the number of bytes written. No file is created unless the
    /// server answered with a success status; a failure while streaming the body leaves what was
    /// received so far on disk.
    pub async fn fetch_one(&self, job: &FetchJob, destination: &Path) -> Result<u64> {
        let path = resolve(destination, &job.filename)?;

        let mut response = self.client.get(&job.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status });
        }

        let mut file = fs::File::create(&path).await?;
        let mut written = 0;
        while let Some(chunk) = response.chunk().await? {
            for piece in chunk.chunks(self.chunk_size) {
                file.write_all(piece).await?;
                file.flush().await?;
                written += piece.len() as u64;
            }
        }
        Ok(written)
    }
}

/// Downloads every `(filename, url)` job into `destination`. Failures are logged as warnings, one
/// per failed job, and otherwise ignored; this function is safe to call even when none of the
/// resources are reachable.
pub async fn fetch_all<I, J>(jobs: I, destination: &Path)
where
    I: IntoIterator<Item = J>,
    J: Into<FetchJob>,
{
    fetch_all_with_timeout(jobs, destination, DEFAULT_TIMEOUT).await;
}

/// Like [fetch_all], with an explicit request timeout, returning the outcome of each job.
pub async fn fetch_all_with_timeout<I, J>(
    jobs: I,
    destination: &Path,
    timeout: Duration,
) -> FetchReport
where
    I: IntoIterator<Item = J>,
    J: Into<FetchJob>,
{
    match Fetcher::with_timeout(timeout) {
        Ok(fetcher) => fetcher.fetch_all(jobs, destination).await,
        Err(error) => {
            // without a client, every job fails the same way
            let error = Arc::new(error);
            let mut report = FetchReport::default();
            for job in jobs {
                let job = job.into();
                let error = FetchError::Client(Arc::clone(&error));
                warn_failed(&job, &error);
                report.push(job, Err(error));
            }
            report
        }
    }
}

/// Joins the filename onto the destination directory. The filename must be a single plain
/// component so that the result stays inside the directory.
fn resolve(destination: &Path, filename: &str) -> Result<PathBuf> {
    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) => Ok(destination.join(name)),
        _ => Err(FetchError::InvalidFilename(filename.to_string())),
    }
}

fn warn_failed(job: &FetchJob, error: &FetchError) {
    tracing::warn!(
        filename = %job.filename,
        url = %job.url,
        kind = %error.kind(),
        "fetching asset failed: {:#}",
        error.error_chain(),
    );
}
