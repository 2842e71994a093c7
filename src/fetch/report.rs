use std::fmt;

use itertools::{Either, Itertools};

use crate::reporting::{ErrorExt, WriteExt};

use super::{FetchError, FetchJob, Result};

/// The outcome of every job of one fetch run, in the order the jobs were processed
#[derive(Debug, Default)]
pub struct FetchReport {
    outcomes: Vec<(FetchJob, Result<u64>)>,
}

impl FetchReport {
    pub(crate) fn push(&mut self, job: FetchJob, result: Result<u64>) {
        self.outcomes.push((job, result));
    }

    /// All jobs with their outcome; on success, the number of bytes written.
    pub fn outcomes(&self) -> &[(FetchJob, Result<u64>)] {
        &self.outcomes
    }

    /// The number of jobs that were run
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether no jobs were run
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Splits the jobs into successful ones with their byte counts, and failed ones with their
    /// errors.
    #[allow(clippy::type_complexity)]
    pub fn split(&self) -> (Vec<(&FetchJob, u64)>, Vec<(&FetchJob, &FetchError)>) {
        self.outcomes
            .iter()
            .partition_map(|(job, result)| match result {
                Ok(bytes) => Either::Left((job, *bytes)),
                Err(error) => Either::Right((job, error)),
            })
    }

    /// The jobs that failed
    pub fn failed(&self) -> impl Iterator<Item = (&FetchJob, &FetchError)> {
        self.outcomes
            .iter()
            .filter_map(|(job, result)| result.as_ref().err().map(|error| (job, error)))
    }
}

impl fmt::Display for FetchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;

        let (fetched, failed) = self.split();
        let mut w = f.hanging_indent("  ");
        write!(w, "fetched {} of {} assets", fetched.len(), self.len())?;
        if failed.is_empty() {
            return Ok(());
        }
        write!(w, ", {} failed:", failed.len())?;
        for (job, error) in failed {
            writeln!(w)?;
            write!(w, "[{}] {}", job.filename, error.error_chain())?;
        }
        Ok(())
    }
}
