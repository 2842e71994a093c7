#![cfg_attr(not(feature = "test"), warn(missing_docs))]
//! A site build plugin that downloads remote script assets into the content directory before the
//! build generates any content.

pub mod args;
pub mod entry;
pub mod error;
pub mod fetch;
pub mod lifecycle;
pub mod logging;
pub mod plugin;
mod reporting;
pub mod settings;

pub use fetch::{FetchError, FetchJob, FetchReport, Fetcher, fetch_all};

#[cfg(feature = "test")]
pub use test_utils::*;

#[cfg(feature = "test")]
mod test_utils {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing::subscriber::DefaultGuard;
    use tracing_subscriber::fmt::MakeWriter;

    /// A log sink that keeps everything written to it in memory. Can be installed as the
    /// thread-local `tracing` subscriber's writer to make assertions about log output.
    #[derive(Debug, Clone, Default)]
    pub struct VecLog(Arc<Mutex<Vec<u8>>>);

    impl VecLog {
        /// Creates an empty log
        pub fn new() -> Self {
            Self::default()
        }

        /// Installs a plain-text subscriber writing into this log for the current thread, until
        /// the returned guard is dropped.
        pub fn capture(&self) -> DefaultGuard {
            let subscriber = tracing_subscriber::fmt()
                .with_writer(self.clone())
                .with_max_level(tracing::Level::DEBUG)
                .with_ansi(false)
                .without_time()
                .with_target(false)
                .finish();
            tracing::subscriber::set_default(subscriber)
        }

        /// Returns the log's content, replacing invalid UTF-8
        pub fn get_lossy(&self) -> String {
            let buf = self.0.lock().expect("log mutex poisoned");
            String::from_utf8_lossy(&buf).into_owned()
        }

        /// Returns the lines that were logged at warning level
        pub fn warnings(&self) -> Vec<String> {
            self.get_lossy()
                .lines()
                .filter(|line| line.trim_start().starts_with("WARN"))
                .map(str::to_owned)
                .collect()
        }
    }

    impl io::Write for VecLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let mut inner = self.0.lock().expect("log mutex poisoned");
            inner.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for VecLog {
        type Writer = VecLog;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }
}
