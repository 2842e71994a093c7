//! The asset fetch plugin: downloads the configured assets when the build is initialized

use async_trait::async_trait;
use tokio::fs;

use crate::fetch::{self, FetchReport};
use crate::lifecycle::{Hook, Lifecycle, Signal};
use crate::reporting::ErrorExt;
use crate::settings::Settings;

/// The plugin's name, as used in logs
pub const NAME: &str = "asset-fetch";

/// The hook that downloads the assets configured in `[asset_fetch]`
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetFetch;

impl AssetFetch {
    /// Downloads all configured assets into the asset directory and returns what happened to
    /// each of them. Never fails; problems are logged.
    pub async fn fetch(&self, settings: &Settings) -> FetchReport {
        let config = &settings.asset_fetch;
        if config.urls.is_empty() {
            tracing::debug!("[{NAME}] no assets configured");
            return FetchReport::default();
        }

        let destination = settings.asset_directory();
        if config.create_directory {
            if let Err(error) = fs::create_dir_all(&destination).await {
                // the jobs will fail individually
                tracing::warn!(
                    directory = %destination.display(),
                    "[{NAME}] asset directory could not be created: {:#}",
                    error.error_chain(),
                );
            }
        }

        tracing::info!(
            directory = %destination.display(),
            "[{NAME}] fetching {} assets...",
            config.urls.len(),
        );
        let report = fetch::fetch_all_with_timeout(config.jobs(), &destination, config.timeout).await;
        tracing::info!("[{NAME}] {report}");
        report
    }
}

#[async_trait]
impl Hook for AssetFetch {
    fn name(&self) -> &str {
        NAME
    }

    async fn call(&self, signal: Signal, settings: &Settings) {
        match signal {
            Signal::Initialized => {
                self.fetch(settings).await;
            }
        }
    }
}

/// Connects the plugin to the build lifecycle.
pub fn register(lifecycle: &mut Lifecycle) {
    lifecycle.connect(Signal::Initialized, AssetFetch);
}
