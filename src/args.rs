//! Command line arguments of the driver

use std::path::PathBuf;

use clap::Parser;

/// Runs the asset fetch plugin the way a site build would before generating content
#[derive(Debug, Clone, Parser)]
#[command(version)]
pub struct CliArguments {
    /// Path to the site settings file. Relative content paths in it are resolved relative to the
    /// file's directory.
    #[clap(value_name = "SETTINGS", env = "ASSET_FETCH_SETTINGS", default_value = "site.toml")]
    pub settings: PathBuf,

    /// Overrides the content path configured in the settings file
    #[clap(long, value_name = "DIR", env = "ASSET_FETCH_PATH")]
    pub path: Option<PathBuf>,
}
