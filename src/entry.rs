//! Contains the executable's entry point

use std::path::Path;

use clap::Parser;

use crate::args::CliArguments;
use crate::error::Result;
use crate::lifecycle::{Lifecycle, Signal};
use crate::logging;
use crate::plugin;
use crate::settings::Settings;

/// Entry point; sets up logging, reads the command line arguments and runs the build lifecycle.
#[tokio::main]
pub async fn main() -> Result<()> {
    logging::init_logging();
    let args = CliArguments::parse();
    run(&args).await
}

/// Loads the settings, registers the plugin and signals that the build was initialized.
pub async fn run(args: &CliArguments) -> Result<()> {
    let settings = load_settings(args).await?;

    let mut lifecycle = Lifecycle::new();
    plugin::register(&mut lifecycle);

    lifecycle.send(Signal::Initialized, &settings).await;
    Ok(())
}

/// Reads the settings file named in the arguments and applies the overrides given there.
pub async fn load_settings(args: &CliArguments) -> Result<Settings> {
    let mut settings = Settings::read(&args.settings).await?;
    if let Some(path) = &args.path {
        settings.path = path.clone();
    } else {
        let base = args.settings.parent().unwrap_or(Path::new(""));
        settings.rebase(base);
    }
    tracing::debug!(
        settings = %args.settings.display(),
        path = %settings.path.display(),
        "site settings loaded"
    );
    Ok(settings)
}
