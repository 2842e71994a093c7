#![warn(missing_docs)]
//! Downloads the remote assets configured for a site into its content directory.

use anyhow::Result;

fn main() -> Result<()> {
    asset_fetch::entry::main()?;
    Ok(())
}
