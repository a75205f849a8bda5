use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct InitArgs {
    /// Where to create the repository
    #[arg(value_name = "directory", default_value = ".")]
    path: PathBuf,
}

pub fn run(args: &InitArgs) -> Result<()> {
    vrz_repository::Repository::create(&args.path)?;
    Ok(())
}
