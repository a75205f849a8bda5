use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::open_repo;

#[derive(Args)]
pub struct CheckoutArgs {
    /// The commit or tree to checkout
    commit: String,

    /// The empty directory to checkout into
    path: PathBuf,
}

pub fn run(args: &CheckoutArgs) -> Result<()> {
    let mut repo = open_repo()?;
    vrz_repository::checkout(&mut repo, &args.commit, &args.path)?;
    Ok(())
}
