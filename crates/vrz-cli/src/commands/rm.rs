use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::open_repo;

#[derive(Args)]
pub struct RmArgs {
    /// Files to remove
    #[arg(required = true, value_name = "path")]
    paths: Vec<PathBuf>,
}

pub fn run(args: &RmArgs) -> Result<()> {
    let mut repo = open_repo()?;
    let (index, worktree, _odb) = repo.index_worktree_odb_mut()?;
    vrz_index::rm(index, worktree, &args.paths, true, false)?;
    repo.write_index()?;
    Ok(())
}
