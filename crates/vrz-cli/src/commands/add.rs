use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::open_repo;

#[derive(Args)]
pub struct AddArgs {
    /// Files to stage
    #[arg(required = true, value_name = "path")]
    paths: Vec<PathBuf>,
}

pub fn run(args: &AddArgs) -> Result<()> {
    let mut repo = open_repo()?;
    let (index, worktree, odb) = repo.index_worktree_odb_mut()?;
    vrz_index::add(index, worktree, &args.paths, odb)?;
    repo.write_index()?;
    Ok(())
}
