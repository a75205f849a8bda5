use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::open_repo;

#[derive(Args)]
pub struct CheckIgnoreArgs {
    /// Paths to check against ignore rules
    #[arg(required = true, value_name = "path")]
    paths: Vec<PathBuf>,
}

pub fn run(args: &CheckIgnoreArgs) -> Result<()> {
    let repo = open_repo()?;
    let resolver = repo.ignore_resolver()?;
    for path in &args.paths {
        if resolver.is_ignored(path)? {
            println!("{}", path.display());
        }
    }
    Ok(())
}
