use anyhow::{Context, Result};
use clap::Args;

use super::open_repo;

#[derive(Args)]
pub struct LogArgs {
    /// Commit to start at
    #[arg(default_value = "HEAD")]
    commit: String,
}

pub fn run(args: &LogArgs) -> Result<()> {
    let repo = open_repo()?;
    let start = repo
        .refs()
        .find(repo.odb(), &args.commit)?
        .with_context(|| format!("no such commit: {}", args.commit))?;

    println!("digraph verizonlog{{");
    println!("  node[shape=rect]");
    for line in vrz_repository::log(repo.odb(), start)? {
        println!("{line}");
    }
    println!("}}");
    Ok(())
}
