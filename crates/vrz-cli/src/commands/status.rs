use anyhow::Result;
use clap::Args;
use vrz_ref::ActiveBranch;

use super::open_repo;

#[derive(Args)]
pub struct StatusArgs {}

pub fn run(_args: &StatusArgs) -> Result<()> {
    let mut repo = open_repo()?;
    let status = vrz_repository::status(&mut repo)?;

    match &status.branch {
        Some(ActiveBranch::Branch(name)) => println!("On branch {name}."),
        _ => match repo.refs().resolve("HEAD")? {
            Some(oid) => println!("HEAD detached at {}", oid.to_hex()),
            None => println!("No commits yet."),
        },
    }

    println!("Changes to be committed.");
    for path in &status.staged_modified {
        println!("  modified: {path}");
    }
    for path in &status.staged_added {
        println!("  added:  {path}");
    }
    for path in &status.staged_deleted {
        println!("  deleted: {path}");
    }

    println!();
    println!("Changes not staged for commit:");
    for path in &status.modified {
        println!("  modified: {path}");
    }

    println!("\nUntracked Files: ");
    for path in &status.untracked {
        println!("  {path}");
    }

    Ok(())
}
