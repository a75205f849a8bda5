use anyhow::Result;
use clap::Args;

use super::open_repo;

#[derive(Args)]
pub struct CommitArgs {
    /// Message to associate with this commit
    #[arg(short = 'm', value_name = "message")]
    message: String,
}

pub fn run(args: &CommitArgs) -> Result<()> {
    let mut repo = open_repo()?;
    let oid = vrz_repository::commit(&mut repo, &args.message)?;
    println!("{}", oid.to_hex());
    Ok(())
}
