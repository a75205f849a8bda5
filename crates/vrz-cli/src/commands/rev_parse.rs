use anyhow::{Context, Result};
use clap::Args;
use vrz_object::ObjectKind;

use super::open_repo;

#[derive(Args)]
pub struct RevParseArgs {
    /// Specify the expected type
    #[arg(long = "type", value_name = "type")]
    kind: Option<ObjectKind>,

    /// The name to parse
    name: String,
}

pub fn run(args: &RevParseArgs) -> Result<()> {
    let repo = open_repo()?;
    let oid = repo
        .refs()
        .find(repo.odb(), &args.name)?
        .with_context(|| format!("no such reference: {}", args.name))?;

    let resolved = match args.kind {
        Some(kind) => repo
            .odb()
            .peel_to_kind(oid, kind)?
            .with_context(|| format!("{} is not a {}", args.name, kind))?,
        None => oid,
    };

    println!("{}", resolved.to_hex());
    Ok(())
}
