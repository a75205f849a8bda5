use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;
use vrz_object::ObjectKind;

use super::open_repo;

#[derive(Args)]
pub struct CatFileArgs {
    /// Specify the type
    #[arg(value_name = "type")]
    kind: ObjectKind,

    /// The object to display
    object: String,
}

pub fn run(args: &CatFileArgs) -> Result<()> {
    let repo = open_repo()?;
    let oid = repo
        .refs()
        .find(repo.odb(), &args.object)?
        .with_context(|| format!("not a valid object name: {}", args.object))?;
    let resolved = repo
        .odb()
        .peel_to_kind(oid, args.kind)?
        .with_context(|| format!("{} is not a {}", args.object, args.kind))?;

    let object = repo.odb().read(&resolved)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    out.write_all(&object.serialize_content())?;
    Ok(())
}
