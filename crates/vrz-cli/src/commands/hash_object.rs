use anyhow::Result;
use clap::Args;
use vrz_hash::{hasher::Hasher, ObjectId};
use vrz_object::{header, ObjectKind};

use super::open_repo;

#[derive(Args)]
pub struct HashObjectArgs {
    /// Specify the type
    #[arg(short = 't', default_value = "blob")]
    obj_type: ObjectKind,

    /// Actually write the object into the database
    #[arg(short = 'w')]
    write: bool,

    /// Read object from file
    path: std::path::PathBuf,
}

pub fn run(args: &HashObjectArgs) -> Result<()> {
    let content = std::fs::read(&args.path)?;
    let oid = hash(&content, args.obj_type, args.write)?;
    println!("{}", oid.to_hex());
    Ok(())
}

fn hash(content: &[u8], kind: ObjectKind, write: bool) -> Result<ObjectId> {
    if write {
        let repo = open_repo()?;
        Ok(repo.odb().hash(kind, content, true)?)
    } else {
        let hdr = header::write_header(kind, content.len());
        let mut hasher = Hasher::new();
        hasher.update(&hdr);
        hasher.update(content);
        Ok(hasher.finalize())
    }
}
