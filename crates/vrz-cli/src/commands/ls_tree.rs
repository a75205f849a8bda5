use anyhow::{Context, Result};
use bstr::ByteSlice;
use clap::Args;
use vrz_hash::ObjectId;
use vrz_object::ObjectKind;
use vrz_odb::ObjectDatabase;

use super::open_repo;

#[derive(Args)]
pub struct LsTreeArgs {
    /// Recurse into sub-trees
    #[arg(short = 'r')]
    recursive: bool,

    /// Tree-ish to list
    tree: String,
}

pub fn run(args: &LsTreeArgs) -> Result<()> {
    let repo = open_repo()?;
    let oid = repo
        .refs()
        .find(repo.odb(), &args.tree)?
        .with_context(|| format!("not a valid object name: {}", args.tree))?;
    let tree_oid = repo
        .odb()
        .peel_to_kind(oid, ObjectKind::Tree)?
        .with_context(|| format!("{} did not resolve to a tree", args.tree))?;

    list_tree(repo.odb(), tree_oid, "", args.recursive)
}

fn list_tree(odb: &ObjectDatabase, tree_oid: ObjectId, prefix: &str, recursive: bool) -> Result<()> {
    let vrz_object::Object::Tree(tree) = odb.read(&tree_oid)? else {
        anyhow::bail!("not a tree: {}", tree_oid.to_hex());
    };

    for entry in tree.iter() {
        let name = entry.name.to_str_lossy().into_owned();
        let is_tree = entry.mode.is_tree();

        if is_tree && recursive {
            let child_prefix = if prefix.is_empty() { name } else { format!("{prefix}/{name}") };
            list_tree(odb, entry.oid, &child_prefix, recursive)?;
            continue;
        }

        let type_name = if is_tree {
            "tree"
        } else if entry.mode.is_symlink() {
            "blob"
        } else {
            match odb.read(&entry.oid)? {
                vrz_object::Object::Commit(_) => "commit",
                _ => "blob",
            }
        };

        let full_path = if prefix.is_empty() { name } else { format!("{prefix}/{name}") };
        println!("{:06o} {} {}\t{}", entry.mode.raw(), type_name, entry.oid.to_hex(), full_path);
    }
    Ok(())
}
