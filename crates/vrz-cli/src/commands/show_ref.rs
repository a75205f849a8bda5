use anyhow::Result;
use clap::Args;
use vrz_ref::RefNode;

use super::open_repo;

#[derive(Args)]
pub struct ShowRefArgs {}

pub fn run(_args: &ShowRefArgs) -> Result<()> {
    let repo = open_repo()?;
    let refs = repo.refs().list(None)?;
    print_refs(&refs, true, "refs");
    Ok(())
}

/// Recursively print a ref tree, matching the reference `show_ref` helper:
/// `{sha} {prefix}/{name}` per leaf, or just `{prefix}/{name}` when
/// `with_hash` is false.
pub fn print_refs(tree: &std::collections::BTreeMap<String, RefNode>, with_hash: bool, prefix: &str) {
    for (name, node) in tree {
        match node {
            RefNode::Leaf(sha) => {
                let path = if prefix.is_empty() { name.clone() } else { format!("{prefix}/{name}") };
                if with_hash {
                    println!("{sha} {path}");
                } else {
                    println!("{path}");
                }
            }
            RefNode::Branch(children) => {
                let child_prefix = if prefix.is_empty() { name.clone() } else { format!("{prefix}/{name}") };
                print_refs(children, with_hash, &child_prefix);
            }
        }
    }
}
