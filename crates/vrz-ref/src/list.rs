//! `list`: a recursive, name-sorted snapshot of `refs/`.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::RefError;
use crate::loose;
use crate::RefStore;

/// A node in the ref tree: either a resolved sha or a sorted sub-mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefNode {
    Leaf(String),
    Branch(BTreeMap<String, RefNode>),
}

impl RefStore {
    /// Recursively enumerate refs under `refs/<root>` (or all of `refs/`
    /// when `root` is `None`), following symbolic refs down to their sha.
    pub fn list(&self, root: Option<&str>) -> Result<BTreeMap<String, RefNode>, RefError> {
        let base = match root {
            Some(r) => self.git_dir.join("refs").join(r),
            None => self.git_dir.join("refs"),
        };
        list_dir(self, &base)
    }
}

fn list_dir(store: &RefStore, dir: &Path) -> Result<BTreeMap<String, RefNode>, RefError> {
    let mut out = BTreeMap::new();
    for (name, path) in loose::enumerate(dir)? {
        if path.is_dir() {
            out.insert(name, RefNode::Branch(list_dir(store, &path)?));
        } else {
            let refname = path
                .strip_prefix(&store.git_dir)
                .unwrap_or(&path)
                .to_string_lossy()
                .replace('\\', "/");
            if let Some(sha) = store.resolve(&refname)? {
                out.insert(name, RefNode::Leaf(sha.to_hex()));
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vrz_hash::ObjectId;

    #[test]
    fn list_sorts_by_name_at_each_level() {
        let dir = tempfile::tempdir().unwrap();
        let store = RefStore::new(dir.path());
        let oid = ObjectId::from_hex("da39a3ee5e6b4b0d3255bfef95601890afd80709").unwrap();
        store.create_direct("refs/heads/zeta", &oid).unwrap();
        store.create_direct("refs/heads/alpha", &oid).unwrap();
        store.create_direct("refs/tags/v1.0", &oid).unwrap();

        let tree = store.list(None).unwrap();
        let heads = match tree.get("heads").unwrap() {
            RefNode::Branch(b) => b,
            RefNode::Leaf(_) => panic!("expected branch"),
        };
        let names: Vec<_> = heads.keys().collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
        assert!(tree.contains_key("tags"));
    }
}
