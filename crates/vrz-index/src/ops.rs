//! Composed index mutations: `rm`, `add`, `tree_from_index`.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use bstr::{BString, ByteSlice};
use vrz_object::{FileMode, Tree, TreeEntry};
use vrz_odb::ObjectDatabase;

use crate::entry::{IndexEntry, StatData};
use crate::{Index, IndexError};

/// Resolve `path` to a worktree-relative, `/`-separated path. Rejects paths
/// that escape `worktree` (lexically; no filesystem access).
fn worktree_relative(worktree: &Path, path: &Path) -> Result<BString, IndexError> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        worktree.join(path)
    };

    let mut stack: Vec<std::ffi::OsString> = Vec::new();
    for component in joined.components() {
        match component {
            Component::Normal(part) => stack.push(part.to_os_string()),
            Component::ParentDir => {
                if stack.pop().is_none() {
                    return Err(IndexError::OutsideWorktree(path.to_path_buf()));
                }
            }
            Component::CurDir => {}
            Component::RootDir | Component::Prefix(_) => stack.clear(),
        }
    }
    let worktree_stack: Vec<_> = worktree
        .components()
        .filter_map(|c| match c {
            Component::Normal(p) => Some(p.to_os_string()),
            _ => None,
        })
        .collect();

    if stack.len() < worktree_stack.len() || stack[..worktree_stack.len()] != worktree_stack[..] {
        return Err(IndexError::OutsideWorktree(path.to_path_buf()));
    }

    let rel: Vec<_> = stack[worktree_stack.len()..]
        .iter()
        .map(|s| s.to_string_lossy().into_owned())
        .collect();
    Ok(BString::from(rel.join("/")))
}

/// Partition index entries into kept vs. removed; optionally unlink removed
/// files. Fails `PathNotInIndex` if an input path matches nothing and
/// `skip_missing` is false.
pub fn rm(
    index: &mut Index,
    worktree: &Path,
    paths: &[PathBuf],
    delete_from_disk: bool,
    skip_missing: bool,
) -> Result<(), IndexError> {
    let mut targets = Vec::with_capacity(paths.len());
    for path in paths {
        targets.push(worktree_relative(worktree, path)?);
    }

    let mut remaining = targets.clone();
    let mut removed = Vec::new();
    let mut kept = Vec::new();

    for entry in index.entries.drain(..) {
        if let Some(pos) = remaining.iter().position(|t| t == &entry.path) {
            remaining.remove(pos);
            removed.push(entry);
        } else {
            kept.push(entry);
        }
    }

    if !remaining.is_empty() && !skip_missing {
        return Err(IndexError::PathNotInIndex(PathBuf::from(
            remaining[0].to_str_lossy().into_owned(),
        )));
    }

    if delete_from_disk {
        for entry in &removed {
            let full = worktree.join(entry.path.to_str_lossy().as_ref());
            let _ = std::fs::remove_file(full);
        }
    }

    index.entries = kept;
    Ok(())
}

/// Stage fresh entries for `paths`, de-duplicating any existing entry for
/// the same path first.
pub fn add(
    index: &mut Index,
    worktree: &Path,
    paths: &[PathBuf],
    odb: &ObjectDatabase,
) -> Result<(), IndexError> {
    rm(index, worktree, paths, false, true)?;

    for path in paths {
        let rel = worktree_relative(worktree, path)?;
        let full = worktree.join(rel.to_str_lossy().as_ref());

        let content = std::fs::read(&full)?;
        let oid = odb.hash(vrz_object::ObjectKind::Blob, &content, true)?;

        let meta = std::fs::metadata(&full)?;
        let stat = StatData::from_metadata(&meta);

        let entry = IndexEntry {
            path: rel,
            oid,
            mode: FileMode::Regular,
            stage: 0,
            stat,
            assume_valid: false,
        };
        index.entries.push(entry);
    }

    index.entries.sort_by(crate::entry::cmp_entries);
    Ok(())
}

/// Build the tree hierarchy implied by the (stage-0) index entries and
/// return the root tree's sha.
pub fn tree_from_index(index: &Index, odb: &ObjectDatabase) -> Result<vrz_hash::ObjectId, IndexError> {
    let mut by_dir: BTreeMap<BString, Vec<Leaf>> = BTreeMap::new();
    by_dir.entry(BString::from("")).or_default();

    for entry in index.iter_stage0() {
        let dirname = dirname_of(&entry.path);
        let mut key = dirname.clone();
        while !key.is_empty() {
            by_dir.entry(key.clone()).or_default();
            key = dirname_of(&key);
        }
        by_dir
            .entry(dirname)
            .or_default()
            .push(Leaf::File(entry.clone()));
    }

    let mut dir_paths: Vec<BString> = by_dir.keys().cloned().collect();
    dir_paths.sort_by_key(|p| std::cmp::Reverse(p.len()));

    let mut root = None;

    for dir in dir_paths {
        let leaves = by_dir.get(&dir).cloned().unwrap_or_default();
        let mut tree = Tree::new();
        for leaf in &leaves {
            match leaf {
                Leaf::File(entry) => {
                    tree.entries.push(TreeEntry {
                        mode: entry.mode,
                        name: basename_of(&entry.path),
                        oid: entry.oid,
                    });
                }
                Leaf::Dir(name, oid) => {
                    tree.entries.push(TreeEntry {
                        mode: FileMode::Tree,
                        name: name.clone(),
                        oid: *oid,
                    });
                }
            }
        }
        tree.sort();
        let tree_oid = odb.hash(vrz_object::ObjectKind::Tree, &tree.serialize_content(), true)?;
        root = Some(tree_oid);

        let parent = dirname_of(&dir);
        let base = basename_of(&dir);
        if !dir.is_empty() {
            by_dir.entry(parent).or_default().push(Leaf::Dir(base, tree_oid));
        }
    }

    // `by_dir` always contains the root ("") key, so the loop always runs
    // at least once and sets `root`.
    Ok(root.expect("root directory always present in by_dir"))
}

#[derive(Clone)]
enum Leaf {
    File(IndexEntry),
    Dir(BString, vrz_hash::ObjectId),
}

fn dirname_of(path: &BString) -> BString {
    match path.rfind_byte(b'/') {
        Some(pos) => BString::from(&path[..pos]),
        None => BString::from(""),
    }
}

fn basename_of(path: &BString) -> BString {
    match path.rfind_byte(b'/') {
        Some(pos) => BString::from(&path[pos + 1..]),
        None => path.clone(),
    }
}
