//! `status`: branch/detached indicator, staged changes against `HEAD`,
//! worktree changes against the index, and untracked files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use bstr::ByteSlice;
use vrz_hash::ObjectId;
use vrz_object::{Object, ObjectKind};
use vrz_odb::ObjectDatabase;
use vrz_ref::ActiveBranch;

use crate::error::RepoError;
use crate::Repository;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    pub branch: Option<ActiveBranch>,
    /// In the index but not in `HEAD`.
    pub staged_added: Vec<String>,
    /// In both, but the blob sha differs.
    pub staged_modified: Vec<String>,
    /// In `HEAD` but not in the index.
    pub staged_deleted: Vec<String>,
    /// Worktree content differs from what the index records.
    pub modified: Vec<String>,
    /// On disk, not ignored, not tracked.
    pub untracked: Vec<String>,
}

pub fn status(repo: &mut Repository) -> Result<Status, RepoError> {
    let branch = repo.refs.branch_get_active().ok();

    let head_tree: BTreeMap<String, ObjectId> = match repo.refs.resolve("HEAD")? {
        Some(commit_oid) => {
            let mut map = BTreeMap::new();
            if let Some(tree_oid) = repo.odb.peel_to_kind(commit_oid, ObjectKind::Tree)? {
                flatten_tree(&repo.odb, tree_oid, "", &mut map)?;
            }
            map
        }
        None => BTreeMap::new(),
    };

    if repo.index.is_none() {
        repo.load_index()?;
    }
    let index = repo.index.as_ref().unwrap();

    let mut staged_added = Vec::new();
    let mut staged_modified = Vec::new();
    let mut modified = Vec::new();

    let mut index_paths: Vec<String> = Vec::new();
    for entry in index.iter_stage0() {
        let path = entry.path.to_str_lossy().into_owned();
        index_paths.push(path.clone());

        match head_tree.get(&path) {
            Some(head_oid) if *head_oid != entry.oid => staged_modified.push(path.clone()),
            None => staged_added.push(path.clone()),
            _ => {}
        }

        let full = repo.worktree.join(&path);
        if let Ok(meta) = std::fs::metadata(&full) {
            if !entry.stat.matches(&meta) {
                let content = std::fs::read(&full)?;
                let actual = repo.odb.hash(ObjectKind::Blob, &content, false)?;
                if actual != entry.oid {
                    modified.push(path);
                }
            }
        } else {
            modified.push(path);
        }
    }

    let staged_deleted: Vec<String> = head_tree
        .keys()
        .filter(|p| !index_paths.contains(p))
        .cloned()
        .collect();

    let resolver = repo.ignore_resolver()?;
    let mut on_disk = Vec::new();
    walk_worktree(&repo.worktree, Path::new(""), &mut on_disk)?;
    let untracked: Vec<String> = on_disk
        .into_iter()
        .filter(|p| !index_paths.contains(p))
        .filter(|p| !resolver.is_ignored(Path::new(p)).unwrap_or(false))
        .collect();

    Ok(Status {
        branch,
        staged_added,
        staged_modified,
        staged_deleted,
        modified,
        untracked,
    })
}

fn flatten_tree(
    odb: &ObjectDatabase,
    tree_oid: ObjectId,
    prefix: &str,
    out: &mut BTreeMap<String, ObjectId>,
) -> Result<(), RepoError> {
    let Object::Tree(tree) = odb.read(&tree_oid)? else {
        return Ok(());
    };
    for entry in tree.iter() {
        let name = entry.name.to_str_lossy().into_owned();
        let path = if prefix.is_empty() { name } else { format!("{prefix}/{name}") };
        if entry.mode.is_tree() {
            flatten_tree(odb, entry.oid, &path, out)?;
        } else {
            out.insert(path, entry.oid);
        }
    }
    Ok(())
}

/// Enumerate worktree-relative file paths under `root`, skipping `.vrz`.
fn walk_worktree(worktree: &Path, rel: &Path, out: &mut Vec<String>) -> Result<(), RepoError> {
    let dir = worktree.join(rel);
    let mut names: Vec<_> = std::fs::read_dir(&dir)?
        .filter_map(|e| e.ok())
        .collect();
    names.sort_by_key(|e| e.file_name());

    for entry in names {
        let file_name = entry.file_name();
        if file_name == ".vrz" && rel.as_os_str().is_empty() {
            continue;
        }
        let child_rel = rel.join(&file_name);
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            walk_worktree(worktree, &child_rel, out)?;
        } else if file_type.is_file() {
            out.push(child_rel.to_string_lossy().replace('\\', "/"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn untracked_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = Repository::create(dir.path()).unwrap();
        fs::write(dir.path().join("new.txt"), b"content").unwrap();

        let st = status(&mut repo).unwrap();
        assert_eq!(st.untracked, vec!["new.txt".to_string()]);
        assert!(st.staged_added.is_empty());
    }

    #[test]
    fn staged_file_is_added_not_untracked() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = Repository::create(dir.path()).unwrap();
        fs::write(dir.path().join("new.txt"), b"content").unwrap();

        if repo.index.is_none() {
            repo.load_index().unwrap();
        }
        vrz_index::add(
            repo.index.as_mut().unwrap(),
            &repo.worktree,
            &[dir.path().join("new.txt")],
            &repo.odb,
        )
        .unwrap();
        repo.write_index().unwrap();

        let st = status(&mut repo).unwrap();
        assert_eq!(st.staged_added, vec!["new.txt".to_string()]);
        assert!(st.untracked.is_empty());
    }

    #[test]
    fn mtime_touch_without_content_change_is_not_modified() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = Repository::create(dir.path()).unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, b"same content").unwrap();

        if repo.index.is_none() {
            repo.load_index().unwrap();
        }
        vrz_index::add(repo.index.as_mut().unwrap(), &repo.worktree, &[file.clone()], &repo.odb).unwrap();
        repo.write_index().unwrap();

        // Rewrite identical bytes: on most filesystems this bumps mtime
        // but the content (and thus its sha) is unchanged.
        fs::write(&file, b"same content").unwrap();

        let st = status(&mut repo).unwrap();
        assert!(st.modified.is_empty());
    }
}
