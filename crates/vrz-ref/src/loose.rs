//! Reading and writing the files that back a reference: either a 40-hex sha
//! or `ref: <target>`, one per line.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use vrz_hash::ObjectId;
use vrz_utils::LockFile;

use crate::error::RefError;

/// The parsed contents of one ref file, before any symbolic-ref following.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRef {
    Direct(ObjectId),
    Symbolic(String),
}

pub fn ref_path(git_dir: &Path, name: &str) -> PathBuf {
    git_dir.join(name)
}

pub fn read_ref_file(git_dir: &Path, name: &str) -> Result<Option<RawRef>, RefError> {
    let path = ref_path(git_dir, name);
    if !path.is_file() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&path).map_err(|e| RefError::IoPath {
        path: path.clone(),
        source: e,
    })?;
    let trimmed = contents.trim_end_matches('\n');

    if let Some(target) = trimmed.strip_prefix("ref: ") {
        Ok(Some(RawRef::Symbolic(target.trim().to_string())))
    } else {
        let oid = ObjectId::from_hex(trimmed.trim())?;
        Ok(Some(RawRef::Direct(oid)))
    }
}

/// Write `sha\n` to `name`'s file atomically via a `.lock` sibling.
pub fn write_direct_ref(git_dir: &Path, name: &str, oid: &ObjectId) -> Result<(), RefError> {
    let path = ref_path(git_dir, name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| RefError::IoPath {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    let mut lock = LockFile::acquire(&path)?;
    lock.write_all(format!("{}\n", oid.to_hex()).as_bytes())
        .map_err(|e| RefError::IoPath { path: path.clone(), source: e })?;
    lock.commit()?;
    Ok(())
}

/// Write `ref: <target>\n` to `name`'s file atomically.
pub fn write_symbolic_ref(git_dir: &Path, name: &str, target: &str) -> Result<(), RefError> {
    let path = ref_path(git_dir, name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| RefError::IoPath {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    let mut lock = LockFile::acquire(&path)?;
    lock.write_all(format!("ref: {target}\n").as_bytes())
        .map_err(|e| RefError::IoPath { path: path.clone(), source: e })?;
    lock.commit()?;
    Ok(())
}

/// Recursively enumerate loose refs under `refs/<subdir>` (or all of
/// `refs/` when `subdir` is empty), returning `(name, path)` pairs sorted
/// by file name at each directory level, matching walking order.
pub fn enumerate(dir: &Path) -> Result<Vec<(String, PathBuf)>, RefError> {
    let mut result = Vec::new();
    if !dir.is_dir() {
        return Ok(result);
    }
    let mut names: Vec<_> = fs::read_dir(dir)
        .map_err(|e| RefError::IoPath { path: dir.to_path_buf(), source: e })?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| !n.ends_with(".lock"))
        .collect();
    names.sort();

    for name in names {
        let path = dir.join(&name);
        result.push((name, path));
    }
    Ok(result)
}
