//! `checkout(name, path)`: materializes a commit or tree's contents into an
//! empty (or absent) directory. Symlink mode is unimplemented, matching
//! the documented non-goal.

use std::fs;
use std::path::Path;

use vrz_hash::ObjectId;
use vrz_object::{FileMode, Object, ObjectKind};

use crate::error::RepoError;
use crate::Repository;

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("checkout target {0} is not empty")]
    TargetNotEmpty(std::path::PathBuf),

    #[error("checkout of symlink entries is not implemented")]
    SymlinkUnimplemented,
}

pub fn checkout(repo: &mut Repository, commit_ish: &str, target: &Path) -> Result<(), RepoError> {
    let oid = repo
        .refs
        .find(&repo.odb, commit_ish)?
        .ok_or(RepoError::NotARepository)?;
    let tree_oid = repo
        .odb
        .peel_to_kind(oid, ObjectKind::Tree)?
        .ok_or(RepoError::NotARepository)?;

    if target.exists() {
        if !target.is_dir() {
            return Err(CheckoutError::TargetNotEmpty(target.to_path_buf()).into());
        }
        if fs::read_dir(target)?.next().is_some() {
            return Err(CheckoutError::TargetNotEmpty(target.to_path_buf()).into());
        }
    } else {
        fs::create_dir_all(target)?;
    }

    checkout_tree(&repo.odb, tree_oid, target)
}

fn checkout_tree(odb: &vrz_odb::ObjectDatabase, tree_oid: ObjectId, target: &Path) -> Result<(), RepoError> {
    let Object::Tree(tree) = odb.read(&tree_oid)? else {
        return Ok(());
    };
    for entry in tree.iter() {
        let name = String::from_utf8_lossy(entry.name.as_ref()).into_owned();
        let out_path = target.join(&name);
        match entry.mode {
            FileMode::Tree => {
                fs::create_dir_all(&out_path)?;
                checkout_tree(odb, entry.oid, &out_path)?;
            }
            FileMode::Symlink => {
                return Err(CheckoutError::SymlinkUnimplemented.into());
            }
            _ => {
                let Object::Blob(blob) = odb.read(&entry.oid)? else {
                    continue;
                };
                fs::write(&out_path, blob.serialize_content())?;
            }
        }
    }
    Ok(())
}

impl From<CheckoutError> for RepoError {
    fn from(e: CheckoutError) -> Self {
        RepoError::Io(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))
    }
}
