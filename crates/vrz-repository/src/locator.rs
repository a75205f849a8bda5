//! Finding and creating a repository on disk: `.vrz` as the directory
//! marker, walked for upward from a starting path.

use std::fs;
use std::path::{Path, PathBuf};

use vrz_config::default_repo_config;

use crate::error::RepoError;

/// Walk upward from `start` (resolved to its real path) until a directory
/// containing `.vrz` is found.
pub fn find(start: &Path) -> Result<PathBuf, RepoError> {
    let mut current = fs::canonicalize(start).map_err(|_| RepoError::NotARepository)?;
    loop {
        if current.join(".vrz").is_dir() {
            return Ok(current);
        }
        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return Err(RepoError::NotARepository),
        }
    }
}

/// Create a new repository at `path`. A no-op success if `path/.vrz/HEAD`
/// already exists and the directory is otherwise well-formed; fails
/// `RepositoryExists` if `path` exists and is not a directory, or is a
/// non-empty directory whose `.vrz` is itself non-empty.
pub fn create(path: &Path) -> Result<PathBuf, RepoError> {
    let git_dir = path.join(".vrz");

    if path.exists() {
        if !path.is_dir() {
            return Err(RepoError::RepositoryExists(path.to_path_buf()));
        }
        if git_dir.join("HEAD").is_file() {
            return Ok(git_dir);
        }
        if git_dir.is_dir() && fs::read_dir(&git_dir)?.next().is_some() {
            return Err(RepoError::RepositoryExists(path.to_path_buf()));
        }
    } else {
        fs::create_dir_all(path)?;
    }

    fs::create_dir_all(git_dir.join("branches"))?;
    fs::create_dir_all(git_dir.join("objects"))?;
    fs::create_dir_all(git_dir.join("refs").join("tags"))?;
    fs::create_dir_all(git_dir.join("refs").join("heads"))?;
    fs::create_dir_all(git_dir.join("info"))?;

    fs::write(
        git_dir.join("description"),
        "This is an unnamed repo, edit this file 'description' to name the repo.\n",
    )?;
    fs::write(git_dir.join("HEAD"), "ref: refs/heads/master\n")?;
    fs::write(git_dir.join("config"), default_repo_config().serialize())?;

    Ok(git_dir)
}

/// Compose a path under `.vrz/`.
pub fn repo_path(git_dir: &Path, parts: &[&str]) -> PathBuf {
    let mut path = git_dir.to_path_buf();
    for part in parts {
        path.push(part);
    }
    path
}

/// Compose a directory path under `.vrz/`, creating intermediates when
/// `mkdir` is set. Returns `None` when the leaf is missing and creation
/// wasn't requested.
pub fn repo_dir(git_dir: &Path, parts: &[&str], mkdir: bool) -> Result<Option<PathBuf>, RepoError> {
    let path = repo_path(git_dir, parts);
    if path.exists() {
        if path.is_dir() {
            return Ok(Some(path));
        }
        return Err(RepoError::RepositoryExists(path));
    }
    if mkdir {
        fs::create_dir_all(&path)?;
        return Ok(Some(path));
    }
    Ok(None)
}

/// Compose a file path under `.vrz/`, creating the parent directories of
/// the final component when `mkdir` is set.
pub fn repo_file(git_dir: &Path, parts: &[&str], mkdir: bool) -> Result<Option<PathBuf>, RepoError> {
    let (last, rest) = parts.split_last().expect("repo_file needs at least one component");
    let parent_ready = rest.is_empty() || repo_dir(git_dir, rest, mkdir)?.is_some();
    if !parent_ready {
        return Ok(None);
    }
    let mut path = repo_path(git_dir, rest);
    path.push(last);
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_then_find() {
        let dir = tempfile::tempdir().unwrap();
        let git_dir = create(dir.path()).unwrap();
        assert!(git_dir.join("HEAD").is_file());
        assert_eq!(fs::read_to_string(git_dir.join("HEAD")).unwrap(), "ref: refs/heads/master\n");

        let sub = dir.path().join("a/b/c");
        fs::create_dir_all(&sub).unwrap();
        let found = find(&sub).unwrap();
        assert_eq!(fs::canonicalize(dir.path()).unwrap(), found);
    }

    #[test]
    fn create_is_noop_on_existing_repo() {
        let dir = tempfile::tempdir().unwrap();
        create(dir.path()).unwrap();
        let git_dir = create(dir.path()).unwrap();
        assert!(git_dir.join("HEAD").is_file());
    }

    #[test]
    fn create_rejects_non_empty_non_repo_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("stray.txt"), b"hi").unwrap();
        fs::create_dir_all(dir.path().join(".vrz")).unwrap();
        fs::write(dir.path().join(".vrz").join("junk"), b"x").unwrap();
        let err = create(dir.path()).unwrap_err();
        assert!(matches!(err, RepoError::RepositoryExists(_)));
    }

    #[test]
    fn find_fails_outside_any_repo() {
        let dir = tempfile::tempdir().unwrap();
        let err = find(dir.path()).unwrap_err();
        assert!(matches!(err, RepoError::NotARepository));
    }
}
