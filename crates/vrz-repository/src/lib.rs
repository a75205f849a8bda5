//! The repository handle: wires the object database, reference store,
//! staging index, and layered config together, plus the composed
//! `commit`/`status`/`checkout`/`log` operations built on top of them.

mod checkout;
mod commit;
mod error;
mod locator;
mod log;
mod status;

use std::path::{Path, PathBuf};

use bstr::ByteSlice;
use vrz_config::ConfigSet;
use vrz_index::Index;
use vrz_odb::ObjectDatabase;
use vrz_ref::RefStore;

pub use checkout::{checkout, CheckoutError};
pub use commit::commit;
pub use error::RepoError;
pub use log::{log, log_entries, LogEntry};
pub use status::{status, Status};

pub struct Repository {
    worktree: PathBuf,
    git_dir: PathBuf,
    odb: ObjectDatabase,
    refs: RefStore,
    config: ConfigSet,
    index: Option<Index>,
}

impl Repository {
    fn from_git_dir(worktree: PathBuf, git_dir: PathBuf) -> Result<Self, RepoError> {
        let config = ConfigSet::load(&git_dir)?;
        let odb = ObjectDatabase::open(git_dir.join("objects"));
        let refs = RefStore::new(&git_dir);
        Ok(Self {
            worktree,
            git_dir,
            odb,
            refs,
            config,
            index: None,
        })
    }

    /// Walk upward from `start` until a `.vrz` directory is found.
    pub fn discover(start: impl AsRef<Path>) -> Result<Self, RepoError> {
        let worktree = locator::find(start.as_ref())?;
        let git_dir = worktree.join(".vrz");
        Self::from_git_dir(worktree, git_dir)
    }

    /// Create (or reopen, as a no-op) a repository at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, RepoError> {
        let path = path.as_ref();
        let git_dir = locator::create(path)?;
        let worktree = std::fs::canonicalize(path)?;
        Self::from_git_dir(worktree, git_dir)
    }

    pub fn worktree(&self) -> &Path {
        &self.worktree
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    pub fn odb(&self) -> &ObjectDatabase {
        &self.odb
    }

    pub fn refs(&self) -> &RefStore {
        &self.refs
    }

    pub fn config(&self) -> &ConfigSet {
        &self.config
    }

    fn index_path(&self) -> PathBuf {
        self.git_dir.join("index")
    }

    /// Access the staging index, loading it from disk on first use.
    pub fn index(&mut self) -> Result<&Index, RepoError> {
        if self.index.is_none() {
            self.load_index()?;
        }
        Ok(self.index.as_ref().unwrap())
    }

    pub fn index_mut(&mut self) -> Result<&mut Index, RepoError> {
        if self.index.is_none() {
            self.load_index()?;
        }
        Ok(self.index.as_mut().unwrap())
    }

    /// Borrow the staging index mutably alongside the worktree root and
    /// object database, for operations (add, rm) that must write blobs
    /// and update index entries together.
    pub fn index_worktree_odb_mut(
        &mut self,
    ) -> Result<(&mut Index, &Path, &ObjectDatabase), RepoError> {
        if self.index.is_none() {
            self.load_index()?;
        }
        Ok((self.index.as_mut().unwrap(), &self.worktree, &self.odb))
    }

    pub fn write_index(&self) -> Result<(), RepoError> {
        if let Some(ref index) = self.index {
            index.write_to(self.index_path())?;
        }
        Ok(())
    }

    fn load_index(&mut self) -> Result<(), RepoError> {
        let path = self.index_path();
        let index = if path.is_file() {
            Index::read_from(&path)?
        } else {
            Index::new()
        };
        self.index = Some(index);
        Ok(())
    }

    /// Build the ignore resolver from `.vrz/info/exclude`, the XDG global
    /// ignore file, and every tracked `.vrzignore` blob reachable from
    /// the current HEAD tree.
    pub fn ignore_resolver(&self) -> Result<vrz_index::IgnoreResolver, RepoError> {
        let mut resolver = vrz_index::IgnoreResolver::new();

        if let Ok(content) = std::fs::read(self.git_dir.join("info").join("exclude")) {
            resolver.add_absolute(&content);
        }

        if let Some(home) = std::env::var_os("HOME") {
            let xdg = std::env::var_os("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(&home).join(".config"));
            if let Ok(content) = std::fs::read(xdg.join("vrz").join("ignore")) {
                resolver.add_absolute(&content);
            }
        }

        if let Some(tree_oid) = self.refs.resolve("HEAD")? {
            let tree_oid = self
                .odb
                .peel_to_kind(tree_oid, vrz_object::ObjectKind::Tree)?
                .ok_or(RepoError::NotARepository)?;
            self.collect_vrzignore(tree_oid, Path::new(""), &mut resolver)?;
        }

        Ok(resolver)
    }

    fn collect_vrzignore(
        &self,
        tree_oid: vrz_hash::ObjectId,
        prefix: &Path,
        resolver: &mut vrz_index::IgnoreResolver,
    ) -> Result<(), RepoError> {
        let vrz_object::Object::Tree(tree) = self.odb.read(&tree_oid)? else {
            return Ok(());
        };
        for entry in tree.iter() {
            let name = entry.name.to_str_lossy().into_owned();
            let child_path = prefix.join(&name);
            if entry.mode.is_tree() {
                self.collect_vrzignore(entry.oid, &child_path, resolver)?;
            } else if name == ".vrzignore" {
                if let vrz_object::Object::Blob(blob) = self.odb.read(&entry.oid)? {
                    resolver.add_scoped(prefix.to_path_buf(), blob.serialize_content());
                }
            }
        }
        Ok(())
    }
}
