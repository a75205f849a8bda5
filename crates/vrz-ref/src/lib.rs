//! The reference store: `HEAD`, `refs/heads/*`, `refs/tags/*`. Loose files
//! only, resolved/listed/created imperatively — no transactional batching,
//! reflog, or packed-refs, none of which the store needs here.

mod error;
mod list;
mod loose;
mod name;
mod tag;

use std::path::{Path, PathBuf};

use vrz_hash::ObjectId;

pub use error::RefError;
pub use list::RefNode;
pub use loose::RawRef;
pub use tag::TagSpec;

/// A single ref read one level deep: either a direct sha or a symbolic
/// pointer at another ref name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    Direct(ObjectId),
    Symbolic(String),
}

/// Cap on symbolic-ref recursion depth. Real cycles are not expected; this
/// exists purely to turn a misconfigured or maliciously looping ref chain
/// into an error instead of a stack overflow.
const MAX_RESOLVE_DEPTH: usize = 16;

/// Whether `HEAD` points at a branch or is detached onto a raw commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveBranch {
    Branch(String),
    Detached,
}

pub struct RefStore {
    git_dir: PathBuf,
}

impl RefStore {
    pub fn new(git_dir: impl Into<PathBuf>) -> Self {
        Self { git_dir: git_dir.into() }
    }

    /// Read `name` one level deep, without following a symbolic target.
    pub fn read(&self, name: &str) -> Result<Option<Reference>, RefError> {
        Ok(loose::read_ref_file(&self.git_dir, name)?.map(|raw| match raw {
            RawRef::Direct(oid) => Reference::Direct(oid),
            RawRef::Symbolic(target) => Reference::Symbolic(target),
        }))
    }

    /// Resolve `name` to a sha, following `ref: ` chains. Returns `None`
    /// if the ref doesn't exist anywhere along the chain.
    pub fn resolve(&self, name: &str) -> Result<Option<ObjectId>, RefError> {
        let mut current = name.to_string();
        for _ in 0..MAX_RESOLVE_DEPTH {
            match loose::read_ref_file(&self.git_dir, &current)? {
                None => return Ok(None),
                Some(RawRef::Direct(oid)) => return Ok(Some(oid)),
                Some(RawRef::Symbolic(target)) => current = target,
            }
        }
        Err(RefError::RefCycle(name.to_string()))
    }

    /// Write a direct ref: `sha\n` at `name`.
    pub fn create_direct(&self, name: &str, oid: &ObjectId) -> Result<(), RefError> {
        name::validate(name)?;
        loose::write_direct_ref(&self.git_dir, name, oid)
    }

    /// Write a symbolic ref: `ref: <target>\n` at `name`.
    pub fn create_symbolic(&self, name: &str, target: &str) -> Result<(), RefError> {
        name::validate(name)?;
        name::validate(target)?;
        loose::write_symbolic_ref(&self.git_dir, name, target)
    }

    /// Produce the candidate shas `find` picks from, in the order the
    /// rules are checked. Empty names produce no candidates.
    pub fn object_resolve(
        &self,
        odb: &vrz_odb::ObjectDatabase,
        name: &str,
    ) -> Result<Vec<ObjectId>, RefError> {
        if name.trim().is_empty() {
            return Ok(Vec::new());
        }

        if name == "HEAD" {
            return Ok(self.resolve("HEAD")?.into_iter().collect());
        }

        let mut candidates = Vec::new();

        if is_hex_prefix(name) {
            let lower = name.to_lowercase();
            candidates.extend(vrz_odb::match_prefix(odb.objects_dir(), &lower)?);
        }

        if let Some(oid) = self.resolve(&format!("refs/tags/{name}"))? {
            candidates.push(oid);
        }
        if let Some(oid) = self.resolve(&format!("refs/heads/{name}"))? {
            candidates.push(oid);
        }

        Ok(candidates)
    }

    /// Resolve `name` to exactly one sha, failing `AmbiguousReference` if
    /// more than one candidate remains.
    pub fn find(&self, odb: &vrz_odb::ObjectDatabase, name: &str) -> Result<Option<ObjectId>, RefError> {
        let candidates = self.object_resolve(odb, name)?;
        match candidates.len() {
            0 => Ok(None),
            1 => Ok(Some(candidates[0])),
            _ => Err(RefError::AmbiguousReference {
                name: name.to_string(),
                candidates: candidates.iter().map(|c| c.to_hex()).collect(),
            }),
        }
    }

    /// The active branch name, or `Detached` if `HEAD` is not symbolic to
    /// `refs/heads/<name>` (including when it doesn't resolve at all).
    pub fn branch_get_active(&self) -> Result<ActiveBranch, RefError> {
        match self.read("HEAD")? {
            Some(Reference::Symbolic(target)) => match target.strip_prefix("refs/heads/") {
                Some(branch) => Ok(ActiveBranch::Branch(branch.to_string())),
                None => Ok(ActiveBranch::Detached),
            },
            _ => Ok(ActiveBranch::Detached),
        }
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }
}

fn is_hex_prefix(name: &str) -> bool {
    (4..=40).contains(&name.len()) && name.bytes().all(|b| b.is_ascii_hexdigit())
}
