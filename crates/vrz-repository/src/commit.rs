//! `commit(message)`: builds the root tree from the index, reads `HEAD`
//! for the parent, stamps an author/committer signature, and advances the
//! active branch (or the detached `HEAD` itself) to the new commit.

use bstr::BString;
use vrz_hash::ObjectId;
use vrz_object::{Commit, ObjectKind};
use vrz_utils::date::{GitDate, Signature};

use crate::error::RepoError;
use crate::Repository;

pub fn commit(repo: &mut Repository, message: &str) -> Result<ObjectId, RepoError> {
    if repo.index.is_none() {
        repo.load_index()?;
    }
    let tree_oid = vrz_index::tree_from_index(repo.index.as_ref().unwrap(), &repo.odb)?;
    let parent = repo.refs.resolve("HEAD")?;

    let (name, email) = repo.config.user_identity()?;
    let signature = Signature {
        name,
        email,
        date: GitDate::now(),
    };

    let commit = Commit {
        tree: tree_oid,
        parents: parent.into_iter().collect(),
        author: signature.clone(),
        committer: signature,
        extra: Vec::new(),
        message: BString::from(message),
    };

    let commit_oid = repo.odb.hash(ObjectKind::Commit, &commit.serialize_content(), true)?;

    match repo.refs.branch_get_active()? {
        vrz_ref::ActiveBranch::Branch(name) => {
            repo.refs.create_direct(&format!("refs/heads/{name}"), &commit_oid)?;
        }
        // Detached HEAD advances directly, never the literal placeholder the
        // reference implementation wrote in this situation.
        vrz_ref::ActiveBranch::Detached => {
            repo.refs.create_direct("HEAD", &commit_oid)?;
        }
    }

    Ok(commit_oid)
}
