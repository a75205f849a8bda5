//! Object database: `hash`/`read`/`find` plus hex-prefix resolution, over a
//! single loose object store (no packs, no alternates).

mod prefix;

use vrz_hash::ObjectId;
use vrz_loose::LooseObjectStore;
use vrz_object::{Object, ObjectKind};

pub use prefix::match_prefix;

#[derive(Debug, thiserror::Error)]
pub enum OdbError {
    #[error(transparent)]
    Loose(#[from] vrz_loose::LooseError),

    #[error("object not found: {0}")]
    NotFound(ObjectId),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub struct ObjectDatabase {
    loose: LooseObjectStore,
}

impl ObjectDatabase {
    pub fn open(objects_dir: impl AsRef<std::path::Path>) -> Self {
        Self {
            loose: LooseObjectStore::open(objects_dir),
        }
    }

    /// Hash `content` and, if `persist`, write it. Writes are idempotent:
    /// an existing sha is never overwritten.
    pub fn hash(
        &self,
        kind: ObjectKind,
        content: &[u8],
        persist: bool,
    ) -> Result<ObjectId, OdbError> {
        if persist {
            Ok(self.loose.write_raw(kind, content)?)
        } else {
            Ok(self.loose.hash(kind, content)?)
        }
    }

    /// Read and parse the object at `oid`.
    pub fn read(&self, oid: &ObjectId) -> Result<Object, OdbError> {
        self.loose
            .read(oid)?
            .ok_or(OdbError::NotFound(*oid))
    }

    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.loose.contains(oid)
    }

    /// Directory housing loose objects, for the hex-prefix scan in
    /// `vrz-ref`'s `object_resolve`.
    pub fn objects_dir(&self) -> &std::path::Path {
        self.loose.objects_dir()
    }

    /// Follow tag->object and commit->tree links from `oid` until an
    /// object of `kind` is reached, or the chain is exhausted.
    pub fn peel_to_kind(&self, oid: ObjectId, kind: ObjectKind) -> Result<Option<ObjectId>, OdbError> {
        let mut current = oid;
        loop {
            let obj = self.read(&current)?;
            if obj.kind() == kind {
                return Ok(Some(current));
            }
            current = match obj {
                Object::Tag(tag) => tag.object,
                Object::Commit(commit) => commit.tree,
                _ => return Ok(None),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vrz_object::{Blob, Commit, Tag};
    use vrz_utils::date::{GitDate, Signature};

    fn sig() -> Signature {
        Signature {
            name: "A".into(),
            email: "a@b.com".into(),
            date: GitDate::new(1, 0),
        }
    }

    #[test]
    fn hash_without_persist_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let odb = ObjectDatabase::open(dir.path());
        let oid = odb.hash(ObjectKind::Blob, b"a", false).unwrap();
        assert!(!odb.contains(&oid));
    }

    #[test]
    fn hash_with_persist_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let odb = ObjectDatabase::open(dir.path());
        let oid = odb.hash(ObjectKind::Blob, b"a", true).unwrap();
        assert!(odb.contains(&oid));
        let obj = odb.read(&oid).unwrap();
        assert_eq!(obj, Object::Blob(Blob::new(b"a".to_vec())));
    }

    #[test]
    fn peel_tag_to_commit_to_tree() {
        let dir = tempfile::tempdir().unwrap();
        let odb = ObjectDatabase::open(dir.path());

        let tree_oid = odb
            .hash(ObjectKind::Tree, &vrz_object::Tree::new().serialize_content(), true)
            .unwrap();

        let commit = Commit {
            tree: tree_oid,
            parents: vec![],
            author: sig(),
            committer: sig(),
            extra: vec![],
            message: "msg\n".into(),
        };
        let commit_bytes = commit.serialize_content();
        let commit_oid = odb.hash(ObjectKind::Commit, &commit_bytes, true).unwrap();

        let tag = Tag {
            object: commit_oid,
            target_kind: ObjectKind::Commit,
            tag_name: "v1".into(),
            tagger: None,
            message: "tag msg\n".into(),
        };
        let tag_bytes = tag.serialize_content();
        let tag_oid = odb.hash(ObjectKind::Tag, &tag_bytes, true).unwrap();

        let resolved = odb.peel_to_kind(tag_oid, ObjectKind::Tree).unwrap();
        assert_eq!(resolved, Some(tree_oid));
    }
}
