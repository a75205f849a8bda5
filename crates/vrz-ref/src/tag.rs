//! Tag creation: lightweight tags are a direct ref; annotated tags persist
//! a tag object first, then point a ref at its sha (the order the object
//! must exist before anything can reference it).

use bstr::BString;
use vrz_hash::ObjectId;
use vrz_object::{ObjectKind, Tag};
use vrz_odb::ObjectDatabase;
use vrz_utils::date::Signature;

use crate::error::RefError;
use crate::RefStore;

/// What an annotated tag needs beyond the target object: who made it and
/// the message body.
pub struct TagSpec {
    pub tagger: Signature,
    pub message: BString,
}

impl RefStore {
    /// Lightweight tag: `refs/tags/<name>` points directly at `target`.
    pub fn create_lightweight_tag(&self, name: &str, target: &ObjectId) -> Result<(), RefError> {
        self.create_direct(&format!("refs/tags/{name}"), target)
    }

    /// Annotated tag: write the tag object first, then the ref pointing at
    /// its sha. Returns the tag object's own sha.
    pub fn create_annotated_tag(
        &self,
        odb: &ObjectDatabase,
        name: &str,
        target: ObjectId,
        target_kind: ObjectKind,
        spec: TagSpec,
    ) -> Result<ObjectId, RefError> {
        let tag = Tag {
            object: target,
            target_kind,
            tag_name: BString::from(name),
            tagger: Some(spec.tagger),
            message: spec.message,
        };
        let tag_oid = odb.hash(ObjectKind::Tag, &tag.serialize_content(), true)?;
        self.create_direct(&format!("refs/tags/{name}"), &tag_oid)?;
        Ok(tag_oid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vrz_utils::date::GitDate;

    fn sample_signature() -> Signature {
        Signature {
            name: BString::from("Ada Lovelace"),
            email: BString::from("ada@example.com"),
            date: GitDate::new(1_700_000_000, 0),
        }
    }

    #[test]
    fn lightweight_tag_points_directly_at_target() {
        let dir = tempfile::tempdir().unwrap();
        let store = RefStore::new(dir.path());
        let target = ObjectId::from_hex("da39a3ee5e6b4b0d3255bfef95601890afd80709").unwrap();
        store.create_lightweight_tag("v1.0", &target).unwrap();
        assert_eq!(store.resolve("refs/tags/v1.0").unwrap(), Some(target));
    }

    #[test]
    fn annotated_tag_persists_object_before_ref() {
        let dir = tempfile::tempdir().unwrap();
        let objects_dir = dir.path().join("objects");
        let odb = ObjectDatabase::open(&objects_dir);
        let store = RefStore::new(dir.path());

        let target = ObjectId::from_hex("da39a3ee5e6b4b0d3255bfef95601890afd80709").unwrap();
        let tag_oid = store
            .create_annotated_tag(
                &odb,
                "v2.0",
                target,
                ObjectKind::Commit,
                TagSpec {
                    tagger: sample_signature(),
                    message: BString::from("Release v2.0\n"),
                },
            )
            .unwrap();

        assert!(odb.contains(&tag_oid));
        assert_eq!(store.resolve("refs/tags/v2.0").unwrap(), Some(tag_oid));

        let tag = match odb.read(&tag_oid).unwrap() {
            vrz_object::Object::Tag(t) => t,
            other => panic!("expected tag object, got {other:?}"),
        };
        assert_eq!(tag.object, target);
        assert_eq!(tag.tag_name, BString::from("v2.0"));
    }
}
