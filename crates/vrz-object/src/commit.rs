use bstr::{BStr, BString, ByteSlice};
use vrz_hash::ObjectId;
use vrz_utils::date::Signature;

use crate::kvlm::Kvlm;
use crate::ObjectError;

/// A commit: a KVLM with `tree`/`parent*`/`author`/`committer` headers and
/// a free-form message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub tree: ObjectId,
    pub parents: Vec<ObjectId>,
    pub author: Signature,
    pub committer: Signature,
    /// Headers this crate doesn't interpret (e.g. `gpgsig`, `encoding`),
    /// preserved verbatim in insertion order for round-tripping.
    pub extra: Vec<(BString, BString)>,
    pub message: BString,
}

impl Commit {
    /// Parse commit content (no object header) from raw bytes.
    pub fn parse(content: &[u8]) -> Result<Self, ObjectError> {
        let kvlm = Kvlm::parse(content)?;

        let tree = parse_oid(&kvlm, b"tree", "tree")?;

        let parents = kvlm
            .get_all(b"parent")
            .into_iter()
            .map(|v| parse_oid_str(v))
            .collect::<Result<Vec<_>, _>>()?;

        let author = kvlm
            .get(b"author")
            .ok_or(ObjectError::MissingCommitField { field: "author" })
            .and_then(parse_signature)?;
        let committer = kvlm
            .get(b"committer")
            .ok_or(ObjectError::MissingCommitField { field: "committer" })
            .and_then(parse_signature)?;

        let extra = kvlm
            .iter()
            .filter(|(k, _)| !matches!(k.as_bytes(), b"tree" | b"parent" | b"author" | b"committer"))
            .map(|(k, v)| (BString::from(k), BString::from(v)))
            .collect();

        Ok(Self {
            tree,
            parents,
            author,
            committer,
            extra,
            message: kvlm.message,
        })
    }

    /// Serialize commit content (no object header). Takes no repository
    /// parameter: serialization is a pure function of the in-memory value,
    /// the same as every other object kind.
    pub fn serialize_content(&self) -> Vec<u8> {
        let mut kvlm = Kvlm::new();
        kvlm.push("tree", self.tree.to_hex());
        for parent in &self.parents {
            kvlm.push("parent", parent.to_hex());
        }
        kvlm.push("author", self.author.to_bytes());
        kvlm.push("committer", self.committer.to_bytes());
        for (key, value) in &self.extra {
            kvlm.push(key.clone(), value.clone());
        }
        kvlm.message = self.message.clone();
        kvlm.serialize()
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn first_parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn summary(&self) -> &BStr {
        let msg: &[u8] = self.message.as_ref();
        match msg.find_byte(b'\n') {
            Some(pos) => BStr::new(&msg[..pos]),
            None => BStr::new(msg),
        }
    }
}

fn parse_oid(kvlm: &Kvlm, key: &[u8], field: &'static str) -> Result<ObjectId, ObjectError> {
    let raw = kvlm
        .get(key)
        .ok_or(ObjectError::MissingCommitField { field })?;
    parse_oid_str(raw)
}

fn parse_oid_str(raw: &BStr) -> Result<ObjectId, ObjectError> {
    let hex = std::str::from_utf8(raw.as_bytes())
        .map_err(|_| ObjectError::Malformed("non-UTF-8 object id in commit header".into()))?;
    Ok(ObjectId::from_hex(hex)?)
}

fn parse_signature(raw: &BStr) -> Result<Signature, ObjectError> {
    Signature::parse(raw).map_err(|e| ObjectError::InvalidSignature(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"tree da39a3ee5e6b4b0d3255bfef95601890afd80709\n");
        out.extend_from_slice(b"parent 0000000000000000000000000000000000000001\n");
        out.extend_from_slice(b"author John Doe <john@example.com> 1234567890 +0000\n");
        out.extend_from_slice(b"committer Jane Doe <jane@example.com> 1234567890 +0000\n");
        out.extend_from_slice(b"\nInitial commit\n");
        out
    }

    #[test]
    fn parse_commit() {
        let c = Commit::parse(&sample()).unwrap();
        assert_eq!(c.tree.to_hex(), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
        assert_eq!(c.parents.len(), 1);
        assert_eq!(c.author.name.as_bytes(), b"John Doe");
        assert_eq!(c.message.as_bytes(), b"Initial commit\n");
    }

    #[test]
    fn root_commit_has_no_parents() {
        let data = b"tree da39a3ee5e6b4b0d3255bfef95601890afd80709\nauthor A <a@b.com> 1 +0000\ncommitter A <a@b.com> 1 +0000\n\nroot\n";
        let c = Commit::parse(data).unwrap();
        assert!(c.is_root());
        assert!(!c.is_merge());
    }

    #[test]
    fn octopus_merge_parents_preserved_in_order() {
        let data = b"tree da39a3ee5e6b4b0d3255bfef95601890afd80709\nparent 0000000000000000000000000000000000000001\nparent 0000000000000000000000000000000000000002\nparent 0000000000000000000000000000000000000003\nauthor A <a@b.com> 1 +0000\ncommitter A <a@b.com> 1 +0000\n\nOctopus\n";
        let c = Commit::parse(data).unwrap();
        assert_eq!(c.parents.len(), 3);
        assert!(c.is_merge());
        assert_eq!(c.serialize_content(), data.to_vec());
    }

    #[test]
    fn serialize_roundtrips_exactly() {
        let original = sample();
        let c = Commit::parse(&original).unwrap();
        assert_eq!(c.serialize_content(), original);
    }

    #[test]
    fn missing_tree_is_an_error() {
        let data = b"author A <a@b.com> 1 +0000\ncommitter A <a@b.com> 1 +0000\n\nmsg\n";
        assert!(Commit::parse(data).is_err());
    }

    #[test]
    fn extra_headers_roundtrip() {
        let data = b"tree da39a3ee5e6b4b0d3255bfef95601890afd80709\nauthor A <a@b.com> 1 +0000\ncommitter A <a@b.com> 1 +0000\ngpgsig line one\n line two\n\nmsg\n";
        let c = Commit::parse(data).unwrap();
        assert_eq!(c.extra.len(), 1);
        assert_eq!(c.serialize_content(), data.to_vec());
    }
}
