use bstr::{BString, ByteSlice};
use vrz_hash::ObjectId;
use vrz_utils::date::Signature;

use crate::kvlm::Kvlm;
use crate::{ObjectError, ObjectKind};

/// An annotated tag: `object`/`type`/`tag`/`tagger` headers plus a message.
/// (Lightweight tags are just a ref and never produce a `Tag` object.)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub object: ObjectId,
    pub target_kind: ObjectKind,
    pub tag_name: BString,
    pub tagger: Option<Signature>,
    pub message: BString,
}

impl Tag {
    pub fn parse(content: &[u8]) -> Result<Self, ObjectError> {
        let kvlm = Kvlm::parse(content)?;

        let object_hex = kvlm
            .get(b"object")
            .ok_or(ObjectError::MissingTagField { field: "object" })?;
        let object = ObjectId::from_hex(
            std::str::from_utf8(object_hex.as_bytes())
                .map_err(|_| ObjectError::Malformed("non-UTF-8 object id in tag header".into()))?,
        )?;

        let target_kind = kvlm
            .get(b"type")
            .ok_or(ObjectError::MissingTagField { field: "type" })
            .and_then(|v| ObjectKind::from_bytes(v.as_bytes()))?;

        let tag_name = kvlm
            .get(b"tag")
            .ok_or(ObjectError::MissingTagField { field: "tag" })
            .map(BString::from)?;

        let tagger = kvlm
            .get(b"tagger")
            .map(|v| Signature::parse(v).map_err(|e| ObjectError::InvalidSignature(e.to_string())))
            .transpose()?;

        Ok(Self {
            object,
            target_kind,
            tag_name,
            tagger,
            message: kvlm.message,
        })
    }

    pub fn serialize_content(&self) -> Vec<u8> {
        let mut kvlm = Kvlm::new();
        kvlm.push("object", self.object.to_hex());
        kvlm.push("type", self.target_kind.as_bytes());
        kvlm.push("tag", self.tag_name.clone());
        if let Some(ref tagger) = self.tagger {
            kvlm.push("tagger", tagger.to_bytes());
        }
        kvlm.message = self.message.clone();
        kvlm.serialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"object da39a3ee5e6b4b0d3255bfef95601890afd80709\n");
        out.extend_from_slice(b"type commit\n");
        out.extend_from_slice(b"tag v1.0\n");
        out.extend_from_slice(b"tagger John Doe <john@example.com> 1234567890 +0000\n");
        out.extend_from_slice(b"\nRelease v1.0\n");
        out
    }

    #[test]
    fn parse_tag() {
        let tag = Tag::parse(&sample()).unwrap();
        assert_eq!(tag.object.to_hex(), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
        assert_eq!(tag.target_kind, ObjectKind::Commit);
        assert_eq!(tag.tag_name.as_bytes(), b"v1.0");
        assert!(tag.tagger.is_some());
    }

    #[test]
    fn parse_tag_without_tagger() {
        let data = b"object da39a3ee5e6b4b0d3255bfef95601890afd80709\ntype commit\ntag old\n\nOld tag\n";
        let tag = Tag::parse(data).unwrap();
        assert!(tag.tagger.is_none());
    }

    #[test]
    fn serialize_roundtrips_exactly() {
        let original = sample();
        let tag = Tag::parse(&original).unwrap();
        assert_eq!(tag.serialize_content(), original);
    }

    #[test]
    fn multi_line_message_body() {
        let data = b"object da39a3ee5e6b4b0d3255bfef95601890afd80709\ntype commit\ntag v2\n\nSummary\n\nFull paragraph with\nmultiple lines.\n";
        let tag = Tag::parse(data).unwrap();
        assert_eq!(tag.serialize_content(), data.to_vec());
    }

    #[test]
    fn missing_object_is_an_error() {
        let data = b"type commit\ntag v1.0\n\nmessage\n";
        assert!(Tag::parse(data).is_err());
    }
}
