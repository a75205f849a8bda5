//! The four object kinds (blob, tree, commit, tag), their KVLM-based
//! header format, and the framing (`<kind> <size>\0<payload>`) that gets
//! hashed and zlib-compressed onto disk.

mod blob;
mod commit;
mod error;
pub mod header;
pub mod kvlm;
mod tag;
mod tree;

pub use blob::Blob;
pub use commit::Commit;
pub use error::ObjectError;
pub use tag::Tag;
pub use tree::{FileMode, Tree, TreeEntry};

use bstr::BString;

/// Discriminator for the four object kinds, as it appears in the object
/// header and in a tag's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Blob,
    Tree,
    Commit,
    Tag,
}

impl ObjectKind {
    pub fn from_bytes(s: &[u8]) -> Result<Self, ObjectError> {
        match s {
            b"blob" => Ok(Self::Blob),
            b"tree" => Ok(Self::Tree),
            b"commit" => Ok(Self::Commit),
            b"tag" => Ok(Self::Tag),
            _ => Err(ObjectError::UnknownKind(BString::from(s))),
        }
    }

    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            Self::Blob => b"blob",
            Self::Tree => b"tree",
            Self::Commit => b"commit",
            Self::Tag => b"tag",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(std::str::from_utf8(self.as_bytes()).unwrap())
    }
}

impl std::str::FromStr for ObjectKind {
    type Err = ObjectError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes())
    }
}

/// A parsed object of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
    Tag(Tag),
}

impl Object {
    /// Parse full framed bytes (`<kind> <size>\0<payload>`), validating
    /// that the declared size matches the actual payload length exactly.
    pub fn parse(data: &[u8]) -> Result<Self, ObjectError> {
        let (kind, declared_size, header_len) = header::parse_header(data)?;
        let content = &data[header_len..];
        if content.len() != declared_size {
            return Err(ObjectError::Malformed(format!(
                "declared size {declared_size} does not match payload length {}",
                content.len()
            )));
        }
        Self::parse_content(kind, content)
    }

    pub fn parse_content(kind: ObjectKind, content: &[u8]) -> Result<Self, ObjectError> {
        match kind {
            ObjectKind::Blob => Ok(Self::Blob(Blob::parse(content))),
            ObjectKind::Tree => Ok(Self::Tree(Tree::parse(content)?)),
            ObjectKind::Commit => Ok(Self::Commit(Commit::parse(content)?)),
            ObjectKind::Tag => Ok(Self::Tag(Tag::parse(content)?)),
        }
    }

    /// Serialize with header: `<kind> <size>\0<payload>`.
    pub fn serialize(&self) -> Vec<u8> {
        let content = self.serialize_content();
        let hdr = header::write_header(self.kind(), content.len());
        let mut out = Vec::with_capacity(hdr.len() + content.len());
        out.extend_from_slice(&hdr);
        out.extend_from_slice(&content);
        out
    }

    /// Serialize just the payload, with no object header. Pure function
    /// of the in-memory value for every variant, uniformly; persisting to
    /// the object database is always a separate, explicit step.
    pub fn serialize_content(&self) -> Vec<u8> {
        match self {
            Self::Blob(b) => b.serialize_content().to_vec(),
            Self::Tree(t) => t.serialize_content(),
            Self::Commit(c) => c.serialize_content(),
            Self::Tag(t) => t.serialize_content(),
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Blob(_) => ObjectKind::Blob,
            Self::Tree(_) => ObjectKind::Tree,
            Self::Commit(_) => ObjectKind::Commit,
            Self::Tag(_) => ObjectKind::Tag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_bytes() {
        assert_eq!(ObjectKind::from_bytes(b"blob").unwrap(), ObjectKind::Blob);
        assert!(ObjectKind::from_bytes(b"widget").is_err());
    }

    #[test]
    fn kind_display_roundtrips_through_from_str() {
        assert_eq!("tag".parse::<ObjectKind>().unwrap(), ObjectKind::Tag);
        assert_eq!(ObjectKind::Tree.to_string(), "tree");
    }

    #[test]
    fn parse_rejects_size_mismatch() {
        // Header declares 2 bytes, payload is 1: must be MalformedObject,
        // not silently truncated or padded.
        let data = b"blob 2\0a";
        assert!(Object::parse(data).is_err());
    }

    #[test]
    fn blob_roundtrips_through_full_object() {
        let blob = Object::Blob(Blob::new(b"a".to_vec()));
        let serialized = blob.serialize();
        let parsed = Object::parse(&serialized).unwrap();
        assert_eq!(parsed, blob);
    }
}
