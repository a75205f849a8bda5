use std::fmt;
use std::str::FromStr;

use crate::error::HashError;
use crate::hex;

/// A 20-byte SHA-1 object identifier.
///
/// vrz deals in exactly one hash algorithm, unlike the workspace this was
/// adapted from (which carries a `Sha1`/`Sha256` enum for forward-compat
/// with newer Git object formats); the spec fixes SHA-1, so there is
/// nothing to be polymorphic over.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; 20]);

impl ObjectId {
    pub const NULL: ObjectId = ObjectId([0u8; 20]);

    /// Byte length of the binary form.
    pub const LEN: usize = 20;

    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        ObjectId(bytes)
    }

    /// Build from a 20-byte slice, e.g. one sliced out of a tree entry.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let arr: [u8; 20] = bytes.try_into().ok()?;
        Some(ObjectId(arr))
    }

    /// Parse a 40-character lowercase-or-uppercase hex string.
    pub fn from_hex(hex: &str) -> Result<Self, HashError> {
        if hex.len() != 40 {
            return Err(HashError::InvalidLength(hex.len()));
        }
        let raw = hex::hex_decode(hex)?;
        let mut buf = [0u8; 20];
        buf.copy_from_slice(&raw);
        Ok(ObjectId(buf))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::hex_encode(&self.0)
    }

    pub fn is_null(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Directory/filename split used under `objects/`: first two hex chars
    /// name the directory, the rest name the file.
    pub fn loose_path(&self) -> (String, String) {
        let hex = self.to_hex();
        (hex[..2].to_string(), hex[2..].to_string())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::from_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_hex() {
        let hex = "2e65efe2a145dda7ee51d1741299f848e5bf752e";
        // 41 chars on purpose to exercise the length check.
        assert!(ObjectId::from_hex(hex).is_err());

        let hex = "2e65efe2a145dda7ee51d1741299f848e5bf752";
        let oid = ObjectId::from_hex(hex).unwrap();
        assert_eq!(oid.to_hex(), hex);
    }

    #[test]
    fn loose_path_splits_first_two_chars() {
        let oid = ObjectId::from_hex("2e65efe2a145dda7ee51d1741299f848e5bf752").unwrap();
        let (dir, file) = oid.loose_path();
        assert_eq!(dir, "2e");
        assert_eq!(file, "65efe2a145dda7ee51d1741299f848e5bf752");
    }

    #[test]
    fn null_is_all_zero() {
        assert!(ObjectId::NULL.is_null());
    }
}
