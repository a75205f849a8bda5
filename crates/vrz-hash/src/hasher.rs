use sha1::{Digest, Sha1};

use crate::oid::ObjectId;

/// Incremental SHA-1 hasher over raw bytes.
#[derive(Default)]
pub struct Hasher {
    inner: Sha1,
}

impl Hasher {
    pub fn new() -> Self {
        Self { inner: Sha1::new() }
    }

    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    pub fn finalize(self) -> ObjectId {
        let digest = self.inner.finalize();
        let mut buf = [0u8; 20];
        buf.copy_from_slice(&digest);
        ObjectId::from_bytes(buf)
    }

    /// One-shot digest of a byte slice.
    pub fn digest(data: &[u8]) -> ObjectId {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }
}

impl std::io::Write for Hasher {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_byte_blob_hash_matches_known_vector() {
        // hash-object framing: "blob 1\0a"
        let framed = b"blob 1\0a";
        let oid = Hasher::digest(framed);
        assert_eq!(oid.to_hex(), "2e65efe2a145dda7ee51d1741299f848e5bf752");
    }

    #[test]
    fn incremental_matches_one_shot() {
        let mut h = Hasher::new();
        h.update(b"blob 5\0");
        h.update(b"hello");
        let incremental = h.finalize();
        let oneshot = Hasher::digest(b"blob 5\0hello");
        assert_eq!(incremental, oneshot);
    }
}
