//! Loose object storage: read and write zlib-compressed objects under
//! `.vrz/objects/`.
//!
//! Each object lives at `objects/XX/YYYY...`, `XX` the first two hex
//! characters of its sha. The file content is zlib-compressed
//! `"<kind> <size>\0<payload>"`. Writes are idempotent: an existing path
//! is never overwritten, since the same sha always implies the same bytes.

mod read;
mod write;

use std::path::{Path, PathBuf};

use vrz_hash::ObjectId;

pub struct LooseObjectStore {
    objects_dir: PathBuf,
    compression_level: flate2::Compression,
}

impl LooseObjectStore {
    pub fn open(objects_dir: impl AsRef<Path>) -> Self {
        Self {
            objects_dir: objects_dir.as_ref().to_path_buf(),
            compression_level: flate2::Compression::default(),
        }
    }

    pub fn set_compression_level(&mut self, level: u32) {
        self.compression_level = flate2::Compression::new(level);
    }

    pub fn object_path(&self, oid: &ObjectId) -> PathBuf {
        let (dir, file) = oid.loose_path();
        self.objects_dir.join(dir).join(file)
    }

    pub fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LooseError {
    #[error("corrupt loose object {oid}: {reason}")]
    Corrupt { oid: String, reason: String },

    #[error("decompression error for {oid}: {source}")]
    Decompress {
        oid: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Object(#[from] vrz_object::ObjectError),

    #[error(transparent)]
    Hash(#[from] vrz_hash::HashError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_path_splits_on_first_two_hex_chars() {
        let store = LooseObjectStore::open("/tmp/objects");
        let oid = ObjectId::from_hex("da39a3ee5e6b4b0d3255bfef95601890afd80709").unwrap();
        assert_eq!(
            store.object_path(&oid),
            PathBuf::from("/tmp/objects/da/39a3ee5e6b4b0d3255bfef95601890afd80709")
        );
    }
}
