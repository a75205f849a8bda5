use std::fs;
use std::io::Write;
use std::path::Path;

use flate2::write::ZlibEncoder;
use vrz_hash::hasher::Hasher;
use vrz_hash::ObjectId;
use vrz_object::{header, Object, ObjectKind};

use crate::{LooseError, LooseObjectStore};

impl LooseObjectStore {
    /// Hash and persist an object. No-op if the sha already exists:
    /// writes are skipped, not overwritten, preserving the content-addressed
    /// invariant under concurrent writers.
    pub fn write(&self, obj: &Object) -> Result<ObjectId, LooseError> {
        let content = obj.serialize_content();
        self.write_raw(obj.kind(), &content)
    }

    /// Hash and persist raw content of a known kind.
    pub fn write_raw(&self, kind: ObjectKind, content: &[u8]) -> Result<ObjectId, LooseError> {
        let hdr = header::write_header(kind, content.len());

        let mut hasher = Hasher::new();
        hasher.update(&hdr);
        hasher.update(content);
        let oid = hasher.finalize();

        if self.contains(&oid) {
            return Ok(oid);
        }

        let final_path = self.object_path(&oid);
        if let Some(parent) = final_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = write_to_temp(&self.objects_dir, &hdr, content, self.compression_level)?;
        finalize_object(&tmp_path, &final_path)?;

        Ok(oid)
    }

    /// Hash without persisting.
    pub fn hash(&self, kind: ObjectKind, content: &[u8]) -> Result<ObjectId, LooseError> {
        let hdr = header::write_header(kind, content.len());
        let mut hasher = Hasher::new();
        hasher.update(&hdr);
        hasher.update(content);
        Ok(hasher.finalize())
    }
}

fn write_to_temp(
    objects_dir: &Path,
    hdr: &[u8],
    content: &[u8],
    level: flate2::Compression,
) -> Result<std::path::PathBuf, LooseError> {
    let tmp_path = objects_dir.join(format!(
        "tmp_obj_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .subsec_nanos()
    ));

    let file = fs::File::create(&tmp_path)?;
    let mut encoder = ZlibEncoder::new(file, level);
    encoder.write_all(hdr)?;
    encoder.write_all(content)?;
    encoder.finish()?;

    Ok(tmp_path)
}

/// Atomically move a temp file into place. If another writer already
/// raced us to the same sha, drop our temp file; the content is identical
/// by construction.
fn finalize_object(tmp: &Path, final_path: &Path) -> Result<(), LooseError> {
    match fs::rename(tmp, final_path) {
        Ok(()) => Ok(()),
        Err(_) if final_path.exists() => {
            let _ = fs::remove_file(tmp);
            Ok(())
        }
        Err(e) => {
            let _ = fs::remove_file(tmp);
            Err(LooseError::Io(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vrz_object::Blob;

    #[test]
    fn write_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = LooseObjectStore::open(dir.path());
        let obj = Object::Blob(Blob::new(b"a".to_vec()));

        let oid1 = store.write(&obj).unwrap();
        let oid2 = store.write(&obj).unwrap();
        assert_eq!(oid1, oid2);
        assert_eq!(oid1.to_hex(), "2e65efe2a145dda7ee51d1741299f848e5bf752");
    }

    #[test]
    fn write_then_read_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = LooseObjectStore::open(dir.path());
        let obj = Object::Blob(Blob::new(b"hello world".to_vec()));

        let oid = store.write(&obj).unwrap();
        let read_back = store.read(&oid).unwrap().unwrap();
        assert_eq!(read_back, obj);
    }
}
