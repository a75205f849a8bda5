//! Index file serialization: the reverse of `read.rs`, with no checksum
//! trailer and no extensions section.

use std::io::Write as _;
use std::path::Path;

use vrz_utils::LockFile;

use crate::entry::IndexEntry;
use crate::{Index, IndexError};

const SIGNATURE: &[u8; 4] = b"DIRC";

/// Write the index to `path` atomically via a `<path>.lock` file.
pub fn write_index(index: &Index, path: &Path) -> Result<(), IndexError> {
    let mut lock = LockFile::acquire(path)?;
    let data = serialize_index(index);
    lock.write_all(&data)?;
    lock.commit()?;
    Ok(())
}

pub fn serialize_index(index: &Index) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(SIGNATURE);
    buf.extend_from_slice(&2u32.to_be_bytes());
    buf.extend_from_slice(&(index.entries.len() as u32).to_be_bytes());

    for entry in &index.entries {
        write_entry(&mut buf, entry);
    }

    buf
}

fn write_entry(buf: &mut Vec<u8>, entry: &IndexEntry) {
    let entry_start = buf.len();

    buf.extend_from_slice(&entry.stat.ctime_secs.to_be_bytes());
    buf.extend_from_slice(&entry.stat.ctime_nsecs.to_be_bytes());
    buf.extend_from_slice(&entry.stat.mtime_secs.to_be_bytes());
    buf.extend_from_slice(&entry.stat.mtime_nsecs.to_be_bytes());
    buf.extend_from_slice(&entry.stat.dev.to_be_bytes());
    buf.extend_from_slice(&entry.stat.ino.to_be_bytes());
    buf.extend_from_slice(&entry.mode.raw().to_be_bytes());
    buf.extend_from_slice(&entry.stat.uid.to_be_bytes());
    buf.extend_from_slice(&entry.stat.gid.to_be_bytes());
    buf.extend_from_slice(&entry.stat.size.to_be_bytes());

    buf.extend_from_slice(entry.oid.as_bytes());

    let name_len = std::cmp::min(entry.path.len(), 0xFFF) as u16;
    let mut flags: u16 = name_len;
    flags |= (entry.stage as u16 & 0x3) << 12;
    if entry.assume_valid {
        flags |= 0x8000;
    }
    buf.extend_from_slice(&flags.to_be_bytes());

    buf.extend_from_slice(&entry.path);
    buf.push(0);

    let written = buf.len() - entry_start;
    let padded = (written + 7) & !7;
    buf.resize(entry_start + padded, 0);
}
