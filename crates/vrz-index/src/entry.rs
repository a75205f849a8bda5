//! A single staged file: stat cache, blob sha, mode, and merge stage.

use bstr::BString;
use vrz_hash::ObjectId;
use vrz_object::FileMode;

/// Stat fields cached so `status` can cheaply detect an unchanged file
/// without rehashing its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatData {
    pub ctime_secs: u32,
    pub ctime_nsecs: u32,
    pub mtime_secs: u32,
    pub mtime_nsecs: u32,
    pub dev: u32,
    pub ino: u32,
    pub uid: u32,
    pub gid: u32,
    pub size: u32,
}

impl StatData {
    /// `ctime_nsecs`/`mtime_nsecs` are the OS stat's true nanoseconds within
    /// the second (`0..1_000_000_000`), never rescaled.
    #[cfg(unix)]
    pub fn from_metadata(meta: &std::fs::Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;
        Self {
            ctime_secs: meta.ctime() as u32,
            ctime_nsecs: meta.ctime_nsec() as u32,
            mtime_secs: meta.mtime() as u32,
            mtime_nsecs: meta.mtime_nsec() as u32,
            dev: meta.dev() as u32,
            ino: meta.ino() as u32,
            uid: meta.uid(),
            gid: meta.gid(),
            size: meta.len() as u32,
        }
    }

    #[cfg(not(unix))]
    pub fn from_metadata(meta: &std::fs::Metadata) -> Self {
        use std::time::UNIX_EPOCH;
        let mtime = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .unwrap_or_default();
        Self {
            ctime_secs: mtime.as_secs() as u32,
            ctime_nsecs: mtime.subsec_nanos(),
            mtime_secs: mtime.as_secs() as u32,
            mtime_nsecs: mtime.subsec_nanos(),
            dev: 0,
            ino: 0,
            uid: 0,
            gid: 0,
            size: meta.len() as u32,
        }
    }

    /// Cheap "did this file possibly change" check, used by `status` before
    /// falling back to a content rehash.
    pub fn matches(&self, meta: &std::fs::Metadata) -> bool {
        let other = Self::from_metadata(meta);
        self.size == other.size
            && self.mtime_secs == other.mtime_secs
            && self.mtime_nsecs == other.mtime_nsecs
            && self.ctime_secs == other.ctime_secs
            && self.ctime_nsecs == other.ctime_nsecs
    }
}

/// A single entry in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Repository-relative path, `/`-separated.
    pub path: BString,
    pub oid: ObjectId,
    pub mode: FileMode,
    /// Merge stage: 0 normal, 1-3 during a conflict. vrz's composed
    /// operations (`add`/`rm`) only ever produce stage 0.
    pub stage: u8,
    pub stat: StatData,
    /// CE_VALID: assume the entry is unchanged without stat-checking it.
    pub assume_valid: bool,
}

/// Sort order: by path, then by stage. Matches the canonical on-disk order.
pub fn cmp_entries(a: &IndexEntry, b: &IndexEntry) -> std::cmp::Ordering {
    a.path.cmp(&b.path).then(a.stage.cmp(&b.stage))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_data_default() {
        let stat = StatData::default();
        assert_eq!(stat.size, 0);
    }
}
