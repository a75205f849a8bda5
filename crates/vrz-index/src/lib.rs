//! The binary staging index: `DIRC` v2 parsing/serialization, plus the
//! composed `rm`/`add`/`tree_from_index` operations and ignore resolution.

mod entry;
mod error;
pub mod ignore;
mod ops;
mod read;
mod write;

use std::path::Path;

use bstr::BStr;

pub use entry::{IndexEntry, StatData};
pub use error::IndexError;
pub use ignore::{IgnoreResolver, IgnoreRule};
pub use ops::{add, rm, tree_from_index};

/// The staging area: an ordered list of entries, sorted by (path, stage).
#[derive(Debug, Default)]
pub struct Index {
    entries: Vec<IndexEntry>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, IndexError> {
        let data = std::fs::read(path.as_ref())?;
        read::parse_index(&data)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), IndexError> {
        write::write_index(self, path.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }

    /// Stage-0 entries only, the ones composed operations like
    /// `tree_from_index` and `status` actually work with.
    pub fn iter_stage0(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter().filter(|e| e.stage == 0)
    }

    pub fn get(&self, path: &BStr) -> Option<&IndexEntry> {
        self.entries.iter().find(|e| e.path[..] == path[..] && e.stage == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_index_is_empty() {
        assert!(Index::new().is_empty());
    }
}
