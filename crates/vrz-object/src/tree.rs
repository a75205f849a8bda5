use std::cmp::Ordering;

use bstr::{BStr, BString, ByteSlice};
use vrz_hash::ObjectId;

use crate::ObjectError;

/// Mode of a tree entry. Stored as ascii octal in the wire format (5 digits
/// for `Tree`, 6 for the rest); comparisons and `is_tree` work off the
/// parsed numeric value, not the digit count, so both widths are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileMode {
    Regular,
    Executable,
    Symlink,
    Gitlink,
    Tree,
    Unknown(u32),
}

impl FileMode {
    pub fn from_bytes(s: &[u8]) -> Result<Self, ObjectError> {
        let raw = parse_octal(s)
            .ok_or_else(|| ObjectError::InvalidFileMode(String::from_utf8_lossy(s).into()))?;
        Ok(Self::from_raw(raw))
    }

    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0o100644 => Self::Regular,
            0o100755 => Self::Executable,
            0o120000 => Self::Symlink,
            0o160000 => Self::Gitlink,
            0o040000 => Self::Tree,
            other => Self::Unknown(other),
        }
    }

    pub fn as_bytes(&self) -> BString {
        BString::from(format!("{:o}", self.raw()))
    }

    pub fn raw(&self) -> u32 {
        match self {
            Self::Regular => 0o100644,
            Self::Executable => 0o100755,
            Self::Symlink => 0o120000,
            Self::Gitlink => 0o160000,
            Self::Tree => 0o40000,
            Self::Unknown(v) => *v,
        }
    }

    /// A tree entry is a directory iff its mode's high octal digit is `04`.
    pub fn is_tree(&self) -> bool {
        matches!(self, Self::Tree)
    }

    pub fn is_blob(&self) -> bool {
        matches!(self, Self::Regular | Self::Executable)
    }

    pub fn is_symlink(&self) -> bool {
        matches!(self, Self::Symlink)
    }
}

fn parse_octal(s: &[u8]) -> Option<u32> {
    if s.is_empty() {
        return None;
    }
    let mut val: u32 = 0;
    for &b in s {
        if !(b'0'..=b'7').contains(&b) {
            return None;
        }
        val = val.checked_mul(8)?.checked_add(u32::from(b - b'0'))?;
    }
    Some(val)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: FileMode,
    pub name: BString,
    pub oid: ObjectId,
}

impl TreeEntry {
    /// Canonical tree sort: directory entries compare as if their name had
    /// a trailing '/'. Gated strictly on `mode.is_tree()`, never on a
    /// string prefix of the mode bytes.
    pub fn cmp_entries(a: &TreeEntry, b: &TreeEntry) -> Ordering {
        base_name_compare(a.name.as_ref(), a.mode.is_tree(), b.name.as_ref(), b.mode.is_tree())
    }
}

impl PartialOrd for TreeEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TreeEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        Self::cmp_entries(self, other)
    }
}

fn base_name_compare(name1: &[u8], is_dir1: bool, name2: &[u8], is_dir2: bool) -> Ordering {
    let min_len = name1.len().min(name2.len());
    let cmp = name1[..min_len].cmp(&name2[..min_len]);
    if cmp != Ordering::Equal {
        return cmp;
    }
    let c1 = if name1.len() > min_len {
        name1[min_len]
    } else if is_dir1 {
        b'/'
    } else {
        0
    };
    let c2 = if name2.len() > min_len {
        name2[min_len]
    } else if is_dir2 {
        b'/'
    } else {
        0
    };
    c1.cmp(&c2)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tree {
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `<mode> SP <name> NUL <20-byte-sha>` entries until content is
    /// exhausted.
    pub fn parse(content: &[u8]) -> Result<Self, ObjectError> {
        let mut entries = Vec::new();
        let mut pos = 0;

        while pos < content.len() {
            let space_pos = content[pos..]
                .iter()
                .position(|&b| b == b' ')
                .map(|p| p + pos)
                .ok_or_else(|| ObjectError::Malformed(format!("tree entry at {pos}: missing space after mode")))?;

            let mode = FileMode::from_bytes(&content[pos..space_pos])?;

            let name_start = space_pos + 1;
            let null_pos = content[name_start..]
                .iter()
                .position(|&b| b == 0)
                .map(|p| p + name_start)
                .ok_or_else(|| ObjectError::Malformed(format!("tree entry at {name_start}: missing NUL after name")))?;

            let name = BString::from(&content[name_start..null_pos]);

            let oid_start = null_pos + 1;
            let oid_len = ObjectId::LEN;
            if oid_start + oid_len > content.len() {
                return Err(ObjectError::Malformed(format!(
                    "tree entry at {oid_start}: truncated sha"
                )));
            }
            let oid = ObjectId::from_slice(&content[oid_start..oid_start + oid_len]).expect(
                "slice length checked against oid_len above",
            );

            entries.push(TreeEntry { mode, name, oid });
            pos = oid_start + oid_len;
        }

        Ok(Self { entries })
    }

    /// Canonical order, mandatory space between mode and path.
    pub fn serialize_content(&self) -> Vec<u8> {
        let mut sorted = self.entries.clone();
        sorted.sort();

        let mut out = Vec::new();
        for entry in &sorted {
            out.extend_from_slice(&entry.mode.as_bytes());
            out.push(b' ');
            out.extend_from_slice(&entry.name);
            out.push(0);
            out.extend_from_slice(entry.oid.as_bytes());
        }
        out
    }

    pub fn sort(&mut self) {
        self.entries.sort();
    }

    pub fn find(&self, name: &BStr) -> Option<&TreeEntry> {
        self.entries.iter().find(|e| e.name.as_bstr() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(hex: &str) -> ObjectId {
        ObjectId::from_hex(hex).unwrap()
    }

    #[test]
    fn file_mode_roundtrip() {
        for mode in [
            FileMode::Regular,
            FileMode::Executable,
            FileMode::Symlink,
            FileMode::Gitlink,
            FileMode::Tree,
        ] {
            assert_eq!(FileMode::from_bytes(&mode.as_bytes()).unwrap(), mode);
        }
    }

    #[test]
    fn tree_mode_has_five_digits() {
        assert_eq!(FileMode::Tree.as_bytes(), "40000");
        assert_eq!(FileMode::Regular.as_bytes(), "100644");
    }

    #[test]
    fn directory_sorts_with_implied_trailing_slash() {
        // "a" (file) < "a.b/" (dir) because '.' < '/'.
        let file = TreeEntry {
            mode: FileMode::Regular,
            name: BString::from("a"),
            oid: oid("0000000000000000000000000000000000000001"),
        };
        let dir = TreeEntry {
            mode: FileMode::Tree,
            name: BString::from("a.b"),
            oid: oid("0000000000000000000000000000000000000002"),
        };
        assert_eq!(TreeEntry::cmp_entries(&file, &dir), Ordering::Less);
    }

    #[test]
    fn parse_empty_tree() {
        assert!(Tree::parse(b"").unwrap().is_empty());
    }

    #[test]
    fn serialize_includes_mandatory_space() {
        let tree = Tree {
            entries: vec![TreeEntry {
                mode: FileMode::Regular,
                name: BString::from("a"),
                oid: oid("da39a3ee5e6b4b0d3255bfef95601890afd80709"),
            }],
        };
        let bytes = tree.serialize_content();
        assert!(bytes.starts_with(b"100644 a\0"));
    }

    #[test]
    fn serialize_then_parse_roundtrips() {
        let tree = Tree {
            entries: vec![
                TreeEntry {
                    mode: FileMode::Regular,
                    name: BString::from("b.txt"),
                    oid: oid("da39a3ee5e6b4b0d3255bfef95601890afd80709"),
                },
                TreeEntry {
                    mode: FileMode::Tree,
                    name: BString::from("a-dir"),
                    oid: oid("0000000000000000000000000000000000000001"),
                },
            ],
        };
        let serialized = tree.serialize_content();
        let parsed = Tree::parse(&serialized).unwrap();
        assert_eq!(parsed.entries[0].name, "a-dir");
        assert_eq!(parsed.entries[1].name, "b.txt");
        assert_eq!(parsed.serialize_content(), serialized);
    }
}
