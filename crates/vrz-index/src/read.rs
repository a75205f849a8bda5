//! Index file parsing: `DIRC`, version 2, fixed 62-byte entry prefix.

use bstr::BString;
use vrz_hash::ObjectId;
use vrz_object::FileMode;

use crate::entry::{IndexEntry, StatData};
use crate::{Index, IndexError};

const SIGNATURE: &[u8; 4] = b"DIRC";
const HEADER_LEN: usize = 12;
const ENTRY_PREFIX_LEN: usize = 62;

pub fn parse_index(data: &[u8]) -> Result<Index, IndexError> {
    if data.len() < HEADER_LEN {
        return Err(IndexError::InvalidHeader("index file too short".into()));
    }

    if &data[..4] != SIGNATURE {
        return Err(IndexError::InvalidHeader(format!(
            "bad signature: expected DIRC, got {:?}",
            &data[..4]
        )));
    }

    let version = read_u32(&data[4..8]);
    if version != 2 {
        return Err(IndexError::UnsupportedVersion(version));
    }

    let entry_count = read_u32(&data[8..12]) as usize;

    let mut cursor = HEADER_LEN;
    let mut entries = Vec::with_capacity(entry_count);

    for _ in 0..entry_count {
        let (entry, next) = parse_entry(data, cursor)?;
        entries.push(entry);
        cursor = next;
    }

    Ok(Index { entries })
}

fn parse_entry(data: &[u8], start: usize) -> Result<(IndexEntry, usize), IndexError> {
    if start + ENTRY_PREFIX_LEN > data.len() {
        return Err(IndexError::InvalidEntry {
            offset: start,
            reason: "entry too short".into(),
        });
    }

    let stat = StatData {
        ctime_secs: read_u32(&data[start..start + 4]),
        ctime_nsecs: read_u32(&data[start + 4..start + 8]),
        mtime_secs: read_u32(&data[start + 8..start + 12]),
        mtime_nsecs: read_u32(&data[start + 12..start + 16]),
        dev: read_u32(&data[start + 16..start + 20]),
        ino: read_u32(&data[start + 20..start + 24]),
        uid: read_u32(&data[start + 28..start + 32]),
        gid: read_u32(&data[start + 32..start + 36]),
        size: read_u32(&data[start + 36..start + 40]),
    };

    let mode_raw = read_u32(&data[start + 24..start + 28]);
    if mode_raw & !0xFFFF != 0 {
        return Err(IndexError::InvalidEntry {
            offset: start,
            reason: "non-zero unused bits in mode field".into(),
        });
    }
    let mode = FileMode::from_raw(mode_raw);

    let oid_start = start + 40;
    let oid = ObjectId::from_slice(&data[oid_start..oid_start + 20]).ok_or_else(|| {
        IndexError::InvalidEntry {
            offset: start,
            reason: "truncated sha".into(),
        }
    })?;

    let flags_start = oid_start + 20;
    let flags = read_u16(&data[flags_start..flags_start + 2]);
    let assume_valid = flags & 0x8000 != 0;
    let extended = flags & 0x4000 != 0;
    if extended {
        return Err(IndexError::InvalidEntry {
            offset: start,
            reason: "extended flag must be 0".into(),
        });
    }
    let stage = ((flags >> 12) & 0x3) as u8;
    let name_length = (flags & 0x0FFF) as usize;

    let name_start = flags_start + 2;
    let (path, name_end) = if name_length < 0xFFF {
        if data.get(name_start + name_length) != Some(&0) {
            return Err(IndexError::InvalidEntry {
                offset: start,
                reason: "missing NUL terminator after name".into(),
            });
        }
        (
            BString::from(&data[name_start..name_start + name_length]),
            name_start + name_length + 1,
        )
    } else {
        let nul_pos = data[name_start..]
            .iter()
            .position(|&b| b == 0)
            .map(|p| name_start + p)
            .ok_or_else(|| IndexError::InvalidEntry {
                offset: start,
                reason: "missing NUL terminator after name".into(),
            })?;
        (BString::from(&data[name_start..nul_pos]), nul_pos + 1)
    };

    let padded_end = start + (((name_end - start) + 7) & !7);

    let entry = IndexEntry {
        path,
        oid,
        mode,
        stage,
        stat,
        assume_valid,
    };

    Ok((entry, padded_end))
}

fn read_u32(data: &[u8]) -> u32 {
    u32::from_be_bytes([data[0], data[1], data[2], data[3]])
}

fn read_u16(data: &[u8]) -> u16 {
    u16::from_be_bytes([data[0], data[1]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::write::serialize_index;

    fn sample_entry(path: &str) -> IndexEntry {
        IndexEntry {
            path: BString::from(path),
            oid: ObjectId::from_hex("da39a3ee5e6b4b0d3255bfef95601890afd80709").unwrap(),
            mode: FileMode::Regular,
            stage: 0,
            stat: StatData::default(),
            assume_valid: false,
        }
    }

    #[test]
    fn rejects_bad_signature() {
        let err = parse_index(b"XXXX\0\0\0\x02\0\0\0\0").unwrap_err();
        assert!(matches!(err, IndexError::InvalidHeader(_)));
    }

    #[test]
    fn rejects_unsupported_version() {
        let mut data = SIGNATURE.to_vec();
        data.extend_from_slice(&3u32.to_be_bytes());
        data.extend_from_slice(&0u32.to_be_bytes());
        let err = parse_index(&data).unwrap_err();
        assert!(matches!(err, IndexError::UnsupportedVersion(3)));
    }

    #[test]
    fn roundtrips_through_write_and_read() {
        let index = Index {
            entries: vec![sample_entry("a.txt"), sample_entry("b/c.txt")],
        };
        let bytes = serialize_index(&index);
        let parsed = parse_index(&bytes).unwrap();
        assert_eq!(parsed.entries, index.entries);
    }

    #[test]
    fn name_at_sentinel_boundary_reads_up_to_subsequent_nul() {
        // A name of exactly 0xFFF bytes exercises the sentinel path.
        let long_name = "a/".repeat(0xFFF / 2) + "x";
        let index = Index {
            entries: vec![sample_entry(&long_name)],
        };
        let bytes = serialize_index(&index);
        let parsed = parse_index(&bytes).unwrap();
        assert_eq!(parsed.entries[0].path, BString::from(long_name));
    }
}
