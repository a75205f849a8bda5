//! Hex-prefix candidate search within `objects/`: the first two characters
//! name a fan-out directory, the rest are matched as a filename prefix.

use std::fs;
use std::path::Path;

use vrz_hash::ObjectId;

/// Every object whose sha starts with `prefix` (already validated to be
/// `[0-9a-f]{4,40}` and lowercased by the caller).
pub fn match_prefix(objects_dir: &Path, prefix: &str) -> std::io::Result<Vec<ObjectId>> {
    if prefix.len() < 2 {
        return Ok(Vec::new());
    }
    let (dir_part, rest) = prefix.split_at(2);
    let dir = objects_dir.join(dir_part);

    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut matches = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.starts_with(rest) {
            let hex = format!("{dir_part}{name}");
            if let Ok(oid) = ObjectId::from_hex(&hex) {
                matches.push(oid);
            }
        }
    }
    Ok(matches)
}
