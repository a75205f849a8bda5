use crate::{ObjectError, ObjectKind};

/// Parse an object header: `"<kind> <size>\0"`.
///
/// Returns `(kind, declared_size, header_len)` where `header_len` includes
/// the NUL terminator. `declared_size` is validated against the actual
/// payload length by the caller, which is the one place that knows it.
pub fn parse_header(data: &[u8]) -> Result<(ObjectKind, usize, usize), ObjectError> {
    let space_pos = data
        .iter()
        .position(|&b| b == b' ')
        .ok_or_else(|| ObjectError::Malformed("missing space in object header".into()))?;

    let null_pos = data[space_pos..]
        .iter()
        .position(|&b| b == 0)
        .map(|p| p + space_pos)
        .ok_or_else(|| ObjectError::Malformed("missing null terminator in object header".into()))?;

    let kind_bytes = &data[..space_pos];
    let size_bytes = &data[space_pos + 1..null_pos];

    let kind = ObjectKind::from_bytes(kind_bytes)?;

    let size_str = std::str::from_utf8(size_bytes)
        .map_err(|_| ObjectError::Malformed("non-ASCII size in object header".into()))?;
    let declared_size: usize = size_str
        .parse()
        .map_err(|_| ObjectError::Malformed(format!("invalid size in object header: {size_str}")))?;

    Ok((kind, declared_size, null_pos + 1))
}

/// Write `"<kind> <size>\0"`.
pub fn write_header(kind: ObjectKind, content_size: usize) -> Vec<u8> {
    format!("{kind} {content_size}\0").into_bytes()
}
