//! Key-value list with message: the ordered, repeatable-key byte map
//! underlying commit and tag objects.
//!
//! Keys appear in insertion order and may repeat (`parent` on a merge
//! commit); values are stored one pair per occurrence so nothing needs to
//! be deduplicated. A distinguished message body follows the first blank
//! line and is preserved verbatim.

use bstr::{BStr, BString, ByteSlice};

use crate::ObjectError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Kvlm {
    pairs: Vec<(BString, BString)>,
    pub message: BString,
}

impl Kvlm {
    pub fn new() -> Self {
        Self::default()
    }

    /// First value for `key`, if any.
    pub fn get(&self, key: &[u8]) -> Option<&BStr> {
        self.pairs
            .iter()
            .find(|(k, _)| k.as_slice() == key)
            .map(|(_, v)| v.as_bstr())
    }

    /// All values for `key`, in insertion order.
    pub fn get_all(&self, key: &[u8]) -> Vec<&BStr> {
        self.pairs
            .iter()
            .filter(|(k, _)| k.as_slice() == key)
            .map(|(_, v)| v.as_bstr())
            .collect()
    }

    /// Append a key/value pair. Does not overwrite or deduplicate existing
    /// pairs for the same key; this is how repeated keys accumulate.
    pub fn push(&mut self, key: impl Into<BString>, value: impl Into<BString>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BStr, &BStr)> {
        self.pairs.iter().map(|(k, v)| (k.as_bstr(), v.as_bstr()))
    }

    /// Parse a KVLM from raw object content.
    ///
    /// Continuation lines (`\n `) inside a value collapse to a bare `\n`
    /// in the stored value; `serialize` re-inserts them.
    pub fn parse(content: &[u8]) -> Result<Self, ObjectError> {
        let mut pairs = Vec::new();
        let mut pos = 0;

        loop {
            if pos >= content.len() {
                return Ok(Self {
                    pairs,
                    message: BString::from(Vec::new()),
                });
            }

            if content[pos] == b'\n' {
                pos += 1;
                break;
            }

            let space_pos = content[pos..]
                .iter()
                .position(|&b| b == b' ')
                .map(|p| p + pos)
                .ok_or_else(|| {
                    ObjectError::Malformed("kvlm: header line missing a key/value separator".into())
                })?;
            let key = &content[pos..space_pos];

            // The value ends at the first '\n' not followed by a space;
            // such a following space marks a continuation line.
            let mut end = space_pos + 1;
            loop {
                let nl = content[end..]
                    .iter()
                    .position(|&b| b == b'\n')
                    .map(|p| p + end)
                    .ok_or_else(|| {
                        ObjectError::Malformed("kvlm: header value missing terminating newline".into())
                    })?;
                if nl + 1 < content.len() && content[nl + 1] == b' ' {
                    end = nl + 1;
                    continue;
                }
                end = nl;
                break;
            }

            let raw_value = &content[space_pos + 1..end];
            let value = raw_value.replace(b"\n ", b"\n");
            pairs.push((BString::from(key), BString::from(value)));
            pos = end + 1;
        }

        let message = BString::from(&content[pos..]);
        Ok(Self { pairs, message })
    }

    /// Serialize back to raw object content, re-expanding continuation
    /// lines and terminating with a blank line before the message.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (key, value) in &self.pairs {
            out.extend_from_slice(key);
            out.push(b' ');
            out.extend_from_slice(&value.replace(b"\n", b"\n "));
            out.push(b'\n');
        }
        out.push(b'\n');
        out.extend_from_slice(&self.message);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple() {
        let data = b"tree abc\nauthor me\n\nhello\n";
        let kvlm = Kvlm::parse(data).unwrap();
        assert_eq!(kvlm.get(b"tree").unwrap(), "abc");
        assert_eq!(kvlm.get(b"author").unwrap(), "me");
        assert_eq!(kvlm.message, "hello\n");
    }

    #[test]
    fn repeated_keys_preserved_in_order() {
        let data = b"parent a\nparent b\n\nmsg\n";
        let kvlm = Kvlm::parse(data).unwrap();
        assert_eq!(kvlm.get_all(b"parent"), vec!["a", "b"]);
    }

    #[test]
    fn continuation_lines_collapse_and_expand() {
        let data = b"gpgsig line one\n line two\n line three\n\nmsg\n";
        let kvlm = Kvlm::parse(data).unwrap();
        assert_eq!(
            kvlm.get(b"gpgsig").unwrap(),
            "line one\nline two\nline three"
        );
        assert_eq!(kvlm.serialize(), data);
    }

    #[test]
    fn roundtrip_preserves_bytes() {
        let data = b"tree abc\nparent 1\nparent 2\nauthor me <a@b> 1 +0000\n\nSubject\n\nBody.\n";
        let kvlm = Kvlm::parse(data).unwrap();
        assert_eq!(kvlm.serialize(), data.to_vec());
    }

    #[test]
    fn empty_message_body() {
        let data = b"tree abc\n\n";
        let kvlm = Kvlm::parse(data).unwrap();
        assert!(kvlm.message.is_empty());
        assert_eq!(kvlm.serialize(), data);
    }
}
