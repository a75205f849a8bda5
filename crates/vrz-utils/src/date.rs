//! Commit/tag timestamps and author/committer identities.
//!
//! vrz only ever needs to stamp the current moment (on `commit`/`tag -a`)
//! and to parse a signature line back out of a stored commit or tag, so
//! this is a deliberately smaller surface than a general git date library:
//! no relative/approxidate parsing, no output format switch.

use bstr::{BStr, BString, ByteSlice, ByteVec};
use chrono::Local;

use crate::error::UtilError;
use crate::Result;

/// A Unix timestamp plus a `±HHMM`-style timezone offset, stored in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GitDate {
    pub timestamp: i64,
    pub tz_offset: i32,
}

fn tz_offset_to_minutes(tz: i32) -> i32 {
    let sign = if tz < 0 { -1 } else { 1 };
    let abs = tz.unsigned_abs() as i32;
    sign * ((abs / 100) * 60 + abs % 100)
}

fn minutes_to_tz_offset(minutes: i32) -> i32 {
    let sign = if minutes < 0 { -1 } else { 1 };
    let abs = minutes.unsigned_abs() as i32;
    sign * ((abs / 60) * 100 + abs % 60)
}

impl GitDate {
    pub fn new(timestamp: i64, tz_offset_minutes: i32) -> Self {
        Self {
            timestamp,
            tz_offset: tz_offset_minutes,
        }
    }

    /// The current moment, in the local timezone.
    pub fn now() -> Self {
        let now = Local::now();
        let offset_minutes = now.offset().local_minus_utc() / 60;
        Self {
            timestamp: now.timestamp(),
            tz_offset: offset_minutes,
        }
    }

    /// Parse `"<unix-seconds> <±HHMM>"`, the form a commit/tag header stores.
    pub fn parse_raw(input: &str) -> Result<Self> {
        let input = input.trim();
        let mut parts = input.splitn(2, ' ');
        let ts_str = parts
            .next()
            .ok_or_else(|| UtilError::DateParse("empty date".into()))?;
        let timestamp: i64 = ts_str
            .parse()
            .map_err(|_| UtilError::DateParse(format!("invalid timestamp: '{ts_str}'")))?;

        let tz_offset = match parts.next() {
            Some(tz_str) => {
                let tz_str = tz_str.trim();
                let tz_int: i32 = tz_str
                    .parse()
                    .map_err(|_| UtilError::DateParse(format!("invalid timezone: '{tz_str}'")))?;
                tz_offset_to_minutes(tz_int)
            }
            None => 0,
        };

        Ok(Self {
            timestamp,
            tz_offset,
        })
    }

    /// Render as `"<unix-seconds> <±HHMM>"`.
    pub fn to_raw(self) -> String {
        let tz = minutes_to_tz_offset(self.tz_offset);
        format!("{} {:+05}", self.timestamp, tz)
    }
}

/// Author/committer identity with timestamp, as stored in commit and tag headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: BString,
    pub email: BString,
    pub date: GitDate,
}

impl Signature {
    /// Parse `Name <email> timestamp tz`. The name is split on the last
    /// `<`/`>` pair so names that themselves contain angle brackets still
    /// parse correctly.
    pub fn parse(input: &BStr) -> Result<Self> {
        let bytes = input.as_bytes();

        let gt_pos = bytes
            .iter()
            .rposition(|&b| b == b'>')
            .ok_or_else(|| UtilError::DateParse("missing '>' in signature".into()))?;
        let lt_pos = bytes[..gt_pos]
            .iter()
            .rposition(|&b| b == b'<')
            .ok_or_else(|| UtilError::DateParse("missing '<' in signature".into()))?;

        let name = bytes[..lt_pos].trim();
        let email = &bytes[lt_pos + 1..gt_pos];
        let date_str = bytes[gt_pos + 1..].trim();
        let date_str = std::str::from_utf8(date_str)
            .map_err(|_| UtilError::DateParse("non-UTF-8 date in signature".into()))?;

        let date = GitDate::parse_raw(date_str)?;

        Ok(Self {
            name: BString::from(name),
            email: BString::from(email),
            date,
        })
    }

    /// Format as `Name <email> timestamp tz`.
    pub fn to_bytes(&self) -> BString {
        let mut out = BString::new(Vec::new());
        out.push_str(&self.name);
        out.push_str(b" <");
        out.push_str(&self.email);
        out.push_str(b"> ");
        out.push_str(self.date.to_raw().as_bytes());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_raw_positive_and_negative_tz() {
        let d = GitDate::parse_raw("1234567890 -0500").unwrap();
        assert_eq!(d.timestamp, 1234567890);
        assert_eq!(d.tz_offset, -300);

        let d = GitDate::parse_raw("1234567890 +0530").unwrap();
        assert_eq!(d.tz_offset, 330);
    }

    #[test]
    fn to_raw_roundtrip() {
        let d = GitDate::new(1234567890, -300);
        assert_eq!(d.to_raw(), "1234567890 -0500");
        assert_eq!(GitDate::parse_raw(&d.to_raw()).unwrap(), d);
    }

    #[test]
    fn signature_parse_and_roundtrip() {
        let input = BStr::new(b"John Doe <john@example.com> 1234567890 +0000");
        let sig = Signature::parse(input).unwrap();
        assert_eq!(sig.name, BString::from("John Doe"));
        assert_eq!(sig.email, BString::from("john@example.com"));
        assert_eq!(sig.date, GitDate::new(1234567890, 0));

        let bytes = sig.to_bytes();
        assert_eq!(bytes, BString::from(input.to_vec()));
    }

    #[test]
    fn signature_with_angle_bracket_in_name_rejected_gracefully() {
        // Name containing '<'/'>' is unusual but the rightmost pair still
        // delimits the email correctly.
        let input = BStr::new(b"A <B> Corp <corp@example.com> 1 +0000");
        let sig = Signature::parse(input).unwrap();
        assert_eq!(sig.name, BString::from("A <B> Corp"));
        assert_eq!(sig.email, BString::from("corp@example.com"));
    }
}
