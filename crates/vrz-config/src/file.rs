//! A single INI-like config file: `[section]` headers, `key = value`
//! lines, `#`/`;` comments. No subsections, no quoting, no includes — vrz
//! only ever needs flat `[core]`/`[user]` sections.

use std::collections::BTreeMap;

use bstr::ByteSlice;

use crate::error::ConfigError;

#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl ConfigFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(input: &[u8]) -> Result<Self, ConfigError> {
        let mut file = Self::new();
        let mut section: Option<String> = None;

        for (idx, raw_line) in input.lines().enumerate() {
            let line_number = idx + 1;
            let line = raw_line.to_str().map_err(|_| ConfigError::Parse {
                line: line_number,
                message: "non-UTF-8 config line".into(),
            })?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(body) = line.strip_prefix('[') {
                let name = body.strip_suffix(']').ok_or_else(|| ConfigError::Parse {
                    line: line_number,
                    message: "unterminated section header".into(),
                })?;
                if name.is_empty() {
                    return Err(ConfigError::Parse {
                        line: line_number,
                        message: "empty section name".into(),
                    });
                }
                section = Some(name.trim().to_ascii_lowercase());
                continue;
            }

            let Some(current) = section.as_ref() else {
                return Err(ConfigError::Parse {
                    line: line_number,
                    message: "key-value line outside of any section".into(),
                });
            };

            let (key, value) = line.split_once('=').ok_or_else(|| ConfigError::Parse {
                line: line_number,
                message: "expected 'key = value'".into(),
            })?;
            let key = key.trim().to_ascii_lowercase();
            if key.is_empty() {
                return Err(ConfigError::Parse {
                    line: line_number,
                    message: "empty key name".into(),
                });
            }
            file.set(current, &key, value.trim());
        }

        Ok(file)
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(&section.to_ascii_lowercase())?
            .get(&key.to_ascii_lowercase())
            .map(|s| s.as_str())
    }

    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        self.sections
            .entry(section.to_ascii_lowercase())
            .or_default()
            .insert(key.to_ascii_lowercase(), value.into());
    }

    /// Render back to `[section]` / `key = value` form, sections and keys
    /// in sorted order (deterministic; vrz never needs to preserve
    /// original file layout since it only ever writes its own defaults).
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (section, entries) in &self.sections {
            out.push('[');
            out.push_str(section);
            out.push_str("]\n");
            for (key, value) in entries {
                out.push('\t');
                out.push_str(key);
                out.push_str(" = ");
                out.push_str(value);
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_section_and_keys() {
        let file = ConfigFile::parse(b"[core]\n\trepositoryformatversion = 0\n\tfilemode = false\n").unwrap();
        assert_eq!(file.get("core", "repositoryformatversion"), Some("0"));
        assert_eq!(file.get("core", "filemode"), Some("false"));
    }

    #[test]
    fn section_and_key_names_are_case_insensitive() {
        let file = ConfigFile::parse(b"[User]\n\tName = Ada\n").unwrap();
        assert_eq!(file.get("user", "name"), Some("Ada"));
        assert_eq!(file.get("USER", "NAME"), Some("Ada"));
    }

    #[test]
    fn ignores_comments_and_blank_lines() {
        let file = ConfigFile::parse(b"# comment\n\n[core]\n; another comment\n\tbare = false\n").unwrap();
        assert_eq!(file.get("core", "bare"), Some("false"));
    }

    #[test]
    fn rejects_key_before_any_section() {
        assert!(ConfigFile::parse(b"name = Ada\n").is_err());
    }

    #[test]
    fn rejects_malformed_section_header() {
        assert!(ConfigFile::parse(b"[core\n").is_err());
    }

    #[test]
    fn serialize_then_reparse_roundtrips() {
        let mut file = ConfigFile::new();
        file.set("core", "repositoryformatversion", "0");
        file.set("core", "filemode", "false");
        let text = file.serialize();
        let reparsed = ConfigFile::parse(text.as_bytes()).unwrap();
        assert_eq!(reparsed.get("core", "repositoryformatversion"), Some("0"));
        assert_eq!(reparsed.get("core", "filemode"), Some("false"));
    }
}
