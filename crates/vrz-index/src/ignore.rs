//! Ignore resolution: absolute rule sets (`.vrz/info/exclude`, XDG global)
//! plus scoped rule sets keyed by directory, from tracked `.vrzignore`
//! blobs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use bstr::{BStr, BString, ByteSlice};
use vrz_utils::wildmatch::{wildmatch, WildmatchFlags};

use crate::IndexError;

/// A single `(pattern, polarity)` rule. `polarity` true means "ignore".
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    pub pattern: BString,
    pub polarity: bool,
}

fn parse_line(line: &[u8]) -> Option<IgnoreRule> {
    let mut line = line.trim_end();
    if line.is_empty() || line[0] == b'#' {
        return None;
    }

    let polarity = if line[0] == b'!' {
        line = &line[1..];
        false
    } else {
        true
    };

    let line = if line.first() == Some(&b'\\') && matches!(line.get(1), Some(b'#') | Some(b'!')) {
        &line[1..]
    } else {
        line
    };

    if line.is_empty() {
        return None;
    }

    Some(IgnoreRule {
        pattern: BString::from(line),
        polarity,
    })
}

fn parse_rules(content: &[u8]) -> Vec<IgnoreRule> {
    content.lines().filter_map(parse_line).collect()
}

/// Last-match-wins evaluation of a rule list against a filename.
fn resolve(rules: &[IgnoreRule], name: &BStr) -> Option<bool> {
    let mut result = None;
    for rule in rules {
        if wildmatch(rule.pattern.as_ref(), name, WildmatchFlags::empty()) {
            result = Some(rule.polarity);
        }
    }
    result
}

/// The two rule sets `status` and `checkout` consult to classify untracked
/// files.
#[derive(Debug, Clone, Default)]
pub struct IgnoreResolver {
    absolute: Vec<Vec<IgnoreRule>>,
    scoped: HashMap<PathBuf, Vec<IgnoreRule>>,
}

impl IgnoreResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an absolute rule set, e.g. from `.vrz/info/exclude` or the XDG
    /// global ignore file. Order matters: later calls win ties.
    pub fn add_absolute(&mut self, content: &[u8]) {
        self.absolute.push(parse_rules(content));
    }

    /// Associate a tracked `.vrzignore` blob's rules with the directory it
    /// lives in.
    pub fn add_scoped(&mut self, dir: impl Into<PathBuf>, content: &[u8]) {
        self.scoped.insert(dir.into(), parse_rules(content));
    }

    /// Decide whether `path` (repository-relative) is ignored.
    pub fn is_ignored(&self, path: &Path) -> Result<bool, IndexError> {
        if path.is_absolute() {
            return Err(IndexError::AbsolutePathNotAllowed(path.to_path_buf()));
        }

        let name = BString::from(path.to_string_lossy().into_owned());

        let mut dir = path.parent();
        while let Some(d) = dir {
            if let Some(rules) = self.scoped.get(d) {
                if let Ok(rel) = path.strip_prefix(d) {
                    let rel_name = BString::from(rel.to_string_lossy().into_owned());
                    if let Some(polarity) = resolve(rules, rel_name.as_ref()) {
                        return Ok(polarity);
                    }
                }
            }
            if d.as_os_str().is_empty() {
                break;
            }
            dir = d.parent();
        }

        // Last-match-wins across the *whole* ordered sequence of absolute
        // rule sets, not just within one set: a later set's rule overrides
        // an earlier set's, same as two rules in a single file would.
        let mut result = None;
        for rules in &self.absolute {
            if let Some(polarity) = resolve(rules, name.as_ref()) {
                result = Some(polarity);
            }
        }

        Ok(result.unwrap_or(false))
    }
}
