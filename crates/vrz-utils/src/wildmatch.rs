//! Glob matching for `.vrzignore` patterns, a faithful port of C git's
//! `wildmatch`/`dowild` (fnmatch with `**` support).

use bstr::{BStr, BString, ByteSlice};

bitflags::bitflags! {
    /// Flags controlling wildmatch behavior.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct WildmatchFlags: u32 {
        /// Case-insensitive matching.
        const CASEFOLD = 0x01;
        /// Don't match '/' with wildcards (pathname mode).
        const PATHNAME = 0x02;
    }
}

const WM_MATCH: i32 = 0;
const WM_NOMATCH: i32 = 1;
const WM_ABORT_ALL: i32 = -1;
const WM_ABORT_TO_STARSTAR: i32 = -2;

fn is_glob_special(c: u8) -> bool {
    matches!(c, b'*' | b'?' | b'[' | b'\\')
}

fn dowild(pattern: &[u8], text: &[u8], flags: WildmatchFlags) -> i32 {
    let mut pi = 0;
    let mut ti = 0;
    let pattern_start = 0;

    while pi < pattern.len() {
        let mut p_ch = pattern[pi];
        let t_ch = if ti < text.len() {
            text[ti]
        } else if p_ch != b'*' {
            return WM_ABORT_ALL;
        } else {
            0
        };

        let t_ch_cmp = if flags.contains(WildmatchFlags::CASEFOLD) && t_ch.is_ascii_uppercase() {
            t_ch.to_ascii_lowercase()
        } else {
            t_ch
        };
        let p_ch_cmp = if flags.contains(WildmatchFlags::CASEFOLD) && p_ch.is_ascii_uppercase() {
            p_ch.to_ascii_lowercase()
        } else {
            p_ch
        };

        match p_ch {
            b'\\' => {
                pi += 1;
                if pi >= pattern.len() {
                    return WM_ABORT_ALL;
                }
                p_ch = pattern[pi];
                let p_ch_esc = if flags.contains(WildmatchFlags::CASEFOLD)
                    && p_ch.is_ascii_uppercase()
                {
                    p_ch.to_ascii_lowercase()
                } else {
                    p_ch
                };
                if t_ch_cmp != p_ch_esc {
                    return WM_NOMATCH;
                }
                ti += 1;
                pi += 1;
            }
            b'?' => {
                if flags.contains(WildmatchFlags::PATHNAME) && t_ch == b'/' {
                    return WM_NOMATCH;
                }
                ti += 1;
                pi += 1;
            }
            b'*' => {
                return handle_star(pattern, pi, text, ti, flags, pattern_start);
            }
            b'[' => {
                let result = handle_bracket(pattern, &mut pi, t_ch, t_ch_cmp, flags);
                if result != WM_MATCH {
                    return result;
                }
                ti += 1;
                pi += 1;
            }
            _ => {
                if t_ch_cmp != p_ch_cmp {
                    return WM_NOMATCH;
                }
                ti += 1;
                pi += 1;
            }
        }
    }

    if ti < text.len() {
        WM_NOMATCH
    } else {
        WM_MATCH
    }
}

fn handle_star(
    pattern: &[u8],
    mut pi: usize,
    text: &[u8],
    mut ti: usize,
    flags: WildmatchFlags,
    pattern_start: usize,
) -> i32 {
    pi += 1;
    let match_slash;

    if pi < pattern.len() && pattern[pi] == b'*' {
        let prev_p = pi;
        while pi < pattern.len() && pattern[pi] == b'*' {
            pi += 1;
        }

        if !flags.contains(WildmatchFlags::PATHNAME) {
            match_slash = true;
        } else if (prev_p.wrapping_sub(pattern_start) < 2
            || pattern[prev_p.wrapping_sub(2)] == b'/')
            && (pi >= pattern.len()
                || pattern[pi] == b'/'
                || (pi + 1 < pattern.len() && pattern[pi] == b'\\' && pattern[pi + 1] == b'/'))
        {
            if pi < pattern.len()
                && pattern[pi] == b'/'
                && dowild(&pattern[pi + 1..], &text[ti..], flags) == WM_MATCH
            {
                return WM_MATCH;
            }
            match_slash = true;
        } else {
            match_slash = false;
        }
    } else {
        match_slash = !flags.contains(WildmatchFlags::PATHNAME);
    }

    if pi >= pattern.len() {
        if !match_slash && text[ti..].contains(&b'/') {
            return WM_ABORT_TO_STARSTAR;
        }
        return WM_MATCH;
    }

    if !match_slash && pi < pattern.len() && pattern[pi] == b'/' {
        if let Some(pos) = text[ti..].iter().position(|&b| b == b'/') {
            ti += pos;
            ti += 1;
            pi += 1;
            return dowild(&pattern[pi..], &text[ti..], flags);
        } else {
            return WM_ABORT_ALL;
        }
    }

    while ti < text.len() {
        if pi < pattern.len() && !is_glob_special(pattern[pi]) {
            let mut p_ch = pattern[pi];
            if flags.contains(WildmatchFlags::CASEFOLD) && p_ch.is_ascii_uppercase() {
                p_ch = p_ch.to_ascii_lowercase();
            }
            while ti < text.len() && (match_slash || text[ti] != b'/') {
                let mut tc = text[ti];
                if flags.contains(WildmatchFlags::CASEFOLD) && tc.is_ascii_uppercase() {
                    tc = tc.to_ascii_lowercase();
                }
                if tc == p_ch {
                    break;
                }
                ti += 1;
            }
            if ti >= text.len() || {
                let mut tc = text[ti];
                if flags.contains(WildmatchFlags::CASEFOLD) && tc.is_ascii_uppercase() {
                    tc = tc.to_ascii_lowercase();
                }
                tc != p_ch
            } {
                if match_slash {
                    return WM_ABORT_ALL;
                } else {
                    return WM_ABORT_TO_STARSTAR;
                }
            }
        }

        let matched = dowild(&pattern[pi..], &text[ti..], flags);
        if matched != WM_NOMATCH {
            if !match_slash || matched != WM_ABORT_TO_STARSTAR {
                return matched;
            }
        } else if !match_slash && text[ti] == b'/' {
            return WM_ABORT_TO_STARSTAR;
        }
        ti += 1;
    }

    WM_ABORT_ALL
}

fn handle_bracket(
    pattern: &[u8],
    pi: &mut usize,
    t_ch: u8,
    t_ch_cmp: u8,
    flags: WildmatchFlags,
) -> i32 {
    *pi += 1;
    if *pi >= pattern.len() {
        return WM_ABORT_ALL;
    }

    let mut p_ch = pattern[*pi];
    if p_ch == b'^' {
        p_ch = b'!';
    }
    let negated = p_ch == b'!';
    if negated {
        *pi += 1;
        if *pi >= pattern.len() {
            return WM_ABORT_ALL;
        }
        p_ch = pattern[*pi];
    }

    let mut matched = false;
    let mut prev_ch: u8 = 0;

    loop {
        if *pi >= pattern.len() || p_ch == 0 {
            return WM_ABORT_ALL;
        }

        if p_ch == b'\\' {
            *pi += 1;
            if *pi >= pattern.len() {
                return WM_ABORT_ALL;
            }
            p_ch = pattern[*pi];
            if t_ch_cmp == p_ch
                || (flags.contains(WildmatchFlags::CASEFOLD)
                    && t_ch_cmp == p_ch.to_ascii_lowercase())
            {
                matched = true;
            }
        } else if p_ch == b'-' && prev_ch != 0 && *pi + 1 < pattern.len() && pattern[*pi + 1] != b']'
        {
            *pi += 1;
            p_ch = pattern[*pi];
            if p_ch == b'\\' {
                *pi += 1;
                if *pi >= pattern.len() {
                    return WM_ABORT_ALL;
                }
                p_ch = pattern[*pi];
            }
            if t_ch_cmp <= p_ch && t_ch_cmp >= prev_ch {
                matched = true;
            } else if flags.contains(WildmatchFlags::CASEFOLD) && t_ch.is_ascii_lowercase() {
                let t_upper = t_ch.to_ascii_uppercase();
                if t_upper <= p_ch && t_upper >= prev_ch {
                    matched = true;
                }
            }
            p_ch = 0;
        } else if p_ch == b'[' && *pi + 1 < pattern.len() && pattern[*pi + 1] == b':' {
            let class_start = *pi + 2;
            let mut end = class_start;
            while end < pattern.len() && pattern[end] != b']' {
                end += 1;
            }
            if end >= pattern.len() {
                return WM_ABORT_ALL;
            }
            let class_len = end - class_start - 1;
            if end == 0 || pattern[end - 1] != b':' {
                if t_ch_cmp == b'[' {
                    matched = true;
                }
            } else {
                let class_name = &pattern[class_start..class_start + class_len];
                if match_char_class(class_name, t_ch_cmp, flags) {
                    matched = true;
                }
                *pi = end;
                p_ch = 0;
            }
        } else if t_ch_cmp == p_ch
            || (flags.contains(WildmatchFlags::CASEFOLD) && t_ch_cmp == p_ch.to_ascii_lowercase())
        {
            matched = true;
        }

        prev_ch = p_ch;
        *pi += 1;
        if *pi >= pattern.len() {
            return WM_ABORT_ALL;
        }
        p_ch = pattern[*pi];

        if p_ch == b']' {
            break;
        }
    }

    if matched == negated || (flags.contains(WildmatchFlags::PATHNAME) && t_ch == b'/') {
        return WM_NOMATCH;
    }

    WM_MATCH
}

fn match_char_class(class: &[u8], ch: u8, flags: WildmatchFlags) -> bool {
    match class {
        b"alnum" => ch.is_ascii_alphanumeric(),
        b"alpha" => ch.is_ascii_alphabetic(),
        b"blank" => ch == b' ' || ch == b'\t',
        b"cntrl" => ch.is_ascii_control(),
        b"digit" => ch.is_ascii_digit(),
        b"graph" => ch.is_ascii_graphic(),
        b"lower" => ch.is_ascii_lowercase(),
        b"print" => ch.is_ascii_graphic() || ch == b' ',
        b"punct" => ch.is_ascii_punctuation(),
        b"space" => ch.is_ascii_whitespace(),
        b"upper" => {
            ch.is_ascii_uppercase()
                || (flags.contains(WildmatchFlags::CASEFOLD) && ch.is_ascii_lowercase())
        }
        b"xdigit" => ch.is_ascii_hexdigit(),
        _ => false,
    }
}

/// Compiled pattern, for ignore rule sets that get matched against many paths.
#[derive(Debug, Clone)]
pub struct WildmatchPattern {
    pattern: BString,
    flags: WildmatchFlags,
}

impl WildmatchPattern {
    pub fn new(pattern: &BStr, flags: WildmatchFlags) -> Self {
        Self {
            pattern: pattern.into(),
            flags,
        }
    }

    pub fn matches(&self, text: &BStr) -> bool {
        wildmatch(self.pattern.as_ref(), text, self.flags)
    }
}

/// Standalone match function matching C git's `wildmatch()`.
pub fn wildmatch(pattern: &BStr, text: &BStr, flags: WildmatchFlags) -> bool {
    dowild(pattern.as_bytes(), text.as_bytes(), flags) == WM_MATCH
}
