// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Working-tree change entries and porcelain status parsing
//!
//! Status is consumed in `git status --porcelain` (v1) form: a two-character
//! `XY` code, a space, then the path. Paths that git decided to quote are
//! C-unquoted, and rename/copy lines resolve to their destination path.

use crate::error::GitError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Characters git may place in either column of a porcelain status code
const STATUS_CODES: &[u8] = b" MTADRCU?";

/// How a path in the working tree differs from HEAD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    /// Tracked and changed (modified, added, renamed, type-changed)
    Modified,
    /// Tracked and deleted, with no other change staged
    Deleted,
    /// Present on disk but not tracked
    Untracked,
}

impl ChangeStatus {
    /// Classify a two-character porcelain status code
    ///
    /// Only pure deletions (`D `, ` D`, `DD`) count as deleted. A path
    /// deleted after some other staged change (`AD`, `MD`, `RD`) is
    /// modified, so a missing file is skipped rather than unstaged.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        if code == "??" {
            return Self::Untracked;
        }
        let pure_deletion = code.contains('D') && code.chars().all(|c| c == 'D' || c == ' ');
        if pure_deletion {
            Self::Deleted
        } else {
            Self::Modified
        }
    }

    /// Short status code as git prints it
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Modified => "M",
            Self::Deleted => "D",
            Self::Untracked => "??",
        }
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Modified => "modified",
            Self::Deleted => "deleted",
            Self::Untracked => "untracked",
        })
    }
}

/// A single changed path discovered in the working tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeEntry {
    /// Path relative to the repository root, `/`-separated
    pub path: String,
    /// Kind of change
    pub status: ChangeStatus,
}

impl ChangeEntry {
    /// Create a change entry
    #[must_use]
    pub fn new(path: impl Into<String>, status: ChangeStatus) -> Self {
        Self {
            path: path.into(),
            status,
        }
    }

    /// Create an entry for an untracked path
    #[must_use]
    pub fn untracked(path: impl Into<String>) -> Self {
        Self::new(path, ChangeStatus::Untracked)
    }

    /// Final component of the path
    #[must_use]
    pub fn base_name(&self) -> &str {
        base_name(&self.path)
    }
}

/// Final component of a `/`-separated path (`src/lib.rs` -> `lib.rs`)
#[must_use]
pub fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Parse a full `git status --porcelain` listing
///
/// Blank lines are ignored.
///
/// # Errors
///
/// Returns `GitError::MalformedStatus` for the first line that cannot be parsed.
pub fn parse_status(output: &str) -> Result<Vec<ChangeEntry>, GitError> {
    output
        .lines()
        .filter(|line| !line.is_empty())
        .map(parse_status_line)
        .collect()
}

/// Parse one porcelain v1 status line into a [`ChangeEntry`]
///
/// # Errors
///
/// Returns `GitError::MalformedStatus` if the line has no valid `XY` code,
/// no separator, or an unreadable path.
pub fn parse_status_line(line: &str) -> Result<ChangeEntry, GitError> {
    let malformed = |reason| GitError::MalformedStatus {
        line: line.to_string(),
        reason,
    };

    let bytes = line.as_bytes();
    if bytes.len() < 4 {
        return Err(malformed("line too short"));
    }

    let (x, y) = (bytes[0], bytes[1]);
    if !STATUS_CODES.contains(&x) || !STATUS_CODES.contains(&y) {
        return Err(malformed("unknown status code"));
    }
    if (x == b'?') != (y == b'?') {
        return Err(malformed("unknown status code"));
    }
    if x == b' ' && y == b' ' {
        return Err(malformed("empty status code"));
    }
    if bytes[2] != b' ' {
        return Err(malformed("missing separator after status code"));
    }

    // The first three bytes are ASCII, so these are char boundaries
    let code = &line[..2];
    let mut raw = &line[3..];

    if matches!(x, b'R' | b'C') || matches!(y, b'R' | b'C') {
        raw = rename_destination(raw).ok_or_else(|| malformed("rename without destination"))?;
    }

    let path = unquote(raw).map_err(malformed)?;
    if path.is_empty() {
        return Err(malformed("empty path"));
    }

    Ok(ChangeEntry::new(path, ChangeStatus::from_code(code)))
}

/// Quote a path the way git does when it contains special characters
///
/// Paths without quotes, backslashes or control characters are returned as-is.
#[must_use]
pub fn quote_path(path: &str) -> String {
    let needs_quoting = path
        .bytes()
        .any(|b| b == b'"' || b == b'\\' || b < 0x20 || b == 0x7f);
    if !needs_quoting {
        return path.to_string();
    }

    let mut out = String::with_capacity(path.len() + 2);
    out.push('"');
    for c in path.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\{:03o}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Destination half of `old -> new`, honouring a quoted source path
fn rename_destination(raw: &str) -> Option<&str> {
    if raw.starts_with('"') {
        let end = closing_quote(raw)?;
        raw[end + 1..].strip_prefix(" -> ")
    } else {
        raw.split_once(" -> ").map(|(_, destination)| destination)
    }
}

/// Byte index of the quote closing a C-quoted string starting at index 0
fn closing_quote(raw: &str) -> Option<usize> {
    let bytes = raw.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Undo git's C-style path quoting; unquoted input is returned unchanged
fn unquote(raw: &str) -> Result<String, &'static str> {
    let Some(inner) = raw.strip_prefix('"') else {
        return Ok(raw.to_string());
    };
    let inner = inner
        .strip_suffix('"')
        .ok_or("unterminated quoted path")?;

    let mut out = Vec::with_capacity(inner.len());
    let mut bytes = inner.bytes();
    while let Some(b) = bytes.next() {
        if b != b'\\' {
            out.push(b);
            continue;
        }
        let escaped = bytes.next().ok_or("dangling escape in quoted path")?;
        let decoded = match escaped {
            b'a' => 0x07,
            b'b' => 0x08,
            b't' => b'\t',
            b'n' => b'\n',
            b'v' => 0x0b,
            b'f' => 0x0c,
            b'r' => b'\r',
            b'"' => b'"',
            b'\\' => b'\\',
            b'0'..=b'7' => match (bytes.next(), bytes.next()) {
                (Some(d1 @ b'0'..=b'7'), Some(d2 @ b'0'..=b'7')) => {
                    let value = u32::from(escaped - b'0') * 64
                        + u32::from(d1 - b'0') * 8
                        + u32::from(d2 - b'0');
                    u8::try_from(value).map_err(|_| "octal escape out of range")?
                }
                _ => return Err("invalid octal escape"),
            },
            _ => return Err("unknown escape in quoted path"),
        };
        out.push(decoded);
    }

    String::from_utf8(out).map_err(|_| "quoted path is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn parse(line: &str) -> ChangeEntry {
        parse_status_line(line).expect("line should parse")
    }

    fn reason(line: &str) -> &'static str {
        match parse_status_line(line) {
            Err(GitError::MalformedStatus { reason, .. }) => reason,
            other => panic!("Expected MalformedStatus, got {other:?}"),
        }
    }

    #[test]
    fn test_worktree_modification() {
        assert_eq!(
            parse(" M src/lib.rs"),
            ChangeEntry::new("src/lib.rs", ChangeStatus::Modified)
        );
    }

    #[test]
    fn test_staged_codes_are_modified() {
        assert_eq!(parse("M  a.txt").status, ChangeStatus::Modified);
        assert_eq!(parse("A  a.txt").status, ChangeStatus::Modified);
        assert_eq!(parse("MM a.txt").status, ChangeStatus::Modified);
        assert_eq!(parse("UU a.txt").status, ChangeStatus::Modified);
    }

    #[test]
    fn test_deletions_in_either_column() {
        assert_eq!(parse(" D gone.txt").status, ChangeStatus::Deleted);
        assert_eq!(parse("D  gone.txt").status, ChangeStatus::Deleted);
        assert_eq!(parse("DD gone.txt").status, ChangeStatus::Deleted);
    }

    #[test]
    fn test_deleted_after_staged_change_is_modified() {
        assert_eq!(parse("AD new.txt").status, ChangeStatus::Modified);
        assert_eq!(parse("MD old.txt").status, ChangeStatus::Modified);
        assert_eq!(parse("RD a.txt -> b.txt").status, ChangeStatus::Modified);
    }

    #[test]
    fn test_untracked() {
        assert_eq!(parse("?? hooks/useAuth.ts"), ChangeEntry::untracked("hooks/useAuth.ts"));
    }

    #[test]
    fn test_untracked_directory_keeps_trailing_slash() {
        assert_eq!(parse("?? app/reports/").path, "app/reports/");
    }

    #[test]
    fn test_path_with_spaces_unquoted() {
        assert_eq!(parse(" M docs/release notes.md").path, "docs/release notes.md");
    }

    #[test]
    fn test_quoted_path() {
        assert_eq!(parse("?? \"with \\\"quote\\\".txt\"").path, "with \"quote\".txt");
        assert_eq!(parse(" M \"tab\\there\"").path, "tab\there");
    }

    #[test]
    fn test_quoted_octal_utf8() {
        assert_eq!(parse("?? \"caf\\303\\251.md\"").path, "café.md");
    }

    #[test]
    fn test_rename_resolves_destination() {
        let entry = parse("R  old/name.rs -> new/name.rs");
        assert_eq!(entry.path, "new/name.rs");
        assert_eq!(entry.status, ChangeStatus::Modified);
    }

    #[test]
    fn test_rename_with_quoted_paths() {
        assert_eq!(parse("R  \"a -> b\" -> \"c d\"").path, "c d");
    }

    #[test]
    fn test_malformed_lines() {
        assert_eq!(reason("M"), "line too short");
        assert_eq!(reason("XY path"), "unknown status code");
        assert_eq!(reason("? path"), "unknown status code");
        assert_eq!(reason("    path"), "empty status code");
        assert_eq!(reason("M_ path"), "unknown status code");
        assert_eq!(reason("MMxpath"), "missing separator after status code");
        assert_eq!(reason("?? \"open"), "unterminated quoted path");
        assert_eq!(reason("?? \"bad\\q\""), "unknown escape in quoted path");
        assert_eq!(reason("R  no-arrow"), "rename without destination");
    }

    #[test]
    fn test_parse_status_skips_blank_lines() {
        let output = " M a.txt\n\n D b.txt\n?? c.txt\n";
        let entries = parse_status(output).expect("should parse");
        assert_eq!(
            entries,
            vec![
                ChangeEntry::new("a.txt", ChangeStatus::Modified),
                ChangeEntry::new("b.txt", ChangeStatus::Deleted),
                ChangeEntry::untracked("c.txt"),
            ]
        );
    }

    #[test]
    fn test_parse_status_aborts_on_malformed_line() {
        let result = parse_status(" M a.txt\ngarbage\n?? c.txt\n");
        assert!(matches!(
            result,
            Err(GitError::MalformedStatus { ref line, .. }) if line == "garbage"
        ));
    }

    #[test]
    fn test_parse_status_empty() {
        assert!(parse_status("").expect("empty is fine").is_empty());
    }

    #[test]
    fn test_base_name() {
        assert_eq!(ChangeEntry::untracked("app/products/page.tsx").base_name(), "page.tsx");
        assert_eq!(ChangeEntry::untracked("README.md").base_name(), "README.md");
        assert_eq!(ChangeEntry::untracked("app/reports/").base_name(), "reports");
    }

    #[test]
    fn test_status_display_and_code() {
        assert_eq!(ChangeStatus::Deleted.to_string(), "deleted");
        assert_eq!(ChangeStatus::Untracked.code(), "??");
        assert_eq!(ChangeStatus::from_code(" M"), ChangeStatus::Modified);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&ChangeEntry::untracked("x")).expect("serialize");
        assert_eq!(json, r#"{"path":"x","status":"untracked"}"#);
    }

    #[test]
    fn test_quote_path_leaves_plain_paths() {
        assert_eq!(quote_path("src/a b.rs"), "src/a b.rs");
        assert_eq!(quote_path("a\"b"), "\"a\\\"b\"");
        assert_eq!(quote_path("bell\u{7}"), "\"bell\\007\"");
    }
}
