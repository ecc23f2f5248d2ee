//! Line-oriented parser for `aliases(5)` style files.
//!
//! A record starts at the beginning of a line with a name, a colon and the
//! head of the expansion. Lines that start with a space or tab continue the
//! previous record. Lines starting with `#` are comments. Anything else that
//! fails to match is skipped.
//!
//! ```text
//! # staff lists
//! root:    admin, ops
//! staff:   alice,
//!          bob
//! ```

use std::path::Path;
use std::sync::OnceLock;

use regex::{CaptureMatches, Regex};
use tracing::{debug, trace};

use crate::error::{AliasError, AliasResult};
use crate::record::{AliasRecord, RawRecord};

/// Record grammar: name, optional blanks, colon, optional blanks, head,
/// then any number of blank-indented continuation lines.
const RECORD_PATTERN: &str = r"(?m)^([^#\n: \t]+)[ \t]*:[ \t]*(.*(?:\n[ \t]+.*)*)";

static RECORD_REGEX: OnceLock<Regex> = OnceLock::new();

fn record_regex() -> &'static Regex {
    RECORD_REGEX.get_or_init(|| Regex::new(RECORD_PATTERN).expect("invalid regex pattern"))
}

/// Lazy sequence of records found in alias file text.
///
/// Created by [`parse`]. Records are yielded in file order; duplicate names
/// are yielded every time they occur.
pub struct Records<'a> {
    text: &'a str,
    matches: CaptureMatches<'static, 'a>,
    offset: usize,
    newlines: usize,
}

impl<'a> Iterator for Records<'a> {
    type Item = RawRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let caps = self.matches.next()?;
        let whole = caps.get(0)?;
        let name = caps.get(1)?.as_str();
        let expansion = caps.get(2).map_or("", |m| m.as_str());

        self.newlines += count_newlines(&self.text[self.offset..whole.start()]);
        let line = self.newlines + 1;
        self.newlines += count_newlines(whole.as_str());
        self.offset = whole.end();

        trace!(alias = name, line, "parsed alias record");
        Some(RawRecord {
            name,
            expansion,
            line,
        })
    }
}

fn count_newlines(s: &str) -> usize {
    s.bytes().filter(|&b| b == b'\n').count()
}

/// Parses alias file text into a lazy sequence of records.
///
/// Never fails: malformed lines are simply not matched.
///
/// # Example
/// ```
/// use mailalias::parser::parse;
///
/// let records: Vec<_> = parse("root: a, b\n\tc\n").collect();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].name, "root");
/// assert_eq!(records[0].expansion, "a, b\n\tc");
/// ```
pub fn parse(text: &str) -> Records<'_> {
    Records {
        text,
        matches: record_regex().captures_iter(text),
        offset: 0,
        newlines: 0,
    }
}

/// Reads an alias file into memory.
pub fn read_alias_file(path: &Path) -> AliasResult<String> {
    debug!(path = %path.display(), "reading alias file");
    std::fs::read_to_string(path).map_err(|e| AliasError::io(path, e))
}

/// Reads and parses an alias file into owned records.
pub fn parse_file(path: &Path) -> AliasResult<Vec<AliasRecord>> {
    let text = read_alias_file(path)?;
    Ok(parse(&text).map(AliasRecord::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(text: &str) -> Vec<(&str, &str)> {
        parse(text).map(|r| (r.name, r.expansion)).collect()
    }

    #[test]
    fn test_single_record_with_continuation() {
        assert_eq!(pairs("root: a, b\n\tc\n"), vec![("root", "a, b\n\tc")]);
    }

    #[test]
    fn test_empty_input() {
        assert!(pairs("").is_empty());
        assert!(pairs("\n\n\n").is_empty());
    }

    #[test]
    fn test_records_in_file_order() {
        let text = "b: 2\na: 1\nc: 3\n";
        assert_eq!(pairs(text), vec![("b", "2"), ("a", "1"), ("c", "3")]);
    }

    #[test]
    fn test_whitespace_around_colon() {
        assert_eq!(
            pairs("staff \t:\t alice, bob\n"),
            vec![("staff", "alice, bob")]
        );
    }

    #[test]
    fn test_comment_lines_are_skipped() {
        let text = "# comment: not a record\nroot: admin\n#\tindented: no\n";
        assert_eq!(pairs(text), vec![("root", "admin")]);
    }

    #[test]
    fn test_comment_ends_continuation() {
        let text = "root: a,\n  b\n# note\n  c\n";
        assert_eq!(pairs(text), vec![("root", "a,\n  b")]);
    }

    #[test]
    fn test_continuation_never_starts_record() {
        let text = "list: a,\n  fake: record,\n\tother: too\n";
        let records = pairs(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, "list");
        assert_eq!(records[0].1, "a,\n  fake: record,\n\tother: too");
    }

    #[test]
    fn test_orphan_indented_lines_are_skipped() {
        assert!(pairs("   x: y\n\tz: w\n").is_empty());
    }

    #[test]
    fn test_name_without_colon_is_skipped() {
        let text = "justaname\nroot: admin\nanother line here\n";
        assert_eq!(pairs(text), vec![("root", "admin")]);
    }

    #[test]
    fn test_blank_line_ends_record() {
        let text = "a: 1\n\n  2\nb: 3\n";
        assert_eq!(pairs(text), vec![("a", "1"), ("b", "3")]);
    }

    #[test]
    fn test_duplicates_are_all_yielded() {
        let text = "dup: first\ndup: second\n";
        assert_eq!(pairs(text), vec![("dup", "first"), ("dup", "second")]);
    }

    #[test]
    fn test_empty_expansion() {
        assert_eq!(pairs("nobody:\n"), vec![("nobody", "")]);
    }

    #[test]
    fn test_no_trailing_newline() {
        assert_eq!(pairs("root: admin"), vec![("root", "admin")]);
    }

    #[test]
    fn test_line_numbers() {
        let text = "# header\n\nroot: a,\n  b\nstaff: c\n";
        let lines: Vec<_> = parse(text).map(|r| (r.name, r.line)).collect();
        assert_eq!(lines, vec![("root", 3), ("staff", 5)]);
    }

    #[test]
    fn test_include_directive_kept_raw() {
        let text = "list: :include:/etc/mail/list\n";
        assert_eq!(pairs(text), vec![("list", ":include:/etc/mail/list")]);
    }

    #[test]
    fn test_parse_is_lazy() {
        let mut records = parse("a: 1\nb: 2\n");
        assert_eq!(records.next().map(|r| r.name), Some("a"));
        assert_eq!(records.next().map(|r| r.name), Some("b"));
        assert!(records.next().is_none());
    }

    #[test]
    fn test_parse_file_missing() {
        let err = parse_file(Path::new("/nonexistent/mailalias/aliases")).unwrap_err();
        assert_eq!(err.code(), "ALIAS_001");
    }
}
