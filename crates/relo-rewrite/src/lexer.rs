//! Comment detection for import matching.
//!
//! Pattern matching over raw text would happily rewrite an import that only
//! appears inside a comment. [`CommentMask`] records the byte ranges of
//! `//` and `/* */` comments so such matches can be skipped.
//!
//! The scan tracks single-quoted, double-quoted, and template literals so
//! that `"http://host"` is not taken for a comment. Quoted strings end at a
//! newline, which keeps an unbalanced quote from swallowing the rest of the
//! file. Regex literals are not recognized.

use std::ops::Range;

use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    Quoted(u8),
    Template,
}

/// Byte ranges of the comments in a source text.
///
/// # Examples
///
/// ```
/// use relo_rewrite::lexer::CommentMask;
///
/// let text = "// import x from './x'\nimport y from './y';";
/// let mask = CommentMask::new(text);
/// assert!(mask.contains(3));
/// assert!(!mask.contains(23));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentMask {
    ranges: SmallVec<[Range<usize>; 8]>,
}

impl CommentMask {
    /// Scans `text` and records every comment.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut ranges = SmallVec::new();
        let mut state = State::Code;
        let mut start = 0;
        let mut i = 0;

        while i < bytes.len() {
            let byte = bytes[i];
            let next = bytes.get(i + 1).copied();

            match state {
                State::Code => match (byte, next) {
                    (b'/', Some(b'/')) => {
                        start = i;
                        state = State::LineComment;
                        i += 2;
                        continue;
                    }
                    (b'/', Some(b'*')) => {
                        start = i;
                        state = State::BlockComment;
                        i += 2;
                        continue;
                    }
                    (b'\'' | b'"', _) => state = State::Quoted(byte),
                    (b'`', _) => state = State::Template,
                    _ => {}
                },
                State::LineComment => {
                    if byte == b'\n' {
                        ranges.push(start..i);
                        state = State::Code;
                    }
                }
                State::BlockComment => {
                    if byte == b'*' && next == Some(b'/') {
                        ranges.push(start..i + 2);
                        state = State::Code;
                        i += 2;
                        continue;
                    }
                }
                State::Quoted(quote) => {
                    if byte == b'\\' {
                        i += 2;
                        continue;
                    }
                    if byte == quote || byte == b'\n' {
                        state = State::Code;
                    }
                }
                State::Template => {
                    if byte == b'\\' {
                        i += 2;
                        continue;
                    }
                    if byte == b'`' {
                        state = State::Code;
                    }
                }
            }

            i += 1;
        }

        if matches!(state, State::LineComment | State::BlockComment) {
            ranges.push(start..bytes.len());
        }

        Self { ranges }
    }

    /// Returns `true` if `offset` lies inside a comment.
    #[must_use]
    pub fn contains(&self, offset: usize) -> bool {
        let idx = self.ranges.partition_point(|range| range.end <= offset);
        self.ranges
            .get(idx)
            .is_some_and(|range| range.start <= offset)
    }

    /// The recorded comment ranges, in ascending order.
    #[inline]
    #[must_use]
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_and_block_comments() {
        let text = "a // one\nb /* two\nthree */ c";
        let mask = CommentMask::new(text);
        assert_eq!(mask.ranges(), &[2..8, 11..25]);
        assert!(mask.contains(2));
        assert!(mask.contains(7));
        assert!(!mask.contains(8));
        assert!(mask.contains(24));
        assert!(!mask.contains(25));
    }

    #[test]
    fn test_slashes_inside_strings_are_not_comments() {
        let text = r#"const url = "http://example.com"; const b = '/* no */'; // yes"#;
        let mask = CommentMask::new(text);
        assert_eq!(mask.ranges().len(), 1);
        assert!(mask.contains(text.len() - 1));
        assert!(!mask.contains(text.find("//example").unwrap()));
    }

    #[test]
    fn test_template_literals() {
        let text = "const t = `line // not\n/* still not */`; /* real */";
        let mask = CommentMask::new(text);
        assert_eq!(mask.ranges().len(), 1);
        assert!(mask.contains(text.find("real").unwrap()));
    }

    #[test]
    fn test_escaped_quotes() {
        let text = r#"const s = "a \" // b"; // c"#;
        let mask = CommentMask::new(text);
        assert_eq!(mask.ranges().len(), 1);
        assert!(mask.contains(text.find("// c").unwrap()));
    }

    #[test]
    fn test_unterminated_quote_ends_at_newline() {
        let text = "const s = 'oops\n// comment";
        let mask = CommentMask::new(text);
        assert_eq!(mask.ranges(), &[16..26]);
    }

    #[test]
    fn test_unterminated_comment_runs_to_end() {
        let text = "x /* open";
        let mask = CommentMask::new(text);
        assert_eq!(mask.ranges(), &[2..9]);
    }

    #[test]
    fn test_empty_text() {
        let mask = CommentMask::new("");
        assert!(mask.ranges().is_empty());
        assert!(!mask.contains(0));
    }
}
