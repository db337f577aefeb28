//! Positions of import statements within a file.
//!
//! Every detected import statement carries a [`SourceLocation`] so that
//! diagnostics can point at the offending line.

use serde::{Deserialize, Serialize};

/// Where an import statement starts.
///
/// Lines count from 1; columns are byte offsets within the line and count
/// from 0. Build one from a byte offset with [`SourceLocation::from_offset`].
///
/// # Examples
///
/// ```
/// use relo_core::SourceLocation;
///
/// let text = "// header\nimport Help from './Help';";
/// let loc = SourceLocation::from_offset(text, 10);
/// assert_eq!(loc, SourceLocation::new(2, 0, 10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    /// 1-based line.
    pub line: u32,

    /// 0-based byte column.
    pub column: u32,

    /// Byte offset from the start of the file.
    pub byte_offset: u32,
}

impl SourceLocation {
    /// Creates a location from its parts.
    #[inline]
    #[must_use]
    pub const fn new(line: u32, column: u32, byte_offset: u32) -> Self {
        Self {
            line,
            column,
            byte_offset,
        }
    }

    /// Computes the location of `offset` within `text`.
    ///
    /// Offsets past the end of `text` are clamped to its length.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Source files stay far below 4 GiB
    pub fn from_offset(text: &str, offset: usize) -> Self {
        let offset = offset.min(text.len());
        let before = &text.as_bytes()[..offset];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |pos| pos + 1);

        Self {
            line: line as u32,
            column: (offset - line_start) as u32,
            byte_offset: offset as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_offset_first_line() {
        let text = "import React from 'react';";
        assert_eq!(SourceLocation::from_offset(text, 0), SourceLocation::new(1, 0, 0));
        assert_eq!(SourceLocation::from_offset(text, 7), SourceLocation::new(1, 7, 7));
    }

    #[test]
    fn test_from_offset_indented_statement() {
        let text = "line one\n  import x from './x';\n";
        assert_eq!(SourceLocation::from_offset(text, 11), SourceLocation::new(2, 2, 11));
    }

    #[test]
    fn test_from_offset_after_crlf() {
        let text = "a;\r\nimport('./Settings');";
        let loc = SourceLocation::from_offset(text, 4);
        assert_eq!((loc.line, loc.column), (2, 0));
    }

    #[test]
    fn test_from_offset_clamps() {
        let loc = SourceLocation::from_offset("ab\ncd", 99);
        assert_eq!(loc, SourceLocation::new(2, 2, 5));
    }

    #[test]
    fn test_location_in_json_report() {
        let loc = SourceLocation::new(3, 4, 40);
        let json = serde_json::to_value(loc).unwrap();
        assert_eq!(json["line"], 3);
        assert_eq!(json["column"], 4);
    }
}
