//! Source positions
//!
//!     Every token and every node carries a [Range]: the byte span it covers plus the
//!     line:column of both ends. Lines and columns start at 1, offsets at 0, and columns count
//!     bytes, so a multibyte character advances the column by its UTF-8 length.
//!
//!     The end of a range is exclusive. A token whose value ends in LF ends at column 1 of
//!     the next line.
//!
//!     The lexer builds ranges incrementally from its cursor. [SourceLocation] derives the
//!     same positions from a complete source by binary search over line starts, which gives
//!     tests an independent answer to compare against.

use serde::Serialize;
use std::fmt;
use std::ops::Range as ByteRange;

/// A line:column pair, both one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    pub span: ByteRange<usize>,
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(span: ByteRange<usize>, start: Position, end: Position) -> Self {
        Self { span, start, end }
    }

    /// Whether `pos` falls between the two ends, both included.
    pub fn contains(&self, pos: Position) -> bool {
        (self.start..=self.end).contains(&pos)
    }

    /// Whether `other` lies inside this range, by span and by position.
    pub fn encloses(&self, other: &Range) -> bool {
        self.span.start <= other.span.start
            && other.span.end <= self.span.end
            && self.contains(other.start)
            && self.contains(other.end)
    }

    /// Move the end to where `other` ends. The start is untouched.
    pub fn extend_to(&mut self, other: &Range) {
        self.span.end = other.span.end;
        self.end = other.end;
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::new(0..0, Position::default(), Position::default())
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Line index of a complete source, for turning byte offsets into positions.
#[derive(Debug, Clone)]
pub struct SourceLocation {
    // offset of the first byte of every line; always starts with 0
    line_starts: Vec<usize>,
}

impl SourceLocation {
    pub fn new(source: &[u8]) -> Self {
        let breaks = source
            .iter()
            .enumerate()
            .filter(|(_, byte)| **byte == b'\n')
            .map(|(offset, _)| offset + 1);
        Self {
            line_starts: std::iter::once(0).chain(breaks).collect(),
        }
    }

    /// The position of `offset`. An offset at the very end of the source is valid.
    pub fn byte_to_position(&self, offset: usize) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        };
        Position::new(line + 1, offset - self.line_starts[line] + 1)
    }

    /// Number of lines, counting the (possibly empty) line after a final LF.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_order_by_line_first() {
        assert!(Position::new(1, 80) < Position::new(2, 1));
        assert!(Position::new(3, 2) > Position::new(3, 1));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = Range::new(4..17, Position::new(1, 5), Position::new(2, 10));
        assert!(!range.contains(Position::new(1, 4)));
        assert!(range.contains(Position::new(1, 5)));
        assert!(range.contains(Position::new(2, 10)));
        assert!(!range.contains(Position::new(2, 11)));
    }

    #[test]
    fn test_encloses_checks_span_and_position() {
        let line = Range::new(0..8, Position::new(1, 1), Position::new(2, 1));
        let word = Range::new(2..7, Position::new(1, 3), Position::new(1, 8));
        assert!(line.encloses(&word));
        assert!(!word.encloses(&line));

        let same_positions_wider_span = Range::new(0..9, Position::new(1, 1), Position::new(2, 1));
        assert!(!line.encloses(&same_positions_wider_span));
    }

    #[test]
    fn test_extend_to_keeps_start() {
        let mut range = Range::new(0..2, Position::new(1, 1), Position::new(1, 3));
        range.extend_to(&Range::new(7..8, Position::new(1, 8), Position::new(2, 1)));
        assert_eq!(range, Range::new(0..8, Position::new(1, 1), Position::new(2, 1)));
    }

    #[test]
    fn test_source_location() {
        let index = SourceLocation::new("# Café\nbody\n".as_bytes());
        assert_eq!(index.byte_to_position(0), Position::new(1, 1));
        // 'é' is two bytes
        assert_eq!(index.byte_to_position(7), Position::new(1, 8));
        assert_eq!(index.byte_to_position(8), Position::new(2, 1));
        assert_eq!(index.byte_to_position(13), Position::new(3, 1));
        assert_eq!(index.line_count(), 3);
    }
}
