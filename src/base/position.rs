/// Position tracking for nodes, tokens and comments
///
/// Stores the `loc` half of the shared positional convention: 1-indexed
/// lines and 0-indexed columns measured in UTF-16 code units.
use serde::Serialize;

/// A line/column span in source code (`loc` in the target contract)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
}

/// A position in source code (1-indexed line, 0-indexed column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a location from line/column coordinates
    pub fn from_coords(
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self {
            start: Position::new(start_line, start_col),
            end: Position::new(end_line, end_col),
        }
    }
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 0 }
    }
}
