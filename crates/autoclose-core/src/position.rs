//! Buffer coordinates.

use std::cmp::Ordering;

/// Position coordinates (line and column numbers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Zero-based logical line index.
    pub line: usize,
    /// Zero-based column in characters within the logical line.
    pub column: usize,
}

impl Position {
    /// Create a new logical position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Position `n` characters to the left on the same line, clamped to column 0.
    pub fn back(self, n: usize) -> Self {
        Self {
            line: self.line,
            column: self.column.saturating_sub(n),
        }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The half-open buffer range `[(start_row, 0), end)` examined by one resolver step.
///
/// `end` is fixed for the lifetime of a resolution; `start_row` only moves toward 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWindow {
    /// First row included in the window (always read from column 0).
    pub start_row: usize,
    /// Exclusive end of the window.
    pub end: Position,
}

impl ScanWindow {
    /// Inclusive start of the window.
    pub fn start(&self) -> Position {
        Position::new(self.start_row, 0)
    }

    /// Returns `true` once the window reaches the top of the buffer.
    pub fn at_buffer_start(&self) -> bool {
        self.start_row == 0
    }

    /// Number of rows covered, counting the (partial) end row.
    pub fn row_span(&self) -> usize {
        self.end.line.saturating_sub(self.start_row) + 1
    }
}
