//! Host buffer access.
//!
//! The engine only needs two things from an editor: the text between two positions and a way
//! to insert text at a position. [`TextBuffer`] captures that contract; [`RopeBuffer`] is a
//! rope-backed implementation for hosts without their own storage (and for tests).
//!
//! All positions are expressed in characters (Unicode scalar values), and implementations are
//! expected to clamp out-of-range coordinates instead of failing.

use crate::position::Position;
use ropey::Rope;

/// Text access the engine requires from the host editor.
pub trait TextBuffer {
    /// Text in the half-open range `[start, end)`.
    ///
    /// Positions past the end of a line or of the buffer are clamped. An inverted range yields
    /// an empty string.
    fn text_in_range(&self, start: Position, end: Position) -> String;

    /// Insert `text` at `at`, shifting the rest of that line to the right.
    fn insert_text(&mut self, at: Position, text: &str);

    /// Total number of logical lines (an empty buffer has one line).
    fn line_count(&self) -> usize;
}

/// Rope-backed [`TextBuffer`].
///
/// Rope provides O(log N) line access and insertion, so range extraction stays cheap for the
/// backward scans the resolver performs on large documents.
#[derive(Debug, Clone, Default)]
pub struct RopeBuffer {
    rope: Rope,
}

impl RopeBuffer {
    /// Build a buffer from text.
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get complete text
    pub fn get_text(&self) -> String {
        self.rope.to_string()
    }

    /// Get total character count
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Get text of the specified line (excluding newline)
    pub fn line_text(&self, line: usize) -> Option<String> {
        if line >= self.rope.len_lines() {
            return None;
        }

        let mut text = self.rope.line(line).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        if text.ends_with('\r') {
            text.pop();
        }

        Some(text)
    }

    /// Length of a line in characters, excluding its line terminator.
    pub fn line_len(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return 0;
        }

        let slice = self.rope.line(line);
        let mut len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len -= 1;
            if len > 0 && slice.char(len - 1) == '\r' {
                len -= 1;
            }
        }
        len
    }

    /// Get character offset from line number and column number
    ///
    /// Lines past the end map to the end of the buffer; columns are clamped to the line length.
    pub fn position_to_char_offset(&self, position: Position) -> usize {
        if position.line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }

        let line_start = self.rope.line_to_char(position.line);
        line_start + position.column.min(self.line_len(position.line))
    }

    /// Get line number and column from character offset
    pub fn char_offset_to_position(&self, char_offset: usize) -> Position {
        let char_offset = char_offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(char_offset);
        let column = char_offset - self.rope.line_to_char(line);
        Position::new(line, column)
    }
}

impl TextBuffer for RopeBuffer {
    fn text_in_range(&self, start: Position, end: Position) -> String {
        let start = self.position_to_char_offset(start);
        let end = self.position_to_char_offset(end);
        if start >= end {
            return String::new();
        }
        self.rope.slice(start..end).to_string()
    }

    fn insert_text(&mut self, at: Position, text: &str) {
        let offset = self.position_to_char_offset(at);
        self.rope.insert(offset, text);
    }

    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }
}

impl From<&str> for RopeBuffer {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
