//! Multi-cursor completion.
//!
//! # Overview
//!
//! A single `/` keystroke may complete `</` at several carets. Each eligible caret is resolved
//! and closed **sequentially**, top of buffer first; after every insertion the carets still
//! waiting are adjusted for the text just written, so later insertions land where the user
//! typed even when two carets share a row.
//!
//! ```rust
//! use autoclose_core::{AutoCloseSettings, AutoCloser, Classification, Position, RopeBuffer, TagRecord};
//!
//! let classifier = |text: &str| match text.rfind("<li>") {
//!     Some(offset) => {
//!         let position = text[..offset].chars().count();
//!         Classification::Unclosed(vec![TagRecord::new("<li>", position)])
//!     }
//!     None => Classification::Balanced,
//! };
//! let mut closer = AutoCloser::new(AutoCloseSettings::default(), classifier);
//!
//! let mut buffer = RopeBuffer::new("<li></ <li></");
//! let cursors = [Position::new(0, 6), Position::new(0, 13)];
//! let insertions = closer.on_text_typed(&mut buffer, "/", &cursors);
//!
//! assert_eq!(insertions.len(), 2);
//! assert_eq!(buffer.get_text(), "<li></li> <li></li>");
//! ```

use crate::buffer::TextBuffer;
use crate::classifier::MarkupClassifier;
use crate::gate::eligible_cursors;
use crate::position::Position;
use crate::resolver::resolve;
use crate::settings::AutoCloseSettings;
use std::collections::VecDeque;

/// A closing tag written into the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    /// Where the text was inserted, in buffer coordinates at the time of insertion.
    pub position: Position,
    /// Inserted text (tag name plus `>`).
    pub text: String,
}

impl Insertion {
    /// Length of the inserted text in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Returns `true` if nothing was inserted.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Tracks the positions of cursors still waiting for completion while earlier cursors'
/// insertions change the buffer underneath them.
#[derive(Debug, Clone, Default)]
pub struct DriftTracker {
    pending: VecDeque<Position>,
}

impl DriftTracker {
    /// Track `cursors` in processing order.
    pub fn new(cursors: Vec<Position>) -> Self {
        Self {
            pending: cursors.into(),
        }
    }

    /// Cursors not yet taken, in their current (drift-adjusted) positions.
    pub fn pending(&self) -> &VecDeque<Position> {
        &self.pending
    }

    /// Take the next cursor to process.
    pub fn next_cursor(&mut self) -> Option<Position> {
        self.pending.pop_front()
    }

    /// Account for `len` characters inserted at `at`.
    ///
    /// Pending cursors on the same row at or after the insertion column move right by `len`;
    /// cursors on other rows are unaffected.
    pub fn record_insertion(&mut self, at: Position, len: usize) {
        for cursor in &mut self.pending {
            if cursor.line == at.line && cursor.column >= at.column {
                cursor.column += len;
            }
        }
    }
}

/// Complete closing tags at every cursor that just typed `</`.
///
/// Cursors that are not preceded by `</` are ignored. Returns the insertions in the order they
/// were applied; a cursor with no enclosing open tag produces no insertion.
pub fn close_tags<B, C>(
    buffer: &mut B,
    cursors: &[Position],
    classifier: &mut C,
    settings: &AutoCloseSettings,
) -> Vec<Insertion>
where
    B: TextBuffer + ?Sized,
    C: MarkupClassifier + ?Sized,
{
    let mut tracker = DriftTracker::new(eligible_cursors(&*buffer, cursors));
    let mut insertions = Vec::new();

    while let Some(cursor) = tracker.next_cursor() {
        let closing = resolve(&*buffer, cursor, classifier, settings).closing_text();
        if closing.is_empty() {
            continue;
        }

        buffer.insert_text(cursor, &closing);
        let insertion = Insertion {
            position: cursor,
            text: closing,
        };
        tracker.record_insertion(cursor, insertion.len());

        tracing::debug!(
            line = cursor.line,
            column = cursor.column,
            text = %insertion.text,
            "inserted closing tag"
        );
        insertions.push(insertion);
    }

    insertions
}

/// Keystroke entry point: settings plus a classifier, driven by typed text.
#[derive(Debug, Clone)]
pub struct AutoCloser<C> {
    settings: AutoCloseSettings,
    classifier: C,
}

impl<C: MarkupClassifier> AutoCloser<C> {
    /// Create an autocloser.
    pub fn new(settings: AutoCloseSettings, classifier: C) -> Self {
        Self {
            settings,
            classifier,
        }
    }

    /// Current settings.
    pub fn settings(&self) -> &AutoCloseSettings {
        &self.settings
    }

    /// Replace the settings (e.g. after the user edits them).
    pub fn set_settings(&mut self, settings: AutoCloseSettings) {
        self.settings = settings;
    }

    /// The classifier in use.
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Mutable access to the classifier.
    pub fn classifier_mut(&mut self) -> &mut C {
        &mut self.classifier
    }

    /// Handle text the user just typed, with `cursors` already placed after it.
    ///
    /// Only a single `/` can complete a `</` trigger; anything else, or disabled settings,
    /// leaves the buffer untouched.
    pub fn on_text_typed<B: TextBuffer + ?Sized>(
        &mut self,
        buffer: &mut B,
        typed: &str,
        cursors: &[Position],
    ) -> Vec<Insertion> {
        if !self.settings.enabled || typed != "/" {
            return Vec::new();
        }
        close_tags(buffer, cursors, &mut self.classifier, &self.settings)
    }
}
