//! Backward Tag Resolver
//!
//! Finds the nearest opening tag before a cursor that has no matching closer.
//!
//! # Overview
//!
//! Classifying the whole document on every keystroke is wasteful, so the resolver looks at a
//! window that ends right before the just-typed `</` and starts `batch_size` rows above the
//! cursor. If the classifier finds nothing open in that window, the window grows upward by
//! another batch and is classified again, until either an open tag turns up or the window
//! reaches row 0.
//!
//! The loop is exposed as a state machine ([`TagResolver`]) so hosts whose classifier is
//! asynchronous can suspend between [`TagResolver::next_step`] and [`TagResolver::feed`].
//! [`resolve`] drives the same machine with a synchronous [`MarkupClassifier`].
//!
//! # Example
//!
//! ```rust
//! use autoclose_core::{
//!     AutoCloseSettings, Classification, Position, Resolution, ResolveStep, RopeBuffer,
//!     TagRecord, TagResolver,
//! };
//!
//! let buffer = RopeBuffer::new("<em>\n</");
//! let mut resolver = TagResolver::new(Position::new(1, 2), &AutoCloseSettings::default());
//!
//! let resolution = loop {
//!     match resolver.next_step(&buffer) {
//!         ResolveStep::Done(resolution) => break resolution,
//!         ResolveStep::Classify(text) => {
//!             // An async host would hand `text` off here and resume later.
//!             assert_eq!(text, "<em>\n");
//!             let outcome = Classification::Unclosed(vec![TagRecord::new("<em>", 0)]);
//!             if let Some(resolution) = resolver.feed(outcome) {
//!                 break resolution;
//!             }
//!         }
//!     }
//! };
//!
//! assert_eq!(resolution, Resolution::Found { code: "<em>".to_string() });
//! ```

use crate::buffer::TextBuffer;
use crate::classifier::{Classification, MarkupClassifier};
use crate::closer::closing_tag;
use crate::gate::TRIGGER_LEN;
use crate::position::{Position, ScanWindow};
use crate::settings::AutoCloseSettings;

/// Final answer of a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The nearest unclosed opening tag, as written in the source (attributes included).
    Found {
        /// Opening tag source text, e.g. `<div class="x">`.
        code: String,
    },
    /// No unclosed opening tag precedes the cursor anywhere in the buffer.
    NotFound,
}

impl Resolution {
    /// Opening tag source, or `""` for [`Resolution::NotFound`].
    pub fn code(&self) -> &str {
        match self {
            Self::Found { code } => code,
            Self::NotFound => "",
        }
    }

    /// Returns `true` if an opening tag was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// Text to insert after the typed `</` (empty when nothing was found).
    pub fn closing_text(&self) -> String {
        closing_tag(self.code())
    }
}

/// What the driver of a [`TagResolver`] must do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveStep {
    /// Classify this window text and pass the outcome to [`TagResolver::feed`].
    Classify(String),
    /// The resolution is complete.
    Done(Resolution),
}

/// Incremental, batch-growing backward search for the nearest unclosed opening tag.
///
/// One resolver serves one cursor. It holds no reference to the buffer; the buffer is passed
/// to every [`next_step`](Self::next_step) call instead.
#[derive(Debug, Clone)]
pub struct TagResolver {
    cursor: Position,
    batch_size: usize,
    total_rows: usize,
    classify_calls: usize,
    finished: Option<Resolution>,
}

impl TagResolver {
    /// Start a resolution for a cursor that sits right after a typed `</`.
    pub fn new(cursor: Position, settings: &AutoCloseSettings) -> Self {
        let batch_size = settings.batch_rows();
        Self {
            cursor,
            batch_size,
            total_rows: batch_size,
            classify_calls: 0,
            finished: None,
        }
    }

    /// The cursor this resolver works for.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// The window the next classification covers.
    ///
    /// The end excludes the `</` before the cursor; a column below 2 clamps to 0.
    pub fn window(&self) -> ScanWindow {
        ScanWindow {
            start_row: self.cursor.line.saturating_sub(self.total_rows),
            end: self.cursor.back(TRIGGER_LEN),
        }
    }

    /// Number of classifier outcomes fed so far.
    pub fn classify_calls(&self) -> usize {
        self.classify_calls
    }

    /// The final result, once reached.
    pub fn result(&self) -> Option<&Resolution> {
        self.finished.as_ref()
    }

    /// Extract the current window and decide whether classification is needed.
    ///
    /// An empty window finishes the resolution with [`Resolution::NotFound`] without involving
    /// the classifier.
    pub fn next_step<B: TextBuffer + ?Sized>(&mut self, buffer: &B) -> ResolveStep {
        if let Some(resolution) = &self.finished {
            return ResolveStep::Done(resolution.clone());
        }

        let window = self.window();
        let text = buffer.text_in_range(window.start(), window.end);
        if text.is_empty() {
            tracing::trace!(
                line = self.cursor.line,
                column = self.cursor.column,
                "empty scan window"
            );
            return ResolveStep::Done(self.finish(Resolution::NotFound));
        }

        tracing::trace!(
            start_row = window.start_row,
            end_line = window.end.line,
            end_column = window.end.column,
            rows = window.row_span(),
            "classifying scan window"
        );
        ResolveStep::Classify(text)
    }

    /// Apply the classifier outcome for the current window.
    ///
    /// Returns the final [`Resolution`], or `None` when the window has been grown and
    /// [`next_step`](Self::next_step) must be called again.
    pub fn feed(&mut self, outcome: Classification) -> Option<Resolution> {
        if let Some(resolution) = &self.finished {
            return Some(resolution.clone());
        }

        self.classify_calls += 1;
        let window = self.window();

        if let Some(record) = outcome.nearest_open() {
            let code = record.code.clone();
            return Some(self.finish(Resolution::Found { code }));
        }

        if window.at_buffer_start() {
            return Some(self.finish(Resolution::NotFound));
        }

        self.total_rows = self.total_rows.saturating_add(self.batch_size);
        tracing::debug!(
            line = self.cursor.line,
            rows = self.total_rows,
            "no open tag in window, growing scan"
        );
        None
    }

    fn finish(&mut self, resolution: Resolution) -> Resolution {
        tracing::debug!(
            line = self.cursor.line,
            column = self.cursor.column,
            found = resolution.is_found(),
            classify_calls = self.classify_calls,
            "resolution finished"
        );
        self.finished = Some(resolution.clone());
        resolution
    }
}

/// Resolve the nearest unclosed opening tag before `cursor` with a synchronous classifier.
pub fn resolve<B, C>(
    buffer: &B,
    cursor: Position,
    classifier: &mut C,
    settings: &AutoCloseSettings,
) -> Resolution
where
    B: TextBuffer + ?Sized,
    C: MarkupClassifier + ?Sized,
{
    let mut resolver = TagResolver::new(cursor, settings);
    loop {
        match resolver.next_step(buffer) {
            ResolveStep::Done(resolution) => return resolution,
            ResolveStep::Classify(text) => {
                if let Some(resolution) = resolver.feed(classifier.classify(&text)) {
                    return resolution;
                }
            }
        }
    }
}
