//! Cursor eligibility and ordering.
//!
//! When `/` is typed with several carets active, only the carets that now sit right after `</`
//! take part in completion. They are processed top of buffer first so an insertion can only
//! shift carets that come after it on the same row.

use crate::buffer::TextBuffer;
use crate::position::Position;

/// The two characters that must immediately precede an eligible cursor.
pub const TRIGGER: &str = "</";

/// Length of [`TRIGGER`] in characters.
pub(crate) const TRIGGER_LEN: usize = 2;

/// Returns `true` if the two characters before `cursor` are [`TRIGGER`].
pub fn follows_trigger<B: TextBuffer + ?Sized>(buffer: &B, cursor: Position) -> bool {
    if cursor.column < TRIGGER_LEN {
        return false;
    }
    buffer.text_in_range(cursor.back(TRIGGER_LEN), cursor) == TRIGGER
}

/// Filter `cursors` down to those that just completed a `</` trigger, ordered by row then column.
///
/// Duplicate positions collapse into one. The buffer is only read.
pub fn eligible_cursors<B: TextBuffer + ?Sized>(buffer: &B, cursors: &[Position]) -> Vec<Position> {
    let mut eligible: Vec<Position> = cursors
        .iter()
        .copied()
        .filter(|&cursor| follows_trigger(buffer, cursor))
        .collect();

    eligible.sort();
    eligible.dedup();

    tracing::trace!(
        candidates = cursors.len(),
        eligible = eligible.len(),
        "filtered trigger cursors"
    );

    eligible
}
