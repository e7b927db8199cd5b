//! Markup balance classifier interface.
//!
//! The resolver never parses markup. For every scan window it asks a [`MarkupClassifier`]
//! which tags inside that chunk of text are left open, and relies on two guarantees:
//!
//! - both halves of a well-formed open/close pair inside the chunk are omitted
//! - reported records are in document order (nearest to the end of the chunk last)

/// A tag that has no matching partner inside the classified text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    /// Full source text of the tag, brackets and attributes included (e.g. `<a href="x">`).
    pub code: String,
    /// Character offset of the tag's `<` inside the classified text.
    pub position: usize,
}

impl TagRecord {
    /// Create a record.
    pub fn new(code: impl Into<String>, position: usize) -> Self {
        Self {
            code: code.into(),
            position,
        }
    }

    /// Returns `true` for closing tags (`</name>`).
    ///
    /// A window can cut an element in half, leaving its closer without an opener; such records
    /// are never completion candidates.
    pub fn is_closing(&self) -> bool {
        self.code.starts_with("</")
    }
}

/// Outcome of classifying one chunk of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Every tag in the chunk is matched.
    Balanced,
    /// Tags left unmatched within the chunk, ordered by position ascending.
    Unclosed(Vec<TagRecord>),
}

impl Classification {
    /// Build a classification from unmatched records; an empty list means [`Balanced`].
    ///
    /// Records are sorted by position so callers may collect them in any order.
    ///
    /// [`Balanced`]: Classification::Balanced
    pub fn from_records(mut records: Vec<TagRecord>) -> Self {
        if records.is_empty() {
            return Self::Balanced;
        }
        records.sort_by_key(|r| r.position);
        Self::Unclosed(records)
    }

    /// The nearest (last) unmatched opening tag, skipping closing-tag records.
    pub fn nearest_open(&self) -> Option<&TagRecord> {
        match self {
            Self::Balanced => None,
            Self::Unclosed(records) => records.iter().rev().find(|r| !r.is_closing()),
        }
    }
}

/// Reports which tags in a chunk of text are left open.
pub trait MarkupClassifier {
    /// Classify `text`. Must return one of the two outcomes for any input, including `""`.
    fn classify(&mut self, text: &str) -> Classification;
}

impl<F> MarkupClassifier for F
where
    F: FnMut(&str) -> Classification,
{
    fn classify(&mut self, text: &str) -> Classification {
        self(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_records_empty_is_balanced() {
        assert_eq!(Classification::from_records(Vec::new()), Classification::Balanced);
    }

    #[test]
    fn test_from_records_sorts_by_position() {
        let c = Classification::from_records(vec![
            TagRecord::new("<b>", 9),
            TagRecord::new("<a>", 2),
        ]);
        assert_eq!(
            c,
            Classification::Unclosed(vec![TagRecord::new("<a>", 2), TagRecord::new("<b>", 9)])
        );
    }

    #[test]
    fn test_nearest_open_skips_closers() {
        let c = Classification::Unclosed(vec![
            TagRecord::new("<section>", 0),
            TagRecord::new("<p class=\"x\">", 10),
            TagRecord::new("</div>", 30),
        ]);
        assert_eq!(c.nearest_open().map(|r| r.code.as_str()), Some("<p class=\"x\">"));

        let only_closers = Classification::Unclosed(vec![TagRecord::new("</div>", 3)]);
        assert_eq!(only_closers.nearest_open(), None);
        assert_eq!(Classification::Balanced.nearest_open(), None);
    }

    #[test]
    fn test_closure_classifier() {
        let mut calls = 0;
        let mut classifier = |_: &str| {
            calls += 1;
            Classification::Balanced
        };
        assert_eq!(classifier.classify("<a></a>"), Classification::Balanced);
        assert_eq!(calls, 1);
    }
}
