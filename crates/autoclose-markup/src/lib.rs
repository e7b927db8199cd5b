//! `autoclose-markup` - Default (regex-based) markup balance classifier for `autoclose-core`.
//!
//! [`TagBalanceClassifier`] scans a chunk of HTML/XML-like text and reports the tags that are
//! left without a partner inside that chunk. It is *not* a parser: it does not validate
//! nesting, does not know about void elements, and treats anything tag-shaped as a tag.
//!
//! Recognized tokens:
//! - opening tags `<name attr="v">` (quoted attribute values may contain `>`); a `<name` that
//!   runs into another `<` before its `>` is text, not a tag
//! - closing tags `</name>`
//! - tags ending in `/>`, which close themselves and are never reported
//! - comments `<!-- -->`, declarations `<!DOCTYPE ...>` and processing instructions `<? ?>`,
//!   which are skipped

use autoclose_core::{Classification, MarkupClassifier, TagRecord};
use regex::Regex;

const TAG_PATTERN: &str = concat!(
    r#"(?s)<!--.*?-->"#,
    r#"|<![^>]*>"#,
    r#"|<\?.*?\?>"#,
    r#"|<(?P<close>/?)(?P<name>[A-Za-z][A-Za-z0-9_:.\-]*)(?P<rest>(?:[^<>"']|"[^"]*"|'[^']*')*)>"#,
);

/// A tag token found by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagToken {
    /// Full tag source (brackets and attributes included).
    pub code: String,
    /// Tag name as written.
    pub name: String,
    /// Character offset of the `<` in the scanned text.
    pub position: usize,
    /// What kind of tag this is.
    pub kind: TagKind,
}

/// Kind of a [`TagToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `<name ...>`
    Open,
    /// `</name>`
    Close,
    /// `<name ... />`
    SelfClosing,
}

/// Regex-driven markup balance classifier.
#[derive(Debug, Clone)]
pub struct TagBalanceClassifier {
    regex: Regex,
    case_sensitive: bool,
}

impl TagBalanceClassifier {
    /// Create a classifier with case-sensitive (XML-style) name matching.
    pub fn new() -> Self {
        Self {
            // The pattern is a compile-time constant covered by the tests below.
            regex: Regex::new(TAG_PATTERN).expect("valid tag pattern"),
            case_sensitive: true,
        }
    }

    /// Match tag names ignoring ASCII case (HTML-style), so `<DIV>` is closed by `</div>`.
    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    /// Returns `true` if tag names are compared case-sensitively.
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Scan `text` for tag tokens in document order.
    pub fn tokens(&self, text: &str) -> Vec<TagToken> {
        let mut tokens = Vec::new();
        let mut char_pos = 0usize;
        let mut byte_pos = 0usize;

        for caps in self.regex.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            char_pos += text[byte_pos..whole.start()].chars().count();
            byte_pos = whole.start();

            if let Some(name) = caps.name("name") {
                let is_close = caps.name("close").is_some_and(|m| !m.is_empty());
                let self_closing = caps
                    .name("rest")
                    .is_some_and(|m| m.as_str().trim_end().ends_with('/'));

                let kind = if is_close {
                    TagKind::Close
                } else if self_closing {
                    TagKind::SelfClosing
                } else {
                    TagKind::Open
                };

                tokens.push(TagToken {
                    code: whole.as_str().to_string(),
                    name: name.as_str().to_string(),
                    position: char_pos,
                    kind,
                });
            }
        }

        tokens
    }

    fn same_name(&self, a: &str, b: &str) -> bool {
        if self.case_sensitive {
            a == b
        } else {
            a.eq_ignore_ascii_case(b)
        }
    }
}

impl Default for TagBalanceClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupClassifier for TagBalanceClassifier {
    fn classify(&mut self, text: &str) -> Classification {
        let tokens = self.tokens(text);

        // Indices into `tokens` of opening tags still waiting for a closer, innermost last.
        let mut open: Vec<usize> = Vec::new();
        let mut unmatched_closers: Vec<usize> = Vec::new();

        for (index, token) in tokens.iter().enumerate() {
            match token.kind {
                TagKind::SelfClosing => {}
                TagKind::Open => open.push(index),
                TagKind::Close => {
                    let partner = open
                        .iter()
                        .rposition(|&i| self.same_name(&tokens[i].name, &token.name));
                    match partner {
                        Some(slot) => {
                            open.remove(slot);
                        }
                        None => unmatched_closers.push(index),
                    }
                }
            }
        }

        tracing::trace!(
            tokens = tokens.len(),
            open = open.len(),
            unmatched_closers = unmatched_closers.len(),
            "classified markup chunk"
        );

        let records = open
            .into_iter()
            .chain(unmatched_closers)
            .map(|i| TagRecord::new(tokens[i].code.clone(), tokens[i].position))
            .collect();
        Classification::from_records(records)
    }
}
