//! Opening tag to closing tag transform.

/// Closing text for an opening tag's source.
///
/// The caller has already typed `</`, so only the tag name and the trailing `>` are returned.
/// Attributes are dropped (everything from the first space on) and any `<`/`>` left in the name
/// is removed. The name itself is not validated.
///
/// An empty input yields an empty output, meaning nothing should be inserted.
///
/// ```rust
/// use autoclose_core::closing_tag;
///
/// assert_eq!(closing_tag("<div class=\"a\" id=\"b\">"), "div>");
/// assert_eq!(closing_tag(""), "");
/// ```
pub fn closing_tag(opening: &str) -> String {
    if opening.is_empty() {
        return String::new();
    }

    let head = opening.split(' ').next().unwrap_or(opening);
    let mut out: String = head.chars().filter(|&c| c != '<' && c != '>').collect();
    out.push('>');
    out
}
