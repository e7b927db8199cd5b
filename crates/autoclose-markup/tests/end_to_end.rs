use autoclose_core::{
    AutoCloseSettings, AutoCloser, Classification, MarkupClassifier, Position, Resolution,
    RopeBuffer, TextBuffer, close_tags, resolve,
};
use autoclose_markup::TagBalanceClassifier;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Counts classifier invocations while delegating to the real classifier.
struct Counting {
    inner: TagBalanceClassifier,
    calls: usize,
}

impl Counting {
    fn new() -> Self {
        Self {
            inner: TagBalanceClassifier::new(),
            calls: 0,
        }
    }
}

impl MarkupClassifier for Counting {
    fn classify(&mut self, text: &str) -> Classification {
        self.calls += 1;
        self.inner.classify(text)
    }
}

fn settings(batch: usize) -> AutoCloseSettings {
    AutoCloseSettings::default().with_batch_size(batch).unwrap()
}

#[test]
fn test_closes_attribute_bearing_tag() {
    let mut buffer = RopeBuffer::new("<div class=\"a\" id=\"b\">\n  <p>text</p>\n  </");
    let insertions = close_tags(
        &mut buffer,
        &[Position::new(2, 4)],
        &mut TagBalanceClassifier::new(),
        &AutoCloseSettings::default(),
    );

    assert_eq!(insertions.len(), 1);
    assert_eq!(insertions[0].text, "div>");
    assert_eq!(
        buffer.get_text(),
        "<div class=\"a\" id=\"b\">\n  <p>text</p>\n  </div>"
    );
}

#[test]
fn test_nested_same_name_returns_innermost() {
    let buffer = RopeBuffer::new("<div id=\"outer\"><div id=\"inner\"></");
    let resolution = resolve(
        &buffer,
        Position::new(0, 34),
        &mut TagBalanceClassifier::new(),
        &AutoCloseSettings::default(),
    );
    assert_eq!(
        resolution,
        Resolution::Found {
            code: "<div id=\"inner\">".to_string()
        }
    );
}

#[test]
fn test_balanced_document_inserts_nothing() {
    let text = "<html>\n<body></body>\n</html>\n</";
    let mut buffer = RopeBuffer::new(text);
    let mut classifier = Counting::new();
    let insertions = close_tags(
        &mut buffer,
        &[Position::new(3, 2)],
        &mut classifier,
        &settings(1),
    );

    assert!(insertions.is_empty());
    assert_eq!(buffer.get_text(), text);
    // Windows start at rows 2, 1 and 0.
    assert_eq!(classifier.calls, 3);
}

#[test]
fn test_comparison_in_text_inserts_nothing() {
    let text = "<p>if a<b then</p>\n</";
    let mut buffer = RopeBuffer::new(text);
    let insertions = close_tags(
        &mut buffer,
        &[Position::new(1, 2)],
        &mut TagBalanceClassifier::new(),
        &AutoCloseSettings::default(),
    );
    assert!(insertions.is_empty());
    assert_eq!(buffer.get_text(), text);
}

#[test]
fn test_comparison_in_script_does_not_hide_enclosing_tag() {
    let buffer = RopeBuffer::new("<section>\n<script>if (a<b) { x(); }</script>\n</");
    let resolution = resolve(
        &buffer,
        Position::new(2, 2),
        &mut TagBalanceClassifier::new(),
        &AutoCloseSettings::default(),
    );
    assert_eq!(resolution.code(), "<section>");
}

#[test]
fn test_window_starting_inside_comment_reports_commented_tag() {
    // A batch of 1 first sees "-->\n", then "<p>\n-->\n": the comment opener is outside the
    // window, so the commented-out tag is taken as open. A larger batch sees the whole comment.
    let text = "<ul>\n<!--\n<p>\n-->\n</";
    let buffer = RopeBuffer::new(text);

    let narrow = resolve(&buffer, Position::new(4, 2), &mut Counting::new(), &settings(1));
    assert_eq!(narrow.code(), "<p>");

    let wide = resolve(&buffer, Position::new(4, 2), &mut Counting::new(), &settings(4));
    assert_eq!(wide.code(), "<ul>");
}

#[test]
fn test_row_zero_without_text_is_a_single_step() {
    let mut buffer = RopeBuffer::new("</");
    let mut classifier = Counting::new();
    let insertions = close_tags(
        &mut buffer,
        &[Position::new(0, 2)],
        &mut classifier,
        &AutoCloseSettings::default(),
    );
    assert!(insertions.is_empty());
    assert_eq!(classifier.calls, 0);
}

#[test]
fn test_multi_cursor_rows_two_and_five() {
    let text = "<body>\n<span>\n  </\n<p>\n text\n  </";
    let mut buffer = RopeBuffer::new(text);
    let cursors = [Position::new(5, 4), Position::new(2, 4)];
    let insertions = close_tags(
        &mut buffer,
        &cursors,
        &mut TagBalanceClassifier::new(),
        &AutoCloseSettings::default(),
    );

    let applied: Vec<(Position, &str)> = insertions
        .iter()
        .map(|i| (i.position, i.text.as_str()))
        .collect();
    assert_eq!(
        applied,
        vec![(Position::new(2, 4), "span>"), (Position::new(5, 4), "p>")]
    );
    assert_eq!(
        buffer.get_text(),
        "<body>\n<span>\n  </span>\n<p>\n text\n  </p>"
    );
}

#[test]
fn test_closer_outside_window_is_not_a_candidate() {
    // With a batch of 1 the first window is "</li>\n", whose closer lost its opener.
    let text = "<ol>\n<li>a\n</li>\n</";
    let buffer = RopeBuffer::new(text);
    let mut classifier = Counting::new();
    let resolution = resolve(&buffer, Position::new(3, 2), &mut classifier, &settings(1));

    assert_eq!(resolution.code(), "<ol>");
    assert_eq!(classifier.calls, 3);
}

#[test]
fn test_scan_growth_call_count() {
    for (k, batch) in [(7usize, 2usize), (10, 3), (12, 4), (40, 7)] {
        let mut text = String::from("<table>\n");
        for row in 1..k {
            text.push_str(&format!("<td>{row}</td>\n"));
        }
        text.push_str("</");
        let buffer = RopeBuffer::new(&text);

        let mut classifier = Counting::new();
        let resolution = resolve(&buffer, Position::new(k, 2), &mut classifier, &settings(batch));

        assert_eq!(resolution.closing_text(), "table>");
        assert_eq!(classifier.calls, k.div_ceil(batch), "k={k} batch={batch}");
    }
}

#[test]
fn test_same_row_cursors_keep_their_targets() {
    let mut buffer = RopeBuffer::new("<a><b></ <i></");
    let mut closer = AutoCloser::new(AutoCloseSettings::default(), TagBalanceClassifier::new());
    let insertions =
        closer.on_text_typed(&mut buffer, "/", &[Position::new(0, 14), Position::new(0, 8)]);

    assert_eq!(insertions.len(), 2);
    assert_eq!(buffer.get_text(), "<a><b></b> <i></i>");
}

#[test]
fn test_ineligible_cursor_is_ignored_in_batch() {
    let mut buffer = RopeBuffer::new("<em></\n<strong>/");
    let insertions = close_tags(
        &mut buffer,
        &[Position::new(0, 6), Position::new(1, 9)],
        &mut TagBalanceClassifier::new(),
        &AutoCloseSettings::default(),
    );
    assert_eq!(insertions.len(), 1);
    assert_eq!(buffer.get_text(), "<em></em>\n<strong>/");
}

#[test]
fn test_randomized_multi_cursor_rows() {
    const NAMES: [&str; 5] = ["div", "span", "p", "li", "section"];
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..50 {
        let rows = rng.gen_range(2..30);
        let mut lines = Vec::with_capacity(rows);
        let mut expected = Vec::with_capacity(rows);
        let mut cursors = Vec::new();

        for row in 0..rows {
            let name = NAMES[rng.gen_range(0..NAMES.len())];
            if rng.gen_bool(0.5) {
                let line = format!("<{name} data-row=\"{row}\"></");
                cursors.push(Position::new(row, line.chars().count()));
                expected.push(format!("<{name} data-row=\"{row}\"></{name}>"));
                lines.push(line);
            } else {
                let line = format!("<{name}>x</{name}>");
                expected.push(line.clone());
                lines.push(line);
            }
        }

        let mut buffer = RopeBuffer::new(&lines.join("\n"));
        let batch = rng.gen_range(1..6);
        let insertions = close_tags(
            &mut buffer,
            &cursors,
            &mut TagBalanceClassifier::new(),
            &settings(batch),
        );

        assert_eq!(insertions.len(), cursors.len());
        assert_eq!(buffer.get_text(), expected.join("\n"));
        assert_eq!(buffer.line_count(), rows);
    }
}
