use autoclose_core::{
    AutoCloseSettings, AutoCloser, Classification, Position, RopeBuffer, TagRecord,
};

/// Naive classifier: every opening tag is reported unless a closer with the same name follows.
fn naive_classifier(text: &str) -> Classification {
    let mut records = Vec::new();
    for (start, _) in text.match_indices('<') {
        let Some(len) = text[start..].find('>') else {
            continue;
        };
        let code = &text[start..=start + len];
        if code.starts_with("</") {
            continue;
        }
        let name = code
            .trim_start_matches('<')
            .trim_end_matches('>')
            .split(' ')
            .next()
            .unwrap_or_default();
        if !text[start..].contains(&format!("</{name}>")) {
            records.push(TagRecord::new(code, text[..start].chars().count()));
        }
    }
    Classification::from_records(records)
}

fn main() {
    let mut buffer = RopeBuffer::new(
        "<ul class=\"menu\">\n  <li>Home</\n  <li>About</\n</",
    );
    let cursors = [
        Position::new(1, 12),
        Position::new(2, 13),
        Position::new(3, 2),
    ];

    let settings = AutoCloseSettings::from_json(r#"{ "batchSize": 2 }"#)
        .unwrap_or_default();
    let mut closer = AutoCloser::new(settings, naive_classifier);

    println!("Before:\n{}\n", buffer.get_text());
    for insertion in closer.on_text_typed(&mut buffer, "/", &cursors) {
        println!(
            "inserted {:?} at line {}, column {}",
            insertion.text, insertion.position.line, insertion.position.column
        );
    }
    println!("\nAfter:\n{}", buffer.get_text());
}
