//! Paragraph text extraction.
//!
//! Only `<p>` elements contribute text. Headings, links outside paragraphs, navigation
//! and every other element are discarded. Text nested in `<script>`, `<style>` or
//! `<noscript>` inside a paragraph is skipped as well.

use scraper::{Html, Node, Selector};

const SKIPPED_PARENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Returns the text of every non-empty paragraph, joined with single spaces.
///
/// Each paragraph's text is trimmed before joining. Returns an empty string when the
/// document has no paragraphs or all of them are blank.
pub fn extract_paragraph_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("p") else {
        return String::new();
    };

    document
        .select(&selector)
        .map(|paragraph| {
            paragraph
                .descendants()
                .filter_map(|node| {
                    let Node::Text(text) = node.value() else {
                        return None;
                    };
                    let skipped = node
                        .parent()
                        .and_then(|parent| parent.value().as_element())
                        .is_some_and(|el| SKIPPED_PARENTS.contains(&el.name()));
                    (!skipped).then_some(&**text)
                })
                .collect::<String>()
        })
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
