//! Markup and footnote stripping ahead of clause splitting
//!
//! Sefaria-style passages carry `<i class="footnote">` spans that may contain
//! nested `<i>` emphasis. A lazy regex would stop at the first nested `</i>`
//! and leave footnote text behind, so footnote spans are matched by counting
//! `<i>` depth instead.

use regex::Regex;
use std::sync::LazyLock;

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid line break regex"));

static FOOTNOTE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<sup\s+class="footnote-marker"[^>]*>.*?</sup>"#)
        .expect("valid footnote marker regex")
});

static FOOTNOTE_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<i\s+class="footnote"[^>]*>"#).expect("valid footnote regex")
});

static ITALIC_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(/?)i(?:\s[^>]*)?>").expect("valid italic tag regex"));

static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

static INLINE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+").expect("valid whitespace regex"));

static PADDED_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" *\n *").expect("valid newline regex"));

/// Reduce a marked-up passage to plain text.
///
/// Entities are decoded, `<br>` becomes a newline, footnote markers and
/// footnote bodies are removed, every other tag and `*` is dropped, and
/// inline whitespace is collapsed. Newlines survive.
pub fn strip_markup_and_footnotes(text: &str) -> String {
    let decoded = html_escape::decode_html_entities(text);
    let with_breaks = LINE_BREAK.replace_all(&decoded, "\n");
    let without_markers = FOOTNOTE_MARKER.replace_all(&with_breaks, "");
    let without_footnotes = remove_footnotes(&without_markers);
    let untagged = ANY_TAG.replace_all(&without_footnotes, "");
    let unstarred = untagged.replace('*', "");
    let collapsed = INLINE_WHITESPACE.replace_all(&unstarred, " ");
    let tidy = PADDED_NEWLINE.replace_all(&collapsed, "\n");
    tidy.trim().to_string()
}

/// Remove every `<i class="footnote">` span together with its nested content.
///
/// An unclosed footnote keeps its content; only the tags go, later.
pub fn remove_footnotes(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(open) = FOOTNOTE_OPEN.find_at(text, cursor) {
        output.push_str(&text[cursor..open.start()]);

        match matching_close(text, open.end()) {
            Some(close_end) => cursor = close_end,
            None => {
                log::debug!("unclosed footnote at byte {}", open.start());
                output.push_str(&text[open.start()..]);
                return output;
            }
        }
    }

    output.push_str(&text[cursor..]);
    output
}

/// End offset of the `</i>` that balances an already-open `<i>` at `from`
fn matching_close(text: &str, from: usize) -> Option<usize> {
    let mut depth = 1usize;
    for tag in ITALIC_TAG.captures_iter(&text[from..]) {
        let whole = tag.get(0)?;
        if tag.get(1).is_some_and(|slash| !slash.as_str().is_empty()) {
            depth -= 1;
            if depth == 0 {
                return Some(from + whole.end());
            }
        } else {
            depth += 1;
        }
    }
    None
}
