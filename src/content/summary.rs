// src/content/summary.rs
// =============================================================================
// This module turns a Markdown body into a short plain-text description.
//
// It is used by the `check` command to suggest a description for posts that
// have none. Steps:
// 1. Walk the Markdown with pulldown-cmark and keep only the visible text
//    (link text stays, images and raw HTML are dropped)
// 2. Collapse all whitespace to single spaces
// 3. Take whole sentences from the start until the next one would push the
//    result past the length limit
//
// Rust concepts:
// - Iterators over parser events
// - Pattern matching on enum variants with ignored fields
// - Char-by-char scanning with a peekable iterator
// =============================================================================

use pulldown_cmark::{Event, Parser, Tag};

/// Default maximum length of a generated description, in characters.
pub const DEFAULT_SUMMARY_LENGTH: usize = 300;

/// Builds a description of at most `max_len` characters from `markdown`.
///
/// Returns an empty string for a body with no prose.
pub fn summarize(markdown: &str, max_len: usize) -> String {
    let text = plain_text(markdown);

    let mut description = String::new();
    for sentence in split_sentences(&text) {
        let sentence = sentence.trim_end_matches(['.', '!', '?']);
        if sentence.is_empty() {
            continue;
        }
        if description.chars().count() + sentence.chars().count() + 1 < max_len {
            description.push_str(sentence);
            description.push_str(". ");
        } else {
            break;
        }
    }

    description.trim().to_string()
}

// Extracts visible text, one space between blocks
fn plain_text(markdown: &str) -> String {
    let mut out = String::new();
    // Image alt text arrives as Text events between Start/End(Image)
    let mut image_depth = 0usize;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Image(..)) => image_depth += 1,
            Event::End(Tag::Image(..)) => image_depth = image_depth.saturating_sub(1),
            Event::Text(text) | Event::Code(text) if image_depth == 0 => {
                out.push_str(&text);
            }
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            // Only block ends separate words; inline ends (emphasis, links)
            // sit directly against the following punctuation.
            Event::End(tag) if is_block(&tag) => out.push(' '),
            // Html, InlineHtml-as-Html, rules, footnote refs, task markers
            _ => {}
        }
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_block(tag: &Tag) -> bool {
    matches!(
        tag,
        Tag::Paragraph
            | Tag::Heading(..)
            | Tag::BlockQuote
            | Tag::CodeBlock(_)
            | Tag::List(_)
            | Tag::Item
            | Tag::FootnoteDefinition(_)
            | Tag::Table(_)
            | Tag::TableHead
            | Tag::TableRow
            | Tag::TableCell
    )
}

// Splits after '.', '!' or '?' when followed by whitespace.
// The punctuation stays on the sentence; the whitespace is dropped.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if matches!(ch, '.' | '!' | '?') {
            if let Some(&(next_idx, next)) = chars.peek() {
                if next.is_whitespace() {
                    sentences.push(&text[start..idx + ch.len_utf8()]);
                    start = next_idx + next.len_utf8();
                    chars.next();
                }
            }
        }
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}
