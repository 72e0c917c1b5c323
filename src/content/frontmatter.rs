// src/content/frontmatter.rs
// =============================================================================
// This module extracts YAML front-matter from the top of a text file.
//
// A document with front-matter looks like:
//
//   ---
//   title: Hello
//   date: 2021-01-01
//   ---
//   Body text
//
// Rules:
// - The very first line must be `---` (a UTF-8 BOM in front is ignored)
// - The block ends at the next line that is exactly `---`
// - Everything after that closing line is the body, unchanged
// - No opening line, or no closing line: no front-matter, whole text is body
// - An empty block gives empty metadata
// - The block must be a YAML mapping with string keys
//
// Rust concepts:
// - str::split_inclusive: iterate lines while keeping the '\n' so byte
//   offsets stay correct
// - let-else: early return when a pattern doesn't match
// =============================================================================

use std::collections::BTreeMap;

use serde_yaml::Value;
use thiserror::Error;

const DELIMITER: &str = "---";

#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("Invalid front-matter YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A document split into its metadata block and the remaining body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedDocument {
    /// Parsed front-matter keys; empty when there was no block.
    pub data: BTreeMap<String, Value>,
    /// Text after the closing delimiter (or the whole input if there was none).
    pub body: String,
    /// Whether a delimited block was found at all.
    pub has_front_matter: bool,
}

impl ParsedDocument {
    /// Looks up a key and renders it as a string if it is a scalar.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.data.get(key).and_then(scalar_to_string)
    }
}

/// Splits `text` into front-matter and body.
pub fn parse_front_matter(text: &str) -> Result<ParsedDocument, FrontMatterError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let Some(rest) = strip_opening_line(text) else {
        return Ok(body_only(text));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok(ParsedDocument {
                data: parse_block(yaml)?,
                body: body.to_string(),
                has_front_matter: true,
            });
        }
        offset += line.len();
    }

    // Opening delimiter but never closed: treat the file as plain Markdown
    // (a leading `---` is also a valid thematic break).
    Ok(body_only(text))
}

/// Renders a YAML scalar as a string. Null, sequences and mappings give None.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn strip_opening_line(text: &str) -> Option<&str> {
    let (first, rest) = match text.find('\n') {
        Some(idx) => (&text[..idx], &text[idx + 1..]),
        None => (text, ""),
    };
    (first.trim_end() == DELIMITER).then_some(rest)
}

fn parse_block(yaml: &str) -> Result<BTreeMap<String, Value>, FrontMatterError> {
    let only_comments = yaml
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#'));
    if only_comments {
        return Ok(BTreeMap::new());
    }
    // `~` or `null` on its own is a valid, empty block too.
    let parsed: Option<BTreeMap<String, Value>> = serde_yaml::from_str(yaml)?;
    Ok(parsed.unwrap_or_default())
}

fn body_only(text: &str) -> ParsedDocument {
    ParsedDocument {
        data: BTreeMap::new(),
        body: text.to_string(),
        has_front_matter: false,
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why split_inclusive('\n') and not lines()?
//    - lines() drops the line endings, so we could no longer tell how many
//      bytes each line took
//    - We need exact byte offsets to slice the YAML and the body out of
//      the original string without copying line by line
//
// 2. What is serde_yaml::Value?
//    - An "any YAML" enum: String, Number, Bool, Sequence, Mapping, ...
//    - We keep values untyped because front-matter keys are open-ended
// -----------------------------------------------------------------------------
