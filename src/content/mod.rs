// src/content/mod.rs
// =============================================================================
// This module turns raw README text into content entries.
//
// Submodules:
// - frontmatter: splits the leading `---` YAML block from the body
// - entry: merges front-matter with repository metadata into a ContentEntry
// - schema: checks an entry against the shape the site expects
// - summary: derives a plain-text description from a Markdown body
//
// Nothing in here does I/O; the loader hands text in and gets entries back.
// =============================================================================

mod entry;
mod frontmatter;
mod schema;
mod summary;

pub use entry::{ContentEntry, EntryData};
pub use frontmatter::{parse_front_matter, scalar_to_string, FrontMatterError, ParsedDocument};
pub use schema::{validate_entry, SchemaError};
pub use summary::{summarize, DEFAULT_SUMMARY_LENGTH};
