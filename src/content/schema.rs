// src/content/schema.rs
// =============================================================================
// The shape every content entry must have before the site accepts it:
//
//   title        string, required
//   date         string, required
//   description  string, optional
//   githubUrl    absolute URL, required
//   stars        number, optional
//
// The types already guarantee most of this. The only runtime check left is
// that githubUrl really is an absolute URL.
// =============================================================================

use thiserror::Error;
use url::Url;

use super::EntryData;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// A front-matter field the schema types as a string held a list or map.
    #[error("Front-matter field '{0}' must be a string")]
    NotScalar(&'static str),

    #[error("githubUrl '{value}' is not a valid URL: {reason}")]
    InvalidUrl { value: String, reason: String },
}

/// Checks an assembled entry against the content schema.
pub fn validate_entry(data: &EntryData) -> Result<(), SchemaError> {
    Url::parse(&data.github_url).map_err(|e| SchemaError::InvalidUrl {
        value: data.github_url.clone(),
        reason: e.to_string(),
    })?;
    Ok(())
}
