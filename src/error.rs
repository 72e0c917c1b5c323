// src/error.rs
// =============================================================================
// Error types for a load cycle.
//
// There are three kinds of failure:
// - ConfigError (src/config.rs): fatal, raised before any network call
// - DiscoveryError: the search request failed; fatal for the whole cycle
// - RepoError: one repository could not be turned into an entry; the
//   loader logs it, records it in the report and moves on
//
// LoadError is what callers of ContentLoader::load() see. RepoError never
// reaches them directly, only as a SkippedRepo inside the LoadReport.
//
// Rust concepts:
// - thiserror: derives std::error::Error and Display from attributes
// - #[from]: lets the ? operator convert one error type into another
// =============================================================================

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ConfigError;
use crate::content::{FrontMatterError, SchemaError};

/// Fatal errors that abort a load cycle.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
}

/// The repository search could not be completed.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Repository search request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response. `message` is GitHub's own explanation when the body
    /// carried one, otherwise the canonical reason phrase.
    #[error("Repository search failed: HTTP {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("Unexpected repository search response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Why a single repository was left out of the results.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Request for {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("No content at {url}: HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error(transparent)]
    FrontMatter(#[from] FrontMatterError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl RepoError {
    /// True when the repository simply has no file at the content path.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepoError::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}
