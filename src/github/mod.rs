// src/github/mod.rs
// =============================================================================
// This module talks to GitHub.
//
// Currently implements:
// - Searching for repositories owned by an account and tagged with a topic
//   (authenticated, one request, one page)
// - Fetching a raw file (README.md by default) from a repository's default
//   branch via raw.githubusercontent.com (unauthenticated)
//
// Both functions take the reqwest Client as a parameter instead of creating
// their own, so one connection pool is shared across the whole load cycle.
// =============================================================================

mod fetch;
mod search;

pub use fetch::{fetch_raw_file, raw_content_url};
pub use search::{search_repositories, search_url, RepoDescriptor};
