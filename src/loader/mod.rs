// src/loader/mod.rs
// =============================================================================
// The content loader: discovery -> fan-out fetch -> parse -> store.
//
// Submodules:
// - pipeline: GithubLoader and the ContentLoader trait it implements
// - audit: a read-only pass over the same repositories that reports
//   README problems (missing front-matter, title, description)
// =============================================================================

mod audit;
mod pipeline;

pub use audit::{AuditIssue, RepoAudit};
pub use pipeline::{Collected, ContentLoader, GithubLoader, LoadReport, SkippedRepo};
