// src/lib.rs
// =============================================================================
// repo-content-loader: turn topic-tagged GitHub repositories into content
// entries for a static site.
//
// One load cycle:
//   LoaderConfig -> search API (1 request) -> README per repo (N requests,
//   concurrent) -> front-matter parse -> ContentEntry -> ContentStore
//
// Typical use:
//
//   let loader = GithubLoader::new(LoaderConfig::from_env()?)?;
//   let store = MemoryStore::new();
//   let report = loader.load(&store).await?;
//
// Modules:
// - config: LoaderConfig and its environment lookup
// - github: search and raw-file requests
// - content: front-matter parsing, entry merge, schema check, summaries
// - store: the ContentStore trait and the in-memory store
// - loader: GithubLoader (the pipeline) and the read-only audit
// - error: LoadError / DiscoveryError / RepoError
// - logging: tracing subscriber setup for binaries
// =============================================================================

pub mod config;
pub mod content;
pub mod error;
pub mod github;
pub mod loader;
pub mod logging;
pub mod store;

pub use config::{ConfigError, LoaderConfig};
pub use content::{ContentEntry, EntryData};
pub use error::{DiscoveryError, LoadError, RepoError};
pub use loader::{AuditIssue, ContentLoader, GithubLoader, LoadReport, RepoAudit, SkippedRepo};
pub use store::{ContentStore, MemoryStore};
