// src/loader/pipeline.rs
// =============================================================================
// GithubLoader runs one load cycle:
//
// 1. Discovery: one authenticated search request. Any failure here is fatal
//    and the store is left exactly as it was.
// 2. Fetch: one unauthenticated request per repository, run concurrently.
//    A failure only drops that repository.
// 3. Parse + merge: front-matter is split off and merged with the
//    repository metadata into a ContentEntry.
// 4. Persist: the finished batch replaces the store contents in one step.
//
// Every per-repository failure is logged with tracing::warn! and recorded in
// the LoadReport, so callers can see exactly which repositories were left out.
//
// Rust concepts:
// - futures::stream::iter + buffer_unordered for a bounded fan-out
// - async-trait for an async method on a trait object (dyn ContentLoader)
// - Result::and_then to chain per-repository steps
// =============================================================================

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::LoaderConfig;
use crate::content::{parse_front_matter, ContentEntry, ParsedDocument};
use crate::error::{DiscoveryError, LoadError, RepoError};
use crate::github::{self, RepoDescriptor};
use crate::store::ContentStore;

/// Something that can fill a [`ContentStore`] with entries.
#[async_trait]
pub trait ContentLoader: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &str;

    /// Runs one full cycle and replaces the store contents with the result.
    async fn load(&self, store: &dyn ContentStore) -> Result<LoadReport, LoadError>;
}

/// A repository that produced no entry, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRepo {
    pub name: String,
    pub reason: String,
}

/// Outcome of a successful load cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Ids written to the store, sorted.
    pub loaded: Vec<String>,
    /// Repositories left out, sorted by name.
    pub skipped: Vec<SkippedRepo>,
}

impl LoadReport {
    /// True when every discovered repository produced an entry.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Entries built by one cycle, before they are written anywhere.
#[derive(Debug, Clone, Default)]
pub struct Collected {
    pub entries: Vec<ContentEntry>,
    pub skipped: Vec<SkippedRepo>,
}

/// Loads README front-matter from topic-tagged GitHub repositories.
#[derive(Debug, Clone)]
pub struct GithubLoader {
    config: LoaderConfig,
    client: Client,
}

impl GithubLoader {
    pub fn new(config: LoaderConfig) -> Result<Self, LoadError> {
        // No default auth header: the token is only attached to the search
        // request, raw file downloads go out unauthenticated.
        let client = Client::builder()
            .user_agent(config.user_agent())
            .build()
            .map_err(LoadError::Client)?;

        Ok(Self { config, client })
    }

    /// Builds a loader from ACCOUNT_USERNAME / ACCOUNT_TOKEN.
    pub fn from_env() -> Result<Self, LoadError> {
        Self::new(LoaderConfig::from_env()?)
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Step 1: the repositories that match the configured account and topic.
    pub async fn discover(&self) -> Result<Vec<RepoDescriptor>, DiscoveryError> {
        github::search_repositories(&self.client, &self.config).await
    }

    /// Fetches and parses one repository's content file.
    pub async fn fetch_document(&self, repo: &RepoDescriptor) -> Result<ParsedDocument, RepoError> {
        let url = github::raw_content_url(&self.config, repo);
        let text = github::fetch_raw_file(&self.client, &url).await?;
        Ok(parse_front_matter(&text)?)
    }

    /// Steps 2 and 3 for every repository, concurrently.
    ///
    /// Results come back in completion order, one per input repository.
    pub(super) async fn fetch_documents(
        &self,
        repos: Vec<RepoDescriptor>,
    ) -> Vec<(RepoDescriptor, Result<ParsedDocument, RepoError>)> {
        let this = self;
        let tasks = repos.into_iter().map(move |repo| async move {
            let outcome = this.fetch_document(&repo).await;
            (repo, outcome)
        });

        stream::iter(tasks)
            .buffer_unordered(self.config.concurrency())
            .collect()
            .await
    }

    /// Runs discovery, fetch and merge without touching any store.
    pub async fn collect(&self) -> Result<Collected, LoadError> {
        let repos = self.discover().await?;
        info!(
            count = repos.len(),
            user = self.config.username(),
            topic = self.config.topic(),
            "discovered repositories"
        );

        let mut collected = Collected::default();
        for (repo, outcome) in self.fetch_documents(repos).await {
            let entry = outcome
                .and_then(|doc| ContentEntry::from_document(&repo, doc).map_err(RepoError::from));

            match entry {
                Ok(entry) => collected.entries.push(entry),
                Err(err) => {
                    warn!(repo = %repo.name, error = %err, "skipping repository");
                    collected.skipped.push(SkippedRepo {
                        name: repo.name,
                        reason: err.to_string(),
                    });
                }
            }
        }

        collected.entries.sort_by(|a, b| a.id.cmp(&b.id));
        collected.skipped.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(collected)
    }
}

#[async_trait]
impl ContentLoader for GithubLoader {
    fn name(&self) -> &str {
        "github"
    }

    async fn load(&self, store: &dyn ContentStore) -> Result<LoadReport, LoadError> {
        let Collected { entries, skipped } = self.collect().await?;
        let loaded: Vec<String> = entries.iter().map(|e| e.id.clone()).collect();

        store.replace_all(entries);

        info!(
            loader = self.name(),
            loaded = loaded.len(),
            skipped = skipped.len(),
            "load cycle finished"
        );
        Ok(LoadReport { loaded, skipped })
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why buffer_unordered instead of a for loop with .await?
//    - A loop would download one README, wait, then the next
//    - buffer_unordered keeps up to N downloads in flight and yields each
//      result as soon as it is ready
//    - Results arrive in completion order, which is why collect() sorts
//
// 2. Why does each task return (RepoDescriptor, Result<..>)?
//    - A failed task must not stop the others, so errors are values here,
//      not early returns with ?
//    - Keeping the descriptor next to the result lets us name the
//      repository in the warning
//
// 3. What does #[async_trait] do?
//    - It rewrites `async fn load` into a method returning a boxed future
//    - That makes `&dyn ContentLoader` possible
// -----------------------------------------------------------------------------
