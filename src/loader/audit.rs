// src/loader/audit.rs
// =============================================================================
// A read-only health check of the repositories a load cycle would pick up.
//
// For every tagged repository it reports what the site would be missing:
// no README at all, a README without front-matter, no title, or no
// description anywhere. When the description is missing, a suggestion is
// generated from the README body so it can be pasted into the front-matter.
//
// The audit shares discovery and the fan-out with the loader but never
// writes to a store.
// =============================================================================

use serde::Serialize;
use tracing::info;

use super::GithubLoader;
use crate::content::{
    scalar_to_string, summarize, ContentEntry, ParsedDocument, DEFAULT_SUMMARY_LENGTH,
};
use crate::error::{LoadError, RepoError};
use crate::github::RepoDescriptor;

/// One problem found in a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum AuditIssue {
    /// The content file could not be fetched.
    MissingContent { reason: String },
    /// The content file exists but its front-matter does not parse.
    InvalidFrontMatter { reason: String },
    NoFrontMatter,
    /// The front-matter parses but the entry breaks the content schema
    /// (a list where a string belongs, an invalid githubUrl, ...).
    InvalidEntry { reason: String },
    MissingTitle,
    /// Neither the front-matter nor the repository has a description.
    MissingDescription,
}

impl AuditIssue {
    pub fn label(&self) -> &'static str {
        match self {
            AuditIssue::MissingContent { .. } => "missing content",
            AuditIssue::InvalidFrontMatter { .. } => "invalid front-matter",
            AuditIssue::NoFrontMatter => "no front-matter",
            AuditIssue::InvalidEntry { .. } => "invalid entry",
            AuditIssue::MissingTitle => "missing title",
            AuditIssue::MissingDescription => "missing description",
        }
    }
}

/// Audit result for one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoAudit {
    pub name: String,
    pub github_url: String,
    /// Title from the front-matter, if any.
    pub title: Option<String>,
    /// Description the entry would get (front-matter, else repository).
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_description: Option<String>,
    pub issues: Vec<AuditIssue>,
}

impl RepoAudit {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    fn from_outcome(repo: RepoDescriptor, outcome: Result<ParsedDocument, RepoError>) -> Self {
        let mut audit = RepoAudit {
            name: repo.name.clone(),
            github_url: repo.html_url.clone(),
            title: None,
            description: repo.description.clone(),
            suggested_description: None,
            issues: Vec::new(),
        };

        let doc = match outcome {
            Ok(doc) => doc,
            Err(err @ RepoError::FrontMatter(_)) => {
                audit.issues.push(AuditIssue::InvalidFrontMatter {
                    reason: err.to_string(),
                });
                return audit;
            }
            Err(err) => {
                audit.issues.push(AuditIssue::MissingContent {
                    reason: err.to_string(),
                });
                return audit;
            }
        };

        if !doc.has_front_matter {
            audit.issues.push(AuditIssue::NoFrontMatter);
        }

        // Same merge and schema rules as a load cycle, so `check` flags every
        // repository `load` would drop.
        if let Err(err) = ContentEntry::from_document(&repo, doc.clone()) {
            audit.issues.push(AuditIssue::InvalidEntry {
                reason: err.to_string(),
            });
        }

        audit.title = doc.get_str("title").filter(|t| !t.trim().is_empty());
        if audit.title.is_none() && !is_non_scalar(&doc, "title") {
            audit.issues.push(AuditIssue::MissingTitle);
        }

        audit.description = doc
            .get_str("description")
            .or(repo.description)
            .filter(|d| !d.trim().is_empty());
        if audit.description.is_none() && !is_non_scalar(&doc, "description") {
            audit.issues.push(AuditIssue::MissingDescription);
            let suggestion = summarize(&doc.body, DEFAULT_SUMMARY_LENGTH);
            audit.suggested_description = (!suggestion.is_empty()).then_some(suggestion);
        }

        audit
    }
}

// A list or map where a string belongs; already reported as InvalidEntry.
fn is_non_scalar(doc: &ParsedDocument, key: &str) -> bool {
    doc.data
        .get(key)
        .is_some_and(|value| !value.is_null() && scalar_to_string(value).is_none())
}

impl GithubLoader {
    /// Audits every tagged repository, sorted by name.
    pub async fn audit(&self) -> Result<Vec<RepoAudit>, LoadError> {
        let repos = self.discover().await?;

        let mut audits: Vec<RepoAudit> = self
            .fetch_documents(repos)
            .await
            .into_iter()
            .map(|(repo, outcome)| RepoAudit::from_outcome(repo, outcome))
            .collect();
        audits.sort_by(|a, b| a.name.cmp(&b.name));

        let with_issues = audits.iter().filter(|a| !a.is_ok()).count();
        info!(checked = audits.len(), with_issues, "audit finished");
        Ok(audits)
    }
}
