// src/content/entry.rs
// =============================================================================
// ContentEntry is what ends up in the store: one per repository.
//
// Merge rules, field by field:
//   title        front-matter `title`        else repository name
//   date         front-matter `date`         else repository created_at
//   description  front-matter `description`  else repository description
//   githubUrl    always the repository html_url
//   stars        always the repository stargazers_count
//
// All other front-matter keys are carried along unchanged in `extra`, so a
// post can add fields like `tags` without the loader knowing about them.
//
// Rust concepts:
// - #[serde(rename_all = "camelCase")] so github_url serializes as githubUrl
// - #[serde(flatten)] to inline the extra keys next to the typed ones
// =============================================================================

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value as JsonValue;

use super::{scalar_to_string, validate_entry, ParsedDocument, SchemaError};
use crate::github::RepoDescriptor;

// Keys that map onto typed EntryData fields, or that the repository
// metadata always overrides.
const RESERVED_KEYS: [&str; 5] = ["title", "date", "description", "githubUrl", "stars"];

/// One content entry, keyed in the store by `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentEntry {
    /// The repository name.
    pub id: String,
    pub data: EntryData,
    /// Markdown after the front-matter block.
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryData {
    pub title: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub github_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stars: Option<u64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

impl ContentEntry {
    /// Builds and validates the entry for `repo` from its parsed README.
    pub fn from_document(repo: &RepoDescriptor, doc: ParsedDocument) -> Result<Self, SchemaError> {
        let title = string_field(&doc, "title")?.unwrap_or_else(|| repo.name.clone());
        let date = string_field(&doc, "date")?.unwrap_or_else(|| repo.created_at.clone());
        let description = string_field(&doc, "description")?.or_else(|| repo.description.clone());

        let extra = doc
            .data
            .iter()
            .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
            .filter_map(|(key, value)| {
                serde_json::to_value(value)
                    .ok()
                    .map(|json| (key.clone(), json))
            })
            .collect();

        let data = EntryData {
            title,
            date,
            description,
            github_url: repo.html_url.clone(),
            stars: Some(repo.stargazers_count),
            extra,
        };
        validate_entry(&data)?;

        Ok(Self {
            id: repo.name.clone(),
            data,
            body: doc.body,
        })
    }
}

// Present and scalar -> Some(string); absent or null -> None (fall back);
// a list or map where a string belongs -> error.
fn string_field(doc: &ParsedDocument, key: &'static str) -> Result<Option<String>, SchemaError> {
    match doc.data.get(key) {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(value) => scalar_to_string(value)
            .map(Some)
            .ok_or(SchemaError::NotScalar(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::parse_front_matter;
    use serde_json::json;

    fn repo() -> RepoDescriptor {
        RepoDescriptor {
            name: "foo".to_string(),
            default_branch: "main".to_string(),
            html_url: "https://x/foo".to_string(),
            stargazers_count: 5,
            created_at: "2021-01-01".to_string(),
            description: None,
        }
    }

    fn entry_for(repo: &RepoDescriptor, text: &str) -> Result<ContentEntry, SchemaError> {
        ContentEntry::from_document(repo, parse_front_matter(text).unwrap())
    }

    #[test]
    fn test_worked_example() {
        let entry = entry_for(&repo(), "---\ntitle: Hello\n---\nBody text").unwrap();
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({
                "id": "foo",
                "data": {
                    "title": "Hello",
                    "date": "2021-01-01",
                    "stars": 5,
                    "githubUrl": "https://x/foo"
                },
                "body": "Body text"
            })
        );
    }

    #[test]
    fn test_front_matter_wins_over_repository() {
        let mut repo = repo();
        repo.description = Some("repo description".to_string());
        let entry = entry_for(
            &repo,
            "---\ntitle: Post\ndate: 2024-06-01\ndescription: post description\n---\n",
        )
        .unwrap();
        assert_eq!(entry.data.title, "Post");
        assert_eq!(entry.data.date, "2024-06-01");
        assert_eq!(entry.data.description.as_deref(), Some("post description"));
    }

    #[test]
    fn test_falls_back_to_repository() {
        let mut repo = repo();
        repo.description = Some("repo description".to_string());
        let entry = entry_for(&repo, "No front-matter here").unwrap();
        assert_eq!(entry.data.title, "foo");
        assert_eq!(entry.data.date, "2021-01-01");
        assert_eq!(entry.data.description.as_deref(), Some("repo description"));
        assert_eq!(entry.body, "No front-matter here");
    }

    #[test]
    fn test_null_field_falls_back() {
        let entry = entry_for(&repo(), "---\ntitle: ~\n---\n").unwrap();
        assert_eq!(entry.data.title, "foo");
    }

    #[test]
    fn test_repository_overrides_url_and_stars() {
        let entry = entry_for(
            &repo(),
            "---\ngithubUrl: https://elsewhere\nstars: 9000\ntags: [rust, blog]\n---\n",
        )
        .unwrap();
        assert_eq!(entry.data.github_url, "https://x/foo");
        assert_eq!(entry.data.stars, Some(5));
        assert_eq!(entry.data.extra.get("tags"), Some(&json!(["rust", "blog"])));
        assert!(!entry.data.extra.contains_key("stars"));
    }

    #[test]
    fn test_list_title_is_rejected() {
        let err = entry_for(&repo(), "---\ntitle: [a, b]\n---\n").unwrap_err();
        assert_eq!(err, SchemaError::NotScalar("title"));
    }

    #[test]
    fn test_invalid_repository_url_is_rejected() {
        let mut repo = repo();
        repo.html_url = "not a url".to_string();
        let err = entry_for(&repo, "Body").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidUrl { .. }));
    }
}
