// src/github/fetch.rs
// =============================================================================
// This module fetches raw files from GitHub repositories.
//
// Strategy:
// - Build the raw.githubusercontent.com URL from the account name, the
//   repository name and the repository's *default* branch (taken from the
//   search result, so no main/master guessing is needed)
// - Download it without authentication
// - Treat any non-2xx status as "this repository has no content"
//
// Rust concepts:
// - async functions: For network I/O
// - Result: For error handling
// - Struct-style error variants that carry the URL for the log line
// =============================================================================

use reqwest::Client;
use tracing::debug;

use super::RepoDescriptor;
use crate::config::LoaderConfig;
use crate::error::RepoError;

// Builds the raw file URL for one repository
//
// Example:
//   username "alice", repo "foo" on branch "main", path "README.md" ->
//   "https://raw.githubusercontent.com/alice/foo/main/README.md"
pub fn raw_content_url(config: &LoaderConfig, repo: &RepoDescriptor) -> String {
    format!(
        "{}/{}/{}/{}/{}",
        config.raw_url(),
        config.username(),
        repo.name,
        repo.default_branch,
        config.content_path()
    )
}

// Fetches content from a URL
//
// Parameters:
//   client: reqwest HTTP client (shared, no auth headers)
//   url: URL to fetch
//
// Returns: the body as text, or a RepoError describing why not
pub async fn fetch_raw_file(client: &Client, url: &str) -> Result<String, RepoError> {
    debug!(url, "fetching raw content");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| RepoError::Transport {
            url: url.to_string(),
            source,
        })?;

    if !response.status().is_success() {
        return Err(RepoError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }

    response.text().await.map_err(|source| RepoError::Transport {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn repo(name: &str, branch: &str) -> RepoDescriptor {
        RepoDescriptor {
            name: name.to_string(),
            default_branch: branch.to_string(),
            html_url: format!("https://github.com/alice/{name}"),
            stargazers_count: 0,
            created_at: "2021-01-01".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_raw_content_url_uses_default_branch() {
        let config = LoaderConfig::new("alice", "secret").unwrap();
        assert_eq!(
            raw_content_url(&config, &repo("foo", "trunk")),
            "https://raw.githubusercontent.com/alice/foo/trunk/README.md"
        );
    }

    #[test]
    fn test_raw_content_url_custom_path() {
        let config = LoaderConfig::new("alice", "secret")
            .unwrap()
            .with_content_path("/docs/post.md");
        assert_eq!(
            raw_content_url(&config, &repo("foo", "main")),
            "https://raw.githubusercontent.com/alice/foo/main/docs/post.md"
        );
    }

    #[tokio::test]
    async fn test_fetch_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/alice/foo/main/README.md"))
            .respond_with(ResponseTemplate::new(200).set_body_string("# Hello"))
            .mount(&server)
            .await;

        let url = format!("{}/alice/foo/main/README.md", server.uri());
        let body = fetch_raw_file(&Client::new(), &url).await.unwrap();
        assert_eq!(body, "# Hello");
    }

    #[tokio::test]
    async fn test_fetch_missing_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = format!("{}/alice/foo/main/README.md", server.uri());
        let err = fetch_raw_file(&Client::new(), &url).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
