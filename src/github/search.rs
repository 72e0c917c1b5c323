// src/github/search.rs
// =============================================================================
// Repository discovery through GitHub's search API.
//
// One request:
//   GET {api}/search/repositories?q=user:{username} topic:{topic}
//
// The response looks like:
//   { "total_count": 2, "incomplete_results": false, "items": [ {...}, {...} ] }
//
// Only the first page is read. If total_count is larger than the number of
// items we got back, the rest are simply not loaded.
//
// Rust concepts:
// - #[derive(Deserialize)] with #[serde(default)] for fields GitHub may omit
// - Reading the body as text first so decode errors can be reported precisely
// =============================================================================

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LoaderConfig;
use crate::error::DiscoveryError;

/// The subset of a search result item the loader uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoDescriptor {
    pub name: String,
    pub default_branch: String,
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
    pub created_at: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    total_count: Option<u64>,
    #[serde(default)]
    items: Vec<RepoDescriptor>,
}

// GitHub error bodies look like {"message": "Bad credentials", ...}
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// The search endpoint for the configured API host.
pub fn search_url(config: &LoaderConfig) -> String {
    format!("{}/search/repositories", config.api_url())
}

/// Runs the discovery query and returns every repository on the first page.
///
/// An empty `items` array is a normal, empty result.
pub async fn search_repositories(
    client: &Client,
    config: &LoaderConfig,
) -> Result<Vec<RepoDescriptor>, DiscoveryError> {
    let url = search_url(config);
    let query = format!("user:{} topic:{}", config.username(), config.topic());

    debug!(url = %url, query = %query, "searching repositories");

    let response = client
        .get(&url)
        .query(&[("q", query.as_str())])
        .header(AUTHORIZATION, format!("token {}", config.token()))
        .header(ACCEPT, "application/vnd.github+json")
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
        return Err(DiscoveryError::Status { status, message });
    }

    let parsed: SearchResponse = serde_json::from_str(&body).map_err(DiscoveryError::Decode)?;

    if let Some(total) = parsed.total_count {
        if total > parsed.items.len() as u64 {
            debug!(
                total,
                returned = parsed.items.len(),
                "search results span more than one page; only the first is loaded"
            );
        }
    }

    Ok(parsed.items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> LoaderConfig {
        LoaderConfig::new("alice", "secret")
            .unwrap()
            .with_api_url(&server.uri())
            .unwrap()
    }

    #[test]
    fn test_descriptor_optional_fields() {
        let repo: RepoDescriptor = serde_json::from_value(json!({
            "name": "foo",
            "default_branch": "main",
            "html_url": "https://github.com/alice/foo",
            "created_at": "2021-01-01T00:00:00Z",
            "description": null,
            "language": "Rust"
        }))
        .unwrap();
        assert_eq!(repo.stargazers_count, 0);
        assert_eq!(repo.description, None);
    }

    #[tokio::test]
    async fn test_search_sends_query_and_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .and(query_param("q", "user:alice topic:blog-post"))
            .and(header("authorization", "token secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": 1,
                "items": [{
                    "name": "foo",
                    "default_branch": "main",
                    "html_url": "https://github.com/alice/foo",
                    "stargazers_count": 3,
                    "created_at": "2021-01-01"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let repos = search_repositories(&Client::new(), &config_for(&server))
            .await
            .unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].name, "foo");
        assert_eq!(repos[0].stargazers_count, 3);
    }

    #[tokio::test]
    async fn test_search_error_carries_upstream_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "Bad credentials"})),
            )
            .mount(&server)
            .await;

        let err = search_repositories(&Client::new(), &config_for(&server))
            .await
            .unwrap_err();
        match err {
            DiscoveryError::Status { status, message } => {
                assert_eq!(status.as_u16(), 401);
                assert_eq!(message, "Bad credentials");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_error_without_body_uses_reason() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = search_repositories(&Client::new(), &config_for(&server))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Repository search failed: HTTP 503 Service Unavailable: Service Unavailable"
        );
    }

    #[tokio::test]
    async fn test_search_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = search_repositories(&Client::new(), &config_for(&server))
            .await
            .unwrap_err();
        assert!(matches!(err, DiscoveryError::Decode(_)));
    }
}
