// src/config.rs
// =============================================================================
// Configuration for the content loader.
//
// The loader never reads the environment on its own. Everything it needs is
// collected into a LoaderConfig up front and handed to GithubLoader::new().
// from_env() / from_lookup() are the only places environment variables are
// consulted, which keeps tests free to build configs by hand.
//
// Required:
// - ACCOUNT_USERNAME: the account whose repositories are searched
// - ACCOUNT_TOKEN: access token sent with the search request
//
// Everything else has a default that matches GitHub's public endpoints.
//
// Rust concepts:
// - Builder methods that take `self` and return `Self`
// - Custom Debug impl so the token never shows up in logs
// - Closures as parameters (from_lookup takes any `Fn(&str) -> Option<String>`)
// =============================================================================

use std::fmt;

use thiserror::Error;
use url::Url;

/// Environment variable holding the access token.
pub const TOKEN_VAR: &str = "ACCOUNT_TOKEN";
/// Environment variable holding the account name.
pub const USERNAME_VAR: &str = "ACCOUNT_USERNAME";

pub const DEFAULT_TOPIC: &str = "blog-post";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_RAW_URL: &str = "https://raw.githubusercontent.com";
pub const DEFAULT_CONTENT_PATH: &str = "README.md";
pub const DEFAULT_USER_AGENT: &str = concat!("repo-content-loader/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_CONCURRENCY: usize = 50;

/// Problems detected while building a [`LoaderConfig`].
///
/// All of these are raised before any network request is made.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required value was absent or blank.
    #[error("Missing {0}")]
    Missing(&'static str),

    /// A base URL could not be parsed, or is not http(s).
    #[error("Invalid base URL '{value}': {reason}")]
    InvalidUrl { value: String, reason: String },

    /// A value spliced into the search query was blank or contained
    /// whitespace, which would add or break search qualifiers.
    #[error("Invalid {field} '{value}': must be non-empty and contain no whitespace")]
    InvalidQualifier { field: &'static str, value: String },

    /// The fan-out limit must allow at least one request in flight.
    #[error("Concurrency must be at least 1")]
    ZeroConcurrency,
}

/// Everything the loader needs for one run.
#[derive(Clone)]
pub struct LoaderConfig {
    username: String,
    token: String,
    topic: String,
    api_url: String,
    raw_url: String,
    content_path: String,
    user_agent: String,
    concurrency: usize,
}

impl LoaderConfig {
    /// Creates a config with the two required values and defaults for the rest.
    ///
    /// Blank values count as missing, the same way an unset variable does.
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Result<Self, ConfigError> {
        let username = username.into();
        let token = token.into();

        // The token is checked first so a missing credential is always the
        // error reported, even if the username is also absent.
        if token.trim().is_empty() {
            return Err(ConfigError::Missing(TOKEN_VAR));
        }
        if username.trim().is_empty() {
            return Err(ConfigError::Missing(USERNAME_VAR));
        }
        let username = search_qualifier(USERNAME_VAR, &username)?;

        Ok(Self {
            username,
            token: token.trim().to_string(),
            topic: DEFAULT_TOPIC.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            raw_url: DEFAULT_RAW_URL.to_string(),
            content_path: DEFAULT_CONTENT_PATH.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
        })
    }

    /// Reads ACCOUNT_USERNAME and ACCOUNT_TOKEN from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LoaderConfig::from_env`], but with a caller-supplied lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_VAR).ok_or(ConfigError::Missing(TOKEN_VAR))?;
        let username = lookup(USERNAME_VAR).ok_or(ConfigError::Missing(USERNAME_VAR))?;
        Self::new(username, token)
    }

    /// Sets the topic label; it goes into the search query as `topic:{topic}`.
    pub fn with_topic(mut self, topic: &str) -> Result<Self, ConfigError> {
        self.topic = search_qualifier("topic", topic)?;
        Ok(self)
    }

    /// Points discovery at a different API host (GitHub Enterprise, or a test server).
    pub fn with_api_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.api_url = normalize_base_url(url)?;
        Ok(self)
    }

    /// Points content fetches at a different raw-file host.
    pub fn with_raw_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.raw_url = normalize_base_url(url)?;
        Ok(self)
    }

    pub fn with_content_path(mut self, path: impl Into<String>) -> Self {
        self.content_path = path.into().trim_start_matches('/').to_string();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Result<Self, ConfigError> {
        if concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        self.concurrency = concurrency;
        Ok(self)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// API base URL, without a trailing slash.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Raw-file base URL, without a trailing slash.
    pub fn raw_url(&self) -> &str {
        &self.raw_url
    }

    pub fn content_path(&self) -> &str {
        &self.content_path
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }
}

impl fmt::Debug for LoaderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderConfig")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .field("topic", &self.topic)
            .field("api_url", &self.api_url)
            .field("raw_url", &self.raw_url)
            .field("content_path", &self.content_path)
            .field("user_agent", &self.user_agent)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}

// Trims `value` and rejects anything that would not stay a single search
// qualifier value (`user:{value}` / `topic:{value}`).
fn search_qualifier(field: &'static str, value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidQualifier {
            field,
            value: value.to_string(),
        });
    }
    Ok(value.to_string())
}

// Validates a base URL and strips the trailing slash so paths can be
// appended with a plain format!("{}/...", base).
fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let parsed = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        value: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            value: raw.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = LoaderConfig::new("alice", "secret").unwrap();
        assert_eq!(config.username(), "alice");
        assert_eq!(config.topic(), "blog-post");
        assert_eq!(config.api_url(), "https://api.github.com");
        assert_eq!(config.raw_url(), "https://raw.githubusercontent.com");
        assert_eq!(config.content_path(), "README.md");
        assert_eq!(config.concurrency(), 50);
    }

    #[test]
    fn test_missing_token_is_reported() {
        let result = LoaderConfig::from_lookup(lookup_from(&[(USERNAME_VAR, "alice")]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing(TOKEN_VAR));
    }

    #[test]
    fn test_missing_username_is_reported() {
        let result = LoaderConfig::from_lookup(lookup_from(&[(TOKEN_VAR, "secret")]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing(USERNAME_VAR));
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        assert_eq!(
            LoaderConfig::new("alice", "   ").unwrap_err(),
            ConfigError::Missing(TOKEN_VAR)
        );
        assert_eq!(
            LoaderConfig::new("", "secret").unwrap_err(),
            ConfigError::Missing(USERNAME_VAR)
        );
    }

    #[test]
    fn test_base_url_trailing_slash_is_stripped() {
        let config = LoaderConfig::new("alice", "secret")
            .unwrap()
            .with_api_url("http://127.0.0.1:8080/")
            .unwrap();
        assert_eq!(config.api_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = LoaderConfig::new("alice", "secret")
            .unwrap()
            .with_raw_url("ftp://example.com");
        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));

        let result = LoaderConfig::new("alice", "secret")
            .unwrap()
            .with_api_url("not a url");
        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn test_username_with_whitespace_rejected() {
        let err = LoaderConfig::new("alice topic:x", "secret").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidQualifier { field: USERNAME_VAR, .. }
        ));
        // Surrounding whitespace is trimmed, not rejected
        assert_eq!(LoaderConfig::new(" alice ", "secret").unwrap().username(), "alice");
    }

    #[test]
    fn test_topic_with_whitespace_rejected() {
        let config = LoaderConfig::new("alice", "secret").unwrap();
        assert!(matches!(
            config.clone().with_topic("blog post"),
            Err(ConfigError::InvalidQualifier { field: "topic", .. })
        ));
        assert!(matches!(
            config.clone().with_topic("  "),
            Err(ConfigError::InvalidQualifier { field: "topic", .. })
        ));
        assert_eq!(config.with_topic("notes").unwrap().topic(), "notes");
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let result = LoaderConfig::new("alice", "secret")
            .unwrap()
            .with_concurrency(0);
        assert_eq!(result.unwrap_err(), ConfigError::ZeroConcurrency);
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = LoaderConfig::new("alice", "super-secret").unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
