// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands share the same "where do repositories come from" flags:
// - load: run one load cycle and print the resulting entries
// - check: audit the same repositories for README problems
//
// The account name and token are NOT flags; they come from ACCOUNT_USERNAME
// and ACCOUNT_TOKEN (or a .env file) so they never end up in shell history.
//
// Rust concepts:
// - #[command(flatten)] to reuse one Args struct in several subcommands
// - #[arg(global = true)] for flags accepted before or after the subcommand
// =============================================================================

use clap::{Args, Parser, Subcommand};

use repo_content_loader::config::{ConfigError, LoaderConfig};

#[derive(Parser, Debug)]
#[command(
    name = "repo-content-loader",
    version,
    about = "Load topic-tagged GitHub repositories as static-site content entries",
    long_about = "repo-content-loader searches GitHub for repositories owned by ACCOUNT_USERNAME \
                  that carry a topic (blog-post by default), downloads each README, parses its \
                  front-matter and prints the resulting content entries."
)]
pub struct Cli {
    /// Show debug output (every request made)
    #[arg(long, short, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show warnings and errors
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one load cycle and print the entries
    ///
    /// Example: repo-content-loader load --json
    Load {
        #[command(flatten)]
        source: SourceArgs,

        /// Output entries in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Check each tagged repository for missing front-matter, title or description
    ///
    /// Exits with code 1 when any repository has issues.
    Check {
        #[command(flatten)]
        source: SourceArgs,

        /// Output the audit in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Topic label the repositories must carry
    #[arg(long, default_value = repo_content_loader::config::DEFAULT_TOPIC)]
    pub topic: String,

    /// Base URL of the GitHub API
    #[arg(long, default_value = repo_content_loader::config::DEFAULT_API_URL)]
    pub api_url: String,

    /// Base URL raw files are downloaded from
    #[arg(long, default_value = repo_content_loader::config::DEFAULT_RAW_URL)]
    pub raw_url: String,

    /// File to read from each repository's default branch
    #[arg(long, default_value = repo_content_loader::config::DEFAULT_CONTENT_PATH)]
    pub path: String,

    /// Maximum number of README downloads in flight at once
    #[arg(long, default_value_t = repo_content_loader::config::DEFAULT_CONCURRENCY)]
    pub concurrency: usize,
}

impl SourceArgs {
    /// Applies these flags on top of the environment-derived config.
    pub fn apply(&self, config: LoaderConfig) -> Result<LoaderConfig, ConfigError> {
        Ok(config
            .with_topic(&self.topic)?
            .with_api_url(&self.api_url)?
            .with_raw_url(&self.raw_url)?
            .with_content_path(self.path.clone())
            .with_concurrency(self.concurrency)?)
    }
}
