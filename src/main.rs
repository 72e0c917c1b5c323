// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Load a .env file if there is one (ACCOUNT_USERNAME / ACCOUNT_TOKEN)
// 2. Parse command-line arguments using clap and set up logging
// 3. Build a LoaderConfig and dispatch to the subcommand handler
// 4. Print results and exit with a proper code
//    (0 = success, 1 = check found issues, 2 = error)
//
// The CLI plays the part of the site generator: it owns a MemoryStore, runs
// the loader into it and prints what ended up there.
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;

use cli::{Cli, Commands, SourceArgs};
use repo_content_loader::{
    logging, ContentEntry, ContentLoader, ContentStore, GithubLoader, LoadReport, LoaderConfig,
    MemoryStore, RepoAudit,
};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let dotenv_result = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    // Not having a .env file is normal; a broken one is worth mentioning.
    if let Err(err) = dotenv_result {
        if !err.not_found() {
            warn!(error = %err, "could not read .env file");
        }
    }

    match cli.command {
        Commands::Load { source, json } => handle_load(&source, json).await,
        Commands::Check { source, json } => handle_check(&source, json).await,
    }
}

fn build_loader(source: &SourceArgs) -> Result<GithubLoader> {
    let config = LoaderConfig::from_env().context("reading account settings from the environment")?;
    let config = source.apply(config)?;
    Ok(GithubLoader::new(config)?)
}

// Handles the 'load' subcommand
async fn handle_load(source: &SourceArgs, json: bool) -> Result<i32> {
    let loader = build_loader(source)?;
    let store = MemoryStore::new();

    let report = loader.load(&store).await?;
    let entries = store.entries();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print_entries(&entries);
        print_load_summary(&report);
    }

    // Skipped repositories are warnings, not failures.
    Ok(0)
}

// Handles the 'check' subcommand
async fn handle_check(source: &SourceArgs, json: bool) -> Result<i32> {
    let loader = build_loader(source)?;
    let audits = loader.audit().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&audits)?);
    } else {
        print_audits(&audits);
    }

    if audits.iter().any(|a| !a.is_ok()) {
        Ok(1)
    } else {
        Ok(0)
    }
}

fn print_entries(entries: &[ContentEntry]) {
    if entries.is_empty() {
        println!("⚠️  No entries loaded");
        return;
    }

    println!("{:<40} {:<40} {:<22} {:>6}", "ID", "TITLE", "DATE", "STARS");
    println!("{}", "=".repeat(111));

    for entry in entries {
        let stars = entry
            .data
            .stars
            .map(|s| s.to_string())
            .unwrap_or_default();
        println!(
            "{:<40} {:<40} {:<22} {:>6}",
            truncate(&entry.id, 40),
            truncate(&entry.data.title, 40),
            truncate(&entry.data.date, 22),
            stars
        );
    }
    println!();
}

fn print_load_summary(report: &LoadReport) {
    println!("📊 Summary:");
    println!("   ✅ Loaded: {}", report.loaded.len());
    println!("   ⏭️  Skipped: {}", report.skipped.len());
    for skipped in &report.skipped {
        println!("      - {}: {}", skipped.name, skipped.reason);
    }
}

fn print_audits(audits: &[RepoAudit]) {
    if audits.is_empty() {
        println!("⚠️  No tagged repositories found");
        return;
    }

    for audit in audits {
        if audit.is_ok() {
            println!("✅ {}", audit.name);
            continue;
        }

        let labels: Vec<_> = audit.issues.iter().map(|i| i.label()).collect();
        println!("❌ {} ({})", audit.name, labels.join(", "));
        if let Some(suggestion) = &audit.suggested_description {
            println!("   suggested description: {}", suggestion);
        }
    }

    let with_issues = audits.iter().filter(|a| !a.is_ok()).count();
    println!();
    println!("📊 Summary:");
    println!("   ✅ OK: {}", audits.len() - with_issues);
    println!("   ❌ With issues: {}", with_issues);
}

// Shortens a string to `max` characters for table display
fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() > max {
        let kept: String = value.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a-very-long-repository-name", 10), "a-very-...");
        // Multi-byte characters are counted, not bytes
        assert_eq!(truncate("ééééé", 5), "ééééé");
    }
}
