// src/logging.rs
// =============================================================================
// Sets up tracing output for the CLI.
//
// RUST_LOG wins if it is set (e.g. RUST_LOG=repo_content_loader=debug).
// Otherwise --quiet shows only warnings, --verbose shows debug detail such as
// every URL fetched, and the default is info.
//
// Logs go to stderr so `load --json` output on stdout stays machine-readable.
// =============================================================================

use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if quiet {
        EnvFilter::new("warn")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // A subscriber may already be installed (tests, or an embedding app).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
