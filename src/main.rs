// Allow common clippy pedantic lints
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! Usage reports CLI
//!
//! Lists resource instance usage page by page

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use usage_reports::cli::{Cli, Runner};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let level = tracing::Level::from(cli.log_level());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await.context("usage-reports failed") {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
