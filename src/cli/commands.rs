//! CLI commands and argument parsing

use crate::types::LogLevel;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// List resource instance usage from the usage reports service
#[derive(Parser, Debug)]
#[command(name = "usage-reports")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Credentials file in .env format
    #[arg(long, global = true)]
    pub credentials: Option<PathBuf>,

    /// Client configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level when RUST_LOG is not set
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Effective log level; `--verbose` means debug
    pub fn log_level(&self) -> LogLevel {
        match self.log_level {
            Some(level) => level,
            None if self.verbose => LogLevel::Debug,
            None => LogLevel::Info,
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Usage of resource instances in an account
    Account {
        #[command(flatten)]
        list: ListArgs,

        /// Only resources in this resource group
        #[arg(long)]
        resource_group_id: Option<String>,

        /// Only resources in this organization
        #[arg(long)]
        organization_id: Option<String>,
    },

    /// Usage of resource instances in a resource group
    ResourceGroup {
        #[command(flatten)]
        list: ListArgs,

        /// Resource group id
        #[arg(long)]
        resource_group_id: String,
    },

    /// Usage of resource instances in a Cloud Foundry organization
    Org {
        #[command(flatten)]
        list: ListArgs,

        /// Organization id
        #[arg(long)]
        organization_id: String,
    },
}

/// Arguments shared by all usage listings
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Account id
    #[arg(long)]
    pub account_id: String,

    /// Billing month (yyyy-mm)
    #[arg(long)]
    pub billing_month: String,

    /// Records per page
    #[arg(long)]
    pub limit: Option<u32>,

    /// Include names
    #[arg(long)]
    pub names: bool,

    /// Include tags
    #[arg(long)]
    pub tags: bool,

    /// Preferred response language
    #[arg(long)]
    pub accept_language: Option<String>,

    /// Filter by resource instance id
    #[arg(long)]
    pub resource_instance_id: Option<String>,

    /// Filter by resource id
    #[arg(long)]
    pub resource_id: Option<String>,

    /// Filter by plan id
    #[arg(long)]
    pub plan_id: Option<String>,

    /// Filter by region
    #[arg(long)]
    pub region: Option<String>,

    /// Fetch every page before printing
    #[arg(long, conflicts_with = "max_pages")]
    pub all: bool,

    /// Stop after this many pages
    #[arg(long)]
    pub max_pages: Option<usize>,
}
