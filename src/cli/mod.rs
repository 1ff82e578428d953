//! CLI module
//!
//! Command-line interface for listing resource usage.
//!
//! # Commands
//!
//! - `account` - Usage in an account
//! - `resource-group` - Usage in a resource group
//! - `org` - Usage in a Cloud Foundry organization
//!
//! Records are written to stdout as JSON lines.

mod commands;
mod runner;

pub use commands::{Cli, Commands, ListArgs};
pub use runner::{ListSummary, Runner};
