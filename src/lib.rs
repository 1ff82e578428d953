// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Usage Reports
//!
//! Client and cursor paginator for the resource usage listings of a cloud
//! billing usage-reports API.
//!
//! ## Features
//!
//! - **Cursor Pagination**: A generic [`Pager`] over any [`PageFetcher`]
//! - **Typed Requests**: Account, resource group and organization listings
//! - **Multiple Auth Types**: IAM API key, Bearer, Basic, API Key
//! - **Retry Toggle**: Retries with backoff, off until enabled
//! - **Credentials Files**: `.env` style credentials, environment or YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use usage_reports::{ResourceUsageAccountRequest, Result, UsageReportsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = UsageReportsClient::from_credentials_file("usage_reports_v4.env")?;
//!
//!     let request = ResourceUsageAccountRequest::new("account-id", "2024-03").limit(50);
//!     let mut pager = client.pager(request)?;
//!     while pager.has_next() {
//!         for record in pager.get_next().await? {
//!             println!("{record}");
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                 Pager<'_, F, R>                       │
//! │  has_next()   get_next() → Vec<Item>   get_all()      │
//! └───────────────────────────┬───────────────────────────┘
//!                             │ PageFetcher<R>
//! ┌───────────────────────────┴───────────────────────────┐
//! │                  UsageReportsClient                   │
//! ├─────────────┬──────────────┬──────────────┬───────────┤
//! │   Requests  │   Envelope   │     HTTP     │   Auth    │
//! │   Account   │  resources   │   Retries    │   IAM     │
//! │   Res group │  next.offset │   Backoff    │   Bearer  │
//! │   Org       │  next.href   │   Endpoints  │   Basic   │
//! └─────────────┴──────────────┴──────────────┴───────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication implementations
pub mod auth;

/// HTTP client with optional retries
pub mod http;

/// Cursor pagination
pub mod pagination;

/// Usage reports requests and client
pub mod usage;

/// Client configuration and credentials
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use pagination::{Page, PageFetcher, Pager, PagerState};
pub use types::*;
pub use usage::{
    ResourceUsageAccountRequest, ResourceUsageOrgRequest, ResourceUsageQuery,
    ResourceUsageResourceGroupRequest, UsageListOptions, UsageReportsClient,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
