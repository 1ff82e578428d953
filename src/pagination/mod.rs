//! Pagination module
//!
//! Cursor-based pagination over list endpoints.
//!
//! # Overview
//!
//! A [`Pager`] owns the fixed parameters of one list request and borrows a
//! [`PageFetcher`] that knows how to fetch a single page. The pager keeps
//! the continuation token between calls and hands it back to the fetcher
//! verbatim, so callers only see pages of items:
//!
//! ```rust,ignore
//! let mut pager = Pager::new(&client, request);
//! while pager.has_next() {
//!     let page = pager.get_next().await?;
//!     // process page
//! }
//! ```

mod pager;
mod types;

pub use pager::Pager;
pub use types::{Page, PageFetcher, PagerState};
