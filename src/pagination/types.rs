//! Pagination types and traits
//!
//! Defines the page, session state and fetcher abstractions used by [`Pager`].
//!
//! [`Pager`]: super::Pager

use crate::error::Result;
use async_trait::async_trait;

/// One decoded page of a list response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page, in response order
    pub items: Vec<T>,
    /// Opaque continuation token for the following page
    pub next_start: Option<String>,
}

impl<T> Page<T> {
    /// Create a page followed by more data
    pub fn new(items: Vec<T>, next_start: impl Into<String>) -> Self {
        Self {
            items,
            next_start: Some(next_start.into()),
        }
    }

    /// Create the final page of a listing
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_start: None,
        }
    }

    /// Continuation token, with an empty token treated as absent
    pub fn next_token(&self) -> Option<&str> {
        self.next_start.as_deref().filter(|token| !token.is_empty())
    }

    /// Check if this is the last page
    pub fn is_last(&self) -> bool {
        self.next_token().is_none()
    }
}

/// Pagination session state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PagerState {
    /// No page has been fetched yet
    #[default]
    NotStarted,
    /// The last fetch returned this continuation token
    HasMore(String),
    /// The last fetch returned no continuation token
    Exhausted,
}

impl PagerState {
    /// Cursor to send with the next fetch
    pub fn cursor(&self) -> Option<&str> {
        match self {
            Self::HasMore(token) => Some(token),
            Self::NotStarted | Self::Exhausted => None,
        }
    }

    /// Check if another fetch may yield items
    pub fn has_next(&self) -> bool {
        !matches!(self, Self::Exhausted)
    }

    /// Check if at least one page was fetched
    pub fn is_started(&self) -> bool {
        !matches!(self, Self::NotStarted)
    }

    /// State after a successful fetch of `page`
    pub(crate) fn advance<T>(page: &Page<T>) -> Self {
        match page.next_token() {
            Some(token) => Self::HasMore(token.to_string()),
            None => Self::Exhausted,
        }
    }
}

/// Fetches a single page of a list operation
///
/// `R` is the fixed request (everything except the cursor). Implementations
/// must send `start` verbatim when present and must not retain state
/// between calls that the [`Pager`](super::Pager) relies on.
#[async_trait]
pub trait PageFetcher<R: Send + Sync>: Send + Sync {
    /// Item record type returned on each page
    type Item: Send;

    /// Fetch one page starting at `start` (`None` for the first page)
    async fn fetch_page(&self, request: &R, start: Option<&str>) -> Result<Page<Self::Item>>;
}
