//! Cursor pager
//!
//! Pull-based iteration over a paged list endpoint.

use super::types::{PageFetcher, PagerState};
use crate::error::{Error, Result};
use futures::stream::{self, Stream};

/// Iterates the pages of one list request
///
/// The request parameters are fixed for the lifetime of the pager; only the
/// cursor changes between fetches. A failed fetch leaves the session
/// untouched, so calling [`get_next`](Self::get_next) again retries the same
/// page.
pub struct Pager<'a, F: ?Sized, R> {
    fetcher: &'a F,
    request: R,
    state: PagerState,
    pages_fetched: usize,
}

impl<'a, F, R> Pager<'a, F, R>
where
    F: PageFetcher<R> + ?Sized,
    R: Send + Sync,
{
    /// Create a pager for `request` backed by `fetcher`
    pub fn new(fetcher: &'a F, request: R) -> Self {
        Self {
            fetcher,
            request,
            state: PagerState::NotStarted,
            pages_fetched: 0,
        }
    }

    /// Fixed request parameters
    pub fn request(&self) -> &R {
        &self.request
    }

    /// Current session state
    pub fn state(&self) -> &PagerState {
        &self.state
    }

    /// Continuation token that the next fetch will send
    pub fn cursor(&self) -> Option<&str> {
        self.state.cursor()
    }

    /// Number of successful fetches so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Check if another fetch may yield items
    pub fn has_next(&self) -> bool {
        self.state.has_next()
    }

    /// Fetch the next page and advance the cursor
    ///
    /// Returns [`Error::ExhaustedPagination`] without fetching once the last
    /// page has been returned, and [`Error::FetchFailed`] if the fetcher
    /// fails.
    pub async fn get_next(&mut self) -> Result<Vec<F::Item>> {
        if !self.state.has_next() {
            return Err(Error::ExhaustedPagination);
        }

        let page = self
            .fetcher
            .fetch_page(&self.request, self.state.cursor())
            .await
            .map_err(Error::fetch_failed)?;

        self.state = PagerState::advance(&page);
        self.pages_fetched += 1;
        Ok(page.items)
    }

    /// Fetch every remaining page and concatenate the items in page order
    ///
    /// Starts from the current session state, so pages already returned by
    /// [`get_next`](Self::get_next) are not fetched again.
    ///
    /// If a fetch fails, the error is returned and the items collected by
    /// this call so far are dropped. The cursor still points past them, so
    /// a later call continues with the page that failed.
    pub async fn get_all(&mut self) -> Result<Vec<F::Item>> {
        let mut items = Vec::new();
        while self.has_next() {
            items.extend(self.get_next().await?);
        }
        Ok(items)
    }

    /// Turn the pager into a stream of pages
    ///
    /// The stream ends after the last page, or after yielding the first
    /// fetch error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<F::Item>>> + 'a
    where
        R: 'a,
        F::Item: 'a,
    {
        stream::try_unfold(self, |mut pager| async move {
            if !pager.has_next() {
                return Ok(None);
            }
            let items = pager.get_next().await?;
            Ok(Some((items, pager)))
        })
    }
}

impl<F: ?Sized, R: std::fmt::Debug> std::fmt::Debug for Pager<'_, F, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("request", &self.request)
            .field("state", &self.state)
            .field("pages_fetched", &self.pages_fetched)
            .finish_non_exhaustive()
    }
}
