//! Paging envelope of resource usage responses
//!
//! Only the parts needed for paging are decoded: the `resources` array and
//! the `next` link. Records themselves stay raw JSON.

use crate::pagination::Page;
use crate::types::UsageRecord;
use serde::Deserialize;
use url::Url;

/// Body of one resource usage page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsagePageEnvelope {
    /// Usage records on this page
    #[serde(default)]
    pub resources: Vec<UsageRecord>,
    /// Link to the following page
    #[serde(default)]
    pub next: Option<NextLink>,
}

impl UsagePageEnvelope {
    /// Convert into a page, resolving the continuation token
    pub fn into_page(self) -> Page<UsageRecord> {
        let next_start = self.next.as_ref().and_then(NextLink::start_token);
        Page {
            items: self.resources,
            next_start,
        }
    }
}

/// Reference to the next page
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NextLink {
    /// URL of the next page
    #[serde(default)]
    pub href: Option<String>,
    /// Offset to send as `_start`
    #[serde(default)]
    pub offset: Option<String>,
}

impl NextLink {
    /// Continuation token for the next request
    ///
    /// Prefers `offset`; falls back to the `_start` or `start` query
    /// parameter of `href`. Empty values count as absent.
    pub fn start_token(&self) -> Option<String> {
        self.offset
            .clone()
            .filter(|offset| !offset.is_empty())
            .or_else(|| self.href.as_deref().and_then(start_from_href))
    }
}

/// Extract the start parameter from an absolute or relative href
fn start_from_href(href: &str) -> Option<String> {
    let base = Url::parse("http://localhost/").ok()?;
    let url = Url::options().base_url(Some(&base)).parse(href).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "_start" || key == "start")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
