//! Usage reports service client
//!
//! Sends resource usage list requests and decodes their paging envelope.

use super::envelope::UsagePageEnvelope;
use super::requests::{
    ResourceUsageAccountRequest, ResourceUsageOrgRequest, ResourceUsageQuery,
    ResourceUsageResourceGroupRequest,
};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::pagination::{Page, PageFetcher, Pager};
use crate::types::UsageRecord;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Client for the resource usage listings of the usage reports service
#[derive(Debug)]
pub struct UsageReportsClient {
    http: HttpClient,
}

impl UsageReportsClient {
    /// Create a client from settings
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_auth(config.http_config(), config.auth.clone())?;
        info!(
            "Usage reports client for {} (retries {})",
            config.url,
            if config.enable_retries { "on" } else { "off" }
        );
        Ok(Self { http })
    }

    /// Create a client from `USAGE_REPORTS_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(&ClientConfig::from_env()?)
    }

    /// Create a client from a `.env` credentials file
    pub fn from_credentials_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(&ClientConfig::from_credentials_file(path)?)
    }

    /// Underlying HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Retry failed requests up to `max_retries` times
    pub fn enable_retries(&mut self, max_retries: u32, max_interval: Duration) {
        self.http.enable_retries(max_retries, max_interval);
    }

    /// Stop retrying failed requests
    pub fn disable_retries(&mut self) {
        self.http.disable_retries();
    }

    /// Fetch one page of any resource usage listing
    pub async fn get_resource_usage<R: ResourceUsageQuery>(
        &self,
        request: &R,
        start: Option<&str>,
    ) -> Result<Page<UsageRecord>> {
        request.validate()?;

        let url = self.http.endpoint(&request.path_segments())?;
        let envelope: UsagePageEnvelope = self
            .http
            .get_json_with_config(url.as_str(), request.request_config(start))
            .await?;
        let page = envelope.into_page();

        debug!(
            operation = request.operation(),
            start = start.unwrap_or(""),
            items = page.items.len(),
            next = page.next_token().unwrap_or(""),
            "Fetched usage page"
        );
        Ok(page)
    }

    /// Fetch one page of resource instance usage in an account
    pub async fn get_resource_usage_account(
        &self,
        request: &ResourceUsageAccountRequest,
        start: Option<&str>,
    ) -> Result<Page<UsageRecord>> {
        self.get_resource_usage(request, start).await
    }

    /// Fetch one page of resource instance usage in a resource group
    pub async fn get_resource_usage_resource_group(
        &self,
        request: &ResourceUsageResourceGroupRequest,
        start: Option<&str>,
    ) -> Result<Page<UsageRecord>> {
        self.get_resource_usage(request, start).await
    }

    /// Fetch one page of resource instance usage in an organization
    pub async fn get_resource_usage_org(
        &self,
        request: &ResourceUsageOrgRequest,
        start: Option<&str>,
    ) -> Result<Page<UsageRecord>> {
        self.get_resource_usage(request, start).await
    }

    /// Create a pager over every page of `request`
    ///
    /// The request is validated here so that a bad page size or billing
    /// month is reported before any fetch.
    pub fn pager<R: ResourceUsageQuery>(&self, request: R) -> Result<Pager<'_, Self, R>> {
        request.validate()?;
        Ok(Pager::new(self, request))
    }
}

#[async_trait]
impl<R: ResourceUsageQuery> PageFetcher<R> for UsageReportsClient {
    type Item = UsageRecord;

    async fn fetch_page(&self, request: &R, start: Option<&str>) -> Result<Page<UsageRecord>> {
        self.get_resource_usage(request, start).await
    }
}
