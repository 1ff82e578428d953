//! Usage reports service
//!
//! Resource instance usage listings for an account, a resource group or a
//! Cloud Foundry organization. Each listing is paged with an opaque `_start`
//! token, so every request type can be driven by a [`Pager`](crate::Pager):
//!
//! ```rust,ignore
//! let client = UsageReportsClient::from_credentials_file("usage_reports_v4.env")?;
//! let request = ResourceUsageAccountRequest::new(account_id, "2024-03").limit(50);
//! let records = client.pager(request)?.get_all().await?;
//! ```

mod client;
mod envelope;
mod requests;

pub use client::UsageReportsClient;
pub use envelope::{NextLink, UsagePageEnvelope};
pub use requests::{
    validate_billing_month, ResourceUsageAccountRequest, ResourceUsageOrgRequest,
    ResourceUsageQuery, ResourceUsageResourceGroupRequest, UsageListOptions,
};

#[cfg(test)]
mod tests;
