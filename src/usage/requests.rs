//! Resource usage list requests
//!
//! Each request holds every parameter of one list operation except the
//! `_start` cursor, which the pager supplies per page.

use crate::error::{Error, Result};
use crate::http::RequestConfig;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// API version path segment
const API_VERSION: &str = "v4";

/// A list operation over resource instance usage
pub trait ResourceUsageQuery: Send + Sync + std::fmt::Debug {
    /// Operation name used in logs
    fn operation(&self) -> &'static str;

    /// Path segments below the service URL
    fn path_segments(&self) -> Vec<&str>;

    /// Options shared by all resource usage listings
    fn options(&self) -> &UsageListOptions;

    /// Operation-specific query parameters and headers
    fn apply_extra(&self, config: RequestConfig) -> RequestConfig {
        config
    }

    /// Path identifiers that must not be empty, by parameter name
    fn required_ids(&self) -> Vec<(&'static str, &str)>;

    /// Billing month in `yyyy-mm` format
    fn billing_month(&self) -> &str;

    /// Check parameters before any request is sent
    fn validate(&self) -> Result<()> {
        for (name, value) in self.required_ids() {
            if value.trim().is_empty() {
                return Err(Error::invalid_param(name, "must not be empty"));
            }
        }
        validate_billing_month(self.billing_month())?;
        self.options().validate()
    }

    /// Request configuration for the page starting at `start`
    fn request_config(&self, start: Option<&str>) -> RequestConfig {
        let options = self.options();
        let config = RequestConfig::new()
            .query_opt("_names", options.names)
            .query_opt("_tags", options.tags)
            .query_opt("_limit", options.limit)
            .query_opt("_start", start)
            .query_opt("resource_instance_id", options.resource_instance_id.as_deref())
            .query_opt("resource_id", options.resource_id.as_deref())
            .query_opt("plan_id", options.plan_id.as_deref())
            .query_opt("region", options.region.as_deref())
            .header_opt("Accept-Language", options.accept_language.clone());
        self.apply_extra(config)
    }
}

/// Check that a billing month is a valid `yyyy-mm` value
pub fn validate_billing_month(month: &str) -> Result<()> {
    let valid = month.len() == 7
        && NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").is_ok();
    if valid {
        Ok(())
    } else {
        Err(Error::invalid_param(
            "billingmonth",
            format!("expected yyyy-mm, got '{month}'"),
        ))
    }
}

// ============================================================================
// Shared options
// ============================================================================

/// Filters and paging options common to all resource usage listings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageListOptions {
    /// Include names of accounts, resource groups, plans and resources
    pub names: Option<bool>,
    /// Include tags attached to each resource instance
    pub tags: Option<bool>,
    /// Preferred language for names in the response
    pub accept_language: Option<String>,
    /// Number of usage records per page
    pub limit: Option<u32>,
    /// Filter by resource instance id
    pub resource_instance_id: Option<String>,
    /// Filter by resource id
    pub resource_id: Option<String>,
    /// Filter by plan id
    pub plan_id: Option<String>,
    /// Filter by region
    pub region: Option<String>,
}

impl UsageListOptions {
    /// Check option values
    pub fn validate(&self) -> Result<()> {
        if self.limit == Some(0) {
            return Err(Error::invalid_param("limit", "must be a positive integer"));
        }
        Ok(())
    }
}

macro_rules! usage_option_setters {
    () => {
        /// Include names in the response
        #[must_use]
        pub fn names(mut self, names: bool) -> Self {
            self.options.names = Some(names);
            self
        }

        /// Include tags in the response
        #[must_use]
        pub fn tags(mut self, tags: bool) -> Self {
            self.options.tags = Some(tags);
            self
        }

        /// Set the preferred response language
        #[must_use]
        pub fn accept_language(mut self, language: impl Into<String>) -> Self {
            self.options.accept_language = Some(language.into());
            self
        }

        /// Set the page size
        #[must_use]
        pub fn limit(mut self, limit: u32) -> Self {
            self.options.limit = Some(limit);
            self
        }

        /// Filter by resource instance id
        #[must_use]
        pub fn resource_instance_id(mut self, id: impl Into<String>) -> Self {
            self.options.resource_instance_id = Some(id.into());
            self
        }

        /// Filter by resource id
        #[must_use]
        pub fn resource_id(mut self, id: impl Into<String>) -> Self {
            self.options.resource_id = Some(id.into());
            self
        }

        /// Filter by plan id
        #[must_use]
        pub fn plan_id(mut self, id: impl Into<String>) -> Self {
            self.options.plan_id = Some(id.into());
            self
        }

        /// Filter by region
        #[must_use]
        pub fn region(mut self, region: impl Into<String>) -> Self {
            self.options.region = Some(region.into());
            self
        }

        /// Replace all shared options
        #[must_use]
        pub fn with_options(mut self, options: UsageListOptions) -> Self {
            self.options = options;
            self
        }
    };
}

// ============================================================================
// Account
// ============================================================================

/// Resource instance usage in an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceUsageAccountRequest {
    /// Account id
    pub account_id: String,
    /// Billing month (`yyyy-mm`)
    pub billingmonth: String,
    /// Response content type
    pub accept: Option<String>,
    /// Report format requested in the query string
    pub format: Option<String>,
    /// Filter by resource group
    pub resource_group_id: Option<String>,
    /// Filter by Cloud Foundry organization
    pub organization_id: Option<String>,
    /// Shared filters and paging options
    #[serde(default)]
    pub options: UsageListOptions,
}

impl ResourceUsageAccountRequest {
    /// Create a request for an account and billing month
    pub fn new(account_id: impl Into<String>, billingmonth: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            billingmonth: billingmonth.into(),
            accept: None,
            format: None,
            resource_group_id: None,
            organization_id: None,
            options: UsageListOptions::default(),
        }
    }

    /// Set the response content type
    #[must_use]
    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Set the report format
    #[must_use]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Filter by resource group
    #[must_use]
    pub fn resource_group_id(mut self, id: impl Into<String>) -> Self {
        self.resource_group_id = Some(id.into());
        self
    }

    /// Filter by organization
    #[must_use]
    pub fn organization_id(mut self, id: impl Into<String>) -> Self {
        self.organization_id = Some(id.into());
        self
    }

    usage_option_setters!();
}

impl ResourceUsageQuery for ResourceUsageAccountRequest {
    fn operation(&self) -> &'static str {
        "get_resource_usage_account"
    }

    fn path_segments(&self) -> Vec<&str> {
        vec![
            API_VERSION,
            "accounts",
            self.account_id.as_str(),
            "resource_instances",
            "usage",
            self.billingmonth.as_str(),
        ]
    }

    fn options(&self) -> &UsageListOptions {
        &self.options
    }

    fn apply_extra(&self, config: RequestConfig) -> RequestConfig {
        config
            .query_opt("format", self.format.as_deref())
            .query_opt("resource_group_id", self.resource_group_id.as_deref())
            .query_opt("organization_id", self.organization_id.as_deref())
            .header(
                "Accept",
                self.accept.as_deref().unwrap_or("application/json"),
            )
    }

    fn required_ids(&self) -> Vec<(&'static str, &str)> {
        vec![("account_id", self.account_id.as_str())]
    }

    fn billing_month(&self) -> &str {
        &self.billingmonth
    }
}

// ============================================================================
// Resource group
// ============================================================================

/// Resource instance usage in a resource group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceUsageResourceGroupRequest {
    /// Account id
    pub account_id: String,
    /// Resource group id
    pub resource_group_id: String,
    /// Billing month (`yyyy-mm`)
    pub billingmonth: String,
    /// Shared filters and paging options
    #[serde(default)]
    pub options: UsageListOptions,
}

impl ResourceUsageResourceGroupRequest {
    /// Create a request for a resource group and billing month
    pub fn new(
        account_id: impl Into<String>,
        resource_group_id: impl Into<String>,
        billingmonth: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            resource_group_id: resource_group_id.into(),
            billingmonth: billingmonth.into(),
            options: UsageListOptions::default(),
        }
    }

    usage_option_setters!();
}

impl ResourceUsageQuery for ResourceUsageResourceGroupRequest {
    fn operation(&self) -> &'static str {
        "get_resource_usage_resource_group"
    }

    fn path_segments(&self) -> Vec<&str> {
        vec![
            API_VERSION,
            "accounts",
            self.account_id.as_str(),
            "resource_groups",
            self.resource_group_id.as_str(),
            "resource_instances",
            "usage",
            self.billingmonth.as_str(),
        ]
    }

    fn options(&self) -> &UsageListOptions {
        &self.options
    }

    fn required_ids(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("account_id", self.account_id.as_str()),
            ("resource_group_id", self.resource_group_id.as_str()),
        ]
    }

    fn billing_month(&self) -> &str {
        &self.billingmonth
    }
}

// ============================================================================
// Organization
// ============================================================================

/// Resource instance usage in a Cloud Foundry organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceUsageOrgRequest {
    /// Account id
    pub account_id: String,
    /// Organization id
    pub organization_id: String,
    /// Billing month (`yyyy-mm`)
    pub billingmonth: String,
    /// Shared filters and paging options
    #[serde(default)]
    pub options: UsageListOptions,
}

impl ResourceUsageOrgRequest {
    /// Create a request for an organization and billing month
    pub fn new(
        account_id: impl Into<String>,
        organization_id: impl Into<String>,
        billingmonth: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            organization_id: organization_id.into(),
            billingmonth: billingmonth.into(),
            options: UsageListOptions::default(),
        }
    }

    usage_option_setters!();
}

impl ResourceUsageQuery for ResourceUsageOrgRequest {
    fn operation(&self) -> &'static str {
        "get_resource_usage_org"
    }

    fn path_segments(&self) -> Vec<&str> {
        vec![
            API_VERSION,
            "accounts",
            self.account_id.as_str(),
            "organizations",
            self.organization_id.as_str(),
            "resource_instances",
            "usage",
            self.billingmonth.as_str(),
        ]
    }

    fn options(&self) -> &UsageListOptions {
        &self.options
    }

    fn required_ids(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("account_id", self.account_id.as_str()),
            ("organization_id", self.organization_id.as_str()),
        ]
    }

    fn billing_month(&self) -> &str {
        &self.billingmonth
    }
}
