//! Client configuration
//!
//! Service URL, authentication and retry settings for the usage reports
//! client. Settings can be read from:
//!
//! - a credentials file in `.env` format (`usage_reports_v4.env`)
//! - the process environment
//! - a YAML file
//!
//! ## Credential keys
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `USAGE_REPORTS_URL` | `https://billing.cloud.ibm.com` | Service base URL |
//! | `USAGE_REPORTS_AUTH_TYPE` | inferred | `iam`, `bearertoken`, `basic`, `noauth` |
//! | `USAGE_REPORTS_APIKEY` | - | IAM API key |
//! | `USAGE_REPORTS_AUTH_URL` | `https://iam.cloud.ibm.com` | IAM token service |
//! | `USAGE_REPORTS_BEARER_TOKEN` | - | Static bearer token |
//! | `USAGE_REPORTS_USERNAME` / `_PASSWORD` | - | Basic auth |
//! | `USAGE_REPORTS_TIMEOUT` | `60` | Request timeout (seconds) |
//! | `USAGE_REPORTS_ENABLE_RETRIES` | `false` | Retry failed requests |
//! | `USAGE_REPORTS_MAX_RETRIES` | `4` | Retries when enabled |
//! | `USAGE_REPORTS_RETRY_INTERVAL` | `30` | Max delay between retries (seconds) |

use crate::auth::{AuthConfig, DEFAULT_IAM_URL};
use crate::error::{Error, Result, ResultExt};
use crate::http::HttpClientConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default service name, used as the credential key prefix
pub const DEFAULT_SERVICE_NAME: &str = "usage_reports";

/// Default service URL
pub const DEFAULT_SERVICE_URL: &str = "https://billing.cloud.ibm.com";

/// Default credentials file name
pub const DEFAULT_CREDENTIALS_FILE: &str = "usage_reports_v4.env";

/// Settings for the usage reports client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Service base URL
    pub url: String,
    /// Authentication
    pub auth: AuthConfig,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Retry failed requests
    pub enable_retries: bool,
    /// Maximum number of retries when enabled
    pub max_retries: u32,
    /// Maximum delay between retries in seconds
    pub retry_interval_secs: u64,
    /// Override the user agent
    pub user_agent: Option<String>,
    /// Extra headers sent with every request
    pub headers: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVICE_URL.to_string(),
            auth: AuthConfig::None,
            timeout_secs: 60,
            enable_retries: false,
            max_retries: 4,
            retry_interval_secs: 30,
            user_agent: None,
            headers: HashMap::new(),
        }
    }
}

impl ClientConfig {
    /// Read settings for the default service from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_vars(DEFAULT_SERVICE_NAME, std::env::vars())
    }

    /// Read settings for the default service from a `.env` credentials file
    pub fn from_credentials_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let vars = dotenvy::from_path_iter(path)
            .and_then(|iter| iter.collect::<std::result::Result<Vec<_>, _>>())
            .map_err(|e| {
                Error::config(format!(
                    "Failed to read credentials file '{}': {e}",
                    path.display()
                ))
            })?;

        debug!("Loaded {} entries from {}", vars.len(), path.display());
        Self::from_vars(DEFAULT_SERVICE_NAME, vars)
    }

    /// Build settings from `<SERVICE>_<KEY>` variables
    ///
    /// Variables belonging to other services are ignored. Missing keys keep
    /// their defaults.
    pub fn from_vars<I, K, V>(service_name: &str, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let prefix = format!("{}_", service_name.to_uppercase());
        let props: HashMap<String, String> = vars
            .into_iter()
            .filter_map(|(key, value)| {
                key.as_ref()
                    .strip_prefix(&prefix)
                    .map(|name| (name.to_string(), value.into()))
            })
            .collect();

        let mut config = Self::default();
        if let Some(url) = props.get("URL") {
            config.url.clone_from(url);
        }
        if let Some(timeout) = props.get("TIMEOUT") {
            config.timeout_secs = parse_prop("TIMEOUT", timeout)?;
        }
        if let Some(enabled) = props.get("ENABLE_RETRIES") {
            config.enable_retries = parse_prop("ENABLE_RETRIES", enabled)?;
        }
        if let Some(retries) = props.get("MAX_RETRIES") {
            config.max_retries = parse_prop("MAX_RETRIES", retries)?;
        }
        if let Some(interval) = props.get("RETRY_INTERVAL") {
            config.retry_interval_secs = parse_prop("RETRY_INTERVAL", interval)?;
        }
        config.auth = auth_from_props(&props)?;

        config.validate()?;
        Ok(config)
    }

    /// Load settings from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Load settings from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings for consistency
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.url)
            .map_err(|e| Error::invalid_config("url", format!("{e}: {}", self.url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_config(
                "url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_config("timeout_secs", "must be positive"));
        }
        Ok(())
    }

    /// HTTP client settings derived from this config
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.url)
            .timeout(Duration::from_secs(self.timeout_secs));

        if self.enable_retries {
            builder = builder.enable_retries(
                self.max_retries,
                Duration::from_secs(self.retry_interval_secs),
            );
        }
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }

        builder.build()
    }
}

fn parse_prop<T>(name: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| Error::invalid_config(name, format!("{e}: '{value}'")))
}

fn auth_from_props(props: &HashMap<String, String>) -> Result<AuthConfig> {
    let required = |key: &str| {
        props
            .get(key)
            .cloned()
            .ok_or_else(|| Error::missing_field(key))
    };

    let auth_type = match props.get("AUTH_TYPE") {
        Some(auth_type) => auth_type.to_lowercase(),
        None if props.contains_key("APIKEY") => "iam".to_string(),
        None if props.contains_key("BEARER_TOKEN") => "bearertoken".to_string(),
        None => "noauth".to_string(),
    };

    match auth_type.as_str() {
        "iam" => Ok(AuthConfig::Iam {
            apikey: required("APIKEY")?,
            url: props
                .get("AUTH_URL")
                .cloned()
                .unwrap_or_else(|| DEFAULT_IAM_URL.to_string()),
        }),
        "bearertoken" | "bearer" => Ok(AuthConfig::Bearer {
            token: required("BEARER_TOKEN")?,
        }),
        "basic" => Ok(AuthConfig::Basic {
            username: required("USERNAME")?,
            password: required("PASSWORD")?,
        }),
        "noauth" | "none" => Ok(AuthConfig::None),
        other => Err(Error::invalid_config(
            "AUTH_TYPE",
            format!("unsupported auth type '{other}'"),
        )),
    }
}
