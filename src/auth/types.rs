//! Auth configuration types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default IAM token service
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";

/// Location for API key placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// Place in HTTP header
    #[default]
    Header,
    /// Place in query parameter
    Query,
}

/// Authentication configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    #[serde(alias = "noauth")]
    None,

    /// Bearer token authentication
    #[serde(alias = "bearertoken")]
    Bearer {
        /// The bearer token
        token: String,
    },

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// Static API key (header or query)
    ApiKey {
        /// Where to place the API key
        #[serde(default)]
        location: Location,
        /// Header name (for header location)
        #[serde(default)]
        header_name: Option<String>,
        /// Query parameter name (for query location)
        #[serde(default)]
        query_param: Option<String>,
        /// Prefix to add before the value (e.g., "Bearer ")
        #[serde(default)]
        prefix: Option<String>,
        /// The API key value
        value: String,
    },

    /// IAM API key exchanged for a short-lived bearer token
    Iam {
        /// The IAM API key
        apikey: String,
        /// IAM token service base URL
        #[serde(default = "default_iam_url")]
        url: String,
    },
}

fn default_iam_url() -> String {
    DEFAULT_IAM_URL.to_string()
}

impl AuthConfig {
    /// Check if this auth type needs a token exchange
    pub fn requires_token(&self) -> bool {
        matches!(self, Self::Iam { .. })
    }
}

/// Cached token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    ///
    /// Returns `None` when the expiry is not a representable time.
    pub fn expires_in(token: String, seconds: i64) -> Option<Self> {
        let expires_at = chrono::Duration::try_seconds(seconds)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))?;
        Some(Self {
            token,
            expires_at: Some(expires_at),
        })
    }

    /// Check if the token is expired (with 60 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(60);
                Utc::now() + buffer >= expires_at
            }
            None => false, // No expiration = never expires
        }
    }
}
