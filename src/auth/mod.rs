//! Authentication module
//!
//! Supports: No auth, Bearer, Basic, API Key, IAM API key exchange
//!
//! The `Authenticator` applies credentials to outgoing requests and caches
//! the access token obtained through an IAM API key exchange.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, CachedToken, Location, DEFAULT_IAM_URL};

#[cfg(test)]
mod tests;
