//! HTTP client module
//!
//! Provides the HTTP client used to call the usage reports service.
//!
//! # Features
//!
//! - **Retry Toggle**: Retries are off until `enable_retries` is called
//! - **Backoff Strategies**: Constant, linear, and exponential backoff
//! - **Authentication**: Integration with auth module
//! - **Endpoint Building**: Percent-encoded path segments over a base URL

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
