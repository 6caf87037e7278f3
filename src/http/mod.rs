//! HTTP client module
//!
//! Provides the HTTP client used by the pagination fetcher.
//!
//! # Features
//!
//! - **Automatic Retries**: Configurable per-request retry with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Backoff Strategies**: Constant, linear, and exponential backoff

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
