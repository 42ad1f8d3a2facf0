//! HTTP client for the Ozon Seller API with rate limiting and typed errors
//!
//! Wraps `reqwest` with the seller credentials as default headers, a fixed
//! per-call timeout, and a request rate limiter so refresh cycles stay
//! within the marketplace's request quotas.

use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::{Context, Result};
use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};

use crate::domain::error::{ClientError, ClientResult};

/// HTTP client configuration for seller API calls
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub client_id: String,
    pub api_key: String,
    pub timeout_seconds: u64,
    pub max_requests_per_second: u32,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            api_key: String::new(),
            timeout_seconds: 10,
            max_requests_per_second: 5,
        }
    }
}

/// Rate-limited HTTP client carrying seller credentials
pub struct HttpClient {
    client: Client,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration.
    ///
    /// Credentials may be empty here; callers gate requests on
    /// [`HttpClient::has_credentials`] before going to the network.
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if !config.client_id.is_empty() {
            headers.insert(
                HeaderName::from_static("client-id"),
                HeaderValue::from_str(&config.client_id).context("Invalid Client-Id value")?,
            );
        }
        if !config.api_key.is_empty() {
            headers.insert(
                HeaderName::from_static("api-key"),
                HeaderValue::from_str(&config.api_key).context("Invalid Api-Key value")?,
            );
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.max_requests_per_second)
                .context("Rate limit must be greater than 0")?,
        );
        let rate_limiter = RateLimiter::direct(quota);

        Ok(Self {
            client,
            rate_limiter,
            config,
        })
    }

    /// Whether both credential values are present.
    pub fn has_credentials(&self) -> bool {
        !self.config.client_id.is_empty() && !self.config.api_key.is_empty()
    }

    /// POST a JSON body and return the response, mapping transport failures
    /// and non-2xx statuses onto [`ClientError`].
    pub async fn post_json(&self, url: &str, body: &serde_json::Value) -> ClientResult<Response> {
        self.rate_limiter.until_ready().await;

        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            tracing::warn!("Request to {} rejected with {}: {}", url, status, body_text);
            return Err(ClientError::Status {
                status: status.as_u16(),
            });
        }

        tracing::debug!("POST {} succeeded ({})", url, status);
        Ok(response)
    }

    /// Get the configuration.
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

fn map_reqwest_error(error: reqwest::Error) -> ClientError {
    if error.is_timeout() {
        ClientError::Timeout
    } else if let Some(status) = error.status() {
        ClientError::Status {
            status: status.as_u16(),
        }
    } else {
        ClientError::connection(error.to_string())
    }
}
