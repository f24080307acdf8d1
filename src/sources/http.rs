//! Shared HTTP plumbing for the source adapters.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{FetchError, ProfileError, Result};

/// Everything an adapter needs to talk upstream: one pooled client, the
/// shared cache and the resolved configuration.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub http: reqwest::Client,
    pub cache: Cache,
    pub config: Arc<Config>,
}

impl SourceContext {
    pub fn new(config: Arc<Config>, cache: Cache) -> Result<Self> {
        let http = build_client(Duration::from_secs(config.request_timeout_secs))?;
        Ok(Self {
            http,
            cache,
            config,
        })
    }

    pub fn ttl(&self) -> u64 {
        self.config.cache_ttl
    }
}

/// Builds the client shared by every adapter, with a per-request timeout.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .timeout(timeout)
        .default_headers(headers)
        .user_agent(concat!("cs2_profile/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ProfileError::Internal(format!("failed to create HTTP client: {}", e)))
}

/// Sends `request` and decodes a successful JSON body as `T`.
///
/// Any non-2xx status is an error; the body of a failed response is not read.
pub async fn get_json<T: DeserializeOwned>(
    source_name: &'static str,
    request: reqwest::RequestBuilder,
) -> std::result::Result<T, FetchError> {
    let response = request
        .send()
        .await
        .map_err(|e| FetchError::from_reqwest(source_name, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            source_name,
            status: status.as_u16(),
        });
    }

    response.json::<T>().await.map_err(|e| FetchError::Decode {
        source_name,
        message: e.to_string(),
    })
}
