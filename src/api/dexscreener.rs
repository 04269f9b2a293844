use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use std::time::{Duration, Instant};

use crate::api::types::SearchResponse;
use crate::api::{ApiError, MarketDataSource, RawPair};
use crate::config::DexScreenerConfig;
use crate::error::Result;
use crate::metrics;

const SEARCH_ENDPOINT: &str = "dex/search";

#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    client: Client,
    base_url: String,
}

impl DexScreenerClient {
    pub fn new(config: &DexScreenerConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn search_url(&self) -> String {
        format!("{}/{}", self.base_url, SEARCH_ENDPOINT)
    }

    async fn request_pairs(
        &self,
        query: &str,
        timeout: Option<Duration>,
    ) -> std::result::Result<Vec<RawPair>, ApiError> {
        let mut request = self.client.get(self.search_url()).query(&[("q", query)]);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::StatusError(status.as_u16()));
        }

        let body = response.bytes().await?;
        parse_search_response(&body)
    }
}

/// Decodes a `/dex/search` body. Missing or null `pairs` is an empty result,
/// not an error.
pub fn parse_search_response(body: &[u8]) -> std::result::Result<Vec<RawPair>, ApiError> {
    let response: SearchResponse = serde_json::from_slice(body)?;
    Ok(response.pairs)
}

#[async_trait]
impl MarketDataSource for DexScreenerClient {
    async fn search_pairs(
        &self,
        query: &str,
        timeout: Option<Duration>,
    ) -> std::result::Result<Vec<RawPair>, ApiError> {
        let started = Instant::now();
        metrics::UPSTREAM_REQUESTS.inc();

        let result = self.request_pairs(query, timeout).await;
        metrics::UPSTREAM_LATENCY.observe(started.elapsed().as_secs_f64());

        match &result {
            Ok(pairs) => debug!("DexScreener search {:?} returned {} pairs", query, pairs.len()),
            Err(e) => {
                metrics::UPSTREAM_FAILURES.inc();
                warn!("DexScreener search {:?} failed: {}", query, e);
            }
        }
        result
    }
}
