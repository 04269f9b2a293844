use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub mod dexscreener;
pub mod types;

pub use dexscreener::DexScreenerClient;
pub use types::{RawPair, SearchResponse};

/// Why a search against the pair-data API produced no usable data.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("request failed: {0}")]
    RequestError(String),
    #[error("unexpected status {0}")]
    StatusError(u16),
    #[error("invalid response format: {0}")]
    InvalidFormat(String),
    #[error("request timed out: {0}")]
    Timeout(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(err.to_string())
        } else if err.is_decode() {
            ApiError::InvalidFormat(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::StatusError(status.as_u16())
        } else {
            ApiError::RequestError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidFormat(err.to_string())
    }
}

/// Source of pair search results. The bot only ever talks to DexScreener;
/// the trait is the seam the scanner is tested through.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Searches pairs for a chain name or token symbol. `timeout` bounds the
    /// whole request when set.
    async fn search_pairs(
        &self,
        query: &str,
        timeout: Option<Duration>,
    ) -> std::result::Result<Vec<RawPair>, ApiError>;
}
