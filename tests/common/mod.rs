use async_trait::async_trait;
use meme_coin_bot::api::{ApiError, MarketDataSource, RawPair};
use meme_coin_bot::config::Config;
use std::sync::Mutex;
use std::time::Duration;

/// Serves a canned search body and records every query it receives.
pub struct StubSource {
    body: std::result::Result<String, ApiError>,
    pub queries: Mutex<Vec<(String, Option<Duration>)>>,
}

impl StubSource {
    pub fn with_body(body: &str) -> Self {
        Self {
            body: Ok(body.to_string()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: ApiError) -> Self {
        Self {
            body: Err(err),
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl MarketDataSource for StubSource {
    async fn search_pairs(
        &self,
        query: &str,
        timeout: Option<Duration>,
    ) -> std::result::Result<Vec<RawPair>, ApiError> {
        self.queries.lock().unwrap().push((query.to_string(), timeout));
        match &self.body {
            Ok(body) => meme_coin_bot::api::dexscreener::parse_search_response(body.as_bytes()),
            Err(e) => Err(e.clone()),
        }
    }
}

pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.telegram.bot_token = "123456:TEST-TOKEN".to_string();
    config
}

/// A DexScreener search body with a mix of meme, non-meme, safe and risky
/// pairs across two chains.
pub const SEARCH_BODY: &str = r#"{
  "schemaVersion": "1.0.0",
  "pairs": [
    {
      "chainId": "solana", "dexId": "raydium", "pairAddress": "SoLPairAddr1",
      "baseToken": { "name": "Wrapped SOL", "symbol": "SOL" },
      "priceUsd": "150.12", "volume": { "h24": 90000000 }, "liquidity": { "usd": 50000000 },
      "priceChange": { "h1": 0.5, "h24": 2.1 }
    },
    {
      "chainId": "solana", "dexId": "raydium", "pairAddress": "BonkPairAddr1",
      "baseToken": { "name": "Bonk", "symbol": "Bonk" },
      "priceUsd": "0.00002145", "volume": { "h24": 1523456.12 }, "liquidity": { "usd": 845000.5 },
      "priceChange": { "h1": 6.2, "h24": -4.1 }, "pairCreatedAt": 1670000000000
    },
    {
      "chainId": "solana", "dexId": "orca", "pairAddress": "WifPairAddr11",
      "baseToken": { "name": "dogwifhat", "symbol": "WIF" },
      "priceUsd": "2.31", "volume": { "h24": 320000 }, "liquidity": { "usd": 120000 },
      "priceChange": { "h1": -6.0, "h24": 10.0 }
    },
    {
      "chainId": "solana", "dexId": "pumpswap", "pairAddress": "RugCatAddr111",
      "baseToken": { "name": "Rug Cat", "symbol": "RCAT" },
      "priceUsd": "0.0000001", "volume": { "h24": 250 }, "liquidity": { "usd": 900 }
    },
    {
      "chainId": "solana", "dexId": "pumpswap", "pairAddress": "ShibaAddr1111",
      "baseToken": { "name": "Shiba Sol", "symbol": "SHIBS" },
      "priceUsd": "0.00003", "volume": { "h24": 4000 }, "liquidity": { "usd": null }
    },
    {
      "chainId": "ethereum", "dexId": "uniswap", "pairAddress": "0xPepe",
      "baseToken": { "name": "Pepe", "symbol": "PEPE" },
      "priceUsd": "0.0000012", "volume": { "h24": 80000000 }, "liquidity": { "usd": 30000000 }
    }
  ]
}"#;
