use crate::api::types::{Liquidity, PriceChange, RawPair, TokenInfo, Volume};
use crate::config::Config;
use crate::models::market::PairRecord;

// Helper to create a config usable without a real bot token.
pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.telegram.bot_token = "123456:TEST-TOKEN".to_string();
    config.telegram.public_url = Some("https://bot.example.com".to_string());
    config
}

pub fn named_pair(name: &str, symbol: &str, volume_24h: f64, liquidity_usd: f64) -> PairRecord {
    PairRecord {
        name: name.to_string(),
        symbol: symbol.to_string(),
        chain_id: "solana".to_string(),
        price_usd: 0.00001234,
        volume_24h,
        liquidity_usd,
        price_change_24h: 12.5,
        price_change_1h: 0.0,
        dex_id: "raydium".to_string(),
        pair_address: format!("{}pairaddress111", symbol),
        created_at: 1_700_000_000_000,
    }
}

pub fn sample_pair(symbol: &str, volume_24h: f64, liquidity_usd: f64) -> PairRecord {
    named_pair(&format!("{} Token", symbol), symbol, volume_24h, liquidity_usd)
}

/// Upstream representation of a pair, as the search endpoint returns it.
pub fn raw_pair(chain_id: &str, name: &str, symbol: &str, volume_24h: f64, liquidity_usd: f64) -> RawPair {
    RawPair {
        chain_id: Some(chain_id.to_string()),
        dex_id: Some("raydium".to_string()),
        pair_address: Some(format!("{}pairaddress111", symbol)),
        price_usd: 0.0001,
        base_token: TokenInfo {
            name: Some(name.to_string()),
            symbol: Some(symbol.to_string()),
        },
        liquidity: Liquidity { usd: liquidity_usd },
        volume: Volume { h24: volume_24h },
        price_change: PriceChange { h1: 0.0, h24: 0.0 },
        pair_created_at: 0,
    }
}
