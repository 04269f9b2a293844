use serde::{Deserialize, Deserializer, Serialize};
use crate::models::market::PairRecord;

const UNKNOWN: &str = "Unknown";

/// Body of `GET /dex/search`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub pairs: Vec<RawPair>,
}

/// A pair as DexScreener sends it. Every field is optional upstream.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPair {
    pub chain_id: Option<String>,
    pub dex_id: Option<String>,
    pub pair_address: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub price_usd: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub base_token: TokenInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub liquidity: Liquidity,
    #[serde(deserialize_with = "null_as_default")]
    pub volume: Volume,
    #[serde(deserialize_with = "null_as_default")]
    pub price_change: PriceChange,
    #[serde(deserialize_with = "lenient_i64")]
    pub pair_created_at: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenInfo {
    pub name: Option<String>,
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Liquidity {
    #[serde(deserialize_with = "lenient_f64")]
    pub usd: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Volume {
    #[serde(deserialize_with = "lenient_f64")]
    pub h24: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PriceChange {
    #[serde(deserialize_with = "lenient_f64")]
    pub h1: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub h24: f64,
}

impl RawPair {
    pub fn chain_id(&self) -> &str {
        self.chain_id.as_deref().unwrap_or_default()
    }
}

impl From<RawPair> for PairRecord {
    fn from(raw: RawPair) -> PairRecord {
        PairRecord {
            name: raw.base_token.name.unwrap_or_else(|| UNKNOWN.to_string()),
            symbol: raw.base_token.symbol.unwrap_or_else(|| UNKNOWN.to_string()),
            chain_id: raw.chain_id.unwrap_or_default(),
            price_usd: raw.price_usd,
            volume_24h: raw.volume.h24.max(0.0),
            liquidity_usd: raw.liquidity.usd.max(0.0),
            price_change_24h: raw.price_change.h24,
            price_change_1h: raw.price_change.h1,
            dex_id: raw.dex_id.unwrap_or_else(|| UNKNOWN.to_string()),
            pair_address: raw.pair_address.unwrap_or_default(),
            created_at: raw.pair_created_at,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Float(f64),
    Text(String),
}

/// Accepts a JSON number, a numeric string (`"priceUsd": "0.00001234"`) or
/// null. Anything unparsable becomes 0.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrString>::deserialize(deserializer).unwrap_or(None);
    let parsed = match value {
        Some(NumberOrString::Float(v)) => v,
        Some(NumberOrString::Text(s)) => s.trim().parse().unwrap_or(0.0),
        None => 0.0,
    };
    Ok(if parsed.is_finite() { parsed } else { 0.0 })
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_f64(deserializer)? as i64)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_pair_conversion() {
        let json = r#"{
            "chainId": "solana",
            "dexId": "raydium",
            "pairAddress": "8sLbNZoA1cfnvMJLPfp98ZLAnFSYCFApfJKMbiXNLwxj",
            "baseToken": { "address": "DezX", "name": "Bonk", "symbol": "Bonk" },
            "priceUsd": "0.00002145",
            "volume": { "h24": 1523456.12, "h6": 400000 },
            "priceChange": { "h1": 2.5, "h24": -4.1 },
            "liquidity": { "usd": 845000.5, "base": 1, "quote": 2 },
            "pairCreatedAt": 1670000000000
        }"#;
        let raw: RawPair = serde_json::from_str(json).unwrap();
        let pair = PairRecord::from(raw);
        assert_eq!(pair.name, "Bonk");
        assert_eq!(pair.symbol, "Bonk");
        assert_eq!(pair.chain_id, "solana");
        assert_eq!(pair.dex_id, "raydium");
        assert!((pair.price_usd - 0.00002145).abs() < 1e-12);
        assert_eq!(pair.volume_24h, 1523456.12);
        assert_eq!(pair.liquidity_usd, 845000.5);
        assert_eq!(pair.price_change_1h, 2.5);
        assert_eq!(pair.price_change_24h, -4.1);
        assert_eq!(pair.created_at, 1670000000000);
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let raw: RawPair = serde_json::from_str(r#"{ "chainId": "solana" }"#).unwrap();
        let pair = PairRecord::from(raw);
        assert_eq!(pair.name, "Unknown");
        assert_eq!(pair.symbol, "Unknown");
        assert_eq!(pair.dex_id, "Unknown");
        assert_eq!(pair.pair_address, "");
        assert_eq!(pair.price_usd, 0.0);
        assert_eq!(pair.volume_24h, 0.0);
        assert_eq!(pair.liquidity_usd, 0.0);
        assert_eq!(pair.price_change_1h, 0.0);
        assert_eq!(pair.created_at, 0);
    }

    #[test]
    fn test_nulls_and_garbage_numbers() {
        let json = r#"{
            "priceUsd": null,
            "liquidity": null,
            "volume": { "h24": "not-a-number" },
            "priceChange": { "h1": "3.5" },
            "pairCreatedAt": null
        }"#;
        let pair = PairRecord::from(serde_json::from_str::<RawPair>(json).unwrap());
        assert_eq!(pair.price_usd, 0.0);
        assert_eq!(pair.liquidity_usd, 0.0);
        assert_eq!(pair.volume_24h, 0.0);
        assert_eq!(pair.price_change_1h, 3.5);
        assert_eq!(pair.created_at, 0);
    }

    #[test]
    fn test_search_response_without_pairs() {
        let empty: SearchResponse = serde_json::from_str(r#"{ "schemaVersion": "1.0.0" }"#).unwrap();
        assert!(empty.pairs.is_empty());
        let null: SearchResponse = serde_json::from_str(r#"{ "pairs": null }"#).unwrap();
        assert!(null.pairs.is_empty());
    }
}
