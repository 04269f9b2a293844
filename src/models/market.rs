use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::fmt;

const CHART_BASE_URL: &str = "https://dexscreener.com";

/// One observed trading pair, normalized from the upstream search response.
///
/// Numeric fields are always present: anything the upstream omitted is 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairRecord {
    pub name: String,
    pub symbol: String,
    pub chain_id: String,
    pub price_usd: f64,
    pub volume_24h: f64,
    pub liquidity_usd: f64,
    pub price_change_24h: f64,
    pub price_change_1h: f64,
    pub dex_id: String,
    pub pair_address: String,
    /// Epoch milliseconds, 0 when unknown.
    pub created_at: i64,
}

impl PairRecord {
    pub fn chart_url(&self) -> String {
        format!("{}/{}/{}", CHART_BASE_URL, self.chain_id, self.pair_address)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        if self.created_at <= 0 {
            return None;
        }
        DateTime::from_timestamp_millis(self.created_at)
    }

    /// Shortened pair address for display, e.g. `7xKXtg2C...`.
    pub fn short_address(&self) -> String {
        let prefix: String = self.pair_address.chars().take(8).collect();
        format!("{}...", prefix)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskFactor {
    LowLiquidity,
    NoVolume,
}

impl RiskFactor {
    pub fn label(&self) -> &'static str {
        match self {
            RiskFactor::LowLiquidity => "Low liquidity",
            RiskFactor::NoVolume => "No volume",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            RiskFactor::LowLiquidity => "💀",
            RiskFactor::NoVolume => "📉",
        }
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A pair together with the outcome of the risk checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedPair {
    pub pair: PairRecord,
    pub is_meme: bool,
    /// In evaluation order: liquidity check first, then volume.
    pub risk_factors: Vec<RiskFactor>,
}

impl ClassifiedPair {
    pub fn is_safe(&self) -> bool {
        self.risk_factors.is_empty()
    }

    pub fn risk_summary(&self) -> String {
        self.risk_factors
            .iter()
            .map(|f| f.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Recommendation {
    Avoid,
    Caution,
    Watch,
    Buy,
    StrongBuy,
}

impl Recommendation {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Recommendation::StrongBuy,
            60..=79 => Recommendation::Buy,
            40..=59 => Recommendation::Watch,
            20..=39 => Recommendation::Caution,
            _ => Recommendation::Avoid,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "STRONG BUY",
            Recommendation::Buy => "BUY",
            Recommendation::Watch => "WATCH",
            Recommendation::Caution => "CAUTION",
            Recommendation::Avoid => "AVOID",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "🚀",
            Recommendation::Buy => "✅",
            Recommendation::Watch => "👀",
            Recommendation::Caution => "⚠️",
            Recommendation::Avoid => "❌",
        }
    }

    pub fn rationale(&self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "High volume and liquidity, strong momentum",
            Recommendation::Buy => "Good metrics, consider entering",
            Recommendation::Watch => "Decent but wait for confirmation",
            Recommendation::Caution => "High risk, small position only",
            Recommendation::Avoid => "Too risky, look elsewhere",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji(), self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPair {
    pub classified: ClassifiedPair,
    /// Always within 0..=100.
    pub score: u8,
    pub recommendation: Recommendation,
}

impl ScoredPair {
    pub fn pair(&self) -> &PairRecord {
        &self.classified.pair
    }

    pub fn is_safe(&self) -> bool {
        self.classified.is_safe()
    }
}
