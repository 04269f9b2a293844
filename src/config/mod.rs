use serde::{Deserialize, Serialize};
use std::path::Path;
use std::fs;
use std::env;
use anyhow::{anyhow, Result};

const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub server: ServerConfig,
    pub dexscreener: DexScreenerConfig,
    pub screening: ScreeningConfig,
    pub scoring: ScoringConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// Externally reachable origin used by `/set_webhook`. Falls back to the
    /// request's Host header when unset.
    pub public_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DexScreenerConfig {
    pub base_url: String,
    /// Chain the bot reports on; `/check` only accepts pairs on this chain.
    pub chain_id: String,
    /// Search term used by the trending scan.
    pub search_query: String,
    /// Number of upstream pairs inspected per scan.
    pub scan_limit: usize,
    pub scan_timeout_secs: u64,
}

impl Default for DexScreenerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.dexscreener.com/latest".to_string(),
            chain_id: "solana".to_string(),
            search_query: "solana".to_string(),
            scan_limit: 50,
            scan_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ScreeningConfig {
    pub meme_keywords: Vec<String>,
    pub min_liquidity: f64,
    pub min_volume: f64,
    pub max_safe_results: usize,
    pub max_risky_results: usize,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            meme_keywords: [
                "dog", "cat", "pepe", "woof", "bonk", "shib", "doge",
                "samoyed", "husky", "floki", "babydoge", "saitama",
            ]
            .iter()
            .map(|k| k.to_string())
            .collect(),
            min_liquidity: 10_000.0,
            min_volume: 1_000.0,
            max_safe_results: 10,
            max_risky_results: 5,
        }
    }
}

/// One `value > threshold => delta` rule (or `value < threshold` for
/// downside rules).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Band {
    pub threshold: f64,
    pub delta: i32,
}

impl Band {
    pub const fn new(threshold: f64, delta: i32) -> Self {
        Self { threshold, delta }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    pub base_score: i32,
    pub volume_bands: Vec<Band>,
    pub liquidity_bands: Vec<Band>,
    pub momentum_gain_bands: Vec<Band>,
    pub momentum_loss_bands: Vec<Band>,
    pub risk_penalty: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 50,
            volume_bands: vec![
                Band::new(1_000_000.0, 20),
                Band::new(500_000.0, 15),
                Band::new(100_000.0, 10),
                Band::new(50_000.0, 5),
            ],
            liquidity_bands: vec![
                Band::new(500_000.0, 20),
                Band::new(200_000.0, 15),
                Band::new(100_000.0, 10),
                Band::new(50_000.0, 5),
            ],
            momentum_gain_bands: vec![Band::new(5.0, 10), Band::new(2.0, 5)],
            momentum_loss_bands: vec![Band::new(-5.0, -10)],
            risk_penalty: 10,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Append log lines to this file instead of stderr.
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&config_str)?;
        Ok(config)
    }

    /// Loads `path` when it exists, otherwise starts from defaults, then
    /// applies environment overrides.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            Self::load(path)?
        } else {
            Config::default()
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(token) = env::var("BOT_TOKEN")
            .ok()
            .or_else(|| env::var("TELEGRAM_BOT_TOKEN").ok())
        {
            self.telegram.bot_token = token;
        }
        if let Ok(port) = env::var("PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| anyhow!("Invalid PORT value {:?}: {}", port, e))?;
        }
        if let Ok(url) = env::var("PUBLIC_URL") {
            self.telegram.public_url = Some(url);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.telegram.bot_token.trim().is_empty() {
            return Err(anyhow!("Telegram bot token is not set (BOT_TOKEN)"));
        }
        if self.screening.meme_keywords.is_empty() {
            return Err(anyhow!("screening.meme_keywords must not be empty"));
        }
        if self.dexscreener.scan_limit == 0 {
            return Err(anyhow!("dexscreener.scan_limit must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.dexscreener.scan_limit, 50);
        assert_eq!(config.screening.meme_keywords.len(), 12);
        assert_eq!(config.scoring.base_score, 50);
        assert!(config.telegram.bot_token.is_empty());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [telegram]
            bot_token = "123:abc"

            [server]
            port = 8080

            [screening]
            min_liquidity = 25000.0
            "#,
        )
        .unwrap();
        assert_eq!(config.telegram.bot_token, "123:abc");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.screening.min_liquidity, 25_000.0);
        assert_eq!(config.screening.min_volume, 1_000.0);
        assert_eq!(config.dexscreener.chain_id, "solana");
        config.validate().unwrap();
    }

    #[test]
    fn test_scoring_bands_from_toml() {
        let config: Config = toml::from_str(
            r#"
            [scoring]
            volume_bands = [{ threshold = 10.0, delta = 3 }]
            "#,
        )
        .unwrap();
        assert_eq!(config.scoring.volume_bands, vec![Band::new(10.0, 3)]);
        assert_eq!(config.scoring.liquidity_bands.len(), 4);
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(include_str!("../../config/config.example.toml")).unwrap();
        assert_eq!(config.scoring, ScoringConfig::default());
        assert_eq!(config.screening.meme_keywords, ScreeningConfig::default().meme_keywords);
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_validate_requires_token() {
        let config = Config::default();
        assert!(config.validate().is_err());
    }
}
