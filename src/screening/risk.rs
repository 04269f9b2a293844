use crate::config::ScreeningConfig;
use crate::models::market::RiskFactor;

/// Threshold checks that mark a pair as unsafe.
#[derive(Debug, Clone, Copy)]
pub struct RiskFlagger {
    min_liquidity: f64,
    min_volume: f64,
}

impl RiskFlagger {
    pub fn new(min_liquidity: f64, min_volume: f64) -> Self {
        Self { min_liquidity, min_volume }
    }

    pub fn from_config(config: &ScreeningConfig) -> Self {
        Self::new(config.min_liquidity, config.min_volume)
    }

    /// Both checks always run; liquidity is reported before volume.
    pub fn flag(&self, liquidity: f64, volume_24h: f64) -> Vec<RiskFactor> {
        let mut factors = Vec::with_capacity(2);
        if liquidity < self.min_liquidity {
            factors.push(RiskFactor::LowLiquidity);
        }
        if volume_24h < self.min_volume {
            factors.push(RiskFactor::NoVolume);
        }
        factors
    }
}

impl Default for RiskFlagger {
    fn default() -> Self {
        Self::from_config(&ScreeningConfig::default())
    }
}
