use crate::config::{Band, ScoringConfig};
use crate::models::market::{ClassifiedPair, Recommendation, ScoredPair};

const MIN_SCORE: i32 = 0;
const MAX_SCORE: i32 = 100;

/// Heuristic 0-100 score built from ordered band rules.
///
/// Each dimension contributes at most one band: rules are kept sorted from
/// the most to the least extreme threshold and the first satisfied rule wins.
#[derive(Debug, Clone)]
pub struct Scorer {
    base_score: i32,
    volume_bands: Vec<Band>,
    liquidity_bands: Vec<Band>,
    momentum_gain_bands: Vec<Band>,
    momentum_loss_bands: Vec<Band>,
    risk_penalty: i32,
}

impl Scorer {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            base_score: config.base_score,
            volume_bands: sorted_descending(&config.volume_bands),
            liquidity_bands: sorted_descending(&config.liquidity_bands),
            momentum_gain_bands: sorted_descending(&config.momentum_gain_bands),
            momentum_loss_bands: sorted_ascending(&config.momentum_loss_bands),
            risk_penalty: config.risk_penalty,
        }
    }

    pub fn score(
        &self,
        volume_24h: f64,
        liquidity: f64,
        price_change_1h: f64,
        risk_factor_count: usize,
    ) -> u8 {
        let momentum = first_above(&self.momentum_gain_bands, price_change_1h)
            .or_else(|| first_below(&self.momentum_loss_bands, price_change_1h))
            .unwrap_or(0);
        let penalty = self
            .risk_penalty
            .saturating_mul(i32::try_from(risk_factor_count).unwrap_or(i32::MAX));

        let raw = self
            .base_score
            .saturating_add(first_above(&self.volume_bands, volume_24h).unwrap_or(0))
            .saturating_add(first_above(&self.liquidity_bands, liquidity).unwrap_or(0))
            .saturating_add(momentum)
            .saturating_sub(penalty);

        raw.clamp(MIN_SCORE, MAX_SCORE) as u8
    }

    pub fn score_pair(&self, classified: ClassifiedPair) -> ScoredPair {
        let pair = &classified.pair;
        let score = self.score(
            pair.volume_24h,
            pair.liquidity_usd,
            pair.price_change_1h,
            classified.risk_factors.len(),
        );
        ScoredPair {
            classified,
            score,
            recommendation: Recommendation::from_score(score),
        }
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

fn first_above(bands: &[Band], value: f64) -> Option<i32> {
    bands.iter().find(|b| value > b.threshold).map(|b| b.delta)
}

fn first_below(bands: &[Band], value: f64) -> Option<i32> {
    bands.iter().find(|b| value < b.threshold).map(|b| b.delta)
}

fn sorted_descending(bands: &[Band]) -> Vec<Band> {
    let mut bands = bands.to_vec();
    bands.sort_by(|a, b| b.threshold.total_cmp(&a.threshold));
    bands
}

fn sorted_ascending(bands: &[Band]) -> Vec<Band> {
    let mut bands = bands.to_vec();
    bands.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
    bands
}
