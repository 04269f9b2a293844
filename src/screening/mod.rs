use crate::config::{ScoringConfig, ScreeningConfig};
use crate::models::market::{ClassifiedPair, PairRecord, ScoredPair};

mod classifier;
pub use classifier::MemeClassifier;

mod risk;
pub use risk::RiskFlagger;

mod scoring;
pub use scoring::Scorer;

/// The classify → flag → score → recommend pipeline for a single pair.
#[derive(Debug, Clone)]
pub struct PairAnalyzer {
    classifier: MemeClassifier,
    flagger: RiskFlagger,
    scorer: Scorer,
}

impl PairAnalyzer {
    pub fn new(screening: &ScreeningConfig, scoring: &ScoringConfig) -> Self {
        Self {
            classifier: MemeClassifier::new(&screening.meme_keywords),
            flagger: RiskFlagger::from_config(screening),
            scorer: Scorer::new(scoring),
        }
    }

    pub fn is_meme(&self, pair: &PairRecord) -> bool {
        self.classifier.is_meme(&pair.name, &pair.symbol)
    }

    pub fn classify(&self, pair: PairRecord) -> ClassifiedPair {
        let is_meme = self.is_meme(&pair);
        let risk_factors = self.flagger.flag(pair.liquidity_usd, pair.volume_24h);
        ClassifiedPair { pair, is_meme, risk_factors }
    }

    pub fn analyze(&self, pair: PairRecord) -> ScoredPair {
        self.scorer.score_pair(self.classify(pair))
    }
}

impl Default for PairAnalyzer {
    fn default() -> Self {
        Self::new(&ScreeningConfig::default(), &ScoringConfig::default())
    }
}
