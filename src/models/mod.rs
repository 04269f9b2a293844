pub mod market;

pub use market::{ClassifiedPair, PairRecord, Recommendation, RiskFactor, ScoredPair};
