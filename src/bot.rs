use crate::api::MarketDataSource;
use crate::config::Config;
use crate::metrics;
use crate::models::market::{PairRecord, ScoredPair};
use crate::screening::PairAnalyzer;
use log::{info, warn};
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

/// Outcome of a trending scan, each side sorted by descending 24h volume.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub safe: Vec<ScoredPair>,
    pub risky: Vec<ScoredPair>,
}

impl ScanResult {
    pub fn is_empty(&self) -> bool {
        self.safe.is_empty() && self.risky.is_empty()
    }
}

/// Runs the screening pipeline against the market data source. Holds no
/// per-request state, so one instance serves every chat.
pub struct MemeScanner {
    source: Arc<dyn MarketDataSource>,
    analyzer: PairAnalyzer,
    chain_id: String,
    search_query: String,
    scan_limit: usize,
    scan_timeout: Duration,
    max_safe_results: usize,
    max_risky_results: usize,
}

impl MemeScanner {
    pub fn new(source: Arc<dyn MarketDataSource>, config: &Config) -> Self {
        Self {
            source,
            analyzer: PairAnalyzer::new(&config.screening, &config.scoring),
            chain_id: config.dexscreener.chain_id.clone(),
            search_query: config.dexscreener.search_query.clone(),
            scan_limit: config.dexscreener.scan_limit,
            scan_timeout: Duration::from_secs(config.dexscreener.scan_timeout_secs),
            max_safe_results: config.screening.max_safe_results,
            max_risky_results: config.screening.max_risky_results,
        }
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// Scans the chain for meme pairs and splits them into safe and risky
    /// lists. A failed fetch yields an empty result.
    pub async fn scan_trending(&self) -> ScanResult {
        let raw_pairs = match self
            .source
            .search_pairs(&self.search_query, Some(self.scan_timeout))
            .await
        {
            Ok(pairs) => pairs,
            Err(e) => {
                warn!("Trending scan found no data: {}", e);
                Vec::new()
            }
        };

        let (mut safe, mut risky): (Vec<_>, Vec<_>) = raw_pairs
            .into_iter()
            .take(self.scan_limit)
            .map(PairRecord::from)
            .filter(|pair| self.analyzer.is_meme(pair))
            .map(|pair| self.analyzer.analyze(pair))
            .partition(|scored| scored.is_safe());

        metrics::MEME_PAIRS_SCANNED.inc_by((safe.len() + risky.len()) as f64);
        info!("Trending scan: {} safe, {} risky meme pairs", safe.len(), risky.len());

        sort_by_volume(&mut safe);
        sort_by_volume(&mut risky);
        safe.truncate(self.max_safe_results);
        risky.truncate(self.max_risky_results);

        ScanResult { safe, risky }
    }

    /// Looks up the first pair for `symbol` on the configured chain.
    /// `None` covers both "no such pair" and a failed fetch.
    pub async fn check_symbol(&self, symbol: &str) -> Option<ScoredPair> {
        let raw_pairs = match self.source.search_pairs(symbol, None).await {
            Ok(pairs) => pairs,
            Err(e) => {
                warn!("Lookup for {} found no data: {}", symbol, e);
                return None;
            }
        };

        let pair = raw_pairs
            .into_iter()
            .find(|raw| raw.chain_id() == self.chain_id)
            .map(PairRecord::from)?;

        let scored = self.analyzer.analyze(pair);
        info!(
            "Lookup {}: score {} ({})",
            symbol,
            scored.score,
            scored.recommendation.label()
        );
        Some(scored)
    }
}

fn sort_by_volume(pairs: &mut [ScoredPair]) {
    pairs.sort_by(|a, b| {
        b.pair()
            .volume_24h
            .partial_cmp(&a.pair().volume_24h)
            .unwrap_or(Ordering::Equal)
    });
}
