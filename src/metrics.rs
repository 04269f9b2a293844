use prometheus::{Counter, CounterVec, Encoder, Histogram, Opts, Registry, TextEncoder};
use lazy_static::lazy_static;

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    pub static ref UPSTREAM_REQUESTS: Counter = Counter::new(
        "upstream_requests_total",
        "Total number of DexScreener search requests"
    ).expect("valid metric");

    pub static ref UPSTREAM_FAILURES: Counter = Counter::new(
        "upstream_failures_total",
        "DexScreener searches that failed and were treated as empty"
    ).expect("valid metric");

    pub static ref UPSTREAM_LATENCY: Histogram = Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "upstream_latency_seconds",
            "DexScreener search latency in seconds"
        ).buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0])
    ).expect("valid metric");

    pub static ref MEME_PAIRS_SCANNED: Counter = Counter::new(
        "meme_pairs_scanned_total",
        "Pairs that matched the meme keyword set during scans"
    ).expect("valid metric");

    pub static ref COMMANDS_HANDLED: CounterVec = CounterVec::new(
        Opts::new("commands_handled_total", "Chat commands handled, by command"),
        &["command"]
    ).expect("valid metric");
}

pub fn init() -> Result<(), prometheus::Error> {
    REGISTRY.register(Box::new(UPSTREAM_REQUESTS.clone()))?;
    REGISTRY.register(Box::new(UPSTREAM_FAILURES.clone()))?;
    REGISTRY.register(Box::new(UPSTREAM_LATENCY.clone()))?;
    REGISTRY.register(Box::new(MEME_PAIRS_SCANNED.clone()))?;
    REGISTRY.register(Box::new(COMMANDS_HANDLED.clone()))?;
    Ok(())
}

/// Renders the registry in the Prometheus text exposition format.
pub fn render() -> Result<String, prometheus::Error> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&REGISTRY.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
