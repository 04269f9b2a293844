use crate::models::market::{ScoredPair, RiskFactor};
use num_format::{Locale, ToFormattedString};
use teloxide::utils::html::escape;

pub const TRENDING_DISPLAY_LIMIT: usize = 5;
pub const MOONSHOT_DISPLAY_LIMIT: usize = 3;

pub const USAGE_CHECK: &str = "Usage: /check BONK";
pub const NO_SAFE_COINS: &str = "❌ No safe coins found right now";
pub const NO_MOONSHOTS: &str = "❌ No moonshots found right now";

pub fn welcome_text() -> String {
    "🚀 <b>Solana Meme Coin Bot</b> 🚀\n\n\
    <b>Free Commands:</b>\n\
    /trending - Top 10 safe meme coins\n\
    /moonshots - High risk high reward\n\
    /check [symbol] - Analyze any coin\n\
    /learn - Meme coin safety tips\n\n\
    <b>Safety First!</b> Always DYOR"
        .to_string()
}

pub fn learn_text() -> String {
    "<b>📚 Meme Coin Safety Tips</b>\n\n\
    1. <b>Check Liquidity</b>\n   \
    - Minimum $50k for safety\n   \
    - Locked liquidity is better\n\n\
    2. <b>Verify Contract</b>\n   \
    - Use Rugcheck.xyz\n   \
    - Check if mint function is disabled\n\n\
    3. <b>Look at Holders</b>\n   \
    - Top 10 holders &lt; 20%\n   \
    - Avoid if one wallet has &gt;10%\n\n\
    4. <b>Check Socials</b>\n   \
    - Active Twitter/Discord\n   \
    - No bots in comments\n\n\
    5. <b>Start Small</b>\n   \
    - Never invest more than you can lose\n   \
    - Take profits early\n\n\
    <b>Free Tools:</b>\n\
    🔍 Rugcheck.xyz\n\
    📊 DexScreener.com\n\
    👥 Solscan.io"
        .to_string()
}

/// `solana` -> `Solana`.
pub fn chain_display_name(chain_id: &str) -> String {
    let mut chars = chain_id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whole-dollar amount with thousands separators, e.g. `1,234,567`.
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = value.round() as i64;
    rounded.to_formatted_string(&Locale::en)
}

fn format_risks(factors: &[RiskFactor]) -> String {
    factors
        .iter()
        .map(|f| format!("{} {}", f.emoji(), f.label()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn link(url: &str, text: &str) -> String {
    format!("<a href=\"{}\">{}</a>", escape(url), escape(text))
}

pub fn format_trending(coins: &[ScoredPair]) -> String {
    let mut response = String::from("<b>📊 Top Safe Meme Coins</b>\n\n");

    for (i, coin) in coins.iter().take(TRENDING_DISPLAY_LIMIT).enumerate() {
        let pair = coin.pair();
        response.push_str(&format!("{}. <b>{}</b>\n", i + 1, escape(&pair.symbol)));
        response.push_str(&format!("💰 ${:.8}\n", pair.price_usd));
        response.push_str(&format!("📊 24h: {:.1}%\n", pair.price_change_24h));
        response.push_str(&format!("💧 Liq: ${}\n", format_usd(pair.liquidity_usd)));
        response.push_str(&format!("🎯 Score: {}/100 - {}\n", coin.score, coin.recommendation));
        response.push_str(&format!(
            "{} | <code>{}</code>\n\n",
            link(&pair.chart_url(), "View"),
            escape(&pair.short_address())
        ));
    }

    response
}

pub fn format_moonshots(coins: &[ScoredPair]) -> String {
    let mut response = String::from("<b>🌙 Moonshot Opportunities (High Risk)</b>\n\n");

    for (i, coin) in coins.iter().take(MOONSHOT_DISPLAY_LIMIT).enumerate() {
        let pair = coin.pair();
        response.push_str(&format!("{}. <b>{}</b>\n", i + 1, escape(&pair.symbol)));
        response.push_str(&format!("💰 ${:.10}\n", pair.price_usd));
        response.push_str(&format!("📊 Vol: ${}\n", format_usd(pair.volume_24h)));
        response.push_str(&format!("⚠️ Risk: {}\n", format_risks(&coin.classified.risk_factors)));
        response.push_str(&format!("{}\n\n", link(&pair.chart_url(), "View")));
    }

    response.push_str("\n<b>⚠️ Warning: These are extremely risky!</b>");
    response
}

pub fn format_analysis(coin: &ScoredPair) -> String {
    let pair = coin.pair();
    let mut response = format!(
        "<b>📈 Analysis: {}</b>\n\n\
        💰 Price: ${:.8}\n\
        📊 24h Volume: ${}\n\
        💧 Liquidity: ${}\n\
        📈 24h Change: {:.1}%\n\
        🔄 DEX: {}\n\
        🐶 Meme coin: {}\n",
        escape(&pair.symbol),
        pair.price_usd,
        format_usd(pair.volume_24h),
        format_usd(pair.liquidity_usd),
        pair.price_change_24h,
        escape(&pair.dex_id),
        if coin.classified.is_meme { "Yes" } else { "No" },
    );

    if let Some(created) = pair.created_at() {
        response.push_str(&format!("🕒 Listed: {}\n", created.format("%Y-%m-%d")));
    }

    response.push_str(&format!(
        "\n<b>AI Score: {}/100</b>\n{}\n📝 {}\n\n🔗 {}",
        coin.score,
        coin.recommendation,
        coin.recommendation.rationale(),
        link(&pair.chart_url(), "View Chart"),
    ));

    if !coin.classified.risk_factors.is_empty() {
        response.push_str(&format!("\n\n⚠️ Risks: {}", coin.classified.risk_summary()));
    }

    response
}

pub fn no_pair_found(chain_id: &str, symbol: &str) -> String {
    format!("❌ No {} pair found for {}", chain_display_name(chain_id), escape(symbol))
}

pub fn error_text(description: &str) -> String {
    format!("❌ Error: {}", escape(description))
}
