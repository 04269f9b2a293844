use anyhow::Result;
use clap::Parser;
use log::{info, LevelFilter};
use std::sync::Arc;
use teloxide::Bot;

use meme_coin_bot::api::DexScreenerClient;
use meme_coin_bot::bot::MemeScanner;
use meme_coin_bot::cli::Cli;
use meme_coin_bot::config::Config;
use meme_coin_bot::logging;
use meme_coin_bot::metrics;
use meme_coin_bot::telegram::TelegramBot;
use meme_coin_bot::web::WebServer;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(|| "config/config.toml".into());
    let mut config = match Config::load_or_default(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration from {:?}: {}", config_path, e);
            return Err(anyhow::anyhow!("Configuration loading failed: {}", e));
        }
    };
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let level = if cli.debug {
        LevelFilter::Debug
    } else {
        logging::parse_level(&config.logging.level)
    };
    match &config.logging.file {
        Some(file) => logging::init(file, level)?,
        None => logging::init_stderr(level),
    }

    config.validate()?;
    info!("Configuration loaded successfully.");

    metrics::init()?;

    let source = Arc::new(DexScreenerClient::new(&config.dexscreener)?);
    let scanner = Arc::new(MemeScanner::new(source, &config));
    info!(
        "Scanner ready for chain {} (query {:?}, first {} pairs)",
        config.dexscreener.chain_id, config.dexscreener.search_query, config.dexscreener.scan_limit
    );

    let bot = Bot::new(config.telegram.bot_token.clone());
    let telegram = Arc::new(TelegramBot::connect(bot, scanner).await?);

    if cli.polling {
        info!("Starting long polling...");
        telegram.start_polling().await?;
    } else {
        let server = WebServer::new(telegram, config.telegram.public_url.clone());
        server.start(&config.server.host, config.server.port).await?;
    }

    Ok(())
}
