use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long)] // default handled in main.rs
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Port for the webhook server (overrides config and PORT)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Use long polling instead of serving the webhook
    #[arg(long)]
    pub polling: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["meme-coin-bot", "--config", "bot.toml", "--port", "8080", "--polling"]);
        assert_eq!(cli.config, Some(PathBuf::from("bot.toml")));
        assert_eq!(cli.port, Some(8080));
        assert!(cli.polling);
        assert!(!cli.debug);
    }
}
