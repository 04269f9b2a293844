use crate::bot::MemeScanner;
use crate::error::{Error, Result};
use crate::metrics;
use crate::validation::parse_symbol_arg;
use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId, ParseMode, Update, UpdateKind};
use teloxide::utils::command::BotCommands;
use teloxide::utils::html::escape;
use teloxide::dispatching::repls::CommandReplExt;
use std::sync::Arc;
use log::{debug, error, info};
use url::Url;

pub mod format;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "Show the welcome message")]
    Start,
    #[command(description = "Top safe meme coins by volume")]
    Trending,
    #[command(description = "High risk, high reward meme coins")]
    Moonshots,
    #[command(description = "Analyze a coin, e.g. /check BONK")]
    Check(String),
    #[command(description = "Meme coin safety tips")]
    Learn,
    #[command(description = "Display this help message")]
    Help,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Trending => "trending",
            Command::Moonshots => "moonshots",
            Command::Check(_) => "check",
            Command::Learn => "learn",
            Command::Help => "help",
        }
    }
}

/// Chat front end: turns commands into scanner calls and formatted replies.
pub struct TelegramBot {
    bot: Bot,
    scanner: Arc<MemeScanner>,
    bot_username: String,
}

impl TelegramBot {
    pub fn new(bot: Bot, scanner: Arc<MemeScanner>, bot_username: String) -> Self {
        Self { bot, scanner, bot_username }
    }

    /// Resolves the bot's username so `/cmd@botname` forms parse.
    pub async fn connect(bot: Bot, scanner: Arc<MemeScanner>) -> Result<Self> {
        let me = bot.get_me().await?;
        info!("Telegram bot initialized: @{}", me.username());
        let username = me.username().to_string();
        Ok(Self::new(bot, scanner, username))
    }

    /// Long-polling mode, used when no public webhook endpoint is available.
    pub async fn start_polling(self: Arc<Self>) -> Result<()> {
        let bot = self.bot.clone();
        let handler_instance = self.clone();
        Command::repl(bot, move |_bot: Bot, msg: Message, cmd: Command| {
            let handler_instance = handler_instance.clone();
            async move {
                if let Err(e) = handler_instance.handle_command(&msg, cmd).await {
                    error!("Error handling command: {}", e);
                }
                respond(())
            }
        })
        .await;
        Ok(())
    }

    /// Entry point for updates pushed to the webhook. Anything that is not a
    /// text command is ignored.
    pub async fn dispatch_update(&self, update: Update) -> Result<()> {
        let UpdateKind::Message(msg) = update.kind else {
            debug!("Ignoring non-message update {:?}", update.id);
            return Ok(());
        };
        let Some(text) = msg.text() else {
            return Ok(());
        };
        match Command::parse(text, &self.bot_username) {
            Ok(cmd) => self.handle_command(&msg, cmd).await,
            Err(e) => {
                debug!("Ignoring message that is not a command: {}", e);
                Ok(())
            }
        }
    }

    /// Runs one command. Failures are reported to the chat instead of being
    /// propagated; only a failure to deliver that report is returned.
    pub async fn handle_command(&self, msg: &Message, command: Command) -> Result<()> {
        metrics::COMMANDS_HANDLED.with_label_values(&[command.name()]).inc();
        debug!("Chat {} issued /{}", msg.chat.id.0, command.name());

        if let Err(e) = self.run_command(msg, command).await {
            error!("Command failed in chat {}: {}", msg.chat.id.0, e);
            self.bot
                .send_message(msg.chat.id, failure_reply(&e))
                .parse_mode(ParseMode::Html)
                .reply_to_message_id(msg.id)
                .await?;
        }
        Ok(())
    }

    async fn run_command(&self, msg: &Message, command: Command) -> Result<()> {
        match self.pending_text(&command)? {
            Some(pending) => {
                let pending = self.reply_plain(msg, &pending).await?;
                let text = self.reply_for(command).await?;
                self.edit_html(msg.chat.id, pending, text).await
            }
            None => {
                let text = self.reply_for(command).await?;
                self.reply_html(msg, text).await
            }
        }
    }

    /// Placeholder sent while a command waits on market data. `None` for
    /// commands answered straight away.
    pub fn pending_text(&self, command: &Command) -> Result<Option<String>> {
        let chain = format::chain_display_name(self.scanner.chain_id());
        let text = match command {
            Command::Trending => format!("🔍 Scanning {} for safe meme coins...", chain),
            Command::Moonshots => "🔍 Finding high risk opportunities...".to_string(),
            Command::Check(args) => match parse_symbol_arg(args)? {
                Some(symbol) => format!("🔍 Analyzing {}...", symbol),
                None => return Ok(None),
            },
            Command::Start | Command::Learn | Command::Help => return Ok(None),
        };
        Ok(Some(text))
    }

    /// Final HTML reply for `command`.
    pub async fn reply_for(&self, command: Command) -> Result<String> {
        let text = match command {
            Command::Start => format::welcome_text(),
            Command::Help => escape(&Command::descriptions().to_string()),
            Command::Learn => format::learn_text(),
            Command::Trending => {
                let scan = self.scanner.scan_trending().await;
                if scan.safe.is_empty() {
                    format::NO_SAFE_COINS.to_string()
                } else {
                    format::format_trending(&scan.safe)
                }
            }
            Command::Moonshots => {
                let scan = self.scanner.scan_trending().await;
                if scan.risky.is_empty() {
                    format::NO_MOONSHOTS.to_string()
                } else {
                    format::format_moonshots(&scan.risky)
                }
            }
            Command::Check(args) => {
                let Some(symbol) = parse_symbol_arg(&args)? else {
                    return Ok(format::USAGE_CHECK.to_string());
                };
                match self.scanner.check_symbol(&symbol).await {
                    Some(scored) => format::format_analysis(&scored),
                    None => format::no_pair_found(self.scanner.chain_id(), &symbol),
                }
            }
        };
        Ok(text)
    }

    async fn reply_plain(&self, msg: &Message, text: &str) -> Result<MessageId> {
        let sent = self
            .bot
            .send_message(msg.chat.id, text)
            .reply_to_message_id(msg.id)
            .await?;
        Ok(sent.id)
    }

    async fn reply_html(&self, msg: &Message, text: String) -> Result<()> {
        self.bot
            .send_message(msg.chat.id, text)
            .parse_mode(ParseMode::Html)
            .reply_to_message_id(msg.id)
            .await?;
        Ok(())
    }

    async fn edit_html(&self, chat_id: ChatId, message_id: MessageId, text: String) -> Result<()> {
        self.bot
            .edit_message_text(chat_id, message_id, text)
            .parse_mode(ParseMode::Html)
            .disable_web_page_preview(true)
            .await?;
        Ok(())
    }

    /// Replaces any existing webhook with `url`.
    pub async fn register_webhook(&self, url: Url) -> Result<()> {
        self.bot.delete_webhook().await?;
        self.bot.set_webhook(url.clone()).await?;
        info!("Webhook set to {}", url);
        Ok(())
    }
}

/// Chat text for a command that failed.
pub fn failure_reply(err: &Error) -> String {
    format::error_text(&err.to_string())
}
