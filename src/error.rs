use std::result::Result as StdResult;
use thiserror::Error;
use teloxide::RequestError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Telegram error: {0}")]
    TelegramError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl From<RequestError> for Error {
    fn from(err: RequestError) -> Self {
        Error::TelegramError(err.to_string())
    }
}

pub type Result<T> = StdResult<T, Error>;

