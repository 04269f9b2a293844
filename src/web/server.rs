use crate::error::{Error, Result};
use crate::metrics;
use crate::telegram::TelegramBot;
use warp::hyper::body::Bytes;
use log::{error, info, warn};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use teloxide::types::Update;
use url::Url;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

const MAX_UPDATE_BYTES: u64 = 1024 * 1024;

pub struct WebServer {
    telegram: Arc<TelegramBot>,
    public_url: Option<String>,
}

impl WebServer {
    pub fn new(telegram: Arc<TelegramBot>, public_url: Option<String>) -> Self {
        Self { telegram, public_url }
    }

    pub async fn start(&self, host: &str, port: u16) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .map_err(|e| Error::ConfigError(format!("Invalid listen address {}:{}: {}", host, port, e)))?;
        info!("Starting web server on {}", addr);

        warp::serve(routes(self.telegram.clone(), self.public_url.clone()))
            .run(addr)
            .await;
        Ok(())
    }
}

#[derive(Clone)]
struct AppState {
    telegram: Arc<TelegramBot>,
    public_url: Option<String>,
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// `GET /`, `POST /webhook`, `GET /set_webhook` and `GET /metrics`.
pub fn routes(
    telegram: Arc<TelegramBot>,
    public_url: Option<String>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let state = AppState { telegram, public_url };

    let health = warp::path::end()
        .and(warp::get())
        .map(|| "Bot is running!");

    let webhook = warp::path("webhook")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_UPDATE_BYTES))
        .and(warp::body::bytes())
        .and(with_state(state.clone()))
        .and_then(handle_webhook);

    let set_webhook = warp::path("set_webhook")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::header::optional::<String>("host"))
        .and(warp::header::optional::<String>("x-forwarded-proto"))
        .and(with_state(state))
        .and_then(handle_set_webhook);

    let metrics = warp::path("metrics")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(handle_metrics);

    health.or(webhook).or(set_webhook).or(metrics)
}

async fn handle_webhook(body: Bytes, state: AppState) -> std::result::Result<impl Reply, Infallible> {
    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            warn!("Rejecting malformed webhook payload: {}", e);
            return Ok(warp::reply::with_status("Bad Request".to_string(), StatusCode::BAD_REQUEST));
        }
    };

    if let Err(e) = state.telegram.dispatch_update(update).await {
        error!("Failed to process update: {}", e);
    }
    Ok(warp::reply::with_status("OK".to_string(), StatusCode::OK))
}

async fn handle_set_webhook(
    host: Option<String>,
    forwarded_proto: Option<String>,
    state: AppState,
) -> std::result::Result<impl Reply, Infallible> {
    let url = match webhook_url(state.public_url.as_deref(), host.as_deref(), forwarded_proto.as_deref()) {
        Ok(url) => url,
        Err(e) => {
            warn!("Cannot derive webhook URL: {}", e);
            return Ok(warp::reply::with_status(e.to_string(), StatusCode::BAD_REQUEST));
        }
    };

    match state.telegram.register_webhook(url.clone()).await {
        Ok(()) => Ok(warp::reply::with_status(format!("Webhook set to {}", url), StatusCode::OK)),
        Err(e) => {
            error!("Failed to set webhook: {}", e);
            Ok(warp::reply::with_status(
                format!("Failed to set webhook: {}", e),
                StatusCode::BAD_GATEWAY,
            ))
        }
    }
}

async fn handle_metrics() -> std::result::Result<impl Reply, Infallible> {
    match metrics::render() {
        Ok(body) => Ok(warp::reply::with_status(body, StatusCode::OK)),
        Err(e) => {
            error!("Failed to render metrics: {}", e);
            Ok(warp::reply::with_status(
                "Failed to render metrics".to_string(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

/// Webhook target: `<public_url>/webhook`, or the request origin when no
/// public URL is configured.
pub fn webhook_url(public_url: Option<&str>, host: Option<&str>, forwarded_proto: Option<&str>) -> Result<Url> {
    let root = match (public_url, host) {
        (Some(public), _) => public.trim_end_matches('/').to_string(),
        (None, Some(host)) => format!("{}://{}", forwarded_proto.unwrap_or("https"), host),
        (None, None) => {
            return Err(Error::ConfigError(
                "No public_url configured and request has no Host header".to_string(),
            ))
        }
    };
    Url::parse(&format!("{}/webhook", root))
        .map_err(|e| Error::ConfigError(format!("Invalid webhook URL {:?}: {}", root, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockMarketDataSource;
    use crate::bot::MemeScanner;
    use crate::tests::common::create_test_config;
    use teloxide::Bot;

    fn test_routes() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
        let config = create_test_config();
        // No expectations: any upstream call would fail the test.
        let scanner = Arc::new(MemeScanner::new(Arc::new(MockMarketDataSource::new()), &config));
        let telegram = Arc::new(TelegramBot::new(
            Bot::new(config.telegram.bot_token.clone()),
            scanner,
            "memebot".to_string(),
        ));
        routes(telegram, config.telegram.public_url)
    }

    #[tokio::test]
    async fn test_health_check() {
        let res = warp::test::request().method("GET").path("/").reply(&test_routes()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.body(), "Bot is running!");
    }

    #[tokio::test]
    async fn test_webhook_rejects_malformed_payload() {
        let res = warp::test::request()
            .method("POST")
            .path("/webhook")
            .body("not json")
            .reply(&test_routes())
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_webhook_ignores_non_message_updates() {
        let res = warp::test::request()
            .method("POST")
            .path("/webhook")
            .json(&serde_json::json!({ "update_id": 42, "unsupported_kind": { "id": 1 } }))
            .reply(&test_routes())
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.body(), "OK");
    }

    #[tokio::test]
    async fn test_webhook_requires_post() {
        let res = warp::test::request().method("GET").path("/webhook").reply(&test_routes()).await;
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let res = warp::test::request().method("GET").path("/metrics").reply(&test_routes()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[test]
    fn test_webhook_url_prefers_public_url() {
        let url = webhook_url(Some("https://bot.example.com/"), Some("internal:5000"), None).unwrap();
        assert_eq!(url.as_str(), "https://bot.example.com/webhook");
    }

    #[test]
    fn test_webhook_url_from_host_header() {
        let url = webhook_url(None, Some("bot.example.com"), None).unwrap();
        assert_eq!(url.as_str(), "https://bot.example.com/webhook");
        let url = webhook_url(None, Some("localhost:5000"), Some("http")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/webhook");
        assert!(webhook_url(None, None, None).is_err());
    }
}
