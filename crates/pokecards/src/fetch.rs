use crate::prelude::Error;
use pokecards_core::query::CardQuery;
use pokecards_core::throttle::{on_throttle, ResponseClass, ThrottleDecision};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, USER_AGENT};
use std::future::Future;
use std::time::{Duration, Instant};

/// Pokémon TCG API v2
pub const DEFAULT_API_BASE: &str = "https://api.pokemontcg.io/v2";

pub const CLIENT_USER_AGENT: &str = concat!("pokecards/", env!("CARGO_PKG_VERSION"));

const API_KEY_HEADER: &str = "x-api-key";

/// Connection settings for the card API
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            api_key: None,
        }
    }
}

/// Suspension used between throttled attempts
pub trait Pause {
    fn pause(&self, delay: Duration) -> impl Future<Output = ()> + Send;
}

/// Yields to the runtime for the whole delay
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPause;

impl Pause for TokioPause {
    fn pause(&self, delay: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(delay)
    }
}

/// Build the `/cards` search URL for the given query
pub fn build_url(base_url: &str, query: &CardQuery) -> Result<reqwest::Url, Error> {
    let endpoint = format!("{}/cards", base_url.trim_end_matches('/'));

    reqwest::Url::parse_with_params(&endpoint, query.query_pairs())
        .map_err(|e| Error::InvalidUrl(format!("{endpoint}: {e}")))
}

/// Create an HTTP client carrying the identifying headers on every request
fn create_client(config: &FetchConfig) -> Result<reqwest::Client, Error> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    if let Some(api_key) = &config.api_key {
        let mut value = HeaderValue::from_str(api_key)
            .map_err(|e| Error::Transport(format!("Invalid API key header value: {e}")))?;
        value.set_sensitive(true);
        headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
    }

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| Error::Transport(format!("Failed to build HTTP client: {e}")))
}

/// Fetch the raw JSON body of the first page of cards matching `query`
pub async fn fetch_cards(config: &FetchConfig, query: &CardQuery) -> Result<String, Error> {
    fetch_cards_with(config, query, &TokioPause).await
}

/// Same as [`fetch_cards`], sleeping between throttled attempts through `pause`
///
/// A 429 is retried after `attempt * 10s` until the sixth attempt, which fails
/// with [`Error::ThrottleExhausted`]. Any other non-2xx status fails at once.
/// The client lives only for the duration of this call.
pub async fn fetch_cards_with<P: Pause>(
    config: &FetchConfig,
    query: &CardQuery,
    pause: &P,
) -> Result<String, Error> {
    let url = build_url(&config.base_url, query)?;
    let client = create_client(config)?;

    let started = Instant::now();
    let mut attempt: u32 = 1;

    let outcome = loop {
        log::debug!("GET {url} (attempt {attempt})");

        let response = match client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => break Err(Error::Transport(e.to_string())),
        };

        let status = response.status();
        match ResponseClass::from_status(status.as_u16()) {
            ResponseClass::Success => break Ok(response),
            ResponseClass::Throttled => match on_throttle(attempt) {
                ThrottleDecision::Retry(delay) => {
                    log::warn!(
                        "Throttled on attempt {attempt}, retrying in {}s",
                        delay.as_secs()
                    );
                    pause.pause(delay).await;
                    attempt += 1;
                }
                ThrottleDecision::Exhausted => {
                    break Err(Error::ThrottleExhausted { attempts: attempt })
                }
            },
            ResponseClass::Failed => {
                break Err(Error::RequestFailed {
                    status: status.as_u16(),
                    reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                })
            }
        }
    };

    log::info!(
        "Card request finished in {:.2?} after {attempt} attempt(s)",
        started.elapsed()
    );

    let response = outcome.inspect_err(|e| log::error!("{e}"))?;
    let body = response
        .text()
        .await
        .map_err(|e| Error::Transport(format!("Failed to read response body: {e}")))?;

    if body.trim().is_empty() {
        log::error!("Card API returned a success status with no body");
        return Err(Error::EmptyPayload);
    }

    Ok(body)
}
