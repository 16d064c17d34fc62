use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::AttemptFailure;

pub fn create_client(config: &Config) -> reqwest::Result<Client> {
    ClientBuilder::new()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.request_timeout_seconds))
        .pool_max_idle_per_host(6)
        .build()
}

/// A retrieved page body and its declared content type.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub body: String,
    pub content_type: Option<String>,
}

/// GET a page as text. A non-success status is a failure; there is no retry.
pub async fn fetch_page(client: &Client, url: &str) -> Result<FetchedPage, AttemptFailure> {
    debug!("GET {}", url);

    let response = client
        .get(url)
        .header(ACCEPT, "text/html,application/xhtml+xml,application/json;q=0.9")
        .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
        .header(CACHE_CONTROL, "no-cache")
        .send()
        .await
        .map_err(|e| AttemptFailure::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        warn!("HTTP error {}: {}", status, url);
        return Err(AttemptFailure::Status(status.as_u16()));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let body = response
        .text()
        .await
        .map_err(|e| AttemptFailure::Transport(e.to_string()))?;

    Ok(FetchedPage { body, content_type })
}
