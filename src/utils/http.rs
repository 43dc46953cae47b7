use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, REFERER};
use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ScraperConfig;
use crate::error::ScrapeError;

/// Fetches the raw body of a listing page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str, accept_language: &str) -> Result<String, ScrapeError>;
}

/// `reqwest`-backed fetcher with the fixed browser-like header set.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            client: create_client(config)?,
        })
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, ScrapeError> {
    HeaderValue::from_str(value).map_err(|_| ScrapeError::InvalidHeader {
        name,
        value: value.to_string(),
    })
}

pub fn create_client(config: &ScraperConfig) -> Result<Client, ScrapeError> {
    let user_agent = header_value("User-Agent", &config.user_agent)?;
    let mut headers = HeaderMap::new();
    headers.insert(REFERER, header_value("Referer", &config.referer)?);

    let mut builder = ClientBuilder::new()
        .user_agent(user_agent)
        .default_headers(headers)
        .redirect(Policy::limited(config.max_redirects));

    if let Some(secs) = config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build().map_err(|e| ScrapeError::MissingDependency {
        capability: "HTTP client",
        reason: e.to_string(),
    })
}

/// Validate an Accept-Language value before any request goes out.
pub fn accept_language_header(locale: &str) -> Result<HeaderValue, ScrapeError> {
    header_value("Accept-Language", locale)
}

fn transport_reason(e: &reqwest::Error) -> String {
    if e.is_redirect() {
        format!("redirect limit exceeded: {}", e)
    } else if e.is_timeout() {
        format!("timed out: {}", e)
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        e.to_string()
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, accept_language: &str) -> Result<String, ScrapeError> {
        let transport = |e: reqwest::Error| {
            warn!("Request failed for {}: {}", url, e);
            ScrapeError::Transport {
                url: url.to_string(),
                reason: transport_reason(&e),
            }
        };

        let response = self
            .client
            .get(url)
            .header(ACCEPT_LANGUAGE, accept_language_header(accept_language)?)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("HTTP error {}: {}", status, url);
            return Err(ScrapeError::HttpStatus {
                code: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(transport)?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
