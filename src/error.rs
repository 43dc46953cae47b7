use thiserror::Error;

use crate::models::Store;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("{store} Is Not Supported")]
    UnsupportedStore { store: String },

    #[error("{app_id} Is Not valid AppId")]
    UnrecognizedIdentifier { app_id: String },

    #[error("{app_id} Is Wrong AppId For {store}")]
    IdentifierStoreMismatch { app_id: String, store: Store },

    #[error("invalid {name} header value \"{value}\"")]
    InvalidHeader { name: &'static str, value: String },

    #[error("invalid listing URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Transport Error for {url}: {reason}")]
    Transport { url: String, reason: String },

    #[error("{}", status_message(*code))]
    HttpStatus { code: u16, url: String },

    #[error("{capability} is unavailable: {reason}")]
    MissingDependency {
        capability: &'static str,
        reason: String,
    },

    #[error("malformed embedded schema on {store} page: {reason}")]
    MalformedSchema { store: Store, reason: String },

    #[error("invalid selector \"{selector}\"")]
    InvalidSelector { selector: String },
}

impl ScrapeError {
    /// Fetch failures end an attempt. Everything raised while reading
    /// fields out of a fetched page only leaves that field empty.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ScrapeError::MalformedSchema { .. } | ScrapeError::InvalidSelector { .. }
        )
    }
}

pub fn status_message(code: u16) -> String {
    match code {
        400 => "HTTP Error: 400 Bad Request".to_string(),
        404 => "HTTP Error: 404 Not Found".to_string(),
        500 => "HTTP Error: 500 Internal Server Error".to_string(),
        503 => "HTTP Error: 503 Service Unavailable".to_string(),
        other => format!("HTTP Error Code : {}", other),
    }
}
