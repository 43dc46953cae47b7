use tracing::{info, warn};
use url::Url;

use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::models::{AppRecord, Store};
use crate::utils::http::{accept_language_header, HttpFetcher, PageFetcher};

mod extract;
mod profile;
mod resolve;

pub use extract::extract_record;
pub use profile::{
    profile_for, supported_stores, Extract, FieldRule, Source, StoreProfile, STORE_PROFILES,
};
pub use resolve::{detect_store, resolve_store};

/// Receives every error the moment an attempt records it.
pub trait Diagnostics: Send + Sync {
    fn report(&self, error: &ScrapeError);
}

impl<F> Diagnostics for F
where
    F: Fn(&ScrapeError) + Send + Sync,
{
    fn report(&self, error: &ScrapeError) {
        self(error)
    }
}

/// Forwards recorded errors to `tracing` at warn level.
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, error: &ScrapeError) {
        warn!("{}", error);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub app_id: String,
    /// Store key such as `"GooglePlay"`; detected from the id when `None`.
    pub store: Option<String>,
    /// Sent verbatim as Accept-Language.
    pub locale: Option<String>,
}

impl ExtractionRequest {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            ..Self::default()
        }
    }

    pub fn store(mut self, store: impl Into<String>) -> Self {
        self.store = Some(store.into());
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}

/// Result of one extraction attempt.
#[derive(Debug, Default)]
pub struct Extraction {
    success: bool,
    store: Option<Store>,
    url: Option<String>,
    record: AppRecord,
    errors: Vec<ScrapeError>,
}

impl Extraction {
    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn store(&self) -> Option<Store> {
        self.store
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn record(&self) -> &AppRecord {
        &self.record
    }

    pub fn into_record(self) -> AppRecord {
        self.record
    }

    pub fn errors(&self) -> &[ScrapeError] {
        &self.errors
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// True when `cached` still matches the freshly extracted record.
    pub fn compare_data(&self, cached: &AppRecord) -> bool {
        self.record.is_same_as(cached)
    }
}

pub struct AppsScraper<F: PageFetcher = HttpFetcher> {
    fetcher: F,
    default_locale: String,
    diagnostics: Option<Box<dyn Diagnostics>>,
}

impl AppsScraper<HttpFetcher> {
    /// Scraper over HTTP. `config.debug` installs [`TracingDiagnostics`].
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        let scraper = Self::with_fetcher(HttpFetcher::new(config)?, config);
        Ok(if config.debug {
            scraper.with_diagnostics(TracingDiagnostics)
        } else {
            scraper
        })
    }
}

impl<F: PageFetcher> AppsScraper<F> {
    pub fn with_fetcher(fetcher: F, config: &ScraperConfig) -> Self {
        Self {
            fetcher,
            default_locale: config.default_locale.clone(),
            diagnostics: None,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn with_diagnostics(mut self, diagnostics: impl Diagnostics + 'static) -> Self {
        self.diagnostics = Some(Box::new(diagnostics));
        self
    }

    /// Run one extraction: resolve the store, validate the request, fetch
    /// the listing once and read its fields.
    ///
    /// Validation problems are all recorded before giving up, and none of
    /// them lets a request go out. A fetch failure ends the attempt. Field
    /// problems are recorded but still count as success.
    pub async fn extract(&self, request: &ExtractionRequest) -> Extraction {
        let mut attempt = Extraction::default();
        let app_id = request.app_id.as_str();
        let locale = request
            .locale
            .as_deref()
            .unwrap_or(self.default_locale.as_str());

        let profile = match resolve::resolve_store(app_id, request.store.as_deref()) {
            Ok(profile) => Some(profile),
            Err(e) => {
                self.record(&mut attempt, e);
                None
            }
        };
        if let Err(e) = accept_language_header(locale) {
            self.record(&mut attempt, e);
        }

        let profile = match profile {
            Some(profile) if attempt.errors.is_empty() => profile,
            _ => return attempt,
        };
        attempt.store = Some(profile.store);

        let url = profile.listing_url(app_id);
        if let Err(e) = Url::parse(&url) {
            self.record(
                &mut attempt,
                ScrapeError::InvalidUrl {
                    url,
                    reason: e.to_string(),
                },
            );
            return attempt;
        }
        attempt.url = Some(url.clone());

        info!("Scraping {} listing for {}", profile.store, app_id);
        let body = match self.fetcher.fetch(&url, locale).await {
            Ok(body) => body,
            Err(e) => {
                self.record(&mut attempt, e);
                return attempt;
            }
        };

        let (record, field_errors) = extract::extract_record(&body, profile);
        for e in field_errors {
            self.record(&mut attempt, e);
        }
        attempt.record = record;
        attempt.success = true;

        info!(
            "Extracted {} listing for {} (fingerprint {})",
            profile.store,
            app_id,
            attempt.record.fingerprint()
        );
        attempt
    }

    fn record(&self, attempt: &mut Extraction, error: ScrapeError) {
        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.report(&error);
        }
        attempt.errors.push(error);
    }
}
