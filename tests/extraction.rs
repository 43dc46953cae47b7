//! End-to-end extraction tests against canned listing pages.
//!
//! A `CannedFetcher` stands in for the network: it serves fixture bodies by
//! URL and records every request, so tests can assert that validation
//! failures never reach the fetcher.

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::sync::Mutex;

use apps_scraper::{
    AppRecord, AppsScraper, ExtractionRequest, PageFetcher, ScrapeError, ScraperConfig, Store,
};

const GOOGLE_PLAY_PAGE: &str = include_str!("fixtures/google_play.html");
const APP_STORE_PAGE: &str = include_str!("fixtures/app_store.html");
const APP_STORE_FREE_PAGE: &str = include_str!("fixtures/app_store_free.html");

enum Canned {
    Body(&'static str),
    Status(u16),
}

#[derive(Default)]
struct CannedFetcher {
    pages: HashMap<String, Canned>,
    requests: Mutex<Vec<(String, String)>>,
}

impl CannedFetcher {
    fn with_page(mut self, url: &str, page: Canned) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }

    fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for CannedFetcher {
    async fn fetch(&self, url: &str, accept_language: &str) -> Result<String, ScrapeError> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), accept_language.to_string()));

        match self.pages.get(url) {
            Some(Canned::Body(body)) => Ok(body.to_string()),
            Some(Canned::Status(code)) => Err(ScrapeError::HttpStatus {
                code: *code,
                url: url.to_string(),
            }),
            None => Err(ScrapeError::Transport {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            }),
        }
    }
}

const NOTES_URL: &str = "https://play.google.com/store/apps/details?id=com.example.notes";
const MAPS_URL: &str = "https://apps.apple.com/app/id1234567890";
const TIMER_URL: &str = "https://apps.apple.com/app/id555";

fn scraper(fetcher: CannedFetcher) -> AppsScraper<CannedFetcher> {
    AppsScraper::with_fetcher(fetcher, &ScraperConfig::default())
}

#[tokio::test]
async fn google_play_fixture_yields_expected_record() {
    let scraper = scraper(CannedFetcher::default().with_page(NOTES_URL, Canned::Body(GOOGLE_PLAY_PAGE)));

    let attempt = scraper.extract(&ExtractionRequest::new("com.example.notes")).await;

    assert!(attempt.is_success(), "errors: {:?}", attempt.errors());
    assert!(attempt.errors().is_empty());
    assert_eq!(attempt.store(), Some(Store::GooglePlay));
    assert_eq!(attempt.url(), Some(NOTES_URL));
    assert_eq!(
        attempt.record(),
        &AppRecord {
            image: Some("https://play-lh.googleusercontent.com/icon-512.png".to_string()),
            name: Some("Example Notes".to_string()),
            rating: Some(4.6),
            price: Some(2.99),
            description: Some("Take notes &amp; sync them everywhere.".to_string()),
            operating_system: Some("ANDROID".to_string()),
            author: Some("Example Labs".to_string()),
        }
    );
}

#[tokio::test]
async fn app_store_fixture_reads_nested_offer_price() {
    let scraper = scraper(CannedFetcher::default().with_page(MAPS_URL, Canned::Body(APP_STORE_PAGE)));

    let attempt = scraper.extract(&ExtractionRequest::new("1234567890")).await;

    assert!(attempt.is_success());
    assert_eq!(attempt.store(), Some(Store::AppStore));
    assert_eq!(
        attempt.record(),
        &AppRecord {
            image: Some("https://is1-ssl.mzstatic.com/image/thumb/246x0w.png".to_string()),
            name: Some("Example Maps".to_string()),
            rating: Some(4.8),
            price: Some(4.99),
            description: Some("Offline maps\nfor hikers.".to_string()),
            operating_system: Some("Requires iOS 15.0 or later.".to_string()),
            author: Some("Example Maps GmbH".to_string()),
        }
    );
}

#[tokio::test]
async fn free_app_store_listing_has_zero_price() {
    let scraper = scraper(CannedFetcher::default().with_page(TIMER_URL, Canned::Body(APP_STORE_FREE_PAGE)));

    let attempt = scraper.extract(&ExtractionRequest::new("555")).await;

    assert!(attempt.is_success());
    assert_eq!(attempt.record().price, Some(0.0));
    assert_eq!(attempt.record().rating, None);
    assert_eq!(attempt.record().name.as_deref(), Some("Example Timer"));
}

#[tokio::test]
async fn page_without_schema_yields_empty_record() {
    let blank = "<html><head><title>Nothing here</title></head><body></body></html>";
    let scraper = scraper(
        CannedFetcher::default()
            .with_page(NOTES_URL, Canned::Body(blank))
            .with_page(TIMER_URL, Canned::Body(blank)),
    );

    let play = scraper.extract(&ExtractionRequest::new("com.example.notes")).await;
    assert!(play.is_success());
    assert_eq!(play.record(), &AppRecord::default());
    assert!(matches!(play.errors(), [ScrapeError::MalformedSchema { store: Store::GooglePlay, .. }]));

    // Only the App Store normalizes a missing price.
    let apple = scraper.extract(&ExtractionRequest::new("555")).await;
    assert!(apple.is_success());
    assert_eq!(
        apple.record(),
        &AppRecord {
            price: Some(0.0),
            ..AppRecord::default()
        }
    );
}

#[tokio::test]
async fn not_found_fails_with_status_and_empty_record() {
    let scraper = scraper(CannedFetcher::default().with_page(NOTES_URL, Canned::Status(404)));

    let attempt = scraper.extract(&ExtractionRequest::new("com.example.notes")).await;

    assert!(!attempt.is_success());
    assert!(attempt.record().is_empty());
    assert!(matches!(attempt.errors(), [ScrapeError::HttpStatus { code: 404, .. }]));
    assert_eq!(attempt.error_messages(), vec!["HTTP Error: 404 Not Found".to_string()]);
}

#[tokio::test]
async fn transport_failure_ends_attempt() {
    let scraper = scraper(CannedFetcher::default());

    let attempt = scraper.extract(&ExtractionRequest::new("com.example.unknown")).await;

    assert!(!attempt.is_success());
    assert!(matches!(attempt.errors(), [ScrapeError::Transport { .. }]));
    assert_eq!(scraper_requests(&scraper).len(), 1);
}

#[tokio::test]
async fn unrecognized_identifier_makes_no_request() {
    let scraper = scraper(CannedFetcher::default());

    let attempt = scraper.extract(&ExtractionRequest::new("not/an/app")).await;

    assert!(!attempt.is_success());
    assert!(matches!(attempt.errors(), [ScrapeError::UnrecognizedIdentifier { .. }]));
    assert!(scraper_requests(&scraper).is_empty());
}

#[tokio::test]
async fn unsupported_store_makes_no_request() {
    let scraper = scraper(CannedFetcher::default());

    let attempt = scraper
        .extract(&ExtractionRequest::new("com.example.notes").store("Steam"))
        .await;

    assert!(!attempt.is_success());
    assert_eq!(attempt.error_messages(), vec!["Steam Is Not Supported".to_string()]);
    assert_eq!(attempt.store(), None);
    assert!(scraper_requests(&scraper).is_empty());
}

#[tokio::test]
async fn explicit_store_mismatch_makes_no_request() {
    let scraper = scraper(CannedFetcher::default());

    let attempt = scraper
        .extract(&ExtractionRequest::new("1234567890").store("GooglePlay"))
        .await;

    assert!(matches!(
        attempt.errors(),
        [ScrapeError::IdentifierStoreMismatch { store: Store::GooglePlay, .. }]
    ));
    assert!(scraper_requests(&scraper).is_empty());
}

#[tokio::test]
async fn locale_is_passed_as_accept_language() {
    let scraper = scraper(CannedFetcher::default().with_page(MAPS_URL, Canned::Body(APP_STORE_PAGE)));

    scraper
        .extract(&ExtractionRequest::new("1234567890").store("AppStore").locale("de-DE"))
        .await;
    scraper.extract(&ExtractionRequest::new("1234567890")).await;

    assert_eq!(
        scraper_requests(&scraper),
        vec![
            (MAPS_URL.to_string(), "de-DE".to_string()),
            (MAPS_URL.to_string(), "*".to_string()),
        ]
    );
}

#[tokio::test]
async fn compare_data_detects_stale_cache() {
    let scraper = scraper(CannedFetcher::default().with_page(MAPS_URL, Canned::Body(APP_STORE_PAGE)));
    let attempt = scraper.extract(&ExtractionRequest::new("1234567890")).await;

    let cached = attempt.record().clone();
    assert!(attempt.compare_data(&cached));

    let mut stale = cached.clone();
    stale.price = Some(3.99);
    assert!(!attempt.compare_data(&stale));
    assert_ne!(cached.fingerprint(), stale.fingerprint());
}

fn scraper_requests(scraper: &AppsScraper<CannedFetcher>) -> Vec<(String, String)> {
    scraper.fetcher().requests()
}
