//! Listing data extraction for mobile apps on Google Play and the Apple App
//! Store.
//!
//! ```no_run
//! use apps_scraper::{AppsScraper, ExtractionRequest, ScraperConfig};
//!
//! # async fn run() -> Result<(), apps_scraper::ScrapeError> {
//! let scraper = AppsScraper::new(&ScraperConfig::default())?;
//! let attempt = scraper.extract(&ExtractionRequest::new("com.example.app")).await;
//! if attempt.is_success() {
//!     println!("{:?}", attempt.record().name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod parsers;
pub mod scrapers;
pub mod utils;

pub use config::ScraperConfig;
pub use error::ScrapeError;
pub use models::{AppField, AppRecord, RecordFingerprint, Store};
pub use scrapers::{
    supported_stores, AppsScraper, Diagnostics, Extraction, ExtractionRequest, TracingDiagnostics,
};
pub use utils::http::{HttpFetcher, PageFetcher};
