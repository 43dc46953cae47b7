use anyhow::{anyhow, Context, Result};
use scraper::{Html, Selector};

use apps_scraper::parsers::find_embedded_schema;
use apps_scraper::scrapers::resolve_store;
use apps_scraper::utils::http::PageFetcher;
use apps_scraper::{HttpFetcher, ScraperConfig};

/// Fetch one listing and report how many elements each configured selector
/// matches. Run it when a store changes its page layout.
#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let app_id = args
        .next()
        .ok_or_else(|| anyhow!("usage: probe_selectors <app-id> [store]"))?;
    let store = args.next();

    let profile = resolve_store(&app_id, store.as_deref())?;
    let config = ScraperConfig::load(None)?;
    let fetcher = HttpFetcher::new(&config)?;

    let url = profile.listing_url(&app_id);
    println!("Fetching {} listing {}...", profile.store, url);
    let html = fetcher
        .fetch(&url, &config.default_locale)
        .await
        .with_context(|| format!("Failed to fetch {}", url))?;

    let document = Html::parse_document(&html);
    for selector_str in profile.selectors() {
        match Selector::parse(selector_str) {
            Ok(selector) => {
                let count = document.select(&selector).count();
                println!("Selector '{}' matched {} elements", selector_str, count);
            }
            Err(_) => println!("Selector '{}' does not parse", selector_str),
        }
    }

    if let Ok(selector) = Selector::parse(profile.schema_selector) {
        let scan = find_embedded_schema(&document, &selector);
        match scan.schema {
            Some(schema) => println!(
                "Embedded schema found, @type {}",
                schema.get("@type").cloned().unwrap_or_default()
            ),
            None => println!("No usable embedded schema ({} blocks)", scan.blocks),
        }
    }

    Ok(())
}
