use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36";
pub const DEFAULT_REFERER: &str = "http://www.google.com";
pub const DEFAULT_LOCALE: &str = "*";
pub const DEFAULT_MAX_REDIRECTS: usize = 20;
const DEFAULT_CONFIG_FILE: &str = "apps_scraper";
const ENV_PREFIX: &str = "APPS_SCRAPER";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScraperConfig {
    pub user_agent: String,
    pub referer: String,
    /// Accept-Language sent when a request carries no locale.
    pub default_locale: String,
    pub max_redirects: usize,
    /// `None` leaves the transport default in place.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
    pub debug: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            default_locale: DEFAULT_LOCALE.to_string(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            timeout_seconds: None,
            debug: false,
        }
    }
}

impl ScraperConfig {
    /// Layers built-in defaults, an optional config file and `APPS_SCRAPER_*`
    /// environment variables, later sources winning.
    ///
    /// Without an explicit path, `apps_scraper.{toml,json,yaml,...}` in the
    /// working directory is used when present.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let file = match path {
            Some(path) => config::File::with_name(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = config::Config::builder()
            .set_default("user_agent", DEFAULT_USER_AGENT)?
            .set_default("referer", DEFAULT_REFERER)?
            .set_default("default_locale", DEFAULT_LOCALE)?
            .set_default("max_redirects", DEFAULT_MAX_REDIRECTS as i64)?
            .set_default("debug", false)?
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to read scraper configuration")?;

        settings
            .try_deserialize::<ScraperConfig>()
            .context("Invalid scraper configuration")
    }
}
