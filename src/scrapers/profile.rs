use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{AppField, Store};

/// What to read from a matched element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extract {
    Text,
    Attribute(&'static str),
}

/// Where a field value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Path inside the embedded schema document, e.g. `offers[0].price`.
    Schema(&'static str),
    /// First element matching the CSS selector.
    Element {
        selector: &'static str,
        extract: Extract,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRule {
    pub field: AppField,
    /// Tried in order; the first non-empty value wins.
    pub sources: &'static [Source],
    /// Raw value used when every source comes up empty.
    pub default: Option<&'static str>,
}

impl FieldRule {
    const fn new(field: AppField, sources: &'static [Source]) -> Self {
        Self {
            field,
            sources,
            default: None,
        }
    }

    const fn or_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }
}

#[derive(Debug)]
pub struct StoreProfile {
    pub store: Store,
    /// Listing URL with a single `{id}` placeholder.
    pub url_template: &'static str,
    pub id_pattern: Regex,
    pub schema_selector: &'static str,
    pub fields: &'static [FieldRule],
}

impl StoreProfile {
    pub fn matches(&self, app_id: &str) -> bool {
        self.id_pattern.is_match(app_id)
    }

    pub fn listing_url(&self, app_id: &str) -> String {
        self.url_template.replace("{id}", app_id)
    }

    pub fn rule(&self, field: AppField) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.field == field)
    }

    /// Every CSS selector the profile uses, schema selector first.
    pub fn selectors(&self) -> Vec<&'static str> {
        let mut selectors = vec![self.schema_selector];
        for rule in self.fields {
            for source in rule.sources {
                if let Source::Element { selector, .. } = source {
                    selectors.push(*selector);
                }
            }
        }
        selectors
    }
}

const OG_IMAGE: Source = Source::Element {
    selector: r#"meta[property="og:image"]"#,
    extract: Extract::Attribute("content"),
};

const OG_TITLE: Source = Source::Element {
    selector: r#"meta[property="og:title"]"#,
    extract: Extract::Attribute("content"),
};

static GOOGLE_PLAY_FIELDS: [FieldRule; 7] = [
    FieldRule::new(AppField::Image, &[Source::Schema("image"), OG_IMAGE]),
    FieldRule::new(AppField::Name, &[Source::Schema("name"), OG_TITLE]),
    FieldRule::new(AppField::Rating, &[Source::Schema("aggregateRating.ratingValue")]),
    FieldRule::new(
        AppField::Price,
        &[
            Source::Schema("offers[0].price"),
            Source::Element {
                selector: r#"meta[itemprop="price"]"#,
                extract: Extract::Attribute("content"),
            },
        ],
    ),
    FieldRule::new(AppField::Description, &[Source::Schema("description")]),
    FieldRule::new(AppField::OperatingSystem, &[Source::Schema("operatingSystem")]),
    FieldRule::new(AppField::Author, &[Source::Schema("author.name")]),
];

// Free App Store listings carry no offer price.
static APP_STORE_FIELDS: [FieldRule; 7] = [
    FieldRule::new(AppField::Image, &[Source::Schema("image"), OG_IMAGE]),
    FieldRule::new(AppField::Name, &[Source::Schema("name"), OG_TITLE]),
    FieldRule::new(AppField::Rating, &[Source::Schema("aggregateRating.ratingValue")]),
    FieldRule::new(AppField::Price, &[Source::Schema("offers.price")]).or_default("0"),
    FieldRule::new(AppField::Description, &[Source::Schema("description")]),
    FieldRule::new(AppField::OperatingSystem, &[Source::Schema("operatingSystem")]),
    FieldRule::new(AppField::Author, &[Source::Schema("author.name")]),
];

/// Supported stores in detection order. Identifier shapes are mutually
/// exclusive, so the first matching pattern decides the store.
pub static STORE_PROFILES: Lazy<Vec<StoreProfile>> = Lazy::new(|| {
    vec![
        StoreProfile {
            store: Store::GooglePlay,
            url_template: "https://play.google.com/store/apps/details?id={id}",
            id_pattern: Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(?:\.[A-Za-z][A-Za-z0-9_]*)+$")
                .expect("Invalid Google Play id regex"),
            schema_selector: r#"script[type="application/ld+json"]"#,
            fields: &GOOGLE_PLAY_FIELDS,
        },
        StoreProfile {
            store: Store::AppStore,
            url_template: "https://apps.apple.com/app/id{id}",
            id_pattern: Regex::new(r"^[0-9]+$").expect("Invalid App Store id regex"),
            schema_selector: r#"script[name="schema:software-application"]"#,
            fields: &APP_STORE_FIELDS,
        },
    ]
});

pub fn profile_for(store: Store) -> Option<&'static StoreProfile> {
    STORE_PROFILES.iter().find(|profile| profile.store == store)
}

/// Keys of the supported stores, in detection order.
pub fn supported_stores() -> Vec<&'static str> {
    STORE_PROFILES.iter().map(|profile| profile.store.key()).collect()
}
