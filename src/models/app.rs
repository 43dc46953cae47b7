use serde::{Deserialize, Serialize};
use std::fmt;

// NewType pattern for type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordFingerprint(pub String);

impl fmt::Display for RecordFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed set of fields an extraction can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppField {
    Image,
    Name,
    Rating,
    Price,
    Description,
    OperatingSystem,
    Author,
}

impl AppField {
    pub const ALL: [AppField; 7] = [
        AppField::Image,
        AppField::Name,
        AppField::Rating,
        AppField::Price,
        AppField::Description,
        AppField::OperatingSystem,
        AppField::Author,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            AppField::Image => "image",
            AppField::Name => "name",
            AppField::Rating => "rating",
            AppField::Price => "price",
            AppField::Description => "description",
            AppField::OperatingSystem => "operatingSystem",
            AppField::Author => "author",
        }
    }
}

/// Listing data for one app. Every field is optional; a field is `None`
/// when the page did not carry it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppRecord {
    pub image: Option<String>,
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub operating_system: Option<String>,
    pub author: Option<String>,
}

impl AppRecord {
    pub fn is_empty(&self) -> bool {
        AppField::ALL.iter().all(|field| self.value_text(*field).is_none())
    }

    /// Field value rendered as text, the way it is compared and hashed.
    pub fn value_text(&self, field: AppField) -> Option<String> {
        match field {
            AppField::Image => self.image.clone(),
            AppField::Name => self.name.clone(),
            AppField::Rating => self.rating.map(|v| v.to_string()),
            AppField::Price => self.price.map(|v| v.to_string()),
            AppField::Description => self.description.clone(),
            AppField::OperatingSystem => self.operating_system.clone(),
            AppField::Author => self.author.clone(),
        }
    }

    /// Keys of the fields whose values differ between the two records.
    pub fn diff(&self, other: &AppRecord) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if self.image != other.image {
            changed.push(AppField::Image.key());
        }
        if self.name != other.name {
            changed.push(AppField::Name.key());
        }
        if self.rating != other.rating {
            changed.push(AppField::Rating.key());
        }
        if self.price != other.price {
            changed.push(AppField::Price.key());
        }
        if self.description != other.description {
            changed.push(AppField::Description.key());
        }
        if self.operating_system != other.operating_system {
            changed.push(AppField::OperatingSystem.key());
        }
        if self.author != other.author {
            changed.push(AppField::Author.key());
        }
        changed
    }

    /// Exact field-for-field equality. Use it to tell whether previously
    /// stored data has gone stale against a fresh extraction.
    pub fn is_same_as(&self, other: &AppRecord) -> bool {
        self.diff(other).is_empty()
    }

    pub fn fingerprint(&self) -> RecordFingerprint {
        use md5::Context;

        let hash_string = AppField::ALL
            .iter()
            .map(|field| {
                format!(
                    "{}={}",
                    field.key(),
                    self.value_text(*field).unwrap_or_default()
                )
            })
            .collect::<Vec<_>>()
            .join("|");

        let mut hasher = Context::new();
        hasher.consume(hash_string.as_bytes());
        let result = hasher.compute();

        RecordFingerprint(format!("{:x}", result))
    }
}
