use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

use crate::error::ScrapeError;
use crate::models::{AppField, AppRecord};
use crate::parsers::{
    element_attr, element_text, find_embedded_schema, lookup, parse_decimal, parse_price_value,
    scalar_text,
};
use crate::scrapers::profile::{Extract, FieldRule, Source, StoreProfile};

/// Read every field of `profile` out of a fetched listing page.
///
/// Field failures never abort: the field stays `None` and the problem is
/// returned alongside the record.
pub fn extract_record(body: &str, profile: &StoreProfile) -> (AppRecord, Vec<ScrapeError>) {
    let document = Html::parse_document(body);
    let mut errors = Vec::new();

    let schema = load_schema(&document, profile, &mut errors);

    let mut record = AppRecord::default();
    for rule in profile.fields {
        let raw = rule
            .sources
            .iter()
            .find_map(|source| read_source(&document, schema.as_ref(), source, &mut errors));

        // The default also covers values that are present but unreadable.
        let applied = raw.map_or(false, |raw| apply_value(&mut record, rule, &raw))
            || rule
                .default
                .map_or(false, |default| apply_value(&mut record, rule, default));

        if !applied {
            debug!("{} listing has no {}", profile.store, rule.field.key());
        }
    }

    (record, errors)
}

fn load_schema(
    document: &Html,
    profile: &StoreProfile,
    errors: &mut Vec<ScrapeError>,
) -> Option<Value> {
    let selector = match Selector::parse(profile.schema_selector) {
        Ok(selector) => selector,
        Err(_) => {
            errors.push(ScrapeError::InvalidSelector {
                selector: profile.schema_selector.to_string(),
            });
            return None;
        }
    };

    let scan = find_embedded_schema(document, &selector);
    for reason in scan.decode_errors {
        errors.push(ScrapeError::MalformedSchema {
            store: profile.store,
            reason,
        });
    }
    if scan.blocks == 0 {
        errors.push(ScrapeError::MalformedSchema {
            store: profile.store,
            reason: format!("no {} block found", profile.schema_selector),
        });
    }
    scan.schema
}

fn read_source(
    document: &Html,
    schema: Option<&Value>,
    source: &Source,
    errors: &mut Vec<ScrapeError>,
) -> Option<String> {
    match source {
        Source::Schema(path) => schema.and_then(|schema| lookup(schema, path)).and_then(scalar_text),
        Source::Element { selector, extract } => {
            let parsed = match Selector::parse(selector) {
                Ok(parsed) => parsed,
                Err(_) => {
                    errors.push(ScrapeError::InvalidSelector {
                        selector: selector.to_string(),
                    });
                    return None;
                }
            };

            // Only the first match counts, later matches are ignored.
            let element = document.select(&parsed).next()?;
            match extract {
                Extract::Text => element_text(&element),
                Extract::Attribute(name) => element_attr(&element, name),
            }
        }
    }
}

/// Store `raw` in the record. Returns false when a numeric field could not be
/// parsed, leaving it `None`.
fn apply_value(record: &mut AppRecord, rule: &FieldRule, raw: &str) -> bool {
    match rule.field {
        AppField::Image => record.image = Some(raw.to_string()),
        AppField::Name => record.name = Some(raw.to_string()),
        AppField::Rating => {
            record.rating = parse_decimal(raw);
            return record.rating.is_some();
        }
        AppField::Price => {
            record.price = parse_price_value(raw);
            return record.price.is_some();
        }
        AppField::Description => record.description = Some(raw.to_string()),
        AppField::OperatingSystem => record.operating_system = Some(raw.to_string()),
        AppField::Author => record.author = Some(raw.to_string()),
    }
    true
}
