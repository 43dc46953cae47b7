use tracing::debug;

use crate::error::ScrapeError;
use crate::models::Store;
use crate::scrapers::profile::{profile_for, StoreProfile, STORE_PROFILES};

/// Settle on exactly one store profile for `app_id`.
///
/// With an explicit store key the identifier is only checked against that
/// store's pattern. Without one, profiles are tried in detection order.
pub fn resolve_store(
    app_id: &str,
    store_key: Option<&str>,
) -> Result<&'static StoreProfile, ScrapeError> {
    match store_key {
        Some(key) => {
            let profile = Store::from_key(key)
                .and_then(profile_for)
                .ok_or_else(|| ScrapeError::UnsupportedStore {
                    store: key.to_string(),
                })?;

            if !profile.matches(app_id) {
                return Err(ScrapeError::IdentifierStoreMismatch {
                    app_id: app_id.to_string(),
                    store: profile.store,
                });
            }
            Ok(profile)
        }
        None => {
            let profile = detect_store(app_id).ok_or_else(|| ScrapeError::UnrecognizedIdentifier {
                app_id: app_id.to_string(),
            })?;
            debug!("Detected {} from app id {}", profile.store, app_id);
            Ok(profile)
        }
    }
}

pub fn detect_store(app_id: &str) -> Option<&'static StoreProfile> {
    STORE_PROFILES.iter().find(|profile| profile.matches(app_id))
}
