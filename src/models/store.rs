use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Store {
    GooglePlay,
    AppStore,
}

impl Store {
    pub fn key(&self) -> &'static str {
        match self {
            Store::GooglePlay => "GooglePlay",
            Store::AppStore => "AppStore",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "GooglePlay" => Some(Store::GooglePlay),
            "AppStore" => Some(Store::AppStore),
            _ => None,
        }
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
