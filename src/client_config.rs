use std::collections::HashMap;

use serde::Serialize;

use crate::constants::{
    KEY_API_URL, KEY_ASSET_BASE, KEY_ICON_LARGE, KEY_ICON_SMALL, KEY_ID, KEY_PRIVACY_URL,
    KEY_SERVICE_NAME, KEY_TOS_URL,
};

/// Flat key/value view of the config document.
pub type RawConfig = HashMap<String, String>;

/// Branded client configuration as served by the hosts lookup, e.g.
///
/// ```json
/// {
///     "id": "AB6WU",
///     "api_url": "https://api.tinode.co",
///     "tos_url": "https://tinode.co/terms.html",
///     "privacy_url": "https://tinode.co/privacy.html",
///     "service_name": "Tinode",
///     "icon_small": "small/tn-60480b81.png",
///     "icon_large": "large/tn-60480b82.png",
///     "assets_base": "https://storage.googleapis.com/hosts.tinode.co/"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientConfig {
    pub id: Option<String>,
    pub api_url: Option<String>,
    pub tos_url: Option<String>,
    pub privacy_url: Option<String>,
    pub service_name: Option<String>,
    pub icon_small: Option<String>,
    pub icon_large: Option<String>,
    pub assets_base: Option<String>,
}

impl ClientConfig {
    pub fn from_raw(raw: &RawConfig) -> ClientConfig {
        let get = |key: &str| raw.get(key).cloned();
        ClientConfig {
            id: get(KEY_ID),
            api_url: get(KEY_API_URL),
            tos_url: get(KEY_TOS_URL),
            privacy_url: get(KEY_PRIVACY_URL),
            service_name: get(KEY_SERVICE_NAME),
            icon_small: get(KEY_ICON_SMALL),
            icon_large: get(KEY_ICON_LARGE),
            assets_base: get(KEY_ASSET_BASE),
        }
    }
}

/// Parses a single-level JSON object of string values.
pub fn parse(input: &[u8]) -> Result<RawConfig, serde_json::Error> {
    serde_json::from_slice(input)
}

pub fn to_json(raw: &RawConfig) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec_pretty(raw)
}

/// Returns the value for `key` unless it is missing or empty.
pub(crate) fn non_empty<'a>(raw: &'a RawConfig, key: &str) -> Option<&'a str> {
    raw.get(key).map(String::as_str).filter(|v| !v.is_empty())
}
