/// Lookup service resolving a short code to a branded client config.
pub const HOSTS: &str = "https://hosts.tinode.co/id/";

pub const CONFIG_FILE_NAME: &str = "client_config.json";

/// Buffer size used when streaming assets to disk.
pub const CHUNK_SIZE: usize = 2048;

pub const KEY_ID: &str = "id";
pub const KEY_API_URL: &str = "api_url";
pub const KEY_TOS_URL: &str = "tos_url";
pub const KEY_PRIVACY_URL: &str = "privacy_url";
pub const KEY_SERVICE_NAME: &str = "service_name";
pub const KEY_ICON_SMALL: &str = "icon_small";
pub const KEY_ICON_LARGE: &str = "icon_large";
pub const KEY_ASSET_BASE: &str = "assets_base";
