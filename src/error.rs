use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("remote server error, http status code: {0}")]
    Status(u16),
    #[error("received empty body")]
    EmptyBody,
    #[error("invalid request: {0}")]
    InvalidUrl(#[from] http::Error),
    #[error("transport error: {0}")]
    Transport(#[from] hyper::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Nothing has been fetched or persisted yet.
    #[error("client config is not loaded")]
    NotLoaded,
    #[error("failed to fetch client config: {0}")]
    Fetch(#[from] FetchError),
    #[error("failed to parse client config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("client config I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
