pub mod client_config;
pub mod config;
pub mod constants;
pub mod error;
pub mod http;
pub mod provider;
pub mod store;

pub use crate::{
    client_config::{ClientConfig, RawConfig},
    config::Settings,
    error::{ConfigError, FetchError, SettingsError},
    provider::ConfigProvider,
};
