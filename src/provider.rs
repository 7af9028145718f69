use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::Mutex;

use crate::{
    client_config::{self, non_empty, ClientConfig, RawConfig},
    config::Settings,
    constants::{KEY_ASSET_BASE, KEY_ICON_LARGE, KEY_ICON_SMALL},
    error::{ConfigError, FetchError},
    http::{lookup_url, Client},
    store::FileStore,
};

struct Loaded {
    raw: Arc<RawConfig>,
    config: Arc<ClientConfig>,
}

impl Loaded {
    fn new(raw: RawConfig) -> Loaded {
        let config = ClientConfig::from_raw(&raw);
        Loaded {
            raw: Arc::new(raw),
            config: Arc::new(config),
        }
    }
}

pub struct ConfigProvider {
    client: Client,
    store: FileStore,
    hosts_url: String,
    state: Mutex<Option<Loaded>>,
}

impl ConfigProvider {
    pub fn new(settings: &Settings) -> Result<ConfigProvider, ConfigError> {
        ConfigProvider::with_client(settings, Client::default())
    }

    pub fn with_client(settings: &Settings, client: Client) -> Result<ConfigProvider, ConfigError> {
        let store = FileStore::new(&settings.files_dir, settings.chunk_size)?;
        Ok(ConfigProvider {
            client,
            store,
            hosts_url: settings.hosts_url.clone(),
            state: Mutex::new(None),
        })
    }

    pub fn store(&self) -> &FileStore {
        &self.store
    }

    /// Returns the cached config, loading the persisted file on first access.
    pub async fn config(&self) -> Result<Arc<ClientConfig>, ConfigError> {
        let mut state = self.state.lock().await;
        if let Some(loaded) = state.as_ref() {
            return Ok(loaded.config.clone());
        }
        let loaded = self.load().await?;
        let config = loaded.config.clone();
        *state = Some(loaded);
        Ok(config)
    }

    pub async fn raw_config(&self) -> Result<Arc<RawConfig>, ConfigError> {
        let mut state = self.state.lock().await;
        if let Some(loaded) = state.as_ref() {
            return Ok(loaded.raw.clone());
        }
        let loaded = self.load().await?;
        let raw = loaded.raw.clone();
        *state = Some(loaded);
        Ok(raw)
    }

    pub async fn cached(&self) -> Option<Arc<ClientConfig>> {
        self.state
            .lock()
            .await
            .as_ref()
            .map(|loaded| loaded.config.clone())
    }

    pub async fn init(&self) -> Result<Arc<ClientConfig>, ConfigError> {
        let mut state = self.state.lock().await;
        let loaded = self.load().await?;
        let config = loaded.config.clone();
        *state = Some(loaded);
        Ok(config)
    }

    pub async fn reset(&self) {
        *self.state.lock().await = None;
    }

    /// Writes `raw` as the persisted config. The cache is dropped so the next
    /// access reads the file back.
    pub async fn persist(&self, raw: &RawConfig) -> Result<(), ConfigError> {
        let mut state = self.state.lock().await;
        self.store.write_map(raw).await?;
        *state = None;
        Ok(())
    }

    pub async fn fetch(&self, short_code: &str) -> Result<Arc<ClientConfig>, ConfigError> {
        let url = lookup_url(&self.hosts_url, short_code);
        match self.fetch_inner(&url).await {
            Ok(config) => Ok(config),
            Err(e) => {
                info!("client config request {} failed: {}", url, e);
                Err(e)
            }
        }
    }

    async fn fetch_inner(&self, url: &str) -> Result<Arc<ClientConfig>, ConfigError> {
        let resp = self.client.get(url).await?;
        let body = hyper::body::to_bytes(resp.into_body())
            .await
            .map_err(FetchError::from)?;
        if body.is_empty() {
            return Err(FetchError::EmptyBody.into());
        }
        let raw = client_config::parse(&body)?;
        self.store.write_config(&body).await?;
        debug!("saved client config to {}", self.store.config_path().display());

        if let Some(base) = non_empty(&raw, KEY_ASSET_BASE) {
            for key in &[KEY_ICON_SMALL, KEY_ICON_LARGE] {
                if let Some(icon) = non_empty(&raw, key) {
                    let asset_url = format!("{}{}", base, icon);
                    if let Err(e) = self.save_asset(&asset_url, key).await {
                        warn!("failed to download asset {}: {}", asset_url, e);
                    }
                }
            }
        }

        let loaded = Loaded::new(raw);
        let config = loaded.config.clone();
        *self.state.lock().await = Some(loaded);
        Ok(config)
    }

    pub async fn save_asset(&self, url: &str, name: &str) -> Result<u64, ConfigError> {
        let resp = self.client.get(url).await?;
        let written = self.store.write_body(name, resp.into_body()).await?;
        debug!("saved asset {} ({} bytes) as {}", url, written, name);
        Ok(written)
    }

    async fn load(&self) -> Result<Loaded, ConfigError> {
        let bytes = self
            .store
            .read_config()
            .await?
            .ok_or(ConfigError::NotLoaded)?;
        let mut raw = client_config::parse(&bytes)?;
        for key in &[KEY_ICON_SMALL, KEY_ICON_LARGE] {
            let path = self.store.asset_path(key);
            raw.insert(key.to_string(), path.to_string_lossy().into_owned());
        }
        Ok(Loaded::new(raw))
    }
}
