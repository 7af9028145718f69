use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use hyper::{body::HttpBody, Body};
use tokio::{
    fs::{create_dir_all, remove_file, File},
    io::{AsyncWriteExt, BufWriter},
};

use crate::{
    client_config::{self, RawConfig},
    constants::{CONFIG_FILE_NAME, KEY_ICON_LARGE, KEY_ICON_SMALL},
    error::{ConfigError, FetchError},
};

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    chunk_size: usize,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(dir: P, chunk_size: usize) -> std::io::Result<FileStore> {
        let dir = dir.as_ref();
        let dir = if dir.is_relative() {
            std::env::current_dir()?.join(dir)
        } else {
            dir.to_path_buf()
        };
        Ok(FileStore {
            dir,
            chunk_size: chunk_size.max(1),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE_NAME)
    }

    pub fn asset_path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Returns `None` when no config has been persisted or the file is empty.
    pub async fn read_config(&self) -> Result<Option<Vec<u8>>, ConfigError> {
        match tokio::fs::read(self.config_path()).await {
            Ok(bytes) if bytes.is_empty() => Ok(None),
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn write_config(&self, bytes: &[u8]) -> Result<(), ConfigError> {
        self.ensure_dir().await?;
        let mut file = File::create(self.config_path()).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        Ok(())
    }

    pub async fn write_map(&self, raw: &RawConfig) -> Result<(), ConfigError> {
        let bytes = client_config::to_json(raw)?;
        self.write_config(&bytes).await
    }

    /// Streams `body` into the asset file `name`, returning the number of
    /// bytes written. An empty body leaves any existing file untouched.
    pub async fn write_body(&self, name: &str, mut body: Body) -> Result<u64, ConfigError> {
        let first = match body.data().await {
            Some(chunk) => chunk.map_err(FetchError::from)?,
            None => return Err(FetchError::EmptyBody.into()),
        };
        self.ensure_dir().await?;
        let file = File::create(self.asset_path(name)).await?;
        let mut writer = BufWriter::with_capacity(self.chunk_size, file);
        let mut written = first.len() as u64;
        writer.write_all(&first).await?;
        while let Some(chunk) = body.data().await {
            let chunk = chunk.map_err(FetchError::from)?;
            written += chunk.len() as u64;
            writer.write_all(&chunk).await?;
        }
        writer.flush().await?;
        Ok(written)
    }

    pub async fn clear(&self) -> Result<(), ConfigError> {
        for name in &[CONFIG_FILE_NAME, KEY_ICON_SMALL, KEY_ICON_LARGE] {
            match remove_file(self.dir.join(name)).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    async fn ensure_dir(&self) -> std::io::Result<()> {
        if !self.dir.exists() {
            create_dir_all(&self.dir).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_config_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), 16).unwrap();
        assert!(store.read_config().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_config_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), 16).unwrap();
        store.write_config(b"").await.unwrap();
        assert!(store.config_path().exists());
        assert!(store.read_config().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn write_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested/files"), 16).unwrap();
        store.write_config(b"{}").await.unwrap();
        assert_eq!(store.read_config().await.unwrap().unwrap(), b"{}");
    }

    #[tokio::test]
    async fn body_is_written_across_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), 4).unwrap();
        let data: Vec<u8> = (0..1000u32).map(|i| (i % 251) as u8).collect();

        let written = store
            .write_body(KEY_ICON_SMALL, Body::from(data.clone()))
            .await
            .unwrap();
        assert_eq!(written, 1000);
        let on_disk = tokio::fs::read(store.asset_path(KEY_ICON_SMALL)).await.unwrap();
        assert_eq!(on_disk, data);
    }

    #[tokio::test]
    async fn empty_body_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), 16).unwrap();
        let err = store.write_body(KEY_ICON_LARGE, Body::empty()).await.unwrap_err();
        assert!(matches!(err, ConfigError::Fetch(FetchError::EmptyBody)));
        assert!(!store.asset_path(KEY_ICON_LARGE).exists());
    }

    #[tokio::test]
    async fn clear_ignores_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), 16).unwrap();
        store.write_config(b"{}").await.unwrap();
        store.clear().await.unwrap();
        assert!(!store.config_path().exists());
        store.clear().await.unwrap();
    }

    #[test]
    fn relative_dir_is_made_absolute() {
        let store = FileStore::new("files", 16).unwrap();
        assert!(store.dir().is_absolute());
        assert!(store.asset_path(KEY_ICON_SMALL).ends_with("files/icon_small"));
    }
}
