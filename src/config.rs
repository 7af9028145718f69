use std::{fs::File, path::PathBuf};

use serde::Deserialize;

use crate::{
    constants::{CHUNK_SIZE, HOSTS},
    error::SettingsError,
};

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default = "default_hosts_url")]
    pub hosts_url: String,
    #[serde(default = "default_files_dir")]
    pub files_dir: PathBuf,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_hosts_url() -> String {
    HOSTS.to_string()
}

fn default_files_dir() -> PathBuf {
    PathBuf::from("files")
}

fn default_chunk_size() -> usize {
    CHUNK_SIZE
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            hosts_url: default_hosts_url(),
            files_dir: default_files_dir(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Settings, SettingsError> {
        match std::env::var_os("CONFIG_FILE") {
            Some(file) => Settings::from_file(PathBuf::from(file)),
            None => Ok(Settings::default()),
        }
    }

    pub fn from_file(path: PathBuf) -> Result<Settings, SettingsError> {
        let file = File::open(&path)?;
        let settings = serde_yaml::from_reader(file)?;
        Ok(settings)
    }

    pub fn with_files_dir<P: Into<PathBuf>>(self, files_dir: P) -> Settings {
        Settings {
            files_dir: files_dir.into(),
            ..self
        }
    }
}
