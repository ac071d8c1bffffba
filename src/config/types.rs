use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,
    #[serde(default = "default_metadata_file")]
    pub metadata_file: String,
    #[serde(default = "default_model_file")]
    pub model_file: String,
}

impl StorageConfig {
    pub fn metadata_path(&self) -> PathBuf {
        self.model_dir.join(&self.metadata_file)
    }

    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join(&self.model_file)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            model_dir: default_model_dir(),
            metadata_file: default_metadata_file(),
            model_file: default_model_file(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_upload_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_model_dir() -> PathBuf {
    PathBuf::from("trained_model")
}

fn default_metadata_file() -> String {
    "model_metadata.json".to_string()
}

fn default_model_file() -> String {
    "model.json".to_string()
}
