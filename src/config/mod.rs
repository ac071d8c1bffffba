mod types;

pub use types::*;

use crate::Result;
use std::{env, path::PathBuf};
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    load_from(&config_path).await
}

pub async fn load_from(config_path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path);

    let mut config: Config = match tokio::fs::read_to_string(config_path).await {
        Ok(config_str) => serde_yaml::from_str(&config_str)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No configuration file at {}, using defaults", config_path);
            Config::default()
        }
        Err(e) => return Err(e.into()),
    };

    // Environment overrides for the storage directories
    if let Ok(dir) = env::var("UPLOAD_DIR") {
        config.storage.upload_dir = PathBuf::from(dir);
    }
    if let Ok(dir) = env::var("MODEL_DIR") {
        config.storage.model_dir = PathBuf::from(dir);
    }

    Ok(config)
}
