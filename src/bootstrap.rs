use crate::{
    Result,
    config::StorageConfig,
    metadata::{MetadataStore, ModelMetadata},
    predictor::{LinearPredictor, PredictorSlot, StubPredictor},
};
use chrono::{DateTime, Utc};
use std::{path::Path, sync::Arc};
use tracing::{error, info, warn};

/// Shared state produced once at startup.
pub struct Runtime {
    pub metadata: Arc<MetadataStore>,
    pub predictors: PredictorSlot,
}

/// Prepares storage, restores the metadata record and installs a
/// predictor: the trained artifact if one exists, otherwise the stub.
pub async fn initialize(storage: &StorageConfig) -> Result<Runtime> {
    info!("Initializing application...");

    tokio::fs::create_dir_all(&storage.upload_dir).await?;
    tokio::fs::create_dir_all(&storage.model_dir).await?;

    let metadata = Arc::new(MetadataStore::open(storage.metadata_path()).await);
    let predictors = PredictorSlot::new();

    let model_path = storage.model_path();
    if tokio::fs::try_exists(&model_path).await.unwrap_or(false) {
        info!("Found existing model at {}, loading...", model_path.display());
        load_trained_model(&model_path, &metadata, &predictors).await;
    } else {
        info!("No model found, installing mock model for testing...");
        predictors.install(Arc::new(StubPredictor::new()));
        metadata.replace(ModelMetadata::mock()).await;
        info!("Mock model created successfully");
    }

    info!("Application initialized successfully");
    Ok(Runtime {
        metadata,
        predictors,
    })
}

async fn load_trained_model(path: &Path, metadata: &MetadataStore, predictors: &PredictorSlot) {
    match LinearPredictor::load(path).await {
        Ok(predictor) => {
            let artifact = predictor.artifact().clone();
            let last_trained = modified_at(path).await;
            predictors.install(Arc::new(predictor));

            metadata
                .update(|m| {
                    m.model_type = artifact.model_type;
                    m.accuracy = artifact.accuracy;
                    m.features = artifact.features;
                    m.last_trained = last_trained.or(m.last_trained);
                    m.status = "Model loaded successfully".to_string();
                })
                .await;
            info!("Model loaded successfully");
        }
        Err(e) => {
            error!("Error loading model from {}: {}", path.display(), e);
            predictors.clear();
            metadata
                .update(|m| m.status = "Error loading model".to_string())
                .await;
        }
    }
}

async fn modified_at(path: &Path) -> Option<DateTime<Utc>> {
    match tokio::fs::metadata(path).await.and_then(|m| m.modified()) {
        Ok(modified) => Some(modified.into()),
        Err(e) => {
            warn!("Could not read modification time of {}: {}", path.display(), e);
            None
        }
    }
}
