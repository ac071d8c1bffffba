use super::types::{
    Endpoints, HealthResponse, IndexResponse, ModelInfoResponse, PredictResponse,
    UploadModelResponse,
};
use crate::{
    dataset::RawUpload,
    metadata::MetadataStore,
    service::{PredictionService, ServiceError},
};
use axum::{
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    response::Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const HEALTH_PATH: &str = "/api/health";
pub const MODEL_INFO_PATH: &str = "/api/model-info";
pub const PREDICT_PATH: &str = "/api/predict";
pub const UPLOAD_MODEL_PATH: &str = "/api/upload-model";

const UPLOAD_FIELD: &str = "file";

#[derive(Clone)]
pub struct AppState {
    pub service: PredictionService,
    pub metadata: Arc<MetadataStore>,
}

pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Tabular Inference API".to_string(),
        endpoints: Endpoints {
            health: HEALTH_PATH.to_string(),
            model_info: MODEL_INFO_PATH.to_string(),
            predict: PREDICT_PATH.to_string(),
            upload_model: UPLOAD_MODEL_PATH.to_string(),
        },
        status: "running".to_string(),
    })
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        message: "Tabular inference backend is running".to_string(),
        model_status: state.metadata.get().status,
    })
}

pub async fn model_info(State(state): State<AppState>) -> Json<ModelInfoResponse> {
    let metadata = state.metadata.get();
    Json(ModelInfoResponse {
        success: true,
        model_type: metadata.model_type,
        accuracy: metadata.accuracy,
        last_trained: metadata.last_trained,
        features: metadata.features,
        status: metadata.status,
    })
}

pub async fn predict(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PredictResponse>, ServiceError> {
    let upload = match multipart {
        Ok(multipart) => read_upload(multipart).await?,
        Err(rejection) => {
            debug!("Predict request is not multipart: {}", rejection);
            None
        }
    };

    let outcome = state.service.run(upload).await.inspect_err(|e| {
        info!("Prediction request rejected: {}", e);
    })?;

    Ok(Json(PredictResponse {
        success: true,
        predictions: outcome.predictions,
        summary: outcome.summary,
    }))
}

/// Returns the first file part named `file`. Plain form fields with the
/// same name are not files and are skipped.
async fn read_upload(mut multipart: Multipart) -> Result<Option<RawUpload>, ServiceError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!("Failed to read multipart body: {}", e);
        upload_error(e)
    })? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let bytes = field.bytes().await.map_err(|e| {
            warn!("Failed to read upload {}: {}", file_name, e);
            upload_error(e)
        })?;
        info!("Received file: {} ({} bytes)", file_name, bytes.len());

        return Ok(Some(RawUpload { file_name, bytes }));
    }
    Ok(None)
}

// A body over the limit reports 413, malformed framing 400
fn upload_error(error: MultipartError) -> ServiceError {
    ServiceError::invalid_upload(error.status(), error.body_text())
}

pub async fn upload_model() -> Json<UploadModelResponse> {
    Json(UploadModelResponse {
        success: false,
        error: "Model upload endpoint not implemented yet".to_string(),
        message: "This endpoint will accept trained model artifacts for deployment".to_string(),
    })
}
