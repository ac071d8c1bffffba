use crate::service::{PredictionRow, PredictionSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub model_status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelInfoResponse {
    pub success: bool,
    pub model_type: String,
    pub accuracy: Option<f64>,
    pub last_trained: Option<DateTime<Utc>>,
    pub features: Vec<String>,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub success: bool,
    pub predictions: Vec<PredictionRow>,
    pub summary: PredictionSummary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadModelResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IndexResponse {
    pub message: String,
    pub endpoints: Endpoints,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Endpoints {
    pub health: String,
    pub model_info: String,
    pub predict: String,
    pub upload_model: String,
}
