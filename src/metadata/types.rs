use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Descriptor of the model currently serving predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_type: String,
    pub accuracy: Option<f64>,
    pub last_trained: Option<DateTime<Utc>>,
    pub features: Vec<String>,
    pub status: String,
}

impl Default for ModelMetadata {
    fn default() -> Self {
        Self {
            model_type: "Not loaded".to_string(),
            accuracy: None,
            last_trained: None,
            features: Vec::new(),
            status: "No model loaded".to_string(),
        }
    }
}

impl ModelMetadata {
    /// Placeholder descriptor advertised while the stub predictor is active.
    pub fn mock() -> Self {
        Self {
            model_type: "Random Forest (Mock)".to_string(),
            accuracy: Some(0.85),
            last_trained: Some(Utc::now()),
            features: (1..=4).map(|i| format!("Feature{i}")).collect(),
            status: "Mock model loaded for testing".to_string(),
        }
    }
}
