mod linear;
mod slot;
mod stub;

pub use linear::{LinearModelArtifact, LinearPredictor};
pub use slot::PredictorSlot;
pub use stub::{STUB_LABELS, StubPredictor};

use crate::dataset::Dataset;
use thiserror::Error;

/// Labels and confidences for every row of a dataset, in row order.
#[derive(Debug, Clone, PartialEq)]
pub struct Predictions {
    pub labels: Vec<String>,
    pub confidences: Vec<f64>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    #[error("Predictor unavailable: {0}")]
    Unavailable(String),
}

impl PredictError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }
}

/// Maps a dataset to one label and one confidence per row.
///
/// Implementations return [`PredictError::Unavailable`] instead of
/// panicking when they cannot serve a request.
pub trait Predictor: Send + Sync {
    fn name(&self) -> &str;

    fn is_ready(&self) -> bool {
        true
    }

    fn predict(&self, dataset: &Dataset) -> Result<Predictions, PredictError>;
}
