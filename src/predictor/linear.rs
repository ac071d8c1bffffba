use super::{PredictError, Predictions, Predictor};
use crate::{Error, Result, dataset::Dataset};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// On-disk form of a trained multinomial linear classifier.
///
/// `weights[c][f]` is the weight of feature `features[f]` for class
/// `classes[c]`, and `bias[c]` its intercept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModelArtifact {
    #[serde(default = "default_model_type")]
    pub model_type: String,
    #[serde(default)]
    pub accuracy: Option<f64>,
    pub classes: Vec<String>,
    pub features: Vec<String>,
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
}

fn default_model_type() -> String {
    "Linear Classifier".to_string()
}

impl LinearModelArtifact {
    pub fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(Error::model("artifact declares no classes"));
        }
        if self.weights.len() != self.classes.len() || self.bias.len() != self.classes.len() {
            return Err(Error::model(format!(
                "expected {} weight rows and biases, got {} and {}",
                self.classes.len(),
                self.weights.len(),
                self.bias.len()
            )));
        }
        if let Some(row) = self
            .weights
            .iter()
            .position(|row| row.len() != self.features.len())
        {
            return Err(Error::model(format!(
                "weight row {} has {} entries, expected {}",
                row,
                self.weights[row].len(),
                self.features.len()
            )));
        }
        Ok(())
    }
}

/// Deterministic predictor backed by a [`LinearModelArtifact`].
#[derive(Debug, Clone)]
pub struct LinearPredictor {
    artifact: LinearModelArtifact,
}

impl LinearPredictor {
    pub fn new(artifact: LinearModelArtifact) -> Result<Self> {
        artifact.validate()?;
        Ok(Self { artifact })
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading linear model from {}", path.display());

        let contents = tokio::fs::read_to_string(path).await?;
        let artifact: LinearModelArtifact = serde_json::from_str(&contents)?;
        let predictor = Self::new(artifact)?;

        info!(
            "Loaded {} with {} classes over {} features",
            predictor.artifact.model_type,
            predictor.artifact.classes.len(),
            predictor.artifact.features.len()
        );
        Ok(predictor)
    }

    pub fn artifact(&self) -> &LinearModelArtifact {
        &self.artifact
    }

    fn feature_matrix(&self, dataset: &Dataset) -> std::result::Result<Vec<Vec<f64>>, PredictError> {
        let missing: Vec<&str> = self
            .artifact
            .features
            .iter()
            .filter(|feature| !dataset.has_column(feature))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            return Err(PredictError::unavailable(format!(
                "missing feature columns: {}",
                missing.join(", ")
            )));
        }

        self.artifact
            .features
            .iter()
            .map(|feature| {
                dataset.numeric_column(feature).map_err(|e| {
                    PredictError::unavailable(format!("feature column '{feature}': {e}"))
                })
            })
            .collect()
    }

    fn classify(&self, columns: &[Vec<f64>], row: usize) -> (usize, f64) {
        let scores: Vec<f64> = self
            .artifact
            .weights
            .iter()
            .zip(&self.artifact.bias)
            .map(|(weights, bias)| {
                weights
                    .iter()
                    .zip(columns)
                    .map(|(w, column)| w * column[row])
                    .sum::<f64>()
                    + bias
            })
            .collect();

        // Softmax, shifted by the max score for numerical stability
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let total: f64 = exps.iter().sum();

        let (best, best_exp) = exps
            .iter()
            .copied()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |acc, (i, e)| if e > acc.1 { (i, e) } else { acc });

        (best, best_exp / total)
    }
}

impl Predictor for LinearPredictor {
    fn name(&self) -> &str {
        &self.artifact.model_type
    }

    fn predict(&self, dataset: &Dataset) -> std::result::Result<Predictions, PredictError> {
        let columns = self.feature_matrix(dataset)?;
        let rows = dataset.row_count();

        let mut labels = Vec::with_capacity(rows);
        let mut confidences = Vec::with_capacity(rows);
        for row in 0..rows {
            let (class, confidence) = self.classify(&columns, row);
            if !confidence.is_finite() {
                return Err(PredictError::unavailable(format!(
                    "non-finite score for row {}",
                    row + 1
                )));
            }
            labels.push(self.artifact.classes[class].clone());
            confidences.push(confidence);
        }

        Ok(Predictions {
            labels,
            confidences,
        })
    }
}
