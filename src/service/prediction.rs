use super::{PredictionOutcome, PredictionRow, PredictionSummary, ServiceError};
use crate::{
    dataset::{Dataset, DatasetLoader, RawUpload},
    metadata::MetadataStore,
    predictor::{Predictions, PredictorSlot},
};
use std::sync::Arc;
use tracing::{error, info};

/// Upload -> dataset -> predictor -> response pipeline.
///
/// Never writes to the metadata store; it only reads the snapshot when
/// building the summary.
#[derive(Clone)]
pub struct PredictionService {
    loader: DatasetLoader,
    predictors: PredictorSlot,
    metadata: Arc<MetadataStore>,
}

impl PredictionService {
    pub fn new(
        loader: DatasetLoader,
        predictors: PredictorSlot,
        metadata: Arc<MetadataStore>,
    ) -> Self {
        Self {
            loader,
            predictors,
            metadata,
        }
    }

    pub async fn run(&self, upload: Option<RawUpload>) -> Result<PredictionOutcome, ServiceError> {
        let dataset = self.loader.load(upload).await?;
        let total_samples = dataset.row_count();

        let predictions = self.predict(dataset).await?;
        let rows = format_predictions(predictions);

        // Read at response time so a concurrent model swap is reflected
        let metadata = self.metadata.get();
        info!("Successfully generated predictions for {} samples", rows.len());

        Ok(PredictionOutcome {
            predictions: rows,
            summary: PredictionSummary {
                total_samples,
                model_used: metadata.model_type,
                accuracy: metadata.accuracy,
            },
        })
    }

    async fn predict(&self, dataset: Dataset) -> Result<Predictions, ServiceError> {
        let Some(predictor) = self.predictors.current().filter(|p| p.is_ready()) else {
            error!("Model prediction failed: no model loaded");
            return Err(ServiceError::PredictionFailed);
        };

        let rows = dataset.row_count();
        let name = predictor.name().to_string();

        // Off the async workers; a panicking predictor surfaces as a JoinError
        let predictions = tokio::task::spawn_blocking(move || predictor.predict(&dataset))
            .await
            .map_err(|e| {
                error!("Predictor {} aborted: {}", name, e);
                ServiceError::PredictionFailed
            })?
            .map_err(|e| {
                error!("Predictor {} failed: {}", name, e);
                ServiceError::PredictionFailed
            })?;

        if predictions.labels.len() != rows || predictions.confidences.len() != rows {
            error!(
                "Predictor {} returned {} labels and {} confidences for {} rows",
                name,
                predictions.labels.len(),
                predictions.confidences.len(),
                rows
            );
            return Err(ServiceError::PredictionFailed);
        }

        Ok(predictions)
    }
}

/// Pairs labels with confidences, numbering rows from 1 in input order.
pub fn format_predictions(predictions: Predictions) -> Vec<PredictionRow> {
    predictions
        .labels
        .into_iter()
        .zip(predictions.confidences)
        .enumerate()
        .map(|(i, (prediction, confidence))| PredictionRow {
            id: i + 1,
            prediction,
            confidence: confidence.is_finite().then_some(confidence),
        })
        .collect()
}
