use super::{PredictError, Predictions, Predictor};
use crate::dataset::Dataset;
use rand::Rng;
use std::ops::RangeInclusive;

pub const STUB_LABELS: [&str; 3] = ["Class A", "Class B", "Class C"];

const CONFIDENCE_RANGE: RangeInclusive<f64> = 0.7..=0.95;

/// Placeholder predictor for testing. Ignores the data and returns a
/// random label and confidence for every row.
#[derive(Debug, Default, Clone)]
pub struct StubPredictor;

impl StubPredictor {
    pub fn new() -> Self {
        Self
    }
}

impl Predictor for StubPredictor {
    fn name(&self) -> &str {
        "stub"
    }

    fn predict(&self, dataset: &Dataset) -> Result<Predictions, PredictError> {
        let mut rng = rand::thread_rng();
        let rows = dataset.row_count();

        let labels = (0..rows)
            .map(|_| STUB_LABELS[rng.gen_range(0..STUB_LABELS.len())].to_string())
            .collect();
        let confidences = (0..rows)
            .map(|_| rng.gen_range(CONFIDENCE_RANGE))
            .collect();

        Ok(Predictions {
            labels,
            confidences,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::parse_csv;

    #[test]
    fn test_stub_covers_every_row() {
        let dataset = parse_csv(b"a,b\n1,2\n3,4\n5,6\n7,8\n").unwrap();
        let predictions = StubPredictor::new().predict(&dataset).unwrap();

        assert_eq!(predictions.labels.len(), 4);
        assert_eq!(predictions.confidences.len(), 4);
    }

    #[test]
    fn test_stub_values_stay_in_range() {
        let body: String = std::iter::once("x\n".to_string())
            .chain((0..500).map(|i| format!("{i}\n")))
            .collect();
        let dataset = parse_csv(body.as_bytes()).unwrap();
        let predictions = StubPredictor::new().predict(&dataset).unwrap();

        for label in &predictions.labels {
            assert!(STUB_LABELS.contains(&label.as_str()), "unexpected label {label}");
        }
        for confidence in &predictions.confidences {
            assert!(
                (0.7..=0.95).contains(confidence),
                "confidence {confidence} out of range"
            );
        }
    }

    #[test]
    fn test_stub_is_always_ready() {
        assert!(StubPredictor::new().is_ready());
        assert_eq!(StubPredictor::new().name(), "stub");
    }
}
