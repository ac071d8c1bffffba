mod error;
mod prediction;
mod types;

pub use error::ServiceError;
pub use prediction::{PredictionService, format_predictions};
pub use types::{ErrorResponse, PredictionOutcome, PredictionRow, PredictionSummary};
