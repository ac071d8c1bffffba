use super::ErrorResponse;
use crate::dataset::LoadError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Everything a prediction request can fail with, as seen by the client.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(#[from] LoadError),

    /// The request body itself could not be read, e.g. it exceeds the size limit
    #[error("Invalid upload: {message}")]
    InvalidUpload { status: StatusCode, message: String },

    // Detail is logged server-side, never returned
    #[error("Model prediction failed")]
    PredictionFailed,

    #[error("Server error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Upload failure with the given status, forced into the 4xx range.
    pub fn invalid_upload(status: StatusCode, message: impl Into<String>) -> Self {
        let status = if status.is_client_error() {
            status
        } else {
            StatusCode::BAD_REQUEST
        };
        Self::InvalidUpload {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::InvalidUpload { status, .. } => *status,
            ServiceError::PredictionFailed | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            success: false,
            error: self.to_string(),
        });

        (self.status(), body).into_response()
    }
}
