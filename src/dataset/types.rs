use axum::body::Bytes;
use polars::prelude::*;
use thiserror::Error;

/// A file received from a client, before any validation.
#[derive(Debug, Clone)]
pub struct RawUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

impl RawUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Rejections for uploaded data. These are always caused by client input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("No file uploaded")]
    NoFileProvided,

    #[error("No file selected")]
    NoFileSelected,

    #[error("File must be CSV format")]
    UnsupportedFormat,

    #[error("Error reading CSV: {0}")]
    ParseError(String),

    #[error("CSV file is empty")]
    EmptyDataset,
}

/// In-memory table parsed from a single upload. Owned by one request.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
}

impl Dataset {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    pub fn row_count(&self) -> usize {
        self.frame.height()
    }

    pub fn column_count(&self) -> usize {
        self.frame.width()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.frame.column(name).is_ok()
    }

    /// Values of `name` as floats. Nulls and non-numeric cells become 0.0.
    pub fn numeric_column(&self, name: &str) -> PolarsResult<Vec<f64>> {
        let series = self
            .frame
            .column(name)?
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        let values = series.f64()?;
        Ok(values.into_iter().map(|v| v.unwrap_or(0.0)).collect())
    }
}
