use super::{Dataset, LoadError, RawUpload};
use chrono::Local;
use polars::prelude::*;
use std::{io::Cursor, path::PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

const CSV_EXTENSION: &str = ".csv";

/// Validates uploads and turns them into [`Dataset`]s.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    upload_dir: PathBuf,
}

impl DatasetLoader {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    pub async fn load(&self, upload: Option<RawUpload>) -> Result<Dataset, LoadError> {
        let upload = upload.ok_or(LoadError::NoFileProvided)?;

        if upload.file_name.is_empty() {
            return Err(LoadError::NoFileSelected);
        }
        if !upload.file_name.to_lowercase().ends_with(CSV_EXTENSION) {
            return Err(LoadError::UnsupportedFormat);
        }

        // The raw upload is kept even if parsing fails below
        self.archive(&upload).await;

        // Parsing is CPU-bound, keep it off the async workers
        let bytes = upload.bytes.clone();
        let dataset = tokio::task::spawn_blocking(move || parse_csv(&bytes))
            .await
            .map_err(|e| LoadError::ParseError(e.to_string()))??;

        info!(
            "Successfully loaded CSV with {} rows and {} columns",
            dataset.row_count(),
            dataset.column_count()
        );
        debug!("Columns of {}: {:?}", upload.file_name, dataset.column_names());
        Ok(dataset)
    }

    /// Best-effort copy of the upload under a timestamped name.
    async fn archive(&self, upload: &RawUpload) -> Option<PathBuf> {
        let path = self.upload_dir.join(archive_file_name());

        let result = async {
            tokio::fs::create_dir_all(&self.upload_dir).await?;
            tokio::fs::write(&path, &upload.bytes).await
        }
        .await;

        match result {
            Ok(()) => {
                debug!(
                    "Saved upload {} ({} bytes) to {}",
                    upload.file_name,
                    upload.bytes.len(),
                    path.display()
                );
                Some(path)
            }
            Err(e) => {
                warn!("Failed to save upload {}: {}", upload.file_name, e);
                None
            }
        }
    }
}

fn archive_file_name() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "upload_{}_{}.csv",
        Local::now().format("%Y%m%d_%H%M%S"),
        &suffix[..8]
    )
}

/// Parses CSV bytes with a header row. Column types are inferred from
/// every row, so a value that only appears late widens the column.
pub fn parse_csv(bytes: &[u8]) -> Result<Dataset, LoadError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(LoadError::ParseError(
            "No columns to parse from file".to_string(),
        ));
    }

    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|e| LoadError::ParseError(e.to_string()))?;

    let dataset = Dataset::new(frame);
    if dataset.column_count() == 0 {
        return Err(LoadError::ParseError(
            "No columns to parse from file".to_string(),
        ));
    }
    if dataset.row_count() == 0 {
        return Err(LoadError::EmptyDataset);
    }

    Ok(dataset)
}
