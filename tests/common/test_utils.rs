use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use serde_json::Value;
use std::sync::Arc;
use tabular_inference::{
    bootstrap,
    config::StorageConfig,
    dataset::DatasetLoader,
    metadata::MetadataStore,
    predictor::PredictorSlot,
    server::{create_router, handlers::AppState},
    service::PredictionService,
};
use tempfile::TempDir;

pub const BOUNDARY: &str = "----tabular-inference-test-boundary";

const MAX_UPLOAD_BYTES: usize = 1024 * 1024;

/// Storage rooted in a temporary directory
pub fn test_storage(dir: &TempDir) -> StorageConfig {
    StorageConfig {
        upload_dir: dir.path().join("uploads"),
        model_dir: dir.path().join("trained_model"),
        ..StorageConfig::default()
    }
}

/// Boots the full application the same way `server::run` does
pub async fn create_test_app() -> (Router, Arc<MetadataStore>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let storage = test_storage(&temp_dir);

    let runtime = bootstrap::initialize(&storage).await.unwrap();
    let app = app_with(&storage, runtime.predictors, Arc::clone(&runtime.metadata));

    (app, runtime.metadata, temp_dir)
}

/// Router over an explicit predictor slot and metadata store
pub fn app_with(
    storage: &StorageConfig,
    predictors: PredictorSlot,
    metadata: Arc<MetadataStore>,
) -> Router {
    let service = PredictionService::new(
        DatasetLoader::new(&storage.upload_dir),
        predictors,
        Arc::clone(&metadata),
    );
    create_router(AppState { service, metadata }, MAX_UPLOAD_BYTES)
}

/// A multipart part: (field name, optional file name, content)
pub type Part<'a> = (&'a str, Option<&'a str>, &'a [u8]);

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file_name, content) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                     Content-Type: text/csv\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            ),
        }
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn upload_request(file_name: &str, content: &str) -> Request<Body> {
    multipart_request(&[("file", Some(file_name), content.as_bytes())])
}

pub fn multipart_request(parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/predict")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).expect("response body is not JSON")
}

/// CSV with the given header and `rows` numbered data rows
pub fn numbered_csv(header: &str, rows: usize) -> String {
    let columns = header.split(',').count();
    let mut csv = format!("{header}\n");
    for row in 0..rows {
        let cells: Vec<String> = (0..columns).map(|c| (row * columns + c).to_string()).collect();
        csv.push_str(&cells.join(","));
        csv.push('\n');
    }
    csv
}

/// Integer `id,score` CSV whose final score cell is replaced by `late_value`
pub fn late_change_csv(rows: usize, late_value: &str) -> String {
    let mut csv = String::from("id,score\n");
    for row in 0..rows {
        let score = if row + 1 == rows {
            late_value.to_string()
        } else {
            (row * 3).to_string()
        };
        csv.push_str(&format!("{row},{score}\n"));
    }
    csv
}

/// Three-column numeric CSV of at least `min_bytes`, with its row count
pub fn sized_csv(min_bytes: usize) -> (String, usize) {
    let mut csv = String::from("x,y,z\n");
    let mut rows = 0;
    while csv.len() < min_bytes {
        csv.push_str(&format!("{rows},{},{}.5\n", rows * 2, rows % 97));
        rows += 1;
    }
    (csv, rows)
}
