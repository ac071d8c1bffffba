pub mod handlers;
pub mod types;

use crate::{
    Result, bootstrap, config::Config, dataset::DatasetLoader, service::PredictionService,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use handlers::{AppState, HEALTH_PATH, MODEL_INFO_PATH, PREDICT_PATH, UPLOAD_MODEL_PATH};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(HEALTH_PATH, get(handlers::health))
        .route(MODEL_INFO_PATH, get(handlers::model_info))
        .route(PREDICT_PATH, post(handlers::predict))
        .route(UPLOAD_MODEL_PATH, post(handlers::upload_model))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let runtime = bootstrap::initialize(&config.storage).await?;

    // Create application state
    let service = PredictionService::new(
        DatasetLoader::new(&config.storage.upload_dir),
        runtime.predictors,
        runtime.metadata.clone(),
    );
    let app_state = AppState {
        service,
        metadata: runtime.metadata,
    };

    let app = create_router(app_state, config.server.max_upload_bytes);

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);
    info!("Health check: http://{}{}", addr, HEALTH_PATH);
    info!("Model info: http://{}{}", addr, MODEL_INFO_PATH);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
