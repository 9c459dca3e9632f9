use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{convert, files, handlers};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let max_upload_bytes = state.config().server.max_upload_bytes;

    Router::new()
        // Status page doubles as the index; HTML templating is out of scope
        .route("/", get(handlers::status))
        .route("/health", get(handlers::health))
        .route("/status", get(handlers::status))
        .route("/metrics", get(handlers::prometheus_metrics))
        .route("/upload", post(files::upload))
        .route("/convert", post(convert::convert))
        .route("/download/{filename}", get(files::download))
        .route("/cleanup", post(files::cleanup))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(middleware::from_fn(super::middleware::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
