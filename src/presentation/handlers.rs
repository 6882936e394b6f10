// HTTP request handlers
use crate::infrastructure::http_response::{accepts_brotli, document_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Render the dashboard for one library over the configured catalog
pub async fn get_dashboard(
    Path(library): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let dashboard = match state.dashboard_service.build_dashboard(&library) {
        Ok(dashboard) => dashboard,
        Err(e) => {
            tracing::warn!("Rejected dashboard request for {:?}: {}", library, e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    let document = match state.renderer.render(&dashboard) {
        Ok(document) => document,
        Err(e) => {
            tracing::error!("Error rendering dashboard for {:?}: {:#}", library, e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match document_response(document, state.renderer.content_type(), accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}
