use super::infra::AppState;
use crate::crosscheck::{ValidationReportView, ValidationRequest};
use crate::error::AppError;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde_json::json;
use std::sync::atomic::Ordering;

/// Routes served by the HTTP service. Callers layer an [`Extension`] carrying the app state.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/validate", post(validate_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn validate_endpoint(
    Extension(state): Extension<AppState>,
    Json(request): Json<ValidationRequest>,
) -> Result<Json<ValidationReportView>, AppError> {
    let engine = state.engine.clone();
    let inputs = request.into_inputs();
    let report = tokio::task::spawn_blocking(move || engine.validate_inputs(&inputs)).await?;
    Ok(Json(report.to_view()))
}
