//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    message: &'static str,
    version: &'static str,
    timestamp: i64,
    classifier_available: bool,
    predictions_logged: u64,
    feedback_logged: u64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "PhishSnitch API is running.",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        classifier_available: state.classifier.is_some(),
        predictions_logged: state.prediction_log.records_appended(),
        feedback_logged: state.feedback_log.records_appended(),
    })
}
