//! Feedback handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use validator::Validate;

use crate::logic::audit::FeedbackRecord;
use crate::models::{FeedbackRequest, FeedbackResponse};
use crate::{AppResult, AppState};

/// Record a user correction
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> AppResult<Json<FeedbackResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let record = FeedbackRecord::new(&req.message, &req.predicted_label, &req.correct_label);
    let known = record.predicted_label_known;
    state.feedback_log.clone().append_async(record).await?;

    tracing::info!(
        predicted = req.predicted_label.as_str(),
        known,
        correct = req.correct_label.as_str(),
        "Feedback recorded"
    );

    Ok(Json(FeedbackResponse::received()))
}
