//! Analyze handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use validator::Validate;

use crate::logic::audit::record_prediction;
use crate::logic::fusion::FusionOutcome;
use crate::models::{AnalyzeRequest, AnalyzeResponse};
use crate::{AppResult, AppState};

/// Classify a message
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> AppResult<Json<AnalyzeResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let outcome = state
        .fuser
        .analyze(&req.message, state.classifier.as_deref())
        .await;

    match &outcome {
        FusionOutcome::Decided(decision) => {
            tracing::info!(
                label = decision.label.as_str(),
                rule = decision.rule.as_str(),
                "Message analyzed"
            );
            record_prediction(&state.prediction_log, &req.message, decision).await;
        }
        FusionOutcome::Degraded { reason, .. } => {
            tracing::info!("Analysis degraded: {}", reason.as_str());
        }
        FusionOutcome::Failed { error, .. } => {
            tracing::warn!("Analysis failed: {}", error);
        }
    }

    Ok(Json(outcome.into_decision().into()))
}
