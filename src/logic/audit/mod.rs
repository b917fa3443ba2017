//! Audit Module - append-only prediction and feedback logs
//!
//! One JSON line per record, automatic size-based rotation.
//! Prediction logging is fire-and-forget: a failed write never changes a decision.

pub mod record;
pub mod writer;

#[cfg(test)]
mod tests;

pub use record::{FeedbackRecord, PredictionRecord};
pub use writer::{AuditLog, DEFAULT_MAX_FILE_SIZE};

use std::sync::Arc;

use crate::logic::fusion::Decision;

pub const PREDICTION_LOG_STEM: &str = "predictions";
pub const FEEDBACK_LOG_STEM: &str = "feedback";

/// Log a decided prediction; errors are reported, not returned
pub async fn record_prediction(
    log: &Arc<AuditLog<PredictionRecord>>,
    text: &str,
    decision: &Decision,
) {
    let record = PredictionRecord::from_decision(text, decision);
    if let Err(e) = Arc::clone(log).append_async(record).await {
        tracing::error!("Failed to append to prediction log: {}", e);
    }
}
