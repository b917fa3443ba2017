//! Feedback request/response

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::analyze::MAX_MESSAGE_CHARS;

/// Longest label accepted, in characters
pub const MAX_LABEL_CHARS: u64 = 100;

#[derive(Debug, Deserialize, Validate)]
pub struct FeedbackRequest {
    #[validate(length(max = MAX_MESSAGE_CHARS, message = "message is too long"))]
    pub message: String,
    #[validate(length(min = 1, max = MAX_LABEL_CHARS))]
    pub predicted_label: String,
    #[validate(length(min = 1, max = MAX_LABEL_CHARS))]
    pub correct_label: String,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub status: &'static str,
    pub message: &'static str,
}

impl FeedbackResponse {
    pub fn received() -> Self {
        Self {
            status: "success",
            message: "Feedback received. Thank you!",
        }
    }
}
