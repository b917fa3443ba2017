//! Analyze request/response

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::logic::fusion::Decision;

/// Longest message accepted, in characters
pub const MAX_MESSAGE_CHARS: u64 = 20_000;

#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeRequest {
    #[validate(length(max = MAX_MESSAGE_CHARS, message = "message is too long"))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyzeResponse {
    pub label: String,
    /// 0-100, two decimals
    pub confidence: f64,
    pub explanation: String,
    pub urls: Vec<String>,
    pub domains: Vec<String>,
    pub blacklisted_domains_found: Vec<String>,
    pub trusted_domains_found: Vec<String>,
    pub trigger_keywords_found: Vec<String>,
    pub safe_keywords_found: Vec<String>,
}

impl From<Decision> for AnalyzeResponse {
    fn from(decision: Decision) -> Self {
        let confidence = decision.confidence_percent();
        let signals = decision.signals;

        Self {
            label: decision.label.as_str().to_string(),
            confidence,
            explanation: decision.explanation,
            urls: signals.urls,
            domains: signals.domains,
            blacklisted_domains_found: signals.blacklisted_domains,
            trusted_domains_found: signals.trusted_domains,
            trigger_keywords_found: signals.trigger_keywords,
            safe_keywords_found: signals.safe_keywords,
        }
    }
}
