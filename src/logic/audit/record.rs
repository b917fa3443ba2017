use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::fusion::{Decision, VerdictLabel};

/// One analyzed message
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PredictionRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub input_text: String,
    pub prediction: String,
    /// 0-100, two decimals
    pub confidence: f64,
    pub rule: String,
}

impl PredictionRecord {
    pub fn from_decision(text: &str, decision: &Decision) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            input_text: text.trim().to_string(),
            prediction: decision.label.as_str().to_string(),
            confidence: decision.confidence_percent(),
            rule: decision.rule.clone(),
        }
    }
}

/// User correction of a prediction
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FeedbackRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub input_text: String,
    pub predicted_label: String,
    /// `predicted_label` is one of the labels this service emits
    pub predicted_label_known: bool,
    pub correct_label: String,
}

impl FeedbackRecord {
    pub fn new(text: &str, predicted_label: &str, correct_label: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            input_text: text.trim().to_string(),
            predicted_label: predicted_label.to_string(),
            predicted_label_known: VerdictLabel::from_wire(predicted_label).is_some(),
            correct_label: correct_label.to_string(),
        }
    }
}
