//! Decision Fuser
//!
//! Only the fusion logic lives here - no types, no transport.
//! Input: message text + model output (or a classifier to get one)
//! Output: Decision / FusionOutcome

use std::sync::Arc;

use super::rules::{
    apply_rules, default_rules, ConfidenceThresholds, FusionRule, RuleContext, EXPLAIN_UNAVAILABLE,
};
use super::signals::extract_signals;
use super::types::{Decision, DegradedReason, FusionOutcome, ModelOutput, SignalSet, VerdictLabel};
use super::vocabulary::Vocabulary;
use crate::logic::classifier::{validate_output, Classifier};

/// Rule name recorded on short-circuit decisions
const RULE_SHORT_CIRCUIT: &str = "short_circuit";
/// Rule name recorded on error decisions
const RULE_ERROR: &str = "error";

/// Stateless fuser; cheap to share behind an `Arc`
pub struct Fuser {
    vocabulary: Arc<Vocabulary>,
    thresholds: ConfidenceThresholds,
    rules: Vec<Box<dyn FusionRule>>,
}

impl Default for Fuser {
    fn default() -> Self {
        Self::new(Arc::new(Vocabulary::default()), ConfidenceThresholds::default())
    }
}

impl Fuser {
    pub fn new(vocabulary: Arc<Vocabulary>, thresholds: ConfidenceThresholds) -> Self {
        Self {
            vocabulary,
            thresholds,
            rules: default_rules(),
        }
    }

    /// Replace the rule list (order = precedence)
    pub fn with_rules(mut self, rules: Vec<Box<dyn FusionRule>>) -> Self {
        self.rules = rules;
        self
    }

    /// Run the rules on already-classified text
    pub fn fuse(&self, text: &str, model: &ModelOutput) -> Decision {
        let signals = extract_signals(text, &self.vocabulary);

        let ctx = RuleContext {
            signals: &signals,
            model_label: model.model_label(),
            confidence: model.confidence,
            thresholds: self.thresholds,
        };
        let (rule, verdict) = apply_rules(&self.rules, &ctx);

        tracing::debug!(
            rule,
            label = verdict.label.as_str(),
            confidence = model.confidence,
            urls = signals.urls.len(),
            triggers = signals.trigger_keywords.len(),
            safe = signals.safe_keywords.len(),
            "Message fused"
        );

        Decision {
            label: verdict.label,
            confidence: model.confidence,
            explanation: verdict.explanation.to_string(),
            rule: rule.to_string(),
            signals,
        }
    }

    /// Full pipeline: short-circuit checks, classifier call, rules
    pub async fn analyze(&self, text: &str, classifier: Option<&dyn Classifier>) -> FusionOutcome {
        let text = text.trim();

        if text.is_empty() {
            return degraded(DegradedReason::EmptyText);
        }
        let Some(classifier) = classifier else {
            return degraded(DegradedReason::ClassifierUnavailable);
        };

        let model = match classifier.classify(text).await.and_then(validate_output) {
            Ok(model) => model,
            Err(e) => {
                tracing::error!("Classifier '{}' failed: {}", classifier.name(), e);
                return failed(e.to_string());
            }
        };

        FusionOutcome::Decided(self.fuse(text, &model))
    }
}

fn degraded(reason: DegradedReason) -> FusionOutcome {
    tracing::debug!("Analysis short-circuited: {}", reason.as_str());
    FusionOutcome::Degraded {
        reason,
        decision: Decision {
            label: VerdictLabel::Unknown,
            confidence: 0.0,
            explanation: EXPLAIN_UNAVAILABLE.to_string(),
            rule: RULE_SHORT_CIRCUIT.to_string(),
            signals: SignalSet::default(),
        },
    }
}

fn failed(error: String) -> FusionOutcome {
    FusionOutcome::Failed {
        decision: Decision {
            label: VerdictLabel::Error,
            confidence: 0.0,
            explanation: format!("❌ Internal error: {}", error),
            rule: RULE_ERROR.to_string(),
            signals: SignalSet::default(),
        },
        error,
    }
}
