//! Fusion Types
//!
//! Core types for decision fusion.
//! No logic here beyond small conversions - data structures only.

use serde::{Deserialize, Serialize};

// ============================================================================
// VERDICT LABELS
// ============================================================================

/// Final label of a fused decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerdictLabel {
    Phishing,
    PossiblySafeDoubleCheck,
    PossiblySafe,
    NotPhishing,
    Unknown,
    Error,
}

impl VerdictLabel {
    /// Wire form, shared with the web frontend
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictLabel::Phishing => "Phishing - Look out!",
            VerdictLabel::PossiblySafeDoubleCheck => "Possibly Safe - Double check!",
            VerdictLabel::PossiblySafe => "Possibly Safe",
            VerdictLabel::NotPhishing => "Not Phishing - Safe :)",
            VerdictLabel::Unknown => "Unknown",
            VerdictLabel::Error => "Error",
        }
    }

    /// Parse the wire form back (feedback payloads echo it)
    pub fn from_wire(value: &str) -> Option<Self> {
        [
            VerdictLabel::Phishing,
            VerdictLabel::PossiblySafeDoubleCheck,
            VerdictLabel::PossiblySafe,
            VerdictLabel::NotPhishing,
            VerdictLabel::Unknown,
            VerdictLabel::Error,
        ]
        .into_iter()
        .find(|label| label.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl std::fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// MODEL OUTPUT (from the classifier)
// ============================================================================

/// What the model's label token means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelLabel {
    /// "label_0"
    Benign,
    /// "label_1"
    PhishingLike,
    /// Anything else the model emitted
    Unrecognized(String),
}

impl ModelLabel {
    pub fn from_token(token: &str) -> Self {
        let lowered = token.trim().to_lowercase();
        match lowered.as_str() {
            "label_0" => ModelLabel::Benign,
            "label_1" => ModelLabel::PhishingLike,
            _ => ModelLabel::Unrecognized(lowered),
        }
    }
}

/// Raw classifier output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOutput {
    /// Label token as emitted by the model
    pub label: String,
    /// Confidence of that label (0.0 - 1.0)
    pub confidence: f64,
}

impl ModelOutput {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }

    pub fn model_label(&self) -> ModelLabel {
        ModelLabel::from_token(&self.label)
    }
}

// ============================================================================
// SIGNAL SET (from the extractor)
// ============================================================================

/// Deterministic signals pulled out of the message text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSet {
    /// URLs in order of appearance, duplicates kept
    pub urls: Vec<String>,
    /// One domain per URL, empty when the URL could not be parsed
    pub domains: Vec<String>,
    /// Domains that are on the blacklist, in `domains` order
    pub blacklisted_domains: Vec<String>,
    /// Domains that are on the trusted list, in `domains` order
    pub trusted_domains: Vec<String>,
    /// Trigger phrases found, in vocabulary order
    pub trigger_keywords: Vec<String>,
    /// Safe phrases found, in vocabulary order
    pub safe_keywords: Vec<String>,
}

impl SignalSet {
    pub fn has_domains(&self) -> bool {
        !self.domains.is_empty()
    }

    pub fn has_blacklisted_domain(&self) -> bool {
        !self.blacklisted_domains.is_empty()
    }

    /// Vacuously true when no domains were extracted
    pub fn all_domains_trusted(&self) -> bool {
        self.trusted_domains.len() == self.domains.len()
    }

    pub fn has_trigger_keywords(&self) -> bool {
        !self.trigger_keywords.is_empty()
    }

    pub fn has_safe_keywords(&self) -> bool {
        !self.safe_keywords.is_empty()
    }
}

// ============================================================================
// DECISION
// ============================================================================

/// Label + explanation produced by a single rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub label: VerdictLabel,
    pub explanation: &'static str,
}

impl Verdict {
    pub const fn new(label: VerdictLabel, explanation: &'static str) -> Self {
        Self { label, explanation }
    }
}

/// Fused decision, always carrying the signals it was derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub label: VerdictLabel,
    /// Model confidence (0.0 - 1.0), 0 for short-circuit and error outcomes
    pub confidence: f64,
    pub explanation: String,
    /// Name of the rule that produced the label
    pub rule: String,
    pub signals: SignalSet,
}

impl Decision {
    /// Confidence on the 0-100 scale, rounded to two decimals.
    /// Rounds the exact binary value of `confidence * 100`, so 29.345 (stored
    /// as 29.3449...) becomes 29.34.
    pub fn confidence_percent(&self) -> f64 {
        let scaled = self.confidence * 100.0;
        format!("{:.2}", scaled).parse().unwrap_or(scaled)
    }
}

// ============================================================================
// OUTCOME
// ============================================================================

/// Why the fuser short-circuited without running any rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegradedReason {
    EmptyText,
    ClassifierUnavailable,
}

impl DegradedReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DegradedReason::EmptyText => "empty_text",
            DegradedReason::ClassifierUnavailable => "classifier_unavailable",
        }
    }
}

/// Result of analyzing one message
#[derive(Debug, Clone, PartialEq)]
pub enum FusionOutcome {
    /// Rules ran and produced a decision
    Decided(Decision),
    /// No text or no classifier: fixed Unknown decision
    Degraded {
        reason: DegradedReason,
        decision: Decision,
    },
    /// The classifier failed: Error decision with the message embedded
    Failed { error: String, decision: Decision },
}

impl FusionOutcome {
    pub fn decision(&self) -> &Decision {
        match self {
            FusionOutcome::Decided(decision) => decision,
            FusionOutcome::Degraded { decision, .. } => decision,
            FusionOutcome::Failed { decision, .. } => decision,
        }
    }

    pub fn into_decision(self) -> Decision {
        match self {
            FusionOutcome::Decided(decision) => decision,
            FusionOutcome::Degraded { decision, .. } => decision,
            FusionOutcome::Failed { decision, .. } => decision,
        }
    }

    pub fn is_decided(&self) -> bool {
        matches!(self, FusionOutcome::Decided(_))
    }
}

// ============================================================================
// TESTS
// ============================================================================
