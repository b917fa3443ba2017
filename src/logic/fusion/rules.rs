//! Fusion Rules & Thresholds
//!
//! Confidence thresholds and the ordered rule list.
//! Each rule is independent; `apply_rules` returns the first one that matches.

use serde::{Deserialize, Serialize};

use super::types::{ModelLabel, SignalSet, Verdict, VerdictLabel};

// ============================================================================
// THRESHOLDS
// ============================================================================

/// At or above this confidence = high bucket
pub const CONFIDENCE_HIGH: f64 = 0.85;

/// At or above this confidence = moderate bucket, below = low
pub const CONFIDENCE_LOW: f64 = 0.60;

/// Confidence bucket boundaries (configurable)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceThresholds {
    pub high: f64,
    pub low: f64,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: CONFIDENCE_HIGH,
            low: CONFIDENCE_LOW,
        }
    }
}

impl ConfidenceThresholds {
    /// Both in [0, 1] and low <= high
    pub fn new(high: f64, low: f64) -> Option<Self> {
        let in_range = |v: f64| (0.0..=1.0).contains(&v);
        if in_range(high) && in_range(low) && low <= high {
            Some(Self { high, low })
        } else {
            None
        }
    }

    pub fn bucket(&self, confidence: f64) -> ConfidenceBucket {
        if confidence >= self.high {
            ConfidenceBucket::High
        } else if confidence >= self.low {
            ConfidenceBucket::Moderate
        } else {
            ConfidenceBucket::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBucket {
    High,
    Moderate,
    Low,
}

// ============================================================================
// EXPLANATIONS
// ============================================================================

pub const EXPLAIN_MALICIOUS_DOMAIN: &str =
    "⚠️ Message contains suspicious URLs from known malicious domains.";
pub const EXPLAIN_UNTRUSTED_DOMAIN: &str =
    "🟡 Message contains URLs from unknown or untrusted domains.";
pub const EXPLAIN_PHISHING_PATTERN: &str =
    "⚠️ This message contains urgency, impersonation, or phishing patterns.";
pub const EXPLAIN_MIXED_SIGNALS: &str =
    "🟡 Mixed signals. Looks suspicious, but confidence is moderate.";
pub const EXPLAIN_TRIGGERS_LOW_CONFIDENCE: &str =
    "ℹ️ Might be safe, but contains trigger words. Review carefully.";
pub const EXPLAIN_SAFE_KEYWORD_OVERRIDE: &str =
    "ℹ️ Safe keywords detected (e.g., 'amazon.com'), but urgency patterns exist.";
pub const EXPLAIN_ROUTINE: &str =
    "✅ This message appears routine and lacks phishing characteristics.";
pub const EXPLAIN_MODEL_UNSURE: &str = "🟡 Model is unsure. It might be okay, but use caution.";
pub const EXPLAIN_LOW_SAFETY_CONFIDENCE: &str = "ℹ️ Model has low confidence in safety.";
pub const EXPLAIN_UNCLASSIFIABLE: &str = "ℹ️ Unable to confidently classify this message.";
pub const EXPLAIN_UNAVAILABLE: &str = "⚠️ No message or model unavailable. Please try again later.";

// ============================================================================
// RULE CONTEXT
// ============================================================================

/// Everything a rule may look at
#[derive(Debug, Clone)]
pub struct RuleContext<'a> {
    pub signals: &'a SignalSet,
    pub model_label: ModelLabel,
    pub confidence: f64,
    pub thresholds: ConfidenceThresholds,
}

impl RuleContext<'_> {
    pub fn bucket(&self) -> ConfidenceBucket {
        self.thresholds.bucket(self.confidence)
    }
}

// ============================================================================
// FUSION RULE TRAIT
// ============================================================================

/// One step of the precedence list
pub trait FusionRule: Send + Sync {
    fn name(&self) -> &'static str;
    /// `None` = rule does not apply, fall through to the next one
    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Verdict>;
}

// ============================================================================
// BUILT-IN RULES
// ============================================================================

/// Any extracted domain is blacklisted
pub struct BlacklistedDomainRule;

impl FusionRule for BlacklistedDomainRule {
    fn name(&self) -> &'static str {
        "blacklisted_domain"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Verdict> {
        ctx.signals
            .has_blacklisted_domain()
            .then(|| Verdict::new(VerdictLabel::Phishing, EXPLAIN_MALICIOUS_DOMAIN))
    }
}

/// At least one domain, and not all of them trusted
pub struct UntrustedDomainRule;

impl FusionRule for UntrustedDomainRule {
    fn name(&self) -> &'static str {
        "untrusted_domain"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Verdict> {
        (ctx.signals.has_domains() && !ctx.signals.all_domains_trusted()).then(|| {
            Verdict::new(VerdictLabel::PossiblySafeDoubleCheck, EXPLAIN_UNTRUSTED_DOMAIN)
        })
    }
}

/// Model says phishing-like, or a trigger phrase is present
pub struct PhishingSignalRule;

impl PhishingSignalRule {
    fn tiered(bucket: ConfidenceBucket) -> Verdict {
        match bucket {
            ConfidenceBucket::High => Verdict::new(VerdictLabel::Phishing, EXPLAIN_PHISHING_PATTERN),
            ConfidenceBucket::Moderate => {
                Verdict::new(VerdictLabel::PossiblySafeDoubleCheck, EXPLAIN_MIXED_SIGNALS)
            }
            ConfidenceBucket::Low => {
                Verdict::new(VerdictLabel::PossiblySafe, EXPLAIN_TRIGGERS_LOW_CONFIDENCE)
            }
        }
    }

    /// Safe phrases win over every confidence tier
    fn safe_keyword_override(ctx: &RuleContext<'_>, tiered: Verdict) -> Verdict {
        if ctx.signals.has_safe_keywords() {
            Verdict::new(VerdictLabel::PossiblySafe, EXPLAIN_SAFE_KEYWORD_OVERRIDE)
        } else {
            tiered
        }
    }
}

impl FusionRule for PhishingSignalRule {
    fn name(&self) -> &'static str {
        "phishing_signal"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Verdict> {
        let applies =
            ctx.model_label == ModelLabel::PhishingLike || ctx.signals.has_trigger_keywords();
        if !applies {
            return None;
        }
        Some(Self::safe_keyword_override(ctx, Self::tiered(ctx.bucket())))
    }
}

/// Model says benign (and nothing above fired)
pub struct BenignModelRule;

impl FusionRule for BenignModelRule {
    fn name(&self) -> &'static str {
        "benign_model"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Verdict> {
        if ctx.model_label != ModelLabel::Benign {
            return None;
        }
        Some(match ctx.bucket() {
            ConfidenceBucket::High => Verdict::new(VerdictLabel::NotPhishing, EXPLAIN_ROUTINE),
            ConfidenceBucket::Moderate => {
                Verdict::new(VerdictLabel::PossiblySafeDoubleCheck, EXPLAIN_MODEL_UNSURE)
            }
            ConfidenceBucket::Low => {
                Verdict::new(VerdictLabel::PossiblySafe, EXPLAIN_LOW_SAFETY_CONFIDENCE)
            }
        })
    }
}

/// Catch-all; always matches
pub struct UnrecognizedLabelRule;

impl FusionRule for UnrecognizedLabelRule {
    fn name(&self) -> &'static str {
        "unrecognized_label"
    }

    fn evaluate(&self, _ctx: &RuleContext<'_>) -> Option<Verdict> {
        Some(Verdict::new(VerdictLabel::Unknown, EXPLAIN_UNCLASSIFIABLE))
    }
}

// ============================================================================
// RULE ENGINE
// ============================================================================

/// Precedence order, top to bottom
pub fn default_rules() -> Vec<Box<dyn FusionRule>> {
    vec![
        Box::new(BlacklistedDomainRule),
        Box::new(UntrustedDomainRule),
        Box::new(PhishingSignalRule),
        Box::new(BenignModelRule),
        Box::new(UnrecognizedLabelRule),
    ]
}

/// First matching rule wins. Falls back to Unknown if the list has no catch-all.
pub fn apply_rules(rules: &[Box<dyn FusionRule>], ctx: &RuleContext<'_>) -> (&'static str, Verdict) {
    rules
        .iter()
        .find_map(|rule| rule.evaluate(ctx).map(|verdict| (rule.name(), verdict)))
        .unwrap_or((
            UnrecognizedLabelRule.name(),
            Verdict::new(VerdictLabel::Unknown, EXPLAIN_UNCLASSIFIABLE),
        ))
}

// ============================================================================
// TESTS
// ============================================================================
