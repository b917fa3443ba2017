//! Configuration module

use std::env;
use std::path::PathBuf;

use crate::logic::audit::DEFAULT_MAX_FILE_SIZE;
use crate::logic::fusion::{ConfidenceThresholds, Vocabulary, VocabularyError};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Inference endpoint; `None` = model unavailable
    pub classifier_url: Option<String>,

    /// Inference request timeout in seconds
    pub classifier_timeout_secs: u64,

    /// Directory for prediction and feedback logs
    pub log_dir: PathBuf,

    /// Rotate log files at this size
    pub log_max_file_bytes: u64,

    /// Optional JSON vocabulary overriding the built-in lists
    pub vocabulary_path: Option<PathBuf>,

    /// Confidence bucket boundaries
    pub thresholds: ConfidenceThresholds,

    /// "json" or "pretty"
    pub log_format: String,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup (tests pass a map)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            port: non_empty("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),

            classifier_url: non_empty("CLASSIFIER_URL"),

            classifier_timeout_secs: non_empty("CLASSIFIER_TIMEOUT_SECS")
                .and_then(|t| t.parse().ok())
                .unwrap_or(30),

            log_dir: non_empty("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("logs")),

            log_max_file_bytes: non_empty("LOG_MAX_FILE_BYTES")
                .and_then(|b| b.parse().ok())
                .unwrap_or(DEFAULT_MAX_FILE_SIZE),

            vocabulary_path: non_empty("VOCABULARY_PATH").map(PathBuf::from),

            thresholds: thresholds_from(non_empty("CONFIDENCE_HIGH"), non_empty("CONFIDENCE_LOW")),

            log_format: non_empty("LOG_FORMAT").unwrap_or_else(|| "pretty".to_string()),

            environment: non_empty("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }

    /// Vocabulary from `vocabulary_path`, or the built-in lists
    pub fn load_vocabulary(&self) -> Result<Vocabulary, VocabularyError> {
        match &self.vocabulary_path {
            Some(path) => Vocabulary::from_file(path),
            None => Ok(Vocabulary::default()),
        }
    }
}

/// Parsed overrides, falling back to defaults when missing or inconsistent
fn thresholds_from(high: Option<String>, low: Option<String>) -> ConfidenceThresholds {
    let defaults = ConfidenceThresholds::default();
    if high.is_none() && low.is_none() {
        return defaults;
    }

    let parse = |value: Option<String>, fallback: f64| -> Option<f64> {
        match value {
            Some(v) => v.trim().parse().ok(),
            None => Some(fallback),
        }
    };

    match (parse(high, defaults.high), parse(low, defaults.low)) {
        (Some(h), Some(l)) => ConfidenceThresholds::new(h, l).unwrap_or_else(|| {
            tracing::warn!(
                "Ignoring confidence thresholds high={} low={} (need 0 <= low <= high <= 1)",
                h,
                l
            );
            defaults
        }),
        _ => {
            tracing::warn!("Ignoring unparseable confidence thresholds");
            defaults
        }
    }
}
