//! Classifier Module
//!
//! Seam to the pretrained text-classification model.
//! The fuser only sees `(label token, confidence)`; where it comes from is up to the implementation.
//!
//! ## Structure
//! - `http`: classifier served by an inference endpoint

pub mod http;

use async_trait::async_trait;

use crate::logic::fusion::ModelOutput;

pub use http::{HttpClassifier, HttpClassifierConfig};

/// Errors a classifier can raise for a single request
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("network error: {0}")]
    Network(String),

    #[error("classifier returned HTTP {0}")]
    Status(u16),

    #[error("malformed classifier response: {0}")]
    Parse(String),

    #[error("classifier returned no predictions")]
    Empty,

    #[error("classifier score {0} is outside [0, 1]")]
    InvalidScore(f64),
}

/// Text classification model, shared read-only across requests
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Top prediction for `text`
    async fn classify(&self, text: &str) -> Result<ModelOutput, ClassifierError>;

    /// Name for logs and the health endpoint
    fn name(&self) -> &str;
}

/// Reject scores the fuser cannot bucket
pub fn validate_output(output: ModelOutput) -> Result<ModelOutput, ClassifierError> {
    if output.confidence.is_finite() && (0.0..=1.0).contains(&output.confidence) {
        Ok(output)
    } else {
        Err(ClassifierError::InvalidScore(output.confidence))
    }
}
