//! HTTP Classifier
//!
//! Calls a text-classification inference endpoint (Hugging Face style):
//! `POST {"inputs": "..."}` → `[{"label": "LABEL_1", "score": 0.97}, ...]`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{validate_output, Classifier, ClassifierError};
use crate::logic::fusion::ModelOutput;

/// Inference endpoint configuration
#[derive(Debug, Clone)]
pub struct HttpClassifierConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct Prediction {
    label: String,
    score: f64,
}

/// The shapes inference servers answer with
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Single(Prediction),
    Flat(Vec<Prediction>),
    Batched(Vec<Vec<Prediction>>),
}

pub struct HttpClassifier {
    config: HttpClassifierConfig,
    http_client: reqwest::Client,
}

impl HttpClassifier {
    pub fn new(config: HttpClassifierConfig) -> Result<Self, ClassifierError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ClassifierError::Network(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    async fn classify(&self, text: &str) -> Result<ModelOutput, ClassifierError> {
        let response = self
            .http_client
            .post(&self.config.endpoint)
            .json(&InferenceRequest { inputs: text })
            .send()
            .await
            .map_err(|e| ClassifierError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Classifier returned {}: {}", status, body);
            return Err(ClassifierError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClassifierError::Network(e.to_string()))?;

        parse_predictions(&body)
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Highest-scoring prediction in an inference response body
fn parse_predictions(body: &str) -> Result<ModelOutput, ClassifierError> {
    let parsed: InferenceResponse =
        serde_json::from_str(body).map_err(|e| ClassifierError::Parse(e.to_string()))?;

    let predictions = match parsed {
        InferenceResponse::Single(prediction) => vec![prediction],
        InferenceResponse::Flat(predictions) => predictions,
        InferenceResponse::Batched(batches) => batches.into_iter().next().unwrap_or_default(),
    };

    let top = predictions
        .into_iter()
        .max_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal))
        .ok_or(ClassifierError::Empty)?;

    validate_output(ModelOutput::new(top.label, top.score))
}

// ============================================================================
// TESTS
// ============================================================================
