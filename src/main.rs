//! PhishSnitch API Server
//!
//! Classifies messages as phishing or safe by fusing a text-classification
//! model's output with URL and keyword rules.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                        PHISHSNITCH                         │
//! ├────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌──────────────────┐   ┌───────────────┐  │
//! │  │  API      │──▶│  Decision Fuser  │──▶│  Classifier   │  │
//! │  │  (Axum)   │   │  signals + rules │   │  (HTTP model) │  │
//! │  └─────┬─────┘   └──────────────────┘   └───────────────┘  │
//! │        ▼                                                   │
//! │  ┌──────────────────────────────┐                          │
//! │  │ Append-only logs (JSONL)     │                          │
//! │  │ predictions / feedback       │                          │
//! │  └──────────────────────────────┘                          │
//! └────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod logic;
mod models;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

use logic::audit::{
    AuditLog, FeedbackRecord, PredictionRecord, FEEDBACK_LOG_STEM, PREDICTION_LOG_STEM,
};
use logic::classifier::{Classifier, HttpClassifier, HttpClassifierConfig};
use logic::fusion::Fuser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    let default_filter = if config.is_production() {
        "phishsnitch=info,tower_http=info"
    } else {
        "phishsnitch=debug,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());
    if config.json_logs() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("PhishSnitch server starting ({})...", config.environment);

    // Vocabulary
    let vocabulary = config
        .load_vocabulary()
        .context("Failed to load vocabulary")?;
    for overlap in vocabulary.overlaps() {
        tracing::warn!(
            "'{}' is in both {} and {}; it also matches as a plain keyword",
            overlap.entry,
            overlap.domain_list,
            overlap.keyword_list
        );
    }
    let fuser = Fuser::new(Arc::new(vocabulary), config.thresholds);

    // Classifier
    let classifier = build_classifier(&config);

    // Append-only logs
    let prediction_log: AuditLog<PredictionRecord> =
        AuditLog::open(&config.log_dir, PREDICTION_LOG_STEM, config.log_max_file_bytes)
            .context("Failed to open prediction log")?;
    let feedback_log: AuditLog<FeedbackRecord> =
        AuditLog::open(&config.log_dir, FEEDBACK_LOG_STEM, config.log_max_file_bytes)
            .context("Failed to open feedback log")?;
    if let Ok(stats) = prediction_log.stats() {
        tracing::info!(
            "Logs in {}: {} prediction file(s), {} bytes",
            prediction_log.base_dir().display(),
            stats.total_files,
            stats.total_size_bytes
        );
    }

    // Build application state
    let state = AppState {
        fuser: Arc::new(fuser),
        classifier,
        prediction_log: Arc::new(prediction_log),
        feedback_log: Arc::new(feedback_log),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// HTTP classifier when configured; `None` means every request short-circuits
fn build_classifier(config: &config::Config) -> Option<Arc<dyn Classifier>> {
    let Some(endpoint) = config.classifier_url.clone() else {
        tracing::warn!("CLASSIFIER_URL not set - model unavailable, all messages will be Unknown");
        return None;
    };

    match HttpClassifier::new(HttpClassifierConfig {
        endpoint,
        timeout_seconds: config.classifier_timeout_secs,
    }) {
        Ok(classifier) => {
            tracing::info!("Classifier endpoint: {}", classifier.endpoint());
            Some(Arc::new(classifier))
        }
        Err(e) => {
            tracing::error!("Failed to create classifier: {} - model unavailable", e);
            None
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub fuser: Arc<Fuser>,
    pub classifier: Option<Arc<dyn Classifier>>,
    pub prediction_log: Arc<AuditLog<PredictionRecord>>,
    pub feedback_log: Arc<AuditLog<FeedbackRecord>>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/analyze", post(handlers::analyze::analyze))
        .route("/feedback", post(handlers::feedback::submit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
