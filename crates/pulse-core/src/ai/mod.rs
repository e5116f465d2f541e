//! Pluggable insight backend abstraction
//!
//! The text-generation service behind the dashboard is an external
//! collaborator: some async call returns a string, possibly empty, possibly
//! an error. This module defines the seam:
//!
//! - `InsightBackend` trait: the interface every backend implements
//! - `InsightClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `LangflowBackend`, `MockBackend`
//!
//! # Configuration
//!
//! Environment variables:
//! - `PULSE_BACKEND`: Backend to use (langflow, mock). Default: langflow
//! - `LANGFLOW_HOST`: Workflow API base URL (default: Astra-hosted Langflow)
//! - `LANGFLOW_WORKSPACE_ID`: Workspace ID (required for langflow backend)
//! - `LANGFLOW_FLOW_ID`: Flow ID (required for langflow backend)
//! - `LANGFLOW_TOKEN`: Bearer token (required for langflow backend)

mod langflow;
mod mock;

pub use langflow::LangflowBackend;
pub use mock::MockBackend;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

/// Sentinel substituted by the calling layer when the backend call fails
///
/// The extractor handles this text like any other ill-formed input: no
/// recognizable headings, so every field degrades to its default.
pub const SERVICE_ERROR_MESSAGE: &str =
    "Uh-oh! There seems to be an error on our side. Please try again later.";

/// Speaker role in the chat history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One prior exchange in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

/// The request envelope sent to the workflow for analysis
///
/// `data` is the dashboard's aggregated post data as an opaque JSON blob;
/// `message` is the rendered prompt (question plus response-format
/// instructions).
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRequest {
    pub data: serde_json::Value,
    pub message: String,
    pub history: Vec<ChatTurn>,
    pub timestamp: DateTime<Utc>,
}

impl AnalysisRequest {
    pub fn new(data: serde_json::Value, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            history: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_history(mut self, history: Vec<ChatTurn>) -> Self {
        self.history = history;
        self
    }
}

/// Trait defining the interface for all insight backends
///
/// Backends should be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait InsightBackend: Send + Sync {
    /// Run an analysis request and return the raw reply text
    async fn run_analysis(&self, request: &AnalysisRequest) -> Result<String>;

    /// Check if the backend is available
    async fn health_check(&self) -> bool;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete insight client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum InsightClient {
    /// Langflow workflow backend (HTTP API)
    Langflow(LangflowBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl InsightClient {
    /// Create an insight client from environment variables
    ///
    /// Checks `PULSE_BACKEND` to determine which backend to use:
    /// - `langflow` (default): Uses LANGFLOW_* variables
    /// - `mock`: Creates a mock backend for testing
    ///
    /// Returns None if the required environment variables are not set.
    pub fn from_env() -> Option<Self> {
        let backend = std::env::var("PULSE_BACKEND").unwrap_or_else(|_| "langflow".to_string());

        match backend.to_lowercase().as_str() {
            "langflow" => LangflowBackend::from_env().map(InsightClient::Langflow),
            "mock" => Some(InsightClient::Mock(MockBackend::new())),
            _ => {
                warn!("Unknown PULSE_BACKEND '{}', falling back to langflow", backend);
                LangflowBackend::from_env().map(InsightClient::Langflow)
            }
        }
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        InsightClient::Mock(MockBackend::new())
    }
}

#[async_trait]
impl InsightBackend for InsightClient {
    async fn run_analysis(&self, request: &AnalysisRequest) -> Result<String> {
        match self {
            InsightClient::Langflow(b) => b.run_analysis(request).await,
            InsightClient::Mock(b) => b.run_analysis(request).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            InsightClient::Langflow(b) => b.health_check().await,
            InsightClient::Mock(b) => b.health_check().await,
        }
    }

    fn host(&self) -> &str {
        match self {
            InsightClient::Langflow(b) => b.host(),
            InsightClient::Mock(b) => b.host(),
        }
    }
}

/// Run an analysis, substituting the error sentinel when the call fails
///
/// The returned string is always safe to hand to the extractor.
pub async fn run_analysis_or_fallback<B>(backend: &B, request: &AnalysisRequest) -> String
where
    B: InsightBackend + ?Sized,
{
    match backend.run_analysis(request).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Insight backend call failed: {}", e);
            SERVICE_ERROR_MESSAGE.to_string()
        }
    }
}
