//! Core library for Pulse, a social-media insight dashboard backend.
//!
//! This crate provides:
//! - Structured insight types (`models`)
//! - Best-effort extraction of structured insights from free-text AI
//!   responses (`extract`)
//! - Pluggable insight backends for running analyses (`ai`)
//! - The prompt library the backends are driven with (`prompts`)
//! - Error types (`error`)

pub mod ai;
pub mod error;
pub mod extract;
pub mod models;
pub mod prompts;

// Re-export commonly used types
pub use ai::{
    run_analysis_or_fallback, AnalysisRequest, ChatTurn, InsightBackend, InsightClient,
    LangflowBackend, MockBackend, Role, SERVICE_ERROR_MESSAGE,
};
pub use error::{Error, Result};
pub use extract::{FieldId, InsightExtractor, SectionId, Vocabulary};
pub use models::{EngagementMetrics, InsightRecord, PredictedMetrics, Recommendations};
pub use prompts::{Prompt, PromptId, PromptLibrary};
