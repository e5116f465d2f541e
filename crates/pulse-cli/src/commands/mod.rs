//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `ask` - Backend commands (ask a question, check status)
//! - `extract` - Offline extraction from saved response text
//! - `prompts` - Prompt library management commands
//! - `vocabulary` - Extraction vocabulary inspection

pub mod ask;
pub mod extract;
pub mod prompts;
pub mod vocabulary;

// Re-export command functions for main.rs
pub use ask::*;
pub use extract::*;
pub use prompts::*;
pub use vocabulary::*;
