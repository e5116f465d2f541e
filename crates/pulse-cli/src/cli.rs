//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pulse - Turn AI analysis replies into structured insights
#[derive(Parser)]
#[command(name = "pulse")]
#[command(about = "Social-media insight dashboard toolkit", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract structured insights from a free-text response
    Extract {
        /// File containing the response text (reads stdin if omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Ask the insight backend a question about your post data
    Ask {
        /// The question to analyze
        question: String,

        /// JSON file with aggregated post data to send along
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Print the raw backend reply instead of extracted insights
        #[arg(long)]
        raw: bool,
    },

    /// Check insight backend availability
    Status,

    /// Manage the prompt library
    Prompts {
        #[command(subcommand)]
        action: Option<PromptsAction>,
    },

    /// Show the extraction vocabulary (headings and labels)
    Vocabulary,
}

#[derive(Subcommand)]
pub enum PromptsAction {
    /// List all available prompts and their override status
    List,

    /// Show the content of a specific prompt
    Show {
        /// Prompt ID (e.g. analysis_request)
        id: String,
    },

    /// Show the prompt override directory path
    Path,
}
