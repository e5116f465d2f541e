//! Pulse CLI - Social-media insight dashboard toolkit
//!
//! Usage:
//!   pulse extract --file reply.txt   Extract structured insights from saved text
//!   pulse ask "how are my posts?"    Query the insight backend
//!   pulse status                     Check backend availability
//!   pulse vocabulary                 Show the extraction vocabulary

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Extract { file } => commands::cmd_extract(file.as_deref()),
        Commands::Ask {
            question,
            data,
            raw,
        } => commands::cmd_ask(&question, data.as_deref(), raw).await,
        Commands::Status => commands::cmd_status().await,
        Commands::Prompts { action } => match action {
            None | Some(PromptsAction::List) => commands::cmd_prompts_list(),
            Some(PromptsAction::Show { id }) => commands::cmd_prompts_show(&id),
            Some(PromptsAction::Path) => commands::cmd_prompts_path(),
        },
        Commands::Vocabulary => commands::cmd_vocabulary(),
    }
}
