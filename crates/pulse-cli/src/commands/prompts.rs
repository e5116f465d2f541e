//! Prompts-related command implementations

use anyhow::Result;
use pulse_core::prompts::{default_prompts_dir, PromptId, PromptLibrary};

/// List all available prompts and their override status
pub fn cmd_prompts_list() -> Result<()> {
    let mut library = PromptLibrary::new();

    println!("Available Prompts:\n");

    // Header
    println!("{:<25} {:>7}  {}", "ID", "VERSION", "OVERRIDE");
    println!("{}", "-".repeat(45));

    for id in PromptId::all() {
        let prompt = library.get(*id)?;
        let override_status = if prompt.is_override {
            "✓ Custom"
        } else {
            "Default"
        };
        println!(
            "{:<25} {:>7}  {}",
            prompt.metadata.id, prompt.metadata.version, override_status
        );
    }

    println!();
    println!(
        "Override directory: {}",
        default_prompts_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not available)".to_string())
    );

    Ok(())
}

/// Show the content of a specific prompt
pub fn cmd_prompts_show(prompt_id: &str) -> Result<()> {
    let mut library = PromptLibrary::new();

    let id = match prompt_id {
        "analysis_request" => PromptId::AnalysisRequest,
        "initial_overview" => PromptId::InitialOverview,
        _ => {
            eprintln!("Unknown prompt ID: {}", prompt_id);
            eprintln!();
            eprintln!("Available prompts:");
            for id in PromptId::all() {
                eprintln!("  - {}", id.as_str());
            }
            return Ok(());
        }
    };

    let prompt = library.get(id)?;

    println!("Prompt: {}", prompt.metadata.id);
    println!("Version: {}", prompt.metadata.version);
    println!(
        "Source: {}",
        if prompt.is_override {
            "Override"
        } else {
            "Default"
        }
    );

    println!();
    println!("--- Content ---");
    println!("{}", prompt.content);

    Ok(())
}

/// Show the path where prompt overrides should be placed
pub fn cmd_prompts_path() -> Result<()> {
    match default_prompts_dir() {
        Some(path) => {
            println!("{}", path.display());

            if !path.exists() {
                eprintln!();
                eprintln!("Note: This directory does not exist yet.");
                eprintln!("Create it to start adding custom prompts.");
            }
        }
        None => {
            eprintln!("Could not determine prompts directory.");
            eprintln!("The data directory is not available on this system.");
        }
    }

    Ok(())
}
