//! Backend commands: ask a question, check availability

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use pulse_core::prompts::{PromptId, PromptLibrary};
use pulse_core::{
    run_analysis_or_fallback, AnalysisRequest, InsightBackend, InsightClient, InsightExtractor,
};
use tracing::debug;

/// Ask the insight backend a question and print the extracted insights
pub async fn cmd_ask(question: &str, data: Option<&Path>, raw: bool) -> Result<()> {
    let data = match data {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("{} is not valid JSON", path.display()))?
        }
        None => serde_json::json!({}),
    };

    let Some(client) = InsightClient::from_env() else {
        bail!(
            "No insight backend configured.\n\
             Set LANGFLOW_WORKSPACE_ID, LANGFLOW_FLOW_ID and LANGFLOW_TOKEN,\n\
             or PULSE_BACKEND=mock for a canned response."
        );
    };

    let mut library = PromptLibrary::new();
    let prompt = library.get(PromptId::AnalysisRequest)?;
    let mut vars = HashMap::new();
    vars.insert("question", question);
    let message = prompt.render_user(&vars);
    debug!("Rendered prompt: {} chars", message.len());

    let request = AnalysisRequest::new(data, message);
    debug!("Sending analysis request to {}", client.host());
    let reply = run_analysis_or_fallback(&client, &request).await;
    debug!("Backend reply: {} chars", reply.len());

    if raw {
        println!("{}", reply);
        return Ok(());
    }

    let extractor = InsightExtractor::new().context("Failed to build extractor")?;
    let record = extractor.extract(&reply);
    println!("{}", serde_json::to_string_pretty(&record)?);

    Ok(())
}

/// Check whether the configured insight backend is reachable
pub async fn cmd_status() -> Result<()> {
    let Some(client) = InsightClient::from_env() else {
        println!("Backend: not configured");
        println!();
        println!("Set LANGFLOW_WORKSPACE_ID, LANGFLOW_FLOW_ID and LANGFLOW_TOKEN,");
        println!("or PULSE_BACKEND=mock for a canned response.");
        return Ok(());
    };

    println!("Backend: {}", client.host());
    if client.health_check().await {
        println!("Health:  ok");
    } else {
        println!("Health:  unreachable");
    }

    Ok(())
}
