//! Offline extraction command

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use pulse_core::InsightExtractor;

/// Extract structured insights from response text in a file or on stdin
pub fn cmd_extract(file: Option<&Path>) -> Result<()> {
    let response = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let extractor = InsightExtractor::new().context("Failed to build extractor")?;
    let record = extractor.extract(&response);
    println!("{}", serde_json::to_string_pretty(&record)?);

    Ok(())
}
