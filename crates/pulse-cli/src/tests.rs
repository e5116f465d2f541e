//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands;

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_extract_with_file() {
    let cli = Cli::parse_from(["pulse", "extract", "--file", "reply.txt"]);
    match cli.command {
        Commands::Extract { file } => {
            assert_eq!(file.unwrap().to_str(), Some("reply.txt"));
        }
        _ => panic!("expected extract command"),
    }
}

#[test]
fn test_parse_ask_defaults() {
    let cli = Cli::parse_from(["pulse", "ask", "how are my posts doing?"]);
    match cli.command {
        Commands::Ask {
            question,
            data,
            raw,
        } => {
            assert_eq!(question, "how are my posts doing?");
            assert!(data.is_none());
            assert!(!raw);
        }
        _ => panic!("expected ask command"),
    }
}

#[test]
fn test_parse_verbose_is_global() {
    let cli = Cli::parse_from(["pulse", "status", "--verbose"]);
    assert!(cli.verbose);
}

// ========== Command Tests ==========

#[test]
fn test_cmd_extract_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reply.txt");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "### Metrics\n- **Likes:** 42").unwrap();

    let result = commands::cmd_extract(Some(&path));
    assert!(result.is_ok());
}

#[test]
fn test_cmd_extract_missing_file() {
    let result = commands::cmd_extract(Some(std::path::Path::new("/no/such/file.txt")));
    assert!(result.is_err());
}

#[tokio::test]
async fn test_cmd_ask_with_mock_backend() {
    std::env::set_var("PULSE_BACKEND", "mock");
    let result = commands::cmd_ask("how are my posts doing?", None, false).await;
    assert!(result.is_ok());
}

#[test]
fn test_cmd_vocabulary() {
    let result = commands::cmd_vocabulary();
    assert!(result.is_ok());
}

#[test]
fn test_cmd_prompts_list() {
    let result = commands::cmd_prompts_list();
    assert!(result.is_ok());
}

#[test]
fn test_cmd_prompts_show_unknown_id() {
    // Unknown IDs print the available list rather than failing
    let result = commands::cmd_prompts_show("nonexistent");
    assert!(result.is_ok());
}
