//! Vocabulary inspection command

use anyhow::Result;
use pulse_core::extract::{default_override_path, FieldId, SectionId, Vocabulary};

/// Show the heading and label synonym tables in effect
pub fn cmd_vocabulary() -> Result<()> {
    let vocab = Vocabulary::load()?;

    println!("Section headings:\n");
    for section in SectionId::all() {
        println!(
            "  {:<18} {}",
            section.as_str(),
            vocab.heading_synonyms(*section).join(" | ")
        );
    }

    println!();
    println!("Field labels:\n");
    for field in FieldId::all() {
        println!(
            "  {:<18} {}",
            field.as_str(),
            vocab.label_synonyms(*field).join(" | ")
        );
    }

    println!();
    match vocab.override_path() {
        Some(path) => println!("Override in effect: {}", path.display()),
        None => println!(
            "Override path (not in effect): {}",
            default_override_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(not available)".to_string())
        ),
    }

    Ok(())
}
