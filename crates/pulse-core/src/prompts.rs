//! Prompt library for the workflow API
//!
//! The extractor's vocabulary only works because these prompts ask the model
//! for those headings, so the two are versioned side by side. Prompts are
//! loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/pulse/prompts/overrides/)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default prompts (compiled into binary)
mod defaults {
    pub const ANALYSIS_REQUEST: &str = include_str!("../../../prompts/analysis_request.md");
    pub const INITIAL_OVERVIEW: &str = include_str!("../../../prompts/initial_overview.md");
}

/// Known prompt IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptId {
    /// Per-question analysis prompt (renders {{question}})
    AnalysisRequest,
    /// First-open overview prompt
    InitialOverview,
}

impl PromptId {
    /// Get the string identifier for this prompt
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AnalysisRequest => "analysis_request",
            Self::InitialOverview => "initial_overview",
        }
    }

    /// Get all known prompt IDs
    pub fn all() -> &'static [PromptId] {
        &[Self::AnalysisRequest, Self::InitialOverview]
    }

    fn default_content(&self) -> &'static str {
        match self {
            Self::AnalysisRequest => defaults::ANALYSIS_REQUEST,
            Self::InitialOverview => defaults::INITIAL_OVERVIEW,
        }
    }
}

/// Prompt frontmatter metadata
#[derive(Debug, Clone, Deserialize)]
pub struct PromptMetadata {
    /// Unique identifier
    pub id: String,
    /// Version number for tracking changes
    pub version: u32,
}

/// A loaded prompt with metadata and content
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Metadata from frontmatter
    pub metadata: PromptMetadata,
    /// The prompt body (markdown, below the frontmatter)
    pub content: String,
    /// Whether this came from an override file
    pub is_override: bool,
}

impl Prompt {
    /// Get the user section of the prompt
    pub fn user_section(&self) -> Option<&str> {
        extract_section(&self.content, "# User")
    }

    /// Render the user section with template variables replaced
    ///
    /// Simple mustache-style replacement: {{var}}
    pub fn render_user(&self, vars: &HashMap<&str, &str>) -> String {
        let mut result = self
            .user_section()
            .unwrap_or(&self.content)
            .trim()
            .to_string();
        for (key, value) in vars {
            let pattern = format!("{{{{{}}}}}", key);
            result = result.replace(&pattern, value);
        }
        result
    }
}

/// Prompt library for loading and caching prompts
pub struct PromptLibrary {
    /// Override directory path
    override_dir: Option<PathBuf>,
    /// Cached parsed prompts
    cache: HashMap<PromptId, Prompt>,
}

impl Default for PromptLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptLibrary {
    /// Create a new prompt library with default paths
    pub fn new() -> Self {
        Self {
            override_dir: default_prompts_dir(),
            cache: HashMap::new(),
        }
    }

    /// Create with a custom override directory (for testing)
    pub fn with_override_dir(dir: PathBuf) -> Self {
        Self {
            override_dir: Some(dir),
            cache: HashMap::new(),
        }
    }

    /// Get a prompt, loading from override or embedded default
    pub fn get(&mut self, id: PromptId) -> Result<&Prompt> {
        if !self.cache.contains_key(&id) {
            let prompt = self.load(id)?;
            self.cache.insert(id, prompt);
        }
        self.cache
            .get(&id)
            .ok_or_else(|| Error::NotFound(format!("prompt {}", id.as_str())))
    }

    fn load(&self, id: PromptId) -> Result<Prompt> {
        if let Some(ref dir) = self.override_dir {
            let path = dir.join(format!("{}.md", id.as_str()));
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                return parse_prompt(&content, true);
            }
        }
        parse_prompt(id.default_content(), false)
    }
}

/// Default prompt override directory
pub fn default_prompts_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("pulse").join("prompts").join("overrides"))
}

/// Parse a prompt file: YAML frontmatter between `---` fences, then body
fn parse_prompt(content: &str, is_override: bool) -> Result<Prompt> {
    let rest = content
        .strip_prefix("---")
        .ok_or_else(|| Error::InvalidData("Prompt file missing frontmatter".into()))?;
    let end = rest
        .find("\n---")
        .ok_or_else(|| Error::InvalidData("Prompt frontmatter not terminated".into()))?;

    let metadata: PromptMetadata = serde_yaml::from_str(&rest[..end])
        .map_err(|e| Error::InvalidData(format!("Invalid prompt frontmatter: {}", e)))?;
    let body = rest[end + 4..].trim_start().to_string();

    Ok(Prompt {
        metadata,
        content: body,
        is_override,
    })
}

/// Extract a `# Header` section's body (up to the next top-level header)
fn extract_section<'a>(content: &'a str, header: &str) -> Option<&'a str> {
    let start = content.find(header)? + header.len();
    let rest = &content[start..];
    let end = rest.find("\n# ").unwrap_or(rest.len());
    Some(rest[..end].trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_prompts_parse() {
        let mut library = PromptLibrary::with_override_dir(PathBuf::from("/nonexistent"));
        for id in PromptId::all() {
            let prompt = library.get(*id).unwrap();
            assert_eq!(prompt.metadata.id, id.as_str());
            assert!(!prompt.is_override);
            assert!(prompt.user_section().is_some());
        }
    }

    #[test]
    fn test_render_replaces_question() {
        let mut library = PromptLibrary::with_override_dir(PathBuf::from("/nonexistent"));
        let prompt = library.get(PromptId::AnalysisRequest).unwrap();
        let mut vars = HashMap::new();
        vars.insert("question", "when should I post?");
        let rendered = prompt.render_user(&vars);
        assert!(rendered.contains("when should I post?"));
        assert!(!rendered.contains("{{question}}"));
    }

    #[test]
    fn test_prompt_asks_for_extractor_headings() {
        // The prompt and the default vocabulary must agree
        let mut library = PromptLibrary::with_override_dir(PathBuf::from("/nonexistent"));
        let prompt = library.get(PromptId::AnalysisRequest).unwrap();
        for heading in ["### Metrics", "### Predictions", "### Suggestions"] {
            assert!(prompt.content.contains(heading), "missing {}", heading);
        }
    }

    #[test]
    fn test_override_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis_request.md");
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            "---\nid: analysis_request\nversion: 2\n---\n\n# User\n\ncustom {{{{question}}}}\n"
        )
        .unwrap();

        let mut library = PromptLibrary::with_override_dir(dir.path().to_path_buf());
        let prompt = library.get(PromptId::AnalysisRequest).unwrap();
        assert!(prompt.is_override);
        assert_eq!(prompt.metadata.version, 2);
        assert!(prompt.content.contains("custom"));
    }

    #[test]
    fn test_malformed_frontmatter_is_an_error() {
        assert!(parse_prompt("no frontmatter here", false).is_err());
        assert!(parse_prompt("---\nid: x\n", false).is_err());
    }
}
