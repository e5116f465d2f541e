//! Extraction vocabulary configuration
//!
//! The upstream workflow is not contractually bound to a fixed response
//! template, so heading and label phrasing is configuration data rather than
//! hard-coded patterns. Vocabulary is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/pulse/config/sections.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! An override file only needs the keys it wants to change; everything else
//! keeps the embedded defaults.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::error::{Error, Result};

/// Embedded default vocabulary (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../../config/sections.toml");

/// Recognized response sections, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    /// Observed engagement metrics
    Metrics,
    /// Bullet observations about post formats
    FormatInsights,
    /// Predicted engagement ("Direct Answer" in some templates)
    Predictions,
    /// Free-text analysis ("Explanation" in some templates)
    Analysis,
    /// Actionable recommendations
    Suggestions,
}

impl SectionId {
    /// Get the config key for this section
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metrics => "metrics",
            Self::FormatInsights => "format_insights",
            Self::Predictions => "predictions",
            Self::Analysis => "analysis",
            Self::Suggestions => "suggestions",
        }
    }

    /// All sections in canonical order
    pub fn all() -> &'static [SectionId] {
        &[
            Self::Metrics,
            Self::FormatInsights,
            Self::Predictions,
            Self::Analysis,
            Self::Suggestions,
        ]
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.as_str() == key)
    }
}

/// Fields the extractor knows how to pull out of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Engagement,
    Likes,
    Shares,
    Comments,
    Views,
    AgeGroups,
    GenderSplit,
    PredictedLikes,
    PredictedShares,
    PredictedComments,
    PredictedViews,
    Timing,
    Hashtags,
    ContentTips,
    Audience,
}

impl FieldId {
    /// Get the config key for this field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Engagement => "engagement",
            Self::Likes => "likes",
            Self::Shares => "shares",
            Self::Comments => "comments",
            Self::Views => "views",
            Self::AgeGroups => "age_groups",
            Self::GenderSplit => "gender_split",
            Self::PredictedLikes => "predicted_likes",
            Self::PredictedShares => "predicted_shares",
            Self::PredictedComments => "predicted_comments",
            Self::PredictedViews => "predicted_views",
            Self::Timing => "timing",
            Self::Hashtags => "hashtags",
            Self::ContentTips => "content_tips",
            Self::Audience => "audience",
        }
    }

    /// All fields
    pub fn all() -> &'static [FieldId] {
        &[
            Self::Engagement,
            Self::Likes,
            Self::Shares,
            Self::Comments,
            Self::Views,
            Self::AgeGroups,
            Self::GenderSplit,
            Self::PredictedLikes,
            Self::PredictedShares,
            Self::PredictedComments,
            Self::PredictedViews,
            Self::Timing,
            Self::Hashtags,
            Self::ContentTips,
            Self::Audience,
        ]
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.as_str() == key)
    }
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawVocabulary {
    headings: Option<HashMap<String, Vec<String>>>,
    labels: Option<HashMap<String, Vec<String>>>,
}

/// Heading and label synonym tables for the extractor
#[derive(Debug, Clone)]
pub struct Vocabulary {
    headings: HashMap<SectionId, Vec<String>>,
    labels: HashMap<FieldId, Vec<String>>,
    override_path: Option<PathBuf>,
}

impl Vocabulary {
    /// The embedded default vocabulary
    pub fn builtin() -> Result<Self> {
        let mut vocab = Self {
            headings: HashMap::new(),
            labels: HashMap::new(),
            override_path: None,
        };
        vocab.apply_toml(DEFAULT_CONFIG)?;
        Ok(vocab)
    }

    /// Load vocabulary (override file layered over embedded defaults)
    pub fn load() -> Result<Self> {
        let mut vocab = Self::builtin()?;
        if let Some(path) = default_override_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                vocab.apply_toml(&content)?;
                vocab.override_path = Some(path);
            }
        }
        Ok(vocab)
    }

    /// Build a vocabulary from TOML content layered over the defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut vocab = Self::builtin()?;
        vocab.apply_toml(content)?;
        Ok(vocab)
    }

    /// Overlay TOML content onto this vocabulary
    ///
    /// Keys present in the content replace the existing synonym list wholesale;
    /// absent keys are left untouched. Unknown keys are logged and skipped.
    fn apply_toml(&mut self, content: &str) -> Result<()> {
        let raw: RawVocabulary = toml::from_str(content)
            .map_err(|e| Error::InvalidData(format!("Invalid vocabulary TOML: {}", e)))?;

        if let Some(headings) = raw.headings {
            for (key, synonyms) in headings {
                match SectionId::from_key(&key) {
                    Some(section) => {
                        self.headings.insert(section, synonyms);
                    }
                    None => warn!("Unknown section key in vocabulary config: {}", key),
                }
            }
        }

        if let Some(labels) = raw.labels {
            for (key, synonyms) in labels {
                match FieldId::from_key(&key) {
                    Some(field) => {
                        self.labels.insert(field, synonyms);
                    }
                    None => warn!("Unknown label key in vocabulary config: {}", key),
                }
            }
        }

        Ok(())
    }

    /// Heading synonyms for a section (empty slice if none configured)
    pub fn heading_synonyms(&self, section: SectionId) -> &[String] {
        self.headings.get(&section).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Label synonyms for a field (empty slice if none configured)
    pub fn label_synonyms(&self, field: FieldId) -> &[String] {
        self.labels.get(&field).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// The override file in effect, if any
    pub fn override_path(&self) -> Option<&Path> {
        self.override_path.as_deref()
    }
}

/// Default vocabulary override path
pub fn default_override_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("pulse").join("config").join("sections.toml"))
}
