//! The structured insight contract produced by the extractor
//!
//! An `InsightRecord` is built fresh per AI response and handed to whatever
//! renders it (dashboard cards, CLI JSON output). The record is always fully
//! shaped: every field is present with a documented zero value even when the
//! source text contained nothing recognizable, so consumers never have to
//! handle missing fields.
//!
//! Serialized field names are camelCase to match the dashboard contract.

use serde::{Deserialize, Serialize};

/// Structured insights extracted from a free-text AI response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightRecord {
    /// Observed performance metrics
    pub metrics: EngagementMetrics,
    /// Bullet observations about which post formats perform best
    pub format_insights: Vec<String>,
    /// Predicted performance for a future post
    pub predictions: PredictedMetrics,
    /// Actionable recommendations
    pub recommendations: Recommendations,
    /// Free-text analysis paragraph
    pub analysis: String,
}

/// Observed engagement metrics
///
/// Numeric fields are digit strings with thousands separators stripped;
/// `engagement` keeps its `%` suffix with the digits exactly as they appeared
/// in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementMetrics {
    /// Engagement rate as a percentage string, e.g. "4.2%"
    pub engagement: String,
    pub likes: String,
    pub shares: String,
    pub comments: String,
    pub views: String,
    /// Age group labels in order of appearance, e.g. ["18-24", "25-34"]
    pub age_groups: Vec<String>,
    /// Free-text gender breakdown, e.g. "60% female, 40% male"
    pub gender_split: String,
}

impl Default for EngagementMetrics {
    fn default() -> Self {
        Self {
            engagement: "0%".to_string(),
            likes: "0".to_string(),
            shares: "0".to_string(),
            comments: "0".to_string(),
            views: "0".to_string(),
            age_groups: Vec::new(),
            gender_split: String::new(),
        }
    }
}

/// Predicted engagement for a future post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictedMetrics {
    pub likes: String,
    pub shares: String,
    pub comments: String,
    pub views: String,
}

impl Default for PredictedMetrics {
    fn default() -> Self {
        Self {
            likes: "0".to_string(),
            shares: "0".to_string(),
            comments: "0".to_string(),
            views: "0".to_string(),
        }
    }
}

/// Actionable recommendations extracted from the suggestions section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    /// When to post, e.g. "6-9 PM on weekdays"
    pub timing: String,
    /// Hashtags in order of appearance; each starts with `#` and contains
    /// no whitespace
    pub hashtags: Vec<String>,
    /// Content quality advice
    pub content_tips: String,
    /// Audience targeting advice
    pub audience: String,
}
