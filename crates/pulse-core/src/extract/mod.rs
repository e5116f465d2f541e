//! Insight extraction from free-text AI responses
//!
//! The upstream workflow returns natural language that loosely follows a
//! heading-based template (Metrics / Format Insights / Predictions /
//! Explanation / Suggestions), but nothing guarantees the exact phrasing,
//! casing, or completeness of any given reply. This module turns that text
//! into a fully shaped [`InsightRecord`] on a best-effort basis:
//!
//! - the response is divided into segments by locating section headings
//!   (vocabulary-driven, see [`Vocabulary`]);
//! - each field runs an ordered chain of extraction strategies against its
//!   segment; the first strategy to succeed wins;
//! - a miss anywhere degrades that field to its declared default and
//!   extraction continues. `extract` never fails and never returns a
//!   partially shaped record.
//!
//! All patterns are compiled at construction, which is the only fallible
//! step (a user-supplied vocabulary can produce an invalid pattern).

mod fields;
mod segment;
pub mod vocabulary;

pub use vocabulary::{default_override_path, FieldId, SectionId, Vocabulary};

use tracing::debug;

use crate::error::Result;
use crate::models::InsightRecord;

use fields::{bullet_lines, paragraph, FieldMatchers};
use segment::SectionMatchers;

/// Best-effort parser from free-text AI responses to structured insights
pub struct InsightExtractor {
    vocabulary: Vocabulary,
    sections: SectionMatchers,
    fields: FieldMatchers,
}

impl InsightExtractor {
    /// Create an extractor with the loaded vocabulary (override file layered
    /// over embedded defaults)
    pub fn new() -> Result<Self> {
        Self::with_vocabulary(Vocabulary::load()?)
    }

    /// Create an extractor with an explicit vocabulary
    pub fn with_vocabulary(vocabulary: Vocabulary) -> Result<Self> {
        let sections = SectionMatchers::compile(&vocabulary)?;
        let fields = FieldMatchers::compile(&vocabulary)?;
        Ok(Self {
            vocabulary,
            sections,
            fields,
        })
    }

    /// The vocabulary this extractor was compiled from
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Extract structured insights from a response
    ///
    /// Total function: any input, including the empty string, text with no
    /// recognizable structure, or an upstream error sentinel, produces a
    /// fully shaped record. Fields whose section or label never appears keep
    /// their defaults.
    pub fn extract(&self, response: &str) -> InsightRecord {
        let mut record = InsightRecord::default();
        let segments = self.sections.split(response);
        debug!("extracting insights from {} section(s)", segments.len());

        if let Some(seg) = segments.get(&SectionId::Metrics) {
            let f = &self.fields;
            if let Some(v) = f.percent(seg) {
                record.metrics.engagement = v;
            }
            if let Some(v) = f.count(&f.likes, seg) {
                record.metrics.likes = v;
            }
            if let Some(v) = f.count(&f.shares, seg) {
                record.metrics.shares = v;
            }
            if let Some(v) = f.count(&f.comments, seg) {
                record.metrics.comments = v;
            }
            if let Some(v) = f.count(&f.views, seg) {
                record.metrics.views = v;
            }
            record.metrics.age_groups = f.age_groups(seg);
            if let Some(v) = f.text(&f.gender_split, seg) {
                record.metrics.gender_split = v;
            }
        }

        if let Some(seg) = segments.get(&SectionId::FormatInsights) {
            record.format_insights = bullet_lines(seg);
        }

        if let Some(seg) = segments.get(&SectionId::Predictions) {
            let f = &self.fields;
            if let Some(v) = f.count(&f.predicted_likes, seg) {
                record.predictions.likes = v;
            }
            if let Some(v) = f.count(&f.predicted_shares, seg) {
                record.predictions.shares = v;
            }
            if let Some(v) = f.count(&f.predicted_comments, seg) {
                record.predictions.comments = v;
            }
            if let Some(v) = f.count(&f.predicted_views, seg) {
                record.predictions.views = v;
            }
        }

        if let Some(seg) = segments.get(&SectionId::Analysis) {
            record.analysis = paragraph(seg);
        }

        if let Some(seg) = segments.get(&SectionId::Suggestions) {
            let f = &self.fields;
            if let Some(v) = f.text(&f.timing, seg) {
                record.recommendations.timing = v;
            }
            record.recommendations.hashtags = f.hashtags(seg);
            if let Some(v) = f.text(&f.content_tips, seg) {
                record.recommendations.content_tips = v;
            }
            if let Some(v) = f.text(&f.audience, seg) {
                record.recommendations.audience = v;
            }
        }

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> InsightExtractor {
        InsightExtractor::with_vocabulary(Vocabulary::builtin().unwrap()).unwrap()
    }

    const FULL_RESPONSE: &str = r#"### Metrics
- **Engagement Rate:** 4.2%
- **Likes:** 12,345
- **Shares:** 678
- **Comments:** 910
- **Views:** 1,112,000
- **Primary Age Group:** 18-24, 25-34
- **Gender Split:** 60% female, 40% male

### Format Insights
- Video posts get 20% more engagement
- Carousels underperform on weekends

### Predictions
- **Expected Likes:** 15,000
- **Expected Shares:** 800
- **Expected Comments:** 1,200
- **Expected Views:** 1,500,000

### Explanation
- Engagement is driven primarily by posting time.
- Video content consistently outperforms static images.

### Suggestions
- **Optimal Posting Time:** 6-9 PM on weekdays
- **Hashtags:** #SummerVibes #ContentCreator
- **Content Quality:** Use more video content
- **Target Audience:** Young adults interested in travel
"#;

    #[test]
    fn test_full_response() {
        let record = extractor().extract(FULL_RESPONSE);

        assert_eq!(record.metrics.engagement, "4.2%");
        assert_eq!(record.metrics.likes, "12345");
        assert_eq!(record.metrics.shares, "678");
        assert_eq!(record.metrics.comments, "910");
        assert_eq!(record.metrics.views, "1112000");
        assert_eq!(record.metrics.age_groups, vec!["18-24", "25-34"]);
        assert_eq!(record.metrics.gender_split, "60% female, 40% male");

        assert_eq!(
            record.format_insights,
            vec![
                "Video posts get 20% more engagement",
                "Carousels underperform on weekends"
            ]
        );

        assert_eq!(record.predictions.likes, "15000");
        assert_eq!(record.predictions.shares, "800");
        assert_eq!(record.predictions.comments, "1200");
        assert_eq!(record.predictions.views, "1500000");

        assert_eq!(record.recommendations.timing, "6-9 PM on weekdays");
        assert_eq!(
            record.recommendations.hashtags,
            vec!["#SummerVibes", "#ContentCreator"]
        );
        assert_eq!(record.recommendations.content_tips, "Use more video content");
        assert_eq!(
            record.recommendations.audience,
            "Young adults interested in travel"
        );

        assert_eq!(
            record.analysis,
            "Engagement is driven primarily by posting time. \
             Video content consistently outperforms static images."
        );
    }

    #[test]
    fn test_empty_string_yields_default_record() {
        assert_eq!(extractor().extract(""), InsightRecord::default());
    }

    #[test]
    fn test_unstructured_text_yields_default_record() {
        let record = extractor().extract("I could not analyze that, sorry!");
        assert_eq!(record, InsightRecord::default());
    }

    #[test]
    fn test_plain_colon_template() {
        let response = "Metrics:\n  Likes: 500\nDirect Answer:\n  Expected Likes: 750\n";
        let record = extractor().extract(response);
        assert_eq!(record.metrics.likes, "500");
        assert_eq!(record.predictions.likes, "750");
    }

    #[test]
    fn test_metrics_only_leaves_recommendations_default() {
        let response = "### Metrics\n- **Likes:** 42\n- **Engagement Rate:** 1.5%\n";
        let record = extractor().extract(response);
        assert_eq!(record.metrics.likes, "42");
        assert_eq!(record.metrics.engagement, "1.5%");
        assert_eq!(record.recommendations, Default::default());
        assert_eq!(record.predictions, Default::default());
    }

    #[test]
    fn test_custom_vocabulary_retargets_headings() {
        let vocab = Vocabulary::from_toml(
            r#"
[headings]
metrics = ["Performance Summary"]
"#,
        )
        .unwrap();
        let extractor = InsightExtractor::with_vocabulary(vocab).unwrap();

        let record = extractor.extract("Performance Summary:\nLikes: 77\n");
        assert_eq!(record.metrics.likes, "77");

        // The default heading no longer matches
        let record = extractor.extract("Metrics:\nLikes: 77\n");
        assert_eq!(record.metrics.likes, "0");
    }

    #[test]
    fn test_user_synonyms_are_escaped_literal() {
        let vocab = Vocabulary::from_toml(
            r#"
[headings]
metrics = ["("]
"#,
        )
        .unwrap();
        // regex::escape makes user synonyms literal, so this still compiles
        assert!(InsightExtractor::with_vocabulary(vocab).is_ok());
    }
}
