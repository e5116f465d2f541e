//! Field extraction within a segment
//!
//! Each field is derived through an explicit ordered chain of extraction
//! strategies; the first strategy to produce a value wins and a full miss
//! leaves the field at its declared default. Numeric fields strip thousands
//! separators and qualifier words ("approximately", "around", "about",
//! "roughly") before the digits.
//!
//! Fallback ordering contract: when the label strategy misses, count fields
//! take the Nth standalone integer token in the segment (no `%` suffix, not
//! part of a hashtag), in the fixed order likes -> comments -> shares -> views.

use regex::Regex;

use crate::error::Result;

use super::segment::synonym_alternation;
use super::vocabulary::{FieldId, Vocabulary};

/// Qualifier words stripped before numeric parsing
const QUALIFIERS: &str = r"(?:(?:approximately|around|about|roughly)[ \t]+)?";

/// Separator between a label and its value: optional colon and bold markers
/// in either order ("Likes:", "**Likes:**", "Likes :**")
const LABEL_SEP: &str = r"[ \t]*:?[ \t]*\*{0,2}[ \t]*:?[ \t]*";

/// One candidate method for deriving a count field from a segment
pub(crate) enum CountStrategy {
    /// Match a label synonym followed by the first integer token
    Labeled(Regex),
    /// Take the Nth standalone integer in the segment
    Positional(usize),
}

impl CountStrategy {
    fn apply(&self, segment: &str, number_scan: &Regex) -> Option<String> {
        match self {
            Self::Labeled(re) => re.captures(segment).map(|c| c[1].replace(',', "")),
            Self::Positional(n) => standalone_integers(segment, number_scan).nth(*n),
        }
    }
}

/// One candidate method for deriving a percentage field from a segment
pub(crate) enum PercentStrategy {
    /// Match a label synonym followed by digits immediately suffixed with `%`
    Labeled(Regex),
    /// Take the first percentage token anywhere in the segment
    Positional,
}

impl PercentStrategy {
    fn apply(&self, segment: &str, first_percent: &Regex) -> Option<String> {
        let captures = match self {
            Self::Labeled(re) => re.captures(segment),
            Self::Positional => first_percent.captures(segment),
        };
        // Digits are stored exactly as written in the source: no rounding,
        // no trailing-zero trimming.
        captures.map(|c| format!("{}%", &c[1]))
    }
}

/// Standalone integer tokens in reading order, separators stripped
///
/// Skips percentage tokens, decimal tokens, and hashtag-embedded digits.
fn standalone_integers<'a>(
    segment: &'a str,
    number_scan: &'a Regex,
) -> impl Iterator<Item = String> + 'a {
    number_scan.find_iter(segment).filter_map(|m| {
        let token = m.as_str();
        if token.starts_with('#') || token.ends_with('%') || token.contains('.') {
            return None;
        }
        Some(token.replace(',', ""))
    })
}

/// Compiled matchers for every field the extractor fills
pub(crate) struct FieldMatchers {
    pub engagement: Vec<PercentStrategy>,
    pub likes: Vec<CountStrategy>,
    pub shares: Vec<CountStrategy>,
    pub comments: Vec<CountStrategy>,
    pub views: Vec<CountStrategy>,
    pub predicted_likes: Vec<CountStrategy>,
    pub predicted_shares: Vec<CountStrategy>,
    pub predicted_comments: Vec<CountStrategy>,
    pub predicted_views: Vec<CountStrategy>,
    pub age_groups: Option<Regex>,
    pub gender_split: Option<Regex>,
    pub timing: Option<Regex>,
    pub content_tips: Option<Regex>,
    pub audience: Option<Regex>,
    first_percent: Regex,
    hashtag: Regex,
    age_range: Regex,
    list_split: Regex,
    number_scan: Regex,
}

impl FieldMatchers {
    pub(crate) fn compile(vocab: &Vocabulary) -> Result<Self> {
        Ok(Self {
            engagement: percent_chain(vocab, FieldId::Engagement)?,
            likes: count_chain(vocab, FieldId::Likes, 0)?,
            comments: count_chain(vocab, FieldId::Comments, 1)?,
            shares: count_chain(vocab, FieldId::Shares, 2)?,
            views: count_chain(vocab, FieldId::Views, 3)?,
            predicted_likes: count_chain(vocab, FieldId::PredictedLikes, 0)?,
            predicted_comments: count_chain(vocab, FieldId::PredictedComments, 1)?,
            predicted_shares: count_chain(vocab, FieldId::PredictedShares, 2)?,
            predicted_views: count_chain(vocab, FieldId::PredictedViews, 3)?,
            age_groups: text_matcher(vocab, FieldId::AgeGroups)?,
            gender_split: text_matcher(vocab, FieldId::GenderSplit)?,
            timing: text_matcher(vocab, FieldId::Timing)?,
            content_tips: text_matcher(vocab, FieldId::ContentTips)?,
            audience: text_matcher(vocab, FieldId::Audience)?,
            first_percent: Regex::new(r"(\d+(?:\.\d+)?)%")?,
            hashtag: Regex::new(r"#\w+")?,
            age_range: Regex::new(
                r"(?i)\b\d{1,2}[ \t]*(?:-|–|to)[ \t]*\d{1,2}(?:[ \t]*year[ -]?olds?)?|\b\d{1,2}\+",
            )?,
            list_split: Regex::new(r",|\band\b")?,
            number_scan: Regex::new(r"#?\d[\d,]*(?:\.\d+)?%?")?,
        })
    }

    /// Run a count strategy chain; the first success wins
    pub(crate) fn count(&self, strategies: &[CountStrategy], segment: &str) -> Option<String> {
        strategies
            .iter()
            .find_map(|s| s.apply(segment, &self.number_scan))
    }

    pub(crate) fn percent(&self, segment: &str) -> Option<String> {
        self.engagement
            .iter()
            .find_map(|s| s.apply(segment, &self.first_percent))
    }

    /// Trimmed remainder of the line following a field's label
    pub(crate) fn text(&self, matcher: &Option<Regex>, segment: &str) -> Option<String> {
        let re = matcher.as_ref()?;
        let captures = re.captures(segment)?;
        let value = captures[1].trim().trim_matches('*').trim().to_string();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Age group labels: the labeled line split on commas/"and", else every
    /// age-range token in the segment, duplicates preserved
    pub(crate) fn age_groups(&self, segment: &str) -> Vec<String> {
        if let Some(line) = self.text(&self.age_groups, segment) {
            let groups: Vec<String> = self
                .list_split
                .split(&line)
                .map(|g| g.trim().trim_end_matches('.').to_string())
                .filter(|g| !g.is_empty())
                .collect();
            if !groups.is_empty() {
                return groups;
            }
        }
        self.age_range
            .find_iter(segment)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Every hashtag in the segment, in order of appearance, duplicates kept
    pub(crate) fn hashtags(&self, segment: &str) -> Vec<String> {
        self.hashtag
            .find_iter(segment)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Lines beginning with a bullet marker, marker stripped and remainder trimmed
pub(crate) fn bullet_lines(segment: &str) -> Vec<String> {
    segment
        .lines()
        .map(|line| line.trim())
        .filter_map(|line| {
            line.strip_prefix('-')
                .or_else(|| line.strip_prefix('•'))
                .map(|rest| rest.trim().to_string())
        })
        .filter(|line| !line.is_empty())
        .collect()
}

/// Free-text paragraph for a segment: bullet lines joined by spaces when the
/// segment is bulleted, otherwise the whole segment with whitespace collapsed
pub(crate) fn paragraph(segment: &str) -> String {
    let bullets = bullet_lines(segment);
    if !bullets.is_empty() {
        return bullets.join(" ");
    }
    segment.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn count_chain(vocab: &Vocabulary, field: FieldId, position: usize) -> Result<Vec<CountStrategy>> {
    let mut chain = Vec::new();
    let alts = synonym_alternation(vocab.label_synonyms(field));
    if !alts.is_empty() {
        let pattern = format!(r"(?i)\b(?:{})\b{}{}(\d[\d,]*)", alts, LABEL_SEP, QUALIFIERS);
        chain.push(CountStrategy::Labeled(Regex::new(&pattern)?));
    }
    chain.push(CountStrategy::Positional(position));
    Ok(chain)
}

fn percent_chain(vocab: &Vocabulary, field: FieldId) -> Result<Vec<PercentStrategy>> {
    let mut chain = Vec::new();
    let alts = synonym_alternation(vocab.label_synonyms(field));
    if !alts.is_empty() {
        let pattern = format!(
            r"(?i)\b(?:{})\b{}{}(\d+(?:\.\d+)?)%",
            alts, LABEL_SEP, QUALIFIERS
        );
        chain.push(PercentStrategy::Labeled(Regex::new(&pattern)?));
    }
    chain.push(PercentStrategy::Positional);
    Ok(chain)
}

fn text_matcher(vocab: &Vocabulary, field: FieldId) -> Result<Option<Regex>> {
    let alts = synonym_alternation(vocab.label_synonyms(field));
    if alts.is_empty() {
        return Ok(None);
    }
    let pattern = format!(r"(?i)\b(?:{})\b{}([^\r\n]+)", alts, LABEL_SEP);
    Ok(Some(Regex::new(&pattern)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matchers() -> FieldMatchers {
        FieldMatchers::compile(&Vocabulary::builtin().unwrap()).unwrap()
    }

    #[test]
    fn test_labeled_count_strips_separators() {
        let m = matchers();
        let value = m.count(&m.likes, "- **Likes:** 12,345\n");
        assert_eq!(value.as_deref(), Some("12345"));
    }

    #[test]
    fn test_labeled_count_strips_qualifiers() {
        let m = matchers();
        let value = m.count(&m.views, "Views: approximately 1,200,000\n");
        assert_eq!(value.as_deref(), Some("1200000"));
    }

    #[test]
    fn test_expected_label_synonym() {
        let m = matchers();
        let value = m.count(&m.predicted_shares, "Expected Shares: 87\n");
        assert_eq!(value.as_deref(), Some("87"));
    }

    #[test]
    fn test_positional_fallback_order() {
        // No labels at all: Nth number in likes -> comments -> shares -> views order
        let m = matchers();
        let segment = "the post should get 500 then 20 then 35 then 9,000 overall\n";
        assert_eq!(m.count(&m.likes, segment).as_deref(), Some("500"));
        assert_eq!(m.count(&m.comments, segment).as_deref(), Some("20"));
        assert_eq!(m.count(&m.shares, segment).as_deref(), Some("35"));
        assert_eq!(m.count(&m.views, segment).as_deref(), Some("9000"));
    }

    #[test]
    fn test_positional_skips_percentages_and_hashtags() {
        let m = matchers();
        let segment = "engagement hit 4.2% with #2024 trending; expect 150 reactions\n";
        assert_eq!(m.count(&m.likes, segment).as_deref(), Some("150"));
    }

    #[test]
    fn test_percent_requires_immediate_suffix() {
        let m = matchers();
        assert_eq!(
            m.percent("Engagement Rate: 4.50%\n").as_deref(),
            Some("4.50%")
        );
        // Space before % means no labeled match and no percent token at all
        assert_eq!(m.percent("Engagement Rate: 4.50 percent\n"), None);
    }

    #[test]
    fn test_percent_positional_fallback() {
        let m = matchers();
        assert_eq!(m.percent("the rate was 3.1% overall\n").as_deref(), Some("3.1%"));
    }

    #[test]
    fn test_text_field_rest_of_line() {
        let m = matchers();
        let value = m.text(&m.timing, "- **Optimal Posting Time:** 6-9 PM on weekdays\n");
        assert_eq!(value.as_deref(), Some("6-9 PM on weekdays"));
    }

    #[test]
    fn test_age_groups_from_label_line() {
        let m = matchers();
        let groups = m.age_groups("Primary Age Group: 18-24, 25-34 and 35-44\n");
        assert_eq!(groups, vec!["18-24", "25-34", "35-44"]);
    }

    #[test]
    fn test_age_groups_range_fallback() {
        let m = matchers();
        let groups = m.age_groups("mostly 18-24 year-olds with some 25-34\n");
        assert_eq!(groups, vec!["18-24 year-olds", "25-34"]);
    }

    #[test]
    fn test_hashtags_in_order_with_duplicates() {
        let m = matchers();
        let tags = m.hashtags("#SummerVibes #ContentCreator and #SummerVibes again\n");
        assert_eq!(tags, vec!["#SummerVibes", "#ContentCreator", "#SummerVibes"]);
    }

    #[test]
    fn test_bullet_lines_strip_markers() {
        let lines = bullet_lines("- Video posts get 20% more engagement\n• Carousels underperform\nplain text\n");
        assert_eq!(
            lines,
            vec![
                "Video posts get 20% more engagement",
                "Carousels underperform"
            ]
        );
    }

    #[test]
    fn test_paragraph_joins_bullets() {
        let text = paragraph("- First point.\n- Second point.\n");
        assert_eq!(text, "First point. Second point.");
    }

    #[test]
    fn test_paragraph_collapses_plain_text() {
        let text = paragraph("  Engagement is driven\n  by posting time.\n");
        assert_eq!(text, "Engagement is driven by posting time.");
    }
}
