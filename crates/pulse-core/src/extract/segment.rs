//! Section isolation
//!
//! A segment is the substring of a response lying between one recognized
//! section heading and the next (or end of text). Headings are matched
//! case-insensitively and tolerate the template drift we have seen from the
//! upstream generator: markdown markers (`### Metrics`), plain-colon labels
//! (`Metrics:`), bold markers (`**Metrics:**`), ALL-CAPS, and underscores in
//! place of spaces (`DIRECT_ANSWER:`).

use std::collections::HashMap;

use regex::Regex;
use tracing::debug;

use crate::error::Result;

use super::vocabulary::{SectionId, Vocabulary};

/// Compiled heading matchers for every configured section
pub(crate) struct SectionMatchers {
    matchers: Vec<(SectionId, Regex)>,
}

/// Turn a synonym list into a regex alternation
///
/// Synonyms are escaped literally except that a space also matches
/// underscores, so "Direct Answer" recognizes "DIRECT_ANSWER".
pub(crate) fn synonym_alternation(synonyms: &[String]) -> String {
    let alts: Vec<String> = synonyms
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| regex::escape(s).replace(' ', "[ _]+"))
        .collect();
    alts.join("|")
}

impl SectionMatchers {
    pub(crate) fn compile(vocab: &Vocabulary) -> Result<Self> {
        let mut matchers = Vec::new();
        for section in SectionId::all() {
            let alts = synonym_alternation(vocab.heading_synonyms(*section));
            if alts.is_empty() {
                continue;
            }
            // A heading is a line starting with an optional markdown or bold
            // marker, a synonym, then either a colon or the end of the line.
            // Requiring the colon/EOL keeps prose like "Metrics show..." from
            // being mistaken for a heading.
            let pattern = format!(
                r"(?mi)^[ \t]*(?:#{{1,6}}[ \t]*|\*\*)?(?:{})(?:[ \t]*:[ \t]*\*{{0,2}}|[ \t]*\*{{0,2}}[ \t]*$)",
                alts
            );
            matchers.push((*section, Regex::new(&pattern)?));
        }
        Ok(Self { matchers })
    }

    /// Divide a response into non-overlapping segments keyed by section
    ///
    /// Each section's segment starts after the first occurrence of one of its
    /// headings and runs to the next recognized heading (any section) or the
    /// end of the text. Sections whose headings never appear are simply absent
    /// from the map.
    pub(crate) fn split<'a>(&self, response: &'a str) -> HashMap<SectionId, &'a str> {
        // Every heading occurrence is a boundary, even repeats.
        let mut boundaries: Vec<(usize, usize, SectionId)> = Vec::new();
        for (section, re) in &self.matchers {
            for m in re.find_iter(response) {
                boundaries.push((m.start(), m.end(), *section));
            }
        }
        boundaries.sort_by_key(|(start, _, _)| *start);

        let mut segments = HashMap::new();
        for (i, (start, end, section)) in boundaries.iter().enumerate() {
            if segments.contains_key(section) {
                continue;
            }
            let next_start = boundaries[i + 1..]
                .iter()
                .map(|(s, _, _)| *s)
                .find(|s| s >= end)
                .unwrap_or(response.len());
            segments.insert(*section, &response[*end..next_start]);
            debug!(
                "located section {} at {}..{}",
                section.as_str(),
                start,
                next_start
            );
        }
        segments
    }
}
