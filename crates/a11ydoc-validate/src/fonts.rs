//! Font family analyzers
//!
//! Only families set directly on a run are seen; text that inherits its
//! font from a style or the theme is not judged.

use std::collections::{BTreeMap, BTreeSet};

use a11ydoc_ast::{Document, Location};
use a11ydoc_core::{Issue, IssueKind};

use crate::thresholds::{DECORATIVE_FONTS, MAX_FONT_FAMILIES, SECONDARY_FONT_SHARE};
use crate::{preview, Analyzer};

/// Whether a font family is decorative or hard to read
pub fn is_decorative(family: &str) -> bool {
    let lower = family.to_lowercase();
    DECORATIVE_FONTS.iter().any(|f| lower.contains(f))
}

/// Flags script, display, and novelty fonts (`DECORATIVE_FONT`)
///
/// Each family is reported once, at its first non-blank use.
pub struct DecorativeFontAnalyzer;

impl Analyzer for DecorativeFontAnalyzer {
    fn name(&self) -> &'static str {
        "decorative-fonts"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        let mut flagged: BTreeSet<&str> = BTreeSet::new();
        let mut issues = Vec::new();

        for (location, para) in doc.located_paragraphs() {
            let family = para
                .runs
                .iter()
                .filter(|run| !run.text.trim().is_empty())
                .filter_map(|run| run.font.as_deref())
                .find(|family| is_decorative(family) && !flagged.contains(family));

            if let Some(family) = family {
                flagged.insert(family);
                issues.push(Issue::new(
                    IssueKind::DecorativeFont,
                    location,
                    format!(
                        "Font '{}' is decorative or hard to read (use a plain font such as \
                         Arial, Calibri, or Times New Roman): \"{}\"",
                        family,
                        preview(para.plain_text().trim())
                    ),
                ));
            }
        }

        issues
    }
}

/// Flags body text spread over several font families (`INCONSISTENT_FONTS`)
///
/// Headings are left out of the count. The issue fires when more than two
/// families are in use and at least one besides the most common covers
/// over a tenth of the runs.
pub struct InconsistentFontsAnalyzer;

impl InconsistentFontsAnalyzer {
    /// Non-blank run count per directly set font family, headings excluded
    pub fn font_usage(doc: &Document) -> BTreeMap<&str, usize> {
        let mut usage: BTreeMap<&str, usize> = BTreeMap::new();
        for (_, para) in doc.located_paragraphs() {
            if para.heading_level().is_some() {
                continue;
            }
            for run in &para.runs {
                if run.text.trim().is_empty() {
                    continue;
                }
                if let Some(family) = run.font.as_deref() {
                    *usage.entry(family).or_default() += 1;
                }
            }
        }
        usage
    }
}

impl Analyzer for InconsistentFontsAnalyzer {
    fn name(&self) -> &'static str {
        "font-consistency"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        let usage = Self::font_usage(doc);
        if usage.len() <= MAX_FONT_FAMILIES {
            return Vec::new();
        }

        let total: usize = usage.values().sum();
        // Most used first; ties by name for a stable order
        let mut ranked: Vec<(&str, usize)> = usage.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

        let significant = ranked[1..]
            .iter()
            .filter(|(_, count)| *count as f64 > total as f64 * SECONDARY_FONT_SHARE)
            .count();
        if significant == 0 {
            return Vec::new();
        }

        let shown: Vec<String> = ranked
            .iter()
            .take(significant + 1)
            .map(|(family, count)| {
                format!(
                    "{} ({} instances, {:.1}%)",
                    family,
                    count,
                    *count as f64 / total as f64 * 100.0
                )
            })
            .collect();
        let more = if shown.len() > 3 { "..." } else { "" };

        vec![Issue::new(
            IssueKind::InconsistentFonts,
            Location::Document,
            format!(
                "Document uses {} different fonts. Consider a single font for consistency. \
                 Fonts: {}{}",
                ranked.len(),
                shown[..shown.len().min(3)].join("; "),
                more
            ),
        )]
    }
}
