//! Heading structure analyzer
//!
//! Counts paragraphs by "Heading N" style across the whole document,
//! including paragraphs inside table cells.

use a11ydoc_ast::{Document, Location};
use a11ydoc_core::{Issue, IssueKind};

use crate::thresholds::{EXCESS_H1_ABSOLUTE, EXCESS_H1_WITH_FEW_H2, FEW_H2};
use crate::Analyzer;

/// Checks heading counts
///
/// - `MISSING_H1`: no level-1 heading at all
/// - `EXCESS_H1`: more than 10 H1s with fewer than 3 H2s, or more than 15 H1s
///
/// Hierarchy skips are not reported here.
///
/// # Example
///
/// ```
/// use a11ydoc_ast::{Block, Document, Paragraph, Run};
/// use a11ydoc_validate::{Analyzer, HeadingStructureAnalyzer};
///
/// let mut doc = Document::new();
/// doc.push(Block::Paragraph(Paragraph::styled("Heading 1", vec![Run::new("Syllabus")])));
///
/// assert!(HeadingStructureAnalyzer.analyze(&doc).is_empty());
/// ```
pub struct HeadingStructureAnalyzer;

impl Analyzer for HeadingStructureAnalyzer {
    fn name(&self) -> &'static str {
        "heading-structure"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        let mut h1 = 0;
        let mut h2 = 0;
        for (_, para) in doc.located_paragraphs() {
            match para.heading_level() {
                Some(1) => h1 += 1,
                Some(2) => h2 += 1,
                _ => {}
            }
        }

        let mut issues = Vec::new();
        if h1 == 0 {
            issues.push(Issue::new(
                IssueKind::MissingH1,
                Location::Document,
                "No Heading 1 found. Major sections should use the Heading 1 style.",
            ));
        }

        if h1 > EXCESS_H1_WITH_FEW_H2 && h2 < FEW_H2 {
            issues.push(Issue::new(
                IssueKind::ExcessH1,
                Location::Document,
                format!(
                    "Document has {} Heading 1s but only {} Heading 2s. \
                     Many H1s should likely be H2 subsections.",
                    h1, h2
                ),
            ));
        } else if h1 > EXCESS_H1_ABSOLUTE {
            issues.push(Issue::new(
                IssueKind::ExcessH1,
                Location::Document,
                format!(
                    "Document has {} Heading 1s. Consider Heading 2 for subsections.",
                    h1
                ),
            ));
        }

        issues
    }
}
