//! Document metadata analyzer

use a11ydoc_ast::{Document, Location};
use a11ydoc_core::{Issue, IssueKind};

use crate::Analyzer;

/// Checks core document properties
///
/// - `MISSING_TITLE`: title property empty or absent
/// - `MISSING_LANGUAGE`: no document language
pub struct MetadataAnalyzer;

impl Analyzer for MetadataAnalyzer {
    fn name(&self) -> &'static str {
        "document-metadata"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();

        if doc.metadata.title().is_none() {
            issues.push(Issue::new(
                IssueKind::MissingTitle,
                Location::Document,
                "Document is missing a title in its properties (File > Info > Properties)",
            ));
        }

        if doc.metadata.language().is_none() {
            issues.push(Issue::new(
                IssueKind::MissingLanguage,
                Location::Document,
                "Document has no language setting; screen readers need it to pick a voice",
            ));
        }

        issues
    }
}
