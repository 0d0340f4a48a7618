//! Image analyzer

use a11ydoc_ast::Document;
use a11ydoc_core::{Issue, IssueKind};

use crate::Analyzer;

/// Flags every embedded image for manual alt-text review (`IMAGE_REVIEW`,
/// advisory), and images with no alt text at all (`MISSING_ALT_TEXT`)
pub struct ImageAnalyzer;

impl Analyzer for ImageAnalyzer {
    fn name(&self) -> &'static str {
        "images"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();
        for (location, para) in doc.located_paragraphs() {
            for image in para.images() {
                let label = image.name.as_deref().unwrap_or("image");
                issues.push(Issue::new(
                    IssueKind::ImageReview,
                    location,
                    format!("Verify that '{}' has descriptive alt text", label),
                ));
                if !image.has_alt_text() {
                    issues.push(Issue::new(
                        IssueKind::MissingAltText,
                        location,
                        format!("Image '{}' has no alt text", label),
                    ));
                }
            }
        }
        issues
    }
}
