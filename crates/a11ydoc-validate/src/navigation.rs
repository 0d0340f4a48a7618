//! Document navigation analyzer

use a11ydoc_ast::{Document, Location, Paragraph};
use a11ydoc_core::{Issue, IssueKind};

use crate::thresholds::{
    LONG_DOCUMENT_PARAGRAPHS, PARAGRAPHS_PER_PAGE, TOC_HEADINGS, TOC_HEADING_SCAN,
};
use crate::Analyzer;

/// Whether a paragraph uses one of Word's table-of-contents styles
/// ("toc 1" through "toc 9", "TOC Heading")
fn is_toc_styled(para: &Paragraph) -> bool {
    let Some(style) = para.style() else {
        return false;
    };
    let lower = style.to_ascii_lowercase();
    match lower.strip_prefix("toc") {
        Some(rest) => {
            let rest = rest.trim();
            rest == "heading" || rest.parse::<u8>().is_ok()
        }
        None => false,
    }
}

/// Flags long documents with no table of contents (`MISSING_TOC`)
///
/// A generated table of contents is recognised by its paragraph styles; a
/// typed one by a "Contents" line near the top of the document.
pub struct TocAnalyzer;

impl TocAnalyzer {
    /// Whether the document has a table of contents
    pub fn has_toc(doc: &Document) -> bool {
        doc.paragraphs().any(is_toc_styled)
            || doc.paragraphs().take(TOC_HEADING_SCAN).any(|para| {
                let text = para.plain_text().trim().to_lowercase();
                TOC_HEADINGS.contains(&text.as_str())
            })
    }
}

impl Analyzer for TocAnalyzer {
    fn name(&self) -> &'static str {
        "table-of-contents"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        let paragraphs = doc.located_paragraphs().count();
        if paragraphs <= LONG_DOCUMENT_PARAGRAPHS || Self::has_toc(doc) {
            return Vec::new();
        }

        vec![Issue::new(
            IssueKind::MissingToc,
            Location::Document,
            format!(
                "Long document (~{} pages, {} paragraphs) is missing a table of contents \
                 for navigation",
                paragraphs / PARAGRAPHS_PER_PAGE,
                paragraphs
            ),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11ydoc_ast::{Block, Run};

    fn long_doc(count: usize) -> Document {
        let mut doc = Document::new();
        for i in 0..count {
            doc.push(Block::Paragraph(Paragraph::text(format!("Paragraph {}", i))));
        }
        doc
    }

    #[test]
    fn test_long_document_without_toc() {
        let issues = TocAnalyzer.analyze(&long_doc(151));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::MissingToc);
        assert_eq!(issues[0].location, Location::Document);
        assert!(issues[0].message.starts_with("Long document (~5 pages, 151 paragraphs)"));

        assert!(TocAnalyzer.analyze(&long_doc(150)).is_empty());
    }

    #[test]
    fn test_generated_toc_styles() {
        let mut doc = long_doc(160);
        doc.blocks.insert(
            3,
            Block::Paragraph(Paragraph::styled("toc 1", vec![Run::new("Grading\t4")])),
        );
        assert!(TocAnalyzer::has_toc(&doc));
        assert!(TocAnalyzer.analyze(&doc).is_empty());

        assert!(is_toc_styled(&Paragraph::styled("TOC Heading", vec![])));
        assert!(!is_toc_styled(&Paragraph::styled("Toccata", vec![])));
    }

    #[test]
    fn test_typed_contents_heading_near_top() {
        let mut doc = long_doc(160);
        doc.blocks
            .insert(1, Block::Paragraph(Paragraph::text("  Table of Contents ")));
        assert!(TocAnalyzer.analyze(&doc).is_empty());

        let mut late = long_doc(160);
        late.blocks.insert(40, Block::Paragraph(Paragraph::text("Contents")));
        assert_eq!(TocAnalyzer.analyze(&late).len(), 1);
    }
}
