//! Link analyzers
//!
//! Hyperlink display text is the concatenated text of the runs that refer
//! back to the link. Links with blank display text are not judged on their
//! wording.

use std::sync::OnceLock;

use a11ydoc_ast::{Document, Hyperlink, Location, Paragraph};
use a11ydoc_core::{Issue, IssueKind};
use regex::Regex;

use crate::thresholds::{MAX_URL_CHARS, NON_DESCRIPTIVE_LINK_TEXT};
use crate::{preview, Analyzer};

/// Every hyperlink in the document with its location and display text
fn located_links(doc: &Document) -> Vec<(Location, &Hyperlink, String)> {
    let mut links = Vec::new();
    for (location, para) in doc.located_paragraphs() {
        for (id, link) in para.hyperlinks() {
            links.push((location, link, para.link_text(id)));
        }
    }
    links
}

/// Whether display text is itself a URL
///
/// Besides scheme, `www.` and `mailto:` prefixes, a bare host counts when it
/// carries a path (`uwm.edu/syllabus`) or ends in a common top-level domain
/// (`canvas.uwm.edu`).
pub fn is_url_like(text: &str) -> bool {
    static URL_RE: OnceLock<Regex> = OnceLock::new();
    let re = URL_RE.get_or_init(|| {
        Regex::new(concat!(
            r"(?i)^(?:",
            r"(?:[a-z][a-z0-9+.-]*://|www\.|mailto:)\S+",
            r"|[a-z0-9-]+(?:\.[a-z0-9-]+)*\.[a-z]{2,}(?::\d+)?[/?#]\S*",
            r"|[a-z0-9-]+(?:\.[a-z0-9-]+)*\.(?:com|org|edu|net|gov|io|info|us|ca|uk)(?::\d+)?",
            r")$"
        ))
        .expect("url pattern is valid")
    });
    re.is_match(text.trim())
}

/// Whether display text is on the non-descriptive stoplist
pub fn is_non_descriptive(text: &str) -> bool {
    let normalized = text.trim().to_lowercase();
    NON_DESCRIPTIVE_LINK_TEXT.contains(&normalized.as_str())
}

/// Whether a link target points at a PDF file
pub fn is_pdf_target(target: &str) -> bool {
    let lower = target.to_lowercase();
    lower.ends_with(".pdf") || lower.contains(".pdf?") || lower.contains(".pdf#")
}

/// Flags links whose display text is the raw address (`RAW_URL_LINK`)
pub struct RawUrlLinkAnalyzer;

impl Analyzer for RawUrlLinkAnalyzer {
    fn name(&self) -> &'static str {
        "raw-url-links"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        located_links(doc)
            .into_iter()
            .filter(|(_, _, text)| is_url_like(text))
            .map(|(location, _, text)| {
                Issue::new(
                    IssueKind::RawUrlLink,
                    location,
                    format!(
                        "Hyperlink displays the URL directly: \"{}\". Use descriptive link text.",
                        preview(text.trim())
                    ),
                )
            })
            .collect()
    }
}

/// Flags links with text like "click here" (`NON_DESCRIPTIVE_LINK`)
pub struct NonDescriptiveLinkAnalyzer;

impl Analyzer for NonDescriptiveLinkAnalyzer {
    fn name(&self) -> &'static str {
        "non-descriptive-links"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        located_links(doc)
            .into_iter()
            .filter(|(_, _, text)| is_non_descriptive(text))
            .map(|(location, _, text)| {
                Issue::new(
                    IssueKind::NonDescriptiveLink,
                    location,
                    format!(
                        "Link text '{}' does not describe its destination",
                        text.trim()
                    ),
                )
            })
            .collect()
    }
}

/// Flags underlined text that is not a link (`UNDERLINE_NON_LINK`), once per paragraph
pub struct UnderlineNonLinkAnalyzer;

impl UnderlineNonLinkAnalyzer {
    fn first_offender(para: &Paragraph) -> Option<&str> {
        para.runs
            .iter()
            .find(|r| r.underline && r.hyperlink.is_none() && !r.text.trim().is_empty())
            .map(|r| r.text.trim())
    }
}

impl Analyzer for UnderlineNonLinkAnalyzer {
    fn name(&self) -> &'static str {
        "underline-non-links"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        doc.located_paragraphs()
            .filter_map(|(location, para)| {
                Self::first_offender(para).map(|text| {
                    Issue::new(
                        IssueKind::UnderlineNonLink,
                        location,
                        format!(
                            "Underlined text that is not a hyperlink: \"{}\"",
                            preview(text)
                        ),
                    )
                })
            })
            .collect()
    }
}

/// Flags link targets longer than 100 characters (`LONG_URL`)
pub struct LongUrlAnalyzer;

impl Analyzer for LongUrlAnalyzer {
    fn name(&self) -> &'static str {
        "long-urls"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();
        for (location, link, text) in located_links(doc) {
            let Some(target) = link.target.as_deref() else {
                continue;
            };
            let len = target.chars().count();
            if len > MAX_URL_CHARS {
                issues.push(Issue::new(
                    IssueKind::LongUrl,
                    location,
                    format!(
                        "Excessively long URL ({} chars) behind \"{}\": {}...",
                        len,
                        preview(text.trim()),
                        target.chars().take(50).collect::<String>()
                    ),
                ));
            }
        }
        issues
    }
}

/// Flags links to PDF files, whose accessibility must be checked separately (`PDF_LINK`)
pub struct PdfLinkAnalyzer;

impl Analyzer for PdfLinkAnalyzer {
    fn name(&self) -> &'static str {
        "pdf-links"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        located_links(doc)
            .into_iter()
            .filter_map(|(location, link, text)| {
                let target = link.target.as_deref().filter(|t| is_pdf_target(t))?;
                Some(Issue::new(
                    IssueKind::PdfLink,
                    location,
                    format!(
                        "Link to a PDF (verify the PDF is accessible): \"{}\" -> {}",
                        preview(text.trim()),
                        target
                    ),
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11ydoc_ast::{Block, Run};

    fn doc_with_link(text: &str, url: &str) -> Document {
        let mut para = Paragraph::default();
        para.runs.push(Run::new("See "));
        let id = para.add_hyperlink(Hyperlink::external(url));
        para.runs.push(Run::new(text).linked(id).underlined());
        let mut doc = Document::new();
        doc.push(Block::Paragraph(para));
        doc
    }

    #[test]
    fn test_url_like_text() {
        assert!(is_url_like("https://uwm.edu/syllabus"));
        assert!(is_url_like("www.uwm.edu"));
        assert!(is_url_like("mailto:help@uwm.edu"));
        assert!(is_url_like(" HTTP://EXAMPLE.COM "));
        assert!(!is_url_like("Course syllabus PDF"));
        assert!(!is_url_like("visit https://uwm.edu"));
    }

    #[test]
    fn test_bare_host_is_url_like() {
        assert!(is_url_like("uwm.edu/syllabus"));
        assert!(is_url_like("canvas.uwm.edu"));
        assert!(is_url_like("library.example.ac.nz/reserves?id=42"));
        assert!(!is_url_like("Syllabus"));
        assert!(!is_url_like("e.g."));
        assert!(!is_url_like("syllabus.docx"));
        assert!(!is_url_like("Ch. 1"));

        let doc = doc_with_link("uwm.edu/syllabus", "https://uwm.edu/syllabus");
        let issues = RawUrlLinkAnalyzer.analyze(&doc);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::RawUrlLink);
    }

    #[test]
    fn test_raw_url_link() {
        let doc = doc_with_link("https://uwm.edu/registrar", "https://uwm.edu/registrar");
        let issues = RawUrlLinkAnalyzer.analyze(&doc);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].location, Location::TopLevel(0));
    }

    #[test]
    fn test_non_descriptive_link() {
        let doc = doc_with_link("click here", "https://uwm.edu");
        let issues = NonDescriptiveLinkAnalyzer.analyze(&doc);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::NonDescriptiveLink);

        let doc = doc_with_link(" Click Here ", "https://uwm.edu");
        assert_eq!(NonDescriptiveLinkAnalyzer.analyze(&doc).len(), 1);
    }

    #[test]
    fn test_descriptive_link_passes() {
        let doc = doc_with_link("Course syllabus PDF", "https://uwm.edu/syllabus.pdf");
        assert!(NonDescriptiveLinkAnalyzer.analyze(&doc).is_empty());
        assert!(RawUrlLinkAnalyzer.analyze(&doc).is_empty());
    }

    #[test]
    fn test_link_text_spans_runs() {
        let mut para = Paragraph::default();
        let id = para.add_hyperlink(Hyperlink::external("https://uwm.edu"));
        para.runs.push(Run::new("read ").linked(id));
        para.runs.push(Run::new("more").linked(id));
        let mut doc = Document::new();
        doc.push(Block::Paragraph(para));
        assert_eq!(NonDescriptiveLinkAnalyzer.analyze(&doc).len(), 1);
    }

    #[test]
    fn test_underline_non_link() {
        let mut para = Paragraph::default();
        para.runs.push(Run::new("Important").underlined());
        para.runs.push(Run::new(" and ").underlined());
        let mut doc = Document::new();
        doc.push(Block::Paragraph(para));
        let issues = UnderlineNonLinkAnalyzer.analyze(&doc);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("Important"));
    }

    #[test]
    fn test_underlined_link_is_fine() {
        let doc = doc_with_link("Registrar", "https://uwm.edu/registrar");
        assert!(UnderlineNonLinkAnalyzer.analyze(&doc).is_empty());
    }

    #[test]
    fn test_long_url() {
        let url = format!("https://uwm.edu/{}", "a".repeat(100));
        let doc = doc_with_link("Library guide", &url);
        assert_eq!(LongUrlAnalyzer.analyze(&doc).len(), 1);

        let doc = doc_with_link("Library guide", "https://uwm.edu/library");
        assert!(LongUrlAnalyzer.analyze(&doc).is_empty());
    }

    #[test]
    fn test_pdf_targets() {
        assert!(is_pdf_target("https://uwm.edu/handbook.PDF"));
        assert!(is_pdf_target("https://uwm.edu/handbook.pdf?v=2"));
        assert!(is_pdf_target("https://uwm.edu/handbook.pdf#page=3"));
        assert!(!is_pdf_target("https://uwm.edu/pdf-guide"));

        let doc = doc_with_link("Student handbook", "https://uwm.edu/handbook.pdf");
        let issues = PdfLinkAnalyzer.analyze(&doc);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, a11ydoc_core::Severity::Info);
    }

    #[test]
    fn test_link_in_table_cell() {
        let mut table = a11ydoc_ast::Table::from_text(vec![vec!["Resources"]]);
        let para = &mut table.rows[0].cells[0].paragraphs[0];
        let id = para.add_hyperlink(Hyperlink::external("https://uwm.edu"));
        para.runs.push(Run::new("here").linked(id));
        let mut doc = Document::new();
        doc.push(Block::Table(table));

        let issues = NonDescriptiveLinkAnalyzer.analyze(&doc);
        assert_eq!(issues[0].location, Location::cell(0, 0, 0));
    }
}
