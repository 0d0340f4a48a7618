//! Manual alignment (pseudo-table) analyzer

use std::sync::OnceLock;

use a11ydoc_ast::Document;
use a11ydoc_core::{Issue, IssueKind};
use regex::Regex;

use crate::{preview, Analyzer};

/// Flags paragraphs that line text up in columns with runs of tabs or spaces
/// (`PSEUDO_TABLE`)
///
/// Two or more consecutive tabs, or three or more consecutive spaces,
/// between two pieces of text. Leading and trailing whitespace is ignored.
pub struct PseudoTableAnalyzer;

impl PseudoTableAnalyzer {
    /// Whether the text uses whitespace runs as column separators
    pub fn has_column_gap(text: &str) -> bool {
        static GAP_RE: OnceLock<Regex> = OnceLock::new();
        let re = GAP_RE.get_or_init(|| {
            Regex::new(r"\S[ \t]*(?:\t{2,}| {3,})[ \t]*\S").expect("gap pattern is valid")
        });
        re.is_match(text)
    }
}

impl Analyzer for PseudoTableAnalyzer {
    fn name(&self) -> &'static str {
        "pseudo-tables"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();
        for (location, para) in doc.located_paragraphs() {
            let text = para.plain_text();
            if Self::has_column_gap(&text) {
                issues.push(Issue::new(
                    IssueKind::PseudoTable,
                    location,
                    format!(
                        "Tabs or spaces used to align columns; use a real table: \"{}\"",
                        preview(&text)
                    ),
                ));
            }
        }
        issues
    }
}
