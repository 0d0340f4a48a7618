//! List usage analyzers
//!
//! Consecutive list paragraphs form one list. A table or a non-list
//! paragraph ends it, and each table cell holds its own lists.

use std::sync::OnceLock;

use a11ydoc_ast::{Block, Document, Location, Paragraph};
use a11ydoc_core::{Issue, IssueKind};
use regex::Regex;

use crate::thresholds::{
    LAYOUT_LIST_LENGTH_VARIATION, LAYOUT_LIST_LONG_ITEM_CHARS, LAYOUT_LIST_MIN_ITEMS,
    LAYOUT_LIST_SINGLE_MAX_CHARS,
};
use crate::{preview, Analyzer};

type Located<'a> = (Location, &'a Paragraph);

/// Paragraph sequences in reading order: top-level stretches between
/// tables, then the paragraphs of each table cell
fn paragraph_sequences(doc: &Document) -> Vec<Vec<Located<'_>>> {
    let mut sequences = Vec::new();
    let mut current = Vec::new();
    let mut para_index = 0;

    for block in &doc.blocks {
        match block {
            Block::Paragraph(para) => {
                current.push((Location::TopLevel(para_index), para));
                para_index += 1;
            }
            Block::Table(_) => sequences.push(std::mem::take(&mut current)),
        }
    }
    sequences.push(current);

    for (t, table) in doc.tables().enumerate() {
        for (row, col, cell) in table.cells() {
            sequences.push(
                cell.paragraphs
                    .iter()
                    .enumerate()
                    .map(|(p, para)| {
                        let location = Location::TableCell {
                            table: t,
                            row,
                            col,
                            paragraph: p,
                        };
                        (location, para)
                    })
                    .collect(),
            );
        }
    }

    sequences
}

/// Groups of consecutive list paragraphs
fn lists(doc: &Document) -> Vec<Vec<Located<'_>>> {
    let mut lists = Vec::new();
    for sequence in paragraph_sequences(doc) {
        let mut current: Vec<Located<'_>> = Vec::new();
        for item in sequence {
            if item.1.is_list_item() {
                current.push(item);
            } else if !current.is_empty() {
                lists.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            lists.push(current);
        }
    }
    lists
}

/// One-based nesting level of a list paragraph
///
/// Taken from the numbering level when present, otherwise from a trailing
/// number in the style name ("List Bullet 2"), otherwise 1.
pub fn list_level(para: &Paragraph) -> u32 {
    if let Some(numbering) = para.numbering {
        return numbering.level + 1;
    }
    para.style()
        .and_then(|style| {
            let digits = style.trim_end().rsplit(' ').next()?;
            digits.parse::<u32>().ok()
        })
        .filter(|level| *level > 0)
        .unwrap_or(1)
}

/// Flags paragraphs that fake a list with literal bullets or numbers
/// (`MANUAL_LIST`)
///
/// Matches a leading hyphen or asterisk followed by whitespace, a bullet
/// glyph, or one to three digits followed by `.` or `)` and whitespace.
/// Paragraphs with a numbering property or a list style are real lists.
pub struct ManualListAnalyzer;

impl ManualListAnalyzer {
    /// Whether the text starts with a manual bullet or number
    pub fn has_manual_marker(text: &str) -> bool {
        static BULLET_RE: OnceLock<Regex> = OnceLock::new();
        let re = BULLET_RE.get_or_init(|| {
            Regex::new(r"^(?:[-*]\s+|[•·○■□►▪–—]\s*|\d{1,3}[.)]\s+)\S")
                .expect("bullet pattern is valid")
        });
        re.is_match(text.trim_start())
    }
}

impl Analyzer for ManualListAnalyzer {
    fn name(&self) -> &'static str {
        "manual-lists"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();
        for (location, para) in doc.located_paragraphs() {
            if para.is_list_item() {
                continue;
            }
            let text = para.plain_text();
            if Self::has_manual_marker(&text) {
                issues.push(Issue::new(
                    IssueKind::ManualList,
                    location,
                    format!(
                        "Manually typed list item; use a built-in list style: \"{}\"",
                        preview(&text)
                    ),
                ));
            }
        }
        issues
    }
}

/// Flags list items that skip a nesting level (`INCONSISTENT_LIST_HIERARCHY`)
pub struct ListHierarchyAnalyzer;

impl Analyzer for ListHierarchyAnalyzer {
    fn name(&self) -> &'static str {
        "list-hierarchy"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();
        for list in lists(doc) {
            let mut previous = 0;
            for (location, para) in list {
                let level = list_level(para);
                if level > previous + 1 {
                    issues.push(Issue::new(
                        IssueKind::InconsistentListHierarchy,
                        location,
                        format!(
                            "List skips from level {} to level {} (levels should increase \
                             by one): \"{}\"",
                            previous,
                            level,
                            preview(para.plain_text().trim())
                        ),
                    ));
                }
                previous = level;
            }
        }
        issues
    }
}

/// Flags lists used for indentation rather than grouping (`LAYOUT_LIST`)
///
/// Either a single-item list holding a long passage, or a list of three or
/// more items whose lengths vary wildly with at least one very long item.
pub struct LayoutListAnalyzer;

impl Analyzer for LayoutListAnalyzer {
    fn name(&self) -> &'static str {
        "layout-lists"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();

        for list in lists(doc) {
            let lengths: Vec<usize> = list
                .iter()
                .map(|(_, para)| para.plain_text().trim().chars().count())
                .collect();
            let (location, first) = list[0];

            if list.len() == 1 && lengths[0] > LAYOUT_LIST_SINGLE_MAX_CHARS {
                issues.push(Issue::new(
                    IssueKind::LayoutList,
                    location,
                    format!(
                        "Single-item list with long text (likely used for indentation): \"{}\"",
                        preview(first.plain_text().trim())
                    ),
                ));
                continue;
            }

            if list.len() >= LAYOUT_LIST_MIN_ITEMS {
                let n = lengths.len() as f64;
                let mean = lengths.iter().sum::<usize>() as f64 / n;
                let max = lengths.iter().copied().max().unwrap_or(0);
                if mean > 0.0 && max > LAYOUT_LIST_LONG_ITEM_CHARS {
                    let variance = lengths
                        .iter()
                        .map(|&len| (len as f64 - mean).powi(2))
                        .sum::<f64>()
                        / n;
                    if variance.sqrt() / mean > LAYOUT_LIST_LENGTH_VARIATION {
                        issues.push(Issue::new(
                            IssueKind::LayoutList,
                            location,
                            format!(
                                "List with inconsistent item lengths (may be used for layout). \
                                 Items: {}",
                                list.len()
                            ),
                        ));
                    }
                }
            }
        }

        issues
    }
}
