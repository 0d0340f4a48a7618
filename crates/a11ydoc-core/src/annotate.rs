//! Document annotation
//!
//! Produces a marked copy of a document: one visible marker per distinct
//! issue location, prepended to the flagged paragraph. Markers never reorder
//! existing content, and the source document is never touched.
//!
//! | Location | Marker placement | Highlight |
//! |----------|------------------|-----------|
//! | `TopLevel` / `TableCell` | first run of the paragraph | yellow, also applied to the paragraph's unhighlighted runs |
//! | `Table` | first paragraph of the table's first cell | bright green |
//! | `Document` | new paragraph at the top of the document | yellow |

use std::collections::{BTreeMap, BTreeSet};

use a11ydoc_ast::{Block, Document, Highlight, Location, Paragraph, Run};
use tracing::{debug, warn};

use crate::error::AnnotationError;
use crate::issue::{Issue, IssueKind};

/// Marker font size in points
pub const MARKER_FONT_SIZE: f32 = 9.0;

/// Marker text colour
pub const MARKER_COLOR: &str = "FF0000";

/// An annotated copy of a document
#[derive(Debug, Clone, PartialEq)]
pub struct MarkedDocument {
    pub document: Document,
    /// Number of markers placed
    pub markers_inserted: usize,
    /// Locations that could not be resolved
    pub skipped: Vec<AnnotationError>,
}

/// Marker label for a set of issue kinds: `[KIND_A, KIND_B] `
pub fn marker_text<'a>(kinds: impl IntoIterator<Item = &'a IssueKind>) -> String {
    let labels: Vec<&str> = kinds.into_iter().map(IssueKind::as_str).collect();
    format!("[{}] ", labels.join(", "))
}

fn marker_run(text: String, highlight: Highlight) -> Run {
    Run {
        text,
        bold: true,
        font_size: Some(MARKER_FONT_SIZE),
        color: Some(MARKER_COLOR.to_string()),
        highlight: Some(highlight),
        ..Default::default()
    }
}

/// Group issue kinds by location
pub fn group_by_location(issues: &[Issue]) -> BTreeMap<Location, BTreeSet<IssueKind>> {
    let mut groups: BTreeMap<Location, BTreeSet<IssueKind>> = BTreeMap::new();
    for issue in issues {
        groups.entry(issue.location).or_default().insert(issue.kind);
    }
    groups
}

/// Create a marked copy of `doc` for the given issues
///
/// Locations are resolved against `doc` itself. A location that does not
/// exist there is skipped, logged, and recorded in
/// [`MarkedDocument::skipped`]; every other marker is still placed.
pub fn annotate(doc: &Document, issues: &[Issue]) -> MarkedDocument {
    let groups = group_by_location(issues);
    let mut marked = doc.clone();
    let mut markers_inserted = 0;
    let mut skipped = Vec::new();
    let mut document_kinds = None;

    for (location, kinds) in &groups {
        let text = marker_text(kinds);
        let placed = match *location {
            Location::Document => {
                // Inserting a block shifts paragraph indices, so this goes last
                document_kinds = Some(text);
                continue;
            }
            Location::TopLevel(index) => marked
                .paragraph_mut(index)
                .map(|para| mark_paragraph(para, text)),
            Location::TableCell {
                table,
                row,
                col,
                paragraph,
            } => marked
                .table_mut(table)
                .and_then(|t| t.rows.get_mut(row))
                .and_then(|r| r.cells.get_mut(col))
                .and_then(|c| c.paragraphs.get_mut(paragraph))
                .map(|para| mark_paragraph(para, text)),
            Location::Table { table } => marked
                .table_mut(table)
                .and_then(|t| t.rows.first_mut())
                .and_then(|r| r.cells.first_mut())
                .map(|cell| {
                    if cell.paragraphs.is_empty() {
                        cell.paragraphs.push(Paragraph::default());
                    }
                    cell.paragraphs[0]
                        .runs
                        .insert(0, marker_run(text, Highlight::BrightGreen));
                }),
        };

        match placed {
            Some(()) => markers_inserted += 1,
            None => {
                let err = AnnotationError::UnresolvedLocation {
                    location: *location,
                };
                warn!(%location, "skipping marker: {}", err);
                skipped.push(err);
            }
        }
    }

    if let Some(text) = document_kinds {
        let para = Paragraph::new(vec![marker_run(text, Highlight::Yellow)]);
        marked.blocks.insert(0, Block::Paragraph(para));
        markers_inserted += 1;
    }

    debug!(markers_inserted, skipped = skipped.len(), "annotation complete");

    MarkedDocument {
        document: marked,
        markers_inserted,
        skipped,
    }
}

fn mark_paragraph(para: &mut Paragraph, text: String) {
    for run in para.runs.iter_mut().filter(|r| r.highlight.is_none()) {
        run.highlight = Some(Highlight::Yellow);
    }
    para.runs.insert(0, marker_run(text, Highlight::Yellow));
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11ydoc_ast::{Table, TableCell, TableRow};

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.push(Block::Paragraph(Paragraph::text("First")));
        doc.push(Block::Table(Table::from_text(vec![
            vec!["Week", "Topic"],
            vec!["1", "Intro"],
        ])));
        doc.push(Block::Paragraph(Paragraph::text("Second")));
        doc
    }

    fn issue(kind: IssueKind, location: Location) -> Issue {
        Issue::new(kind, location, "test")
    }

    #[test]
    fn test_one_marker_per_location() {
        let doc = sample();
        let issues = vec![
            issue(IssueKind::SmallFont, Location::TopLevel(1)),
            issue(IssueKind::SmallFont, Location::TopLevel(1)),
        ];
        let marked = annotate(&doc, &issues);

        assert_eq!(marked.markers_inserted, 1);
        let para = marked.document.paragraph(1).unwrap();
        let markers = para.runs.iter().filter(|r| r.text.starts_with('[')).count();
        assert_eq!(markers, 1);
        assert_eq!(para.runs[0].text, "[SMALL_FONT] ");
    }

    #[test]
    fn test_distinct_kinds_share_one_marker() {
        let doc = sample();
        let issues = vec![
            issue(IssueKind::SmallFont, Location::TopLevel(0)),
            issue(IssueKind::AllCapsBlock, Location::TopLevel(0)),
            issue(IssueKind::SmallFont, Location::TopLevel(0)),
        ];
        let marked = annotate(&doc, &issues);
        let first = &marked.document.paragraph(0).unwrap().runs[0];
        assert_eq!(first.text, "[ALL_CAPS_BLOCK, SMALL_FONT] ");
        assert!(first.bold);
        assert_eq!(first.font_size, Some(MARKER_FONT_SIZE));
        assert_eq!(first.highlight, Some(Highlight::Yellow));
    }

    #[test]
    fn test_source_document_unchanged() {
        let doc = sample();
        let before = doc.clone();
        let issues = vec![
            issue(IssueKind::SmallFont, Location::TopLevel(0)),
            issue(IssueKind::LayoutTable, Location::Table { table: 0 }),
            issue(IssueKind::MissingTitle, Location::Document),
        ];
        let _ = annotate(&doc, &issues);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_paragraph_content_is_highlighted_not_reordered() {
        let doc = sample();
        let marked = annotate(&doc, &[issue(IssueKind::FullJustification, Location::TopLevel(0))]);
        let para = marked.document.paragraph(0).unwrap();
        assert_eq!(para.runs.len(), 2);
        assert_eq!(para.runs[1].text, "First");
        assert_eq!(para.runs[1].highlight, Some(Highlight::Yellow));
    }

    #[test]
    fn test_table_marker_uses_distinct_highlight() {
        let doc = sample();
        let marked = annotate(
            &doc,
            &[
                issue(IssueKind::TableNoHeader, Location::Table { table: 0 }),
                issue(IssueKind::LayoutTable, Location::Table { table: 0 }),
            ],
        );
        let cell = marked.document.table(0).unwrap().cell(0, 0).unwrap();
        let marker = &cell.paragraphs[0].runs[0];
        assert_eq!(marker.text, "[TABLE_NO_HEADER, LAYOUT_TABLE] ");
        assert_eq!(marker.highlight, Some(Highlight::BrightGreen));
        // Cell content itself stays unhighlighted
        assert_eq!(cell.paragraphs[0].runs[1].highlight, None);
    }

    #[test]
    fn test_table_marker_in_empty_first_cell() {
        let mut doc = Document::new();
        doc.push(Block::Table(Table {
            style_id: None,
            caption: None,
            description: None,
            rows: vec![TableRow {
                cells: vec![TableCell::default()],
                is_header: false,
            }],
        }));
        let marked = annotate(&doc, &[issue(IssueKind::LayoutTable, Location::Table { table: 0 })]);
        let cell = marked.document.table(0).unwrap().cell(0, 0).unwrap();
        assert_eq!(cell.paragraphs.len(), 1);
        assert_eq!(cell.paragraphs[0].runs[0].text, "[LAYOUT_TABLE] ");
    }

    #[test]
    fn test_cell_paragraph_marker() {
        let doc = sample();
        let marked = annotate(&doc, &[issue(IssueKind::SmallFont, Location::cell(0, 1, 1))]);
        let cell = marked.document.table(0).unwrap().cell(1, 1).unwrap();
        assert_eq!(cell.paragraphs[0].plain_text(), "[SMALL_FONT] Intro");
    }

    #[test]
    fn test_document_marker_inserted_last_at_top() {
        let doc = sample();
        let marked = annotate(
            &doc,
            &[
                issue(IssueKind::MissingTitle, Location::Document),
                issue(IssueKind::SmallFont, Location::TopLevel(0)),
            ],
        );
        assert_eq!(marked.markers_inserted, 2);
        assert_eq!(
            marked.document.paragraph(0).unwrap().plain_text(),
            "[MISSING_TITLE] "
        );
        // The original first paragraph kept its own marker
        assert_eq!(
            marked.document.paragraph(1).unwrap().plain_text(),
            "[SMALL_FONT] First"
        );
    }

    #[test]
    fn test_unresolved_location_is_skipped() {
        let doc = sample();
        let marked = annotate(
            &doc,
            &[
                issue(IssueKind::SmallFont, Location::TopLevel(42)),
                issue(IssueKind::SmallFont, Location::cell(3, 0, 0)),
                issue(IssueKind::SmallFont, Location::TopLevel(1)),
            ],
        );
        assert_eq!(marked.markers_inserted, 1);
        assert_eq!(marked.skipped.len(), 2);
        assert_eq!(
            marked.skipped[0],
            AnnotationError::UnresolvedLocation {
                location: Location::TopLevel(42)
            }
        );
    }
}
