//! Table analyzers
//!
//! Independent detectors share one header heuristic. A table whose first
//! row looks like a header is treated as a genuine data table: the layout
//! signals are not evaluated for it, and size alone does not flag it.

use std::collections::HashMap;

use a11ydoc_ast::{Document, Location, Table, TableCell};
use a11ydoc_core::{Issue, IssueKind};

use crate::thresholds::{
    CAPTION_PREVIEW_CELLS, CAPTION_PREVIEW_CHARS, DEFAULT_BODY_FONT_SIZE, LARGE_TABLE_COLS,
    LARGE_TABLE_ROWS, LAYOUT_EMPTY_CELL_RATIO, LAYOUT_LABEL_MAX_CHARS, LAYOUT_LABEL_VALUE_RATIO,
    LAYOUT_LENGTH_VARIATION, LAYOUT_VARIANCE_MIN_CELLS, MAX_CELL_CHARS, MAX_TABLES,
    MERGED_CELL_LOCATIONS_SHOWN,
};
use crate::Analyzer;

/// Whether a table's first row looks like a header
///
/// A first-row cell counts as header-like when it has bold text, a
/// background fill, or a font larger than the table body. The row is a
/// header when at least half its cells are header-like, or when the
/// container marks it as a repeating header row.
pub fn has_header_row(table: &Table) -> bool {
    let Some(first) = table.rows.first() else {
        return false;
    };
    if first.is_header {
        return true;
    }
    if first.cells.is_empty() {
        return false;
    }

    let body_size = body_font_size(table);
    let header_like = first
        .cells
        .iter()
        .filter(|cell| has_bold(cell) || has_shading(cell) || max_font_size(cell) > body_size)
        .count();

    header_like * 2 >= first.cells.len()
}

fn has_bold(cell: &TableCell) -> bool {
    cell.paragraphs
        .iter()
        .flat_map(|p| &p.runs)
        .any(|r| r.bold && !r.text.trim().is_empty())
}

fn has_shading(cell: &TableCell) -> bool {
    match cell.shading.as_deref() {
        Some(fill) => {
            let fill = fill.trim();
            !fill.is_empty()
                && !fill.eq_ignore_ascii_case("auto")
                && !fill.eq_ignore_ascii_case("FFFFFF")
        }
        None => false,
    }
}

fn max_font_size(cell: &TableCell) -> f32 {
    cell.paragraphs
        .iter()
        .flat_map(|p| &p.runs)
        .filter(|r| !r.text.trim().is_empty())
        .filter_map(|r| r.font_size)
        .fold(0.0, f32::max)
}

/// Most common explicit font size below the first row
fn body_font_size(table: &Table) -> f32 {
    // Half-points keep the sizes hashable
    let mut counts: HashMap<u32, usize> = HashMap::new();
    for row in table.rows.iter().skip(1) {
        for cell in &row.cells {
            for run in cell.paragraphs.iter().flat_map(|p| &p.runs) {
                if let Some(size) = run.font_size {
                    *counts.entry((size * 2.0).round() as u32).or_default() += 1;
                }
            }
        }
    }

    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
        .map(|(half_points, _)| half_points as f32 / 2.0)
        .unwrap_or(DEFAULT_BODY_FONT_SIZE)
}

fn cell_len(cell: &TableCell) -> usize {
    cell.trimmed_text().chars().count()
}

/// Text length of every cell, row by row
///
/// A vertical-merge continuation shows the text of the cell that starts
/// the merge, so it takes that cell's length. Columns are tracked by grid
/// position so spanned cells keep the rows aligned.
fn cell_lengths(table: &Table) -> Vec<Vec<usize>> {
    let mut above: HashMap<usize, usize> = HashMap::new();
    let mut lengths = Vec::with_capacity(table.rows.len());

    for row in &table.rows {
        let mut grid_col = 0;
        let mut row_lengths = Vec::with_capacity(row.cells.len());
        for cell in &row.cells {
            let len = if cell.is_merge_continuation() {
                above.get(&grid_col).copied().unwrap_or(0)
            } else {
                cell_len(cell)
            };
            above.insert(grid_col, len);
            row_lengths.push(len);
            grid_col += cell.span();
        }
        lengths.push(row_lengths);
    }

    lengths
}

fn preview(table: &Table) -> String {
    table
        .rows
        .first()
        .map(|row| {
            row.cells
                .iter()
                .map(|c| c.trimmed_text().chars().take(20).collect::<String>())
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .unwrap_or_default()
}

/// Flags multi-row tables without a header-like first row (`TABLE_NO_HEADER`)
pub struct TableHeaderAnalyzer;

impl Analyzer for TableHeaderAnalyzer {
    fn name(&self) -> &'static str {
        "table-headers"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        doc.tables()
            .enumerate()
            .filter(|(_, table)| table.row_count() > 1 && !has_header_row(table))
            .map(|(index, table)| {
                Issue::new(
                    IssueKind::TableNoHeader,
                    Location::Table { table: index },
                    format!(
                        "Table {} appears to lack a header row. First row: \"{}\"",
                        index + 1,
                        preview(table)
                    ),
                )
            })
            .collect()
    }
}

/// Flags tables that look like they exist for visual layout (`LAYOUT_TABLE`)
///
/// Signals, any one of which is enough:
/// - a single row or a single column
/// - more than 30% of cells empty
/// - a two-column label/value shape (short first column, longer second)
/// - very uneven cell text lengths
pub struct LayoutTableAnalyzer;

impl LayoutTableAnalyzer {
    /// Reasons a table looks like a layout table, empty when it does not
    pub fn layout_signals(table: &Table) -> Vec<String> {
        if has_header_row(table) {
            return Vec::new();
        }

        let rows = table.row_count();
        let cols = table.column_count();
        let mut reasons = Vec::new();

        if rows == 1 || cols == 1 {
            reasons.push("single row or column".to_string());
        }

        let by_row = cell_lengths(table);
        let lengths: Vec<usize> = by_row.iter().flatten().copied().collect();
        let total = lengths.len();
        if total > 0 {
            let empty = lengths.iter().filter(|&&len| len == 0).count();
            if empty as f64 / total as f64 > LAYOUT_EMPTY_CELL_RATIO {
                reasons.push(format!("{}/{} empty cells", empty, total));
            }
        }

        if cols == 2 && rows > 2 {
            let label_value = by_row
                .iter()
                .filter(|row| match row.as_slice() {
                    &[label, value, ..] => {
                        label > 0 && label < LAYOUT_LABEL_MAX_CHARS && value > label
                    }
                    _ => false,
                })
                .count();
            if label_value as f64 / rows as f64 > LAYOUT_LABEL_VALUE_RATIO {
                reasons.push("label/value pattern".to_string());
            }
        }

        if total > LAYOUT_VARIANCE_MIN_CELLS {
            let n = total as f64;
            let mean = lengths.iter().sum::<usize>() as f64 / n;
            if mean > 0.0 {
                let variance = lengths
                    .iter()
                    .map(|&len| (len as f64 - mean).powi(2))
                    .sum::<f64>()
                    / (n - 1.0);
                if variance.sqrt() / mean > LAYOUT_LENGTH_VARIATION {
                    reasons.push("inconsistent cell content lengths".to_string());
                }
            }
        }

        reasons
    }
}

impl Analyzer for LayoutTableAnalyzer {
    fn name(&self) -> &'static str {
        "layout-tables"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();
        for (index, table) in doc.tables().enumerate() {
            let reasons = Self::layout_signals(table);
            if reasons.is_empty() {
                continue;
            }
            issues.push(Issue::new(
                IssueKind::LayoutTable,
                Location::Table { table: index },
                format!(
                    "Table {} appears to be used for layout ({}). Size: {} rows x {} cols. \
                     Use headings and paragraphs instead.",
                    index + 1,
                    reasons.join("; "),
                    table.row_count(),
                    table.column_count()
                ),
            ));
        }
        issues
    }
}

/// General table usage: too many tables, overlong cells, large headerless tables
pub struct TableUsageAnalyzer;

impl Analyzer for TableUsageAnalyzer {
    fn name(&self) -> &'static str {
        "table-usage"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();

        let count = doc.table_count();
        if count > MAX_TABLES {
            issues.push(Issue::new(
                IssueKind::TooManyTables,
                Location::Document,
                format!(
                    "Document contains {} tables. Heavy table use can harm accessibility; \
                     consider headings and lists.",
                    count
                ),
            ));
        }

        for (index, table) in doc.tables().enumerate() {
            for (row, col, cell) in table.cells() {
                let len = cell_len(cell);
                if len > MAX_CELL_CHARS {
                    issues.push(Issue::new(
                        IssueKind::ExcessiveCellText,
                        Location::cell(index, row, col),
                        format!(
                            "Cell contains {} characters. Consider regular paragraphs \
                             with headings instead.",
                            len
                        ),
                    ));
                }
            }

            let rows = table.row_count();
            let cols = table.column_count();
            if (rows > LARGE_TABLE_ROWS || cols > LARGE_TABLE_COLS) && !has_header_row(table) {
                issues.push(Issue::new(
                    IssueKind::LargeTable,
                    Location::Table { table: index },
                    format!(
                        "Table {} is large ({} rows, {} cols) and lacks a header row.",
                        index + 1,
                        rows,
                        cols
                    ),
                ));
            }
        }

        issues
    }
}

/// Flags rows and columns whose cells are all blank (`EMPTY_TABLE_ROW` / `EMPTY_TABLE_COLUMN`)
pub struct EmptyTableCellsAnalyzer;

impl Analyzer for EmptyTableCellsAnalyzer {
    fn name(&self) -> &'static str {
        "empty-table-rows-columns"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();

        for (index, table) in doc.tables().enumerate() {
            let lengths = cell_lengths(table);
            for (row_index, row) in lengths.iter().enumerate() {
                if row.iter().all(|&len| len == 0) {
                    issues.push(Issue::new(
                        IssueKind::EmptyTableRow,
                        Location::Table { table: index },
                        format!(
                            "Table {}, Row {} is completely empty (likely used for spacing)",
                            index + 1,
                            row_index + 1
                        ),
                    ));
                }
            }

            if table.rows.is_empty() {
                continue;
            }
            for col in 0..table.column_count() {
                let empty = lengths
                    .iter()
                    .all(|row| row.get(col).copied().unwrap_or(0) == 0);
                if empty {
                    issues.push(Issue::new(
                        IssueKind::EmptyTableColumn,
                        Location::Table { table: index },
                        format!(
                            "Table {}, Column {} is completely empty (likely used for spacing)",
                            index + 1,
                            col + 1
                        ),
                    ));
                }
            }
        }

        issues
    }
}

/// Flags tables containing horizontally or vertically merged cells
/// (`TABLE_MERGED_CELLS`)
pub struct MergedCellsAnalyzer;

impl Analyzer for MergedCellsAnalyzer {
    fn name(&self) -> &'static str {
        "merged-cells"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();

        for (index, table) in doc.tables().enumerate() {
            let merged: Vec<String> = table
                .cells()
                .filter(|(_, _, cell)| cell.is_merged())
                .map(|(row, col, _)| format!("Row {}, Col {}", row + 1, col + 1))
                .collect();
            if merged.is_empty() {
                continue;
            }

            let mut shown = merged[..merged.len().min(MERGED_CELL_LOCATIONS_SHOWN)].join("; ");
            if merged.len() > MERGED_CELL_LOCATIONS_SHOWN {
                shown.push_str(&format!(
                    " (and {} more)",
                    merged.len() - MERGED_CELL_LOCATIONS_SHOWN
                ));
            }
            issues.push(Issue::new(
                IssueKind::MergedCells,
                Location::Table { table: index },
                format!(
                    "Table {} contains merged cells which may impact screen reader \
                     navigation. Locations: {}",
                    index + 1,
                    shown
                ),
            ));
        }

        issues
    }
}

/// Flags tables with no alternative-text title or description
/// (`TABLE_MISSING_CAPTION`)
pub struct TableCaptionAnalyzer;

impl Analyzer for TableCaptionAnalyzer {
    fn name(&self) -> &'static str {
        "table-captions"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        doc.tables()
            .enumerate()
            .filter(|(_, table)| !table.has_caption())
            .map(|(index, table)| {
                let first_cells = table
                    .rows
                    .first()
                    .map(|row| {
                        row.cells
                            .iter()
                            .take(CAPTION_PREVIEW_CELLS)
                            .map(|c| c.trimmed_text().chars().take(CAPTION_PREVIEW_CHARS).collect())
                            .collect::<Vec<String>>()
                            .join(" | ")
                    })
                    .unwrap_or_default();
                Issue::new(
                    IssueKind::TableMissingCaption,
                    Location::Table { table: index },
                    format!(
                        "Table {} is missing a caption or description (Table Properties > \
                         Alt Text). Preview: \"{}\"",
                        index + 1,
                        first_cells
                    ),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11ydoc_ast::{Block, Paragraph, Run, TableRow};

    fn doc_with(table: Table) -> Document {
        let mut doc = Document::new();
        doc.push(Block::Table(table));
        doc
    }

    fn bold_first_row(mut table: Table) -> Table {
        for cell in &mut table.rows[0].cells {
            for para in &mut cell.paragraphs {
                for run in &mut para.runs {
                    run.bold = true;
                }
            }
        }
        table
    }

    fn kinds(analyzer: &dyn Analyzer, doc: &Document) -> Vec<IssueKind> {
        analyzer.analyze(doc).into_iter().map(|i| i.kind).collect()
    }

    fn merged(text: &str, marker: &str) -> TableCell {
        TableCell {
            vertical_merge: Some(marker.to_string()),
            ..TableCell::text(text)
        }
    }

    fn schedule() -> Table {
        Table::from_text(vec![
            vec!["Week", "Topic", "Reading"],
            vec!["1", "Introduction", "Ch. 1"],
            vec!["2", "Methods", "Ch. 2"],
        ])
    }

    #[test]
    fn test_header_by_bold() {
        assert!(!has_header_row(&schedule()));
        assert!(has_header_row(&bold_first_row(schedule())));
    }

    #[test]
    fn test_header_by_shading() {
        let mut table = schedule();
        for cell in &mut table.rows[0].cells[..2] {
            cell.shading = Some("D9E2F3".to_string());
        }
        assert!(has_header_row(&table));

        let mut white = schedule();
        for cell in &mut white.rows[0].cells {
            cell.shading = Some("FFFFFF".to_string());
        }
        assert!(!has_header_row(&white));
    }

    #[test]
    fn test_header_by_font_size_relative_to_body() {
        let mut table = schedule();
        for cell in &mut table.rows[0].cells {
            cell.paragraphs[0].runs[0].font_size = Some(14.0);
        }
        for row in &mut table.rows[1..] {
            for cell in &mut row.cells {
                cell.paragraphs[0].runs[0].font_size = Some(12.0);
            }
        }
        assert!(has_header_row(&table));

        // Same size as the body is not enlarged
        for cell in &mut table.rows[0].cells {
            cell.paragraphs[0].runs[0].font_size = Some(12.0);
        }
        assert!(!has_header_row(&table));
    }

    #[test]
    fn test_header_needs_half_the_cells() {
        let mut table = Table::from_text(vec![vec!["A", "B", "C", "D"], vec!["1", "2", "3", "4"]]);
        table.rows[0].cells[0].paragraphs[0].runs[0].bold = true;
        assert!(!has_header_row(&table));
        table.rows[0].cells[1].paragraphs[0].runs[0].bold = true;
        assert!(has_header_row(&table));
    }

    #[test]
    fn test_repeat_header_flag() {
        let mut table = schedule();
        table.rows[0].is_header = true;
        assert!(has_header_row(&table));
    }

    #[test]
    fn test_table_no_header() {
        let doc = doc_with(schedule());
        let issues = TableHeaderAnalyzer.analyze(&doc);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].location, Location::Table { table: 0 });
        assert!(issues[0].message.contains("Week | Topic | Reading"));

        let doc = doc_with(bold_first_row(schedule()));
        assert!(TableHeaderAnalyzer.analyze(&doc).is_empty());
    }

    #[test]
    fn test_single_row_table_needs_no_header() {
        let doc = doc_with(Table::from_text(vec![vec!["a", "b"]]));
        assert!(TableHeaderAnalyzer.analyze(&doc).is_empty());
    }

    #[test]
    fn test_layout_single_cell() {
        let doc = doc_with(Table::from_text(vec![vec!["Welcome to the course"]]));
        assert_eq!(kinds(&LayoutTableAnalyzer, &doc), vec![IssueKind::LayoutTable]);
        assert!(kinds(&TableHeaderAnalyzer, &doc).is_empty());
    }

    #[test]
    fn test_layout_suppressed_by_header() {
        let table = bold_first_row(Table::from_text(vec![vec!["Welcome to the course"]]));
        let doc = doc_with(table);
        assert!(kinds(&LayoutTableAnalyzer, &doc).is_empty());
        assert!(kinds(&TableHeaderAnalyzer, &doc).is_empty());
    }

    #[test]
    fn test_layout_empty_cells() {
        let table = Table::from_text(vec![
            vec!["Name", "", ""],
            vec!["Office", "", "Room 4"],
            vec!["Email", "a@b.edu", ""],
        ]);
        let reasons = LayoutTableAnalyzer::layout_signals(&table);
        assert!(reasons.iter().any(|r| r.contains("empty cells")));
    }

    #[test]
    fn test_layout_label_value() {
        let table = Table::from_text(vec![
            vec!["Instructor", "Dr. Grace Hopper, Department of Computer Science"],
            vec!["Office", "Engineering Building, Room 412"],
            vec!["Hours", "Tuesday and Thursday, 2 to 4 pm"],
        ]);
        let reasons = LayoutTableAnalyzer::layout_signals(&table);
        assert!(reasons.contains(&"label/value pattern".to_string()));
    }

    #[test]
    fn test_layout_length_variation() {
        let long = "x".repeat(400);
        let table = Table::from_text(vec![
            vec!["a", "b", "c"],
            vec!["d", "e", "f"],
            vec!["g", "h", long.as_str()],
        ]);
        let reasons = LayoutTableAnalyzer::layout_signals(&table);
        assert!(reasons.contains(&"inconsistent cell content lengths".to_string()));
    }

    #[test]
    fn test_regular_data_table_is_not_layout() {
        let table = Table::from_text(vec![
            vec!["Week", "Topic", "Due"],
            vec!["1", "Intro", "Quiz"],
            vec!["2", "Design", "Essay"],
        ]);
        assert!(LayoutTableAnalyzer::layout_signals(&table).is_empty());
    }

    #[test]
    fn test_too_many_tables() {
        let mut doc = Document::new();
        for _ in 0..6 {
            doc.push(Block::Table(bold_first_row(schedule())));
        }
        assert_eq!(kinds(&TableUsageAnalyzer, &doc), vec![IssueKind::TooManyTables]);

        doc.blocks.pop();
        assert!(kinds(&TableUsageAnalyzer, &doc).is_empty());
    }

    #[test]
    fn test_excessive_cell_text() {
        let long = "word ".repeat(120);
        let table = bold_first_row(Table::from_text(vec![
            vec!["Policy", "Text"],
            vec!["Late work", long.as_str()],
        ]));
        let issues = TableUsageAnalyzer.analyze(&doc_with(table));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::ExcessiveCellText);
        assert_eq!(issues[0].location, Location::cell(0, 1, 1));
    }

    #[test]
    fn test_large_table_only_without_header() {
        let rows: Vec<Vec<String>> = (0..12)
            .map(|i| vec![format!("r{}", i), format!("v{}", i)])
            .collect();
        let table = Table::from_text(rows);
        assert_eq!(
            kinds(&TableUsageAnalyzer, &doc_with(table.clone())),
            vec![IssueKind::LargeTable]
        );
        assert!(kinds(&TableUsageAnalyzer, &doc_with(bold_first_row(table))).is_empty());
    }

    #[test]
    fn test_empty_rows_and_columns() {
        let table = Table::from_text(vec![
            vec!["Week", "", "Topic"],
            vec!["  ", "", ""],
            vec!["1", "", "Intro"],
        ]);
        let issues = EmptyTableCellsAnalyzer.analyze(&doc_with(table));
        let kinds: Vec<_> = issues.iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![IssueKind::EmptyTableRow, IssueKind::EmptyTableColumn]);
        assert!(issues[0].message.contains("Row 2"));
        assert!(issues[1].message.contains("Column 2"));
    }

    #[test]
    fn test_vertical_merge_continuation_is_not_empty() {
        let table = Table {
            style_id: None,
            caption: None,
            description: None,
            rows: vec![
                TableRow {
                    cells: vec![merged("Week 1", "restart"), TableCell::text("A")],
                    is_header: false,
                },
                TableRow {
                    cells: vec![merged("", "continue"), TableCell::text("B")],
                    is_header: false,
                },
                TableRow {
                    cells: vec![merged("", "continue"), TableCell::text("C")],
                    is_header: false,
                },
            ],
        };
        assert!(LayoutTableAnalyzer::layout_signals(&table).is_empty());
        assert!(EmptyTableCellsAnalyzer.analyze(&doc_with(table)).is_empty());
    }

    #[test]
    fn test_row_of_merge_continuations_is_not_empty() {
        let table = Table {
            style_id: None,
            caption: None,
            description: None,
            rows: vec![
                TableRow {
                    cells: vec![merged("Monday", "restart"), merged("Lab", "restart")],
                    is_header: false,
                },
                TableRow {
                    cells: vec![merged("", "continue"), merged("", "continue")],
                    is_header: false,
                },
            ],
        };
        let kinds = kinds(&EmptyTableCellsAnalyzer, &doc_with(table));
        assert!(!kinds.contains(&IssueKind::EmptyTableRow), "{:?}", kinds);
        assert!(kinds.is_empty());
    }

    #[test]
    fn test_merge_continuation_follows_grid_column() {
        // The spanned first cell shifts the continuation to grid column 2
        let mut wide = TableCell::text("Unit 1");
        wide.grid_span = Some(2);
        let table = Table {
            style_id: None,
            caption: None,
            description: None,
            rows: vec![
                TableRow {
                    cells: vec![wide, merged("Notes", "restart")],
                    is_header: false,
                },
                TableRow {
                    cells: vec![
                        TableCell::text("Quiz"),
                        TableCell::text("Essay"),
                        merged("", "continue"),
                    ],
                    is_header: false,
                },
            ],
        };
        let lengths = cell_lengths(&table);
        assert_eq!(lengths, vec![vec![6, 5], vec![4, 5, 5]]);
    }

    #[test]
    fn test_ragged_rows_count_missing_cells_as_empty() {
        let table = Table {
            style_id: None,
            caption: None,
            description: None,
            rows: vec![
                TableRow {
                    cells: vec![TableCell::text("a"), TableCell::text("")],
                    is_header: false,
                },
                TableRow {
                    cells: vec![TableCell::text("b")],
                    is_header: false,
                },
            ],
        };
        let issues = EmptyTableCellsAnalyzer.analyze(&doc_with(table));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::EmptyTableColumn);
    }

    #[test]
    fn test_merged_cells() {
        let mut wide = TableCell::text("Unit 1");
        wide.grid_span = Some(2);
        let table = Table {
            style_id: None,
            caption: None,
            description: None,
            rows: vec![
                TableRow {
                    cells: vec![wide, merged("Notes", "restart")],
                    is_header: false,
                },
                TableRow {
                    cells: vec![
                        TableCell::text("Quiz"),
                        TableCell::text("Essay"),
                        merged("", "continue"),
                    ],
                    is_header: false,
                },
            ],
        };
        let mut doc = doc_with(bold_first_row(schedule()));
        doc.push(Block::Table(table));

        let issues = MergedCellsAnalyzer.analyze(&doc);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::MergedCells);
        assert_eq!(issues[0].location, Location::Table { table: 1 });
        assert!(issues[0]
            .message
            .ends_with("Locations: Row 1, Col 1; Row 1, Col 2; Row 2, Col 3"));
    }

    #[test]
    fn test_merged_cell_locations_are_capped() {
        let rows: Vec<TableRow> = (0..5)
            .map(|_| TableRow {
                cells: vec![merged("x", "restart")],
                is_header: false,
            })
            .collect();
        let table = Table {
            rows,
            ..Table::default()
        };
        let issues = MergedCellsAnalyzer.analyze(&doc_with(table));
        assert!(issues[0].message.ends_with("Row 3, Col 1 (and 2 more)"));
    }

    #[test]
    fn test_table_caption() {
        let doc = doc_with(schedule());
        let issues = TableCaptionAnalyzer.analyze(&doc);
        assert_eq!(kinds(&TableCaptionAnalyzer, &doc), vec![IssueKind::TableMissingCaption]);
        assert!(issues[0].message.contains("Preview: \"Week | Topic | Reading\""));

        let mut captioned = schedule();
        captioned.description = Some("Weekly topics and readings".to_string());
        assert!(TableCaptionAnalyzer.analyze(&doc_with(captioned)).is_empty());
    }

    #[test]
    fn test_no_tables_no_issues() {
        let mut doc = Document::new();
        doc.push(Block::Paragraph(Paragraph::new(vec![Run::new("Text")])));
        let analyzers: [&dyn Analyzer; 6] = [
            &TableHeaderAnalyzer,
            &LayoutTableAnalyzer,
            &TableUsageAnalyzer,
            &EmptyTableCellsAnalyzer,
            &MergedCellsAnalyzer,
            &TableCaptionAnalyzer,
        ];
        for analyzer in analyzers {
            assert!(analyzer.analyze(&doc).is_empty(), "{}", analyzer.name());
        }
    }
}
