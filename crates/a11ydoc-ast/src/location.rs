//! Addressable positions inside a [`Document`](crate::Document)
//!
//! Indices are zero-based. Top-level paragraphs and top-level tables are
//! numbered independently, each in reading order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A position an issue can be attached to
///
/// The variant order is the sort order: document-level positions first,
/// then top-level paragraphs, then whole tables, then cell paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// The document as a whole (metadata, global counts)
    Document,
    /// A top-level paragraph, by paragraph index
    TopLevel(usize),
    /// A whole top-level table, by table index
    Table { table: usize },
    /// A paragraph inside a table cell
    TableCell {
        table: usize,
        row: usize,
        col: usize,
        paragraph: usize,
    },
}

impl Location {
    /// Location of the first paragraph in a cell
    pub fn cell(table: usize, row: usize, col: usize) -> Self {
        Location::TableCell {
            table,
            row,
            col,
            paragraph: 0,
        }
    }

    /// Index of the table this location belongs to, if any
    pub fn table_index(&self) -> Option<usize> {
        match self {
            Location::Table { table } | Location::TableCell { table, .. } => Some(*table),
            _ => None,
        }
    }

    /// Whether this location addresses a whole table
    pub fn is_table_level(&self) -> bool {
        matches!(self, Location::Table { .. })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // One-based numbering for human readers
        match self {
            Location::Document => write!(f, "Document"),
            Location::TopLevel(index) => write!(f, "Paragraph {}", index + 1),
            Location::Table { table } => write!(f, "Table {}", table + 1),
            Location::TableCell {
                table,
                row,
                col,
                paragraph,
            } => write!(
                f,
                "Table {}, Row {}, Cell {}, Paragraph {}",
                table + 1,
                row + 1,
                col + 1,
                paragraph + 1
            ),
        }
    }
}
