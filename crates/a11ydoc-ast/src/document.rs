//! Document root and traversal
//!
//! A [`Document`] is an ordered sequence of top-level [`Block`]s. Paragraphs
//! and tables are indexed separately: the third paragraph is
//! `Location::TopLevel(2)` no matter how many tables precede it.

use serde::{Deserialize, Serialize};

use crate::block::{Paragraph, Table};
use crate::location::Location;

/// Document-level metadata
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Core-properties title
    pub title: Option<String>,
    /// Primary language tag (e.g. "en-US")
    pub language: Option<String>,
}

impl DocumentMeta {
    /// Title with surrounding whitespace removed, if non-empty
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// Language with surrounding whitespace removed, if non-empty
    pub fn language(&self) -> Option<&str> {
        self.language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }
}

/// A top-level block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

/// The document root
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub metadata: DocumentMeta,
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Top-level paragraphs in reading order
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        })
    }

    /// Top-level tables in reading order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        })
    }

    /// The `index`-th top-level paragraph
    pub fn paragraph(&self, index: usize) -> Option<&Paragraph> {
        self.paragraphs().nth(index)
    }

    /// The `index`-th top-level paragraph, mutably
    pub fn paragraph_mut(&mut self, index: usize) -> Option<&mut Paragraph> {
        self.blocks
            .iter_mut()
            .filter_map(|b| match b {
                Block::Paragraph(p) => Some(p),
                Block::Table(_) => None,
            })
            .nth(index)
    }

    /// The `index`-th top-level table
    pub fn table(&self, index: usize) -> Option<&Table> {
        self.tables().nth(index)
    }

    /// The `index`-th top-level table, mutably
    pub fn table_mut(&mut self, index: usize) -> Option<&mut Table> {
        self.blocks
            .iter_mut()
            .filter_map(|b| match b {
                Block::Table(t) => Some(t),
                Block::Paragraph(_) => None,
            })
            .nth(index)
    }

    /// Number of top-level tables
    pub fn table_count(&self) -> usize {
        self.tables().count()
    }

    /// Resolve a paragraph location
    ///
    /// Returns `None` for document- and table-level locations and for
    /// indices that fall outside the structure.
    pub fn paragraph_at(&self, location: Location) -> Option<&Paragraph> {
        match location {
            Location::TopLevel(index) => self.paragraph(index),
            Location::TableCell {
                table,
                row,
                col,
                paragraph,
            } => self
                .table(table)?
                .cell(row, col)?
                .paragraphs
                .get(paragraph),
            Location::Document | Location::Table { .. } => None,
        }
    }

    /// Every analyzable paragraph with its location
    ///
    /// Top-level paragraphs come first, then the direct paragraphs of each
    /// top-level table's cells. Paragraphs inside nested tables are not
    /// visited.
    pub fn located_paragraphs(&self) -> impl Iterator<Item = (Location, &Paragraph)> {
        let top = self
            .paragraphs()
            .enumerate()
            .map(|(i, p)| (Location::TopLevel(i), p));

        let cells = self.tables().enumerate().flat_map(|(t, table)| {
            table.cells().flat_map(move |(r, c, cell)| {
                cell.paragraphs.iter().enumerate().map(move |(p, para)| {
                    (
                        Location::TableCell {
                            table: t,
                            row: r,
                            col: c,
                            paragraph: p,
                        },
                        para,
                    )
                })
            })
        });

        top.chain(cells)
    }

    /// All text in reading order, one paragraph per line
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            match block {
                Block::Paragraph(p) => {
                    out.push_str(&p.plain_text());
                    out.push('\n');
                }
                Block::Table(t) => {
                    for (_, _, cell) in t.cells() {
                        out.push_str(&cell.plain_text());
                        out.push('\n');
                    }
                }
            }
        }
        out
    }
}
