//! a11ydoc-ast - Document model definitions
//!
//! This crate provides the in-memory representation of a word-processing
//! document that every a11ydoc analyzer reads: top-level paragraphs and
//! tables in reading order, their runs and formatting, hyperlinks, images,
//! and document metadata.
//!
//! Addressing inside the model is done with [`Location`], a tagged variant
//! that distinguishes top-level paragraphs from paragraphs nested in table
//! cells.
//!
//! # Example
//!
//! ```
//! use a11ydoc_ast::{Block, Document, Location, Paragraph, Run};
//!
//! let mut doc = Document::new();
//! doc.push(Block::Paragraph(Paragraph::styled(
//!     "Heading 1",
//!     vec![Run::new("Course Overview")],
//! )));
//!
//! let located: Vec<_> = doc.located_paragraphs().collect();
//! assert_eq!(located[0].0, Location::TopLevel(0));
//! assert_eq!(located[0].1.heading_level(), Some(1));
//! ```

pub mod block;
pub mod document;
pub mod location;

pub use block::{
    Alignment, Highlight, Hyperlink, HyperlinkId, Image, NumberingRef, Paragraph, Run, Table,
    TableCell, TableRow,
};
pub use document::{Block, Document, DocumentMeta};
pub use location::Location;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
