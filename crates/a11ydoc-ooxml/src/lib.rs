//! # a11ydoc-ooxml
//!
//! DOCX (Office Open XML) adapter for a11ydoc.
//!
//! This crate provides functionality to:
//! - Read a DOCX file into the [`a11ydoc_ast::Document`] model
//! - Resolve style names, hyperlink targets and core properties
//! - Write an annotated copy of the document back into the source package
//!
//! ## Example: Reading a Document
//!
//! ```no_run
//! use a11ydoc_ooxml::DocxFile;
//!
//! let file = DocxFile::open("syllabus.docx")?;
//! for (location, para) in file.document().located_paragraphs() {
//!     println!("{}: {}", location, para.plain_text());
//! }
//! # Ok::<(), a11ydoc_ooxml::OoxmlError>(())
//! ```

pub mod archive;
pub mod document;
pub mod docx;
pub mod error;
pub mod properties;
pub mod relationships;
pub mod styles;
pub mod writer;

mod xml;

#[cfg(test)]
pub(crate) mod test_utils;

pub use archive::OoxmlArchive;
pub use docx::{read_archive, read_docx, DocxFile};
pub use error::{OoxmlError, Result};
pub use relationships::Relationships;
pub use styles::StyleSheet;
pub use writer::DocxWriter;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
