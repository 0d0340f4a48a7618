//! Error types for DOCX operations

use thiserror::Error;

/// A `.docx` file that cannot be opened, parsed, or written
///
/// Any of these is fatal for an analysis run: it is raised before a single
/// analyzer sees the document.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// Error reading or writing the ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing XML content
    #[error("XML parsing error in {part}: {source}")]
    Xml {
        part: String,
        #[source]
        source: quick_xml::Error,
    },

    /// Required part not found in archive
    #[error("Required file not found: {0}")]
    MissingFile(String),

    /// Invalid document structure
    #[error("Invalid document structure: {0}")]
    InvalidStructure(String),
}

impl OoxmlError {
    pub(crate) fn xml(part: &str, source: quick_xml::Error) -> Self {
        OoxmlError::Xml {
            part: part.to_string(),
            source,
        }
    }
}

/// Result type for DOCX operations
pub type Result<T> = std::result::Result<T, OoxmlError>;
