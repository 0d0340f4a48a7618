//! Opening a DOCX file as a [`Document`] and writing marked copies

use std::path::Path;

use a11ydoc_ast::{Document, DocumentMeta};
use tracing::{debug, info};

use crate::archive::OoxmlArchive;
use crate::document::parse_body;
use crate::error::Result;
use crate::properties::parse_core_properties;
use crate::relationships::Relationships;
use crate::styles::StyleSheet;
use crate::writer::DocxWriter;

/// A DOCX package together with its parsed document model
///
/// The archive is kept so that a marked copy can be written back with
/// every part the model does not cover preserved.
#[derive(Debug, Clone)]
pub struct DocxFile {
    archive: OoxmlArchive,
    document: Document,
}

impl DocxFile {
    /// Open and parse a DOCX file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Opening document");
        Self::from_archive(OoxmlArchive::open(path)?)
    }

    /// Parse an in-memory DOCX file
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_archive(OoxmlArchive::from_bytes(bytes)?)
    }

    /// Parse an already unpacked archive
    pub fn from_archive(archive: OoxmlArchive) -> Result<Self> {
        let document = read_archive(&archive)?;
        Ok(Self { archive, document })
    }

    /// The parsed document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The underlying archive
    pub fn archive(&self) -> &OoxmlArchive {
        &self.archive
    }

    /// Consume and return the parsed document
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Package `marked` (usually an annotated copy of [`Self::document`])
    /// into a copy of this file's archive
    pub fn marked_archive(&self, marked: &Document) -> Result<OoxmlArchive> {
        DocxWriter::write(marked, &self.archive)
    }

    /// Write `marked` to `path` as a DOCX file
    pub fn write_marked<P: AsRef<Path>>(&self, marked: &Document, path: P) -> Result<()> {
        let path = path.as_ref();
        self.marked_archive(marked)?.write_to_file(path)?;
        info!(path = %path.display(), "Wrote marked document");
        Ok(())
    }
}

/// Build the document model from an unpacked archive
pub fn read_archive(archive: &OoxmlArchive) -> Result<Document> {
    let styles = match archive.styles_xml() {
        Some(xml) => StyleSheet::parse(xml)?,
        None => StyleSheet::default(),
    };
    let rels = match archive.document_rels_xml() {
        Some(xml) => Relationships::parse(xml)?,
        None => Relationships::new(),
    };
    let metadata = match archive.core_properties_xml() {
        Some(xml) => parse_core_properties(xml)?,
        None => DocumentMeta::default(),
    };

    let blocks = parse_body(archive.document_xml()?, &styles, &rels)?;
    debug!(
        styles = styles.len(),
        relationships = rels.len(),
        has_title = metadata.title().is_some(),
        "Read document parts"
    );

    Ok(Document { metadata, blocks })
}

/// Open a DOCX file and return its document model
pub fn read_docx<P: AsRef<Path>>(path: P) -> Result<Document> {
    Ok(DocxFile::open(path)?.into_document())
}
