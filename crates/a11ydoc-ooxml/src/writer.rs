//! DOCX writer for marked documents
//!
//! Regenerates `word/document.xml` from the model into a copy of the
//! source archive. Styles, numbering, media, headers and every other part
//! are carried over untouched, as are the root element's namespace
//! declarations and the body-level section properties. Relationship IDs
//! read from the source are reused; a hyperlink that has a target but no
//! relationship gets a new one.
//!
//! Formatting the model does not capture (fonts, indentation, borders,
//! column widths, floating image placement) is not reproduced.

use a11ydoc_ast::{Block, Document, Hyperlink, Image, Paragraph, Run, Table, TableCell};
use tracing::debug;

use crate::archive::{OoxmlArchive, DOCUMENT_PART, DOCUMENT_RELS_PART};
use crate::error::{OoxmlError, Result};
use crate::relationships::Relationships;
use crate::xml::escape_xml;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const WP_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
const A_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const PIC_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";

/// Fallback image extent (one inch) when the model has none
const DEFAULT_EXTENT_EMU: i64 = 914_400;
/// Grid column width in twentieths of a point
const GRID_COL_WIDTH: u32 = 2000;

/// Serializes a [`Document`] back into a DOCX package
pub struct DocxWriter {
    output: String,
    relationships: Relationships,
    relationships_changed: bool,
    next_drawing_id: u32,
}

impl DocxWriter {
    fn new(relationships: Relationships) -> Self {
        Self {
            output: String::new(),
            relationships,
            relationships_changed: false,
            next_drawing_id: 1,
        }
    }

    /// Write `doc` into a copy of `source`, replacing only the document
    /// part (and the relationships part when links were added)
    pub fn write(doc: &Document, source: &OoxmlArchive) -> Result<OoxmlArchive> {
        let source_xml = source
            .get_string(DOCUMENT_PART)
            .ok_or_else(|| OoxmlError::MissingFile(DOCUMENT_PART.to_string()))?;
        let relationships = match source.document_rels_xml() {
            Some(xml) => Relationships::parse(xml)?,
            None => Relationships::new(),
        };

        let mut writer = Self::new(relationships);
        let xml = writer.generate_document_xml(doc, &source_xml);

        let mut archive = source.clone();
        archive.set_string(DOCUMENT_PART, xml);
        if writer.relationships_changed {
            archive.set_string(DOCUMENT_RELS_PART, writer.relationships.to_xml());
        }
        debug!(
            blocks = doc.blocks.len(),
            relationships = writer.relationships.len(),
            "Wrote document part"
        );
        Ok(archive)
    }

    fn generate_document_xml(&mut self, doc: &Document, source_xml: &str) -> String {
        self.output.clear();
        self.output
            .push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        self.output.push('\n');
        self.output.push_str(&root_start_tag(source_xml));
        self.output.push('\n');
        self.output.push_str("<w:body>\n");

        for block in &doc.blocks {
            self.generate_block(block);
        }

        if let Some(sect_pr) = body_section_properties(source_xml) {
            self.output.push_str(sect_pr);
            self.output.push('\n');
        }

        self.output.push_str("</w:body>\n");
        self.output.push_str("</w:document>");
        std::mem::take(&mut self.output)
    }

    fn generate_block(&mut self, block: &Block) {
        match block {
            Block::Paragraph(para) => self.generate_paragraph(para),
            Block::Table(table) => self.generate_table(table),
        }
    }

    fn generate_paragraph(&mut self, para: &Paragraph) {
        self.output.push_str("<w:p>");
        self.generate_paragraph_properties(para);

        let rel_ids: Vec<Option<String>> = para
            .hyperlinks
            .iter()
            .map(|link| self.hyperlink_rel_id(link))
            .collect();

        let mut open_link = None;
        for run in &para.runs {
            if run.hyperlink != open_link {
                if open_link.is_some() {
                    self.output.push_str("</w:hyperlink>");
                }
                open_link = run.hyperlink;
                if let Some(id) = open_link {
                    let rel_id = rel_ids.get(id.0).and_then(|r| r.as_deref());
                    let anchor = para.hyperlinks.get(id.0).and_then(|h| h.anchor.as_deref());
                    self.open_hyperlink(rel_id, anchor);
                }
            }
            self.generate_run(run);
        }
        if open_link.is_some() {
            self.output.push_str("</w:hyperlink>");
        }

        self.output.push_str("</w:p>\n");
    }

    fn generate_paragraph_properties(&mut self, para: &Paragraph) {
        let has_props = para.style_id.is_some()
            || para.numbering.is_some()
            || para.line_spacing.is_some()
            || para.alignment.is_some();
        if !has_props {
            return;
        }

        self.output.push_str("<w:pPr>");
        if let Some(style) = &para.style_id {
            self.output
                .push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, escape_xml(style)));
        }
        if let Some(numbering) = para.numbering {
            self.output.push_str(&format!(
                r#"<w:numPr><w:ilvl w:val="{}"/><w:numId w:val="{}"/></w:numPr>"#,
                numbering.level, numbering.num_id
            ));
        }
        if let Some(spacing) = para.line_spacing {
            self.output.push_str(&format!(
                r#"<w:spacing w:line="{}" w:lineRule="auto"/>"#,
                (spacing * 240.0).round() as i64
            ));
        }
        if let Some(alignment) = para.alignment {
            self.output
                .push_str(&format!(r#"<w:jc w:val="{}"/>"#, alignment.to_ooxml()));
        }
        self.output.push_str("</w:pPr>");
    }

    /// Relationship ID for a hyperlink, registering external targets that
    /// were built in memory
    fn hyperlink_rel_id(&mut self, link: &Hyperlink) -> Option<String> {
        if let Some(id) = &link.rel_id {
            return Some(id.clone());
        }
        let target = link.target.as_ref()?;
        self.relationships_changed = true;
        Some(self.relationships.add_hyperlink(target.clone()))
    }

    fn open_hyperlink(&mut self, rel_id: Option<&str>, anchor: Option<&str>) {
        self.output.push_str("<w:hyperlink");
        if let Some(id) = rel_id {
            self.output
                .push_str(&format!(r#" r:id="{}""#, escape_xml(id)));
        }
        if let Some(anchor) = anchor {
            self.output
                .push_str(&format!(r#" w:anchor="{}""#, escape_xml(anchor)));
        }
        self.output.push('>');
    }

    fn generate_run(&mut self, run: &Run) {
        self.output.push_str("<w:r>");
        self.generate_run_properties(run);

        if let Some(image) = &run.image {
            self.generate_drawing(image);
        }

        let mut segment = String::new();
        for ch in run.text.chars() {
            match ch {
                '\t' | '\n' => {
                    self.push_text(&segment);
                    segment.clear();
                    self.output
                        .push_str(if ch == '\t' { "<w:tab/>" } else { "<w:br/>" });
                }
                _ => segment.push(ch),
            }
        }
        self.push_text(&segment);

        self.output.push_str("</w:r>");
    }

    fn push_text(&mut self, text: &str) {
        if !text.is_empty() {
            self.output.push_str(&format!(
                r#"<w:t xml:space="preserve">{}</w:t>"#,
                escape_xml(text)
            ));
        }
    }

    /// Child order follows the `CT_RPr` schema sequence
    fn generate_run_properties(&mut self, run: &Run) {
        let has_props = run.bold
            || run.italic
            || run.underline
            || run.font.is_some()
            || run.font_size.is_some()
            || run.color.is_some()
            || run.highlight.is_some();
        if !has_props {
            return;
        }

        self.output.push_str("<w:rPr>");
        if let Some(font) = &run.font {
            let font = escape_xml(font);
            self.output.push_str(&format!(
                r#"<w:rFonts w:ascii="{0}" w:hAnsi="{0}"/>"#,
                font
            ));
        }
        if run.bold {
            self.output.push_str("<w:b/>");
        }
        if run.italic {
            self.output.push_str("<w:i/>");
        }
        if let Some(color) = &run.color {
            self.output
                .push_str(&format!(r#"<w:color w:val="{}"/>"#, escape_xml(color)));
        }
        if let Some(size) = run.font_size {
            let half_points = (size * 2.0).round() as i64;
            self.output.push_str(&format!(
                r#"<w:sz w:val="{0}"/><w:szCs w:val="{0}"/>"#,
                half_points
            ));
        }
        if let Some(highlight) = run.highlight {
            self.output
                .push_str(&format!(r#"<w:highlight w:val="{}"/>"#, highlight.to_ooxml()));
        }
        if run.underline {
            self.output.push_str(r#"<w:u w:val="single"/>"#);
        }
        self.output.push_str("</w:rPr>");
    }

    fn generate_drawing(&mut self, image: &Image) {
        let id = self.next_drawing_id;
        self.next_drawing_id += 1;

        let cx = image.width_emu.unwrap_or(DEFAULT_EXTENT_EMU);
        let cy = image.height_emu.unwrap_or(DEFAULT_EXTENT_EMU);
        let name = image
            .name
            .clone()
            .unwrap_or_else(|| format!("Picture {}", id));
        let name = escape_xml(&name);
        let descr = escape_xml(image.description.as_deref().unwrap_or(""));
        let rel_id = escape_xml(&image.rel_id);

        self.output.push_str(&format!(
            concat!(
                r#"<w:drawing><wp:inline xmlns:wp="{wp}" distT="0" distB="0" distL="0" distR="0">"#,
                r#"<wp:extent cx="{cx}" cy="{cy}"/>"#,
                r#"<wp:docPr id="{id}" name="{name}" descr="{descr}"/>"#,
                r#"<a:graphic xmlns:a="{a}"><a:graphicData uri="{pic}">"#,
                r#"<pic:pic xmlns:pic="{pic}">"#,
                r#"<pic:nvPicPr><pic:cNvPr id="0" name="{name}" descr="{descr}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
                r#"<pic:blipFill><a:blip r:embed="{rel_id}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
                r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
                r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr>"#,
                r#"</pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing>"#,
            ),
            wp = WP_NS,
            a = A_NS,
            pic = PIC_NS,
            cx = cx,
            cy = cy,
            id = id,
            name = name,
            descr = descr,
            rel_id = rel_id,
        ));
    }

    fn generate_table(&mut self, table: &Table) {
        self.output.push_str("<w:tbl>\n<w:tblPr>");
        if let Some(style) = &table.style_id {
            self.output
                .push_str(&format!(r#"<w:tblStyle w:val="{}"/>"#, escape_xml(style)));
        }
        self.output.push_str(r#"<w:tblW w:w="0" w:type="auto"/>"#);
        if let Some(caption) = &table.caption {
            self.output
                .push_str(&format!(r#"<w:tblCaption w:val="{}"/>"#, escape_xml(caption)));
        }
        if let Some(description) = &table.description {
            self.output.push_str(&format!(
                r#"<w:tblDescription w:val="{}"/>"#,
                escape_xml(description)
            ));
        }
        self.output.push_str("</w:tblPr>");

        self.output.push_str("<w:tblGrid>");
        for _ in 0..grid_columns(table) {
            self.output
                .push_str(&format!(r#"<w:gridCol w:w="{}"/>"#, GRID_COL_WIDTH));
        }
        self.output.push_str("</w:tblGrid>\n");

        for row in &table.rows {
            self.output.push_str("<w:tr>");
            if row.is_header {
                self.output.push_str("<w:trPr><w:tblHeader/></w:trPr>");
            }
            for cell in &row.cells {
                self.generate_cell(cell);
            }
            self.output.push_str("</w:tr>\n");
        }

        self.output.push_str("</w:tbl>\n");
    }

    fn generate_cell(&mut self, cell: &TableCell) {
        self.output.push_str("<w:tc><w:tcPr>");
        if let Some(span) = cell.grid_span.filter(|s| *s > 1) {
            self.output
                .push_str(&format!(r#"<w:gridSpan w:val="{}"/>"#, span));
        }
        match cell.vertical_merge.as_deref() {
            Some("continue") => self.output.push_str("<w:vMerge/>"),
            Some(value) => self
                .output
                .push_str(&format!(r#"<w:vMerge w:val="{}"/>"#, escape_xml(value))),
            None => {}
        }
        if let Some(fill) = &cell.shading {
            self.output.push_str(&format!(
                r#"<w:shd w:val="clear" w:color="auto" w:fill="{}"/>"#,
                escape_xml(fill)
            ));
        }
        self.output.push_str("</w:tcPr>\n");

        for para in &cell.paragraphs {
            self.generate_paragraph(para);
        }
        for nested in &cell.tables {
            self.generate_table(nested);
        }
        // A cell must end with a paragraph
        if cell.paragraphs.is_empty() || !cell.tables.is_empty() {
            self.output.push_str("<w:p/>\n");
        }

        self.output.push_str("</w:tc>");
    }
}

/// Number of grid columns: the widest row, counting spans
fn grid_columns(table: &Table) -> usize {
    table
        .rows
        .iter()
        .map(|row| {
            row.cells
                .iter()
                .map(|c| c.grid_span.unwrap_or(1).max(1) as usize)
                .sum::<usize>()
        })
        .max()
        .unwrap_or(0)
}

/// The source's `<w:document ...>` start tag, so every namespace and
/// `mc:Ignorable` prefix it declares stays valid. Missing core namespaces
/// are added.
fn root_start_tag(source_xml: &str) -> String {
    let tag = source_xml
        .find("<w:document")
        .and_then(|start| {
            source_xml[start..]
                .find('>')
                .map(|end| &source_xml[start..start + end])
        })
        .map(|t| t.trim_end_matches('/').to_string())
        .unwrap_or_else(|| "<w:document".to_string());

    let mut tag = tag;
    for (prefix, ns) in [("w", W_NS), ("r", R_NS), ("wp", WP_NS)] {
        if !tag.contains(&format!("xmlns:{}=", prefix)) {
            tag.push_str(&format!(r#" xmlns:{}="{}""#, prefix, ns));
        }
    }
    tag.push('>');
    tag
}

/// The body-level `<w:sectPr>`: the last element of `<w:body>`, as opposed
/// to section breaks stored inside paragraph properties
fn body_section_properties(source_xml: &str) -> Option<&str> {
    let body_end = source_xml.rfind("</w:body>")?;
    let start = source_xml[..body_end].rfind("<w:sectPr")?;
    let section = source_xml[start..body_end].trim_end();
    if section.contains("</w:p>") || section.contains("</w:tbl>") {
        return None;
    }
    Some(section)
}
