//! Document content parsing (word/document.xml)
//!
//! Streams the main document part with quick-xml and builds the
//! [`a11ydoc_ast`] model: top-level paragraphs and tables, runs with their
//! direct formatting, hyperlinks resolved through the relationships part,
//! inline images with their alt text, and nested tables.
//!
//! Text boxes, alternate-content fallbacks and equations are skipped; they
//! are not part of the body's reading order.

use a11ydoc_ast::{
    Alignment, Block, Highlight, Hyperlink, HyperlinkId, Image, NumberingRef, Paragraph, Run,
    Table, TableCell, TableRow,
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::archive::DOCUMENT_PART;
use crate::error::{OoxmlError, Result};
use crate::relationships::Relationships;
use crate::styles::StyleSheet;
use crate::xml::{attr, attr_local, is_on};

/// `w:spacing w:line` is in 240ths of a line when the rule is `auto`
const LINE_UNITS: f32 = 240.0;

/// Elements whose content is not part of the body text, or records
/// superseded formatting
fn is_skipped(name: &[u8]) -> bool {
    matches!(
        name,
        b"txbxContent" | b"Fallback" | b"oMath" | b"oMathPara" | b"rPrChange" | b"pPrChange"
    )
}

/// Parse the body of `word/document.xml` into blocks
pub fn parse_body(xml: &[u8], styles: &StyleSheet, rels: &Relationships) -> Result<Vec<Block>> {
    let mut reader = Reader::from_reader(xml);
    // Whitespace inside w:t is content
    reader.config_mut().trim_text(false);

    let mut parser = BodyParser::new(styles, rels);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => parser.start(e),
            Ok(Event::Empty(ref e)) => {
                parser.start(e);
                parser.end(e.local_name().as_ref());
            }
            Ok(Event::End(ref e)) => parser.end(e.local_name().as_ref()),
            Ok(Event::Text(ref e)) => {
                if parser.wants_text() {
                    let text = e
                        .unescape()
                        .map_err(|err| OoxmlError::xml(DOCUMENT_PART, err))?;
                    parser.text(&text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::xml(DOCUMENT_PART, e)),
            _ => {}
        }
        buf.clear();
    }

    parser.finish()
}

/// Table under construction; nested tables push another frame
#[derive(Default)]
struct TableFrame {
    table: Table,
    row: Option<TableRow>,
    cell: Option<TableCell>,
}

/// Image properties collected between `<w:drawing>` and `</w:drawing>`
#[derive(Default)]
struct ImageBuilder {
    rel_id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    width_emu: Option<i64>,
    height_emu: Option<i64>,
}

impl ImageBuilder {
    fn build(self) -> Option<Image> {
        Some(Image {
            rel_id: self.rel_id?,
            name: self.name,
            description: self.description,
            width_emu: self.width_emu,
            height_emu: self.height_emu,
        })
    }
}

struct BodyParser<'a> {
    styles: &'a StyleSheet,
    rels: &'a Relationships,
    blocks: Vec<Block>,
    tables: Vec<TableFrame>,
    para: Option<Paragraph>,
    run: Option<Run>,
    link: Option<HyperlinkId>,
    image: Option<ImageBuilder>,
    saw_body: bool,
    in_body: bool,
    in_text: bool,
    in_cell_props: bool,
    skip_depth: u32,
}

impl<'a> BodyParser<'a> {
    fn new(styles: &'a StyleSheet, rels: &'a Relationships) -> Self {
        Self {
            styles,
            rels,
            blocks: Vec::new(),
            tables: Vec::new(),
            para: None,
            run: None,
            link: None,
            image: None,
            saw_body: false,
            in_body: false,
            in_text: false,
            in_cell_props: false,
            skip_depth: 0,
        }
    }

    fn wants_text(&self) -> bool {
        self.in_text && self.skip_depth == 0 && self.run.is_some()
    }

    fn text(&mut self, text: &str) {
        if let Some(run) = self.run.as_mut() {
            run.text.push_str(text);
        }
    }

    /// Paragraph properties apply only outside runs (a run's `w:rPr` has
    /// its own `w:spacing`, for instance)
    fn para_props(&mut self) -> Option<&mut Paragraph> {
        if self.run.is_some() {
            return None;
        }
        self.para.as_mut()
    }

    fn start(&mut self, e: &BytesStart) {
        let name = e.local_name();
        let name = name.as_ref();

        if is_skipped(name) {
            self.skip_depth += 1;
            return;
        }
        if self.skip_depth > 0 {
            return;
        }

        match name {
            b"body" => {
                self.in_body = true;
                self.saw_body = true;
            }
            b"p" if self.in_body && self.para.is_none() => {
                let style_name = self
                    .styles
                    .default_paragraph
                    .as_deref()
                    .and_then(|id| self.styles.name(id))
                    .map(str::to_string);
                self.para = Some(Paragraph {
                    style_name,
                    ..Paragraph::default()
                });
            }
            b"pStyle" => {
                let styles = self.styles;
                if let (Some(para), Some(id)) = (self.para_props(), attr(e, b"w:val")) {
                    para.style_name = styles.name(&id).map(str::to_string);
                    para.style_id = Some(id);
                }
            }
            b"jc" => {
                if let Some(para) = self.para_props() {
                    para.alignment = attr(e, b"w:val").and_then(|v| Alignment::from_ooxml(&v));
                }
            }
            b"spacing" => {
                if let Some(para) = self.para_props() {
                    let auto = matches!(attr(e, b"w:lineRule").as_deref(), None | Some("auto"));
                    if auto {
                        if let Some(line) = attr(e, b"w:line").and_then(|v| v.parse::<f32>().ok())
                        {
                            para.line_spacing = Some(line / LINE_UNITS);
                        }
                    }
                }
            }
            b"ilvl" | b"numId" => {
                let value = attr(e, b"w:val").and_then(|v| v.parse::<u32>().ok());
                if let (Some(para), Some(value)) = (self.para_props(), value) {
                    let numbering = para.numbering.get_or_insert(NumberingRef {
                        num_id: 0,
                        level: 0,
                    });
                    if name == b"ilvl" {
                        numbering.level = value;
                    } else {
                        numbering.num_id = value;
                    }
                }
            }
            b"hyperlink" => {
                if let Some(para) = self.para.as_mut() {
                    let rel_id = attr(e, b"r:id").or_else(|| attr_local(e, b"id"));
                    let target = rel_id
                        .as_deref()
                        .and_then(|id| self.rels.hyperlink_target(id))
                        .map(str::to_string);
                    let anchor = attr(e, b"w:anchor");
                    self.link = Some(para.add_hyperlink(Hyperlink {
                        rel_id,
                        target,
                        anchor,
                    }));
                }
            }
            b"r" if self.para.is_some() && self.run.is_none() => {
                self.run = Some(Run {
                    hyperlink: self.link,
                    ..Run::default()
                });
            }
            b"t" if self.image.is_none() => self.in_text = self.run.is_some(),
            b"tab" | b"br" | b"cr" if self.image.is_none() => {
                let is_page_break = attr(e, b"w:type").is_some_and(|t| t != "textWrapping");
                if let Some(run) = self.run.as_mut() {
                    match name {
                        b"tab" => run.text.push('\t'),
                        _ if is_page_break => {}
                        _ => run.text.push('\n'),
                    }
                }
            }
            b"drawing" if self.run.is_some() => self.image = Some(ImageBuilder::default()),
            b"docPr" => {
                if let Some(image) = self.image.as_mut() {
                    image.name = attr(e, b"name");
                    image.description = attr(e, b"descr");
                }
            }
            b"extent" => {
                if let Some(image) = self.image.as_mut() {
                    image.width_emu = attr(e, b"cx").and_then(|v| v.parse().ok());
                    image.height_emu = attr(e, b"cy").and_then(|v| v.parse().ok());
                }
            }
            b"blip" => {
                if let Some(image) = self.image.as_mut() {
                    image.rel_id = attr_local(e, b"embed");
                }
            }
            b"b" | b"i" | b"u" | b"sz" | b"color" | b"highlight" | b"rFonts" => {
                if self.image.is_none() {
                    if let Some(run) = self.run.as_mut() {
                        apply_run_property(run, name, e);
                    }
                }
            }
            b"tbl" if self.in_body && self.para.is_none() => {
                self.tables.push(TableFrame::default());
            }
            b"tblStyle" => {
                if let Some(frame) = self.tables.last_mut() {
                    if frame.row.is_none() {
                        frame.table.style_id = attr(e, b"w:val");
                    }
                }
            }
            b"tblCaption" | b"tblDescription" => {
                if let Some(frame) = self.tables.last_mut() {
                    if frame.row.is_none() {
                        let text = attr(e, b"w:val");
                        match name {
                            b"tblCaption" => frame.table.caption = text,
                            _ => frame.table.description = text,
                        }
                    }
                }
            }
            b"tr" => {
                if let Some(frame) = self.tables.last_mut() {
                    frame.row = Some(TableRow::default());
                }
            }
            b"tblHeader" => {
                if let Some(row) = self.tables.last_mut().and_then(|f| f.row.as_mut()) {
                    row.is_header = is_on(e);
                }
            }
            b"tc" => {
                if let Some(frame) = self.tables.last_mut() {
                    frame.cell = Some(TableCell::default());
                }
            }
            b"tcPr" => self.in_cell_props = true,
            b"shd" | b"gridSpan" | b"vMerge" if self.in_cell_props => {
                if let Some(cell) = self.tables.last_mut().and_then(|f| f.cell.as_mut()) {
                    match name {
                        b"shd" => cell.shading = attr(e, b"w:fill"),
                        b"gridSpan" => {
                            cell.grid_span = attr(e, b"w:val").and_then(|v| v.parse().ok())
                        }
                        _ => {
                            cell.vertical_merge =
                                Some(attr(e, b"w:val").unwrap_or_else(|| "continue".to_string()))
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn end(&mut self, name: &[u8]) {
        if is_skipped(name) {
            self.skip_depth = self.skip_depth.saturating_sub(1);
            return;
        }
        if self.skip_depth > 0 {
            return;
        }

        match name {
            b"body" => self.in_body = false,
            b"t" => self.in_text = false,
            b"tcPr" => self.in_cell_props = false,
            b"drawing" => {
                if let Some(image) = self.image.take().and_then(ImageBuilder::build) {
                    if let Some(run) = self.run.as_mut() {
                        run.image = Some(image);
                    }
                }
            }
            b"r" if self.image.is_none() => {
                if let Some(run) = self.run.take() {
                    if !run.text.is_empty() || run.image.is_some() {
                        if let Some(para) = self.para.as_mut() {
                            para.runs.push(run);
                        }
                    }
                }
            }
            b"hyperlink" => self.link = None,
            b"p" => {
                if let Some(para) = self.para.take() {
                    self.link = None;
                    match self.tables.last_mut() {
                        Some(frame) => match frame.cell.as_mut() {
                            Some(cell) => cell.paragraphs.push(para),
                            None => debug!("Dropping paragraph outside any table cell"),
                        },
                        None => self.blocks.push(Block::Paragraph(para)),
                    }
                }
            }
            b"tc" => {
                if let Some(frame) = self.tables.last_mut() {
                    if let (Some(cell), Some(row)) = (frame.cell.take(), frame.row.as_mut()) {
                        row.cells.push(cell);
                    }
                }
            }
            b"tr" => {
                if let Some(frame) = self.tables.last_mut() {
                    if let Some(row) = frame.row.take() {
                        frame.table.rows.push(row);
                    }
                }
            }
            b"tbl" => {
                if let Some(frame) = self.tables.pop() {
                    match self.tables.last_mut() {
                        Some(parent) => {
                            if let Some(cell) = parent.cell.as_mut() {
                                cell.tables.push(frame.table);
                            }
                        }
                        None => self.blocks.push(Block::Table(frame.table)),
                    }
                }
            }
            _ => {}
        }
    }

    fn finish(self) -> Result<Vec<Block>> {
        if !self.saw_body {
            return Err(OoxmlError::InvalidStructure(format!(
                "{} has no w:body element",
                DOCUMENT_PART
            )));
        }
        if !self.tables.is_empty() || self.para.is_some() {
            return Err(OoxmlError::InvalidStructure(format!(
                "{} ends inside an unclosed paragraph or table",
                DOCUMENT_PART
            )));
        }
        debug!(blocks = self.blocks.len(), "Parsed document body");
        Ok(self.blocks)
    }
}

fn apply_run_property(run: &mut Run, name: &[u8], e: &BytesStart) {
    match name {
        b"b" => run.bold = is_on(e),
        b"i" => run.italic = is_on(e),
        b"u" => run.underline = is_on(e),
        // Theme fonts carry no family name
        b"rFonts" => run.font = attr(e, b"w:ascii").or_else(|| attr(e, b"w:hAnsi")),
        // Half-points
        b"sz" => {
            run.font_size = attr(e, b"w:val")
                .and_then(|v| v.parse::<f32>().ok())
                .map(|half_points| half_points / 2.0);
        }
        b"color" => run.color = attr(e, b"w:val").filter(|v| v != "auto"),
        b"highlight" => run.highlight = attr(e, b"w:val").and_then(|v| Highlight::from_ooxml(&v)),
        _ => {}
    }
}
