//! Paragraphs, runs, and tables
//!
//! This module defines the block-level content of a document and the
//! inline runs that carry text and direct formatting.

use serde::{Deserialize, Serialize};

/// Paragraph alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Parse a WordprocessingML `w:jc` value
    pub fn from_ooxml(value: &str) -> Option<Self> {
        match value {
            "left" | "start" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" | "end" => Some(Alignment::Right),
            "both" | "distribute" => Some(Alignment::Justify),
            _ => None,
        }
    }

    /// The WordprocessingML `w:jc` value for this alignment
    pub fn to_ooxml(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "both",
        }
    }
}

/// Text highlight colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Highlight {
    Yellow,
    BrightGreen,
    Cyan,
    Other,
}

impl Highlight {
    /// Parse a WordprocessingML `w:highlight` value
    pub fn from_ooxml(value: &str) -> Option<Self> {
        match value {
            "none" => None,
            "yellow" => Some(Highlight::Yellow),
            "green" => Some(Highlight::BrightGreen),
            "cyan" => Some(Highlight::Cyan),
            _ => Some(Highlight::Other),
        }
    }

    /// The WordprocessingML `w:highlight` value (`Other` is written as light gray)
    pub fn to_ooxml(self) -> &'static str {
        match self {
            Highlight::Yellow => "yellow",
            Highlight::BrightGreen => "green",
            Highlight::Cyan => "cyan",
            Highlight::Other => "lightGray",
        }
    }
}

/// Index of a hyperlink within its paragraph's [`Paragraph::hyperlinks`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HyperlinkId(pub usize);

/// A hyperlink target
///
/// Display text is not stored here: it is the concatenated text of the runs
/// that point back at this hyperlink (see [`Paragraph::link_text`]).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Hyperlink {
    /// Relationship ID in the source container (e.g. "rId7")
    pub rel_id: Option<String>,
    /// Resolved external target URL
    pub target: Option<String>,
    /// Internal bookmark anchor
    pub anchor: Option<String>,
}

impl Hyperlink {
    /// An external hyperlink to `url`
    pub fn external(url: impl Into<String>) -> Self {
        Self {
            rel_id: None,
            target: Some(url.into()),
            anchor: None,
        }
    }
}

/// An embedded image (presence and properties only, no pixel data)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Image {
    /// Relationship ID of the image part (e.g. "rId11")
    pub rel_id: String,
    /// Shape name from the drawing properties
    pub name: Option<String>,
    /// Alternative text (description)
    pub description: Option<String>,
    /// Width in EMUs
    pub width_emu: Option<i64>,
    /// Height in EMUs
    pub height_emu: Option<i64>,
}

impl Image {
    /// Whether the image carries non-blank alternative text
    pub fn has_alt_text(&self) -> bool {
        self.description
            .as_deref()
            .map(|d| !d.trim().is_empty())
            .unwrap_or(false)
    }
}

/// A span of text with uniform direct formatting
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Run {
    /// Text content; tabs and line breaks appear as `\t` and `\n`
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Font family, when set directly on the run
    pub font: Option<String>,
    /// Font size in points, when set directly on the run
    pub font_size: Option<f32>,
    /// Text colour as a hex string (e.g. "FF0000")
    pub color: Option<String>,
    pub highlight: Option<Highlight>,
    /// Back-reference to the owning paragraph's hyperlink list
    pub hyperlink: Option<HyperlinkId>,
    /// Image anchored to this run
    pub image: Option<Image>,
}

impl Run {
    /// Create a plain run
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Create a bold run
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            bold: true,
            ..Self::new(text)
        }
    }

    /// Set the font size in points
    pub fn with_size(mut self, points: f32) -> Self {
        self.font_size = Some(points);
        self
    }

    /// Set the font family
    pub fn with_font(mut self, family: impl Into<String>) -> Self {
        self.font = Some(family.into());
        self
    }

    /// Mark the run as underlined
    pub fn underlined(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Associate the run with a hyperlink
    pub fn linked(mut self, id: HyperlinkId) -> Self {
        self.hyperlink = Some(id);
        self
    }

    /// Character count of the run's text
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Reference to a list/numbering definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberingRef {
    pub num_id: u32,
    /// Indent level (0-based)
    pub level: u32,
}

/// A paragraph: an ordered sequence of runs plus paragraph properties
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Style ID in the source container (e.g. "Heading1")
    pub style_id: Option<String>,
    /// Resolved style display name (e.g. "Heading 1")
    pub style_name: Option<String>,
    pub alignment: Option<Alignment>,
    /// Line spacing as a multiple of single spacing
    pub line_spacing: Option<f32>,
    /// List membership, when the paragraph carries a numbering property
    pub numbering: Option<NumberingRef>,
    pub runs: Vec<Run>,
    pub hyperlinks: Vec<Hyperlink>,
}

impl Paragraph {
    /// Create an unstyled paragraph from runs
    pub fn new(runs: Vec<Run>) -> Self {
        Self {
            runs,
            ..Default::default()
        }
    }

    /// Create a paragraph with a named style
    ///
    /// The style ID is derived from the name by removing spaces, which is
    /// how Word names its built-in styles ("Heading 1" -> "Heading1").
    pub fn styled(style_name: impl Into<String>, runs: Vec<Run>) -> Self {
        let name = style_name.into();
        Self {
            style_id: Some(name.replace(' ', "")),
            style_name: Some(name),
            runs,
            ..Default::default()
        }
    }

    /// Create a single-run plain paragraph
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![Run::new(text)])
    }

    /// Add a hyperlink and return its ID for use in [`Run::linked`]
    pub fn add_hyperlink(&mut self, hyperlink: Hyperlink) -> HyperlinkId {
        self.hyperlinks.push(hyperlink);
        HyperlinkId(self.hyperlinks.len() - 1)
    }

    /// The effective style name, falling back to the style ID
    pub fn style(&self) -> Option<&str> {
        self.style_name.as_deref().or(self.style_id.as_deref())
    }

    /// Heading level from a "Heading N" style, if any
    pub fn heading_level(&self) -> Option<u8> {
        let style = self.style()?;
        let lower = style.to_ascii_lowercase();
        let rest = lower.strip_prefix("heading")?.trim_start();
        rest.parse::<u8>().ok().filter(|level| (1..=9).contains(level))
    }

    /// Whether the paragraph uses a list style or numbering property
    pub fn is_list_item(&self) -> bool {
        self.numbering.is_some()
            || self
                .style()
                .map(|s| s.to_ascii_lowercase().contains("list"))
                .unwrap_or(false)
    }

    /// Concatenated text of all runs
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Display text of a hyperlink: the text of every run pointing at it
    pub fn link_text(&self, id: HyperlinkId) -> String {
        self.runs
            .iter()
            .filter(|r| r.hyperlink == Some(id))
            .map(|r| r.text.as_str())
            .collect()
    }

    /// Iterate hyperlinks with their IDs
    pub fn hyperlinks(&self) -> impl Iterator<Item = (HyperlinkId, &Hyperlink)> {
        self.hyperlinks
            .iter()
            .enumerate()
            .map(|(i, h)| (HyperlinkId(i), h))
    }

    /// Images anchored to runs of this paragraph
    pub fn images(&self) -> impl Iterator<Item = &Image> {
        self.runs.iter().filter_map(|r| r.image.as_ref())
    }

    /// Check if the paragraph has no visible content
    pub fn is_empty(&self) -> bool {
        self.runs
            .iter()
            .all(|r| r.text.trim().is_empty() && r.image.is_none())
    }
}

/// A table: rows of cells, each cell holding paragraphs
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    /// Table style ID
    pub style_id: Option<String>,
    /// Alternative-text title
    pub caption: Option<String>,
    /// Alternative-text description
    pub description: Option<String>,
    pub rows: Vec<TableRow>,
}

/// A table row
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
    /// Marked by the container as a repeating header row
    pub is_header: bool,
}

/// A table cell
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableCell {
    pub paragraphs: Vec<Paragraph>,
    /// Background fill as a hex string (e.g. "D9E2F3")
    pub shading: Option<String>,
    /// Number of grid columns spanned
    pub grid_span: Option<u32>,
    /// Vertical merge marker ("restart" or "continue")
    pub vertical_merge: Option<String>,
    /// Tables nested in this cell (kept for round-tripping, not analyzed)
    pub tables: Vec<Table>,
}

impl Table {
    /// Build a table from plain cell strings
    pub fn from_text<R, C, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            style_id: None,
            caption: None,
            description: None,
            rows: rows
                .into_iter()
                .map(|cells| TableRow {
                    cells: cells.into_iter().map(TableCell::text).collect(),
                    is_header: false,
                })
                .collect(),
        }
    }

    /// Whether the table carries a non-blank caption or description
    pub fn has_caption(&self) -> bool {
        [&self.caption, &self.description]
            .into_iter()
            .flatten()
            .any(|text| !text.trim().is_empty())
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (the widest row)
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    /// Cell at a position, if present
    pub fn cell(&self, row: usize, col: usize) -> Option<&TableCell> {
        self.rows.get(row).and_then(|r| r.cells.get(col))
    }

    /// Iterate all cells with their row/column indices
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &TableCell)> {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.cells
                .iter()
                .enumerate()
                .map(move |(c, cell)| (r, c, cell))
        })
    }
}

impl TableCell {
    /// A cell containing one plain paragraph
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            paragraphs: vec![Paragraph::text(text)],
            ..Default::default()
        }
    }

    /// A cell containing the given paragraphs
    pub fn with_paragraphs(paragraphs: Vec<Paragraph>) -> Self {
        Self {
            paragraphs,
            ..Default::default()
        }
    }

    /// Cell text: paragraph texts joined by newlines
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Cell text with surrounding whitespace removed
    pub fn trimmed_text(&self) -> String {
        self.plain_text().trim().to_string()
    }

    /// Number of grid columns this cell covers (at least one)
    pub fn span(&self) -> usize {
        self.grid_span.map(|s| s.max(1) as usize).unwrap_or(1)
    }

    /// Whether the cell continues a vertical merge started in a row above
    pub fn is_merge_continuation(&self) -> bool {
        self.vertical_merge.as_deref() == Some("continue")
    }

    /// Whether the cell takes part in a horizontal or vertical merge
    pub fn is_merged(&self) -> bool {
        self.span() > 1 || self.vertical_merge.is_some()
    }
}
