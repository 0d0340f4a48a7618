//! Colour contrast analyzer
//!
//! Contrast follows the WCAG 2 relative-luminance formula. Text in a table
//! cell is measured against the cell fill; everything else against white.

use a11ydoc_ast::{Document, Location, Run};
use a11ydoc_core::{Issue, IssueKind};

use crate::thresholds::{
    LARGE_BOLD_TEXT_POINTS, LARGE_TEXT_POINTS, MIN_CONTRAST_RATIO, MIN_CONTRAST_RATIO_LARGE,
};
use crate::{preview, Analyzer};

/// An sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);

    /// Parse a six-digit hex string such as "1F3864"
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// WCAG relative luminance
    pub fn luminance(self) -> f64 {
        let linear = |c: u8| {
            let c = c as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126 * linear(self.0) + 0.7152 * linear(self.1) + 0.0722 * linear(self.2)
    }

    /// Contrast ratio between two colours, from 1 to 21
    pub fn contrast(self, other: Rgb) -> f64 {
        let (a, b) = (self.luminance(), other.luminance());
        let (light, dark) = if a > b { (a, b) } else { (b, a) };
        (light + 0.05) / (dark + 0.05)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Whether a run counts as large text for contrast purposes
fn is_large(run: &Run) -> bool {
    match run.font_size {
        Some(size) => size >= LARGE_TEXT_POINTS || (run.bold && size >= LARGE_BOLD_TEXT_POINTS),
        None => false,
    }
}

/// Flags text whose colour is too close to its background (`LOW_CONTRAST`)
///
/// Runs with automatic colour are skipped, since Word renders them light on
/// dark fills. Each paragraph is reported at its first failing run.
pub struct ContrastAnalyzer;

impl ContrastAnalyzer {
    fn background(doc: &Document, location: Location) -> Rgb {
        match location {
            Location::TableCell { table, row, col, .. } => doc
                .table(table)
                .and_then(|t| t.cell(row, col))
                .and_then(|cell| cell.shading.as_deref())
                .and_then(Rgb::from_hex)
                .unwrap_or(Rgb::WHITE),
            _ => Rgb::WHITE,
        }
    }
}

impl Analyzer for ContrastAnalyzer {
    fn name(&self) -> &'static str {
        "color-contrast"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();

        for (location, para) in doc.located_paragraphs() {
            let background = Self::background(doc, location);
            let failing = para
                .runs
                .iter()
                .filter(|run| !run.text.trim().is_empty())
                .find_map(|run| {
                    let text = Rgb::from_hex(run.color.as_deref()?)?;
                    let required = if is_large(run) {
                        MIN_CONTRAST_RATIO_LARGE
                    } else {
                        MIN_CONTRAST_RATIO
                    };
                    let ratio = text.contrast(background);
                    (ratio < required).then_some((text, ratio, required))
                });

            if let Some((text, ratio, required)) = failing {
                issues.push(Issue::new(
                    IssueKind::LowContrast,
                    location,
                    format!(
                        "Insufficient color contrast {:.2}:1 (minimum {}:1). Text: {}, \
                         Background: {}. \"{}\"",
                        ratio,
                        required,
                        text,
                        background,
                        preview(para.plain_text().trim())
                    ),
                ));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11ydoc_ast::{Block, Paragraph, Table};

    fn colored(text: &str, hex: &str) -> Run {
        Run {
            color: Some(hex.to_string()),
            ..Run::new(text)
        }
    }

    fn doc_with(para: Paragraph) -> Document {
        let mut doc = Document::new();
        doc.push(Block::Paragraph(para));
        doc
    }

    #[test]
    fn test_contrast_ratio() {
        let black = Rgb(0, 0, 0);
        assert!((black.contrast(Rgb::WHITE) - 21.0).abs() < 1e-9);
        assert!((Rgb::WHITE.contrast(Rgb::WHITE) - 1.0).abs() < 1e-9);
        // #767676 is the lightest gray that passes on white
        assert!(Rgb(0x76, 0x76, 0x76).contrast(Rgb::WHITE) >= 4.5);
        assert!(Rgb(0x77, 0x77, 0x77).contrast(Rgb::WHITE) < 4.5);
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Rgb::from_hex("1F3864"), Some(Rgb(0x1F, 0x38, 0x64)));
        assert_eq!(Rgb::from_hex("#ffffff"), Some(Rgb::WHITE));
        assert_eq!(Rgb::from_hex("auto"), None);
        assert_eq!(Rgb::from_hex("FFF"), None);
        assert_eq!(Rgb::WHITE.to_string(), "#ffffff");
    }

    #[test]
    fn test_light_gray_text_is_flagged() {
        let para = Paragraph::new(vec![colored("Due dates are tentative.", "AAAAAA")]);
        let issues = ContrastAnalyzer.analyze(&doc_with(para));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::LowContrast);
        assert!(issues[0].message.contains("Text: #aaaaaa, Background: #ffffff"));
    }

    #[test]
    fn test_large_text_has_lower_minimum() {
        // About 3.5:1 on white
        let gray = "888888";
        let large = Paragraph::new(vec![colored("Welcome", gray).with_size(18.0)]);
        assert!(ContrastAnalyzer.analyze(&doc_with(large)).is_empty());

        let mut bold = colored("Welcome", gray).with_size(14.0);
        bold.bold = true;
        assert!(ContrastAnalyzer.analyze(&doc_with(Paragraph::new(vec![bold]))).is_empty());

        let body = Paragraph::new(vec![colored("Welcome", gray).with_size(12.0)]);
        assert_eq!(ContrastAnalyzer.analyze(&doc_with(body)).len(), 1);
    }

    #[test]
    fn test_cell_fill_is_the_background() {
        let mut table = Table::from_text(vec![vec!["Week"]]);
        let cell = &mut table.rows[0].cells[0];
        cell.shading = Some("1F3864".to_string());
        cell.paragraphs[0].runs[0].color = Some("FFFFFF".to_string());
        let mut doc = Document::new();
        doc.push(Block::Table(table.clone()));
        assert!(ContrastAnalyzer.analyze(&doc).is_empty());

        // Dark text on the same fill fails
        table.rows[0].cells[0].paragraphs[0].runs[0].color = Some("000080".to_string());
        let mut doc = Document::new();
        doc.push(Block::Table(table));
        let issues = ContrastAnalyzer.analyze(&doc);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].location, Location::cell(0, 0, 0));
    }

    #[test]
    fn test_automatic_color_is_skipped() {
        let para = Paragraph::new(vec![Run::new("Plain text")]);
        assert!(ContrastAnalyzer.analyze(&doc_with(para)).is_empty());
    }
}
