//! Text formatting analyzers
//!
//! Paragraph-level checks on direct formatting: bold text standing in for a
//! heading, small fonts, tight line spacing, full justification, long
//! all-caps blocks, and overused emphasis. Each visits every located
//! paragraph, including those in table cells.

use a11ydoc_ast::{Alignment, Document, Paragraph, Run};
use a11ydoc_core::{Issue, IssueKind};

use crate::thresholds::{
    ALL_CAPS_MIN_CHARS, EXCESSIVE_BOLD_RATIO, EXCESSIVE_ITALIC_RATIO, EXCESSIVE_UNDERLINE_RATIO,
    FORMATTING_MIN_CHARS, FORMAT_SWITCH_MIN_RUNS, HEADING_BOLD_RATIO, HEADING_MAX_CHARS,
    MAX_FORMAT_SWITCHES, MIN_FONT_SIZE, MIN_LINE_SPACING, SENTENCE_PUNCTUATION,
};
use crate::{preview, Analyzer};

/// Flags bold, short, unpunctuated, capitalized paragraphs that are not
/// styled as headings (`UNSTYLED_HEADING`)
///
/// All four conditions must hold. Headings and list items are skipped.
pub struct UnstyledHeadingAnalyzer;

impl UnstyledHeadingAnalyzer {
    /// Whether a paragraph reads like a heading made of direct formatting
    pub fn looks_like_heading(para: &Paragraph) -> bool {
        if para.heading_level().is_some() || para.is_list_item() {
            return false;
        }

        let text = para.plain_text();
        let trimmed = text.trim();
        let Some(first) = trimmed.chars().next() else {
            return false;
        };
        let Some(last) = trimmed.chars().last() else {
            return false;
        };

        let total: usize = para.runs.iter().map(|r| r.char_len()).sum();
        let bold: usize = para
            .runs
            .iter()
            .filter(|r| r.bold)
            .map(|r| r.char_len())
            .sum();
        let bold_ratio = bold as f64 / total as f64;

        bold_ratio > HEADING_BOLD_RATIO
            && trimmed.chars().count() < HEADING_MAX_CHARS
            && !SENTENCE_PUNCTUATION.contains(&last)
            && first.is_uppercase()
    }
}

impl Analyzer for UnstyledHeadingAnalyzer {
    fn name(&self) -> &'static str {
        "unstyled-headings"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        doc.located_paragraphs()
            .filter(|(_, para)| Self::looks_like_heading(para))
            .map(|(location, para)| {
                Issue::new(
                    IssueKind::UnstyledHeading,
                    location,
                    format!(
                        "Bold text looks like a heading but uses no heading style: \"{}\"",
                        preview(&para.plain_text())
                    ),
                )
            })
            .collect()
    }
}

/// Flags the first run below 11pt in each paragraph (`SMALL_FONT`)
pub struct SmallFontAnalyzer;

impl Analyzer for SmallFontAnalyzer {
    fn name(&self) -> &'static str {
        "font-size"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();
        for (location, para) in doc.located_paragraphs() {
            let small = para.runs.iter().find_map(|run| match run.font_size {
                Some(size) if size < MIN_FONT_SIZE && !run.text.trim().is_empty() => Some(size),
                _ => None,
            });
            if let Some(size) = small {
                issues.push(Issue::new(
                    IssueKind::SmallFont,
                    location,
                    format!(
                        "Font size {}pt (minimum {}pt): \"{}\"",
                        size,
                        MIN_FONT_SIZE,
                        preview(&para.plain_text())
                    ),
                ));
            }
        }
        issues
    }
}

/// Flags line spacing below 1.15 (`LOW_LINE_SPACING`)
pub struct LineSpacingAnalyzer;

impl Analyzer for LineSpacingAnalyzer {
    fn name(&self) -> &'static str {
        "line-spacing"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();
        for (location, para) in doc.located_paragraphs() {
            let text = para.plain_text();
            if text.trim().is_empty() {
                continue;
            }
            if let Some(spacing) = para.line_spacing.filter(|s| *s < MIN_LINE_SPACING) {
                issues.push(Issue::new(
                    IssueKind::LowLineSpacing,
                    location,
                    format!(
                        "Line spacing {:.2} (minimum {}): \"{}\"",
                        spacing,
                        MIN_LINE_SPACING,
                        preview(&text)
                    ),
                ));
            }
        }
        issues
    }
}

/// Flags fully justified paragraphs (`FULL_JUSTIFICATION`)
pub struct JustificationAnalyzer;

impl Analyzer for JustificationAnalyzer {
    fn name(&self) -> &'static str {
        "full-justification"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        doc.located_paragraphs()
            .filter(|(_, para)| para.alignment == Some(Alignment::Justify))
            .filter_map(|(location, para)| {
                let text = para.plain_text();
                if text.trim().is_empty() {
                    return None;
                }
                Some(Issue::new(
                    IssueKind::FullJustification,
                    location,
                    format!(
                        "Text is fully justified, which creates uneven word spacing: \"{}\"",
                        preview(&text)
                    ),
                ))
            })
            .collect()
    }
}

/// Flags paragraphs over 50 characters with no lowercase letters (`ALL_CAPS_BLOCK`)
pub struct AllCapsAnalyzer;

impl Analyzer for AllCapsAnalyzer {
    fn name(&self) -> &'static str {
        "all-caps"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();
        for (location, para) in doc.located_paragraphs() {
            let text = para.plain_text();
            let trimmed = text.trim();
            if trimmed.chars().count() <= ALL_CAPS_MIN_CHARS {
                continue;
            }
            let has_letters = trimmed.chars().any(char::is_alphabetic);
            let has_lowercase = trimmed.chars().any(char::is_lowercase);
            if has_letters && !has_lowercase {
                issues.push(Issue::new(
                    IssueKind::AllCapsBlock,
                    location,
                    format!(
                        "Large block of ALL CAPS text (hard to read): \"{}\"",
                        preview(trimmed)
                    ),
                ));
            }
        }
        issues
    }
}

/// Flags paragraphs where bold, italic, or underline covers most of the
/// text, or where emphasis switches on and off many times
/// (`EXCESSIVE_BOLD`, `EXCESSIVE_ITALIC`, `EXCESSIVE_UNDERLINE`,
/// `INCONSISTENT_FORMATTING`)
///
/// Headings and paragraphs already reported as unstyled headings are
/// skipped. Underlined link text does not count as underline.
pub struct ExcessiveFormattingAnalyzer;

impl ExcessiveFormattingAnalyzer {
    /// Times the (bold, italic, underline) state changes from run to run,
    /// starting from plain text
    pub fn format_switches(para: &Paragraph) -> usize {
        let mut previous = (false, false, false);
        let mut switches = 0;
        for run in &para.runs {
            let state = (run.bold, run.italic, run.underline);
            if state != previous {
                switches += 1;
            }
            previous = state;
        }
        switches
    }
}

impl Analyzer for ExcessiveFormattingAnalyzer {
    fn name(&self) -> &'static str {
        "excessive-formatting"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();

        for (location, para) in doc.located_paragraphs() {
            let text = para.plain_text();
            let trimmed = text.trim();
            let total = trimmed.chars().count();
            if total < FORMATTING_MIN_CHARS
                || para.heading_level().is_some()
                || UnstyledHeadingAnalyzer::looks_like_heading(para)
            {
                continue;
            }

            let share = |pick: fn(&Run) -> bool| {
                let chars: usize = para
                    .runs
                    .iter()
                    .filter(|r| pick(r))
                    .map(|r| r.char_len())
                    .sum();
                chars as f64 / total as f64
            };
            let checks = [
                (
                    IssueKind::ExcessiveBold,
                    share(|r| r.bold),
                    EXCESSIVE_BOLD_RATIO,
                    "bold",
                    "Use a Heading style for headings and bold sparingly for emphasis",
                ),
                (
                    IssueKind::ExcessiveItalic,
                    share(|r| r.italic),
                    EXCESSIVE_ITALIC_RATIO,
                    "italic",
                    "Large blocks of italic text are harder to read",
                ),
                (
                    IssueKind::ExcessiveUnderline,
                    share(|r| r.underline && r.hyperlink.is_none()),
                    EXCESSIVE_UNDERLINE_RATIO,
                    "underlined",
                    "Reserve underline for links",
                ),
            ];
            for (kind, ratio, limit, label, advice) in checks {
                if ratio > limit {
                    issues.push(Issue::new(
                        kind,
                        location,
                        format!(
                            "Paragraph has {}% {} text. {}: \"{}\"",
                            (ratio.min(1.0) * 100.0) as u32,
                            label,
                            advice,
                            preview(trimmed)
                        ),
                    ));
                }
            }

            let switches = Self::format_switches(para);
            if switches > MAX_FORMAT_SWITCHES && para.runs.len() > FORMAT_SWITCH_MIN_RUNS {
                issues.push(Issue::new(
                    IssueKind::InconsistentFormatting,
                    location,
                    format!(
                        "Paragraph has inconsistent formatting ({} format changes): \"{}\"",
                        switches,
                        preview(trimmed)
                    ),
                ));
            }
        }

        issues
    }
}
