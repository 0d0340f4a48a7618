//! Accessibility issues
//!
//! An [`Issue`] is a single finding attached to exactly one [`Location`] of
//! the analyzed document. Its kind determines the default category and
//! severity; both can be overridden (collaborator suggestions are moved into
//! their own category when merged into a report).

use std::fmt;

use a11ydoc_ast::Location;
use serde::{Deserialize, Serialize};

/// A single accessibility or structure finding
///
/// # Example
///
/// ```
/// use a11ydoc_ast::Location;
/// use a11ydoc_core::issue::{Category, Issue, IssueKind, Severity};
///
/// let issue = Issue::new(
///     IssueKind::SmallFont,
///     Location::TopLevel(4),
///     "Text is 9pt, below the 11pt minimum",
/// );
/// assert_eq!(issue.category, Category::FontUsage);
/// assert_eq!(issue.severity, Severity::Warning);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// What kind of problem this is
    pub kind: IssueKind,

    /// Report category the issue is grouped under
    pub category: Category,

    /// How serious the issue is
    pub severity: Severity,

    /// Where the issue occurs
    pub location: Location,

    /// Human-readable description
    pub message: String,
}

/// Severity level of an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Manual review suggested, not necessarily a problem
    Info,

    /// Likely accessibility barrier
    Warning,

    /// Definite accessibility barrier
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(s)
    }
}

/// The enumerated issue kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueKind {
    // Headings
    MissingH1,
    ExcessH1,

    // Tables
    TableNoHeader,
    LayoutTable,
    TooManyTables,
    ExcessiveCellText,
    LargeTable,
    EmptyTableRow,
    EmptyTableColumn,
    #[serde(rename = "TABLE_MERGED_CELLS")]
    MergedCells,
    TableMissingCaption,

    // Text formatting
    UnstyledHeading,
    LowLineSpacing,
    FullJustification,
    AllCapsBlock,
    PseudoTable,
    ExcessiveBold,
    ExcessiveItalic,
    ExcessiveUnderline,
    InconsistentFormatting,

    // Fonts
    SmallFont,
    DecorativeFont,
    InconsistentFonts,

    // Color
    LowContrast,

    // Lists
    ManualList,
    InconsistentListHierarchy,
    LayoutList,

    // Readability
    LongSentence,

    // Links
    RawUrlLink,
    NonDescriptiveLink,
    UnderlineNonLink,
    LongUrl,
    PdfLink,
    MissingToc,

    // Images
    ImageReview,
    MissingAltText,

    // Document properties
    MissingTitle,
    MissingLanguage,

    /// Free-form suggestion returned by a semantic collaborator
    SemanticSuggestion,
}

impl IssueKind {
    /// The label used in markers and text output (e.g. "SMALL_FONT")
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::MissingH1 => "MISSING_H1",
            IssueKind::ExcessH1 => "EXCESS_H1",
            IssueKind::TableNoHeader => "TABLE_NO_HEADER",
            IssueKind::LayoutTable => "LAYOUT_TABLE",
            IssueKind::TooManyTables => "TOO_MANY_TABLES",
            IssueKind::ExcessiveCellText => "EXCESSIVE_CELL_TEXT",
            IssueKind::LargeTable => "LARGE_TABLE",
            IssueKind::EmptyTableRow => "EMPTY_TABLE_ROW",
            IssueKind::EmptyTableColumn => "EMPTY_TABLE_COLUMN",
            IssueKind::MergedCells => "TABLE_MERGED_CELLS",
            IssueKind::TableMissingCaption => "TABLE_MISSING_CAPTION",
            IssueKind::UnstyledHeading => "UNSTYLED_HEADING",
            IssueKind::LowLineSpacing => "LOW_LINE_SPACING",
            IssueKind::FullJustification => "FULL_JUSTIFICATION",
            IssueKind::AllCapsBlock => "ALL_CAPS_BLOCK",
            IssueKind::PseudoTable => "PSEUDO_TABLE",
            IssueKind::ExcessiveBold => "EXCESSIVE_BOLD",
            IssueKind::ExcessiveItalic => "EXCESSIVE_ITALIC",
            IssueKind::ExcessiveUnderline => "EXCESSIVE_UNDERLINE",
            IssueKind::InconsistentFormatting => "INCONSISTENT_FORMATTING",
            IssueKind::SmallFont => "SMALL_FONT",
            IssueKind::DecorativeFont => "DECORATIVE_FONT",
            IssueKind::InconsistentFonts => "INCONSISTENT_FONTS",
            IssueKind::LowContrast => "LOW_CONTRAST",
            IssueKind::ManualList => "MANUAL_LIST",
            IssueKind::InconsistentListHierarchy => "INCONSISTENT_LIST_HIERARCHY",
            IssueKind::LayoutList => "LAYOUT_LIST",
            IssueKind::LongSentence => "LONG_SENTENCE",
            IssueKind::RawUrlLink => "RAW_URL_LINK",
            IssueKind::NonDescriptiveLink => "NON_DESCRIPTIVE_LINK",
            IssueKind::UnderlineNonLink => "UNDERLINE_NON_LINK",
            IssueKind::LongUrl => "LONG_URL",
            IssueKind::PdfLink => "PDF_LINK",
            IssueKind::MissingToc => "MISSING_TOC",
            IssueKind::ImageReview => "IMAGE_REVIEW",
            IssueKind::MissingAltText => "MISSING_ALT_TEXT",
            IssueKind::MissingTitle => "MISSING_TITLE",
            IssueKind::MissingLanguage => "MISSING_LANGUAGE",
            IssueKind::SemanticSuggestion => "SEMANTIC_SUGGESTION",
        }
    }

    /// Default report category
    pub fn category(&self) -> Category {
        match self {
            IssueKind::MissingH1 | IssueKind::ExcessH1 => Category::Headings,
            IssueKind::TableNoHeader
            | IssueKind::LayoutTable
            | IssueKind::TooManyTables
            | IssueKind::ExcessiveCellText
            | IssueKind::LargeTable
            | IssueKind::EmptyTableRow
            | IssueKind::EmptyTableColumn
            | IssueKind::MergedCells
            | IssueKind::TableMissingCaption => Category::TableStructure,
            IssueKind::UnstyledHeading
            | IssueKind::LowLineSpacing
            | IssueKind::FullJustification
            | IssueKind::AllCapsBlock
            | IssueKind::PseudoTable
            | IssueKind::ExcessiveBold
            | IssueKind::ExcessiveItalic
            | IssueKind::ExcessiveUnderline
            | IssueKind::InconsistentFormatting => Category::TextFormatting,
            IssueKind::SmallFont | IssueKind::DecorativeFont | IssueKind::InconsistentFonts => {
                Category::FontUsage
            }
            IssueKind::LowContrast => Category::ColorContrast,
            IssueKind::ManualList
            | IssueKind::InconsistentListHierarchy
            | IssueKind::LayoutList => Category::Lists,
            IssueKind::LongSentence => Category::Readability,
            IssueKind::RawUrlLink
            | IssueKind::NonDescriptiveLink
            | IssueKind::UnderlineNonLink
            | IssueKind::LongUrl
            | IssueKind::PdfLink
            | IssueKind::MissingToc => Category::LinksNavigation,
            IssueKind::ImageReview | IssueKind::MissingAltText => Category::Images,
            IssueKind::MissingTitle | IssueKind::MissingLanguage => Category::DocumentProperties,
            IssueKind::SemanticSuggestion => Category::Semantic("review".to_string()),
        }
    }

    /// Default severity
    pub fn default_severity(&self) -> Severity {
        match self {
            IssueKind::MissingH1
            | IssueKind::TableNoHeader
            | IssueKind::MissingAltText
            | IssueKind::MissingTitle => Severity::Error,
            IssueKind::ImageReview
            | IssueKind::PdfLink
            | IssueKind::LongUrl
            | IssueKind::TableMissingCaption
            | IssueKind::LongSentence
            | IssueKind::SemanticSuggestion => Severity::Info,
            _ => Severity::Warning,
        }
    }

    /// Whether the issue describes a whole table rather than one paragraph
    pub fn is_table_level(&self) -> bool {
        matches!(
            self,
            IssueKind::TableNoHeader
                | IssueKind::LayoutTable
                | IssueKind::LargeTable
                | IssueKind::EmptyTableRow
                | IssueKind::EmptyTableColumn
                | IssueKind::MergedCells
                | IssueKind::TableMissingCaption
        )
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const SEMANTIC_PREFIX: &str = "Semantic: ";

/// Report category
///
/// Serialized as its display name so reports keyed by category read the
/// same in JSON and in text output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Category {
    Headings,
    TableStructure,
    TextFormatting,
    FontUsage,
    ColorContrast,
    Lists,
    Readability,
    LinksNavigation,
    Images,
    DocumentProperties,
    /// Suggestions from a semantic collaborator, by check identifier
    Semantic(String),
}

impl Category {
    /// Display name used as the report key
    pub fn name(&self) -> String {
        match self {
            Category::Headings => "Headings".to_string(),
            Category::TableStructure => "Table Structure".to_string(),
            Category::TextFormatting => "Text Formatting".to_string(),
            Category::FontUsage => "Font Usage".to_string(),
            Category::ColorContrast => "Color & Contrast".to_string(),
            Category::Lists => "Lists".to_string(),
            Category::Readability => "Readability".to_string(),
            Category::LinksNavigation => "Links & Navigation".to_string(),
            Category::Images => "Images".to_string(),
            Category::DocumentProperties => "Document Properties".to_string(),
            Category::Semantic(check) => format!("{}{}", SEMANTIC_PREFIX, check),
        }
    }

    /// Parse a display name back into a category
    pub fn from_name(name: &str) -> Option<Self> {
        let category = match name {
            "Headings" => Category::Headings,
            "Table Structure" => Category::TableStructure,
            "Text Formatting" => Category::TextFormatting,
            "Font Usage" => Category::FontUsage,
            "Color & Contrast" => Category::ColorContrast,
            "Readability" => Category::Readability,
            "Lists" => Category::Lists,
            "Links & Navigation" => Category::LinksNavigation,
            "Images" => Category::Images,
            "Document Properties" => Category::DocumentProperties,
            other => Category::Semantic(other.strip_prefix(SEMANTIC_PREFIX)?.to_string()),
        };
        Some(category)
    }

    /// Whether this category holds collaborator output
    pub fn is_semantic(&self) -> bool {
        matches!(self, Category::Semantic(_))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.name()
    }
}

impl TryFrom<String> for Category {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Category::from_name(&value).ok_or_else(|| format!("unknown category '{}'", value))
    }
}

impl Issue {
    /// Create an issue with the kind's default category and severity
    pub fn new(kind: IssueKind, location: Location, message: impl Into<String>) -> Self {
        Self {
            kind,
            category: kind.category(),
            severity: kind.default_severity(),
            location,
            message: message.into(),
        }
    }

    /// Override the severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Override the category
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Check if this is an error-level issue
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    /// Ordering used inside a report category
    pub(crate) fn sort_key(&self) -> (Location, IssueKind, &str) {
        (self.location, self.kind, self.message.as_str())
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] {}: {}",
            self.severity, self.kind, self.location, self.message
        )
    }
}
