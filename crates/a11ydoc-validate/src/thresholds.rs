//! Heuristic thresholds
//!
//! Every tuned constant used by the analyzers lives here so that a policy
//! change touches exactly one line.

/// Excess-H1 fires when there are more than this many H1s ...
pub const EXCESS_H1_WITH_FEW_H2: usize = 10;
/// ... and fewer than this many H2s
pub const FEW_H2: usize = 3;
/// Excess-H1 fires regardless of H2 count above this many H1s
pub const EXCESS_H1_ABSOLUTE: usize = 15;

/// Too-Many-Tables fires above this table count
pub const MAX_TABLES: usize = 5;
/// Excessive-Cell-Text fires above this many characters in one cell
pub const MAX_CELL_CHARS: usize = 500;
/// A table is large above this many rows ...
pub const LARGE_TABLE_ROWS: usize = 10;
/// ... or above this many columns
pub const LARGE_TABLE_COLS: usize = 5;

/// Layout signal: fraction of empty cells above which a table looks like layout
pub const LAYOUT_EMPTY_CELL_RATIO: f64 = 0.3;
/// Layout signal: label column text must be shorter than this
pub const LAYOUT_LABEL_MAX_CHARS: usize = 50;
/// Layout signal: fraction of label/value rows above which the table looks like a form
pub const LAYOUT_LABEL_VALUE_RATIO: f64 = 0.6;
/// Layout signal: minimum cells before length variance is considered
pub const LAYOUT_VARIANCE_MIN_CELLS: usize = 4;
/// Layout signal: coefficient of variation of cell text length above this
pub const LAYOUT_LENGTH_VARIATION: f64 = 2.0;

/// Merged-cell issues list at most this many cell positions
pub const MERGED_CELL_LOCATIONS_SHOWN: usize = 3;
/// Caption previews show this many first-row cells ...
pub const CAPTION_PREVIEW_CELLS: usize = 3;
/// ... each cut to this many characters
pub const CAPTION_PREVIEW_CHARS: usize = 15;

/// Body font size assumed when a table sets none explicitly, in points
pub const DEFAULT_BODY_FONT_SIZE: f32 = 11.0;

/// Unstyled heading: minimum bold share of the paragraph's characters
pub const HEADING_BOLD_RATIO: f64 = 0.8;
/// Unstyled heading: paragraph must be shorter than this
pub const HEADING_MAX_CHARS: usize = 100;
/// Characters that end a sentence and rule out an unstyled heading
pub const SENTENCE_PUNCTUATION: &[char] = &['.', '!', '?', ',', ';', ':'];

/// Excessive formatting: paragraphs shorter than this are not judged
pub const FORMATTING_MIN_CHARS: usize = 10;
/// Excessive formatting: bold share of the paragraph above this
pub const EXCESSIVE_BOLD_RATIO: f64 = 0.5;
/// Excessive formatting: italic share of the paragraph above this
pub const EXCESSIVE_ITALIC_RATIO: f64 = 0.5;
/// Excessive formatting: underlined share of the paragraph above this
pub const EXCESSIVE_UNDERLINE_RATIO: f64 = 0.3;
/// Inconsistent formatting: more bold/italic/underline switches than this ...
pub const MAX_FORMAT_SWITCHES: usize = 8;
/// ... in a paragraph with more runs than this
pub const FORMAT_SWITCH_MIN_RUNS: usize = 10;

/// Sentences with more words than this are flagged
pub const MAX_SENTENCE_WORDS: usize = 35;

/// Minimum readable font size in points
pub const MIN_FONT_SIZE: f32 = 11.0;
/// Minimum line spacing multiple
pub const MIN_LINE_SPACING: f32 = 1.15;
/// All-caps blocks are flagged above this many characters
pub const ALL_CAPS_MIN_CHARS: usize = 50;

/// Font families (lowercase fragments) that are decorative or hard to read
pub const DECORATIVE_FONTS: &[&str] = &[
    // Script and handwriting
    "brush script",
    "lucida handwriting",
    "mistral",
    "monotype corsiva",
    "palace script",
    "vivaldi",
    "edwardian script",
    "freestyle script",
    "french script",
    "kunstler script",
    "script",
    "cursive",
    // Display
    "curlz",
    "jokerman",
    "ravie",
    "showcard gothic",
    "snap itc",
    "stencil",
    "algerian",
    "broadway",
    "chiller",
    "harrington",
    "papyrus",
    "impact",
    // Blackletter
    "blackadder",
    "fraktur",
    "old english",
    "blackletter",
    // Novelty
    "comic sans",
    "kristen itc",
    "tempus sans itc",
    "gigi",
    "marker",
    "jester",
];
/// Inconsistent fonts: body text uses more families than this ...
pub const MAX_FONT_FAMILIES: usize = 2;
/// ... and a secondary family covers more than this share of runs
pub const SECONDARY_FONT_SHARE: f64 = 0.1;

/// Minimum contrast ratio for normal text
pub const MIN_CONTRAST_RATIO: f64 = 4.5;
/// Minimum contrast ratio for large text
pub const MIN_CONTRAST_RATIO_LARGE: f64 = 3.0;
/// Text is large from this size in points ...
pub const LARGE_TEXT_POINTS: f32 = 18.0;
/// ... or from this size when bold
pub const LARGE_BOLD_TEXT_POINTS: f32 = 14.0;

/// Layout list: a single-item list longer than this many characters
pub const LAYOUT_LIST_SINGLE_MAX_CHARS: usize = 200;
/// Layout list: length variation is judged from this many items
pub const LAYOUT_LIST_MIN_ITEMS: usize = 3;
/// Layout list: coefficient of variation of item lengths above this ...
pub const LAYOUT_LIST_LENGTH_VARIATION: f64 = 2.0;
/// ... with at least one item longer than this
pub const LAYOUT_LIST_LONG_ITEM_CHARS: usize = 300;

/// Hyperlink targets longer than this are flagged
pub const MAX_URL_CHARS: usize = 100;

/// Link texts that say nothing about their destination
pub const NON_DESCRIPTIVE_LINK_TEXT: &[&str] = &[
    "click here",
    "here",
    "read more",
    "more",
    "link",
    "this link",
    "click",
    "download",
    "more info",
    "more information",
    "learn more",
    "see more",
    "view more",
    "details",
    "continue",
    "next",
    "previous",
    "see here",
    "view",
];

/// Documents with more paragraphs than this need a table of contents
pub const LONG_DOCUMENT_PARAGRAPHS: usize = 150;
/// Paragraphs per page, for the page estimate in messages
pub const PARAGRAPHS_PER_PAGE: usize = 30;
/// A typed contents heading must appear within this many paragraphs
pub const TOC_HEADING_SCAN: usize = 20;
/// Paragraph texts that mark a typed table of contents
pub const TOC_HEADINGS: &[&str] = &["table of contents", "contents", "table of content"];
