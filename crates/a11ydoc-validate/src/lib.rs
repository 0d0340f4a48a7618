//! a11ydoc-validate - Heuristic accessibility analyzers
//!
//! This crate provides the registry of structural analyzers that turn a
//! parsed [`Document`] into [`Issue`]s.
//!
//! # Architecture
//!
//! Each detector implements the [`Analyzer`] trait: a pure function from a
//! borrowed document to a list of issues. The [`AnalysisEngine`] holds the
//! registered analyzers and runs them either one after another or on scoped
//! threads. Results are sorted before they are returned, so the outcome does
//! not depend on registration order or scheduling.
//!
//! An analyzer that panics is isolated: its panic is caught, the check is
//! recorded as skipped, and the remaining analyzers still run.
//!
//! # Example
//!
//! ```
//! use a11ydoc_ast::{Block, Document, Paragraph, Run};
//! use a11ydoc_core::IssueKind;
//! use a11ydoc_validate::AnalysisEngine;
//!
//! let mut doc = Document::new();
//! doc.push(Block::Paragraph(Paragraph::new(vec![Run::new("Fine print").with_size(8.0)])));
//!
//! let analysis = AnalysisEngine::with_defaults().run(&doc);
//! assert!(analysis.issues.iter().any(|i| i.kind == IssueKind::SmallFont));
//! assert!(analysis.skipped.is_empty());
//! ```

pub mod alignment;
pub mod color;
pub mod fonts;
pub mod formatting;
pub mod headings;
pub mod images;
pub mod links;
pub mod lists;
pub mod metadata;
pub mod navigation;
pub mod readability;
pub mod tables;
pub mod thresholds;

use std::collections::BTreeSet;
use std::panic::{catch_unwind, AssertUnwindSafe};

use a11ydoc_ast::Document;
use a11ydoc_core::config::AnalysisSettings;
use a11ydoc_core::{AnalyzerError, Issue, Report, SkippedCheck};
use tracing::{debug, warn};

// Re-export analyzers
pub use alignment::PseudoTableAnalyzer;
pub use color::ContrastAnalyzer;
pub use fonts::{DecorativeFontAnalyzer, InconsistentFontsAnalyzer};
pub use formatting::{
    AllCapsAnalyzer, ExcessiveFormattingAnalyzer, JustificationAnalyzer, LineSpacingAnalyzer,
    SmallFontAnalyzer, UnstyledHeadingAnalyzer,
};
pub use headings::HeadingStructureAnalyzer;
pub use images::ImageAnalyzer;
pub use links::{
    LongUrlAnalyzer, NonDescriptiveLinkAnalyzer, PdfLinkAnalyzer, RawUrlLinkAnalyzer,
    UnderlineNonLinkAnalyzer,
};
pub use lists::{LayoutListAnalyzer, ListHierarchyAnalyzer, ManualListAnalyzer};
pub use metadata::MetadataAnalyzer;
pub use navigation::TocAnalyzer;
pub use readability::LongSentenceAnalyzer;
pub use tables::{
    has_header_row, EmptyTableCellsAnalyzer, LayoutTableAnalyzer, MergedCellsAnalyzer,
    TableCaptionAnalyzer, TableHeaderAnalyzer, TableUsageAnalyzer,
};

/// Trait for document analyzers
///
/// Analyzers never mutate the document and keep no state between calls, so
/// the same analyzer may run concurrently with any other.
pub trait Analyzer: Send + Sync {
    /// Unique name, used to disable the analyzer and in skipped-check entries
    fn name(&self) -> &'static str;

    /// Inspect the document and return any issues found
    fn analyze(&self, doc: &Document) -> Vec<Issue>;
}

/// Outcome of running the registry over one document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    /// Issues from every analyzer that completed, sorted
    pub issues: Vec<Issue>,
    /// Analyzers that failed, sorted by name
    pub skipped: Vec<SkippedCheck>,
}

impl Analysis {
    /// Aggregate into a report
    pub fn report(&self) -> Report {
        let mut report = Report::from_issues(self.issues.iter().cloned());
        for skipped in &self.skipped {
            report.record_skipped(skipped.clone());
        }
        report
    }
}

/// Analysis engine that orchestrates the registered analyzers
pub struct AnalysisEngine {
    analyzers: Vec<Box<dyn Analyzer>>,
    disabled: BTreeSet<String>,
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisEngine {
    /// Create an empty engine
    pub fn new() -> Self {
        Self {
            analyzers: Vec::new(),
            disabled: BTreeSet::new(),
        }
    }

    /// Create an engine with every built-in analyzer
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_analyzer(Box::new(HeadingStructureAnalyzer));
        engine.add_analyzer(Box::new(TableHeaderAnalyzer));
        engine.add_analyzer(Box::new(LayoutTableAnalyzer));
        engine.add_analyzer(Box::new(TableUsageAnalyzer));
        engine.add_analyzer(Box::new(EmptyTableCellsAnalyzer));
        engine.add_analyzer(Box::new(MergedCellsAnalyzer));
        engine.add_analyzer(Box::new(TableCaptionAnalyzer));
        engine.add_analyzer(Box::new(UnstyledHeadingAnalyzer));
        engine.add_analyzer(Box::new(SmallFontAnalyzer));
        engine.add_analyzer(Box::new(DecorativeFontAnalyzer));
        engine.add_analyzer(Box::new(InconsistentFontsAnalyzer));
        engine.add_analyzer(Box::new(ContrastAnalyzer));
        engine.add_analyzer(Box::new(LineSpacingAnalyzer));
        engine.add_analyzer(Box::new(JustificationAnalyzer));
        engine.add_analyzer(Box::new(AllCapsAnalyzer));
        engine.add_analyzer(Box::new(ExcessiveFormattingAnalyzer));
        engine.add_analyzer(Box::new(LongSentenceAnalyzer));
        engine.add_analyzer(Box::new(ManualListAnalyzer));
        engine.add_analyzer(Box::new(ListHierarchyAnalyzer));
        engine.add_analyzer(Box::new(LayoutListAnalyzer));
        engine.add_analyzer(Box::new(PseudoTableAnalyzer));
        engine.add_analyzer(Box::new(RawUrlLinkAnalyzer));
        engine.add_analyzer(Box::new(NonDescriptiveLinkAnalyzer));
        engine.add_analyzer(Box::new(UnderlineNonLinkAnalyzer));
        engine.add_analyzer(Box::new(LongUrlAnalyzer));
        engine.add_analyzer(Box::new(PdfLinkAnalyzer));
        engine.add_analyzer(Box::new(TocAnalyzer));
        engine.add_analyzer(Box::new(ImageAnalyzer));
        engine.add_analyzer(Box::new(MetadataAnalyzer));
        engine
    }

    /// Create a default engine honoring the `[analysis]` settings
    pub fn from_settings(settings: &AnalysisSettings) -> Self {
        let mut engine = Self::with_defaults();
        for name in &settings.disabled {
            engine.disable(name);
        }
        engine
    }

    /// Add an analyzer to the engine
    pub fn add_analyzer(&mut self, analyzer: Box<dyn Analyzer>) {
        self.analyzers.push(analyzer);
    }

    /// Skip an analyzer by name
    pub fn disable(&mut self, name: &str) {
        if !self.analyzers.iter().any(|a| a.name() == name) {
            warn!(analyzer = name, "disabling unknown analyzer");
        }
        self.disabled.insert(name.to_string());
    }

    /// Get the number of registered analyzers
    pub fn analyzer_count(&self) -> usize {
        self.analyzers.len()
    }

    /// Get the names of all analyzers that will run
    pub fn analyzer_names(&self) -> Vec<&'static str> {
        self.enabled().map(|a| a.name()).collect()
    }

    fn enabled(&self) -> impl Iterator<Item = &dyn Analyzer> {
        self.analyzers
            .iter()
            .map(|a| a.as_ref())
            .filter(|a| !self.disabled.contains(a.name()))
    }

    /// Run every enabled analyzer in registration order
    pub fn run(&self, doc: &Document) -> Analysis {
        let results: Vec<_> = self
            .enabled()
            .map(|analyzer| run_isolated(analyzer, doc))
            .collect();
        collect(results)
    }

    /// Run every enabled analyzer on its own scoped thread
    pub fn run_parallel(&self, doc: &Document) -> Analysis {
        let results = std::thread::scope(|scope| {
            let handles: Vec<_> = self
                .enabled()
                .map(|analyzer| (analyzer.name(), scope.spawn(move || run_isolated(analyzer, doc))))
                .collect();

            handles
                .into_iter()
                .map(|(name, handle)| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| Err(AnalyzerError::from_panic(name, payload)))
                })
                .collect::<Vec<_>>()
        });
        collect(results)
    }

    /// Run sequentially or in parallel
    pub fn analyze(&self, doc: &Document, parallel: bool) -> Analysis {
        if parallel {
            self.run_parallel(doc)
        } else {
            self.run(doc)
        }
    }
}

fn run_isolated(analyzer: &dyn Analyzer, doc: &Document) -> Result<Vec<Issue>, AnalyzerError> {
    let name = analyzer.name();
    match catch_unwind(AssertUnwindSafe(|| analyzer.analyze(doc))) {
        Ok(issues) => {
            debug!(analyzer = name, issues = issues.len(), "analyzer finished");
            Ok(issues)
        }
        Err(payload) => {
            let err = AnalyzerError::from_panic(name, payload);
            warn!(analyzer = name, "check skipped: {}", err);
            Err(err)
        }
    }
}

fn collect(results: Vec<Result<Vec<Issue>, AnalyzerError>>) -> Analysis {
    let mut analysis = Analysis::default();
    for result in results {
        match result {
            Ok(issues) => analysis.issues.extend(issues),
            Err(err) => analysis.skipped.push(err.into_skipped()),
        }
    }
    analysis.issues.sort_by(|a, b| {
        (a.location, a.kind, &a.message).cmp(&(b.location, b.kind, &b.message))
    });
    analysis.skipped.sort_by(|a, b| a.name.cmp(&b.name));
    analysis
}

/// First 60 characters of a text, with an ellipsis when cut
pub(crate) fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(60).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
