//! a11ydoc-core - Issues, reports and annotation
//!
//! This crate holds everything in the pipeline that is not a detector:
//!
//! - [`issue`]: the `Issue` data model shared by analyzers and collaborators
//! - [`report`]: category grouping, sorting and summary counts
//! - [`sections`]: required-section completeness against a template
//! - [`annotate`]: the marked copy with one marker per flagged location
//! - [`collaborator`]: the contract for optional semantic reviewers
//! - [`config`]: `a11ydoc.toml` settings
//!
//! # Example
//!
//! ```
//! use a11ydoc_ast::{Block, Document, Location, Paragraph};
//! use a11ydoc_core::{annotate, Issue, IssueKind, Report};
//!
//! let mut doc = Document::new();
//! doc.push(Block::Paragraph(Paragraph::text("click here")));
//!
//! let issues = vec![Issue::new(
//!     IssueKind::NonDescriptiveLink,
//!     Location::TopLevel(0),
//!     "Link text 'click here' is not descriptive",
//! )];
//!
//! let report = Report::from_issues(issues.clone());
//! assert_eq!(report.issue_count(), 1);
//!
//! let marked = annotate(&doc, &issues);
//! assert_eq!(marked.markers_inserted, 1);
//! ```

pub mod annotate;
pub mod collaborator;
pub mod config;
pub mod error;
pub mod issue;
pub mod report;
pub mod sections;

pub use annotate::{annotate, MarkedDocument};
pub use collaborator::{
    run_with_timeout, CollaboratorOutcome, ReviewRequest, SemanticCollaborator, MAX_EXCERPT_CHARS,
};
pub use config::Settings;
pub use error::{AnalyzerError, AnnotationError, CollaboratorError, TemplateError};
pub use issue::{Category, Issue, IssueKind, Severity};
pub use report::{Report, SkippedCheck, Summary};
pub use sections::{check_sections, RequiredSection, SectionCheck, SectionTemplate};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
