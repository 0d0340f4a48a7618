//! Error types for the analysis pipeline
//!
//! None of these abort a run: each one degrades a single part of the result
//! (a skipped check, a missing marker, an absent semantic category).

use std::path::PathBuf;
use std::time::Duration;

use a11ydoc_ast::Location;
use thiserror::Error;

use crate::report::SkippedCheck;

/// An analyzer failed internally
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyzerError {
    #[error("analyzer '{name}' panicked: {reason}")]
    Panicked { name: String, reason: String },
}

impl AnalyzerError {
    /// Build from a panic payload captured by `catch_unwind`
    pub fn from_panic(name: &str, payload: Box<dyn std::any::Any + Send>) -> Self {
        let reason = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        AnalyzerError::Panicked {
            name: name.to_string(),
            reason,
        }
    }

    /// Convert into the report entry for a skipped check
    pub fn into_skipped(self) -> SkippedCheck {
        match self {
            AnalyzerError::Panicked { name, reason } => SkippedCheck { name, reason },
        }
    }
}

/// A marker could not be placed in the annotated copy
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnnotationError {
    #[error("cannot resolve {location} in the document")]
    UnresolvedLocation { location: Location },
}

/// A semantic collaborator call failed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollaboratorError {
    #[error("collaborator '{name}' timed out after {after:?}")]
    Timeout { name: String, after: Duration },

    #[error("collaborator '{name}' failed: {reason}")]
    Failed { name: String, reason: String },

    #[error("collaborator '{name}' disconnected without a result")]
    Disconnected { name: String },
}

/// A template or settings file could not be loaded
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("section '{0}' has no keywords")]
    EmptySection(String),
}
