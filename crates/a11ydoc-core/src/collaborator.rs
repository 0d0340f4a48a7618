//! Semantic collaborator contract
//!
//! A collaborator reviews a bounded text excerpt for one check type (tone,
//! policy wording, ...) and returns suggestions shaped like [`Issue`]s. Calls
//! run on a worker thread with a deadline; a late or failed collaborator
//! never affects the algorithmic part of a report.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use a11ydoc_ast::Document;
use tracing::{debug, warn};

use crate::error::CollaboratorError;
use crate::issue::Issue;

/// Maximum excerpt length sent to a collaborator, in characters
pub const MAX_EXCERPT_CHARS: usize = 8000;

/// Result of a collaborator call
pub type CollaboratorOutcome = Result<Vec<Issue>, CollaboratorError>;

/// A request for one semantic check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    /// Check identifier (e.g. "tone")
    pub check: String,
    /// Document text, truncated to [`MAX_EXCERPT_CHARS`]
    pub excerpt: String,
}

impl ReviewRequest {
    /// Build a request from a document's text
    pub fn from_document(check: impl Into<String>, doc: &Document) -> Self {
        Self {
            check: check.into(),
            excerpt: truncate_chars(&doc.plain_text(), MAX_EXCERPT_CHARS),
        }
    }
}

/// An external reviewer
pub trait SemanticCollaborator: Send + Sync {
    /// Name used in logs and skipped-check entries
    fn name(&self) -> &str;

    /// Review an excerpt and return suggestions
    fn review(&self, request: &ReviewRequest) -> CollaboratorOutcome;
}

/// Run a collaborator call with a deadline
///
/// The call runs on its own thread. If the deadline passes first the thread
/// is left to finish in the background and its result is dropped.
pub fn run_with_timeout(
    collaborator: Arc<dyn SemanticCollaborator>,
    request: ReviewRequest,
    timeout: Duration,
) -> CollaboratorOutcome {
    let name = collaborator.name().to_string();
    let (tx, rx) = mpsc::channel();

    let worker = Arc::clone(&collaborator);
    thread::spawn(move || {
        let outcome = worker.review(&request);
        // Receiver may be gone after a timeout
        let _ = tx.send(outcome);
    });

    match rx.recv_timeout(timeout) {
        Ok(outcome) => {
            if let Ok(issues) = &outcome {
                debug!(collaborator = %name, suggestions = issues.len(), "collaborator finished");
            }
            outcome
        }
        Err(mpsc::RecvTimeoutError::Timeout) => {
            warn!(collaborator = %name, ?timeout, "collaborator timed out");
            Err(CollaboratorError::Timeout {
                name,
                after: timeout,
            })
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            warn!(collaborator = %name, "collaborator worker exited without a result");
            Err(CollaboratorError::Disconnected { name })
        }
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
