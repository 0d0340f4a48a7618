//! Report aggregation
//!
//! Issues are grouped by category name. Both the category keys and the
//! issues within each category are kept sorted, so a report built from the
//! same issues is identical whatever order the issues arrived in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::collaborator::CollaboratorOutcome;
use crate::issue::{Category, Issue, Severity};
use crate::sections::SectionCheck;

/// A check that did not run to completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedCheck {
    pub name: String,
    pub reason: String,
}

/// Aggregated analysis result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Issues keyed by category display name
    pub categories: BTreeMap<String, Vec<Issue>>,

    /// Required sections with no keyword match, in template order
    #[serde(default)]
    pub missing_sections: Vec<String>,

    /// Checks that failed and were skipped
    #[serde(default)]
    pub skipped: Vec<SkippedCheck>,
}

/// Summary counts for a report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_issues: usize,
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
    pub skipped_checks: usize,
    pub missing_sections: usize,
}

impl Report {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a report from a batch of issues
    pub fn from_issues(issues: impl IntoIterator<Item = Issue>) -> Self {
        let mut report = Self::new();
        report.extend(issues);
        report
    }

    /// Add one issue, keeping its category sorted
    pub fn add_issue(&mut self, issue: Issue) {
        let list = self.categories.entry(issue.category.name()).or_default();
        let pos = list.partition_point(|existing| existing.sort_key() <= issue.sort_key());
        list.insert(pos, issue);
    }

    /// Add many issues
    pub fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        for issue in issues {
            self.add_issue(issue);
        }
    }

    /// Record a skipped check
    pub fn record_skipped(&mut self, skipped: SkippedCheck) {
        let pos = self
            .skipped
            .partition_point(|existing| existing.name <= skipped.name);
        self.skipped.insert(pos, skipped);
    }

    /// Record the outcome of a section completeness check
    pub fn set_sections(&mut self, check: &SectionCheck) {
        self.missing_sections = check.missing.clone();
    }

    /// Merge the result of a semantic collaborator call
    ///
    /// On success every returned issue is moved into the `Semantic: <check>`
    /// category. On failure nothing but a skipped-check entry is added; the
    /// algorithmic categories are never touched.
    pub fn merge_collaborator(&mut self, check: &str, outcome: CollaboratorOutcome) {
        match outcome {
            Ok(issues) => {
                let category = Category::Semantic(check.to_string());
                for issue in issues {
                    self.add_issue(issue.with_category(category.clone()));
                }
            }
            Err(err) => {
                warn!(check, error = %err, "semantic check skipped");
                self.record_skipped(SkippedCheck {
                    name: format!("semantic:{}", check),
                    reason: err.to_string(),
                });
            }
        }
    }

    /// All issues, category by category
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.categories.values().flatten()
    }

    /// Issues in one category
    pub fn category(&self, category: &Category) -> &[Issue] {
        self.categories
            .get(&category.name())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of issues
    pub fn issue_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// Whether there is nothing to report
    pub fn is_clean(&self) -> bool {
        self.issue_count() == 0 && self.missing_sections.is_empty()
    }

    /// Compute summary counts
    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            total_issues: self.issue_count(),
            skipped_checks: self.skipped.len(),
            missing_sections: self.missing_sections.len(),
            ..Default::default()
        };
        for issue in self.issues() {
            match issue.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
                Severity::Info => summary.info += 1,
            }
        }
        summary
    }

    /// Serialize the report together with its summary
    pub fn to_json(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct Output<'a> {
            summary: Summary,
            #[serde(flatten)]
            report: &'a Report,
        }

        serde_json::to_string_pretty(&Output {
            summary: self.summary(),
            report: self,
        })
    }
}
