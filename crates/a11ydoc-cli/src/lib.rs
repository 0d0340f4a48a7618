//! a11ydoc CLI - Command-line interface library
//!
//! This library provides the CLI functionality for a11ydoc:
//! - Check: analyze a DOCX file and print the accessibility report
//! - Sections: report which required sections a DOCX file covers
//!
//! # Library Usage
//!
//! ```ignore
//! use a11ydoc_cli::{analyze_path, check_command, CheckOptions, OutputFormat};
//!
//! // Analyze without printing anything
//! let checked = analyze_path(&input, &Settings::default(), None, false)?;
//! println!("{} issue(s)", checked.report.issue_count());
//!
//! // Or run the command as the binary would
//! check_command(&input, &CheckOptions { format: OutputFormat::Json, ..Default::default() })?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Print the report for a syllabus
//! a11ydoc check syllabus.docx --sections templates/required-sections.toml
//!
//! # JSON report plus a marked copy
//! a11ydoc check syllabus.docx --format json --marked syllabus-marked.docx
//!
//! # Only the section completeness check
//! a11ydoc sections syllabus.docx --sections templates/required-sections.toml
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{analyze_path, check_command, render_text, sections_command};
pub use app::{run_cli, CheckOptions, Checked, OutputFormat};
