//! Configuration
//!
//! Settings are loaded from `a11ydoc.toml`:
//!
//! ```toml
//! [analysis]
//! disabled = ["images"]
//! parallel = true
//!
//! [sections]
//! template = "templates/required-sections.toml"
//!
//! [annotation]
//! enabled = true
//! ```
//!
//! Every table and field is optional; missing values fall back to defaults.

mod settings;

#[cfg(test)]
mod tests;

pub use settings::{AnalysisSettings, AnnotationSettings, SectionSettings, Settings};
