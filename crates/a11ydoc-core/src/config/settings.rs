//! Configuration settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TemplateError;

/// Top-level settings structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Analyzer dispatch settings
    pub analysis: AnalysisSettings,
    /// Required-sections settings
    pub sections: SectionSettings,
    /// Marked-copy settings
    pub annotation: AnnotationSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load settings from a file
    ///
    /// A relative section template path is resolved against the directory
    /// containing the settings file.
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let content = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings = Self::from_toml_str(&content)?;

        if let (Some(template), Some(base)) = (&settings.sections.template, path.parent()) {
            if template.is_relative() {
                settings.sections.template = Some(base.join(template));
            }
        }
        Ok(settings)
    }

    /// Check if an analyzer is enabled by name
    pub fn is_enabled(&self, analyzer: &str) -> bool {
        !self.analysis.disabled.iter().any(|name| name == analyzer)
    }
}

/// Analyzer dispatch configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Analyzer names to skip
    pub disabled: Vec<String>,
    /// Run analyzers on scoped worker threads
    pub parallel: bool,
}

/// Required-sections configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SectionSettings {
    /// Path to the section template
    pub template: Option<PathBuf>,
}

/// Marked-copy configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnnotationSettings {
    /// Write a marked copy when an output path is given
    pub enabled: bool,
}

impl Default for AnnotationSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}
