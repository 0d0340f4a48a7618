//! Required-section completeness
//!
//! A template is an ordered list of sections, each with a set of keyword
//! phrases. A section is present when any of its keywords appears anywhere
//! in the document text (case-insensitive substring match over top-level
//! paragraphs and table cell paragraphs).

use std::path::Path;

use a11ydoc_ast::Document;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TemplateError;

/// One required section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredSection {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Ordered required-sections template
///
/// ```toml
/// [[section]]
/// name = "Grading Scheme"
/// keywords = ["grading scheme", "grade breakdown"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTemplate {
    #[serde(default, rename = "section")]
    pub sections: Vec<RequiredSection>,
}

impl SectionTemplate {
    /// Parse a template from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, TemplateError> {
        let template: SectionTemplate = toml::from_str(toml_str)?;
        if let Some(empty) = template
            .sections
            .iter()
            .find(|s| s.keywords.iter().all(|k| k.trim().is_empty()))
        {
            return Err(TemplateError::EmptySection(empty.name.clone()));
        }
        Ok(template)
    }

    /// Load a template file
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let content = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Add a section (builder style)
    pub fn with_section<I, S>(mut self, name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sections.push(RequiredSection {
            name: name.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the template has no sections
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Outcome of a completeness check, both lists in template order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionCheck {
    pub present: Vec<String>,
    pub missing: Vec<String>,
}

/// Check a document against a template
pub fn check_sections(doc: &Document, template: &SectionTemplate) -> SectionCheck {
    let texts: Vec<String> = doc
        .located_paragraphs()
        .map(|(_, para)| para.plain_text().to_lowercase())
        .filter(|text| !text.trim().is_empty())
        .collect();

    let mut check = SectionCheck::default();
    for section in &template.sections {
        let found = section
            .keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .any(|keyword| texts.iter().any(|text| text.contains(&keyword)));

        if found {
            check.present.push(section.name.clone());
        } else {
            check.missing.push(section.name.clone());
        }
    }

    debug!(
        present = check.present.len(),
        missing = check.missing.len(),
        "section check complete"
    );
    check
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11ydoc_ast::{Block, Paragraph, Table};

    fn template() -> SectionTemplate {
        SectionTemplate::default()
            .with_section("Instructor", ["instructor", "professor"])
            .with_section("Grading Scale", ["grading scale", "grade scale"])
            .with_section("Calendar", ["calendar", "schedule"])
    }

    #[test]
    fn test_missing_sections_in_template_order() {
        let mut doc = Document::new();
        doc.push(Block::Paragraph(Paragraph::text("Professor Ada Lovelace")));

        let check = check_sections(&doc, &template());
        assert_eq!(check.present, vec!["Instructor"]);
        assert_eq!(check.missing, vec!["Grading Scale", "Calendar"]);
    }

    #[test]
    fn test_keywords_in_table_cells_count() {
        let mut doc = Document::new();
        doc.push(Block::Table(Table::from_text(vec![vec![
            "Weekly SCHEDULE",
            "Grade Scale",
        ]])));

        let check = check_sections(&doc, &template());
        assert_eq!(check.present, vec!["Grading Scale", "Calendar"]);
        assert_eq!(check.missing, vec!["Instructor"]);
    }

    #[test]
    fn test_present_and_missing_are_disjoint() {
        let mut doc = Document::new();
        doc.push(Block::Paragraph(Paragraph::text("calendar instructor")));
        let check = check_sections(&doc, &template());
        for name in &check.present {
            assert!(!check.missing.contains(name));
        }
        assert_eq!(check.present.len() + check.missing.len(), 3);
    }

    #[test]
    fn test_parse_template() {
        let toml = r#"
[[section]]
name = "Welcome Statement"
keywords = ["welcome"]

[[section]]
name = "Resources"
keywords = ["resources", "student resources"]
"#;
        let template = SectionTemplate::from_toml_str(toml).unwrap();
        assert_eq!(template.len(), 2);
        assert_eq!(template.sections[0].name, "Welcome Statement");
        assert_eq!(template.sections[1].keywords.len(), 2);
    }

    #[test]
    fn test_section_without_keywords_rejected() {
        let toml = r#"
[[section]]
name = "Empty"
keywords = []
"#;
        let err = SectionTemplate::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, TemplateError::EmptySection(name) if name == "Empty"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sections.toml");
        std::fs::write(
            &path,
            "[[section]]\nname = \"Calendar\"\nkeywords = [\"calendar\"]\n",
        )
        .unwrap();

        let template = SectionTemplate::load(&path).unwrap();
        assert_eq!(template.sections[0].name, "Calendar");

        let missing = SectionTemplate::load(&dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(TemplateError::Io { .. })));
    }
}
