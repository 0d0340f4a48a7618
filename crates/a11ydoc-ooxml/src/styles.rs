//! Style definitions parsing (word/styles.xml)
//!
//! Paragraphs reference styles by ID (`Heading1`, `ListParagraph`); the
//! analyzers reason about display names (`Heading 1`, `List Paragraph`).
//! This module provides the mapping.

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::archive::STYLES_PART;
use crate::error::{OoxmlError, Result};
use crate::xml::attr;

/// Collection of styles from a document
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    /// Display names keyed by style ID
    names: HashMap<String, String>,
    /// Default paragraph style ID
    pub default_paragraph: Option<String>,
}

impl StyleSheet {
    /// Parse styles from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut stylesheet = StyleSheet::default();
        let mut buf = Vec::new();
        let mut current_id: Option<String> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match e.local_name().as_ref()
                {
                    b"style" => {
                        current_id = attr(e, b"w:styleId");
                        let is_paragraph = attr(e, b"w:type").as_deref() == Some("paragraph");
                        let is_default = attr(e, b"w:default").as_deref() == Some("1");
                        if is_paragraph && is_default {
                            stylesheet.default_paragraph = current_id.clone();
                        }
                    }
                    b"name" => {
                        if let (Some(id), Some(name)) = (current_id.as_ref(), attr(e, b"w:val")) {
                            stylesheet.names.insert(id.clone(), display_name(&name));
                        }
                    }
                    _ => {}
                },
                Ok(Event::End(ref e)) => {
                    if e.local_name().as_ref() == b"style" {
                        current_id = None;
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::xml(STYLES_PART, e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(stylesheet)
    }

    /// Display name for a style ID
    pub fn name(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(|s| s.as_str())
    }

    /// Number of named styles
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no styles were defined
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Word stores built-in names in lower case ("heading 1", "title").
/// Capitalize the first letter so they read as shown in the UI.
fn display_name(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => first.to_uppercase().chain(chars).collect(),
        _ => raw.to_string(),
    }
}
