//! Core document properties (docProps/core.xml)

use a11ydoc_ast::DocumentMeta;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::archive::CORE_PROPERTIES_PART;
use crate::error::{OoxmlError, Result};

/// Parse `dc:title` and `dc:language` from the core properties part
pub fn parse_core_properties(xml: &[u8]) -> Result<DocumentMeta> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut meta = DocumentMeta::default();
    let mut buf = Vec::new();
    let mut field: Option<&'static str> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                field = match e.local_name().as_ref() {
                    b"title" => Some("title"),
                    b"language" => Some("language"),
                    _ => None,
                };
            }
            Ok(Event::Text(ref e)) => {
                if let Some(name) = field {
                    let text = e
                        .unescape()
                        .map_err(|err| OoxmlError::xml(CORE_PROPERTIES_PART, err))?
                        .into_owned();
                    match name {
                        "title" => meta.title = Some(text),
                        _ => meta.language = Some(text),
                    }
                }
            }
            Ok(Event::End(_)) => field = None,
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::xml(CORE_PROPERTIES_PART, e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(meta)
}
