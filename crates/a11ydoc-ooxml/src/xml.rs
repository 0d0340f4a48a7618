//! Small helpers shared by the part readers and the writer

use quick_xml::events::BytesStart;

/// Attribute value by qualified name (e.g. `w:val`), unescaped
pub(crate) fn attr(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.as_ref() == name)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Attribute value by local name, ignoring whatever prefix the producer chose
pub(crate) fn attr_local(e: &BytesStart, local: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.local_name().as_ref() == local)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Whether an on/off property such as `<w:b/>` is switched on
///
/// A bare element means on; `w:val` of `0`, `false`, or `off` means off.
pub(crate) fn is_on(e: &BytesStart) -> bool {
    match attr_local(e, b"val") {
        Some(val) => !matches!(val.as_str(), "0" | "false" | "off" | "none"),
        None => true,
    }
}

/// Escape special XML characters
pub(crate) fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
