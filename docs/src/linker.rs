//! Link handling: the "View schema" link spliced into rendered pages, and
//! anchor names for local `$ref` targets.

use crate::renderer::escape_html;

/// Closing tag after which the schema link is inserted.
pub const HEADING_CLOSE: &str = "</h1>";

/// Builds the paragraph linking a page to its co-located schema copy.
///
/// The file name is HTML-escaped inside `href`, so names containing `&`, `<`,
/// `>` or `"` differ from a raw splice. Other names are emitted unchanged.
pub fn schema_link_html(schema_file_name: &str) -> String {
    format!(
        r#"<p><a href="{}" target="_blank">View schema</a></p>"#,
        escape_html(schema_file_name)
    )
}

/// Inserts the schema link right after the first `</h1>` in `html`.
///
/// Only the first occurrence is patched. Returns `None` when the page has no
/// `</h1>`, in which case the caller keeps the page as it is.
pub fn inject_schema_link(html: &str, schema_file_name: &str) -> Option<String> {
    let at = html.find(HEADING_CLOSE)? + HEADING_CLOSE.len();
    let link = schema_link_html(schema_file_name);
    let mut patched = String::with_capacity(html.len() + link.len() + 1);
    patched.push_str(&html[..at]);
    patched.push('\n');
    patched.push_str(&link);
    patched.push_str(&html[at..]);
    Some(patched)
}

/// Resolves a `$ref` value to an in-page anchor, if it points into this document.
///
/// `#` maps to the root anchor, `#/definitions/Foo` and `#/$defs/Foo` map to
/// the definition's anchor. Anything else (remote or relative files, deeper
/// pointers) returns `None`.
pub fn local_ref_anchor(reference: &str) -> Option<String> {
    if reference == "#" || reference == "#/" {
        return Some(ROOT_ANCHOR.to_string());
    }
    let pointer = reference.strip_prefix("#/")?;
    let mut segments = pointer.split('/');
    let container = segments.next()?;
    let name = segments.next()?;
    if segments.next().is_some() || !matches!(container, "definitions" | "$defs") {
        return None;
    }
    Some(definition_anchor(&unescape_pointer(name)))
}

/// Anchor of the page root.
pub const ROOT_ANCHOR: &str = "root";

/// Anchor id for a named definition.
pub fn definition_anchor(name: &str) -> String {
    format!("def-{}", slug(name))
}

/// Anchor id for a property path such as `address.street`.
pub fn property_anchor(path: &str) -> String {
    format!("prop-{}", slug(path))
}

/// Extracts the last segment of a `$ref` (the definition name for local refs).
pub fn ref_label(reference: &str) -> String {
    let trimmed = reference.trim_end_matches('/');
    let last = trimmed.rsplit(['/', '#']).next().unwrap_or(trimmed);
    if last.is_empty() {
        reference.to_string()
    } else {
        unescape_pointer(last)
    }
}

/// Undoes JSON Pointer escaping (`~1` → `/`, `~0` → `~`).
fn unescape_pointer(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

/// Reduces a name to characters safe inside an HTML id.
fn slug(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
