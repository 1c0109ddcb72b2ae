//! Schema-to-HTML rendering.
//!
//! [`Renderer`] is the boundary the pipeline calls through; [`SchemaRenderer`]
//! is the built-in implementation producing a single self-contained page per
//! schema. Descriptions are treated as Markdown.

use std::fs;
use std::path::Path;

use pulldown_cmark::{html, Options, Parser};
use serde_json::Value;

use crate::error::RenderError;
use crate::extractor::{Combinator, Property, SchemaDoc, SchemaNode};
use crate::linker::{definition_anchor, local_ref_anchor, property_anchor, ref_label, ROOT_ANCHOR};

/// Turns the schema at `schema` into an HTML page written to `html`.
pub trait Renderer {
    /// Renders one schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be read or understood, or the
    /// page cannot be written.
    fn render(&self, schema: &Path, html: &Path) -> Result<(), RenderError>;
}

impl<F> Renderer for F
where
    F: Fn(&Path, &Path) -> Result<(), RenderError>,
{
    fn render(&self, schema: &Path, html: &Path) -> Result<(), RenderError> {
        self(schema, html)
    }
}

/// Built-in renderer for JSON Schema documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaRenderer;

impl Renderer for SchemaRenderer {
    fn render(&self, schema: &Path, html: &Path) -> Result<(), RenderError> {
        let text = fs::read_to_string(schema).map_err(|source| RenderError::Read {
            path: schema.to_path_buf(),
            source,
        })?;
        let value: Value = serde_json::from_str(&text).map_err(|source| RenderError::Parse {
            path: schema.to_path_buf(),
            source,
        })?;
        let fallback = schema
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Schema".to_string());
        let doc = SchemaDoc::from_value(&value, &fallback).ok_or_else(|| {
            RenderError::NotASchema {
                path: schema.to_path_buf(),
            }
        })?;

        crate::writer::write_html(html, &render_page(&doc)).map_err(|source| {
            RenderError::Write {
                path: html.to_path_buf(),
                source,
            }
        })
    }
}

/// Renders a complete HTML page for a schema document.
pub fn render_page(doc: &SchemaDoc) -> String {
    let mut body = String::new();

    body.push_str(&format!("<h1>{}</h1>\n", escape_html(&doc.title)));
    if let Some(desc) = &doc.root.description {
        body.push_str(&markdown_to_html(desc));
    }

    body.push_str("<dl class=\"schema-meta\">\n");
    body.push_str(&format!(
        "<dt>Type</dt><dd>{}</dd>\n",
        type_summary(&doc.root)
    ));
    if let Some(dialect) = &doc.dialect {
        body.push_str(&format!(
            "<dt>Dialect</dt><dd><code>{}</code></dd>\n",
            escape_html(dialect)
        ));
    }
    if let Some(id) = &doc.id {
        body.push_str(&format!(
            "<dt>Identifier</dt><dd><code>{}</code></dd>\n",
            escape_html(id)
        ));
    }
    body.push_str("</dl>\n");

    render_node(&mut body, &doc.root, "");

    if !doc.definitions.is_empty() {
        body.push_str("<h2>Definitions</h2>\n");
        for def in &doc.definitions {
            body.push_str(&format!(
                "<section class=\"definition\" id=\"{}\">\n<h3>{}</h3>\n",
                escape_html(&definition_anchor(&def.name)),
                escape_html(&def.name)
            ));
            if let Some(desc) = &def.schema.description {
                body.push_str(&markdown_to_html(desc));
            }
            body.push_str(&format!(
                "<p class=\"type\">Type: {}</p>\n",
                type_summary(&def.schema)
            ));
            render_node(&mut body, &def.schema, &def.name);
            body.push_str("</section>\n");
        }
    }

    render_shell(&doc.title, &body)
}

/// Renders the details of a node: reference, constraints, combinators,
/// properties and nested sections. `path` is the dotted location used for
/// anchors and nested headings; empty at the root.
fn render_node(out: &mut String, node: &SchemaNode, path: &str) {
    if let Some(reference) = &node.reference {
        out.push_str(&format!("<p class=\"ref\">Reference: {}</p>\n", ref_html(reference)));
    }
    if node.truncated {
        out.push_str("<p class=\"truncated\">Nested too deeply to expand.</p>\n");
        return;
    }
    render_constraints(out, node);

    for (kind, branches) in &node.combinators {
        out.push_str(&format!(
            "<h4>{}</h4>\n<ol class=\"combinator\">\n",
            kind.label()
        ));
        for (i, branch) in branches.iter().enumerate() {
            out.push_str("<li>");
            out.push_str(&branch_summary(branch));
            if branch.has_structure() || !branch.constraints.is_empty() {
                let branch_path = join_path(path, &format!("{}[{}]", kind_key(*kind), i));
                render_node(out, branch, &branch_path);
            }
            out.push_str("</li>\n");
        }
        out.push_str("</ol>\n");
    }

    if let Some(not) = &node.not {
        out.push_str("<h4>Must not match</h4>\n<div class=\"not\">");
        out.push_str(&branch_summary(not));
        render_node(out, not, &join_path(path, "not"));
        out.push_str("</div>\n");
    }

    if !node.properties.is_empty() {
        render_properties(out, &node.properties, path);
    }

    if let Some(additional) = &node.additional {
        let add_path = join_path(path, "*");
        out.push_str(&format!(
            "<h4>Additional properties</h4>\n<p class=\"type\">Type: {}</p>\n",
            type_summary(additional)
        ));
        if let Some(desc) = &additional.description {
            out.push_str(&markdown_to_html(desc));
        }
        render_node(out, additional, &add_path);
    }

    match node.items.as_slice() {
        [] => {}
        [item] => render_item(out, item, &join_path(path, "[]"), None),
        tuple => {
            for (i, item) in tuple.iter().enumerate() {
                render_item(out, item, &join_path(path, &format!("[{i}]")), Some(i));
            }
        }
    }
}

fn render_item(out: &mut String, item: &SchemaNode, path: &str, index: Option<usize>) {
    let heading = match index {
        Some(i) => format!("Item {i}"),
        None => "Items".to_string(),
    };
    out.push_str(&format!(
        "<h4>{}</h4>\n<p class=\"type\">Type: {}</p>\n",
        heading,
        type_summary(item)
    ));
    if let Some(desc) = &item.description {
        out.push_str(&markdown_to_html(desc));
    }
    render_node(out, item, path);
}

fn render_properties(out: &mut String, properties: &[Property], path: &str) {
    out.push_str("<table class=\"properties\">\n<thead><tr><th>Property</th><th>Type</th><th>Required</th><th>Description</th></tr></thead>\n<tbody>\n");
    for prop in properties {
        let prop_path = join_path(path, &prop.name);
        let name = if prop.pattern {
            format!("<code>/{}/</code>", escape_html(&prop.name))
        } else {
            format!("<code>{}</code>", escape_html(&prop.name))
        };
        let mut description = prop
            .schema
            .description
            .as_deref()
            .map(markdown_to_html)
            .unwrap_or_default();
        for c in &prop.schema.constraints {
            description.push_str(&format!(
                "<div class=\"constraint\"><strong>{}:</strong> <code>{}</code></div>",
                c.label,
                escape_html(&c.value)
            ));
        }
        if prop.schema.has_structure() {
            description.push_str(&format!(
                "<div><a href=\"#{}\">Details</a></div>",
                escape_html(&property_anchor(&prop_path))
            ));
        }
        out.push_str(&format!(
            "<tr id=\"{}-row\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&property_anchor(&prop_path)),
            name,
            type_summary(&prop.schema),
            if prop.required { "Yes" } else { "No" },
            description
        ));
    }
    out.push_str("</tbody>\n</table>\n");

    for prop in properties.iter().filter(|p| p.schema.has_structure()) {
        let prop_path = join_path(path, &prop.name);
        out.push_str(&format!(
            "<section class=\"property\" id=\"{}\">\n<h3>{}</h3>\n",
            escape_html(&property_anchor(&prop_path)),
            escape_html(&prop_path)
        ));
        // Constraints already appear in the table row.
        let mut nested = prop.schema.clone();
        nested.constraints.clear();
        render_node(out, &nested, &prop_path);
        out.push_str("</section>\n");
    }
}

fn render_constraints(out: &mut String, node: &SchemaNode) {
    if node.constraints.is_empty() {
        return;
    }
    out.push_str("<ul class=\"constraints\">\n");
    for c in &node.constraints {
        out.push_str(&format!(
            "<li><strong>{}:</strong> <code>{}</code></li>\n",
            c.label,
            escape_html(&c.value)
        ));
    }
    out.push_str("</ul>\n");
}

/// One-line description of a combinator branch.
fn branch_summary(node: &SchemaNode) -> String {
    match &node.title {
        Some(title) => format!("<strong>{}</strong> ({})", escape_html(title), type_summary(node)),
        None => type_summary(node),
    }
}

/// Short, linked description of a node's type.
pub fn type_summary(node: &SchemaNode) -> String {
    if let Some(b) = node.boolean {
        return if b { "any value" } else { "no value" }.to_string();
    }
    if let Some(reference) = &node.reference {
        return ref_html(reference);
    }
    let mut parts: Vec<String> = node
        .types
        .iter()
        .map(|t| {
            if t == "array" {
                match node.items.as_slice() {
                    [item] => format!("array of {}", type_summary(item)),
                    [] => "array".to_string(),
                    _ => "tuple".to_string(),
                }
            } else {
                escape_html(t)
            }
        })
        .collect();
    if parts.is_empty() {
        parts.extend(node.combinators.iter().map(|(kind, branches)| {
            format!("{} {} schemas", kind.label().to_lowercase(), branches.len())
        }));
    }
    if parts.is_empty() {
        "any".to_string()
    } else {
        parts.join(" | ")
    }
}

/// Renders a `$ref` as an in-page link when it is local, as code otherwise.
fn ref_html(reference: &str) -> String {
    match local_ref_anchor(reference) {
        Some(anchor) if anchor == ROOT_ANCHOR => {
            format!("<a href=\"#{ROOT_ANCHOR}\">root schema</a>")
        }
        Some(anchor) => format!(
            "<a href=\"#{}\">{}</a>",
            escape_html(&anchor),
            escape_html(&ref_label(reference))
        ),
        None => format!("<code>{}</code>", escape_html(reference)),
    }
}

fn kind_key(kind: Combinator) -> &'static str {
    match kind {
        Combinator::AllOf => "allOf",
        Combinator::AnyOf => "anyOf",
        Combinator::OneOf => "oneOf",
    }
}

fn join_path(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{parent}.{child}")
    }
}

/// Converts Markdown to HTML using pulldown-cmark.
///
/// Raw HTML inside the Markdown is passed through to the page unescaped.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, opts);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

/// Wraps page content in the standard document shell with inline styles.
fn render_shell(title: &str, content_html: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>
{css}
</style>
</head>
<body>
<main id="{root}">
{content_html}
</main>
<footer class="site-footer">
<p>Generated by schema-docs</p>
</footer>
</body>
</html>
"##,
        title = escape_html(title),
        css = STYLE_CSS,
        root = ROOT_ANCHOR,
        content_html = content_html,
    )
}

const STYLE_CSS: &str = r#"body { font-family: system-ui, sans-serif; margin: 0; color: #1f2328; }
main { max-width: 60rem; margin: 0 auto; padding: 1.5rem; }
code { font-family: ui-monospace, monospace; background: #f6f8fa; padding: 0 .2em; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid #d0d7de; padding: .4rem .6rem; text-align: left; vertical-align: top; }
th { background: #f6f8fa; }
dl.schema-meta dt { font-weight: 600; }
section { border-left: 3px solid #d0d7de; padding-left: 1rem; margin: 1.5rem 0; }
.constraint, ul.constraints { font-size: .9em; }
.site-footer { text-align: center; color: #656d76; font-size: .85em; padding: 1rem; }"#;

/// Escapes HTML special characters in a string.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
