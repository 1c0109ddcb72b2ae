//! JSON Schema documentation generator.
//!
//! Turns each input schema into a self-contained documentation folder holding
//! a rendered `index.html` and a copy of the schema, with a "View schema" link
//! spliced into the page right after its top-level heading.
//!
//! # Entry Point
//!
//! ```no_run
//! use std::path::PathBuf;
//! use schema_docs::{run, BuildOptions, SchemaRenderer};
//!
//! let options = BuildOptions {
//!     schemas: vec![PathBuf::from("user.schema.json")],
//!     output_dir: PathBuf::from("docs"),
//! };
//! run(&options, &SchemaRenderer).expect("Documentation generation failed");
//! ```
//!
//! # Output Structure
//!
//! ```text
//! docs/
//!   user.schema/
//!     index.html          ← rendered page + "View schema" link
//!     user.schema.json    ← byte-identical copy of the input
//!   order.schema/
//!     index.html
//!     order.schema.json
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod error;
pub mod extractor;
pub mod linker;
pub mod renderer;
pub mod writer;

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

pub use error::{DocsError, RenderError, UnitError};
pub use renderer::{Renderer, SchemaRenderer};

/// Default root of the generated documentation.
pub const DEFAULT_OUTPUT_DIR: &str = "docs";

/// File name of the rendered page inside each unit folder.
pub const INDEX_HTML: &str = "index.html";

/// Inputs for one documentation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Schema files, processed in order.
    pub schemas: Vec<PathBuf>,
    /// Root directory of the generated documentation. Wiped at the start of a run.
    pub output_dir: PathBuf,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            schemas: Vec::new(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// A schema file supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRef<'a> {
    path: &'a Path,
}

impl<'a> SchemaRef<'a> {
    /// Wraps a schema path.
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }

    /// The path as supplied.
    pub fn path(&self) -> &'a Path {
        self.path
    }

    /// Output folder name: the file name without its last extension, raw bytes kept.
    pub fn folder_name(&self) -> &'a OsStr {
        self.path.file_stem().unwrap_or_default()
    }

    /// File name of the schema copy, raw bytes kept.
    pub fn file_name(&self) -> &'a OsStr {
        self.path.file_name().unwrap_or_default()
    }

    /// File name as text for the page link. Invalid UTF-8 is replaced.
    pub fn link_target(&self) -> String {
        self.file_name().to_string_lossy().into_owned()
    }
}

/// One completed documentation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocUnit {
    /// Folder holding the unit.
    pub dir: PathBuf,
    /// Rendered page.
    pub html_path: PathBuf,
    /// Copy of the source schema.
    pub schema_copy: PathBuf,
    /// Whether the "View schema" link was inserted (false when the page has no `</h1>`).
    pub linked: bool,
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Root directory that was populated.
    pub output_dir: PathBuf,
    /// Units in input order.
    pub units: Vec<DocUnit>,
}

/// Generates documentation for every schema in `options`.
///
/// The output directory is removed and recreated before the first schema is
/// processed. Processing stops at the first failure; units written before it
/// stay on disk.
///
/// # Errors
///
/// Returns [`DocsError::NoSchemas`] without touching the filesystem when no
/// schemas are given, [`DocsError::OutputDir`] when the output tree cannot be
/// reset, [`DocsError::SchemaNotFound`] for a missing input, and
/// [`DocsError::Generate`] when rendering, copying or patching a unit fails.
pub fn run(options: &BuildOptions, renderer: &dyn Renderer) -> Result<BuildReport, DocsError> {
    if options.schemas.is_empty() {
        return Err(DocsError::NoSchemas);
    }

    let output_dir = &options.output_dir;
    debug!(dir = %output_dir.display(), "resetting output directory");
    writer::reset_dir(output_dir).map_err(|source| DocsError::OutputDir {
        path: output_dir.clone(),
        source,
    })?;

    let mut units = Vec::with_capacity(options.schemas.len());
    for path in &options.schemas {
        let schema = SchemaRef::new(path);
        if !schema.path().exists() {
            return Err(DocsError::SchemaNotFound(path.clone()));
        }

        let unit_dir = output_dir.join(schema.folder_name());
        writer::ensure_dir(&unit_dir).map_err(|source| DocsError::OutputDir {
            path: unit_dir.clone(),
            source,
        })?;

        let unit = build_unit(&schema, &unit_dir, renderer).map_err(|source| {
            DocsError::Generate {
                schema: path.clone(),
                source,
            }
        })?;
        info!(
            schema = %path.display(),
            page = %unit.html_path.display(),
            "documentation unit written"
        );
        units.push(unit);
    }

    Ok(BuildReport {
        output_dir: output_dir.clone(),
        units,
    })
}

/// Renders, copies and links a single schema into `unit_dir`.
fn build_unit(
    schema: &SchemaRef<'_>,
    unit_dir: &Path,
    renderer: &dyn Renderer,
) -> Result<DocUnit, UnitError> {
    let html_path = unit_dir.join(INDEX_HTML);
    debug!(schema = %schema.path().display(), "rendering");
    renderer.render(schema.path(), &html_path)?;

    let schema_copy = unit_dir.join(schema.file_name());
    writer::copy_preserving(schema.path(), &schema_copy).map_err(|source| UnitError::Copy {
        dest: schema_copy.clone(),
        source,
    })?;

    let html = fs::read_to_string(&html_path).map_err(|source| UnitError::ReadHtml {
        path: html_path.clone(),
        source,
    })?;
    let (html, linked) = match linker::inject_schema_link(&html, &schema.link_target()) {
        Some(patched) => (patched, true),
        None => {
            debug!(page = %html_path.display(), "no </h1> in rendered page, link not inserted");
            (html, false)
        }
    };
    writer::write_html(&html_path, &html).map_err(|source| UnitError::WriteHtml {
        path: html_path.clone(),
        source,
    })?;

    Ok(DocUnit {
        dir: unit_dir.to_path_buf(),
        html_path,
        schema_copy,
        linked,
    })
}
