//! Error types for the documentation pipeline.
//!
//! `DocsError` is what a run reports to its caller. Every variant names the
//! input it failed on so the command-line surface can print it verbatim.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal error for a whole documentation run.
#[derive(Debug, Error)]
pub enum DocsError {
    /// No schema files were supplied.
    #[error("No schema files provided")]
    NoSchemas,

    /// A named schema file does not exist on disk.
    #[error("Schema file not found: {}", .0.display())]
    SchemaNotFound(PathBuf),

    /// The output directory (or a unit subdirectory) could not be reset or created.
    #[error("Cannot prepare output directory {}: {source}", .path.display())]
    OutputDir {
        /// Directory that could not be removed or created.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Producing one documentation unit failed.
    #[error("Error generating documentation for {}: {source}", .schema.display())]
    Generate {
        /// Schema being processed when the failure happened.
        schema: PathBuf,
        /// What went wrong.
        #[source]
        source: UnitError,
    },
}

/// Failure while producing a single documentation unit.
#[derive(Debug, Error)]
pub enum UnitError {
    /// The renderer signalled failure.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The schema could not be copied next to its page.
    #[error("cannot copy schema to {}: {source}", .dest.display())]
    Copy {
        /// Copy destination.
        dest: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The rendered page could not be read back.
    #[error("cannot read {}: {source}", .path.display())]
    ReadHtml {
        /// Rendered page path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The patched page could not be written.
    #[error("cannot write {}: {source}", .path.display())]
    WriteHtml {
        /// Rendered page path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// Failure raised by a [`crate::renderer::Renderer`].
#[derive(Debug, Error)]
pub enum RenderError {
    /// The schema file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        /// Schema path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The schema file is not valid JSON.
    #[error("invalid JSON in {}: {source}", .path.display())]
    Parse {
        /// Schema path.
        path: PathBuf,
        /// Parser failure.
        #[source]
        source: serde_json::Error,
    },

    /// The document is valid JSON but neither an object nor a boolean schema.
    #[error("{} is not a JSON schema: top level must be an object or a boolean", .path.display())]
    NotASchema {
        /// Schema path.
        path: PathBuf,
    },

    /// The HTML page could not be written.
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        /// Output page path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Any other renderer failure, carried as text.
    #[error("{0}")]
    Other(String),
}
