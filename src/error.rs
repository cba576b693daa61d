use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort a run before any output is produced.
#[derive(Debug, Error)]
pub enum Error {
    /// The input file or directory does not exist.
    #[error("`{}` not found", path.display())]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },
    /// Reading or writing a file failed.
    #[error("I/O error on `{}`", path.display())]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
    /// The document is not well-formed XML.
    #[error("XML parse error: {0}")]
    Parse(#[from] ParseError),
    /// A record could not be serialized.
    #[error("JSON serialization error")]
    Json(#[from] serde_json::Error),
}

/// Reasons a document is not well-formed.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Syntax error reported by the XML reader.
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),
    /// The document ended while elements were still open.
    #[error("unclosed element `{0}`")]
    Unclosed(String),
    /// The document has no root element.
    #[error("no root element")]
    Empty,
    /// More than one top-level element.
    #[error("unexpected element `{0}` after the root element")]
    TrailingElement(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
