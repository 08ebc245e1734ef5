//! Errors raised while loading or assembling a mesh.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeshError {
    /// The mesh file could not be opened.
    #[error("Failed to open mesh file {}: {source}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading failed after the file was opened.
    #[error("I/O error while reading mesh: {0}")]
    Io(#[from] io::Error),

    /// A record does not match the token count/type of its kind.
    #[error("Malformed line {line}: {reason} ('{content}')")]
    MalformedLine {
        line: usize,
        content: String,
        reason: String,
    },

    /// A face references an element that has not been declared.
    #[error("Index {index} on line {line} is out of range ({count} declared)")]
    IndexOutOfRange { line: usize, index: i64, count: usize },

    #[error("Unsupported mesh format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Too many vertices for 32-bit indices ({0})")]
    TooManyVertices(usize),

    /// A mesh assembled in code violates its invariants.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),
}

pub type MeshResult<T> = Result<T, MeshError>;

impl MeshError {
    pub(crate) fn malformed(line: usize, content: &str, reason: impl Into<String>) -> Self {
        Self::MalformedLine {
            line,
            content: content.to_owned(),
            reason: reason.into(),
        }
    }
}
