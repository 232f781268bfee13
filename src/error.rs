//src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading, annotating, or writing alignment files.
#[derive(Debug, Error)]
pub enum Error {
    /// A residue line appeared before any `>` header.
    #[error("line {line}: sequence data before any header: {content:?}")]
    Parse { line: usize, content: String },

    /// A taxonomy (or sequence) table row with the wrong number of tab-separated fields.
    #[error("{}: line {line}: expected {expected} tab-separated fields, found {fields}", path.display())]
    MalformedTable {
        path: PathBuf,
        line: usize,
        expected: usize,
        fields: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
