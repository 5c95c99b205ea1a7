use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::artifacts::FormatError;

#[derive(Debug, Error)]
pub enum OverlapError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to load PDF: {0}")]
    PdfLoad(#[from] lopdf::Error),

    #[error("failed to write run report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("input document not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("document name '{name}' is already used by another input")]
    DuplicateDocument { name: String },

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("no pages available after applying selection")]
    NoPagesSelected,

    #[error("malformed artifact {}: {source}", .path.display())]
    SerializationFormat {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error(
        "word '{word}' has {frequency} counted occurrence(s) but {indexed} indexed page entries"
    )]
    IndexFrequencyMismatch {
        word: String,
        frequency: usize,
        indexed: usize,
    },
}
