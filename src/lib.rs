//! Per-document vocabularies with page provenance, and pairwise
//! vocabulary-overlap reports across a batch of documents.

pub mod artifacts;
pub mod compare;
pub mod entities;
mod error;
pub mod extract;
pub mod frequency;
pub mod index;
mod model;
mod options;
mod pdf_reader;
pub mod pipeline;
pub mod tokenize;
mod warning;

pub use compare::{CommonWord, ComparisonReport, compare, unordered_pairs};
pub use error::OverlapError;
pub use frequency::FrequencyTable;
pub use index::WordIndex;
pub use model::{EntityMention, Page, PageText, document_id};
pub use options::{CasePolicy, PageSelection, RunOptions};
pub use pipeline::{Pipeline, RunReport};
pub use warning::{RunWarning, WarningCode};

/// Runs the whole batch with the default collaborators.
pub fn run(options: &RunOptions) -> Result<RunReport, OverlapError> {
    Pipeline::new(options).run(options)
}
