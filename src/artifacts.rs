//! Text artifacts written per document and per comparison.
//!
//! Frequency lines are `word: count` and page-info lines are
//! `word: [1, 1, 3]`. Both are read back with a strict line parser; the page
//! list is parsed as integers and never interpreted any other way.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::compare::ComparisonReport;
use crate::error::OverlapError;
use crate::frequency::FrequencyTable;
use crate::index::WordIndex;
use crate::model::EntityMention;

pub const EXTRACTED_TEXT_SUFFIX: &str = "_extracted_text";
pub const TOKENIZED_TEXT_SUFFIX: &str = "_tokenized_text";
pub const NER_RESULTS_SUFFIX: &str = "_ner_results";
pub const WORD_FREQUENCY_SUFFIX: &str = "_word_frequency";
pub const PAGE_INFO_SUFFIX: &str = "_page_info";

const ARTIFACT_EXTENSION: &str = "txt";
const KEY_DELIMITER: &str = ": ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct FormatError {
    pub line: usize,
    pub message: String,
}

impl FormatError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Paths of every artifact produced for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactPaths {
    pub extracted_text: PathBuf,
    pub tokenized_text: PathBuf,
    pub ner_results: PathBuf,
    pub word_frequency: PathBuf,
    pub page_info: PathBuf,
}

impl ArtifactPaths {
    #[must_use]
    pub fn new(output_dir: &Path, document_id: &str) -> Self {
        let path = |suffix: &str| {
            output_dir.join(format!("{document_id}{suffix}.{ARTIFACT_EXTENSION}"))
        };
        Self {
            extracted_text: path(EXTRACTED_TEXT_SUFFIX),
            tokenized_text: path(TOKENIZED_TEXT_SUFFIX),
            ner_results: path(NER_RESULTS_SUFFIX),
            word_frequency: path(WORD_FREQUENCY_SUFFIX),
            page_info: path(PAGE_INFO_SUFFIX),
        }
    }
}

/// `comparison_<tokenized a file name>_<tokenized b file name>.txt`; both file
/// names keep their own `.txt`, so the result ends in `.txt.txt`.
#[must_use]
pub fn comparison_path(output_dir: &Path, a: &ArtifactPaths, b: &ArtifactPaths) -> PathBuf {
    let name = |path: &Path| {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    };
    output_dir.join(format!(
        "comparison_{}_{}.{ARTIFACT_EXTENSION}",
        name(&a.tokenized_text),
        name(&b.tokenized_text)
    ))
}

fn format_page_list(pages: &[u32]) -> String {
    let items = pages
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{items}]")
}

#[must_use]
pub fn format_entities(entities: &[EntityMention]) -> String {
    let mut out = String::new();
    for entity in entities {
        let _ = writeln!(out, "{} ({})", entity.text, entity.category);
    }
    out
}

#[must_use]
pub fn format_frequency(table: &FrequencyTable) -> String {
    let mut out = String::new();
    for (word, count) in table {
        let _ = writeln!(out, "{word}{KEY_DELIMITER}{count}");
    }
    out
}

#[must_use]
pub fn format_page_info(index: &WordIndex) -> String {
    let mut out = String::new();
    for (word, pages) in index {
        let _ = writeln!(out, "{word}{KEY_DELIMITER}{}", format_page_list(pages));
    }
    out
}

#[must_use]
pub fn format_comparison(report: &ComparisonReport) -> String {
    let mut out = String::new();
    for (word, common) in report {
        let _ = writeln!(
            out,
            "{word}{KEY_DELIMITER}file1({}), file2({}), pages_file1({}), pages_file2({})",
            common.count_a,
            common.count_b,
            format_page_list(&common.pages_a),
            format_page_list(&common.pages_b)
        );
    }
    out
}

fn split_entry(line_no: usize, line: &str) -> Result<(&str, &str), FormatError> {
    let (word, value) = line
        .split_once(KEY_DELIMITER)
        .ok_or_else(|| FormatError::new(line_no, format!("missing '{KEY_DELIMITER}' delimiter")))?;
    if word.is_empty() {
        return Err(FormatError::new(line_no, "empty word"));
    }
    if word.chars().any(char::is_whitespace) {
        return Err(FormatError::new(
            line_no,
            format!("word '{word}' contains whitespace"),
        ));
    }
    Ok((word, value))
}

fn insert_unique<V>(
    entries: &mut BTreeMap<String, V>,
    line_no: usize,
    word: &str,
    value: V,
) -> Result<(), FormatError> {
    if entries.insert(word.to_string(), value).is_some() {
        return Err(FormatError::new(
            line_no,
            format!("duplicate entry for '{word}'"),
        ));
    }
    Ok(())
}

/// Strict parser for `[n1, n2, ...]`; every item must be a page number >= 1.
pub fn parse_page_list(literal: &str) -> Result<Vec<u32>, String> {
    let inner = literal
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| format!("page list '{literal}' must be enclosed in brackets"))?;

    if inner.is_empty() {
        return Ok(Vec::new());
    }

    inner
        .split(", ")
        .map(|item| {
            if item.is_empty() || !item.bytes().all(|byte| byte.is_ascii_digit()) {
                return Err(format!("invalid page number '{item}'"));
            }
            let page: u32 = item
                .parse()
                .map_err(|_| format!("page number '{item}' is out of range"))?;
            if page == 0 {
                return Err("pages are 1-based".to_string());
            }
            Ok(page)
        })
        .collect()
}

pub fn parse_frequency(input: &str) -> Result<FrequencyTable, FormatError> {
    let mut counts = BTreeMap::new();
    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        if line.is_empty() {
            continue;
        }
        let (word, value) = split_entry(line_no, line)?;
        if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(FormatError::new(line_no, format!("invalid count '{value}'")));
        }
        let count: usize = value
            .parse()
            .map_err(|_| FormatError::new(line_no, format!("count '{value}' is out of range")))?;
        if count == 0 {
            return Err(FormatError::new(line_no, format!("zero count for '{word}'")));
        }
        insert_unique(&mut counts, line_no, word, count)?;
    }
    Ok(FrequencyTable::from_counts(counts))
}

pub fn parse_page_info(input: &str) -> Result<WordIndex, FormatError> {
    let mut entries = BTreeMap::new();
    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        if line.is_empty() {
            continue;
        }
        let (word, value) = split_entry(line_no, line)?;
        let pages = parse_page_list(value).map_err(|message| FormatError::new(line_no, message))?;
        if pages.is_empty() {
            return Err(FormatError::new(line_no, format!("no pages recorded for '{word}'")));
        }
        insert_unique(&mut entries, line_no, word, pages)?;
    }
    Ok(WordIndex::from_entries(entries))
}

pub(crate) fn write_artifact(path: &Path, contents: &str) -> Result<(), OverlapError> {
    fs::write(path, contents)?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "artifact saved");
    Ok(())
}

/// Writes every `(path, contents)` pair in order. If one write fails, the
/// files already written by this call are removed before the error returns.
pub(crate) fn write_artifacts(files: &[(&Path, &str)]) -> Result<(), OverlapError> {
    for (written, (path, contents)) in files.iter().enumerate() {
        if let Err(error) = write_artifact(path, contents) {
            for (earlier, _) in &files[..written] {
                if let Err(remove_error) = fs::remove_file(earlier) {
                    tracing::warn!(path = %earlier.display(), %remove_error, "partial artifact left behind");
                }
            }
            return Err(error);
        }
    }
    Ok(())
}

pub fn read_frequency(path: &Path) -> Result<FrequencyTable, OverlapError> {
    let text = fs::read_to_string(path)?;
    parse_frequency(&text).map_err(|source| OverlapError::SerializationFormat {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_page_info(path: &Path) -> Result<WordIndex, OverlapError> {
    let text = fs::read_to_string(path)?;
    parse_page_info(&text).map_err(|source| OverlapError::SerializationFormat {
        path: path.to_path_buf(),
        source,
    })
}
