//! Batch driver: per-document processing followed by pairwise comparison.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use crate::artifacts::{
    ArtifactPaths, comparison_path, format_comparison, format_entities, format_frequency,
    format_page_info, read_frequency, read_page_info, write_artifact, write_artifacts,
};
use crate::compare::{ComparisonReport, compare, unordered_pairs};
use crate::entities::{EntityTagger, HeuristicEntityTagger};
use crate::error::OverlapError;
use crate::extract::{DocumentExtractor, TextExtractor};
use crate::frequency::FrequencyTable;
use crate::index::WordIndex;
use crate::model::{Page, document_id};
use crate::options::{CasePolicy, RunOptions};
use crate::tokenize::{DefaultTokenFilter, TokenFilter};
use crate::warning::{RunWarning, WarningCode};

pub const RUN_REPORT_FILE: &str = "run_report.json";

/// In-memory result of processing one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedDocument {
    pub id: String,
    pub source: PathBuf,
    pub artifacts: ArtifactPaths,
    pub frequency: FrequencyTable,
    pub index: WordIndex,
    pub page_count: usize,
    pub token_count: usize,
    pub entity_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    pub id: String,
    pub source: PathBuf,
    pub pages: usize,
    pub tokens: usize,
    pub filtered_tokens: usize,
    pub vocabulary: usize,
    pub entities: usize,
    pub artifacts: ArtifactPaths,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonSummary {
    pub first: String,
    pub second: String,
    pub common_words: usize,
    pub report: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailedUnit {
    Document,
    Comparison,
}

/// A document or pair that could not be completed, with enough context to
/// re-run just that unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunFailure {
    pub unit: FailedUnit,
    pub subject: String,
    pub cause: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub generated_at: String,
    pub output_dir: PathBuf,
    pub documents: Vec<DocumentSummary>,
    pub comparisons: Vec<ComparisonSummary>,
    pub failures: Vec<RunFailure>,
    pub warnings: Vec<RunWarning>,
}

impl RunReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Wires the extraction, filtering and tagging collaborators to the core.
pub struct Pipeline {
    extractor: Box<dyn TextExtractor>,
    token_filter: Box<dyn TokenFilter>,
    tagger: Box<dyn EntityTagger>,
    case_policy: CasePolicy,
}

impl Pipeline {
    /// Default collaborators configured from `options`.
    #[must_use]
    pub fn new(options: &RunOptions) -> Self {
        Self {
            extractor: Box::new(DocumentExtractor::new(options.pages.clone())),
            token_filter: Box::new(DefaultTokenFilter::new()),
            tagger: Box::new(HeuristicEntityTagger),
            case_policy: options.case_policy,
        }
    }

    #[must_use]
    pub fn with_extractor(mut self, extractor: impl TextExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    #[must_use]
    pub fn with_token_filter(mut self, token_filter: impl TokenFilter + 'static) -> Self {
        self.token_filter = Box::new(token_filter);
        self
    }

    #[must_use]
    pub fn with_tagger(mut self, tagger: impl EntityTagger + 'static) -> Self {
        self.tagger = Box::new(tagger);
        self
    }

    /// Extracts, tokenizes, counts and indexes one document and writes its
    /// five artifacts into `output_dir`. A failed write leaves none of them.
    pub fn process_document(
        &self,
        source: &Path,
        output_dir: &Path,
        warnings: &mut Vec<RunWarning>,
    ) -> Result<ProcessedDocument, OverlapError> {
        if !source.is_file() {
            return Err(OverlapError::InputNotFound(source.to_path_buf()));
        }

        let id = document_id(source);
        let artifacts = ArtifactPaths::new(output_dir, &id);

        let text_by_page = self.extractor.extract(source)?;
        if text_by_page.is_empty() {
            tracing::warn!(document = %id, "no extractable text");
            warnings.push(
                RunWarning::new(WarningCode::ExtractionEmpty, "no extractable text on any page")
                    .with_document(&id),
            );
        }

        let all_text = text_by_page
            .iter()
            .map(|page| page.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let tokens_by_page = text_by_page
            .iter()
            .map(|page| (page.page_number, self.token_filter.tokenize(&page.text)))
            .collect::<Vec<_>>();
        let token_count = tokens_by_page.iter().map(|(_, tokens)| tokens.len()).sum();
        let tokenized = tokens_by_page
            .iter()
            .flat_map(|(_, tokens)| tokens.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");

        let filtered_pages = tokens_by_page
            .into_iter()
            .map(|(number, tokens)| (number, self.token_filter.filter(tokens)))
            .collect::<Vec<_>>();

        // Tagging sees the original casing; folding only applies to counting and indexing.
        let filtered_text = filtered_pages
            .iter()
            .flat_map(|(_, tokens)| tokens.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");
        let entities = self.tagger.tag(&filtered_text);

        let pages = filtered_pages
            .into_iter()
            .map(|(number, tokens)| {
                Page::new(number, tokens.into_iter().map(|token| self.case_policy.apply(token)))
            })
            .collect::<Vec<_>>();
        let frequency = FrequencyTable::count(pages.iter().flat_map(|page| page.tokens.iter()));
        let index = WordIndex::build(&pages);

        let ner_results = format_entities(&entities);
        let word_frequency = format_frequency(&frequency);
        let page_info = format_page_info(&index);
        write_artifacts(&[
            (artifacts.extracted_text.as_path(), all_text.as_str()),
            (artifacts.tokenized_text.as_path(), tokenized.as_str()),
            (artifacts.ner_results.as_path(), ner_results.as_str()),
            (artifacts.word_frequency.as_path(), word_frequency.as_str()),
            (artifacts.page_info.as_path(), page_info.as_str()),
        ])?;

        if frequency.is_empty() && !text_by_page.is_empty() {
            tracing::warn!(document = %id, "every token was filtered out");
            warnings.push(
                RunWarning::new(
                    WarningCode::EmptyVocabulary,
                    "text was extracted but no token survived filtering",
                )
                .with_document(&id),
            );
        }

        tracing::info!(
            document = %id,
            pages = pages.len(),
            tokens = token_count,
            vocabulary = frequency.len(),
            entities = entities.len(),
            "document processed"
        );

        Ok(ProcessedDocument {
            id,
            source: source.to_path_buf(),
            artifacts,
            frequency,
            index,
            page_count: pages.len(),
            token_count,
            entity_count: entities.len(),
        })
    }

    /// Processes every document, then compares every unordered pair of the
    /// documents that succeeded. Failures are collected per unit unless
    /// `fail_fast` is set.
    pub fn run(&self, options: &RunOptions) -> Result<RunReport, OverlapError> {
        options.validate()?;
        fs::create_dir_all(&options.output_dir)?;

        let mut warnings = Vec::new();
        let mut failures = Vec::new();
        let mut processed: Vec<ProcessedDocument> = Vec::new();
        let mut seen_ids = BTreeSet::new();

        for source in &options.documents {
            let id = document_id(source);
            let result = if seen_ids.insert(id.clone()) {
                self.process_document(source, &options.output_dir, &mut warnings)
            } else {
                Err(OverlapError::DuplicateDocument { name: id })
            };

            match result {
                Ok(document) => processed.push(document),
                Err(error) if options.fail_fast => return Err(error),
                Err(error) => {
                    tracing::error!(document = %source.display(), %error, "document skipped");
                    failures.push(RunFailure {
                        unit: FailedUnit::Document,
                        subject: source.display().to_string(),
                        cause: error.to_string(),
                    });
                }
            }
        }

        let mut comparisons = Vec::new();
        for (i, j) in unordered_pairs(processed.len()) {
            let (first, second) = (&processed[i], &processed[j]);
            match compare_artifacts(&first.artifacts, &second.artifacts, &options.output_dir) {
                Ok((report, path)) => comparisons.push(ComparisonSummary {
                    first: first.id.clone(),
                    second: second.id.clone(),
                    common_words: report.len(),
                    report: path,
                }),
                Err(error) if options.fail_fast => return Err(error),
                Err(error) => {
                    tracing::error!(first = %first.id, second = %second.id, %error, "comparison failed");
                    failures.push(RunFailure {
                        unit: FailedUnit::Comparison,
                        subject: format!("{} <> {}", first.id, second.id),
                        cause: error.to_string(),
                    });
                }
            }
        }

        let report = RunReport {
            generated_at: Utc::now().to_rfc3339(),
            output_dir: options.output_dir.clone(),
            documents: processed.iter().map(summarize).collect(),
            comparisons,
            failures,
            warnings,
        };

        let report_path = options.output_dir.join(RUN_REPORT_FILE);
        write_artifact(&report_path, &serde_json::to_string_pretty(&report)?)?;

        Ok(report)
    }
}

fn summarize(document: &ProcessedDocument) -> DocumentSummary {
    DocumentSummary {
        id: document.id.clone(),
        source: document.source.clone(),
        pages: document.page_count,
        tokens: document.token_count,
        filtered_tokens: document.frequency.total(),
        vocabulary: document.frequency.len(),
        entities: document.entity_count,
        artifacts: document.artifacts.clone(),
    }
}

/// Reads both documents' frequency and page-info artifacts back from disk,
/// compares them and writes the comparison artifact.
pub fn compare_artifacts(
    first: &ArtifactPaths,
    second: &ArtifactPaths,
    output_dir: &Path,
) -> Result<(ComparisonReport, PathBuf), OverlapError> {
    let freq_a = read_frequency(&first.word_frequency)?;
    let freq_b = read_frequency(&second.word_frequency)?;
    let index_a = read_page_info(&first.page_info)?;
    let index_b = read_page_info(&second.page_info)?;
    freq_a.check_against(&index_a)?;
    freq_b.check_against(&index_b)?;

    let report = compare(&freq_a, &freq_b, &index_a, &index_b)?;
    let path = comparison_path(output_dir, first, second);
    write_artifact(&path, &format_comparison(&report))?;
    tracing::info!(report = %path.display(), common_words = report.len(), "comparison saved");

    Ok((report, path))
}
