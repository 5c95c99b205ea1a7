//! Text extraction collaborators.

use std::fs;
use std::path::Path;

use crate::error::OverlapError;
use crate::model::PageText;
use crate::options::PageSelection;
use crate::pdf_reader::{read_pdf_pages, split_plain_text_pages};

/// Turns a source document into text grouped by page number.
///
/// Pages come back in increasing page order. A document with no
/// extractable text yields an empty list rather than an error.
pub trait TextExtractor {
    fn extract(&self, path: &Path) -> Result<Vec<PageText>, OverlapError>;
}

#[derive(Debug, Clone, Default)]
pub struct PdfTextExtractor {
    pages: Option<PageSelection>,
}

impl PdfTextExtractor {
    #[must_use]
    pub fn new(pages: Option<PageSelection>) -> Self {
        Self { pages }
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, path: &Path) -> Result<Vec<PageText>, OverlapError> {
        read_pdf_pages(path, self.pages.as_ref())
    }
}

/// UTF-8 text files, one page per form-feed separated block.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<Vec<PageText>, OverlapError> {
        let raw_text = fs::read_to_string(path)?;
        Ok(split_plain_text_pages(&raw_text))
    }
}

/// Picks the PDF or plain-text extractor from the file extension.
#[derive(Debug, Clone, Default)]
pub struct DocumentExtractor {
    pdf: PdfTextExtractor,
    plain: PlainTextExtractor,
}

impl DocumentExtractor {
    #[must_use]
    pub fn new(pages: Option<PageSelection>) -> Self {
        Self {
            pdf: PdfTextExtractor::new(pages),
            plain: PlainTextExtractor,
        }
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("pdf"))
}

impl TextExtractor for DocumentExtractor {
    fn extract(&self, path: &Path) -> Result<Vec<PageText>, OverlapError> {
        if is_pdf(path) {
            self.pdf.extract(path)
        } else {
            self.plain.extract(path)
        }
    }
}
