use std::path::Path;

/// Raw text of one source page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub page_number: u32,
    pub text: String,
}

/// Tokens of one page, in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub tokens: Vec<String>,
}

impl Page {
    #[must_use]
    pub fn new<I, S>(number: u32, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            number,
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityMention {
    pub text: String,
    pub category: String,
}

impl EntityMention {
    #[must_use]
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }
}

/// Identifier of a document, derived from its file name without extension.
#[must_use]
pub fn document_id(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map_or_else(
            || path.to_string_lossy().into_owned(),
            |stem| stem.to_string_lossy().into_owned(),
        )
}
