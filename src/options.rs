use std::path::PathBuf;
use std::str::FromStr;

use crate::error::OverlapError;

/// How word casing is treated before counting and indexing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CasePolicy {
    /// Keep tokens exactly as the token filter produced them.
    #[default]
    Preserve,
    /// Fold every filtered token to lowercase.
    Lowercase,
}

impl CasePolicy {
    #[must_use]
    pub fn apply(self, token: String) -> String {
        match self {
            Self::Preserve => token,
            Self::Lowercase => token.to_lowercase(),
        }
    }
}

/// Inclusive page ranges parsed from `1-3,5`; single pages are one-page ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection {
    ranges: Vec<(u32, u32)>,
}

impl PageSelection {
    #[must_use]
    pub fn contains(&self, page: u32) -> bool {
        self.ranges
            .iter()
            .any(|&(start, end)| (start..=end).contains(&page))
    }
}

fn parse_page(value: &str, what: &str) -> Result<u32, String> {
    let page: u32 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid {what}: '{value}'"))?;
    if page == 0 {
        return Err("pages are 1-based".to_string());
    }
    Ok(page)
}

impl FromStr for PageSelection {
    type Err = String;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let mut ranges = Vec::new();
        for token in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if let Some((start, end)) = token.split_once('-') {
                let start = parse_page(start, "page range start")?;
                let end = parse_page(end, "page range end")?;
                if end < start {
                    return Err(format!(
                        "invalid range '{token}': end is smaller than start"
                    ));
                }
                ranges.push((start, end));
            } else {
                let page = parse_page(token, "page number")?;
                ranges.push((page, page));
            }
        }

        if ranges.is_empty() {
            return Err("page selection cannot be empty".to_string());
        }

        Ok(Self { ranges })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub documents: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub pages: Option<PageSelection>,
    pub case_policy: CasePolicy,
    pub fail_fast: bool,
}

impl RunOptions {
    #[must_use]
    pub fn new(documents: Vec<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            documents,
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), OverlapError> {
        if self.documents.is_empty() {
            return Err(OverlapError::InvalidOption(
                "at least one document is required".to_string(),
            ));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(OverlapError::InvalidOption(
                "output directory cannot be empty".to_string(),
            ));
        }
        if self.output_dir.is_file() {
            return Err(OverlapError::InvalidOption(format!(
                "output path '{}' is a file",
                self.output_dir.display()
            )));
        }
        Ok(())
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            documents: Vec::new(),
            output_dir: PathBuf::from("output"),
            pages: None,
            case_policy: CasePolicy::Preserve,
            fail_fast: false,
        }
    }
}
