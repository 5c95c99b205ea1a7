//! Cross-document vocabulary comparison.

use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::error::OverlapError;
use crate::frequency::FrequencyTable;
use crate::index::WordIndex;

/// Counts and page locations of one word shared by two documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonWord {
    pub count_a: usize,
    pub count_b: usize,
    pub pages_a: Vec<u32>,
    pub pages_b: Vec<u32>,
}

/// Words present in both documents of a pair, in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonReport {
    entries: BTreeMap<String, CommonWord>,
}

impl ComparisonReport {
    #[must_use]
    pub fn get(&self, word: &str) -> Option<&CommonWord> {
        self.entries.get(word)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, CommonWord> {
        self.entries.iter()
    }

    /// The same report seen from the other document's side.
    #[must_use]
    pub fn swapped(&self) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|(word, common)| {
                (
                    word.clone(),
                    CommonWord {
                        count_a: common.count_b,
                        count_b: common.count_a,
                        pages_a: common.pages_b.clone(),
                        pages_b: common.pages_a.clone(),
                    },
                )
            })
            .collect();
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a ComparisonReport {
    type Item = (&'a String, &'a CommonWord);
    type IntoIter = btree_map::Iter<'a, String, CommonWord>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn indexed_pages(index: &WordIndex, word: &str, frequency: usize) -> Result<Vec<u32>, OverlapError> {
    let pages = index.pages(word).unwrap_or_default();
    if pages.len() != frequency {
        return Err(OverlapError::IndexFrequencyMismatch {
            word: word.to_string(),
            frequency,
            indexed: pages.len(),
        });
    }
    Ok(pages.to_vec())
}

/// Intersects two vocabularies and attaches each side's counts and pages.
///
/// A common word whose page list is missing or disagrees with its count
/// fails the whole comparison.
pub fn compare(
    freq_a: &FrequencyTable,
    freq_b: &FrequencyTable,
    index_a: &WordIndex,
    index_b: &WordIndex,
) -> Result<ComparisonReport, OverlapError> {
    let (smaller, larger) = if freq_a.len() <= freq_b.len() {
        (freq_a, freq_b)
    } else {
        (freq_b, freq_a)
    };

    let mut entries = BTreeMap::new();
    for word in smaller.words().filter(|word| larger.contains(word)) {
        let (Some(count_a), Some(count_b)) = (freq_a.get(word), freq_b.get(word)) else {
            continue;
        };
        let pages_a = indexed_pages(index_a, word, count_a)?;
        let pages_b = indexed_pages(index_b, word, count_b)?;
        entries.insert(
            word.to_string(),
            CommonWord {
                count_a,
                count_b,
                pages_a,
                pages_b,
            },
        );
    }

    Ok(ComparisonReport { entries })
}

/// Every unordered index pair `(i, j)` with `i < j`.
pub fn unordered_pairs(count: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..count).flat_map(move |i| ((i + 1)..count).map(move |j| (i, j)))
}
