use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::error::OverlapError;
use crate::index::WordIndex;

/// Total occurrence count per word. Zero counts are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<String, usize>,
}

impl FrequencyTable {
    #[must_use]
    pub fn count<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for token in tokens {
            let token = token.as_ref();
            if let Some(count) = counts.get_mut(token) {
                *count += 1;
            } else {
                counts.insert(token.to_string(), 1);
            }
        }
        Self { counts }
    }

    pub(crate) fn from_counts(counts: BTreeMap<String, usize>) -> Self {
        Self { counts }
    }

    #[must_use]
    pub fn get(&self, word: &str) -> Option<usize> {
        self.counts.get(word).copied()
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.counts.contains_key(word)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Vocabulary in sorted order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, usize> {
        self.counts.iter()
    }

    /// Checks that `index` records exactly `count` page entries for every
    /// word, and nothing else.
    pub fn check_against(&self, index: &WordIndex) -> Result<(), OverlapError> {
        for (word, &frequency) in &self.counts {
            let indexed = index.pages(word).map_or(0, <[u32]>::len);
            if indexed != frequency {
                return Err(OverlapError::IndexFrequencyMismatch {
                    word: word.clone(),
                    frequency,
                    indexed,
                });
            }
        }
        if let Some((word, pages)) = index.iter().find(|(word, _)| !self.contains(word)) {
            return Err(OverlapError::IndexFrequencyMismatch {
                word: word.clone(),
                frequency: 0,
                indexed: pages.len(),
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = (&'a String, &'a usize);
    type IntoIter = btree_map::Iter<'a, String, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}
