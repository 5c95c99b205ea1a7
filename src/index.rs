//! Word to page-occurrence index.

use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::model::Page;

/// Maps each word to the page number of every one of its occurrences.
///
/// A word seen three times on page 2 has three `2` entries, so the list
/// length is the word's total occurrence count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordIndex {
    entries: BTreeMap<String, Vec<u32>>,
}

impl WordIndex {
    /// Builds the index from pages in reading order.
    #[must_use]
    pub fn build(pages: &[Page]) -> Self {
        let mut entries: BTreeMap<String, Vec<u32>> = BTreeMap::new();
        for page in pages {
            for token in &page.tokens {
                entries
                    .entry(token.clone())
                    .or_default()
                    .push(page.number);
            }
        }
        Self { entries }
    }

    pub(crate) fn from_entries(entries: BTreeMap<String, Vec<u32>>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn pages(&self, word: &str) -> Option<&[u32]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Words in sorted order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<u32>> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a WordIndex {
    type Item = (&'a String, &'a Vec<u32>);
    type IntoIter = btree_map::Iter<'a, String, Vec<u32>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::WordIndex;
    use crate::model::Page;

    #[test]
    fn records_one_entry_per_occurrence() {
        let pages = vec![Page::new(1, ["apple", "banana", "apple"])];
        let index = WordIndex::build(&pages);

        assert_eq!(index.pages("apple"), Some(&[1, 1][..]));
        assert_eq!(index.pages("banana"), Some(&[1][..]));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn keeps_page_then_position_order_across_gaps() {
        let pages = vec![
            Page::new(2, ["river", "stone"]),
            Page::new(5, ["stone", "stone", "river"]),
        ];
        let index = WordIndex::build(&pages);

        assert_eq!(index.pages("stone"), Some(&[2, 5, 5][..]));
        assert_eq!(index.pages("river"), Some(&[2, 5][..]));
    }

    #[test]
    fn index_only_references_known_pages() {
        let pages = vec![
            Page::new(1, ["a", "b", "a"]),
            Page::new(3, ["b", "c"]),
            Page::new(4, ["a"]),
        ];
        let index = WordIndex::build(&pages);

        for (word, entries) in &index {
            for &page in entries {
                let on_page = pages
                    .iter()
                    .find(|candidate| candidate.number == page)
                    .expect("page number must come from the input");
                let occurrences = on_page.tokens.iter().filter(|t| *t == word).count();
                let indexed = entries.iter().filter(|&&p| p == page).count();
                assert_eq!(occurrences, indexed, "word {word} on page {page}");
            }
        }
    }

    #[test]
    fn case_is_preserved() {
        let index = WordIndex::build(&[Page::new(1, ["Apple", "apple"])]);
        assert_eq!(index.len(), 2);
        assert!(index.contains("Apple"));
        assert!(index.contains("apple"));
    }

    #[test]
    fn empty_input_yields_empty_index() {
        assert!(WordIndex::build(&[]).is_empty());
        assert!(WordIndex::build(&[Page::new(1, Vec::<String>::new())]).is_empty());
    }
}
