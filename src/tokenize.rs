//! Tokenization and stopword filtering collaborators.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// English stopwords, matched against the lowercased token.
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

static PUNCTUATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("hardcoded punctuation regex is valid"));

/// Splits raw text into normalized tokens and drops the uninteresting ones.
pub trait TokenFilter {
    /// Tokens in reading order with punctuation removed.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Keeps only the tokens that belong in the vocabulary.
    fn filter(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
    }
}

pub struct DefaultTokenFilter {
    stop_words: HashSet<&'static str>,
}

impl DefaultTokenFilter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    #[must_use]
    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token.to_lowercase().as_str())
    }
}

impl Default for DefaultTokenFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenFilter for DefaultTokenFilter {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|word| PUNCTUATION_RE.replace_all(word, "").into_owned())
            .filter(|token| !token.is_empty())
            .collect()
    }

    /// Drops stopwords and anything that is not purely alphanumeric. The
    /// original casing of surviving tokens is kept.
    fn filter(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|token| !self.is_stop_word(token))
            .filter(|token| token.chars().all(char::is_alphanumeric))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{DefaultTokenFilter, TokenFilter};

    #[test]
    fn strips_punctuation_and_drops_empty_tokens() {
        let filter = DefaultTokenFilter::new();
        let tokens = filter.tokenize("Yoga, (and) meditation... -- don't stop!");
        assert_eq!(tokens, vec!["Yoga", "and", "meditation", "dont", "stop"]);
    }

    #[test]
    fn keeps_unicode_words() {
        let filter = DefaultTokenFilter::new();
        assert_eq!(filter.tokenize("prāṇa «ātman»"), vec!["prāṇa", "ātman"]);
    }

    #[test]
    fn removes_stopwords_case_insensitively_but_keeps_case() {
        let filter = DefaultTokenFilter::new();
        let tokens = filter.tokenize("The Apple and the apple Is red");
        assert_eq!(filter.filter(tokens), vec!["Apple", "apple", "red"]);
    }

    #[test]
    fn removes_non_alphanumeric_tokens() {
        let filter = DefaultTokenFilter::new();
        let tokens = vec![
            "snake_case".to_string(),
            "42".to_string(),
            "ayurveda".to_string(),
        ];
        assert_eq!(filter.filter(tokens), vec!["42", "ayurveda"]);
    }
}
