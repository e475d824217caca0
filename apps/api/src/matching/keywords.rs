//! Keyword extraction for the weighted keyword policy.

use std::collections::HashSet;

use crate::matching::normalize::strip_for_keywords;

/// Closed-class function words that never count as keywords.
pub const MINIMAL_STOPWORDS: &[&str] = &[
    "and", "or", "with", "for", "the", "a", "an", "to", "of", "in", "on", "is", "are", "we",
    "you", "your", "will", "be", "as", "by", "from", "this", "that", "at", "it", "our", "their",
    "they", "who",
];

/// Job-posting filler that appears in nearly every description.
pub const POSTING_FILLER: &[&str] = &["need", "strong", "skills"];

/// Tokens of this many characters or fewer are dropped.
pub const MAX_DISCARDED_TOKEN_LEN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Exactly [`MINIMAL_STOPWORDS`].
    pub fn minimal() -> Self {
        Self::from_words(MINIMAL_STOPWORDS.iter().copied())
    }

    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            words: words.into_iter().map(str::to_lowercase).collect(),
        }
    }

    pub fn with_words<'a>(mut self, words: impl IntoIterator<Item = &'a str>) -> Self {
        self.words.extend(words.into_iter().map(str::to_lowercase));
        self
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopwordSet {
    /// [`MINIMAL_STOPWORDS`] plus [`POSTING_FILLER`].
    fn default() -> Self {
        Self::minimal().with_words(POSTING_FILLER.iter().copied())
    }
}

/// Splits free text into keywords, keeping source order and duplicates.
#[derive(Debug, Clone, Default)]
pub struct KeywordExtractor {
    stopwords: StopwordSet,
}

impl KeywordExtractor {
    pub fn new(stopwords: StopwordSet) -> Self {
        Self { stopwords }
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Uses [`strip_for_keywords`], not the taxonomy normalizer: `c++` yields
    /// `c` (then dropped as too short) and `node.js` yields `nodejs`.
    pub fn extract(&self, text: &str) -> Vec<String> {
        strip_for_keywords(text)
            .split_whitespace()
            .filter(|token| token.len() > MAX_DISCARDED_TOKEN_LEN)
            .filter(|token| !self.stopwords.contains(token))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_drops_stopwords_and_short_tokens() {
        let extractor = KeywordExtractor::new(StopwordSet::minimal());
        let keywords = extractor.extract("We are looking for a Go and Rust engineer with AWS");
        assert_eq!(keywords, vec!["looking", "rust", "engineer", "aws"]);
    }

    #[test]
    fn test_extract_keeps_duplicates_in_order() {
        let extractor = KeywordExtractor::default();
        let keywords = extractor.extract("python, sql, Python");
        assert_eq!(keywords, vec!["python", "sql", "python"]);
    }

    #[test]
    fn test_extract_deletes_symbols_inside_tokens() {
        let extractor = KeywordExtractor::default();
        assert_eq!(extractor.extract("Node.js and C++"), vec!["nodejs"]);
    }

    #[test]
    fn test_extract_empty_and_stopword_only_input() {
        let extractor = KeywordExtractor::default();
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("the and of who they").is_empty());
    }

    #[test]
    fn test_default_stopwords_include_posting_filler() {
        let extractor = KeywordExtractor::default();
        let keywords = extractor.extract("We need strong communication and leadership skills");
        assert_eq!(keywords, vec!["communication", "leadership"]);
    }

    #[test]
    fn test_minimal_stopwords_match_glossary_set() {
        let minimal = StopwordSet::minimal();
        assert_eq!(minimal.len(), MINIMAL_STOPWORDS.len());
        assert!(minimal.contains("who"));
        assert!(!minimal.contains("skills"));
    }

    #[test]
    fn test_custom_stopwords_are_lowercased() {
        let set = StopwordSet::from_words(["Remote"]);
        assert!(set.contains("remote"));
    }
}
