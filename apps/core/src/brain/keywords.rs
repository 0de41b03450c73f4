//! Keyword and entity extraction for research queries.
//!
//! Keywords are lowercased word tokens that survive a stopword filter and a
//! minimum length; entities are capitalized-word runs from the original text.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use super::text::capitalized_phrases;

/// Words that never count as keywords
const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "about", "into", "what", "who", "when", "where", "why", "how", "which", "is", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should", "can", "may", "might", "must", "this", "that", "these", "those",
    "tell", "me", "explain", "describe", "give", "please", "some", "there", "their", "them",
    "they", "your", "than", "then", "also", "just", "more", "most", "very",
];

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w+\b").expect("Invalid regex: word"));

/// Keyword extractor with a stopword filter
pub struct KeywordExtractor {
    stopwords: HashSet<&'static str>,
    min_word_length: usize,
    max_keywords: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    /// Tokens longer than 3 chars, at most 10
    pub fn new() -> Self {
        Self::with_config(4, 10)
    }

    /// Create an extractor with custom limits
    pub fn with_config(min_word_length: usize, max_keywords: usize) -> Self {
        Self {
            stopwords: STOPWORDS.iter().copied().collect(),
            min_word_length,
            max_keywords,
        }
    }

    /// Check if a lowercased word is a stopword
    fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Extract keywords in query order (duplicates kept)
    pub fn extract(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();

        WORD.find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|word| !self.is_stopword(word))
            .filter(|word| word.chars().count() >= self.min_word_length)
            .take(self.max_keywords)
            .map(str::to_string)
            .collect()
    }

    /// Capitalized-word runs from the original-case text
    pub fn extract_entities(&self, text: &str, limit: usize) -> Vec<String> {
        capitalized_phrases(text, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_extraction() {
        let extractor = KeywordExtractor::new();

        let keywords = extractor.extract("Explain the history of the Roman Empire");
        assert_eq!(keywords, vec!["history", "roman", "empire"]);
    }

    #[test]
    fn test_stopword_filtering() {
        let extractor = KeywordExtractor::new();

        let keywords = extractor.extract("what would they have been");
        assert!(keywords.is_empty());
    }

    #[test]
    fn test_short_words_filtered() {
        let extractor = KeywordExtractor::new();

        let keywords = extractor.extract("cat dog sun art");
        assert!(keywords.is_empty());
    }

    #[test]
    fn test_cap_at_ten() {
        let extractor = KeywordExtractor::new();

        let text = "alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo lima";
        let keywords = extractor.extract(text);
        assert_eq!(keywords.len(), 10);
        assert_eq!(keywords[0], "alpha");
    }

    #[test]
    fn test_empty_text() {
        let extractor = KeywordExtractor::new();

        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("   ").is_empty());
    }

    #[test]
    fn test_entities_capped() {
        let extractor = KeywordExtractor::new();

        let entities = extractor.extract_entities("Paris London Rome Berlin Madrid Lisbon", 5);
        // One space-joined run
        assert_eq!(entities, vec!["Paris London Rome Berlin Madrid Lisbon"]);

        let entities = extractor.extract_entities("Paris, London, Rome, Berlin, Madrid, Lisbon", 5);
        assert_eq!(entities.len(), 5);
        assert_eq!(entities[4], "Madrid");
    }
}
