//! Intent classification using ordered phrase tables.
//!
//! Pure substring matching against the lowercased query. The first table row
//! with a matching phrase wins; later rows are never consulted.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::text::first_phrase_match;

/// What the user wants out of a research query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Understand a concept (what is, explain, define)
    Learn,
    /// Weigh two or more things against each other
    Compare,
    /// Causes, effects and impact
    Analyze,
    /// Find out about a person, origin or history
    Discover,
    /// Forecasts and trends
    Predict,
    /// Practical how-to
    Solve,
    /// Default when nothing matches
    Research,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Intent {
    /// Returns the tag used by the presentation layer
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Learn => "learn",
            Intent::Compare => "compare",
            Intent::Analyze => "analyze",
            Intent::Discover => "discover",
            Intent::Predict => "predict",
            Intent::Solve => "solve",
            Intent::Research => "research",
        }
    }
}

/// Ordered (intent, phrases) table. Declaration order is the tie-break.
pub const INTENT_TABLE: &[(Intent, &[&str])] = &[
    (
        Intent::Learn,
        &["what is", "what are", "explain", "tell me about", "define", "how does"],
    ),
    (
        Intent::Compare,
        &["compare", "comparison", " vs ", "versus", "difference between"],
    ),
    (
        Intent::Analyze,
        &["analyze", "analyse", "analysis", "impact of", "effect of", "why"],
    ),
    (
        Intent::Discover,
        &["who is", "who was", "biography", "history of", "origin of"],
    ),
    (
        Intent::Predict,
        &["future", "predict", "forecast", "trend", "will "],
    ),
    (Intent::Solve, &["how to", "how can", "solve", "fix", "improve"]),
];

/// Result of intent classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentResult {
    /// Detected intent
    pub intent: Intent,
    /// Phrase that fired, if any
    pub matched_phrase: Option<String>,
}

/// Intent classifier over [`INTENT_TABLE`]
pub struct IntentClassifier {
    table: &'static [(Intent, &'static [&'static str])],
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Create a classifier over the built-in table
    pub fn new() -> Self {
        Self { table: INTENT_TABLE }
    }

    /// Classify the intent of a query
    pub fn classify(&self, query: &str) -> IntentResult {
        let lower = query.trim().to_lowercase();

        match first_phrase_match(self.table, &lower) {
            Some((intent, phrase)) => IntentResult {
                intent,
                matched_phrase: Some(phrase.to_string()),
            },
            None => IntentResult {
                intent: Intent::Research,
                matched_phrase: None,
            },
        }
    }
}
