//! Subject-domain lookup for research queries.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::text::first_phrase_match;

/// Subject area of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Business,
    Technology,
    Science,
    Medicine,
    Entertainment,
    Sports,
    Politics,
    History,
    Environment,
    General,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Domain {
    pub fn label(&self) -> &'static str {
        match self {
            Domain::Business => "business",
            Domain::Technology => "technology",
            Domain::Science => "science",
            Domain::Medicine => "medicine",
            Domain::Entertainment => "entertainment",
            Domain::Sports => "sports",
            Domain::Politics => "politics",
            Domain::History => "history",
            Domain::Environment => "environment",
            Domain::General => "general",
        }
    }
}

/// Ordered (domain, keywords) table. First row with a contained keyword wins.
pub const DOMAIN_TABLE: &[(Domain, &[&str])] = &[
    (
        Domain::Business,
        &[
            "business", "company", "market", "economy", "economic", "finance", "financial",
            "stock", "startup", "revenue", "investment", "industry",
        ],
    ),
    (
        Domain::Technology,
        &[
            "technology", "software", "programming", "computer", "artificial intelligence",
            "machine learning", "python", "java", "javascript", "internet", "algorithm",
            "robot", "digital",
        ],
    ),
    (
        Domain::Science,
        &[
            "science", "scientific", "physics", "chemistry", "biology", "quantum", "astronomy",
            "experiment", "theory",
        ],
    ),
    (
        Domain::Medicine,
        &[
            "medicine", "medical", "health", "disease", "treatment", "vaccine", "cancer",
            "clinical", "therapy",
        ],
    ),
    (
        Domain::Entertainment,
        &[
            "movie", "film", "actor", "actress", "celebrity", "television", "music", "singer",
            "album", "hollywood",
        ],
    ),
    (
        Domain::Sports,
        &[
            "sport", "football", "soccer", "basketball", "athlete", "olympic", "tennis",
            "cricket",
        ],
    ),
    (
        Domain::Politics,
        &[
            "politic", "government", "election", "president", "parliament", "policy",
            "democracy",
        ],
    ),
    (
        Domain::History,
        &[
            "history", "historical", "ancient", "century", "empire", "revolution", "world war",
            "medieval",
        ],
    ),
    (
        Domain::Environment,
        &[
            "environment", "climate", "pollution", "sustainab", "renewable", "ecosystem",
            "carbon", "biodiversity",
        ],
    ),
];

/// Look up the domain of a lowercased query; `General` when nothing matches.
pub fn classify_domain(lower_query: &str) -> Domain {
    first_phrase_match(DOMAIN_TABLE, lower_query)
        .map(|(domain, _)| domain)
        .unwrap_or(Domain::General)
}
