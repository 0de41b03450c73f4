//! Requested depth of a research query.
//!
//! Two phrase tiers are checked in order; the first tier with a contained
//! phrase sets both the complexity tag and the time estimate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Requested research depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    /// Short answer requested
    Fast,
    /// Full report (also the default)
    Comprehensive,
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Complexity::Fast => write!(f, "fast"),
            Complexity::Comprehensive => write!(f, "comprehensive"),
        }
    }
}

/// One complexity tier: trigger phrases plus the resulting tag and estimate
pub struct ComplexityTier {
    pub complexity: Complexity,
    pub estimated_time: &'static str,
    pub phrases: &'static [&'static str],
}

/// Estimate used when no tier matches
pub const DEFAULT_ESTIMATE: &str = "3-5 minutes";

/// Ordered tiers; the first tier with a matching phrase wins.
pub const COMPLEXITY_TIERS: &[ComplexityTier] = &[
    ComplexityTier {
        complexity: Complexity::Fast,
        estimated_time: "1-2 minutes",
        phrases: &["quick", "brief", "summary", "overview"],
    },
    ComplexityTier {
        complexity: Complexity::Comprehensive,
        estimated_time: "5-8 minutes",
        phrases: &["detailed", "comprehensive", "thorough", "in-depth", "complete"],
    },
];

/// Returns `(complexity, estimated_time)` for a lowercased query.
pub fn assess_complexity(lower_query: &str) -> (Complexity, &'static str) {
    COMPLEXITY_TIERS
        .iter()
        .find(|tier| tier.phrases.iter().any(|p| lower_query.contains(p)))
        .map(|tier| (tier.complexity, tier.estimated_time))
        .unwrap_or((Complexity::Comprehensive, DEFAULT_ESTIMATE))
}
