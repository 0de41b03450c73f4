//! Query Analyzer - classifies a research query before the report exists.
//!
//! Runs keyword and entity extraction, intent, domain, research-type profile
//! and complexity lookups over one query. Every step falls back to a neutral
//! value, so analysis never fails.

use std::time::Instant;
use tracing::debug;

use super::analysis::QueryAnalysis;
use super::complexity::assess_complexity;
use super::domain::classify_domain;
use super::intent::IntentClassifier;
use super::keywords::KeywordExtractor;
use super::research_type::match_profile;

const MAX_QUERY_ENTITIES: usize = 5;

/// Main query analyzer that orchestrates the lookup tables
pub struct QueryAnalyzer {
    intent_classifier: IntentClassifier,
    keyword_extractor: KeywordExtractor,
}

impl Default for QueryAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryAnalyzer {
    pub fn new() -> Self {
        Self {
            intent_classifier: IntentClassifier::new(),
            keyword_extractor: KeywordExtractor::new(),
        }
    }

    /// Analyze a query and produce its classification
    pub fn analyze(&self, query: &str) -> QueryAnalysis {
        let start = Instant::now();
        let lower = query.trim().to_lowercase();
        let mut analysis = QueryAnalysis::neutral(query.trim().to_string());

        // 1. Keywords from the lowercased tokens
        analysis.keywords = self.keyword_extractor.extract(query);

        // 2. Entities from the original case
        analysis.entities = self
            .keyword_extractor
            .extract_entities(query, MAX_QUERY_ENTITIES);

        // 3. Intent
        analysis.intent = self.intent_classifier.classify(query).intent;

        // 4. Domain
        analysis.domain = classify_domain(&lower);

        // 5. Research type bundle
        if let Some(profile) = match_profile(&lower) {
            analysis.research_type = profile.research_type;
            analysis.focus_areas = profile.focus_areas.iter().map(|s| s.to_string()).collect();
            analysis.chart_types = profile.chart_types.to_vec();
            analysis.mermaid_diagrams = profile.diagrams.to_vec();
        }

        // 6. Complexity
        let (complexity, estimated_time) = assess_complexity(&lower);
        analysis.complexity = complexity;
        analysis.estimated_time = estimated_time.to_string();

        debug!(
            "Query analyzed in {}µs: {}",
            start.elapsed().as_micros(),
            analysis.summary()
        );

        analysis
    }
}
