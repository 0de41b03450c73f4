//! Query analysis record.
//!
//! Produced once per query by [`QueryAnalyzer`](super::analyzer::QueryAnalyzer).
//! The fields are independent lookups and are not cross-validated.

use serde::{Deserialize, Serialize};

use super::charts::ChartKind;
use super::complexity::{Complexity, DEFAULT_ESTIMATE};
use super::diagram::DiagramKind;
use super::domain::Domain;
use super::intent::Intent;
use super::research_type::ResearchType;

/// Classification of a research query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryAnalysis {
    pub query: String,
    pub research_type: ResearchType,
    pub domain: Domain,
    pub complexity: Complexity,
    pub focus_areas: Vec<String>,
    pub estimated_time: String,
    pub keywords: Vec<String>,
    pub entities: Vec<String>,
    pub intent: Intent,
    pub chart_types: Vec<ChartKind>,
    pub mermaid_diagrams: Vec<DiagramKind>,
}

impl QueryAnalysis {
    /// The neutral analysis every lookup starts from
    pub fn neutral(query: String) -> Self {
        Self {
            query,
            research_type: ResearchType::General,
            domain: Domain::General,
            complexity: Complexity::Comprehensive,
            focus_areas: Vec::new(),
            estimated_time: DEFAULT_ESTIMATE.to_string(),
            keywords: Vec::new(),
            entities: Vec::new(),
            intent: Intent::Research,
            chart_types: Vec::new(),
            mermaid_diagrams: Vec::new(),
        }
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "{} / {} / {} / {} ({})",
            self.intent, self.domain, self.research_type, self.complexity, self.estimated_time
        )
    }
}
