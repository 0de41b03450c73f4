//! Report pipeline - runs every heuristic over one (topic, report) pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

use super::analysis::QueryAnalysis;
use super::analyzer::QueryAnalyzer;
use super::charts::{ChartData, ChartKind};
use super::data_parser::{DataParser, ParsedReport};
use super::diagram::{generate_mermaid_diagram, Diagram, DiagramData, DiagramKind};
use super::follow_up::FollowUpGenerator;
use super::sections::{extract_highlights, sectionize, summary_of, ReportHighlights, ReportSection};

/// Everything derived from one report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportInsights {
    pub topic: String,
    pub query: QueryAnalysis,
    pub sections: Vec<ReportSection>,
    pub highlights: ReportHighlights,
    pub summary: Option<String>,
    pub parsed: ParsedReport,
    pub charts: Vec<ChartData>,
    pub diagrams: Vec<Diagram>,
    pub follow_up_questions: Vec<String>,
    pub processing_time_ms: u64,
    pub analyzed_at: DateTime<Utc>,
}

/// Orchestrates query analysis, sectioning, extraction and suggestions
pub struct ReportAnalyzer {
    query_analyzer: QueryAnalyzer,
    data_parser: DataParser,
    follow_up_seed: Option<u64>,
}

impl Default for ReportAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportAnalyzer {
    pub fn new() -> Self {
        Self::with_seed(None)
    }

    /// Pin the follow-up shuffle; `None` seeds from entropy on every call
    pub fn with_seed(follow_up_seed: Option<u64>) -> Self {
        Self {
            query_analyzer: QueryAnalyzer::new(),
            data_parser: DataParser::new(),
            follow_up_seed,
        }
    }

    pub fn analyze_query(&self, query: &str) -> QueryAnalysis {
        self.query_analyzer.analyze(query)
    }

    pub fn analyze(&self, topic: &str, report: &str) -> ReportInsights {
        let start = Instant::now();

        // 1. Query
        let query = self.query_analyzer.analyze(topic);

        // 2. Sections
        let sections = sectionize(report);
        let highlights = extract_highlights(&sections);
        let summary = summary_of(&sections);

        // 3. Extraction
        let parsed = self.data_parser.parse_research_data(report, query.domain);

        // 4. Charts, all kinds when the query asked for none
        let chart_kinds: &[ChartKind] = if query.chart_types.is_empty() {
            &ChartKind::ALL
        } else {
            &query.chart_types
        };
        let charts: Vec<ChartData> = chart_kinds
            .iter()
            .filter_map(|kind| self.data_parser.generate_chart_data(&parsed, *kind))
            .collect();

        // 5. Diagrams
        let diagram_kinds: &[DiagramKind] = if query.mermaid_diagrams.is_empty() {
            &DiagramKind::ALL
        } else {
            &query.mermaid_diagrams
        };
        let data = DiagramData {
            topic,
            report: &parsed,
            focus_areas: &query.focus_areas,
        };
        let diagrams: Vec<Diagram> = diagram_kinds
            .iter()
            .filter_map(|kind| {
                generate_mermaid_diagram(*kind, &data).map(|source| Diagram { kind: *kind, source })
            })
            .collect();

        // 6. Follow-ups
        let follow_up_questions =
            FollowUpGenerator::from_seed(self.follow_up_seed).generate(report, topic);

        let processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "Analyzed report for '{}' in {}ms: {} sections, {} charts, {} diagrams",
            topic,
            processing_time_ms,
            sections.len(),
            charts.len(),
            diagrams.len()
        );

        ReportInsights {
            topic: topic.to_string(),
            query,
            sections,
            highlights,
            summary,
            parsed,
            charts,
            diagrams,
            follow_up_questions,
            processing_time_ms,
            analyzed_at: Utc::now(),
        }
    }
}
