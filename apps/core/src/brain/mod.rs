//! # Brain Module
//!
//! Heuristic, non-LLM analysis of research queries and the reports the
//! backend returns for them. Everything here is synchronous and total:
//! malformed input degrades to empty or neutral results, never an error.
//!
//! ## Components
//! - `analyzer`: query classification (intent, domain, research type, complexity)
//! - `sections`: markdown sectionizer and section highlights
//! - `data_parser`: regex extraction of metrics, years, insights, steps, entities
//! - `charts` / `diagram`: chart series and Mermaid descriptions
//! - `follow_up`: follow-up question suggestions
//! - `pipeline`: runs all of the above over one report

pub mod analysis;
pub mod analyzer;
pub mod charts;
pub mod complexity;
pub mod data_parser;
pub mod diagram;
pub mod domain;
pub mod follow_up;
pub mod intent;
pub mod keywords;
pub mod pipeline;
pub mod research_type;
pub mod sections;
pub mod text;

pub use analysis::QueryAnalysis;
pub use analyzer::QueryAnalyzer;
pub use charts::{generate_chart_data, ChartData, ChartKind};
pub use complexity::Complexity;
pub use data_parser::{DataParser, ParsedReport};
pub use diagram::{generate_mermaid_diagram, Diagram, DiagramData, DiagramKind};
pub use domain::Domain;
pub use follow_up::FollowUpGenerator;
pub use intent::{Intent, IntentClassifier, IntentResult};
pub use keywords::KeywordExtractor;
pub use pipeline::{ReportAnalyzer, ReportInsights};
pub use research_type::ResearchType;
pub use sections::{extract_highlights, sectionize, summary_of, ReportHighlights, ReportSection};
