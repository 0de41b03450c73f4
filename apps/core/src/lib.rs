//! Research Chat core.
//!
//! `brain` holds the report heuristics (query analysis, sectioning,
//! extraction, charts, diagrams, follow-up questions). The remaining modules
//! are the boundary: backend client, configuration, errors, logging and
//! report loading.

pub mod brain;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod report_source;

#[cfg(test)]
mod tests;

pub use brain::{QueryAnalysis, QueryAnalyzer, ReportAnalyzer, ReportInsights};
pub use client::{HttpResearchClient, ResearchBackend};
pub use config::ClientConfig;
pub use error::AppError;
