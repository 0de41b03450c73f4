//! Research-type profiles.
//!
//! A profile bundles the research type with the focus areas, chart kinds and
//! diagram kinds that suit it. Profiles are checked in declaration order and
//! the first one with a contained phrase is applied as a whole.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::charts::ChartKind;
use super::diagram::DiagramKind;

/// Shape of research the query asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResearchType {
    Biography,
    Explanation,
    Process,
    Analysis,
    Comparison,
    Trend,
    General,
}

impl fmt::Display for ResearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResearchType::Biography => "biography",
            ResearchType::Explanation => "explanation",
            ResearchType::Process => "process",
            ResearchType::Analysis => "analysis",
            ResearchType::Comparison => "comparison",
            ResearchType::Trend => "trend",
            ResearchType::General => "general",
        };
        write!(f, "{}", label)
    }
}

/// Everything a matched research type sets on the analysis
#[derive(Debug)]
pub struct ResearchProfile {
    pub research_type: ResearchType,
    pub phrases: &'static [&'static str],
    pub focus_areas: &'static [&'static str],
    pub chart_types: &'static [ChartKind],
    pub diagrams: &'static [DiagramKind],
}

pub const RESEARCH_PROFILES: &[ResearchProfile] = &[
    ResearchProfile {
        research_type: ResearchType::Biography,
        phrases: &["who is", "who was", "biography", "life of", "born in"],
        focus_areas: &["Early Life", "Career", "Achievements", "Legacy"],
        chart_types: &[ChartKind::Timeline, ChartKind::Bar],
        diagrams: &[DiagramKind::Timeline, DiagramKind::Mindmap],
    },
    ResearchProfile {
        research_type: ResearchType::Explanation,
        phrases: &["what is", "what are", "explain", "define", "definition", "meaning of"],
        focus_areas: &["Definition", "Key Concepts", "Applications", "Examples"],
        chart_types: &[ChartKind::Doughnut, ChartKind::Radar],
        diagrams: &[DiagramKind::Mindmap, DiagramKind::Graph],
    },
    ResearchProfile {
        research_type: ResearchType::Process,
        phrases: &["how to", "how does", "how do", "process", "steps", "procedure", "guide"],
        focus_areas: &["Steps", "Requirements", "Best Practices", "Common Mistakes"],
        chart_types: &[ChartKind::Bar],
        diagrams: &[DiagramKind::Flowchart, DiagramKind::Sequence],
    },
    ResearchProfile {
        research_type: ResearchType::Analysis,
        phrases: &["why", "cause", "effect", "impact", "analyze", "analyse", "analysis", "reason"],
        focus_areas: &["Causes", "Effects", "Evidence", "Implications"],
        chart_types: &[ChartKind::Radar, ChartKind::Bar],
        diagrams: &[DiagramKind::Graph, DiagramKind::Flowchart],
    },
    ResearchProfile {
        research_type: ResearchType::Comparison,
        phrases: &["compare", "comparison", " vs ", "versus", "difference between", "better than"],
        focus_areas: &["Similarities", "Differences", "Strengths", "Weaknesses"],
        chart_types: &[ChartKind::Bar, ChartKind::Radar],
        diagrams: &[DiagramKind::Graph, DiagramKind::Mindmap],
    },
    ResearchProfile {
        research_type: ResearchType::Trend,
        phrases: &["trend", "future", "growth", "evolution", "forecast", "over time"],
        focus_areas: &["Historical Data", "Current State", "Future Projections", "Key Drivers"],
        chart_types: &[ChartKind::Line, ChartKind::Bubble],
        diagrams: &[DiagramKind::Timeline, DiagramKind::Flowchart],
    },
];

/// First profile with a phrase contained in the lowercased query.
pub fn match_profile(lower_query: &str) -> Option<&'static ResearchProfile> {
    RESEARCH_PROFILES
        .iter()
        .find(|profile| profile.phrases.iter().any(|p| lower_query.contains(p)))
}
