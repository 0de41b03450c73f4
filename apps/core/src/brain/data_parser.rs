//! Report fact extraction.
//!
//! Turns free-form report text into candidate metrics, timeline events,
//! insights, process steps, statistics and entities. Every rule is an
//! independent regex or sentence heuristic over the whole text; nothing here
//! can fail, and empty text yields an empty [`ParsedReport`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

use super::charts::{generate_chart_data, ChartData, ChartKind};
use super::domain::Domain;
use super::text::{
    char_len, first_sentence_containing, marked_window, sentences, truncate_chars, window,
    CAPITALIZED_RUN,
};

const MAX_METRICS: usize = 8;
const METRIC_CONTEXT_RADIUS: usize = 50;
const MAX_YEARS_SCANNED: usize = 10;
const MAX_TIMELINE: usize = 8;
const MAX_EVENT_CHARS: usize = 100;
const MAX_INSIGHTS: usize = 8;
const MAX_STEPS_PER_MARKER: usize = 8;
const MAX_STATISTICS: usize = 6;
const STATISTIC_CONTEXT_RADIUS: usize = 30;
const MAX_ENTITY_CANDIDATES: usize = 15;
const MAX_ENTITIES: usize = 10;

/// Words that flag a sentence as an insight
const IMPORTANCE_KEYWORDS: &[&str] = &[
    "important",
    "significant",
    "key",
    "major",
    "notable",
    "remarkable",
    "crucial",
    "essential",
    "critical",
    "primary",
    "main",
    "leading",
];

static METRIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)[$€£]?\d+(?:,\d{3})*(?:\.\d+)?(?:\s?%|\s(?:percent|thousand|million|billion|trillion)\b)?",
    )
    .expect("Invalid regex: metric")
});

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("Invalid regex: year"));

static STATISTIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(\d+(?:\.\d+)?%?)\s+(?:of|in|are|were|have|shows?|indicates?|report(?:s|ed)?)\b",
    )
    .expect("Invalid regex: statistic")
});

/// List-marker patterns, applied one after another
static STEP_MARKERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?m)^[ \t]*\d+\.[ \t]+(.+)$").expect("Invalid regex: numbered step"),
        Regex::new(r"(?m)^[ \t]*•[ \t]*(.+)$").expect("Invalid regex: bullet step"),
        Regex::new(r"(?m)^[ \t]*\*[ \t]+(.+)$").expect("Invalid regex: star step"),
        Regex::new(r"(?m)^[ \t]*-[ \t]+(.+)$").expect("Invalid regex: dash step"),
    ]
});

/// A numeric figure found in the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetric {
    /// Raw matched text, e.g. `$4.5 billion` or `37%`
    pub value: String,
    pub label: String,
    /// Surrounding text with the value marked `**like this**`
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub year: i32,
    pub event: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub text: String,
    pub importance: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessStep {
    pub step: String,
    /// 1-based position across all marker patterns
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistic {
    pub value: String,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMention {
    pub name: String,
    pub frequency: u32,
    pub context: String,
}

/// Structured facts extracted from one report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedReport {
    pub key_metrics: Vec<KeyMetric>,
    /// Ascending by year, at most 8
    pub timeline_data: Vec<TimelineEvent>,
    /// Descending by importance, at most 8
    pub insights: Vec<Insight>,
    pub process_steps: Vec<ProcessStep>,
    pub statistics: Vec<Statistic>,
    /// Descending by frequency, at most 10
    pub entities: Vec<EntityMention>,
}

impl ParsedReport {
    /// True when no rule found anything
    pub fn is_empty(&self) -> bool {
        self.key_metrics.is_empty()
            && self.timeline_data.is_empty()
            && self.insights.is_empty()
            && self.process_steps.is_empty()
            && self.statistics.is_empty()
            && self.entities.is_empty()
    }
}

/// Heuristic report parser
#[derive(Debug, Default)]
pub struct DataParser;

impl DataParser {
    pub fn new() -> Self {
        Self
    }

    /// Run every extraction rule over `text`.
    ///
    /// `domain` is accepted for domain-specific rules; none exist yet.
    pub fn parse_research_data(&self, text: &str, domain: Domain) -> ParsedReport {
        if text.trim().is_empty() {
            return ParsedReport::default();
        }

        let parsed = ParsedReport {
            key_metrics: self.extract_metrics(text),
            timeline_data: self.extract_timeline(text),
            insights: self.extract_insights(text),
            process_steps: self.extract_process_steps(text),
            statistics: self.extract_statistics(text),
            entities: self.extract_entities(text),
        };

        debug!(
            domain = %domain,
            metrics = parsed.key_metrics.len(),
            timeline = parsed.timeline_data.len(),
            insights = parsed.insights.len(),
            steps = parsed.process_steps.len(),
            statistics = parsed.statistics.len(),
            entities = parsed.entities.len(),
            "Parsed research data"
        );

        parsed
    }

    /// Chart series for one chart kind, `None` when its source list is empty.
    pub fn generate_chart_data(&self, parsed: &ParsedReport, kind: ChartKind) -> Option<ChartData> {
        generate_chart_data(parsed, kind)
    }

    /// Currency and number tokens with optional magnitude, first 8.
    pub fn extract_metrics(&self, text: &str) -> Vec<KeyMetric> {
        METRIC
            .find_iter(text)
            .take(MAX_METRICS)
            .enumerate()
            .map(|(i, m)| KeyMetric {
                value: m.as_str().trim().to_string(),
                label: format!("Metric {}", i + 1),
                description: marked_window(text, m.start(), m.end(), METRIC_CONTEXT_RADIUS),
            })
            .collect()
    }

    /// Distinct years 1900-2099 paired with the first sentence mentioning them.
    pub fn extract_timeline(&self, text: &str) -> Vec<TimelineEvent> {
        let mut seen = HashSet::new();
        let years: Vec<&str> = YEAR
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|year| seen.insert(*year))
            .take(MAX_YEARS_SCANNED)
            .collect();

        let mut events: Vec<TimelineEvent> = years
            .into_iter()
            .filter_map(|year| {
                let value: i32 = year.parse().ok()?;
                let sentence = first_sentence_containing(text, year)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Event in {}", year));
                Some(TimelineEvent {
                    year: value,
                    event: truncate_chars(&sentence, MAX_EVENT_CHARS),
                    description: sentence,
                })
            })
            .collect();

        events.sort_by_key(|e| e.year);
        events.truncate(MAX_TIMELINE);
        events
    }

    /// Sentences carrying importance keywords, scored and ranked.
    pub fn extract_insights(&self, text: &str) -> Vec<Insight> {
        let mut insights: Vec<Insight> = sentences(text)
            .into_iter()
            .filter_map(|sentence| {
                let len = char_len(sentence);
                if len <= 20 || len >= 200 {
                    return None;
                }
                let lower = sentence.to_lowercase();
                let hits = IMPORTANCE_KEYWORDS
                    .iter()
                    .filter(|k| lower.contains(**k))
                    .count() as u32;
                if hits == 0 {
                    return None;
                }
                let bonus = u32::from(len > 50);
                Some(Insight {
                    text: sentence.to_string(),
                    importance: hits + bonus,
                })
            })
            .collect();

        insights.sort_by(|a, b| b.importance.cmp(&a.importance));
        insights.truncate(MAX_INSIGHTS);
        insights
    }

    /// List items under each marker pattern; overlapping matches are kept.
    pub fn extract_process_steps(&self, text: &str) -> Vec<ProcessStep> {
        let mut steps = Vec::new();
        let mut order = 0u32;

        for marker in STEP_MARKERS.iter() {
            let items = marker
                .captures_iter(text)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str().trim())
                .filter(|item| {
                    let len = char_len(item);
                    len > 10 && len < 150
                })
                .take(MAX_STEPS_PER_MARKER);

            for item in items {
                order += 1;
                steps.push(ProcessStep {
                    step: item.to_string(),
                    order,
                });
            }
        }

        steps
    }

    /// Numbers followed by a connecting word ("45% of", "3 studies show").
    pub fn extract_statistics(&self, text: &str) -> Vec<Statistic> {
        STATISTIC
            .captures_iter(text)
            .take(MAX_STATISTICS)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let value = caps.get(1)?;
                Some(Statistic {
                    value: value.as_str().to_string(),
                    context: window(text, whole.start(), whole.end(), STATISTIC_CONTEXT_RADIUS),
                })
            })
            .collect()
    }

    /// Capitalized-word runs ranked by how often they occur.
    pub fn extract_entities(&self, text: &str) -> Vec<EntityMention> {
        let lower = text.to_lowercase();
        let mut seen = HashSet::new();

        let mut entities: Vec<EntityMention> = CAPITALIZED_RUN
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|name| seen.insert(*name))
            .filter(|name| char_len(name) > 2)
            .take(MAX_ENTITY_CANDIDATES)
            .map(|name| EntityMention {
                name: name.to_string(),
                frequency: lower.matches(&name.to_lowercase()).count() as u32,
                context: first_sentence_containing(text, name)
                    .unwrap_or_default()
                    .to_string(),
            })
            .collect();

        entities.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        entities.truncate(MAX_ENTITIES);
        entities
    }
}
