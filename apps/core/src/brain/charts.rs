//! Chart series derived from a [`ParsedReport`].
//!
//! Output is renderer-agnostic but serializes in the Chart.js config shape
//! (`type`, `labels`, `datasets[].backgroundColor`, ...).

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use super::data_parser::ParsedReport;
use super::text::ellipsize;

/// Fixed palette, cycled by item index
pub const PALETTE: [&str; 8] = [
    "rgba(99, 102, 241, 0.8)",
    "rgba(16, 185, 129, 0.8)",
    "rgba(245, 158, 11, 0.8)",
    "rgba(239, 68, 68, 0.8)",
    "rgba(139, 92, 246, 0.8)",
    "rgba(6, 182, 212, 0.8)",
    "rgba(236, 72, 153, 0.8)",
    "rgba(132, 204, 22, 0.8)",
];

const MAX_BAR_ITEMS: usize = 6;
const MAX_LINE_ITEMS: usize = 8;
const MAX_DOUGHNUT_ITEMS: usize = 5;
const MAX_RADAR_ITEMS: usize = 6;
const MAX_BUBBLE_ITEMS: usize = 8;
const MAX_BUBBLE_RADIUS: f64 = 20.0;
const RADAR_LABEL_CHARS: usize = 30;

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("Invalid regex: first number"));

/// Visualization tag carried by a query analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Doughnut,
    Radar,
    Bubble,
    /// Timeline events drawn as a line chart
    Timeline,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Doughnut,
        ChartKind::Radar,
        ChartKind::Bubble,
        ChartKind::Timeline,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Doughnut => "doughnut",
            ChartKind::Radar => "radar",
            ChartKind::Bubble => "bubble",
            ChartKind::Timeline => "timeline",
        }
    }

    /// Parse a loose tag such as `"Pie"` or `"timeline"`.
    pub fn from_tag(tag: &str) -> Option<ChartKind> {
        match tag.trim().to_lowercase().as_str() {
            "bar" => Some(ChartKind::Bar),
            "line" => Some(ChartKind::Line),
            "doughnut" | "donut" | "pie" => Some(ChartKind::Doughnut),
            "radar" => Some(ChartKind::Radar),
            "bubble" => Some(ChartKind::Bubble),
            "timeline" => Some(ChartKind::Timeline),
            _ => None,
        }
    }

    /// Chart.js type the kind renders as
    fn render_type(&self) -> &'static str {
        match self {
            ChartKind::Timeline => "line",
            other => other.label(),
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BubblePoint {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

/// Dataset payload: plain values, or points for bubble charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataPoints {
    Values(Vec<f64>),
    Bubbles(Vec<BubblePoint>),
}

impl DataPoints {
    pub fn len(&self) -> usize {
        match self {
            DataPoints::Values(v) => v.len(),
            DataPoints::Bubbles(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: DataPoints,
    pub background_color: Vec<String>,
    pub border_color: Vec<String>,
    pub border_width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

impl Dataset {
    fn new(label: &str, data: DataPoints) -> Self {
        let colors = palette(data.len());
        Self {
            label: label.to_string(),
            data,
            border_color: colors.iter().map(|c| c.replace("0.8)", "1)")).collect(),
            background_color: colors,
            border_width: 1,
            fill: None,
            tension: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(rename = "type")]
    pub chart_type: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// `n` palette colours, cycling.
fn palette(n: usize) -> Vec<String> {
    (0..n).map(|i| PALETTE[i % PALETTE.len()].to_string()).collect()
}

/// First number in a metric value (thousands separators ignored), else 0.
pub fn first_number(value: &str) -> f64 {
    let cleaned = value.replace(',', "");
    FIRST_NUMBER
        .find(&cleaned)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0)
}

/// Build the series for `kind`, or `None` when its source list is empty.
pub fn generate_chart_data(parsed: &ParsedReport, kind: ChartKind) -> Option<ChartData> {
    let (labels, dataset) = match kind {
        ChartKind::Bar => bar_series(parsed)?,
        ChartKind::Line | ChartKind::Timeline => line_series(parsed)?,
        ChartKind::Doughnut => doughnut_series(parsed)?,
        ChartKind::Radar => radar_series(parsed)?,
        ChartKind::Bubble => bubble_series(parsed)?,
    };

    Some(ChartData {
        chart_type: kind.render_type().to_string(),
        labels,
        datasets: vec![dataset],
    })
}

fn bar_series(parsed: &ParsedReport) -> Option<(Vec<String>, Dataset)> {
    if parsed.key_metrics.is_empty() {
        return None;
    }
    let metrics = parsed.key_metrics.iter().take(MAX_BAR_ITEMS);
    let (labels, values): (Vec<String>, Vec<f64>) = metrics
        .map(|m| (m.label.clone(), first_number(&m.value)))
        .unzip();
    Some((labels, Dataset::new("Key Metrics", DataPoints::Values(values))))
}

// The y axis is the event's position, not a magnitude; timeline entries carry
// no value to plot.
fn line_series(parsed: &ParsedReport) -> Option<(Vec<String>, Dataset)> {
    if parsed.timeline_data.is_empty() {
        return None;
    }
    let events: Vec<_> = parsed.timeline_data.iter().take(MAX_LINE_ITEMS).collect();
    let labels = events.iter().map(|e| e.year.to_string()).collect();
    let values = (1..=events.len()).map(|i| i as f64).collect();

    let mut dataset = Dataset::new("Timeline Events", DataPoints::Values(values));
    dataset.background_color.truncate(1);
    dataset.border_color.truncate(1);
    dataset.border_width = 2;
    dataset.fill = Some(false);
    dataset.tension = Some(0.4);
    Some((labels, dataset))
}

fn doughnut_series(parsed: &ParsedReport) -> Option<(Vec<String>, Dataset)> {
    if parsed.entities.is_empty() {
        return None;
    }
    let (labels, values): (Vec<String>, Vec<f64>) = parsed
        .entities
        .iter()
        .take(MAX_DOUGHNUT_ITEMS)
        .map(|e| (e.name.clone(), f64::from(e.frequency)))
        .unzip();
    Some((labels, Dataset::new("Entity Mentions", DataPoints::Values(values))))
}

fn radar_series(parsed: &ParsedReport) -> Option<(Vec<String>, Dataset)> {
    if parsed.insights.is_empty() {
        return None;
    }
    let (labels, values): (Vec<String>, Vec<f64>) = parsed
        .insights
        .iter()
        .take(MAX_RADAR_ITEMS)
        .map(|i| (ellipsize(&i.text, RADAR_LABEL_CHARS), f64::from(i.importance)))
        .unzip();
    Some((labels, Dataset::new("Insight Importance", DataPoints::Values(values))))
}

fn bubble_series(parsed: &ParsedReport) -> Option<(Vec<String>, Dataset)> {
    if parsed.entities.is_empty() {
        return None;
    }
    let (labels, points): (Vec<String>, Vec<BubblePoint>) = parsed
        .entities
        .iter()
        .take(MAX_BUBBLE_ITEMS)
        .enumerate()
        .map(|(rank, e)| {
            let radius = (e.name.chars().count() as f64 * 2.0).min(MAX_BUBBLE_RADIUS);
            let point = BubblePoint {
                x: rank as f64,
                y: f64::from(e.frequency),
                r: radius,
            };
            (e.name.clone(), point)
        })
        .unzip();
    Some((labels, Dataset::new("Entity Prominence", DataPoints::Bubbles(points))))
}
