//! Mermaid diagram descriptions.
//!
//! Each builder emits one line per item and returns `None` when its input
//! list is empty. Item text is only sanitized enough to keep the Mermaid
//! syntax intact. Node ids are single letters from `A`, so lists are cut at
//! [`MAX_NODES`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::data_parser::ParsedReport;
use super::text::ellipsize;

/// Single-letter node ids available
pub const MAX_NODES: usize = 26;

const LABEL_CHARS: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramKind {
    Timeline,
    Flowchart,
    Mindmap,
    Sequence,
    Graph,
}

impl DiagramKind {
    pub const ALL: [DiagramKind; 5] = [
        DiagramKind::Timeline,
        DiagramKind::Flowchart,
        DiagramKind::Mindmap,
        DiagramKind::Sequence,
        DiagramKind::Graph,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DiagramKind::Timeline => "timeline",
            DiagramKind::Flowchart => "flowchart",
            DiagramKind::Mindmap => "mindmap",
            DiagramKind::Sequence => "sequence",
            DiagramKind::Graph => "graph",
        }
    }

    pub fn from_tag(tag: &str) -> Option<DiagramKind> {
        match tag.trim().to_lowercase().as_str() {
            "timeline" => Some(DiagramKind::Timeline),
            "flowchart" | "flow" => Some(DiagramKind::Flowchart),
            "mindmap" => Some(DiagramKind::Mindmap),
            "sequence" | "sequencediagram" => Some(DiagramKind::Sequence),
            "graph" | "network" => Some(DiagramKind::Graph),
            _ => None,
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A rendered diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    pub kind: DiagramKind,
    pub source: String,
}

/// Inputs the builders draw from
#[derive(Debug, Clone, Copy)]
pub struct DiagramData<'a> {
    pub topic: &'a str,
    pub report: &'a ParsedReport,
    pub focus_areas: &'a [String],
}

/// Dispatch to the builder for `kind`.
pub fn generate_mermaid_diagram(kind: DiagramKind, data: &DiagramData<'_>) -> Option<String> {
    match kind {
        DiagramKind::Timeline => timeline_diagram(data),
        DiagramKind::Flowchart => flowchart_diagram(data),
        DiagramKind::Mindmap => mindmap_diagram(data),
        DiagramKind::Sequence => sequence_diagram(data),
        DiagramKind::Graph => graph_diagram(data),
    }
}

/// Letter id for the `index`-th node; callers keep `index < MAX_NODES`.
fn node_id(index: usize) -> char {
    (b'A' + index as u8) as char
}

fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn title_of(topic: &str, fallback: &str) -> String {
    let title = one_line(topic);
    if title.is_empty() {
        fallback.to_string()
    } else {
        title.replace(':', " -")
    }
}

/// Quoted node label: double quotes would close the label early.
fn node_label(text: &str) -> String {
    ellipsize(&one_line(text), LABEL_CHARS).replace('"', "'")
}

fn timeline_diagram(data: &DiagramData<'_>) -> Option<String> {
    let events = &data.report.timeline_data;
    if events.is_empty() {
        return None;
    }

    let mut out = String::from("timeline\n");
    out.push_str(&format!("    title {}\n", title_of(data.topic, "Timeline")));
    for event in events.iter().take(MAX_NODES) {
        // ':' separates period from event text
        let text = ellipsize(&one_line(&event.event), LABEL_CHARS).replace(':', " -");
        out.push_str(&format!("    {} : {}\n", event.year, text));
    }
    Some(out)
}

fn flowchart_diagram(data: &DiagramData<'_>) -> Option<String> {
    let steps = &data.report.process_steps;
    if steps.is_empty() {
        return None;
    }

    let mut out = String::from("flowchart TD\n");
    for (i, step) in steps.iter().take(MAX_NODES).enumerate() {
        let id = node_id(i);
        let label = node_label(&step.step);
        if i == 0 {
            out.push_str(&format!("    {}[\"{}\"]\n", id, label));
        } else {
            out.push_str(&format!("    {} --> {}[\"{}\"]\n", node_id(i - 1), id, label));
        }
    }
    Some(out)
}

fn mindmap_diagram(data: &DiagramData<'_>) -> Option<String> {
    let branches: Vec<String> = if data.focus_areas.is_empty() {
        data.report.entities.iter().map(|e| e.name.clone()).collect()
    } else {
        data.focus_areas.to_vec()
    };
    if branches.is_empty() {
        return None;
    }

    // Brackets and parens are node-shape syntax in mindmaps
    let strip = |s: &str| -> String {
        one_line(s)
            .chars()
            .filter(|c| !matches!(c, '(' | ')' | '[' | ']' | '{' | '}'))
            .collect()
    };

    let mut out = String::from("mindmap\n");
    out.push_str(&format!("  root(({}))\n", strip(&title_of(data.topic, "Research"))));
    for branch in branches.iter().take(MAX_NODES) {
        out.push_str(&format!("    {}\n", strip(branch)));
    }
    Some(out)
}

fn sequence_diagram(data: &DiagramData<'_>) -> Option<String> {
    let steps = &data.report.process_steps;
    if steps.is_empty() {
        return None;
    }

    let subject = title_of(data.topic, "Subject").replace(';', ",");
    let mut out = String::from("sequenceDiagram\n");
    out.push_str("    participant R as Researcher\n");
    out.push_str(&format!("    participant S as {}\n", subject));
    for step in steps.iter().take(MAX_NODES) {
        // ';' and '#' end or escape a message
        let message = ellipsize(&one_line(&step.step), LABEL_CHARS)
            .replace(';', ",")
            .replace('#', "");
        out.push_str(&format!("    R->>S: {}\n", message));
    }
    Some(out)
}

fn graph_diagram(data: &DiagramData<'_>) -> Option<String> {
    let entities = &data.report.entities;
    if entities.is_empty() {
        return None;
    }

    let root = node_id(0);
    let mut out = String::from("graph LR\n");
    out.push_str(&format!("    {}((\"{}\"))\n", root, node_label(&title_of(data.topic, "Topic"))));
    for (i, entity) in entities.iter().take(MAX_NODES - 1).enumerate() {
        out.push_str(&format!(
            "    {} --- {}[\"{} ({})\"]\n",
            root,
            node_id(i + 1),
            node_label(&entity.name),
            entity.frequency
        ));
    }
    Some(out)
}
