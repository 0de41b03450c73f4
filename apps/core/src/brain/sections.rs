//! Report sectionizer.
//!
//! Splits markdown reports at `#` / `##` headings and pulls key concepts,
//! challenges and future directions out of the matching sections.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::text::{char_len, sentences, truncate_chars};

const MAX_HIGHLIGHTS: usize = 5;
const MIN_HIGHLIGHT_SENTENCE: usize = 20;
const SUMMARY_FALLBACK_CHARS: usize = 300;

static HEADING_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,2}[ \t]").expect("Invalid regex: heading start"));

static HEADING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(#{1,2})[ \t]+(.*)$").expect("Invalid regex: heading line")
});

static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:[-*•]|\d+\.)[ \t]+(.+)$").expect("Invalid regex: list item")
});

const CONCEPT_HEADERS: &[&str] = &["concept", "theor", "principle", "fundamental", "key idea"];
const CHALLENGE_HEADERS: &[&str] = &["challenge", "controvers", "limitation", "risk", "problem"];
const FUTURE_HEADERS: &[&str] = &["future", "outlook", "direction", "next step", "prediction"];

/// One titled chunk of a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    pub header: String,
    pub content: String,
    /// 1 for `#`, 2 for `##`
    pub level: u8,
    pub id: String,
}

/// Section-derived talking points
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportHighlights {
    pub key_concepts: Vec<String>,
    pub challenges: Vec<String>,
    pub future_directions: Vec<String>,
}

/// Split a report into sections in document order.
pub fn sectionize(text: &str) -> Vec<ReportSection> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut bounds: Vec<usize> = std::iter::once(0)
        .chain(HEADING_START.find_iter(text).map(|m| m.start()).filter(|&s| s > 0))
        .collect();
    bounds.push(text.len());

    bounds
        .windows(2)
        .map(|w| &text[w[0]..w[1]])
        .filter(|chunk| !chunk.trim().is_empty())
        .enumerate()
        .map(|(index, chunk)| build_section(index, chunk))
        .collect()
}

fn build_section(index: usize, chunk: &str) -> ReportSection {
    let id = format!("section-{}", index);

    let heading = HEADING_LINE
        .captures(chunk)
        .and_then(|caps| Some((caps.get(0)?, caps.get(1)?, caps.get(2)?)));

    match heading {
        Some((line, hashes, header)) => {
            let content = format!("{}{}", &chunk[..line.start()], &chunk[line.end()..]);
            ReportSection {
                header: header.as_str().trim().to_string(),
                content: content.trim().to_string(),
                level: hashes.as_str().len() as u8,
                id,
            }
        }
        None => ReportSection {
            header: if index == 0 {
                "Overview".to_string()
            } else {
                format!("Section {}", index + 1)
            },
            content: chunk.trim().to_string(),
            level: 1,
            id,
        },
    }
}

/// Strip markdown emphasis and code markers from a list item.
fn plain(text: &str) -> String {
    text.replace("**", "")
        .replace("__", "")
        .replace('`', "")
        .trim()
        .to_string()
}

fn collect_points(sections: &[ReportSection], header_terms: &[&str]) -> Vec<String> {
    let mut points = Vec::new();

    for section in sections {
        let header = section.header.to_lowercase();
        if !header_terms.iter().any(|t| header.contains(t)) {
            continue;
        }

        let items: Vec<String> = LIST_ITEM
            .captures_iter(&section.content)
            .filter_map(|caps| caps.get(1))
            .map(|m| plain(m.as_str()))
            .filter(|item| !item.is_empty())
            .collect();

        if items.is_empty() {
            points.extend(
                sentences(&section.content)
                    .into_iter()
                    .filter(|s| char_len(s) > MIN_HIGHLIGHT_SENTENCE)
                    .map(plain),
            );
        } else {
            points.extend(items);
        }

        if points.len() >= MAX_HIGHLIGHTS {
            break;
        }
    }

    points.truncate(MAX_HIGHLIGHTS);
    points
}

/// Key concepts, challenges and future directions from matching sections.
pub fn extract_highlights(sections: &[ReportSection]) -> ReportHighlights {
    ReportHighlights {
        key_concepts: collect_points(sections, CONCEPT_HEADERS),
        challenges: collect_points(sections, CHALLENGE_HEADERS),
        future_directions: collect_points(sections, FUTURE_HEADERS),
    }
}

/// The "Summary" section's content, else the opening of the first section.
pub fn summary_of(sections: &[ReportSection]) -> Option<String> {
    let named = sections
        .iter()
        .find(|s| s.header.to_lowercase().contains("summary") && !s.content.is_empty());

    match named {
        Some(section) => Some(section.content.clone()),
        None => sections
            .iter()
            .find(|s| !s.content.is_empty())
            .map(|s| truncate_chars(&s.content, SUMMARY_FALLBACK_CHARS)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "Intro text before any heading.\n\
# Research Report: Rust\n\
Rust is a systems language.\n\
## Key Concepts\n\
- **Ownership** governs memory\n\
- Borrowing allows references\n\
### Detail\n\
Nested detail stays in Key Concepts.\n\
## Challenges and Controversies\n\
The learning curve is steep for newcomers. Builds are slow.\n\
## Future Directions\n\
1. Async traits everywhere\n";

    #[test]
    fn test_empty_input() {
        assert!(sectionize("").is_empty());
        assert!(sectionize("  \n\t").is_empty());
    }

    #[test]
    fn test_sections_in_document_order() {
        let sections = sectionize(REPORT);
        let headers: Vec<&str> = sections.iter().map(|s| s.header.as_str()).collect();
        assert_eq!(
            headers,
            vec![
                "Overview",
                "Research Report: Rust",
                "Key Concepts",
                "Challenges and Controversies",
                "Future Directions",
            ]
        );
        let levels: Vec<u8> = sections.iter().map(|s| s.level).collect();
        assert_eq!(levels, vec![1, 1, 2, 2, 2]);
        assert_eq!(sections[2].id, "section-2");
    }

    #[test]
    fn test_deeper_headings_do_not_split() {
        let sections = sectionize(REPORT);
        assert!(sections[2].content.contains("### Detail"));
        assert!(sections[2].content.contains("Nested detail"));
    }

    #[test]
    fn test_content_excludes_heading_line() {
        let sections = sectionize("## Summary\nShort and sweet.");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].header, "Summary");
        assert_eq!(sections[0].content, "Short and sweet.");
    }

    #[test]
    fn test_hash_without_space_is_not_a_heading() {
        let sections = sectionize("#hashtag at start\nmore text");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].header, "Overview");
    }

    #[test]
    fn test_highlights() {
        let highlights = extract_highlights(&sectionize(REPORT));
        assert_eq!(
            highlights.key_concepts,
            vec!["Ownership governs memory", "Borrowing allows references"]
        );
        assert_eq!(
            highlights.challenges,
            vec!["The learning curve is steep for newcomers"]
        );
        assert_eq!(highlights.future_directions, vec!["Async traits everywhere"]);
    }

    #[test]
    fn test_summary_prefers_named_section() {
        let sections = sectionize("# Title\nOpening words.\n## Summary\nThe gist.");
        assert_eq!(summary_of(&sections).as_deref(), Some("The gist."));

        let sections = sectionize("# Title\nOpening words.");
        assert_eq!(summary_of(&sections).as_deref(), Some("Opening words."));

        assert_eq!(summary_of(&[]), None);
    }
}
