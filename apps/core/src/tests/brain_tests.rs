//! Brain Module Tests
//!
//! Cross-component checks for query analysis, sectioning, extraction,
//! chart derivation and follow-up suggestions.

use crate::brain::{
    generate_chart_data, sectionize, ChartKind, DataParser, Domain, FollowUpGenerator, Intent,
    ParsedReport, QueryAnalyzer, ResearchType,
};

const SAMPLE_REPORT: &str = "# Research Report: The Moon Landing\n\
\n\
## Overview\n\
The Apollo Program was a major undertaking by the United States. \
Planning started in 1961 and the first landing came in 1969. \
Later missions continued until 1972.\n\
\n\
## Key Findings\n\
- About 400000 people worked on Apollo at its peak\n\
- The program cost $25.8 billion in total\n\
- 12 astronauts walked on the lunar surface\n\
\n\
It is significant that 45% of Americans followed the landing live. \
Neil Armstrong and Buzz Aldrin were the first to walk on the Moon. \
Neil Armstrong later taught engineering.\n\
\n\
## Future Directions\n\
1. Return crews to the lunar south pole\n\
2. Build a permanent orbital gateway\n";

#[cfg(test)]
mod query_analyzer_tests {
    use super::*;

    #[test]
    fn test_marie_curie_example() {
        let analysis = QueryAnalyzer::new().analyze("Who is Marie Curie?");

        assert_eq!(analysis.research_type, ResearchType::Biography);
        assert!(analysis.focus_areas.iter().any(|f| f == "Career"));
        assert!(analysis.chart_types.contains(&ChartKind::Timeline));
    }

    #[test]
    fn test_python_vs_java_example() {
        let analysis = QueryAnalyzer::new().analyze("Compare Python vs Java");

        assert_eq!(analysis.research_type, ResearchType::Comparison);
        assert_eq!(analysis.domain, Domain::Technology);
    }

    #[test]
    fn test_first_match_wins_across_tables() {
        let analyzer = QueryAnalyzer::new();

        // "what is" (learn) is declared before "why" (analyze)
        let analysis = analyzer.analyze("What is the reason why tides happen?");
        assert_eq!(analysis.intent, Intent::Learn);
        assert_eq!(analysis.research_type, ResearchType::Explanation);
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let analyzer = QueryAnalyzer::new();
        let queries = [
            "Who is Ada Lovelace?",
            "Quick overview of the stock market trend",
            "",
            "¿Qué es la fotosíntesis?",
        ];

        for query in queries {
            assert_eq!(analyzer.analyze(query), analyzer.analyze(query), "{query}");
        }
    }

    #[test]
    fn test_keywords_capped_at_ten() {
        let analysis = QueryAnalyzer::new().analyze(
            "alpha bravo charlie delta foxtrot hotel india juliet kilo lima mike november",
        );
        assert_eq!(analysis.keywords.len(), 10);
        assert!(analysis.keywords.iter().all(|k| k.chars().count() > 3));
    }
}

#[cfg(test)]
mod sectionizer_tests {
    use super::*;

    #[test]
    fn test_empty_report_has_no_sections() {
        assert!(sectionize("").is_empty());
    }

    #[test]
    fn test_sections_follow_heading_order() {
        let sections = sectionize(SAMPLE_REPORT);
        let headers: Vec<&str> = sections.iter().map(|s| s.header.as_str()).collect();
        assert_eq!(
            headers,
            vec![
                "Research Report: The Moon Landing",
                "Overview",
                "Key Findings",
                "Future Directions"
            ]
        );

        let mut last = 0;
        for section in &sections {
            let found = SAMPLE_REPORT[last..]
                .find(&section.header)
                .map(|i| i + last)
                .expect("header appears after the previous one");
            last = found;
        }
    }

    #[test]
    fn test_ids_are_positional() {
        let ids: Vec<String> = sectionize(SAMPLE_REPORT).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["section-0", "section-1", "section-2", "section-3"]);
    }
}

#[cfg(test)]
mod data_parser_tests {
    use super::*;

    fn parse(text: &str) -> ParsedReport {
        DataParser::new().parse_research_data(text, Domain::General)
    }

    #[test]
    fn test_discovery_years_example() {
        let parsed = parse("The discovery occurred in 1969 and again in 1972.");
        let years: Vec<i32> = parsed.timeline_data.iter().map(|e| e.year).collect();
        assert_eq!(years, vec![1969, 1972]);
    }

    #[test]
    fn test_no_years_no_timeline() {
        let parsed = parse("Nothing here has a date. Only 12 and 345 and 99999.");
        assert!(parsed.timeline_data.is_empty());
    }

    #[test]
    fn test_timeline_sorted_and_capped() {
        let text: String = (0..12)
            .map(|i| format!("Event {} happened in {}. ", i, 2011 - i))
            .collect();
        let parsed = parse(&text);

        assert!(parsed.timeline_data.len() <= 8);
        assert!(parsed
            .timeline_data
            .windows(2)
            .all(|w| w[0].year <= w[1].year));
    }

    #[test]
    fn test_entities_sorted_and_capped() {
        let text: String = (0..20)
            .map(|i| {
                let name = format!("Person{}", char::from(b'a' + i as u8));
                format!("{} met {}. ", name, "Zed".repeat(1 + i % 3))
            })
            .collect();
        let parsed = parse(&text);

        assert!(parsed.entities.len() <= 10);
        assert!(parsed
            .entities
            .windows(2)
            .all(|w| w[0].frequency >= w[1].frequency));
    }

    #[test]
    fn test_sample_report_extraction() {
        let parsed = parse(SAMPLE_REPORT);

        let years: Vec<i32> = parsed.timeline_data.iter().map(|e| e.year).collect();
        assert_eq!(years, vec![1961, 1969, 1972]);

        assert!(parsed.key_metrics.iter().any(|m| m.value == "$25.8 billion"));
        assert!(parsed.statistics.iter().any(|s| s.value == "45%"));
        assert!(parsed.insights.iter().any(|i| i.text.contains("significant")));

        let armstrong = parsed
            .entities
            .iter()
            .find(|e| e.name == "Neil Armstrong")
            .expect("Neil Armstrong is extracted");
        assert_eq!(armstrong.frequency, 2);

        // Dash items and numbered items both count as steps
        assert!(parsed
            .process_steps
            .iter()
            .any(|s| s.step == "Return crews to the lunar south pole"));
        assert!(parsed
            .process_steps
            .iter()
            .any(|s| s.step.starts_with("The program cost")));
    }

    #[test]
    fn test_doughnut_example() {
        assert!(generate_chart_data(&ParsedReport::default(), ChartKind::Doughnut).is_none());

        let parsed = parse(SAMPLE_REPORT);
        let chart = generate_chart_data(&parsed, ChartKind::Doughnut).expect("entities present");
        assert!(chart.datasets[0].data.len() <= 5);
        assert_eq!(chart.labels.len(), chart.datasets[0].data.len());
    }

    #[test]
    fn test_every_chart_kind_is_optional() {
        let empty = ParsedReport::default();
        for kind in ChartKind::ALL {
            assert!(generate_chart_data(&empty, kind).is_none(), "{kind}");
        }
    }
}

#[cfg(test)]
mod follow_up_tests {
    use super::*;

    #[test]
    fn test_output_is_subset_of_pool() {
        let mut generator = FollowUpGenerator::new();
        let pool = generator.candidates(SAMPLE_REPORT, "Moon landing history");

        for _ in 0..20 {
            let questions = generator.generate(SAMPLE_REPORT, "Moon landing history");
            assert_eq!(questions.len(), 4);
            for question in &questions {
                assert!(pool.contains(question), "unexpected question: {question}");
            }
        }
    }

    #[test]
    fn test_pinned_seed_is_reproducible() {
        let first = FollowUpGenerator::with_seed(2024).generate(SAMPLE_REPORT, "Moon landing");
        let second = FollowUpGenerator::with_seed(2024).generate(SAMPLE_REPORT, "Moon landing");
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_duplicate_questions() {
        let mut generator = FollowUpGenerator::with_seed(9);
        let questions = generator.generate(SAMPLE_REPORT, "Moon landing");
        let mut deduped = questions.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), questions.len());
    }
}
