//! Follow-up question suggestions.
//!
//! Candidate questions come from four sources, in pool order:
//! 1. Topic domains scored against the query and report
//! 2. Content checks on the report body
//! 3. Generic questions about the report's main subject
//! 4. A fully generic fallback when the pool is still short
//!
//! The pool is deterministic; only the final shuffle uses the generator's RNG.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use tracing::debug;

/// Questions returned per call
pub const QUESTION_COUNT: usize = 4;

const QUERY_KEYWORD_WEIGHT: usize = 3;
const MIN_RELEVANT_SCORE: f64 = 2.0;
const RELATIVE_RELEVANCE: f64 = 0.2;

static LINE_OR_SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?\n]+").expect("Invalid regex: sentence or line"));

/// A scored topic area with its question templates.
///
/// Keywords match whole words, with an optional plural `s`/`es`. A trailing
/// `*` marks a stem that matches any word starting with it.
#[derive(Debug)]
pub struct TopicDomain {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub questions: &'static [&'static str],
}

pub const TOPIC_DOMAINS: &[TopicDomain] = &[
    TopicDomain {
        name: "ai",
        keywords: &[
            "artificial intelligence",
            "machine learning",
            "neural network",
            "deep learning",
            "ai",
            "language model",
        ],
        questions: &[
            "What are the ethical concerns surrounding this AI technology?",
            "How might this technology change the job market?",
            "What are the current limitations of these AI systems?",
            "How is this technology being regulated?",
        ],
    },
    TopicDomain {
        name: "medicine",
        keywords: &[
            "disease",
            "treatment",
            "patient",
            "clinical",
            "medical",
            "therapy",
            "vaccine",
            "health",
        ],
        questions: &[
            "What are the side effects or risks of these treatments?",
            "How accessible are these treatments worldwide?",
            "What does current clinical research suggest?",
            "How has treatment changed over the past decade?",
        ],
    },
    TopicDomain {
        name: "technology",
        keywords: &[
            "software",
            "hardware",
            "computer",
            "internet",
            "digital",
            "programming",
            "device",
        ],
        questions: &[
            "What are the security implications of this technology?",
            "How does this compare to competing technologies?",
            "What skills are needed to work with this technology?",
            "What is the adoption rate of this technology?",
        ],
    },
    TopicDomain {
        name: "physics",
        keywords: &[
            "quantum",
            "particle",
            "relativity",
            "energy",
            "gravity",
            "physics",
            "electron",
        ],
        questions: &[
            "What experiments have confirmed these theories?",
            "What are the practical applications of this physics?",
            "Which questions in this area remain unsolved?",
            "How did scientists first discover this phenomenon?",
        ],
    },
    TopicDomain {
        name: "business",
        keywords: &["market", "company", "revenue", "investment", "economy", "profit", "startup"],
        questions: &[
            "What are the main risks for investors in this market?",
            "Who are the leading competitors in this space?",
            "How has the market size changed in recent years?",
            "What business models are most successful here?",
        ],
    },
    TopicDomain {
        name: "environment",
        keywords: &[
            "climate",
            "emission",
            "pollution",
            "renewable",
            "ecosystem",
            "carbon",
            "sustainab*",
        ],
        questions: &[
            "What policies are most effective at addressing this issue?",
            "How does this affect biodiversity?",
            "What can individuals do to help?",
            "What are the economic costs of inaction?",
        ],
    },
    TopicDomain {
        name: "psychology",
        keywords: &[
            "behavior",
            "behaviour",
            "cognitive",
            "mental",
            "emotion",
            "psycholog*",
            "brain",
        ],
        questions: &[
            "What are the main psychological theories behind this?",
            "How does this affect mental health?",
            "What do recent studies reveal about this behavior?",
            "How do cultural differences influence this?",
        ],
    },
    TopicDomain {
        name: "politics",
        keywords: &[
            "government",
            "election",
            "policy",
            "political",
            "democracy",
            "legislation",
            "president",
        ],
        questions: &[
            "What are the arguments on each side of this debate?",
            "How have public opinions shifted on this issue?",
            "What international perspectives exist on this?",
            "What legislation is currently being considered?",
        ],
    },
    TopicDomain {
        name: "entertainment",
        keywords: &["film", "movie", "television", "series", "celebrity", "hollywood", "award"],
        questions: &[
            "What were the critical reactions to this work?",
            "How did this influence popular culture?",
            "What were the box office or viewership results?",
            "Are there any upcoming projects related to this?",
        ],
    },
    TopicDomain {
        name: "music",
        keywords: &["music", "album", "song", "band", "singer", "concert", "genre"],
        questions: &[
            "What musical influences shaped this work?",
            "How was this received by critics and fans?",
            "What impact did this have on the genre?",
            "Which collaborations were most significant?",
        ],
    },
    TopicDomain {
        name: "sports",
        keywords: &["team", "player", "championship", "league", "tournament", "coach", "season"],
        questions: &[
            "What were the defining moments of this career or season?",
            "How do these statistics compare to historical records?",
            "What training methods contributed to this success?",
            "Who are the main rivals in this competition?",
        ],
    },
    TopicDomain {
        name: "history",
        keywords: &["century", "war", "empire", "ancient", "historical", "revolution", "dynasty"],
        questions: &[
            "What were the long-term consequences of these events?",
            "How do historians interpret this period differently?",
            "What primary sources exist from this time?",
            "How does this period compare to similar eras?",
        ],
    },
];

const STAR_MARKERS: &[&str] = &["actor", "actress", "star"];

const STAR_QUESTIONS: &[&str] = &[
    "What are this performer's most acclaimed roles?",
    "How did their career begin?",
    "What awards or nominations have they received?",
    "What projects are they working on next?",
];

/// Report words that each add one fixed question
const CONTENT_PROMPTS: &[(&str, &str)] = &[
    ("challenge", "What are the biggest challenges still to be overcome?"),
    ("future", "What developments can we expect in the coming years?"),
    ("application", "What are the most promising real-world applications?"),
    ("controvers", "What are the main points of controversy?"),
    ("compare", "How does this compare to the alternatives?"),
    ("history", "How has this evolved historically?"),
    ("example", "Can you give more concrete examples?"),
];

const GENERIC_QUESTIONS: &[&str] = &[
    "What are the key takeaways from this research?",
    "What sources would you recommend for learning more?",
    "How does this topic affect everyday life?",
    "What questions remain unanswered in this area?",
];

/// Capitalized words that are not proper nouns
const PROPER_NOUN_STOPLIST: &[&str] = &[
    "The", "This", "That", "These", "Those", "There", "Their", "They", "And", "But", "For",
    "However", "Also", "Its", "With", "From", "When", "What", "Which", "While", "Some", "Many",
    "Most", "Other", "Such", "Each", "One", "Two", "Key", "Research", "Report", "Summary",
    "Overview", "Conclusion", "Introduction", "Section",
];

fn subject_questions(subject: &str) -> [String; 4] {
    [
        format!("What are the most recent developments related to {}?", subject),
        format!("How has {} influenced its field over time?", subject),
        format!("What are common misconceptions about {}?", subject),
        format!("Who are the key people or organizations connected to {}?", subject),
    ]
}

/// Compiled keyword patterns, parallel to [`TOPIC_DOMAINS`]
static DOMAIN_PATTERNS: LazyLock<Vec<Vec<Regex>>> = LazyLock::new(|| {
    TOPIC_DOMAINS
        .iter()
        .map(|domain| domain.keywords.iter().map(|k| keyword_pattern(k)).collect())
        .collect()
});

static STAR_PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| STAR_MARKERS.iter().map(|m| keyword_pattern(m)).collect());

fn keyword_pattern(keyword: &str) -> Regex {
    let pattern = match keyword.strip_suffix('*') {
        Some(stem) => format!(r"(?i)\b{}\w*", regex::escape(stem)),
        None => format!(r"(?i)\b{}(?:s|es)?\b", regex::escape(keyword)),
    };
    Regex::new(&pattern).expect("Invalid regex: topic keyword")
}

/// Score every topic domain in table order.
pub fn score_domains(report: &str, query: &str) -> Vec<(&'static TopicDomain, usize)> {
    TOPIC_DOMAINS
        .iter()
        .zip(DOMAIN_PATTERNS.iter())
        .map(|(domain, patterns)| {
            let score = patterns
                .iter()
                .map(|pattern| {
                    let in_query = if pattern.is_match(query) {
                        QUERY_KEYWORD_WEIGHT
                    } else {
                        0
                    };
                    in_query + pattern.find_iter(report).count()
                })
                .sum();
            (domain, score)
        })
        .collect()
}

/// Domains scoring at least `max(2, 0.2 * best)`, in table order.
pub fn relevant_domains(report: &str, query: &str) -> Vec<&'static TopicDomain> {
    let scores = score_domains(report, query);
    let best = scores.iter().map(|(_, s)| *s).max().unwrap_or(0);
    let threshold = MIN_RELEVANT_SCORE.max(RELATIVE_RELEVANCE * best as f64);

    scores
        .into_iter()
        .filter(|(_, score)| *score as f64 >= threshold)
        .map(|(domain, _)| domain)
        .collect()
}

/// Most frequent capitalized, non sentence-initial word; earliest wins ties.
pub fn main_subject(report: &str) -> Option<String> {
    let stoplist: HashSet<&str> = PROPER_NOUN_STOPLIST.iter().copied().collect();
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut seen: Vec<String> = Vec::new();

    for sentence in LINE_OR_SENTENCE.split(report) {
        let sentence = sentence
            .trim_start_matches(|c: char| matches!(c, '#' | '*' | '-') || c.is_whitespace());

        for word in sentence.split_whitespace().skip(1) {
            let word = word.trim_matches(|c: char| !c.is_alphanumeric());
            let capitalized = word.chars().next().is_some_and(char::is_uppercase);
            if !capitalized || word.chars().count() <= 2 || stoplist.contains(word) {
                continue;
            }

            let count = counts.entry(word.to_string()).or_insert(0);
            if *count == 0 {
                seen.push(word.to_string());
            }
            *count += 1;
        }
    }

    let mut best: Option<(&String, usize)> = None;
    for word in &seen {
        let count = counts.get(word).copied().unwrap_or(0);
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((word, count));
        }
    }
    best.map(|(word, _)| word.clone())
}

/// Follow-up question generator with an injectable random source
pub struct FollowUpGenerator {
    rng: StdRng,
}

impl Default for FollowUpGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl FollowUpGenerator {
    /// Entropy-seeded generator
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible generator
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::with_seed)
    }

    /// The full deterministic candidate pool, duplicates removed.
    pub fn candidates(&self, report: &str, query: &str) -> Vec<String> {
        let report_lower = report.to_lowercase();
        let mut pool: Vec<String> = Vec::new();

        let domains = relevant_domains(report, query);
        debug!(
            domains = ?domains.iter().map(|d| d.name).collect::<Vec<_>>(),
            "Relevant follow-up domains"
        );

        for domain in domains {
            pool.extend(domain.questions.iter().map(|q| q.to_string()));
            if domain.name == "entertainment" && STAR_PATTERNS.iter().any(|p| p.is_match(report)) {
                pool.extend(STAR_QUESTIONS.iter().map(|q| q.to_string()));
            }
        }

        pool.extend(
            CONTENT_PROMPTS
                .iter()
                .filter(|(word, _)| report_lower.contains(word))
                .map(|(_, question)| question.to_string()),
        );

        let subject = main_subject(report).unwrap_or_else(|| {
            let topic = query.trim();
            if topic.is_empty() {
                "this topic".to_string()
            } else {
                topic.to_string()
            }
        });
        pool.extend(subject_questions(&subject));

        let mut seen = HashSet::new();
        pool.retain(|q| seen.insert(q.clone()));

        if pool.len() < QUESTION_COUNT {
            pool.extend(
                GENERIC_QUESTIONS
                    .iter()
                    .map(|q| q.to_string())
                    .filter(|q| seen.insert(q.clone())),
            );
        }

        pool
    }

    /// Shuffle the candidate pool and keep the first [`QUESTION_COUNT`].
    pub fn generate(&mut self, report: &str, query: &str) -> Vec<String> {
        let mut pool = self.candidates(report, query);
        pool.shuffle(&mut self.rng);
        pool.truncate(QUESTION_COUNT);
        pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AI_REPORT: &str = "Machine learning has transformed industry. \
        Deep learning models now power search at Google. Researchers at Google \
        and OpenAI disagree about the future of machine learning. \
        A key challenge remains energy use.";

    fn names(domains: &[&TopicDomain]) -> Vec<&'static str> {
        domains.iter().map(|d| d.name).collect()
    }

    #[test]
    fn test_every_domain_has_four_questions() {
        assert_eq!(TOPIC_DOMAINS.len(), 12);
        for domain in TOPIC_DOMAINS {
            assert_eq!(domain.questions.len(), 4, "{}", domain.name);
        }
    }

    #[test]
    fn test_query_keywords_weigh_three() {
        let scores = score_domains("", "machine learning basics");
        let (_, ai) = scores.iter().find(|(d, _)| d.name == "ai").unwrap();
        assert_eq!(*ai, 3);
    }

    #[test]
    fn test_report_occurrences_weigh_one() {
        let scores = score_domains("The market grew. Another market shrank.", "");
        let (_, business) = scores.iter().find(|(d, _)| d.name == "business").unwrap();
        assert_eq!(*business, 2);
    }

    #[test]
    fn test_relevance_threshold() {
        // ai scores 3 (query) + 3 (report); physics scores 1 (energy)
        let relevant = relevant_domains(AI_REPORT, "machine learning");
        assert_eq!(names(&relevant), vec!["ai"]);

        assert!(relevant_domains("Nothing to see here.", "hello").is_empty());
    }

    fn score_of(scores: &[(&TopicDomain, usize)], name: &str) -> usize {
        scores
            .iter()
            .find(|(d, _)| d.name == name)
            .map(|(_, s)| *s)
            .unwrap_or(0)
    }

    #[test]
    fn test_keywords_match_whole_words() {
        let report = "Open source software changed how teams ship software. \
            Most software today depends on shared libraries, and awareness of licensing has grown.";

        let scores = score_domains(report, "open source software");
        assert_eq!(score_of(&scores, "technology"), 6);
        assert_eq!(score_of(&scores, "history"), 0);
        assert_eq!(names(&relevant_domains(report, "open source software")), vec!["technology"]);
    }

    #[test]
    fn test_ai_matches_next_to_punctuation() {
        assert_eq!(score_of(&score_domains("", "What is AI?"), "ai"), 3);
        assert_eq!(score_of(&score_domains("AI is everywhere. Modern AI, AI.", ""), "ai"), 3);
        assert_eq!(score_of(&score_domains("The rain fell on Spain.", ""), "ai"), 0);
    }

    #[test]
    fn test_stems_and_plurals() {
        let report = "Sustainability matters. Psychological studies of patients.";
        let scores = score_domains(report, "");
        assert_eq!(score_of(&scores, "environment"), 1);
        assert_eq!(score_of(&scores, "psychology"), 1);
        assert_eq!(score_of(&scores, "medicine"), 1);
    }

    #[test]
    fn test_main_subject_skips_sentence_start() {
        let report =
            "Scientists at IBM built chips. Later IBM and Google raced. The Google team won.";
        assert_eq!(main_subject(report).as_deref(), Some("IBM"));
        assert_eq!(main_subject("Lowercase only text here."), None);
    }

    #[test]
    fn test_candidates_include_domain_content_and_subject() {
        let generator = FollowUpGenerator::with_seed(7);
        let pool = generator.candidates(AI_REPORT, "machine learning");

        assert!(pool.contains(&"How is this technology being regulated?".to_string()));
        assert!(
            pool.contains(&"What are the biggest challenges still to be overcome?".to_string())
        );
        assert!(pool.contains(&"What developments can we expect in the coming years?".to_string()));
        assert!(pool.contains(&"What are common misconceptions about Google?".to_string()));
    }

    #[test]
    fn test_star_batch_needs_marker() {
        let generator = FollowUpGenerator::with_seed(1);
        let report = "The film won an award. The movie lead actor gave a speech.";
        let pool = generator.candidates(report, "film");
        assert!(pool.contains(&STAR_QUESTIONS[0].to_string()));

        let pool = generator.candidates("The film won an award. The movie ran long.", "film");
        assert!(!pool.contains(&STAR_QUESTIONS[0].to_string()));

        let pool = generator.candidates("The film started late. The movie won an award.", "film");
        assert!(!pool.contains(&STAR_QUESTIONS[0].to_string()));
    }

    #[test]
    fn test_subject_falls_back_to_query() {
        let generator = FollowUpGenerator::with_seed(3);
        let pool = generator.candidates("", "tea ceremonies");
        assert_eq!(pool.len(), 4);
        assert!(
            pool.contains(&"How has tea ceremonies influenced its field over time?".to_string())
        );
    }

    #[test]
    fn test_generate_draws_from_pool() {
        let mut generator = FollowUpGenerator::new();
        let pool = generator.candidates(AI_REPORT, "machine learning");
        for _ in 0..5 {
            let questions = generator.generate(AI_REPORT, "machine learning");
            assert_eq!(questions.len(), QUESTION_COUNT);
            assert!(questions.iter().all(|q| pool.contains(q)));
        }
    }

    #[test]
    fn test_seeded_generators_agree() {
        let a = FollowUpGenerator::with_seed(42).generate(AI_REPORT, "machine learning");
        let b = FollowUpGenerator::with_seed(42).generate(AI_REPORT, "machine learning");
        assert_eq!(a, b);
    }
}
