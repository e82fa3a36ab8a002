use std::collections::HashMap;

use regex::Regex;

use noesis_core::models::{DetectionMethod, KnowledgeGap, QueryLog};

/// Canonical topic form: lowercased, punctuation stripped, whitespace
/// collapsed. Misses of "Rust async?" and "rust ASYNC" group together.
pub fn normalize_topic(text: &str) -> String {
    // The pattern is a literal; it cannot fail to compile.
    let non_word = Regex::new(r"[^a-z0-9]+").unwrap();
    let lowered = text.to_lowercase();
    non_word
        .split(&lowered)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Queries that keep coming back empty are knowledge the users want and
/// the store lacks. Repeated misses raise both importance and detection
/// confidence.
pub fn detect(log: &QueryLog, sample: usize) -> Vec<KnowledgeGap> {
    let mut misses: HashMap<String, usize> = HashMap::new();
    for record in log.recent(sample) {
        if record.result_count == 0 {
            let topic = normalize_topic(&record.text);
            if !topic.is_empty() {
                *misses.entry(topic).or_default() += 1;
            }
        }
    }

    let mut topics: Vec<(String, usize)> = misses.into_iter().collect();
    topics.sort(); // deterministic output order

    topics
        .into_iter()
        .map(|(topic, count)| {
            let description = format!("{count} recent queries found nothing for this topic");
            KnowledgeGap::new(
                topic,
                description,
                (0.4 + 0.15 * count as f64).min(1.0),
                DetectionMethod::QueryPatterns,
                (0.5 + 0.1 * count as f64).min(1.0),
            )
        })
        .collect()
}
