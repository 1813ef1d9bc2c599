//! Commit message uniformity detector.
//!
//! Analyzes a contributor's sampled commit messages:
//! - Dominant structure ratio after normalization
//! - Automation keyword ratio
//! - Uniformly short messages (evidence only)

use super::normalize::normalize_message;
use super::{lowercase_all, Detector, DetectorResult};
use crate::config::MessageConfig;
use crate::record::ContributorRecord;
use std::collections::HashMap;

/// Built-in automation keywords, matched as case-insensitive substrings.
pub static AUTOMATION_KEYWORDS: &[&str] = &[
    "automated",
    "auto-generated",
    "automatic",
    "bump version",
    "update dependencies",
    "merge branch",
    "[skip ci]",
    "[ci skip]",
    "version bump",
    "update package",
    "dependency update",
];

/// Outcome of analyzing one contributor's messages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageAnalysis {
    /// Messages look automated
    pub is_bot: bool,
    /// Largest normalized group divided by the sample size
    pub similarity_score: f64,
    /// Fraction of messages containing an automation keyword
    pub automation_ratio: f64,
    /// Evidence, in detection order
    pub indicators: Vec<String>,
}

/// Message uniformity detector.
pub struct MessageAnalyzer {
    /// Lowercased keyword lexicon
    keywords: Vec<String>,
    /// Minimum messages for analysis
    min_messages: usize,
    /// Similarity ratio threshold
    similarity_threshold: f64,
    /// Automation keyword ratio threshold
    automation_threshold: f64,
    /// Length (in chars) below which a message is very short
    short_message_length: usize,
}

impl MessageAnalyzer {
    /// Create a message analyzer from configuration.
    pub fn new(config: &MessageConfig) -> Self {
        let mut keywords = lowercase_all(AUTOMATION_KEYWORDS);
        for keyword in lowercase_all(&config.custom_keywords) {
            let keyword = keyword.trim().to_string();
            if !keywords.contains(&keyword) {
                keywords.push(keyword);
            }
        }

        Self {
            keywords,
            min_messages: config.min_messages,
            similarity_threshold: config.similarity_threshold,
            automation_threshold: config.automation_threshold,
            short_message_length: config.short_message_length,
        }
    }

    /// Analyze a message sample.
    pub fn analyze_messages<S: AsRef<str>>(&self, messages: &[S]) -> MessageAnalysis {
        if messages.len() < self.min_messages {
            return MessageAnalysis::default();
        }

        let total = messages.len() as f64;
        let similarity_score = Self::dominant_group_size(messages) as f64 / total;

        let automated = messages
            .iter()
            .filter(|m| self.has_automation_keyword(m.as_ref()))
            .count();
        let automation_ratio = automated as f64 / total;

        let mut analysis = MessageAnalysis {
            is_bot: false,
            similarity_score,
            automation_ratio,
            indicators: vec![],
        };

        if similarity_score > self.similarity_threshold {
            analysis.is_bot = true;
            analysis.indicators.push(format!(
                "High message similarity: {:.0}% identical",
                similarity_score * 100.0
            ));
        }

        if automation_ratio > self.automation_threshold {
            analysis.is_bot = true;
            analysis.indicators.push(format!(
                "Automation keywords in {:.0}% of messages",
                automation_ratio * 100.0
            ));
        }

        if messages
            .iter()
            .all(|m| m.as_ref().chars().count() < self.short_message_length)
        {
            analysis.indicators.push(format!(
                "All messages very short (< {} chars)",
                self.short_message_length
            ));
        }

        analysis
    }

    /// Size of the largest group of messages sharing a normalized form.
    ///
    /// Ties go to the group encountered first.
    fn dominant_group_size<S: AsRef<str>>(messages: &[S]) -> usize {
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();

        for message in messages {
            let key = normalize_message(message.as_ref());
            let count = counts.entry(key.clone()).or_insert(0);
            if *count == 0 {
                order.push(key);
            }
            *count += 1;
        }

        let mut best = 0usize;
        for key in &order {
            let count = counts[key];
            if count > best {
                best = count;
            }
        }
        best
    }

    fn has_automation_keyword(&self, message: &str) -> bool {
        let lower = message.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k.as_str()))
    }
}

impl Default for MessageAnalyzer {
    fn default() -> Self {
        Self::new(&MessageConfig::default())
    }
}

impl Detector for MessageAnalyzer {
    fn analyze(&self, record: &ContributorRecord) -> DetectorResult {
        if record.commit_messages.is_empty() {
            return DetectorResult::new(false).with_similarity(0.0);
        }

        let analysis = self.analyze_messages(&record.commit_messages);
        DetectorResult::new(analysis.is_bot)
            .with_indicators(analysis.indicators)
            .with_similarity(analysis.similarity_score)
    }

    fn name(&self) -> &'static str {
        "messages"
    }
}
