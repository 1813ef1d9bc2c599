//! Username lexicon detector.
//!
//! Flags contributor handles containing automation-indicative substrings.
//! Matching is case-insensitive substring containment, so `cicero` matches
//! `ci`; that false positive is accepted.

use super::{Detector, DetectorResult};
use crate::record::ContributorRecord;

/// Built-in username lexicon, checked in this order.
pub static USERNAME_PATTERNS: &[&str] = &[
    "bot",
    "[bot]",
    "-bot",
    "ci",
    "-ci",
    "automated",
    "automation",
    "auto-",
    "dependabot",
    "renovate",
    "greenkeeper",
    "github-actions",
    "azure-pipelines",
    "travis",
    "deploy",
    "deployer",
    "builder",
];

/// Outcome of matching one username against the lexicon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsernameMatch {
    /// At least one pattern matched
    pub flagged: bool,
    /// One indicator per matching pattern
    pub indicators: Vec<String>,
}

/// Username lexicon detector.
pub struct UsernameAnalyzer {
    /// Patterns as configured, paired with their lowercase form
    patterns: Vec<(String, String)>,
}

impl UsernameAnalyzer {
    /// Create an analyzer using the built-in lexicon only.
    pub fn new() -> Self {
        Self::with_custom_patterns(std::iter::empty::<&str>())
    }

    /// Create an analyzer with extra patterns appended to the built-in lexicon.
    pub fn with_custom_patterns<I, S>(custom: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut patterns: Vec<(String, String)> = Vec::new();
        let all = USERNAME_PATTERNS
            .iter()
            .map(|p| p.to_string())
            .chain(custom.into_iter().map(|p| p.as_ref().trim().to_string()));

        for pattern in all {
            let lower = pattern.to_lowercase();
            if !patterns.iter().any(|(_, l)| *l == lower) {
                patterns.push((pattern, lower));
            }
        }

        Self { patterns }
    }

    /// Match a username against every pattern.
    pub fn classify(&self, username: &str) -> UsernameMatch {
        let lower = username.to_lowercase();
        let indicators: Vec<String> = self
            .patterns
            .iter()
            .filter(|(_, pattern)| lower.contains(pattern.as_str()))
            .map(|(display, _)| format!("Username contains '{}'", display))
            .collect();

        UsernameMatch {
            flagged: !indicators.is_empty(),
            indicators,
        }
    }

    /// Number of patterns checked.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

impl Default for UsernameAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for UsernameAnalyzer {
    fn analyze(&self, record: &ContributorRecord) -> DetectorResult {
        let m = self.classify(&record.username);
        DetectorResult::new(m.flagged).with_indicators(m.indicators)
    }

    fn name(&self) -> &'static str {
        "username"
    }
}
