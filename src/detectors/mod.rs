//! Bot detection modules.
//!
//! Each detector inspects one aspect of a contributor's activity and returns
//! a verdict plus the evidence behind it.

pub mod messages;
pub mod normalize;
pub mod timing;
pub mod username;

pub use messages::{MessageAnalysis, MessageAnalyzer, AUTOMATION_KEYWORDS};
pub use normalize::normalize_message;
pub use timing::TimingAnalyzer;
pub use username::{UsernameAnalyzer, UsernameMatch, USERNAME_PATTERNS};

use crate::record::ContributorRecord;

/// Result from a detector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectorResult {
    /// Whether this detector concluded "bot"
    pub is_bot: bool,
    /// Evidence, in detection order
    pub indicators: Vec<String>,
    /// Message similarity measured by this detector, if any
    pub similarity_score: Option<f64>,
}

impl DetectorResult {
    /// Create a new detector result.
    pub fn new(is_bot: bool) -> Self {
        Self {
            is_bot,
            indicators: vec![],
            similarity_score: None,
        }
    }

    /// Add an indicator.
    pub fn with_indicator(mut self, indicator: impl Into<String>) -> Self {
        self.indicators.push(indicator.into());
        self
    }

    /// Add several indicators.
    pub fn with_indicators<I, S>(mut self, indicators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indicators.extend(indicators.into_iter().map(Into::into));
        self
    }

    /// Attach the measured similarity score.
    pub fn with_similarity(mut self, score: f64) -> Self {
        self.similarity_score = Some(score);
        self
    }
}

/// Trait for contributor detectors.
///
/// Detectors are pure: the same record always yields the same result.
pub trait Detector: Send + Sync {
    /// Analyze the contributor and return a detection result.
    fn analyze(&self, record: &ContributorRecord) -> DetectorResult;

    /// Get the detector name.
    fn name(&self) -> &'static str;
}

/// Lowercased copy of each entry, for case-insensitive containment checks.
pub(crate) fn lowercase_all<I, S>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .map(|e| e.as_ref().to_lowercase())
        .collect()
}
