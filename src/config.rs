//! Configuration types for contributor bot detection.

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for the contributor classifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotDetectionConfig {
    /// Which analyzers run and how their verdicts merge
    pub detection: DetectionConfig,

    /// Username lexicon settings
    pub username: UsernameConfig,

    /// Commit message uniformity settings
    pub messages: MessageConfig,

    /// Commit timing settings
    pub timing: TimingConfig,

    /// Inbound sampling limits
    pub sampling: SamplingConfig,
}

impl BotDetectionConfig {
    /// Load configuration from a JSON or YAML file.
    ///
    /// Files ending in `.yaml` or `.yml` are parsed as YAML, everything else
    /// as JSON. The loaded configuration is validated before it is returned.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;

        let config: Self = if path.extension().is_some_and(|e| e == "yaml" || e == "yml") {
            serde_yaml::from_str(&content)
                .with_context(|| format!("invalid YAML config {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("invalid JSON config {}", path.display()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the analyzers cannot work with.
    pub fn validate(&self) -> Result<()> {
        let m = &self.messages;
        ensure!(
            (0.0..=1.0).contains(&m.similarity_threshold),
            "messages.similarity_threshold must be within 0.0..=1.0, got {}",
            m.similarity_threshold
        );
        ensure!(
            (0.0..=1.0).contains(&m.automation_threshold),
            "messages.automation_threshold must be within 0.0..=1.0, got {}",
            m.automation_threshold
        );
        ensure!(m.min_messages > 0, "messages.min_messages must be at least 1");
        ensure!(
            m.short_message_length > 0,
            "messages.short_message_length must be at least 1"
        );
        ensure!(
            m.custom_keywords.iter().all(|k| !k.trim().is_empty()),
            "messages.custom_keywords must not contain empty entries"
        );

        ensure!(
            self.username.custom_patterns.iter().all(|p| !p.trim().is_empty()),
            "username.custom_patterns must not contain empty entries"
        );

        let t = &self.timing;
        ensure!(t.min_timestamps > 0, "timing.min_timestamps must be at least 1");
        ensure!(
            t.min_regularity_samples >= 2,
            "timing.min_regularity_samples must be at least 2"
        );
        for (name, value) in [
            ("timing.max_commits_per_day", t.max_commits_per_day),
            (
                "timing.max_interval_std_dev_minutes",
                t.max_interval_std_dev_minutes,
            ),
            ("timing.max_mean_interval_minutes", t.max_mean_interval_minutes),
        ] {
            ensure!(
                value.is_finite() && value > 0.0,
                "{} must be a positive finite number, got {}",
                name,
                value
            );
        }

        ensure!(
            self.sampling.max_commit_messages > 0,
            "sampling.max_commit_messages must be at least 1"
        );

        Ok(())
    }
}

/// Detection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Enable username lexicon matching
    pub username_analysis: bool,

    /// Enable commit message uniformity analysis
    pub message_analysis: bool,

    /// Enable commit timing analysis
    pub timing_analysis: bool,

    /// Let timing indicators set the bot verdict.
    /// Off by default: timing is advisory evidence only.
    pub timing_sets_verdict: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            username_analysis: true,
            message_analysis: true,
            timing_analysis: true,
            timing_sets_verdict: false,
        }
    }
}

/// Username lexicon settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UsernameConfig {
    /// Extra substrings checked after the built-in lexicon
    pub custom_patterns: Vec<String>,
}

/// Commit message analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    /// Minimum sample size before messages are analyzed
    pub min_messages: usize,

    /// Dominant-structure ratio above which a contributor is a bot
    pub similarity_threshold: f64,

    /// Automation keyword ratio above which a contributor is a bot
    pub automation_threshold: f64,

    /// Messages shorter than this (in chars) count as very short
    pub short_message_length: usize,

    /// Extra automation keywords checked after the built-in list
    pub custom_keywords: Vec<String>,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            min_messages: 5,
            similarity_threshold: 0.8,
            automation_threshold: 0.7,
            short_message_length: 30,
            custom_keywords: vec![],
        }
    }
}

/// Commit timing analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Minimum timestamps before timing is analyzed
    pub min_timestamps: usize,

    /// Commits per day above which frequency is flagged
    pub max_commits_per_day: f64,

    /// Minimum timestamps for the interval regularity check
    pub min_regularity_samples: usize,

    /// Interval standard deviation (minutes) below which timing is regular
    pub max_interval_std_dev_minutes: f64,

    /// Mean interval (minutes) below which regular timing is flagged
    pub max_mean_interval_minutes: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            min_timestamps: 10,
            max_commits_per_day: 50.0,
            min_regularity_samples: 6,
            max_interval_std_dev_minutes: 1.0,
            max_mean_interval_minutes: 60.0,
        }
    }
}

/// Inbound sampling limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Maximum commit messages kept per contributor
    pub max_commit_messages: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            max_commit_messages: 50,
        }
    }
}
