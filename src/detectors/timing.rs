//! Commit timing detector.
//!
//! Analyzes commit timestamps for:
//! - Commit frequency per day
//! - Interval regularity (near-zero jitter at sub-hourly cadence)
//!
//! Timing is advisory: its indicators only set the verdict when
//! `sets_verdict` is enabled.

use super::{Detector, DetectorResult};
use crate::config::TimingConfig;
use crate::record::ContributorRecord;
use chrono::{DateTime, Utc};

/// Interval statistics for a sorted timestamp series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalStats {
    /// Mean interval in minutes
    pub mean_minutes: f64,
    /// Population standard deviation in minutes
    pub std_dev_minutes: f64,
}

/// Timing pattern detector.
pub struct TimingAnalyzer {
    /// Minimum timestamps for analysis
    min_timestamps: usize,
    /// Commits per day threshold
    max_commits_per_day: f64,
    /// Minimum timestamps for regularity scoring
    min_regularity_samples: usize,
    /// Interval standard deviation threshold in minutes
    max_std_dev: f64,
    /// Mean interval threshold in minutes
    max_mean_interval: f64,
    /// Whether indicators set the bot verdict
    sets_verdict: bool,
}

impl TimingAnalyzer {
    /// Create a timing analyzer from configuration.
    pub fn new(config: &TimingConfig, sets_verdict: bool) -> Self {
        Self {
            min_timestamps: config.min_timestamps,
            max_commits_per_day: config.max_commits_per_day,
            min_regularity_samples: config.min_regularity_samples,
            max_std_dev: config.max_interval_std_dev_minutes,
            max_mean_interval: config.max_mean_interval_minutes,
            sets_verdict,
        }
    }

    /// Analyze commit timestamps, in any order.
    ///
    /// Timestamps are a set: repeated instants count once.
    pub fn analyze_timing(&self, timestamps: &[DateTime<Utc>]) -> Vec<String> {
        let mut indicators = Vec::new();

        let mut sorted = timestamps.to_vec();
        sorted.sort();
        sorted.dedup();

        if sorted.len() < self.min_timestamps {
            return indicators;
        }

        let rate = Self::commits_per_day(&sorted);
        if rate > self.max_commits_per_day {
            indicators.push(format!("Very high frequency: {:.1} commits/day", rate));
        }

        if sorted.len() >= self.min_regularity_samples {
            if let Some(stats) = Self::interval_stats(&sorted) {
                if stats.std_dev_minutes < self.max_std_dev
                    && stats.mean_minutes < self.max_mean_interval
                {
                    indicators.push(format!(
                        "Highly regular commit timing: {:.1} min intervals",
                        stats.mean_minutes
                    ));
                }
            }
        }

        indicators
    }

    /// Commits per whole day of activity, counting at least one day.
    pub fn commits_per_day(sorted: &[DateTime<Utc>]) -> f64 {
        let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
            return 0.0;
        };
        let span_days = (*last - *first).num_days().max(1);
        sorted.len() as f64 / span_days as f64
    }

    /// Mean and population standard deviation of consecutive intervals.
    pub fn interval_stats(sorted: &[DateTime<Utc>]) -> Option<IntervalStats> {
        if sorted.len() < 2 {
            return None;
        }

        let intervals: Vec<f64> = sorted
            .windows(2)
            .map(|w| (w[1] - w[0]).num_milliseconds() as f64 / 60_000.0)
            .collect();

        let mean = intervals.iter().sum::<f64>() / intervals.len() as f64;
        let variance = intervals
            .iter()
            .map(|x| (x - mean).powi(2))
            .sum::<f64>()
            / intervals.len() as f64;

        Some(IntervalStats {
            mean_minutes: mean,
            std_dev_minutes: variance.sqrt(),
        })
    }
}

impl Default for TimingAnalyzer {
    fn default() -> Self {
        Self::new(&TimingConfig::default(), false)
    }
}

impl Detector for TimingAnalyzer {
    fn analyze(&self, record: &ContributorRecord) -> DetectorResult {
        let indicators = self.analyze_timing(&record.commit_timestamps);
        let is_bot = self.sets_verdict && !indicators.is_empty();
        DetectorResult::new(is_bot).with_indicators(indicators)
    }

    fn name(&self) -> &'static str {
        "timing"
    }
}
