//! Classification results and the bots/humans partition.

use crate::record::ContributorRecord;
use serde::{Deserialize, Serialize};

/// Verdict for one contributor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Whether the contributor is automated
    pub is_bot: bool,

    /// Distinct evidence strings in detection order
    pub indicators: Vec<String>,

    /// Dominant message structure ratio (0.0-1.0)
    pub message_similarity_score: f64,
}

impl ClassificationResult {
    /// Build a result, dropping repeated indicators but keeping the first
    /// occurrence of each.
    pub fn new(is_bot: bool, indicators: Vec<String>, message_similarity_score: f64) -> Self {
        let mut distinct: Vec<String> = Vec::with_capacity(indicators.len());
        for indicator in indicators {
            if !distinct.contains(&indicator) {
                distinct.push(indicator);
            }
        }

        Self {
            is_bot,
            indicators: distinct,
            message_similarity_score,
        }
    }
}

/// A contributor paired with its verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedContributor {
    /// Input record, unchanged
    pub record: ContributorRecord,
    /// Verdict computed for the record
    pub result: ClassificationResult,
}

impl ClassifiedContributor {
    /// Returns true if the contributor was classified as a bot.
    pub fn is_bot(&self) -> bool {
        self.result.is_bot
    }
}

/// Summed activity over a group of contributors.
///
/// Sums saturate at `u64::MAX` rather than overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityTotals {
    /// Number of contributors summed
    pub contributors: usize,
    /// Total commits
    pub commits: u64,
    /// Total pull requests
    pub pull_requests: u64,
    /// Total issues
    pub issues: u64,
}

impl ActivityTotals {
    fn sum<'a>(items: impl IntoIterator<Item = &'a ClassifiedContributor>) -> Self {
        items.into_iter().fold(Self::default(), |mut acc, c| {
            acc.contributors += 1;
            acc.commits = acc.commits.saturating_add(c.record.commit_count);
            acc.pull_requests = acc.pull_requests.saturating_add(c.record.pull_request_count);
            acc.issues = acc.issues.saturating_add(c.record.issue_count);
            acc
        })
    }
}

/// Stable split of classified contributors.
///
/// Each side keeps the relative order of the input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    /// Contributors classified as bots
    pub bots: Vec<ClassifiedContributor>,
    /// Contributors classified as humans
    pub humans: Vec<ClassifiedContributor>,
}

impl Partition {
    /// Split contributors on their verdict.
    pub fn from_classified(classified: impl IntoIterator<Item = ClassifiedContributor>) -> Self {
        let (bots, humans) = classified.into_iter().partition(|c| c.is_bot());
        Self { bots, humans }
    }

    /// Total number of contributors on both sides.
    pub fn len(&self) -> usize {
        self.bots.len() + self.humans.len()
    }

    /// Returns true if there are no contributors on either side.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `n` humans with the most commits; ties keep input order.
    pub fn top_humans(&self, n: usize) -> Vec<&ClassifiedContributor> {
        let mut ranked: Vec<&ClassifiedContributor> = self.humans.iter().collect();
        ranked.sort_by(|a, b| b.record.commit_count.cmp(&a.record.commit_count));
        ranked.truncate(n);
        ranked
    }

    /// Activity summed over human contributors only.
    pub fn human_totals(&self) -> ActivityTotals {
        ActivityTotals::sum(&self.humans)
    }

    /// Activity summed over bot contributors only.
    pub fn bot_totals(&self) -> ActivityTotals {
        ActivityTotals::sum(&self.bots)
    }

    /// Summarize the partition for reporting.
    pub fn report(&self, top_n: usize) -> ClassificationReport {
        ClassificationReport {
            humans: self.human_totals(),
            bots: self.bot_totals(),
            top_humans: self
                .top_humans(top_n)
                .into_iter()
                .map(|c| RankedContributor {
                    username: c.record.username.clone(),
                    display_name: c.record.display_name.clone(),
                    commit_count: c.record.commit_count,
                    pull_request_count: c.record.pull_request_count,
                    issue_count: c.record.issue_count,
                })
                .collect(),
            detected_bots: self
                .bots
                .iter()
                .map(|c| DetectedBot {
                    username: c.record.username.clone(),
                    commit_count: c.record.commit_count,
                    message_similarity_score: c.result.message_similarity_score,
                    indicators: c.result.indicators.clone(),
                })
                .collect(),
        }
    }
}

/// Human contributor entry in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedContributor {
    /// Contributor handle
    pub username: String,
    /// Human-readable name, if known
    pub display_name: Option<String>,
    /// Total commits
    pub commit_count: u64,
    /// Total pull requests opened
    pub pull_request_count: u64,
    /// Total issues opened
    pub issue_count: u64,
}

/// Bot entry in a report, with its evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedBot {
    /// Bot handle
    pub username: String,
    /// Total commits
    pub commit_count: u64,
    /// Dominant message structure ratio (0.0-1.0)
    pub message_similarity_score: f64,
    /// Evidence behind the verdict
    pub indicators: Vec<String>,
}

/// Serializable summary of a classification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    /// Activity summed over humans
    pub humans: ActivityTotals,
    /// Activity summed over bots
    pub bots: ActivityTotals,
    /// Humans with the most commits, highest first
    pub top_humans: Vec<RankedContributor>,
    /// Every bot, in input order
    pub detected_bots: Vec<DetectedBot>,
}
