//! Contributor activity records handed to the classifier.

use anyhow::{ensure, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Aggregated activity for one contributor.
///
/// Records are assembled by whatever collects repository activity and are
/// read-only to the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributorRecord {
    /// Unique contributor handle
    pub username: String,

    /// Human-readable name, if known
    #[serde(default)]
    pub display_name: Option<String>,

    /// Total commits attributed to the contributor
    #[serde(default)]
    pub commit_count: u64,

    /// Total pull requests opened
    #[serde(default)]
    pub pull_request_count: u64,

    /// Total issues opened
    #[serde(default)]
    pub issue_count: u64,

    /// Sampled commit messages, in encounter order
    #[serde(default)]
    pub commit_messages: Vec<String>,

    /// Commit instants; empty when unavailable.
    /// Treated as a set: repeated instants count once.
    #[serde(default)]
    pub commit_timestamps: Vec<DateTime<Utc>>,
}

impl ContributorRecord {
    /// Create an empty record for a contributor.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            display_name: None,
            commit_count: 0,
            pull_request_count: 0,
            issue_count: 0,
            commit_messages: vec![],
            commit_timestamps: vec![],
        }
    }

    /// Set the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Record one commit.
    ///
    /// The message is kept only while the sample holds fewer than
    /// `max_messages` entries; the count and timestamp are always recorded.
    pub fn record_commit(
        &mut self,
        message: impl Into<String>,
        timestamp: Option<DateTime<Utc>>,
        max_messages: usize,
    ) {
        self.commit_count = self.commit_count.saturating_add(1);

        if self.commit_messages.len() < max_messages {
            self.commit_messages.push(message.into());
        }

        if let Some(ts) = timestamp {
            self.commit_timestamps.push(ts);
        }
    }

    /// Record one opened pull request.
    pub fn record_pull_request(&mut self) {
        self.pull_request_count = self.pull_request_count.saturating_add(1);
    }

    /// Record one opened issue.
    pub fn record_issue(&mut self) {
        self.issue_count = self.issue_count.saturating_add(1);
    }

    /// Name to show in reports: display name when present, else username.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }

    /// Drop messages beyond the sample cap, keeping the earliest encountered.
    pub fn cap_messages(&mut self, max_messages: usize) {
        self.commit_messages.truncate(max_messages);
    }

    /// Load a JSON or YAML array of records.
    ///
    /// Usernames must be non-empty and unique.
    pub fn load_all(path: &Path) -> Result<Vec<Self>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read records {}", path.display()))?;

        let records: Vec<Self> = if path.extension().is_some_and(|e| e == "yaml" || e == "yml") {
            serde_yaml::from_str(&content)
                .with_context(|| format!("invalid YAML records {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("invalid JSON records {}", path.display()))?
        };

        let mut seen = std::collections::HashSet::new();
        for (idx, record) in records.iter().enumerate() {
            ensure!(
                !record.username.trim().is_empty(),
                "record {} has an empty username",
                idx
            );
            ensure!(
                seen.insert(record.username.as_str()),
                "duplicate username '{}'",
                record.username
            );
        }

        Ok(records)
    }
}
