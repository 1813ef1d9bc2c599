//! Contributor classifier: runs the detectors and merges their verdicts.

use crate::classification::{ClassificationResult, ClassifiedContributor, Partition};
use crate::config::BotDetectionConfig;
use crate::detectors::{Detector, MessageAnalyzer, TimingAnalyzer, UsernameAnalyzer};
use crate::record::ContributorRecord;
use anyhow::Context;
use std::sync::Arc;
use tracing::{debug, info};

/// Classifies contributors as bots or humans.
///
/// Detectors run in a fixed order (username, messages, timing) so indicator
/// order is reproducible. A contributor is a bot when any detector says so.
pub struct ContributorClassifier {
    /// Configuration
    config: BotDetectionConfig,
    /// Enabled detectors, in evaluation order
    detectors: Vec<Box<dyn Detector>>,
}

impl ContributorClassifier {
    /// Create a classifier from configuration.
    pub fn new(config: BotDetectionConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let mut detectors: Vec<Box<dyn Detector>> = Vec::new();
        if config.detection.username_analysis {
            detectors.push(Box::new(UsernameAnalyzer::with_custom_patterns(
                &config.username.custom_patterns,
            )));
        }
        if config.detection.message_analysis {
            detectors.push(Box::new(MessageAnalyzer::new(&config.messages)));
        }
        if config.detection.timing_analysis {
            detectors.push(Box::new(TimingAnalyzer::new(
                &config.timing,
                config.detection.timing_sets_verdict,
            )));
        }

        info!(
            detectors = ?detectors.iter().map(|d| d.name()).collect::<Vec<_>>(),
            timing_sets_verdict = config.detection.timing_sets_verdict,
            "Contributor classifier ready"
        );

        Ok(Self { config, detectors })
    }

    /// Create with default configuration.
    pub fn with_defaults() -> Self {
        let config = BotDetectionConfig::default();
        let detectors: Vec<Box<dyn Detector>> = vec![
            Box::new(UsernameAnalyzer::new()),
            Box::new(MessageAnalyzer::new(&config.messages)),
            Box::new(TimingAnalyzer::new(&config.timing, false)),
        ];
        Self { config, detectors }
    }

    /// Active configuration.
    pub fn config(&self) -> &BotDetectionConfig {
        &self.config
    }

    /// Classify one contributor.
    pub fn classify(&self, record: &ContributorRecord) -> ClassificationResult {
        let mut is_bot = false;
        let mut indicators = Vec::new();
        let mut similarity = 0.0;

        for detector in &self.detectors {
            let result = detector.analyze(record);
            debug!(
                username = %record.username,
                detector = detector.name(),
                is_bot = result.is_bot,
                indicators = result.indicators.len(),
                "Detector complete"
            );

            is_bot |= result.is_bot;
            indicators.extend(result.indicators);
            if let Some(score) = result.similarity_score {
                similarity = score;
            }
        }

        let result = ClassificationResult::new(is_bot, indicators, similarity);
        debug!(
            username = %record.username,
            is_bot = result.is_bot,
            similarity = result.message_similarity_score,
            "Contributor classified"
        );
        result
    }

    /// Classify one contributor and keep the record alongside its verdict.
    pub fn classify_record(&self, record: ContributorRecord) -> ClassifiedContributor {
        let result = self.classify(&record);
        ClassifiedContributor { record, result }
    }

    /// Classify every record and split into bots and humans, preserving
    /// input order on each side.
    pub fn partition(&self, records: impl IntoIterator<Item = ContributorRecord>) -> Partition {
        let partition =
            Partition::from_classified(records.into_iter().map(|r| self.classify_record(r)));
        info!(
            bots = partition.bots.len(),
            humans = partition.humans.len(),
            "Contributors partitioned"
        );
        partition
    }

    /// Classify records concurrently on the blocking pool.
    ///
    /// Results come back in input order.
    pub async fn classify_batch(
        self: &Arc<Self>,
        records: Vec<ContributorRecord>,
    ) -> anyhow::Result<Vec<ClassifiedContributor>> {
        if records.is_empty() {
            return Ok(vec![]);
        }

        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let chunk_size = records.len().div_ceil(workers).max(1);

        let mut handles = Vec::new();
        let mut remaining = records.into_iter().peekable();
        while remaining.peek().is_some() {
            let chunk: Vec<ContributorRecord> = remaining.by_ref().take(chunk_size).collect();
            let classifier = Arc::clone(self);
            handles.push(tokio::task::spawn_blocking(move || {
                chunk
                    .into_iter()
                    .map(|r| classifier.classify_record(r))
                    .collect::<Vec<_>>()
            }));
        }

        let mut classified = Vec::new();
        for handle in handles {
            classified.extend(handle.await.context("classification worker failed")?);
        }

        debug!(count = classified.len(), "Batch classification complete");
        Ok(classified)
    }

    /// Concurrent counterpart of [`partition`](Self::partition).
    pub async fn partition_batch(
        self: &Arc<Self>,
        records: Vec<ContributorRecord>,
    ) -> anyhow::Result<Partition> {
        let classified = self.classify_batch(records).await?;
        let partition = Partition::from_classified(classified);
        info!(
            bots = partition.bots.len(),
            humans = partition.humans.len(),
            "Contributors partitioned"
        );
        Ok(partition)
    }
}

impl Default for ContributorClassifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}
