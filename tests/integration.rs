//! Integration tests for contributor bot detection.
//!
//! These tests exercise the public API end to end: configuration parsing,
//! the individual detectors, the classifier's merge rules and the
//! bots/humans partition.

use chrono::{DateTime, Duration, TimeZone, Utc};
use contributor_bot_detection::config::{DetectionConfig, MessageConfig, TimingConfig};
use contributor_bot_detection::detectors::{
    Detector, MessageAnalyzer, TimingAnalyzer, UsernameAnalyzer, AUTOMATION_KEYWORDS,
    USERNAME_PATTERNS,
};
use contributor_bot_detection::{
    normalize_message, BotDetectionConfig, ContributorClassifier, ContributorRecord, Partition,
};
use std::sync::Arc;

fn minutes_apart(count: usize, step: i64) -> Vec<DateTime<Utc>> {
    let start = Utc.with_ymd_and_hms(2024, 9, 10, 0, 30, 0).unwrap();
    (0..count)
        .map(|i| start + Duration::minutes(step * i as i64))
        .collect()
}

fn human_record(username: &str, commits: u64) -> ContributorRecord {
    let mut record = ContributorRecord::new(username);
    let messages = [
        "Improve error message when the config file is missing",
        "Split the renderer into smaller focused modules",
        "Handle unicode usernames in the avatar cache",
        "Add benchmarks for the tokenizer hot path",
        "Remove unused feature flag from the settings page",
        "Clarify contributing guide around review etiquette",
    ];
    let start = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();
    let offsets = [0, 95, 1500, 2900, 3100, 8000, 8060, 11000, 14000, 20000];
    for (i, offset) in offsets.iter().enumerate() {
        record.record_commit(
            messages[i % messages.len()],
            Some(start + Duration::minutes(*offset)),
            6,
        );
    }
    record.commit_count = commits;
    record
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_default_config_is_valid() {
    let config = BotDetectionConfig::default();
    assert!(config.validate().is_ok());

    assert!(config.detection.username_analysis);
    assert!(config.detection.message_analysis);
    assert!(config.detection.timing_analysis);
    assert!(!config.detection.timing_sets_verdict);

    assert_eq!(config.messages.min_messages, 5);
    assert!((config.messages.similarity_threshold - 0.8).abs() < f64::EPSILON);
    assert!((config.messages.automation_threshold - 0.7).abs() < f64::EPSILON);
    assert_eq!(config.timing.min_timestamps, 10);
    assert_eq!(config.timing.min_regularity_samples, 6);
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "detection": {
            "timing_analysis": false
        },
        "username": {
            "custom_patterns": ["release-train"]
        },
        "messages": {
            "min_messages": 3,
            "custom_keywords": ["chore(release)"]
        }
    }"#;

    let config: BotDetectionConfig = serde_json::from_str(json).unwrap();
    assert!(!config.detection.timing_analysis);
    assert!(config.detection.message_analysis);
    assert_eq!(config.username.custom_patterns, vec!["release-train"]);
    assert_eq!(config.messages.min_messages, 3);
    assert_eq!(config.messages.short_message_length, 30);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("detection.json");
    std::fs::write(&path, r#"{"timing": {"max_commits_per_day": 20.0}}"#).unwrap();

    let config = BotDetectionConfig::from_path(&path).unwrap();
    assert_eq!(config.timing.max_commits_per_day, 20.0);
}

#[test]
fn test_config_file_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("detection.yaml");
    std::fs::write(&path, "messages:\n  automation_threshold: 2.0\n").unwrap();

    let err = BotDetectionConfig::from_path(&path).unwrap_err();
    assert!(err.to_string().contains("automation_threshold"));
}

// =============================================================================
// Username Detector Tests
// =============================================================================

#[test]
fn test_username_lexicon_contents() {
    for expected in ["bot", "[bot]", "-ci", "dependabot", "github-actions", "builder"] {
        assert!(USERNAME_PATTERNS.contains(&expected));
    }
}

#[test]
fn test_username_one_indicator_per_pattern() {
    let analyzer = UsernameAnalyzer::new();
    let m = analyzer.classify("GitHub-Actions-CI");
    assert!(m.flagged);
    assert_eq!(
        m.indicators,
        vec![
            "Username contains 'ci'",
            "Username contains '-ci'",
            "Username contains 'github-actions'",
        ]
    );
}

#[test]
fn test_username_deployer() {
    let m = UsernameAnalyzer::new().classify("prod-deployer");
    assert_eq!(
        m.indicators,
        vec!["Username contains 'deploy'", "Username contains 'deployer'"]
    );
}

// =============================================================================
// Message Normalizer Tests
// =============================================================================

#[test]
fn test_normalize_all_token_kinds() {
    assert_eq!(
        normalize_message("Release 2.4.1 on 2024-07-01 closes #88 (commit 9fceb02)"),
        "release <version> on <date> closes <issue> (commit <hash>)"
    );
}

#[test]
fn test_normalize_idempotent() {
    let samples = [
        "Bump lodash from 4.17.20 to 4.17.21",
        "Merge pull request #1234 from org/feature-branch",
        "Auto-generated docs for 3a4b5c6d7e8f",
        "   Whitespace   ",
        "Ünïcode Ümlauts 2020-02-02",
    ];
    for m in samples {
        let once = normalize_message(m);
        assert_eq!(normalize_message(&once), once);
    }
}

// =============================================================================
// Message Analyzer Tests
// =============================================================================

#[test]
fn test_automation_keyword_lexicon() {
    assert!(AUTOMATION_KEYWORDS.contains(&"[skip ci]"));
    assert!(AUTOMATION_KEYWORDS.contains(&"dependency update"));
}

#[test]
fn test_fewer_than_five_messages_never_flag() {
    let analyzer = MessageAnalyzer::default();
    let messages = vec!["Automated dependency update"; 4];
    let analysis = analyzer.analyze_messages(&messages);
    assert!(!analysis.is_bot);
    assert_eq!(analysis.similarity_score, 0.0);
    assert!(analysis.indicators.is_empty());
}

#[test]
fn test_ten_identical_messages() {
    let analyzer = MessageAnalyzer::default();
    let messages = vec!["Regenerate translations for every supported locale"; 10];
    let analysis = analyzer.analyze_messages(&messages);
    assert!(analysis.is_bot);
    assert_eq!(analysis.similarity_score, 1.0);
    assert!(analysis
        .indicators
        .contains(&"High message similarity: 100% identical".to_string()));
}

#[test]
fn test_bump_version_sequence() {
    let analyzer = MessageAnalyzer::default();
    let messages = [
        "Bump version to 1.2.3",
        "Bump version to 1.3.0",
        "Bump version to 2.0.0",
        "Bump version to 2.1.0",
        "Bump version to 2.2.0",
    ];
    let analysis = analyzer.analyze_messages(&messages);
    assert!(analysis.is_bot);
    assert_eq!(analysis.similarity_score, 1.0);
}

#[test]
fn test_similarity_percentage_rounding() {
    let analyzer = MessageAnalyzer::new(&MessageConfig::default());
    let mut messages = vec!["Sync upstream mirror at 0a1b2c3d"; 5];
    messages.push("Refactor the session cache to avoid double locking");
    let analysis = analyzer.analyze_messages(&messages);
    assert!(analysis.is_bot);
    assert_eq!(
        analysis.indicators,
        vec!["High message similarity: 83% identical"]
    );
}

// =============================================================================
// Timing Analyzer Tests
// =============================================================================

#[test]
fn test_fewer_than_ten_timestamps() {
    let analyzer = TimingAnalyzer::default();
    assert!(analyzer.analyze_timing(&minutes_apart(9, 1)).is_empty());
}

#[test]
fn test_twenty_commits_ten_minutes_apart() {
    let analyzer = TimingAnalyzer::default();
    let indicators = analyzer.analyze_timing(&minutes_apart(20, 10));
    assert_eq!(
        indicators,
        vec!["Highly regular commit timing: 10.0 min intervals"]
    );
    assert!(!indicators.iter().any(|i| i.contains("Very high frequency")));
}

#[test]
fn test_frequency_counts_whole_days() {
    let config = TimingConfig {
        max_commits_per_day: 5.0,
        ..Default::default()
    };
    let analyzer = TimingAnalyzer::new(&config, false);
    // 12 commits over 2.5 days -> 2 whole days -> 6.0 commits/day
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let offsets = [0, 7, 55, 300, 900, 1200, 1500, 2000, 2600, 3000, 3300, 3600];
    let ts: Vec<_> = offsets
        .iter()
        .map(|m| start + Duration::minutes(*m))
        .collect();
    assert_eq!(
        analyzer.analyze_timing(&ts),
        vec!["Very high frequency: 6.0 commits/day"]
    );
}

// =============================================================================
// Classifier Tests
// =============================================================================

#[test]
fn test_classifier_or_merge() {
    let classifier = ContributorClassifier::with_defaults();

    let mut record = ContributorRecord::new("mirror-sync");
    record.commit_messages = vec!["Sync upstream mirror at 0a1b2c3d".to_string(); 8];
    let result = classifier.classify(&record);
    assert!(result.is_bot);
    assert!(!result.indicators.is_empty());
    assert_eq!(result.message_similarity_score, 1.0);
}

#[test]
fn test_human_with_regular_timing_stays_human() {
    let classifier = ContributorClassifier::with_defaults();
    let mut record = human_record("maria", 10);
    record.commit_timestamps = minutes_apart(15, 10);

    let result = classifier.classify(&record);
    assert!(!result.is_bot);
    assert_eq!(
        result.indicators,
        vec!["Highly regular commit timing: 10.0 min intervals"]
    );
}

#[test]
fn test_classifier_without_timestamps() {
    let classifier = ContributorClassifier::with_defaults();
    let mut record = human_record("li", 10);
    record.commit_timestamps.clear();

    let result = classifier.classify(&record);
    assert!(!result.is_bot);
    assert!(result.indicators.is_empty());
}

#[test]
fn test_all_detectors_disabled() {
    let config = BotDetectionConfig {
        detection: DetectionConfig {
            username_analysis: false,
            message_analysis: false,
            timing_analysis: false,
            timing_sets_verdict: false,
        },
        ..Default::default()
    };
    let classifier = ContributorClassifier::new(config).unwrap();
    let result = classifier.classify(&ContributorRecord::new("dependabot[bot]"));
    assert!(!result.is_bot);
    assert!(result.indicators.is_empty());
}

#[test]
fn test_detector_trait_objects() {
    let detectors: Vec<Box<dyn Detector>> = vec![
        Box::new(UsernameAnalyzer::new()),
        Box::new(MessageAnalyzer::default()),
        Box::new(TimingAnalyzer::default()),
    ];
    let names: Vec<_> = detectors.iter().map(|d| d.name()).collect();
    assert_eq!(names, vec!["username", "messages", "timing"]);

    let record = ContributorRecord::new("travis-runner");
    assert!(detectors[0].analyze(&record).is_bot);
    assert!(!detectors[1].analyze(&record).is_bot);
    assert!(!detectors[2].analyze(&record).is_bot);
}

// =============================================================================
// Partition Tests
// =============================================================================

#[test]
fn test_partition_properties() {
    let classifier = ContributorClassifier::with_defaults();
    let records = vec![
        human_record("ana", 30),
        ContributorRecord::new("dependabot[bot]"),
        human_record("marek", 12),
        ContributorRecord::new("greenkeeper"),
        human_record("sofia", 45),
    ];
    let n = records.len();

    let partition = classifier.partition(records);
    assert_eq!(partition.bots.len() + partition.humans.len(), n);

    let bots: Vec<_> = partition.bots.iter().map(|c| c.record.username.as_str()).collect();
    let humans: Vec<_> = partition.humans.iter().map(|c| c.record.username.as_str()).collect();
    assert_eq!(bots, vec!["dependabot[bot]", "greenkeeper"]);
    assert_eq!(humans, vec!["ana", "marek", "sofia"]);
    assert!(bots.iter().all(|b| !humans.contains(b)));
}

#[test]
fn test_report_ranks_humans_only() {
    let classifier = ContributorClassifier::with_defaults();
    let mut bot = ContributorRecord::new("renovate[bot]");
    bot.commit_count = 500;

    let partition: Partition = classifier.partition(vec![
        human_record("ana", 30),
        bot,
        human_record("sofia", 45),
    ]);
    let report = partition.report(1);

    assert_eq!(report.top_humans.len(), 1);
    assert_eq!(report.top_humans[0].username, "sofia");
    assert_eq!(report.humans.commits, 75);
    assert_eq!(report.bots.commits, 500);
    assert_eq!(report.detected_bots[0].username, "renovate[bot]");
}

#[tokio::test]
async fn test_partition_batch_matches_partition() {
    let classifier = Arc::new(ContributorClassifier::with_defaults());
    let records: Vec<_> = (0..25)
        .map(|i| {
            if i % 5 == 0 {
                ContributorRecord::new(format!("auto-merge-{}", i))
            } else {
                human_record(&format!("dev{}", i), i)
            }
        })
        .collect();

    let sequential = classifier.partition(records.clone());
    let concurrent = classifier.partition_batch(records).await.unwrap();
    assert_eq!(sequential, concurrent);
    assert_eq!(concurrent.bots.len(), 5);
}
