//! Contributor bot detection.
//!
//! Classifies repository contributors as automated or human from their
//! commit activity, returning a verdict plus the evidence behind it.
//!
//! # Features
//!
//! - Username lexicon matching (`dependabot`, `-ci`, `[bot]`, ...)
//! - Commit message uniformity after normalizing versions, dates, issue
//!   references and hashes
//! - Automation keyword ratio
//! - Commit timing analysis (frequency, interval regularity)
//! - Stable bots/humans partition with report helpers
//!
//! # Example
//!
//! ```
//! use contributor_bot_detection::{ContributorClassifier, ContributorRecord};
//!
//! let classifier = ContributorClassifier::with_defaults();
//! let result = classifier.classify(&ContributorRecord::new("dependabot[bot]"));
//! assert!(result.is_bot);
//! ```

pub mod classification;
pub mod classifier;
pub mod config;
pub mod detectors;
pub mod record;

pub use classification::{
    ActivityTotals, ClassificationReport, ClassificationResult, ClassifiedContributor, Partition,
};
pub use classifier::ContributorClassifier;
pub use config::BotDetectionConfig;
pub use detectors::normalize_message;
pub use record::ContributorRecord;
