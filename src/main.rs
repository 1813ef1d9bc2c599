//! Contributor bot detection CLI
//!
//! Reads assembled contributor records and prints a JSON classification
//! report.

use anyhow::{Context, Result};
use clap::Parser;
use contributor_bot_detection::{BotDetectionConfig, ContributorClassifier, ContributorRecord};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "contributor-bot-detection")]
#[command(author, version, about = "Classify repository contributors as bots or humans")]
struct Args {
    /// Contributor records (JSON or YAML array)
    records: PathBuf,

    /// Path to configuration file (JSON or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of top human contributors to include in the report
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Print every classified contributor instead of the summary report
    #[arg(long)]
    full: bool,

    /// Enable JSON logging format
    #[arg(long)]
    json_logs: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(json: bool, level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    // Logs go to stderr so stdout stays valid JSON.
    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Pretty-print a value as JSON followed by a newline.
fn write_json<W: Write, T: Serialize>(mut out: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.json_logs, &args.log_level);

    let config = match &args.config {
        Some(path) => BotDetectionConfig::from_path(path)?,
        None => BotDetectionConfig::default(),
    };
    let max_messages = config.sampling.max_commit_messages;

    let mut records = ContributorRecord::load_all(&args.records)?;
    for record in &mut records {
        record.cap_messages(max_messages);
    }
    info!(
        records = records.len(),
        path = %args.records.display(),
        "Loaded contributor records"
    );

    let classifier = Arc::new(ContributorClassifier::new(config)?);

    if args.full {
        let classified = classifier.classify_batch(records).await?;
        write_json(std::io::stdout().lock(), &classified)
            .context("failed to write classification results")?;
    } else {
        let partition = classifier.partition_batch(records).await?;
        let report = partition.report(args.top);
        info!(
            bots = report.bots.contributors,
            humans = report.humans.contributors,
            human_commits = report.humans.commits,
            "Classification complete"
        );
        write_json(std::io::stdout().lock(), &report)
            .context("failed to write classification report")?;
    }

    Ok(())
}
