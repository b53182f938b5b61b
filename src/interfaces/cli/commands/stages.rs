//! Pipeline stage commands
//!
//! Each command runs one stage against the given store and prints a short
//! summary for the operator. Errors are returned unprinted; the caller decides
//! how to render them and which exit code to use.

use chrono::Utc;
use colored::Colorize;

use crate::config::PipelineConfig;
use crate::interfaces::cli::CliError;
use crate::pipeline::{
    ClubDailyRollup, ClubSourceDailyRollup, DailyRollup, MetricProducer, NormalizeReport,
    SourceNormalization, StageOutcome, collect_metrics, daily_window, hourly_bucket_start,
    normalize_bucket, run_daily_rollup, run_hourly,
};
use crate::storage::PipelineStore;

fn print_outcome(outcome: &StageOutcome, table: &str) {
    match outcome {
        StageOutcome::Inserted(n) => println!(
            "  {} Inserted {} rows into {}",
            "✓".bold().green(),
            n.to_string().green(),
            table.cyan()
        ),
        StageOutcome::Skipped(reason) => println!(
            "  {} Nothing written to {}: {}",
            "ℹ".bold().blue(),
            table.cyan(),
            reason.to_string().dimmed()
        ),
    }
}

fn print_normalize_report(report: &NormalizeReport) {
    for source in &report.sources {
        match source.result {
            SourceNormalization::Normalized { count, max } => println!(
                "  {} {}: {} metrics, max_volume={}",
                "✓".bold().green(),
                source.code.cyan(),
                count.to_string().green(),
                max
            ),
            SourceNormalization::NoData => println!(
                "  {} {}: {}",
                "ℹ".bold().blue(),
                source.code.cyan(),
                "no data".dimmed()
            ),
        }
    }
    println!(
        "{} Normalization finished, {} metrics updated",
        "ℹ".bold().blue(),
        report.updated().to_string().green()
    );
}

pub async fn collect(
    store: &dyn PipelineStore,
    producer: &dyn MetricProducer,
    config: &PipelineConfig,
) -> Result<StageOutcome, CliError> {
    let bucket_start = hourly_bucket_start(Utc::now());
    println!(
        "{} {}",
        "Collecting bucket:".bold().green(),
        bucket_start.to_rfc3339().yellow()
    );

    let outcome =
        collect_metrics(store, producer, bucket_start, config.bucket_size_minutes).await?;
    print_outcome(&outcome, "time_bucket_metrics");
    Ok(outcome)
}

pub async fn normalize(store: &dyn PipelineStore) -> Result<NormalizeReport, CliError> {
    let bucket_start = hourly_bucket_start(Utc::now());
    println!(
        "{} {}",
        "Normalizing bucket:".bold().green(),
        bucket_start.to_rfc3339().yellow()
    );

    let report = normalize_bucket(store, bucket_start).await?;
    print_normalize_report(&report);
    Ok(report)
}

pub async fn hourly(
    store: &dyn PipelineStore,
    producer: &dyn MetricProducer,
    config: &PipelineConfig,
) -> Result<(), CliError> {
    let report = run_hourly(store, producer, Utc::now(), config.bucket_size_minutes).await?;
    println!(
        "{} {}",
        "Hourly run for bucket:".bold().green(),
        report.bucket_start.to_rfc3339().yellow()
    );
    print_outcome(&report.collected, "time_bucket_metrics");
    print_normalize_report(&report.normalization);
    Ok(())
}

async fn aggregate<R: DailyRollup>(
    rollup: &R,
    store: &dyn PipelineStore,
) -> Result<StageOutcome, CliError> {
    let now = Utc::now();
    let window = daily_window(now);
    println!(
        "{} {} {}",
        "Aggregating day".bold().green(),
        window.date.to_string().yellow(),
        format!(
            "({} -> {})",
            window.start.format("%Y-%m-%d %H:%M:%S"),
            window.end.format("%Y-%m-%d %H:%M:%S")
        )
        .dimmed()
    );

    let outcome = run_daily_rollup(rollup, store, window, now).await?;
    print_outcome(&outcome, rollup.table());
    Ok(outcome)
}

pub async fn aggregate_daily(store: &dyn PipelineStore) -> Result<StageOutcome, CliError> {
    aggregate(&ClubDailyRollup, store).await
}

pub async fn aggregate_sources(store: &dyn PipelineStore) -> Result<StageOutcome, CliError> {
    aggregate(&ClubSourceDailyRollup, store).await
}

/// 两代汇总互不依赖；先 v2 再 v1，任一失败即停止
pub async fn aggregate_all(store: &dyn PipelineStore) -> Result<(), CliError> {
    aggregate_daily(store).await?;
    aggregate_sources(store).await?;
    Ok(())
}
