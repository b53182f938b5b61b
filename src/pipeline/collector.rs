//! 指标采集
//!
//! 为一个小时桶生成 active clubs × active sources 条原始指标并一次性写入。

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::outcome::StageOutcome;
use super::producer::MetricProducer;
use crate::errors::{PulsoError, Result};
use crate::storage::{NewMetric, PipelineStore};

/// 采集一个桶
///
/// clubs 或 sources 为空时直接失败，不做任何写入。重复执行会追加重复行。
pub async fn collect_metrics(
    store: &dyn PipelineStore,
    producer: &dyn MetricProducer,
    bucket_start: DateTime<Utc>,
    bucket_size_minutes: i32,
) -> Result<StageOutcome> {
    let clubs = store.active_clubs().await?;
    let sources = store.active_sources().await?;

    if clubs.is_empty() || sources.is_empty() {
        warn!(
            "Cannot collect bucket {}: {} active clubs, {} active sources",
            bucket_start,
            clubs.len(),
            sources.len()
        );
        return Err(PulsoError::reference_data_missing(format!(
            "active clubs: {}, active sources: {}",
            clubs.len(),
            sources.len()
        )));
    }

    // source 在外层，club 在内层
    let mut metrics = Vec::with_capacity(clubs.len() * sources.len());
    for source in &sources {
        for club in &clubs {
            let observation = producer.observe(club, source, bucket_start);
            metrics.push(NewMetric {
                club_id: club.id,
                source_id: source.id,
                bucket_start,
                bucket_size_minutes,
                volume_raw: observation.volume_raw,
                sentiment_score: observation.sentiment_score,
            });
        }
    }

    debug!(
        "Generated {} metrics for bucket {} ({} clubs × {} sources)",
        metrics.len(),
        bucket_start,
        clubs.len(),
        sources.len()
    );

    let inserted = store.insert_metrics(metrics).await?;
    info!("Collected {} metrics for bucket {}", inserted, bucket_start);

    Ok(StageOutcome::Inserted(inserted))
}
