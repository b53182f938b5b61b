//! 指标流水线
//!
//! 数据只向前流动：采集写入原始桶，归一化就地补写 volume_normalized，
//! 天汇总读取窗口内的桶并追加汇总行。每个阶段都可单独调度，
//! 存储客户端由调用方构造并传入。

pub mod clock;
pub mod collector;
pub mod daily;
pub mod normalizer;
pub mod outcome;
pub mod producer;
pub mod rollup;

pub use clock::{DayWindow, daily_window, hourly_bucket_start, truncate_to_hour};
pub use collector::collect_metrics;
pub use daily::{ClubDailyRollup, ClubSourceDailyRollup, DailyRollup, run_daily_rollup};
pub use normalizer::{max_volume, normalize_bucket, normalize_volumes};
pub use outcome::{NormalizeReport, SkipReason, SourceNormalization, SourceReport, StageOutcome};
pub use producer::{MetricProducer, Observation, RandomProducer};

use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::storage::PipelineStore;

/// 保留两位小数，恰好落在中点时取偶数（银行家舍入）
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// 一次小时任务的结果
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyReport {
    pub bucket_start: DateTime<Utc>,
    pub collected: StageOutcome,
    pub normalization: NormalizeReport,
}

/// 小时任务：对同一个桶先采集再归一化
pub async fn run_hourly(
    store: &dyn PipelineStore,
    producer: &dyn MetricProducer,
    now: DateTime<Utc>,
    bucket_size_minutes: i32,
) -> Result<HourlyReport> {
    let bucket_start = hourly_bucket_start(now);
    let collected = collect_metrics(store, producer, bucket_start, bucket_size_minutes).await?;
    let normalization = normalize_bucket(store, bucket_start).await?;

    Ok(HourlyReport {
        bucket_start,
        collected,
        normalization,
    })
}
