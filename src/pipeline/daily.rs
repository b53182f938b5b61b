//! 天汇总
//!
//! 两代汇总共享同一个窗口读取和分组引擎，只在分组键、行构造和写入目标上不同：
//! - [`ClubDailyRollup`]：按俱乐部，写 daily_aggregations_v2
//! - [`ClubSourceDailyRollup`]：按 (俱乐部, 来源)，写 daily_aggregations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use super::clock::DayWindow;
use super::outcome::{SkipReason, StageOutcome};
use super::rollup::{
    self, Group, count, max, mean, normalized_volume, raw_volume, sentiment, sum,
};
use super::round2;
use crate::errors::Result;
use crate::storage::{ClubDailyRow, ClubSourceDailyRow, MetricSample, PipelineStore};

#[async_trait]
pub trait DailyRollup: Send + Sync {
    type Key: Ord + Copy + Send;
    type Row: Send;

    /// 日志和控制台里显示的目标表名
    fn table(&self) -> &'static str;

    fn key(&self, sample: &MetricSample) -> Self::Key;

    /// 为一个分组构造输出行；数据不足时返回 None
    fn summarize(
        &self,
        group: &Group<'_, Self::Key>,
        window: &DayWindow,
        now: DateTime<Utc>,
    ) -> Option<Self::Row>;

    async fn persist(&self, store: &dyn PipelineStore, rows: Vec<Self::Row>) -> Result<usize>;

    /// 纯计算部分：按键升序输出
    fn build_rows(
        &self,
        samples: &[MetricSample],
        window: &DayWindow,
        now: DateTime<Utc>,
    ) -> Vec<Self::Row> {
        rollup::rollup(
            samples,
            |s| self.key(s),
            |group| self.summarize(group, window, now),
        )
    }
}

/// 俱乐部维度（v2）
#[derive(Debug, Clone, Copy, Default)]
pub struct ClubDailyRollup;

#[async_trait]
impl DailyRollup for ClubDailyRollup {
    type Key = i64;
    type Row = ClubDailyRow;

    fn table(&self) -> &'static str {
        "daily_aggregations_v2"
    }

    fn key(&self, sample: &MetricSample) -> i64 {
        sample.club_id
    }

    fn summarize(
        &self,
        group: &Group<'_, i64>,
        window: &DayWindow,
        now: DateTime<Utc>,
    ) -> Option<ClubDailyRow> {
        // 没有任何原始量的俱乐部不产出行
        let volume_total = sum(group.values(raw_volume))?;

        Some(ClubDailyRow {
            club_id: group.key,
            aggregation_date: window.date,
            volume_total,
            volume_normalized: mean(group.values(normalized_volume)).map(round2),
            sentiment_score: mean(group.values(sentiment)).map(round2),
            calculated_at: now,
            created_at: now,
        })
    }

    async fn persist(&self, store: &dyn PipelineStore, rows: Vec<ClubDailyRow>) -> Result<usize> {
        store.insert_club_daily(rows).await
    }
}

/// 俱乐部 × 来源维度（v1）
#[derive(Debug, Clone, Copy, Default)]
pub struct ClubSourceDailyRollup;

#[async_trait]
impl DailyRollup for ClubSourceDailyRollup {
    type Key = (i64, i64);
    type Row = ClubSourceDailyRow;

    fn table(&self) -> &'static str {
        "daily_aggregations"
    }

    fn key(&self, sample: &MetricSample) -> (i64, i64) {
        (sample.club_id, sample.source_id)
    }

    fn summarize(
        &self,
        group: &Group<'_, (i64, i64)>,
        window: &DayWindow,
        now: DateTime<Utc>,
    ) -> Option<ClubSourceDailyRow> {
        // 没有归一化值就无法求平均
        let volume_avg = mean(group.values(normalized_volume))?;
        let volume_max = max(group.values(normalized_volume))?;
        let (club_id, source_id) = group.key;

        Some(ClubSourceDailyRow {
            club_id,
            source_id,
            day: window.date,
            volume_avg: round2(volume_avg),
            volume_max,
            sentiment_avg: mean(group.values(sentiment)).map(round2),
            buckets_count: count(group.values(normalized_volume)) as i32,
            created_at: now,
        })
    }

    async fn persist(
        &self,
        store: &dyn PipelineStore,
        rows: Vec<ClubSourceDailyRow>,
    ) -> Result<usize> {
        store.insert_club_source_daily(rows).await
    }
}

/// 对窗口执行一次汇总
///
/// 窗口为空或没有合格分组时不写入，返回 `Skipped`。
pub async fn run_daily_rollup<R: DailyRollup>(
    rollup: &R,
    store: &dyn PipelineStore,
    window: DayWindow,
    now: DateTime<Utc>,
) -> Result<StageOutcome> {
    info!(
        "Aggregating {} for {} ({} -> {})",
        rollup.table(),
        window.date,
        window.start,
        window.end
    );

    let samples = store.metrics_in_window(window.start, window.end).await?;
    if samples.is_empty() {
        info!("No metrics found in window, nothing to aggregate");
        return Ok(StageOutcome::Skipped(SkipReason::EmptyWindow));
    }

    let rows = rollup.build_rows(&samples, &window, now);
    if rows.is_empty() {
        info!(
            "{} metrics in window but no eligible groups for {}",
            samples.len(),
            rollup.table()
        );
        return Ok(StageOutcome::Skipped(SkipReason::NoEligibleGroups));
    }

    let inserted = rollup.persist(store, rows).await?;
    info!("Inserted {} rows into {}", inserted, rollup.table());

    Ok(StageOutcome::Inserted(inserted))
}
