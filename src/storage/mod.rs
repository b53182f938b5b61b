use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::SeaOrmStorage;
pub use models::{
    Club, ClubDailyRow, ClubSourceDailyRow, MetricSample, MetricVolume, NewMetric, Source,
    StorageConfig,
};

/// 流水线使用的表格存储契约
///
/// 每个方法对应一次 select / insert / update，过滤条件只有
/// `eq`、`gte`、`lt`。不提供事务或 upsert：批量内各操作相互独立。
#[async_trait]
pub trait PipelineStore: Send + Sync {
    /// clubs 表中 `active = true` 的行
    async fn active_clubs(&self) -> Result<Vec<Club>>;

    /// sources 表中 `active = true` 的行
    async fn active_sources(&self) -> Result<Vec<Source>>;

    /// 批量写入小时桶指标，返回写入行数
    async fn insert_metrics(&self, metrics: Vec<NewMetric>) -> Result<usize>;

    /// `source_id = ? AND bucket_start = ?` 的 (id, volume_raw)
    async fn metrics_for_source_bucket(
        &self,
        source_id: i64,
        bucket_start: DateTime<Utc>,
    ) -> Result<Vec<MetricVolume>>;

    /// 按行 id 更新 volume_normalized
    async fn update_normalized_volume(&self, metric_id: i64, volume_normalized: f64)
    -> Result<()>;

    /// `bucket_start >= start AND bucket_start < end` 的全部指标
    async fn metrics_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MetricSample>>;

    /// 批量写入 daily_aggregations_v2，返回写入行数
    async fn insert_club_daily(&self, rows: Vec<ClubDailyRow>) -> Result<usize>;

    /// 批量写入 daily_aggregations，返回写入行数
    async fn insert_club_source_daily(&self, rows: Vec<ClubSourceDailyRow>) -> Result<usize>;
}

pub struct StorageFactory;

impl StorageFactory {
    /// 按调用构造存储客户端，调用结束后随所有权释放
    pub async fn create(config: &DatabaseConfig) -> Result<SeaOrmStorage> {
        let database_url = &config.database_url;

        // 从 URL 自动推断数据库类型
        let backend_type = backend::infer_backend_from_url(database_url)?;

        SeaOrmStorage::new(
            database_url,
            &backend_type,
            config.pool_size,
            Duration::from_secs(config.timeout),
        )
        .await
    }
}
