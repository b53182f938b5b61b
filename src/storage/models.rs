//! 流水线各阶段读写的领域类型
//!
//! 与数据库实体解耦：阶段代码只依赖这些类型和 [`super::PipelineStore`]。

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// 活跃俱乐部
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    pub id: i64,
    pub name: String,
}

/// 活跃数据来源
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: i64,
    pub code: String,
    pub name: String,
}

/// 待写入的小时桶观测值
#[derive(Debug, Clone, PartialEq)]
pub struct NewMetric {
    pub club_id: i64,
    pub source_id: i64,
    pub bucket_start: DateTime<Utc>,
    pub bucket_size_minutes: i32,
    pub volume_raw: Option<i64>,
    pub sentiment_score: Option<f64>,
}

/// 归一化所需的最小投影：(id, volume_raw)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricVolume {
    pub id: i64,
    pub volume_raw: Option<i64>,
}

/// 日汇总读取的投影
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub club_id: i64,
    pub source_id: i64,
    pub bucket_start: DateTime<Utc>,
    pub volume_raw: Option<i64>,
    pub volume_normalized: Option<f64>,
    pub sentiment_score: Option<f64>,
}

/// 俱乐部维度天汇总行（daily_aggregations_v2）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClubDailyRow {
    pub club_id: i64,
    pub aggregation_date: NaiveDate,
    pub volume_total: i64,
    pub volume_normalized: Option<f64>,
    pub sentiment_score: Option<f64>,
    pub calculated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// club×source 维度天汇总行（daily_aggregations）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClubSourceDailyRow {
    pub club_id: i64,
    pub source_id: i64,
    pub day: NaiveDate,
    pub volume_avg: f64,
    pub volume_max: f64,
    pub sentiment_avg: Option<f64>,
    pub buckets_count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageConfig {
    pub storage_type: String,
}
