//! 小时桶指标实体
//!
//! 每个 (club, source, bucket_start) 一行；`volume_normalized` 在归一化之前为空。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "time_bucket_metrics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub club_id: i64,
    pub source_id: i64,
    pub bucket_start: DateTimeUtc,
    pub bucket_size_minutes: i32,
    pub volume_raw: Option<i64>,
    pub volume_normalized: Option<f64>,
    pub sentiment_score: Option<f64>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
