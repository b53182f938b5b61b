//! 天级 club×source 汇总实体（v1）

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "daily_aggregations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub club_id: i64,
    pub source_id: i64,
    pub day: Date,
    pub volume_avg: f64,
    pub volume_max: f64,
    pub sentiment_avg: Option<f64>,
    pub buckets_count: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
