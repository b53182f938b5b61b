//! 天级俱乐部汇总实体（v2）

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "daily_aggregations_v2")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub club_id: i64,
    pub aggregation_date: Date,
    pub volume_total: i64,
    pub volume_normalized: Option<f64>,
    pub sentiment_score: Option<f64>,
    pub calculated_at: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
