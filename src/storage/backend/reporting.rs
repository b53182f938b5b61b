//! 报表只读查询
//!
//! 整表按 id 升序透传；v2 额外提供按 (club_id, aggregation_date) 去重的视图。

use std::collections::HashMap;

use chrono::NaiveDate;
use sea_orm::{EntityTrait, QueryOrder};

use super::SeaOrmStorage;
use crate::errors::Result;
use migration::entities::{club, daily_aggregation, daily_aggregation_v2, source, time_bucket_metric};

impl SeaOrmStorage {
    pub async fn list_clubs(&self) -> Result<Vec<club::Model>> {
        Ok(club::Entity::find()
            .order_by_asc(club::Column::Id)
            .all(self.get_db())
            .await?)
    }

    pub async fn list_sources(&self) -> Result<Vec<source::Model>> {
        Ok(source::Entity::find()
            .order_by_asc(source::Column::Id)
            .all(self.get_db())
            .await?)
    }

    pub async fn list_time_bucket_metrics(&self) -> Result<Vec<time_bucket_metric::Model>> {
        Ok(time_bucket_metric::Entity::find()
            .order_by_asc(time_bucket_metric::Column::Id)
            .all(self.get_db())
            .await?)
    }

    pub async fn list_daily_aggregations(&self) -> Result<Vec<daily_aggregation::Model>> {
        Ok(daily_aggregation::Entity::find()
            .order_by_asc(daily_aggregation::Column::Id)
            .all(self.get_db())
            .await?)
    }

    pub async fn list_daily_aggregations_v2(&self) -> Result<Vec<daily_aggregation_v2::Model>> {
        Ok(daily_aggregation_v2::Entity::find()
            .order_by_asc(daily_aggregation_v2::Column::Id)
            .all(self.get_db())
            .await?)
    }

    /// 每个 (club_id, aggregation_date) 只保留 calculated_at 最新的一行
    pub async fn latest_daily_aggregations_v2(&self) -> Result<Vec<daily_aggregation_v2::Model>> {
        let rows = self.list_daily_aggregations_v2().await?;
        Ok(keep_latest_per_club_day(rows))
    }
}

/// calculated_at 相同时取 id 较大者；结果仍按 id 升序
pub fn keep_latest_per_club_day(
    rows: Vec<daily_aggregation_v2::Model>,
) -> Vec<daily_aggregation_v2::Model> {
    let mut latest: HashMap<(i64, NaiveDate), daily_aggregation_v2::Model> = HashMap::new();

    for row in rows {
        let key = (row.club_id, row.aggregation_date);
        match latest.get(&key) {
            Some(current)
                if (current.calculated_at, current.id) >= (row.calculated_at, row.id) => {}
            _ => {
                latest.insert(key, row);
            }
        }
    }

    let mut result: Vec<_> = latest.into_values().collect();
    result.sort_by_key(|row| row.id);
    result
}
