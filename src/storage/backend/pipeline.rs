//! PipelineStore 的 SeaORM 实现
//!
//! 每个方法只发一条 SQL；失败直接以 StoreOperationFailed 返回，不重试。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::{debug, trace};

use super::SeaOrmStorage;
use super::converters::{
    club_daily_to_active_model, club_source_daily_to_active_model, model_to_club,
    model_to_sample, model_to_source, model_to_volume, new_metric_to_active_model,
};
use crate::errors::{PulsoError, Result};
use crate::storage::PipelineStore;
use crate::storage::models::{
    Club, ClubDailyRow, ClubSourceDailyRow, MetricSample, MetricVolume, NewMetric, Source,
};
use migration::entities::{club, daily_aggregation, daily_aggregation_v2, source, time_bucket_metric};

#[async_trait]
impl PipelineStore for SeaOrmStorage {
    async fn active_clubs(&self) -> Result<Vec<Club>> {
        let models = club::Entity::find()
            .filter(club::Column::Active.eq(true))
            .order_by_asc(club::Column::Id)
            .all(self.get_db())
            .await?;

        Ok(models.into_iter().map(model_to_club).collect())
    }

    async fn active_sources(&self) -> Result<Vec<Source>> {
        let models = source::Entity::find()
            .filter(source::Column::Active.eq(true))
            .order_by_asc(source::Column::Id)
            .all(self.get_db())
            .await?;

        Ok(models.into_iter().map(model_to_source).collect())
    }

    async fn insert_metrics(&self, metrics: Vec<NewMetric>) -> Result<usize> {
        if metrics.is_empty() {
            return Ok(0);
        }

        let models: Vec<time_bucket_metric::ActiveModel> = metrics
            .into_iter()
            .map(new_metric_to_active_model)
            .collect();

        let inserted = time_bucket_metric::Entity::insert_many(models)
            .exec_without_returning(self.get_db())
            .await?;

        debug!("Inserted {} time_bucket_metrics rows", inserted);
        Ok(inserted as usize)
    }

    async fn metrics_for_source_bucket(
        &self,
        source_id: i64,
        bucket_start: DateTime<Utc>,
    ) -> Result<Vec<MetricVolume>> {
        let models = time_bucket_metric::Entity::find()
            .filter(time_bucket_metric::Column::SourceId.eq(source_id))
            .filter(time_bucket_metric::Column::BucketStart.eq(bucket_start))
            .order_by_asc(time_bucket_metric::Column::Id)
            .all(self.get_db())
            .await?;

        Ok(models.into_iter().map(model_to_volume).collect())
    }

    async fn update_normalized_volume(
        &self,
        metric_id: i64,
        volume_normalized: f64,
    ) -> Result<()> {
        let result = time_bucket_metric::Entity::update_many()
            .col_expr(
                time_bucket_metric::Column::VolumeNormalized,
                Expr::value(volume_normalized),
            )
            .filter(time_bucket_metric::Column::Id.eq(metric_id))
            .exec(self.get_db())
            .await?;

        if result.rows_affected == 0 {
            return Err(PulsoError::store_operation_failed(format!(
                "time_bucket_metrics row {} not found for update",
                metric_id
            )));
        }

        trace!(
            "Metric {} normalized to {}",
            metric_id, volume_normalized
        );
        Ok(())
    }

    async fn metrics_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MetricSample>> {
        let models = time_bucket_metric::Entity::find()
            .filter(time_bucket_metric::Column::BucketStart.gte(start))
            .filter(time_bucket_metric::Column::BucketStart.lt(end))
            .order_by_asc(time_bucket_metric::Column::Id)
            .all(self.get_db())
            .await?;

        Ok(models.into_iter().map(model_to_sample).collect())
    }

    async fn insert_club_daily(&self, rows: Vec<ClubDailyRow>) -> Result<usize> {
        if rows.is_empty() {
            return Ok(0);
        }

        let models: Vec<daily_aggregation_v2::ActiveModel> =
            rows.into_iter().map(club_daily_to_active_model).collect();

        let inserted = daily_aggregation_v2::Entity::insert_many(models)
            .exec_without_returning(self.get_db())
            .await?;

        Ok(inserted as usize)
    }

    async fn insert_club_source_daily(&self, rows: Vec<ClubSourceDailyRow>) -> Result<usize> {
        if rows.is_empty() {
            return Ok(0);
        }

        let models: Vec<daily_aggregation::ActiveModel> = rows
            .into_iter()
            .map(club_source_daily_to_active_model)
            .collect();

        let inserted = daily_aggregation::Entity::insert_many(models)
            .exec_without_returning(self.get_db())
            .await?;

        Ok(inserted as usize)
    }
}
