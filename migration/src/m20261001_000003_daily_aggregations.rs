//! 天级汇总表迁移
//!
//! 两代 schema 同时在线：
//! - daily_aggregations: club×source 维度（v1）
//! - daily_aggregations_v2: 俱乐部维度（v2）

use sea_orm_migration::prelude::*;

use super::m20261001_000001_reference_tables::{Clubs, Sources};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. daily_aggregations (v1)
        manager
            .create_table(
                Table::create()
                    .table(DailyAggregations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DailyAggregations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DailyAggregations::ClubId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DailyAggregations::SourceId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DailyAggregations::Day).date().not_null())
                    .col(
                        ColumnDef::new(DailyAggregations::VolumeAvg)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DailyAggregations::VolumeMax)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DailyAggregations::SentimentAvg)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(DailyAggregations::BucketsCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(DailyAggregations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_daily_agg_club")
                            .from(DailyAggregations::Table, DailyAggregations::ClubId)
                            .to(Clubs::Table, Clubs::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_daily_agg_source")
                            .from(DailyAggregations::Table, DailyAggregations::SourceId)
                            .to(Sources::Table, Sources::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_daily_agg_day")
                    .table(DailyAggregations::Table)
                    .col(DailyAggregations::Day)
                    .to_owned(),
            )
            .await?;

        // 2. daily_aggregations_v2
        manager
            .create_table(
                Table::create()
                    .table(DailyAggregationsV2::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DailyAggregationsV2::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DailyAggregationsV2::ClubId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DailyAggregationsV2::AggregationDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DailyAggregationsV2::VolumeTotal)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(DailyAggregationsV2::VolumeNormalized)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(DailyAggregationsV2::SentimentScore)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(DailyAggregationsV2::CalculatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DailyAggregationsV2::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_daily_agg_v2_club")
                            .from(DailyAggregationsV2::Table, DailyAggregationsV2::ClubId)
                            .to(Clubs::Table, Clubs::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 索引：aggregation_date + club_id（报表按天读取）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_daily_agg_v2_date_club")
                    .table(DailyAggregationsV2::Table)
                    .col(DailyAggregationsV2::AggregationDate)
                    .col(DailyAggregationsV2::ClubId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_daily_agg_v2_date_club").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DailyAggregationsV2::Table).to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_daily_agg_day").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DailyAggregations::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum DailyAggregations {
    #[sea_orm(iden = "daily_aggregations")]
    Table,
    Id,
    ClubId,
    SourceId,
    Day,
    VolumeAvg,
    VolumeMax,
    SentimentAvg,
    BucketsCount,
    CreatedAt,
}

#[derive(DeriveIden)]
enum DailyAggregationsV2 {
    #[sea_orm(iden = "daily_aggregations_v2")]
    Table,
    Id,
    ClubId,
    AggregationDate,
    VolumeTotal,
    VolumeNormalized,
    SentimentScore,
    CalculatedAt,
    CreatedAt,
}
