//! 小时桶指标表迁移
//!
//! 不设 (club_id, source_id, bucket_start) 唯一约束：采集是追加写入，
//! 同一个桶重复运行会产生重复行。

use sea_orm_migration::prelude::*;

use super::m20261001_000001_reference_tables::{Clubs, Sources};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TimeBucketMetrics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TimeBucketMetrics::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TimeBucketMetrics::ClubId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimeBucketMetrics::SourceId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimeBucketMetrics::BucketStart)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimeBucketMetrics::BucketSizeMinutes)
                            .integer()
                            .not_null()
                            .default(60),
                    )
                    .col(
                        ColumnDef::new(TimeBucketMetrics::VolumeRaw)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TimeBucketMetrics::VolumeNormalized)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TimeBucketMetrics::SentimentScore)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TimeBucketMetrics::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_metrics_club")
                            .from(TimeBucketMetrics::Table, TimeBucketMetrics::ClubId)
                            .to(Clubs::Table, Clubs::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_metrics_source")
                            .from(TimeBucketMetrics::Table, TimeBucketMetrics::SourceId)
                            .to(Sources::Table, Sources::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 索引：bucket_start（日汇总的范围查询）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_metrics_bucket")
                    .table(TimeBucketMetrics::Table)
                    .col(TimeBucketMetrics::BucketStart)
                    .to_owned(),
            )
            .await?;

        // 索引：source_id + bucket_start（按来源归一化）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_metrics_source_bucket")
                    .table(TimeBucketMetrics::Table)
                    .col(TimeBucketMetrics::SourceId)
                    .col(TimeBucketMetrics::BucketStart)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_metrics_source_bucket").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_metrics_bucket").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TimeBucketMetrics::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum TimeBucketMetrics {
    #[sea_orm(iden = "time_bucket_metrics")]
    Table,
    Id,
    ClubId,
    SourceId,
    BucketStart,
    BucketSizeMinutes,
    VolumeRaw,
    VolumeNormalized,
    SentimentScore,
    CreatedAt,
}
