//! 参考数据表迁移
//!
//! - clubs: 俱乐部
//! - sources: 数据来源（社交平台等）
//!
//! 两张表的生命周期由外部维护，流水线只读取 `active = true` 的行。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clubs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Clubs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Clubs::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Clubs::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Sources::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sources::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sources::Code).string_len(64).not_null())
                    .col(ColumnDef::new(Sources::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Sources::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        // 索引：active（参考数据过滤）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_clubs_active")
                    .table(Clubs::Table)
                    .col(Clubs::Active)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sources_active")
                    .table(Sources::Table)
                    .col(Sources::Active)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_sources_active").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_clubs_active").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sources::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Clubs::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Clubs {
    #[sea_orm(iden = "clubs")]
    Table,
    Id,
    Name,
    Active,
}

#[derive(DeriveIden)]
pub(crate) enum Sources {
    #[sea_orm(iden = "sources")]
    Table,
    Id,
    Code,
    Name,
    Active,
}
