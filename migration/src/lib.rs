pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20261001_000001_reference_tables;
mod m20261001_000002_time_bucket_metrics;
mod m20261001_000003_daily_aggregations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_reference_tables::Migration),
            Box::new(m20261001_000002_time_bucket_metrics::Migration),
            Box::new(m20261001_000003_daily_aggregations::Migration),
        ]
    }
}
