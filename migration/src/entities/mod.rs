pub mod club;
pub mod daily_aggregation;
pub mod daily_aggregation_v2;
pub mod source;
pub mod time_bucket_metric;

pub use club::Entity as ClubEntity;
pub use daily_aggregation::Entity as DailyAggregationEntity;
pub use daily_aggregation_v2::Entity as DailyAggregationV2Entity;
pub use source::Entity as SourceEntity;
pub use time_bucket_metric::Entity as TimeBucketMetricEntity;
