use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};

use crate::storage::models::{
    Club, ClubDailyRow, ClubSourceDailyRow, MetricSample, MetricVolume, NewMetric, Source,
};
use migration::entities::{club, daily_aggregation, daily_aggregation_v2, source, time_bucket_metric};

pub fn model_to_club(model: club::Model) -> Club {
    Club {
        id: model.id,
        name: model.name,
    }
}

pub fn model_to_source(model: source::Model) -> Source {
    Source {
        id: model.id,
        code: model.code,
        name: model.name,
    }
}

pub fn model_to_sample(model: time_bucket_metric::Model) -> MetricSample {
    MetricSample {
        club_id: model.club_id,
        source_id: model.source_id,
        bucket_start: model.bucket_start,
        volume_raw: model.volume_raw,
        volume_normalized: model.volume_normalized,
        sentiment_score: model.sentiment_score,
    }
}

pub fn model_to_volume(model: time_bucket_metric::Model) -> MetricVolume {
    MetricVolume {
        id: model.id,
        volume_raw: model.volume_raw,
    }
}

/// 新指标的 volume_normalized 总是留空，等待归一化阶段填充
pub fn new_metric_to_active_model(metric: NewMetric) -> time_bucket_metric::ActiveModel {
    time_bucket_metric::ActiveModel {
        id: NotSet,
        club_id: Set(metric.club_id),
        source_id: Set(metric.source_id),
        bucket_start: Set(metric.bucket_start),
        bucket_size_minutes: Set(metric.bucket_size_minutes),
        volume_raw: Set(metric.volume_raw),
        volume_normalized: Set(None),
        sentiment_score: Set(metric.sentiment_score),
        created_at: Set(Utc::now()),
    }
}

pub fn club_daily_to_active_model(row: ClubDailyRow) -> daily_aggregation_v2::ActiveModel {
    daily_aggregation_v2::ActiveModel {
        id: NotSet,
        club_id: Set(row.club_id),
        aggregation_date: Set(row.aggregation_date),
        volume_total: Set(row.volume_total),
        volume_normalized: Set(row.volume_normalized),
        sentiment_score: Set(row.sentiment_score),
        calculated_at: Set(row.calculated_at),
        created_at: Set(row.created_at),
    }
}

pub fn club_source_daily_to_active_model(
    row: ClubSourceDailyRow,
) -> daily_aggregation::ActiveModel {
    daily_aggregation::ActiveModel {
        id: NotSet,
        club_id: Set(row.club_id),
        source_id: Set(row.source_id),
        day: Set(row.day),
        volume_avg: Set(row.volume_avg),
        volume_max: Set(row.volume_max),
        sentiment_avg: Set(row.sentiment_avg),
        buckets_count: Set(row.buckets_count),
        created_at: Set(row.created_at),
    }
}
