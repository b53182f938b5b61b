//! 桶内按来源归一化
//!
//! 每个来源独立计算：`normalized = round(raw / max(1, max_raw) * 100, 2)`。
//! 不同来源的原始量纲不可比，永远不跨来源比较。

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::outcome::{NormalizeReport, SourceNormalization, SourceReport};
use super::round2;
use crate::errors::Result;
use crate::storage::{MetricVolume, PipelineStore};

/// 组内最大原始量，至少为 1；空值不参与
pub fn max_volume(metrics: &[MetricVolume]) -> i64 {
    metrics
        .iter()
        .filter_map(|m| m.volume_raw)
        .max()
        .unwrap_or(0)
        .max(1)
}

/// 计算组内每行的归一化值，返回 (metric_id, normalized)
///
/// 原始量为空的行不产出结果，其 volume_normalized 保持为空。
pub fn normalize_volumes(metrics: &[MetricVolume]) -> Vec<(i64, f64)> {
    let max = max_volume(metrics) as f64;
    metrics
        .iter()
        .filter_map(|m| m.volume_raw.map(|raw| (m.id, round2(raw as f64 / max * 100.0))))
        .collect()
}

/// 归一化一个桶内所有活跃来源
///
/// 某来源在该桶没有数据时记录并跳过；任一更新失败立即中止本次运行。
pub async fn normalize_bucket(
    store: &dyn PipelineStore,
    bucket_start: DateTime<Utc>,
) -> Result<NormalizeReport> {
    let sources = store.active_sources().await?;
    let mut report = NormalizeReport::default();

    for source in sources {
        let metrics = store
            .metrics_for_source_bucket(source.id, bucket_start)
            .await?;

        if metrics.is_empty() {
            info!("Source {}: no metrics in bucket {}", source.code, bucket_start);
            report.sources.push(SourceReport {
                source_id: source.id,
                code: source.code,
                result: SourceNormalization::NoData,
            });
            continue;
        }

        let max = max_volume(&metrics);
        let updates = normalize_volumes(&metrics);
        debug!(
            "Source {}: {} metrics, max_volume={}",
            source.code,
            metrics.len(),
            max
        );

        for (metric_id, normalized) in &updates {
            store.update_normalized_volume(*metric_id, *normalized).await?;
        }

        info!(
            "Source {}: normalized {} metrics (max_volume={})",
            source.code,
            updates.len(),
            max
        );
        report.sources.push(SourceReport {
            source_id: source.id,
            code: source.code,
            result: SourceNormalization::Normalized {
                count: updates.len(),
                max,
            },
        });
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volumes(raw: &[Option<i64>]) -> Vec<MetricVolume> {
        raw.iter()
            .enumerate()
            .map(|(i, v)| MetricVolume {
                id: i as i64 + 1,
                volume_raw: *v,
            })
            .collect()
    }

    #[test]
    fn test_scaled_against_group_max() {
        let result = normalize_volumes(&volumes(&[Some(40), Some(80), Some(20)]));
        assert_eq!(result, vec![(1, 50.0), (2, 100.0), (3, 25.0)]);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        let result = normalize_volumes(&volumes(&[Some(1), Some(3)]));
        assert_eq!(result, vec![(1, 33.33), (2, 100.0)]);

        let result = normalize_volumes(&volumes(&[Some(2), Some(3)]));
        assert_eq!(result[0].1, 66.67);
    }

    #[test]
    fn test_midpoint_rounds_to_even() {
        let result = normalize_volumes(&volumes(&[Some(13), Some(32)]));
        assert_eq!(result[0].1, 40.62);

        let result = normalize_volumes(&volumes(&[Some(5), Some(32)]));
        assert_eq!(result[0].1, 15.62);

        let result = normalize_volumes(&volumes(&[Some(1), Some(800)]));
        assert_eq!(result[0].1, 0.12);
    }

    #[test]
    fn test_all_zero_volumes_floor_max_at_one() {
        let metrics = volumes(&[Some(0), Some(0)]);
        assert_eq!(max_volume(&metrics), 1);
        assert_eq!(normalize_volumes(&metrics), vec![(1, 0.0), (2, 0.0)]);
    }

    #[test]
    fn test_null_raw_volume_left_untouched() {
        let metrics = volumes(&[Some(30), None, Some(60)]);
        assert_eq!(max_volume(&metrics), 60);
        assert_eq!(normalize_volumes(&metrics), vec![(1, 50.0), (3, 100.0)]);
    }

    #[test]
    fn test_group_max_is_exactly_100() {
        for raw in [vec![1i64], vec![7, 13, 29], vec![10, 80, 55, 80], vec![999, 1]] {
            let metrics = volumes(&raw.iter().copied().map(Some).collect::<Vec<_>>());
            let max = normalize_volumes(&metrics)
                .into_iter()
                .map(|(_, v)| v)
                .fold(f64::MIN, f64::max);
            assert_eq!(max, 100.0);
        }
    }

    #[test]
    fn test_normalization_is_deterministic() {
        let metrics = volumes(&[Some(17), Some(42), Some(3)]);
        assert_eq!(normalize_volumes(&metrics), normalize_volumes(&metrics));
    }
}
