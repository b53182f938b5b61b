//! 通用分组汇总引擎
//!
//! 按键函数把指标分组，再用列提取器和归约函数（sum / mean / max / count）
//! 计算每组的汇总值。空值在归约前被过滤。

use std::collections::BTreeMap;

use crate::storage::MetricSample;

/// 一个分组：同一键下的全部指标
#[derive(Debug)]
pub struct Group<'a, K> {
    pub key: K,
    samples: Vec<&'a MetricSample>,
}

impl<'a, K> Group<'a, K> {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 某列的非空值
    pub fn values<'b, T: 'b>(
        &'b self,
        column: fn(&MetricSample) -> Option<T>,
    ) -> impl Iterator<Item = T> + 'b {
        self.samples.iter().filter_map(move |s| column(s))
    }
}

// ============ 列提取器 ============

pub fn raw_volume(sample: &MetricSample) -> Option<i64> {
    sample.volume_raw
}

pub fn normalized_volume(sample: &MetricSample) -> Option<f64> {
    sample.volume_normalized
}

pub fn sentiment(sample: &MetricSample) -> Option<f64> {
    sample.sentiment_score
}

// ============ 归约函数 ============

/// 没有值时返回 None
pub fn sum<T: std::iter::Sum<T>>(values: impl Iterator<Item = T>) -> Option<T> {
    let mut values = values.peekable();
    values.peek()?;
    Some(values.sum())
}

pub fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (total, n) = values.fold((0.0, 0usize), |(total, n), v| (total + v, n + 1));
    (n > 0).then(|| total / n as f64)
}

pub fn max(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.reduce(f64::max)
}

pub fn count<T>(values: impl Iterator<Item = T>) -> usize {
    values.count()
}

// ============ 引擎 ============

/// 按键分组，保持组内原始顺序
pub fn group_by<K: Ord + Copy>(
    samples: &[MetricSample],
    key: impl Fn(&MetricSample) -> K,
) -> Vec<Group<'_, K>> {
    let mut groups: BTreeMap<K, Vec<&MetricSample>> = BTreeMap::new();
    for sample in samples {
        groups.entry(key(sample)).or_default().push(sample);
    }

    groups
        .into_iter()
        .map(|(key, samples)| Group { key, samples })
        .collect()
}

/// 分组后逐组汇总；`summarize` 返回 None 的分组被跳过。输出按键升序
pub fn rollup<K, R>(
    samples: &[MetricSample],
    key: impl Fn(&MetricSample) -> K,
    summarize: impl Fn(&Group<'_, K>) -> Option<R>,
) -> Vec<R>
where
    K: Ord + Copy,
{
    group_by(samples, key)
        .iter()
        .filter_map(|group| summarize(group))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample(club_id: i64, source_id: i64, raw: Option<i64>, norm: Option<f64>) -> MetricSample {
        MetricSample {
            club_id,
            source_id,
            bucket_start: Utc.with_ymd_and_hms(2026, 10, 19, 3, 0, 0).unwrap(),
            volume_raw: raw,
            volume_normalized: norm,
            sentiment_score: None,
        }
    }

    #[test]
    fn test_reducers_ignore_empty_input() {
        assert_eq!(sum(std::iter::empty::<i64>()), None);
        assert_eq!(mean(std::iter::empty()), None);
        assert_eq!(max(std::iter::empty()), None);
        assert_eq!(count(std::iter::empty::<f64>()), 0);
    }

    #[test]
    fn test_reducers_on_values() {
        assert_eq!(sum([10i64, 20, 30].into_iter()), Some(60));
        assert_eq!(mean([50.0, 100.0].into_iter()), Some(75.0));
        assert_eq!(max([12.5, 99.0, 3.0].into_iter()), Some(99.0));
        assert_eq!(count([1, 2, 3].into_iter()), 3);
    }

    #[test]
    fn test_group_by_orders_keys_ascending() {
        let samples = vec![
            sample(3, 1, Some(1), None),
            sample(1, 2, Some(2), None),
            sample(3, 2, Some(3), None),
            sample(2, 1, Some(4), None),
        ];

        let groups = group_by(&samples, |s| s.club_id);
        let keys: Vec<i64> = groups.iter().map(|g| g.key).collect();
        assert_eq!(keys, vec![1, 2, 3]);
        assert_eq!(groups[2].len(), 2);
    }

    #[test]
    fn test_composite_key_grouping() {
        let samples = vec![
            sample(1, 2, Some(1), None),
            sample(1, 1, Some(2), None),
            sample(1, 2, Some(3), None),
        ];

        let groups = group_by(&samples, |s| (s.club_id, s.source_id));
        let keys: Vec<(i64, i64)> = groups.iter().map(|g| g.key).collect();
        assert_eq!(keys, vec![(1, 1), (1, 2)]);
        assert_eq!(sum(groups[1].values(raw_volume)), Some(4));
    }

    #[test]
    fn test_values_filters_nulls() {
        let samples = vec![
            sample(1, 1, Some(10), Some(50.0)),
            sample(1, 1, None, None),
            sample(1, 1, Some(30), None),
        ];
        let groups = group_by(&samples, |s| s.club_id);

        assert_eq!(count(groups[0].values(raw_volume)), 2);
        assert_eq!(count(groups[0].values(normalized_volume)), 1);
        assert_eq!(count(groups[0].values(sentiment)), 0);
    }

    #[test]
    fn test_rollup_skips_rejected_groups() {
        let samples = vec![
            sample(1, 1, None, None),
            sample(2, 1, Some(5), None),
        ];

        let totals = rollup(
            &samples,
            |s| s.club_id,
            |g| sum(g.values(raw_volume)).map(|total| (g.key, total)),
        );
        assert_eq!(totals, vec![(2, 5)]);
    }
}
