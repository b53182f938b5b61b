//! 天汇总引擎性能基准测试

use std::hint::black_box;

use chrono::{Duration, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pulso::pipeline::{ClubDailyRollup, ClubSourceDailyRollup, DailyRollup, daily_window, normalize_volumes};
use pulso::storage::{MetricSample, MetricVolume};

/// 生成一天的样本：clubs × sources × 24 个小时桶
fn create_day_samples(clubs: i64, sources: i64) -> Vec<MetricSample> {
    let end = Utc.with_ymd_and_hms(2026, 10, 20, 0, 0, 0).unwrap();
    let mut samples = Vec::with_capacity((clubs * sources * 24) as usize);

    for hour in 0..24 {
        let bucket_start = end - Duration::hours(24 - hour);
        for source_id in 1..=sources {
            for club_id in 1..=clubs {
                let raw = (club_id * 7 + source_id * 13 + hour * 3) % 70 + 10;
                samples.push(MetricSample {
                    club_id,
                    source_id,
                    bucket_start,
                    volume_raw: Some(raw),
                    // 每 11 个样本留一个空值
                    volume_normalized: (raw % 11 != 0).then(|| raw as f64 / 80.0 * 100.0),
                    sentiment_score: (raw % 5 != 0).then(|| (raw as f64 - 45.0) / 100.0),
                });
            }
        }
    }
    samples
}

fn bench_build_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("daily_rollup/build_rows");
    let now = Utc.with_ymd_and_hms(2026, 10, 20, 0, 5, 0).unwrap();
    let window = daily_window(now);

    for (clubs, sources) in [(20, 3), (200, 5), (1000, 8)] {
        let samples = create_day_samples(clubs, sources);
        group.throughput(Throughput::Elements(samples.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("club", format!("{}x{}", clubs, sources)),
            &samples,
            |b, samples| {
                b.iter(|| black_box(ClubDailyRollup.build_rows(samples, &window, now)));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("club_source", format!("{}x{}", clubs, sources)),
            &samples,
            |b, samples| {
                b.iter(|| black_box(ClubSourceDailyRollup.build_rows(samples, &window, now)));
            },
        );
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalizer/normalize_volumes");

    for size in [10usize, 100, 1000] {
        let metrics: Vec<MetricVolume> = (0..size)
            .map(|i| MetricVolume {
                id: i as i64,
                volume_raw: Some((i as i64 * 37) % 71 + 10),
            })
            .collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &metrics, |b, metrics| {
            b.iter(|| black_box(normalize_volumes(metrics)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build_rows, bench_normalize);
criterion_main!(benches);
