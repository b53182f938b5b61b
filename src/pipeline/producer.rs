//! 指标生产者
//!
//! 采集阶段只关心每个 (club, source) 的一次观测值，数据从哪里来由实现决定。

use chrono::{DateTime, Utc};

use super::round2;
use crate::config::MockProducerConfig;
use crate::errors::Result;
use crate::storage::{Club, Source};

/// 单个 (club, source, bucket) 的原始观测
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub volume_raw: Option<i64>,
    pub sentiment_score: Option<f64>,
}

pub trait MetricProducer: Send + Sync {
    fn observe(&self, club: &Club, source: &Source, bucket_start: DateTime<Utc>) -> Observation;
}

/// 随机模拟数据：音量取 `[volume_min, volume_max]` 的整数，情感取区间内均匀值并保留两位小数
#[derive(Debug, Clone)]
pub struct RandomProducer {
    volume_min: i64,
    volume_max: i64,
    sentiment_min: f64,
    sentiment_max: f64,
}

impl RandomProducer {
    pub fn new(config: &MockProducerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            volume_min: config.volume_min,
            volume_max: config.volume_max,
            sentiment_min: config.sentiment_min,
            sentiment_max: config.sentiment_max,
        })
    }
}

impl Default for RandomProducer {
    fn default() -> Self {
        let config = MockProducerConfig::default();
        Self {
            volume_min: config.volume_min,
            volume_max: config.volume_max,
            sentiment_min: config.sentiment_min,
            sentiment_max: config.sentiment_max,
        }
    }
}

impl MetricProducer for RandomProducer {
    fn observe(&self, _club: &Club, _source: &Source, _bucket_start: DateTime<Utc>) -> Observation {
        let volume = rand::random_range(self.volume_min..=self.volume_max);
        let sentiment = if self.sentiment_min < self.sentiment_max {
            rand::random_range(self.sentiment_min..self.sentiment_max)
        } else {
            self.sentiment_min
        };

        Observation {
            volume_raw: Some(volume),
            sentiment_score: Some(round2(sentiment)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn club() -> Club {
        Club {
            id: 1,
            name: "Flamengo".into(),
        }
    }

    fn source() -> Source {
        Source {
            id: 10,
            code: "tw".into(),
            name: "Twitter".into(),
        }
    }

    #[test]
    fn test_random_producer_stays_in_bounds() {
        let producer = RandomProducer::default();
        let bucket = Utc.with_ymd_and_hms(2026, 10, 19, 13, 0, 0).unwrap();

        for _ in 0..1000 {
            let obs = producer.observe(&club(), &source(), bucket);
            let volume = obs.volume_raw.unwrap();
            let sentiment = obs.sentiment_score.unwrap();

            assert!((10..=80).contains(&volume));
            assert!((-0.4..=0.7).contains(&sentiment));
            assert_eq!(sentiment, round2(sentiment));
        }
    }

    #[test]
    fn test_random_producer_degenerate_range() {
        let producer = RandomProducer::new(&MockProducerConfig {
            volume_min: 5,
            volume_max: 5,
            sentiment_min: 0.3,
            sentiment_max: 0.3,
        })
        .unwrap();
        let bucket = Utc.with_ymd_and_hms(2026, 10, 19, 13, 0, 0).unwrap();

        let obs = producer.observe(&club(), &source(), bucket);
        assert_eq!(obs.volume_raw, Some(5));
        assert_eq!(obs.sentiment_score, Some(0.3));
    }

    #[test]
    fn test_random_producer_rejects_inverted_bounds() {
        let result = RandomProducer::new(&MockProducerConfig {
            volume_min: 80,
            volume_max: 10,
            sentiment_min: -0.4,
            sentiment_max: 0.7,
        });
        assert!(result.is_err());
    }
}
