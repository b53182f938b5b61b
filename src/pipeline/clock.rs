//! 时间桶边界计算
//!
//! 所有阶段都从同一个 `now` 推导窗口，保证采集、归一化和汇总看到同一时间片。

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// 截断到整点（分、秒、纳秒清零）
pub fn truncate_to_hour(ts: DateTime<Utc>) -> DateTime<Utc> {
    let secs_into_hour = ts.timestamp().rem_euclid(3600);
    ts - Duration::seconds(secs_into_hour) - Duration::nanoseconds(ts.timestamp_subsec_nanos() as i64)
}

/// 上一个完整小时桶的起点：`floor(now, 1h) - 1h`
pub fn hourly_bucket_start(now: DateTime<Utc>) -> DateTime<Utc> {
    truncate_to_hour(now) - Duration::hours(1)
}

/// 天汇总窗口 `[end - 24h, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// `end` 所在的日历日
    pub date: NaiveDate,
}

impl DayWindow {
    /// 右开区间：恰好落在 `end` 的桶属于下一次运行
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts < self.end
    }
}

pub fn daily_window(now: DateTime<Utc>) -> DayWindow {
    let end = truncate_to_hour(now);
    DayWindow {
        start: end - Duration::hours(24),
        end,
        date: end.date_naive(),
    }
}
