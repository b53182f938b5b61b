use std::fmt;

/// 阶段正常结束的两种形态；失败走 `Err(PulsoError)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    Inserted(usize),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// 窗口内没有任何指标
    EmptyWindow,
    /// 有指标，但每个分组都不满足输出条件
    NoEligibleGroups,
}

impl StageOutcome {
    pub fn inserted(&self) -> usize {
        match self {
            StageOutcome::Inserted(n) => *n,
            StageOutcome::Skipped(_) => 0,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, StageOutcome::Skipped(_))
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptyWindow => write!(f, "no metrics in window"),
            SkipReason::NoEligibleGroups => write!(f, "no group had enough data"),
        }
    }
}

impl fmt::Display for StageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageOutcome::Inserted(n) => write!(f, "inserted {} rows", n),
            StageOutcome::Skipped(reason) => write!(f, "skipped ({})", reason),
        }
    }
}

/// 单个来源的归一化结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SourceNormalization {
    Normalized { count: usize, max: i64 },
    NoData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceReport {
    pub source_id: i64,
    pub code: String,
    pub result: SourceNormalization,
}

/// 一次归一化运行的汇报
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizeReport {
    pub sources: Vec<SourceReport>,
}

impl NormalizeReport {
    /// 实际写回的行数
    pub fn updated(&self) -> usize {
        self.sources
            .iter()
            .map(|s| match s.result {
                SourceNormalization::Normalized { count, .. } => count,
                SourceNormalization::NoData => 0,
            })
            .sum()
    }

    pub fn sources_without_data(&self) -> usize {
        self.sources
            .iter()
            .filter(|s| s.result == SourceNormalization::NoData)
            .count()
    }
}
