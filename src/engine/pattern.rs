// ==========================================
// 生产分析与预测引擎 - 表现模式分析
// ==========================================
// 输出: 最佳/最差日（按效率）、最佳/最差周（按周均产量）、星期规律
// 周分组: 按日期顺序每 7 条一组，不重叠；不足 5 条的组不参与比较
// ==========================================

use crate::domain::analysis::{PerformanceAnalysis, WeekSummary, WeekdayPattern};
use crate::domain::record::DailyProductionRecord;
use crate::engine::stats;
use std::collections::BTreeMap;

/// 每组记录数
const WEEK_GROUP_SIZE: usize = 7;
/// 参与比较的最少记录数
const WEEK_MIN_RECORDS: usize = 5;

pub struct PerformancePatternAnalyzer {
    // 无状态引擎,不需要注入依赖
}

impl PerformancePatternAnalyzer {
    pub fn new() -> Self {
        Self {}
    }

    /// 分析表现模式
    ///
    /// 并列时取先出现者；空输入返回 None 与空映射
    pub fn analyze(&self, records: &[DailyProductionRecord]) -> PerformanceAnalysis {
        if records.is_empty() {
            return PerformanceAnalysis::empty();
        }

        let best_day = first_by(records, |candidate, current| {
            candidate.efficiency_percent() > current.efficiency_percent()
        });
        let worst_day = first_by(records, |candidate, current| {
            candidate.efficiency_percent() < current.efficiency_percent()
        });

        let weeks = weekly_groups(records);
        let best_week = first_by(&weeks, |candidate, current| {
            candidate.average_production > current.average_production
        });
        let worst_week = first_by(&weeks, |candidate, current| {
            candidate.average_production < current.average_production
        });

        PerformanceAnalysis {
            best_day,
            worst_day,
            best_week,
            worst_week,
            weekday_patterns: weekday_patterns(records),
        }
    }
}

impl Default for PerformancePatternAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// 逐个比较，只有严格更优才替换（并列保留先出现者）
fn first_by<T: Clone>(items: &[T], better: impl Fn(&T, &T) -> bool) -> Option<T> {
    let mut iter = items.iter();
    let mut chosen = iter.next()?;
    for item in iter {
        if better(item, chosen) {
            chosen = item;
        }
    }
    Some(chosen.clone())
}

/// 连续 7 条一组，保留记录数 >= 5 的组
pub fn weekly_groups(records: &[DailyProductionRecord]) -> Vec<WeekSummary> {
    records
        .chunks(WEEK_GROUP_SIZE)
        .filter(|chunk| chunk.len() >= WEEK_MIN_RECORDS)
        .filter_map(|chunk| {
            let first = chunk.first()?;
            let last = chunk.last()?;
            Some(WeekSummary {
                start: first.date(),
                end: last.date(),
                total_produced: stats::total_produced(chunk),
                average_production: stats::mean_produced(chunk),
                sample_count: chunk.len(),
            })
        })
        .collect()
}

/// 星期规律（键 0 = 周日 … 6 = 周六，无样本的星期不出现）
pub fn weekday_patterns(records: &[DailyProductionRecord]) -> BTreeMap<u8, WeekdayPattern> {
    let mut buckets: BTreeMap<u8, Vec<DailyProductionRecord>> = BTreeMap::new();
    for record in records {
        buckets
            .entry(record.weekday())
            .or_default()
            .push(record.clone());
    }

    buckets
        .into_iter()
        .map(|(weekday, samples)| {
            (
                weekday,
                WeekdayPattern {
                    average_production: stats::mean_produced(&samples),
                    target_hit_frequency: stats::hit_rate_percent(&samples),
                    sample_count: samples.len(),
                },
            )
        })
        .collect()
}
