// ==========================================
// 生产分析与预测引擎 - 同比/环比分析
// ==========================================
// 输入: 记录序列 + 周期类型(月/年) + now + 趋势阈值
// 输出: 当前周期 vs 上一周期快照、变化量、趋势、状态
// 红线: 不失败；空周期返回全 0 快照，变化量为 0 而非 NaN
// ==========================================

use crate::domain::analysis::{
    ComparativePeriodResult, CurrentPeriodSnapshot, PeriodDelta, PeriodSnapshot, PeriodWindow,
};
use crate::domain::record::DailyProductionRecord;
use crate::domain::types::{PeriodKind, PeriodStatus, TrendDirection};
use crate::engine::{calendar, stats};
use chrono::NaiveDate;

/// 趋势比较的样本段长度
const TREND_SEGMENT: usize = 7;
/// 每段最少样本数
const TREND_MIN_SAMPLES: usize = 3;

pub struct ComparativeAnalyzer {
    // 无状态引擎,不需要注入依赖
}

impl ComparativeAnalyzer {
    pub fn new() -> Self {
        Self {}
    }

    /// 当前周期 vs 上一周期
    ///
    /// # 参数
    /// - records: 升序记录
    /// - period_kind: 自然月 / 自然年
    /// - now: 参考日期
    /// - trend_threshold_pct: 趋势判定阈值 (%)
    pub fn analyze(
        &self,
        records: &[DailyProductionRecord],
        period_kind: PeriodKind,
        now: NaiveDate,
        trend_threshold_pct: f64,
    ) -> ComparativePeriodResult {
        let current_window = calendar::current_window(period_kind, now);
        let previous_window = calendar::previous_window(period_kind, now);

        let current_records = subset(records, &current_window);
        let previous_records = subset(records, &previous_window);

        let current = snapshot(&current_records);
        let previous = snapshot(&previous_records);
        let delta = compute_delta(&current, &previous);
        let trend = detect_trend(&current_records, trend_threshold_pct);
        let status = PeriodStatus::evaluate(current.efficiency_percent, current.hit_rate_percent());

        ComparativePeriodResult {
            period_kind,
            current_window,
            previous_window,
            current: CurrentPeriodSnapshot {
                stats: current,
                trend,
            },
            previous,
            delta,
            status,
        }
    }
}

impl Default for ComparativeAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn subset(records: &[DailyProductionRecord], window: &PeriodWindow) -> Vec<DailyProductionRecord> {
    records
        .iter()
        .filter(|r| window.contains(r.date()))
        .cloned()
        .collect()
}

/// 周期统计快照（空集合返回全 0）
pub fn snapshot(records: &[DailyProductionRecord]) -> PeriodSnapshot {
    if records.is_empty() {
        return PeriodSnapshot::default();
    }

    let total_produced = stats::total_produced(records);
    let total_target = stats::total_target(records);
    let efficiency_percent = if total_target > 0.0 {
        total_produced / total_target * 100.0
    } else {
        0.0
    };

    PeriodSnapshot {
        total_produced,
        total_target,
        efficiency_percent,
        days_meeting_target: stats::days_meeting_target(records),
        total_days: records.len(),
        average_daily_production: stats::mean_produced(records),
    }
}

/// 趋势: 后 7 条均值 vs 前 7 条均值
///
/// 两段都需至少 3 条；前段均值为 0 时: 后段为正视为上升，否则平稳
pub fn detect_trend(records: &[DailyProductionRecord], threshold_pct: f64) -> TrendDirection {
    let segment = TREND_SEGMENT.min(records.len());
    let first = &records[..segment];
    let last = &records[records.len() - segment..];

    if first.len() < TREND_MIN_SAMPLES || last.len() < TREND_MIN_SAMPLES {
        return TrendDirection::Stable;
    }

    let initial = stats::mean_produced(first);
    let recent = stats::mean_produced(last);
    if initial <= 0.0 {
        return if recent > 0.0 {
            TrendDirection::Rising
        } else {
            TrendDirection::Stable
        };
    }

    let change_pct = (recent - initial) / initial * 100.0;
    TrendDirection::from_change(change_pct, threshold_pct)
}

fn relative_change_pct(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else {
        0.0
    }
}

fn compute_delta(current: &PeriodSnapshot, previous: &PeriodSnapshot) -> PeriodDelta {
    let efficiency_change_points = if previous.efficiency_percent > 0.0 {
        current.efficiency_percent - previous.efficiency_percent
    } else {
        0.0
    };
    let consistency_change_points = if previous.total_days > 0 {
        current.hit_rate_percent() - previous.hit_rate_percent()
    } else {
        0.0
    };

    PeriodDelta {
        production_change_pct: relative_change_pct(
            current.total_produced,
            previous.total_produced,
        ),
        efficiency_change_points,
        target_change_pct: relative_change_pct(current.total_target, previous.total_target),
        consistency_change_points,
    }
}
