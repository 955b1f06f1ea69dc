// ==========================================
// 生产分析与预测引擎 - 月度展望
// ==========================================
// 输入: 当月记录（升序）+ 月度目标 + now + 分析配置
// 输出: 短期趋势、前一日达标情况、月末预测与达成难度
// ==========================================
// 规则:
// - 趋势: 最近 7 条均值 vs 之前 7 条均值（无之前数据时视为相等）
// - 前一日达标: 乐观投影（前一日目标 × 剩余天数）
// - 前一日未达标且近 7 条达标率 < 70%: 保守投影（近期均值 × 剩余天数）
// - 前一日未达标但近 7 条达标率 >= 70%: 乐观投影，概率不低于 70
// ==========================================

use crate::config::AnalyticsConfig;
use crate::domain::analysis::{MonthlyOutlook, PreviousDayStatus};
use crate::domain::record::{ClassificationTargets, DailyProductionRecord};
use crate::domain::types::{GoalStatus, TrendDirection};
use crate::engine::consistency::recent_window;
use crate::engine::{calendar, stats};
use chrono::{Days, NaiveDate};
use tracing::debug;

/// 短期趋势样本段长度
const SHORT_TERM_WINDOW: usize = 7;
/// 每条记录贡献的数据置信度
const CONFIDENCE_PER_RECORD: f64 = 8.0;
/// 近期达标率分界线 (%)
const RECENT_HIT_RATE_FLOOR: f64 = 70.0;
/// "可达成" 所允许的最大日产量提升 (%)
const ACHIEVABLE_INCREASE_PCT: f64 = 20.0;

/// 前一日达标时的基础概率
const BASE_PROBABILITY: f64 = 85.0;

pub struct MonthlyOutlookEngine {
    // 无状态引擎,不需要注入依赖
}

impl MonthlyOutlookEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 生成月度展望
    ///
    /// # 参数
    /// - month_records: 当月记录（升序）
    /// - monthly_target: 月度目标，见 resolve_monthly_target
    /// - now: 参考日期
    /// - config: 趋势阈值、兜底日目标
    pub fn evaluate(
        &self,
        month_records: &[DailyProductionRecord],
        monthly_target: f64,
        now: NaiveDate,
        config: &AnalyticsConfig,
    ) -> MonthlyOutlook {
        let remaining_days = calendar::remaining_days_in_month(now);
        let month_produced = stats::total_produced(month_records);
        let required_daily_production = if remaining_days > 0 {
            (monthly_target - month_produced).max(0.0) / remaining_days as f64
        } else {
            0.0
        };
        let progress_pct = if monthly_target > 0.0 {
            month_produced / monthly_target * 100.0
        } else {
            0.0
        };

        // 无数据: 剩余天数与日需产量按 0 报告，达成难度仍按真实日需产量评估
        if month_records.is_empty() {
            debug!(now = %now, "当月无数据，返回中性展望");
            return MonthlyOutlook {
                trend: TrendDirection::Stable,
                variation_pct: 0.0,
                data_confidence: 0.0,
                monthly_target,
                month_produced,
                progress_pct,
                projected_to_meet_target: false,
                remaining_days: 0,
                required_daily_production: 0.0,
                recent_average: 0.0,
                required_increase_pct: 0.0,
                goal_status: goal_status(
                    month_produced,
                    monthly_target,
                    required_daily_production,
                    0.0,
                ),
                success_probability: 0,
                previous_day: previous_day_status(month_records, now, config),
            };
        }

        // ===== 短期趋势 =====
        let recent = recent_window(month_records, SHORT_TERM_WINDOW);
        let earlier_end = month_records.len().saturating_sub(SHORT_TERM_WINDOW);
        let earlier = recent_window(&month_records[..earlier_end], SHORT_TERM_WINDOW);

        let recent_average = stats::mean_produced(recent);
        let earlier_average = if earlier.is_empty() {
            recent_average
        } else {
            stats::mean_produced(earlier)
        };
        let variation = if earlier_average > 0.0 {
            (recent_average - earlier_average) / earlier_average * 100.0
        } else {
            0.0
        };
        let trend = TrendDirection::from_change(variation, config.trend_threshold_pct);

        // ===== 前一日 & 投影 =====
        let previous_day = previous_day_status(month_records, now, config);
        let recent_hit_rate = stats::hit_rate_percent(recent);
        let (projected_to_meet_target, probability) = project(
            &previous_day,
            month_produced,
            monthly_target,
            remaining_days as f64,
            recent_average,
            recent_hit_rate,
        );

        // ===== 达成难度 =====
        let required_increase_pct = if recent_average > 0.0 {
            (required_daily_production - recent_average) / recent_average * 100.0
        } else {
            0.0
        };

        let outlook = MonthlyOutlook {
            trend,
            variation_pct: variation.abs(),
            data_confidence: (month_records.len() as f64 * CONFIDENCE_PER_RECORD).min(100.0),
            monthly_target,
            month_produced,
            progress_pct,
            projected_to_meet_target,
            remaining_days,
            required_daily_production,
            recent_average,
            required_increase_pct,
            goal_status: goal_status(
                month_produced,
                monthly_target,
                required_daily_production,
                recent_average,
            ),
            success_probability: probability.round().clamp(0.0, 100.0) as u8,
            previous_day,
        };

        debug!(
            trend = %outlook.trend,
            goal_status = %outlook.goal_status,
            success_probability = outlook.success_probability,
            "月度展望完成"
        );
        outlook
    }
}

impl Default for MonthlyOutlookEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// 月度目标
///
/// 1. 分类日目标合计 > 0 → 合计 × 每月工作日
/// 2. 配置了月度最低目标 → 该值
/// 3. 否则 → 每月工作日 × 兜底日目标
pub fn resolve_monthly_target(targets: &ClassificationTargets, config: &AnalyticsConfig) -> f64 {
    let workdays = f64::from(config.workdays_per_month);
    let daily_total = targets.daily_total();

    if daily_total > 0.0 {
        daily_total * workdays
    } else if config.monthly_minimum_target > 0.0 {
        config.monthly_minimum_target
    } else {
        workdays * config.fallback_daily_target
    }
}

/// 前一日（now - 1）达标情况；无记录时产量为 0
fn previous_day_status(
    month_records: &[DailyProductionRecord],
    now: NaiveDate,
    config: &AnalyticsConfig,
) -> PreviousDayStatus {
    let date = now.checked_sub_days(Days::new(1)).unwrap_or(now);
    let record = month_records.iter().find(|r| r.date() == date);

    let produced = record.map(|r| r.produced_quantity()).unwrap_or(0.0);
    let target = record
        .or_else(|| month_records.last())
        .map(|r| r.target_quantity())
        .unwrap_or(config.fallback_daily_target);

    PreviousDayStatus {
        date,
        produced,
        target,
        met_target: produced >= target,
        pending: (target - produced).max(0.0),
    }
}

/// (月末是否可达成, 成功概率)
fn project(
    previous_day: &PreviousDayStatus,
    month_produced: f64,
    monthly_target: f64,
    remaining_days: f64,
    recent_average: f64,
    recent_hit_rate: f64,
) -> (bool, f64) {
    if previous_day.met_target {
        let projection = month_produced + previous_day.target * remaining_days;
        let meets = projection >= monthly_target;
        let probability = if meets {
            (80.0 + recent_hit_rate / 100.0 * 20.0).min(95.0)
        } else {
            BASE_PROBABILITY
        };
        return (meets, probability);
    }

    if recent_hit_rate < RECENT_HIT_RATE_FLOOR {
        let projection = month_produced + recent_average * remaining_days;
        let meets = projection >= monthly_target;
        let probability = if meets {
            (50.0 + recent_hit_rate).min(90.0)
        } else {
            let deficit_ratio = if monthly_target > 0.0 {
                (monthly_target - projection) / monthly_target
            } else {
                0.0
            };
            (recent_hit_rate - deficit_ratio * 100.0).max(10.0)
        };
        (meets, probability)
    } else {
        let projection = month_produced + previous_day.target * remaining_days;
        (projection >= monthly_target, recent_hit_rate.max(70.0))
    }
}

fn goal_status(
    month_produced: f64,
    monthly_target: f64,
    required_daily_production: f64,
    recent_average: f64,
) -> GoalStatus {
    if month_produced >= monthly_target {
        return GoalStatus::Achieved;
    }
    if required_daily_production <= recent_average {
        return GoalStatus::EasilyAchievable;
    }
    let increase_pct = if recent_average > 0.0 {
        (required_daily_production - recent_average) / recent_average * 100.0
    } else {
        0.0
    };
    if increase_pct <= ACHIEVABLE_INCREASE_PCT {
        GoalStatus::Achievable
    } else {
        GoalStatus::Difficult
    }
}
