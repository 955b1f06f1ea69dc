use crate::config::AnalyticsConfig;
use crate::domain::analysis::{ForecastResult, ProductionScenarios};
use crate::domain::recommendation::Recommendation;
use crate::domain::record::DailyProductionRecord;
use crate::domain::types::ProbabilityBand;
use crate::engine::consistency::recent_window;
use crate::engine::{calendar, stats};
use chrono::NaiveDate;
use tracing::debug;

// ==========================================
// 概率与建议阈值
// ==========================================

/// 月度概率 = thf * 0.7 + 月进度 * 30，限制在 [5, 95]
const MONTHLY_HIT_WEIGHT: f64 = 0.7;
const MONTHLY_PROGRESS_WEIGHT: f64 = 30.0;
const MONTHLY_PROBABILITY_MIN: f64 = 5.0;
const MONTHLY_PROBABILITY_MAX: f64 = 95.0;

/// 年度概率 = thf * 0.6 + 历史达标占比 * 40，限制在 [10, 90]
const ANNUAL_HIT_WEIGHT: f64 = 0.6;
const ANNUAL_HISTORY_WEIGHT: f64 = 40.0;
const ANNUAL_PROBABILITY_MIN: f64 = 10.0;
const ANNUAL_PROBABILITY_MAX: f64 = 90.0;

/// 无数据时的中性概率
const NEUTRAL_PROBABILITY: f64 = 50.0;

/// 情景系数
const CONSERVATIVE_SIGMA: f64 = 0.5;
const OPTIMISTIC_SIGMA: f64 = 0.3;

/// 建议触发阈值
const CONSISTENCY_ALERT_THF: f64 = 70.0;
const CAPACITY_ALERT_RATIO: f64 = 1.2;
const CORRECTIVE_ALERT_PROBABILITY: f64 = 60.0;

// ==========================================
// ForecastEngine - 预测引擎
// ==========================================
pub struct ForecastEngine {
    // 无状态引擎,不需要注入依赖
}

impl ForecastEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 生成预测
    ///
    /// # 参数
    /// - records: 升序记录（全部窗口内记录）
    /// - now: 参考日期
    /// - config: 近期窗口大小、兜底日目标
    ///
    /// # 步骤
    /// 1. 月末/年末剩余自然日
    /// 2. 当月子集 [月初, now]，为空返回中性预测
    /// 3. 近期窗口达标频率 → 月度/年度概率
    /// 4. 剩余目标 / 剩余天数 → 日需产量
    /// 5. 近期窗口标准差 → 三种情景
    /// 6. 按阈值追加建议
    pub fn forecast(
        &self,
        records: &[DailyProductionRecord],
        now: NaiveDate,
        config: &AnalyticsConfig,
    ) -> ForecastResult {
        let remaining_month = calendar::remaining_days_in_month(now);
        let remaining_year = calendar::remaining_days_in_year(now);

        let month_start = calendar::first_day_of_month(now);
        let month_records: Vec<DailyProductionRecord> = records
            .iter()
            .filter(|r| r.date() >= month_start && r.date() <= now)
            .cloned()
            .collect();

        if month_records.is_empty() {
            debug!(now = %now, "当月无数据，返回中性预测");
            return neutral_forecast(remaining_month, remaining_year, config);
        }

        let month_produced = stats::total_produced(&month_records);
        let month_target = stats::total_target(&month_records);
        let average = stats::mean_produced(&month_records);

        let recent = recent_window(records, config.recent_window_size);
        let recent_hit_frequency = stats::hit_rate_percent(recent);
        let all_time_hit_fraction = stats::hit_rate_percent(records) / 100.0;

        let progress_ratio = if month_target > 0.0 {
            month_produced / month_target
        } else {
            0.0
        };
        let monthly_probability = (recent_hit_frequency * MONTHLY_HIT_WEIGHT
            + progress_ratio * MONTHLY_PROGRESS_WEIGHT)
            .clamp(MONTHLY_PROBABILITY_MIN, MONTHLY_PROBABILITY_MAX);
        let annual_probability = (recent_hit_frequency * ANNUAL_HIT_WEIGHT
            + all_time_hit_fraction * ANNUAL_HISTORY_WEIGHT)
            .clamp(ANNUAL_PROBABILITY_MIN, ANNUAL_PROBABILITY_MAX);

        let required_daily_production = if remaining_month > 0 {
            (month_target - month_produced).max(0.0) / remaining_month as f64
        } else {
            0.0
        };

        let sigma = stats::std_dev_produced(recent);
        let scenarios = ProductionScenarios {
            conservative: (average - sigma * CONSERVATIVE_SIGMA).max(0.0),
            realistic: average,
            optimistic: average + sigma * OPTIMISTIC_SIGMA,
        };

        let mut recommendations = Vec::new();
        if recent_hit_frequency < CONSISTENCY_ALERT_THF {
            recommendations.push(Recommendation::ReviewProcessConsistency);
        }
        if required_daily_production > scenarios.realistic * CAPACITY_ALERT_RATIO {
            recommendations.push(Recommendation::IncreaseDailyCapacity);
        }
        if monthly_probability < CORRECTIVE_ALERT_PROBABILITY {
            recommendations.push(Recommendation::ImmediateCorrectiveAction);
        }

        debug!(
            month_records = month_records.len(),
            monthly_probability,
            annual_probability,
            required_daily_production,
            recommendations = recommendations.len(),
            "预测完成"
        );

        ForecastResult {
            monthly_target_probability: monthly_probability,
            annual_target_probability: annual_probability,
            monthly_probability_band: ProbabilityBand::from_probability(monthly_probability),
            annual_probability_band: ProbabilityBand::from_probability(annual_probability),
            required_daily_production,
            remaining_workdays_in_month: remaining_month,
            remaining_days_in_year: remaining_year,
            scenarios,
            recommendations,
        }
    }
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn neutral_forecast(
    remaining_month: i64,
    remaining_year: i64,
    config: &AnalyticsConfig,
) -> ForecastResult {
    ForecastResult {
        monthly_target_probability: NEUTRAL_PROBABILITY,
        annual_target_probability: NEUTRAL_PROBABILITY,
        monthly_probability_band: ProbabilityBand::from_probability(NEUTRAL_PROBABILITY),
        annual_probability_band: ProbabilityBand::from_probability(NEUTRAL_PROBABILITY),
        required_daily_production: config.fallback_daily_target,
        remaining_workdays_in_month: remaining_month,
        remaining_days_in_year: remaining_year,
        scenarios: ProductionScenarios::default(),
        recommendations: vec![Recommendation::InsufficientData],
    }
}
