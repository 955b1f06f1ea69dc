// ==========================================
// 生产分析与预测引擎 - 分析结果值对象
// ==========================================
// 职责: 各分析引擎的输出结构（只读、每次分析重新计算）
// 序列化: camelCase，供前端直接消费
// ==========================================

use crate::domain::record::DailyProductionRecord;
use crate::domain::recommendation::Recommendation;
use crate::domain::types::{
    ConsistencyRating, GoalStatus, PeriodKind, PeriodStatus, ProbabilityBand, TrendDirection,
};
use crate::i18n;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

// ==========================================
// ConsistencyMetrics - 一致性指标
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyMetrics {
    pub standard_deviation: f64,       // 总体标准差 (kg)
    pub coefficient_of_variation: f64, // 变异系数 (%)
    pub reliability_index: f64,        // 可靠性指数 (0-100)
    pub target_hit_frequency: f64,     // 达标频率 (%)
    pub longest_positive_streak: usize,
    pub longest_negative_streak: usize,
    pub rating: ConsistencyRating,
}

impl ConsistencyMetrics {
    /// 空输入时的中性结果
    pub fn empty() -> Self {
        Self {
            standard_deviation: 0.0,
            coefficient_of_variation: 0.0,
            reliability_index: 0.0,
            target_hit_frequency: 0.0,
            longest_positive_streak: 0,
            longest_negative_streak: 0,
            rating: ConsistencyRating::Low,
        }
    }
}

// ==========================================
// 对比分析
// ==========================================

/// 闭区间日期窗口 [start, end]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PeriodWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// 周期统计快照
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSnapshot {
    pub total_produced: f64,
    pub total_target: f64,
    pub efficiency_percent: f64,
    pub days_meeting_target: usize,
    pub total_days: usize,
    pub average_daily_production: f64,
}

impl PeriodSnapshot {
    /// 达标率 (%)；无数据时为 0
    pub fn hit_rate_percent(&self) -> f64 {
        if self.total_days == 0 {
            0.0
        } else {
            self.days_meeting_target as f64 / self.total_days as f64 * 100.0
        }
    }
}

/// 当前周期快照（附带趋势）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentPeriodSnapshot {
    #[serde(flatten)]
    pub stats: PeriodSnapshot,
    pub trend: TrendDirection,
}

/// 当前 vs 上一周期的变化
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodDelta {
    pub production_change_pct: f64,      // 产量变化 (%)
    pub efficiency_change_points: f64,   // 效率变化 (百分点)
    pub target_change_pct: f64,          // 目标变化 (%)
    pub consistency_change_points: f64,  // 达标率变化 (百分点)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparativePeriodResult {
    pub period_kind: PeriodKind,
    pub current_window: PeriodWindow,
    pub previous_window: PeriodWindow,
    pub current: CurrentPeriodSnapshot,
    pub previous: PeriodSnapshot,
    pub delta: PeriodDelta,
    pub status: PeriodStatus,
}

// ==========================================
// 预测
// ==========================================

/// 生产情景（保守 <= 现实 <= 乐观）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionScenarios {
    pub conservative: f64,
    pub realistic: f64,
    pub optimistic: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    pub monthly_target_probability: f64,
    pub annual_target_probability: f64,
    pub monthly_probability_band: ProbabilityBand,
    pub annual_probability_band: ProbabilityBand,
    pub required_daily_production: f64,
    /// 距月末的自然日数
    pub remaining_workdays_in_month: i64,
    pub remaining_days_in_year: i64,
    pub scenarios: ProductionScenarios,
    pub recommendations: Vec<Recommendation>,
}

// ==========================================
// 表现模式
// ==========================================

/// 周分组汇总（连续 7 条记录一组）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_produced: f64,
    pub average_production: f64,
    pub sample_count: usize,
}

/// 星期规律
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayPattern {
    pub average_production: f64,
    pub target_hit_frequency: f64,
    pub sample_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceAnalysis {
    pub best_day: Option<DailyProductionRecord>,
    pub worst_day: Option<DailyProductionRecord>,
    pub best_week: Option<WeekSummary>,
    pub worst_week: Option<WeekSummary>,
    /// 键: 星期序号 0(周日) ~ 6(周六)，无样本的星期不出现
    pub weekday_patterns: BTreeMap<u8, WeekdayPattern>,
}

impl PerformanceAnalysis {
    pub fn empty() -> Self {
        Self {
            best_day: None,
            worst_day: None,
            best_week: None,
            worst_week: None,
            weekday_patterns: BTreeMap::new(),
        }
    }
}

// ==========================================
// 月度展望
// ==========================================

/// 前一日达标情况
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousDayStatus {
    pub date: NaiveDate,
    pub produced: f64,
    pub target: f64,
    pub met_target: bool,
    pub pending: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyOutlook {
    pub trend: TrendDirection,
    pub variation_pct: f64,
    pub data_confidence: f64,
    pub monthly_target: f64,
    pub month_produced: f64,
    pub progress_pct: f64,
    pub projected_to_meet_target: bool,
    pub remaining_days: i64,
    pub required_daily_production: f64,
    pub recent_average: f64,
    pub required_increase_pct: f64,
    pub goal_status: GoalStatus,
    pub success_probability: u8,
    pub previous_day: PreviousDayStatus,
}

impl MonthlyOutlook {
    /// 日产量需提升幅度提示（无需提升时返回 None）
    pub fn required_increase_message(&self) -> Option<String> {
        if self.required_increase_pct <= 0.0 {
            return None;
        }
        let pct = format!("{:.1}", self.required_increase_pct);
        Some(i18n::t_with_args("outlook.required_increase", &[("pct", &pct)]))
    }
}

// ==========================================
// 归一化诊断
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizationReport {
    pub accepted: usize,
    pub skipped_invalid_key: usize,
    pub skipped_malformed: usize,
    pub skipped_out_of_window: usize,
    pub skipped_duplicate: usize,
}

impl NormalizationReport {
    pub fn total_skipped(&self) -> usize {
        self.skipped_invalid_key
            + self.skipped_malformed
            + self.skipped_out_of_window
            + self.skipped_duplicate
    }
}

// ==========================================
// AnalysisBundle - 完整分析结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisBundle {
    pub run_id: String,
    pub reference_date: NaiveDate,
    pub period_window_months: u32,
    pub records: Vec<DailyProductionRecord>,
    pub normalization: NormalizationReport,
    pub consistency: ConsistencyMetrics,
    pub comparative_by_month: ComparativePeriodResult,
    pub comparative_by_year: ComparativePeriodResult,
    pub forecast: ForecastResult,
    pub performance: PerformanceAnalysis,
    pub outlook: MonthlyOutlook,
}
