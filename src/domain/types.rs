// ==========================================
// 生产分析与预测引擎 - 领域类型定义
// ==========================================
// 职责: 分析结果中使用的等级/分类枚举
// 序列化格式: SCREAMING_SNAKE_CASE (与前端约定一致)
// ==========================================

use crate::i18n;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 对比周期 (Period Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodKind {
    Month, // 自然月
    Year,  // 自然年
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKind::Month => write!(f, "MONTH"),
            PeriodKind::Year => write!(f, "YEAR"),
        }
    }
}

// ==========================================
// 趋势方向 (Trend Direction)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendDirection {
    Rising,  // 上升
    Stable,  // 平稳
    Falling, // 下降
}

impl TrendDirection {
    /// 按相对变化率判定趋势
    ///
    /// # 参数
    /// - change_pct: 相对变化率（%）
    /// - threshold_pct: 判定阈值（%），严格大于才算上升/下降
    pub fn from_change(change_pct: f64, threshold_pct: f64) -> Self {
        if change_pct > threshold_pct {
            TrendDirection::Rising
        } else if change_pct < -threshold_pct {
            TrendDirection::Falling
        } else {
            TrendDirection::Stable
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Rising => write!(f, "RISING"),
            TrendDirection::Stable => write!(f, "STABLE"),
            TrendDirection::Falling => write!(f, "FALLING"),
        }
    }
}

// ==========================================
// 一致性评级 (Consistency Rating)
// ==========================================
// 由可靠性指数划分: >=80 / >=65 / >=50 / 其他
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsistencyRating {
    Low,       // 偏低
    Fair,      // 一般
    Good,      // 良好
    Excellent, // 优秀
}

impl ConsistencyRating {
    pub fn from_reliability_index(index: f64) -> Self {
        if index >= 80.0 {
            ConsistencyRating::Excellent
        } else if index >= 65.0 {
            ConsistencyRating::Good
        } else if index >= 50.0 {
            ConsistencyRating::Fair
        } else {
            ConsistencyRating::Low
        }
    }

    /// i18n 文案键
    pub fn message_key(&self) -> &'static str {
        match self {
            ConsistencyRating::Excellent => "rating.excellent",
            ConsistencyRating::Good => "rating.good",
            ConsistencyRating::Fair => "rating.fair",
            ConsistencyRating::Low => "rating.low",
        }
    }

    /// 当前语言下的评级文案
    pub fn message(&self) -> String {
        i18n::t(self.message_key())
    }
}

impl fmt::Display for ConsistencyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsistencyRating::Excellent => write!(f, "EXCELLENT"),
            ConsistencyRating::Good => write!(f, "GOOD"),
            ConsistencyRating::Fair => write!(f, "FAIR"),
            ConsistencyRating::Low => write!(f, "LOW"),
        }
    }
}

// ==========================================
// 概率区间 (Probability Band)
// ==========================================
// 顺序: Low < Medium < High
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProbabilityBand {
    Low,    // < 60
    Medium, // 60 ~ 80
    High,   // >= 80
}

impl ProbabilityBand {
    pub fn from_probability(probability: f64) -> Self {
        if probability >= 80.0 {
            ProbabilityBand::High
        } else if probability >= 60.0 {
            ProbabilityBand::Medium
        } else {
            ProbabilityBand::Low
        }
    }
}

impl fmt::Display for ProbabilityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbabilityBand::Low => write!(f, "LOW"),
            ProbabilityBand::Medium => write!(f, "MEDIUM"),
            ProbabilityBand::High => write!(f, "HIGH"),
        }
    }
}

// ==========================================
// 周期状态 (Period Status)
// ==========================================
// 依据: 效率与达标率两个维度同时判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodStatus {
    OnTrack,   // 效率 >= 90 且 达标率 >= 80
    Attention, // 效率 >= 70 且 达标率 >= 60
    Critical,  // 其他
}

impl PeriodStatus {
    pub fn evaluate(efficiency_percent: f64, hit_rate_percent: f64) -> Self {
        if efficiency_percent >= 90.0 && hit_rate_percent >= 80.0 {
            PeriodStatus::OnTrack
        } else if efficiency_percent >= 70.0 && hit_rate_percent >= 60.0 {
            PeriodStatus::Attention
        } else {
            PeriodStatus::Critical
        }
    }
}

impl fmt::Display for PeriodStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodStatus::OnTrack => write!(f, "ON_TRACK"),
            PeriodStatus::Attention => write!(f, "ATTENTION"),
            PeriodStatus::Critical => write!(f, "CRITICAL"),
        }
    }
}

// ==========================================
// 月度目标达成难度 (Goal Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalStatus {
    Achieved,         // 已达成
    EasilyAchievable, // 近 7 日均值已满足日需求
    Achievable,       // 需提升 <= 20%
    Difficult,        // 需提升 > 20%
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalStatus::Achieved => write!(f, "ACHIEVED"),
            GoalStatus::EasilyAchievable => write!(f, "EASILY_ACHIEVABLE"),
            GoalStatus::Achievable => write!(f, "ACHIEVABLE"),
            GoalStatus::Difficult => write!(f, "DIFFICULT"),
        }
    }
}
