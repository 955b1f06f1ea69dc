// ==========================================
// 生产分析与预测引擎 - 日产量记录领域模型
// ==========================================
// 红线: 派生字段只能由构造函数根据产量/目标计算，禁止单独修改
// 红线: 同一集合内按日期升序、日期唯一
// ==========================================

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 缺少分类标签的条目统一归入此分类
pub const UNCLASSIFIED_LABEL: &str = "unclassified";

/// 分类产量拆分
///
/// 键: 分类标签（自由文本，唯一）
/// 值: 该分类当日产量 (kg)，非负
pub type ClassificationBreakdown = BTreeMap<String, f64>;

/// 星期序号（0 = 周日 … 6 = 周六）
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

// ==========================================
// DailyProductionRecord - 日产量记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyProductionRecord {
    // ===== 主键 =====
    date: NaiveDate,

    // ===== 主数据 =====
    produced_quantity: f64, // 当日产量 (kg)
    target_quantity: f64,   // 当日目标 (kg)
    shift1_quantity: f64,   // 一班产量 (kg)
    shift2_quantity: f64,   // 二班产量 (kg)
    classification_breakdown: ClassificationBreakdown,

    // ===== 派生字段 =====
    efficiency_percent: f64,
    weekday: u8,
    is_workday: bool,
    met_target: bool,
    deviation_from_target: f64,
}

impl DailyProductionRecord {
    /// 构造日产量记录（派生字段在此一次性计算）
    ///
    /// # 参数
    /// - date: 日期
    /// - produced_quantity: 当日产量
    /// - target_quantity: 当日目标
    /// - shift1_quantity / shift2_quantity: 班次产量
    /// - classification_breakdown: 分类产量拆分
    pub fn new(
        date: NaiveDate,
        produced_quantity: f64,
        target_quantity: f64,
        shift1_quantity: f64,
        shift2_quantity: f64,
        classification_breakdown: ClassificationBreakdown,
    ) -> Self {
        let efficiency_percent = if target_quantity > 0.0 {
            produced_quantity / target_quantity * 100.0
        } else {
            0.0
        };
        let weekday = weekday_index(date);

        Self {
            date,
            produced_quantity,
            target_quantity,
            shift1_quantity,
            shift2_quantity,
            classification_breakdown,
            efficiency_percent,
            weekday,
            // 周六(6) / 周日(0) 非工作日
            is_workday: weekday != 0 && weekday != 6,
            met_target: produced_quantity >= target_quantity,
            deviation_from_target: produced_quantity - target_quantity,
        }
    }

    /// 仅有日总量时的便捷构造（产量全部计入一班、未分类）
    pub fn from_totals(date: NaiveDate, produced_quantity: f64, target_quantity: f64) -> Self {
        let mut breakdown = ClassificationBreakdown::new();
        if produced_quantity > 0.0 {
            breakdown.insert(UNCLASSIFIED_LABEL.to_string(), produced_quantity);
        }
        Self::new(
            date,
            produced_quantity,
            target_quantity,
            produced_quantity,
            0.0,
            breakdown,
        )
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn produced_quantity(&self) -> f64 {
        self.produced_quantity
    }

    pub fn target_quantity(&self) -> f64 {
        self.target_quantity
    }

    pub fn shift1_quantity(&self) -> f64 {
        self.shift1_quantity
    }

    pub fn shift2_quantity(&self) -> f64 {
        self.shift2_quantity
    }

    pub fn classification_breakdown(&self) -> &ClassificationBreakdown {
        &self.classification_breakdown
    }

    pub fn efficiency_percent(&self) -> f64 {
        self.efficiency_percent
    }

    pub fn weekday(&self) -> u8 {
        self.weekday
    }

    pub fn is_workday(&self) -> bool {
        self.is_workday
    }

    pub fn met_target(&self) -> bool {
        self.met_target
    }

    pub fn deviation_from_target(&self) -> f64 {
        self.deviation_from_target
    }
}

// ==========================================
// ClassificationTargets - 分类日目标
// ==========================================
// 来源: 外部配置（分类标签 → 日目标 kg）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificationTargets(BTreeMap<String, f64>);

impl ClassificationTargets {
    pub fn new(targets: BTreeMap<String, f64>) -> Self {
        Self(targets)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// 日目标合计（只累加有限正数）
    pub fn daily_total(&self) -> f64 {
        self.0
            .values()
            .filter(|v| v.is_finite() && **v > 0.0)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, classification: &str) -> Option<f64> {
        self.0.get(classification).copied()
    }
}

impl FromIterator<(String, f64)> for ClassificationTargets {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
