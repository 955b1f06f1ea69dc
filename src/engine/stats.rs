// ==========================================
// 生产分析与预测引擎 - 统计工具
// ==========================================
// 说明: 空输入一律返回 0，不产生 NaN
// ==========================================

use crate::domain::record::DailyProductionRecord;

/// 产量合计
pub fn total_produced(records: &[DailyProductionRecord]) -> f64 {
    records.iter().map(|r| r.produced_quantity()).sum()
}

/// 目标合计
pub fn total_target(records: &[DailyProductionRecord]) -> f64 {
    records.iter().map(|r| r.target_quantity()).sum()
}

/// 平均日产量
pub fn mean_produced(records: &[DailyProductionRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    total_produced(records) / records.len() as f64
}

/// 日产量总体标准差
pub fn std_dev_produced(records: &[DailyProductionRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let mean = mean_produced(records);
    let variance = records
        .iter()
        .map(|r| (r.produced_quantity() - mean).powi(2))
        .sum::<f64>()
        / records.len() as f64;
    variance.sqrt()
}

/// 达标天数
pub fn days_meeting_target(records: &[DailyProductionRecord]) -> usize {
    records.iter().filter(|r| r.met_target()).count()
}

/// 达标率 (%)
pub fn hit_rate_percent(records: &[DailyProductionRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    days_meeting_target(records) as f64 / records.len() as f64 * 100.0
}
