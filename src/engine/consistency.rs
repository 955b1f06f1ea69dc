// ==========================================
// 生产分析与预测引擎 - 一致性指标计算
// ==========================================
// 输出: 标准差 / 变异系数 / 达标频率 / 连续达标(未达标)天数 / 可靠性指数
// 公式: reliability = clamp(100 - cv + thf * 0.3, 0, 100)
// ==========================================

use crate::domain::analysis::ConsistencyMetrics;
use crate::domain::record::DailyProductionRecord;
use crate::domain::types::ConsistencyRating;
use crate::engine::stats;

/// 达标频率在可靠性指数中的权重
const HIT_FREQUENCY_WEIGHT: f64 = 0.3;

pub struct ConsistencyCalculator {
    // 无状态引擎,不需要注入依赖
}

impl ConsistencyCalculator {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算一致性指标
    ///
    /// 空输入返回全 0（评级 LOW）
    pub fn calculate(&self, records: &[DailyProductionRecord]) -> ConsistencyMetrics {
        if records.is_empty() {
            return ConsistencyMetrics::empty();
        }

        let mean = stats::mean_produced(records);
        let standard_deviation = stats::std_dev_produced(records);
        let coefficient_of_variation = if mean > 0.0 {
            standard_deviation / mean * 100.0
        } else {
            0.0
        };
        let target_hit_frequency = stats::hit_rate_percent(records);
        let (longest_positive_streak, longest_negative_streak) = longest_streaks(records);

        let reliability_index = (100.0 - coefficient_of_variation
            + target_hit_frequency * HIT_FREQUENCY_WEIGHT)
            .clamp(0.0, 100.0);

        ConsistencyMetrics {
            standard_deviation,
            coefficient_of_variation,
            reliability_index,
            target_hit_frequency,
            longest_positive_streak,
            longest_negative_streak,
            rating: ConsistencyRating::from_reliability_index(reliability_index),
        }
    }
}

impl Default for ConsistencyCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// 近期窗口: 最后 n 条记录（不足 n 条时返回全部）
pub fn recent_window(records: &[DailyProductionRecord], n: usize) -> &[DailyProductionRecord] {
    &records[records.len().saturating_sub(n)..]
}

/// (最长连续达标, 最长连续未达标)
fn longest_streaks(records: &[DailyProductionRecord]) -> (usize, usize) {
    let mut current_positive = 0;
    let mut current_negative = 0;
    let mut max_positive = 0;
    let mut max_negative = 0;

    for record in records {
        if record.met_target() {
            current_positive += 1;
            current_negative = 0;
            max_positive = max_positive.max(current_positive);
        } else {
            current_negative += 1;
            current_positive = 0;
            max_negative = max_negative.max(current_negative);
        }
    }

    (max_positive, max_negative)
}
