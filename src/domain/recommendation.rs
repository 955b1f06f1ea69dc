// ==========================================
// 生产分析与预测引擎 - 预测建议
// ==========================================
// 建议以枚举表达，代码稳定；展示文案经 i18n 翻译
// ==========================================

use crate::i18n;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    /// 当月无数据，无法预测
    InsufficientData,
    /// 达标频率 < 70%
    ReviewProcessConsistency,
    /// 日需产量超出现实情景 20% 以上
    IncreaseDailyCapacity,
    /// 月度达标概率 < 60%
    ImmediateCorrectiveAction,
}

impl Recommendation {
    pub fn code(&self) -> &'static str {
        match self {
            Recommendation::InsufficientData => "INSUFFICIENT_DATA",
            Recommendation::ReviewProcessConsistency => "REVIEW_PROCESS_CONSISTENCY",
            Recommendation::IncreaseDailyCapacity => "INCREASE_DAILY_CAPACITY",
            Recommendation::ImmediateCorrectiveAction => "IMMEDIATE_CORRECTIVE_ACTION",
        }
    }

    fn message_key(&self) -> &'static str {
        match self {
            Recommendation::InsufficientData => "recommendation.insufficient_data",
            Recommendation::ReviewProcessConsistency => "recommendation.review_process_consistency",
            Recommendation::IncreaseDailyCapacity => "recommendation.increase_daily_capacity",
            Recommendation::ImmediateCorrectiveAction => {
                "recommendation.immediate_corrective_action"
            }
        }
    }

    /// 当前语言下的建议文案
    pub fn message(&self) -> String {
        i18n::t(self.message_key())
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
