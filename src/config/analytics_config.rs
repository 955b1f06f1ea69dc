// ==========================================
// 生产分析与预测引擎 - 分析配置
// ==========================================
// 职责: 汇总分析引擎的全部可调参数（原先散落的魔法常量）
// 说明: 引擎只依赖本结构体，不直接读库
// ==========================================

use crate::config::config_manager::config_keys;
use crate::config::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ==========================================
// 默认值
// ==========================================
pub mod defaults {
    /// 未配置分类目标时的日目标 (kg)
    pub const FALLBACK_DAILY_TARGET: f64 = 2000.0;
    /// 趋势判定阈值 (%)
    pub const TREND_THRESHOLD_PCT: f64 = 5.0;
    /// 近期窗口（记录条数）
    pub const RECENT_WINDOW_SIZE: usize = 30;
    /// 默认分析窗口（月）
    pub const PERIOD_WINDOW_MONTHS: u32 = 3;
    /// 每月工作日数（用于推算月目标）
    pub const WORKDAYS_PER_MONTH: u32 = 22;
    /// 月度最低目标 (kg)，0 表示未配置
    pub const MONTHLY_MINIMUM_TARGET: f64 = 0.0;
    /// 数据拉取超时（秒）
    pub const FETCH_TIMEOUT_SECS: u64 = 30;
}

// ==========================================
// AnalyticsConfig - 分析配置快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyticsConfig {
    pub fallback_daily_target: f64,
    pub trend_threshold_pct: f64,
    pub recent_window_size: usize,
    pub default_period_window_months: u32,
    pub workdays_per_month: u32,
    pub monthly_minimum_target: f64,
    pub fetch_timeout_secs: u64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            fallback_daily_target: defaults::FALLBACK_DAILY_TARGET,
            trend_threshold_pct: defaults::TREND_THRESHOLD_PCT,
            recent_window_size: defaults::RECENT_WINDOW_SIZE,
            default_period_window_months: defaults::PERIOD_WINDOW_MONTHS,
            workdays_per_month: defaults::WORKDAYS_PER_MONTH,
            monthly_minimum_target: defaults::MONTHLY_MINIMUM_TARGET,
            fetch_timeout_secs: defaults::FETCH_TIMEOUT_SECS,
        }
    }
}

impl AnalyticsConfig {
    /// 数据拉取超时
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// 校验配置取值范围
    ///
    /// # 返回
    /// - Ok(()): 全部合法
    /// - Err(ConfigError::InvalidValue): 第一个非法项
    pub fn validate(&self) -> ConfigResult<()> {
        check_non_negative(config_keys::FALLBACK_DAILY_TARGET, self.fallback_daily_target)?;
        check_non_negative(config_keys::TREND_THRESHOLD_PCT, self.trend_threshold_pct)?;
        check_non_negative(config_keys::MONTHLY_MINIMUM_TARGET, self.monthly_minimum_target)?;

        if self.recent_window_size == 0 {
            return Err(invalid(
                config_keys::RECENT_WINDOW_SIZE,
                self.recent_window_size,
                "近期窗口至少为 1",
            ));
        }
        if self.workdays_per_month == 0 || self.workdays_per_month > 31 {
            return Err(invalid(
                config_keys::WORKDAYS_PER_MONTH,
                self.workdays_per_month,
                "每月工作日数必须在 1~31 之间",
            ));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(invalid(
                config_keys::FETCH_TIMEOUT_SECS,
                self.fetch_timeout_secs,
                "拉取超时至少为 1 秒",
            ));
        }

        Ok(())
    }
}

fn check_non_negative(key: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(key, value, "必须为有限非负数"))
    }
}

fn invalid(key: &str, value: impl ToString, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    }
}
