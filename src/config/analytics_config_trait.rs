// ==========================================
// 生产分析与预测引擎 - 分析配置读取 Trait
// ==========================================
// 职责: 定义分析引擎所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::analytics_config::AnalyticsConfig;
use crate::config::error::ConfigResult;
use async_trait::async_trait;

// ==========================================
// AnalyticsConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）、AnalyticsConfig（静态配置）
#[async_trait]
pub trait AnalyticsConfigReader: Send + Sync {
    /// 获取兜底日目标（未配置分类目标或合计为 0 时使用）
    ///
    /// # 默认值
    /// - 2000.0 (kg)
    async fn get_fallback_daily_target(&self) -> ConfigResult<f64>;

    /// 获取趋势判定阈值
    ///
    /// # 返回
    /// - f64: 百分比，相对变化严格超过该值才判定为上升/下降
    ///
    /// # 默认值
    /// - 5.0
    async fn get_trend_threshold_pct(&self) -> ConfigResult<f64>;

    /// 获取近期窗口大小（记录条数）
    ///
    /// # 默认值
    /// - 30
    ///
    /// # 用途
    /// - 预测引擎的达标频率与标准差取样
    async fn get_recent_window_size(&self) -> ConfigResult<usize>;

    /// 获取默认分析窗口（月）
    ///
    /// # 默认值
    /// - 3
    async fn get_default_period_window_months(&self) -> ConfigResult<u32>;

    /// 获取每月工作日数
    ///
    /// # 默认值
    /// - 22
    ///
    /// # 用途
    /// - 月度目标 = 日目标 × 工作日数
    async fn get_workdays_per_month(&self) -> ConfigResult<u32>;

    /// 获取月度最低目标（0 表示未配置）
    ///
    /// # 默认值
    /// - 0.0
    async fn get_monthly_minimum_target(&self) -> ConfigResult<f64>;

    /// 获取数据拉取超时（秒）
    ///
    /// # 默认值
    /// - 30
    async fn get_fetch_timeout_secs(&self) -> ConfigResult<u64>;

    /// 读取完整配置快照并校验
    ///
    /// # 逻辑
    /// 1. 逐项读取
    /// 2. 组装 AnalyticsConfig
    /// 3. validate() 校验取值范围
    async fn snapshot(&self) -> ConfigResult<AnalyticsConfig> {
        let config = AnalyticsConfig {
            fallback_daily_target: self.get_fallback_daily_target().await?,
            trend_threshold_pct: self.get_trend_threshold_pct().await?,
            recent_window_size: self.get_recent_window_size().await?,
            default_period_window_months: self.get_default_period_window_months().await?,
            workdays_per_month: self.get_workdays_per_month().await?,
            monthly_minimum_target: self.get_monthly_minimum_target().await?,
            fetch_timeout_secs: self.get_fetch_timeout_secs().await?,
        };
        config.validate()?;
        Ok(config)
    }
}

// ==========================================
// 静态配置实现（进程内配置 / 测试）
// ==========================================
#[async_trait]
impl AnalyticsConfigReader for AnalyticsConfig {
    async fn get_fallback_daily_target(&self) -> ConfigResult<f64> {
        Ok(self.fallback_daily_target)
    }

    async fn get_trend_threshold_pct(&self) -> ConfigResult<f64> {
        Ok(self.trend_threshold_pct)
    }

    async fn get_recent_window_size(&self) -> ConfigResult<usize> {
        Ok(self.recent_window_size)
    }

    async fn get_default_period_window_months(&self) -> ConfigResult<u32> {
        Ok(self.default_period_window_months)
    }

    async fn get_workdays_per_month(&self) -> ConfigResult<u32> {
        Ok(self.workdays_per_month)
    }

    async fn get_monthly_minimum_target(&self) -> ConfigResult<f64> {
        Ok(self.monthly_minimum_target)
    }

    async fn get_fetch_timeout_secs(&self) -> ConfigResult<u64> {
        Ok(self.fetch_timeout_secs)
    }
}
