// ==========================================
// 生产分析与预测引擎 - 对外错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 异常文档不报错（计入 NormalizationReport），数据不足返回中性结果
// ==========================================

use crate::config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// 日文档拉取失败或超时，不返回部分结果
    #[error("生产数据不可用: {0}")]
    DataUnavailable(String),

    #[error("分析已取消")]
    Cancelled,

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
