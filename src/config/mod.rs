// ==========================================
// 生产分析与预测引擎 - 配置层
// ==========================================
// 职责: 分析参数管理，支持 config_kv 覆写
// 存储: config_kv 表
// ==========================================

pub mod analytics_config;
pub mod analytics_config_trait;
pub mod config_manager;
pub mod error;

// 重导出核心配置类型
pub use analytics_config::{defaults, AnalyticsConfig};
pub use analytics_config_trait::AnalyticsConfigReader;
pub use config_manager::{config_keys, ConfigManager};
pub use error::{ConfigError, ConfigResult};
