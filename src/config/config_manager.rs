// ==========================================
// 生产分析与预测引擎 - 配置管理器
// ==========================================
// 职责: 分析配置加载、查询、覆写
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::analytics_config::defaults;
use crate::config::analytics_config_trait::AnalyticsConfigReader;
use crate::config::error::{ConfigError, ConfigResult};
use crate::db::{init_schema, open_sqlite_connection};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::fmt::Display;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA 与建表（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let conn_guard = conn
                .lock()
                .map_err(|e| ConfigError::Lock(e.to_string()))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
            init_schema(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| ConfigError::Lock(e.to_string()))?;

        conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|e| ConfigError::ReadFailed {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    /// 读取 global scope 的配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        self.get_config_value(key)
    }

    /// 写入 global scope 的配置值（存在则覆盖）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| ConfigError::Lock(e.to_string()))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;

        tracing::info!(config_key = key, value = value, "配置已更新");
        Ok(())
    }

    /// 读取并解析配置值，缺失或格式错误时使用默认值
    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> ConfigResult<T>
    where
        T: FromStr + Display + Copy,
    {
        let raw = match self.get_config_value(key)? {
            Some(v) => v,
            None => return Ok(default),
        };

        match raw.trim().parse::<T>() {
            Ok(value) => Ok(value),
            Err(_) => {
                tracing::warn!(
                    config_key = key,
                    raw_value = %raw,
                    default_value = %default,
                    "配置格式错误，使用默认值"
                );
                Ok(default)
            }
        }
    }
}

// ==========================================
// AnalyticsConfigReader Trait 实现
// ==========================================
#[async_trait]
impl AnalyticsConfigReader for ConfigManager {
    async fn get_fallback_daily_target(&self) -> ConfigResult<f64> {
        self.get_parsed_or_default(
            config_keys::FALLBACK_DAILY_TARGET,
            defaults::FALLBACK_DAILY_TARGET,
        )
    }

    async fn get_trend_threshold_pct(&self) -> ConfigResult<f64> {
        self.get_parsed_or_default(config_keys::TREND_THRESHOLD_PCT, defaults::TREND_THRESHOLD_PCT)
    }

    async fn get_recent_window_size(&self) -> ConfigResult<usize> {
        self.get_parsed_or_default(config_keys::RECENT_WINDOW_SIZE, defaults::RECENT_WINDOW_SIZE)
    }

    async fn get_default_period_window_months(&self) -> ConfigResult<u32> {
        self.get_parsed_or_default(
            config_keys::PERIOD_WINDOW_MONTHS,
            defaults::PERIOD_WINDOW_MONTHS,
        )
    }

    async fn get_workdays_per_month(&self) -> ConfigResult<u32> {
        self.get_parsed_or_default(config_keys::WORKDAYS_PER_MONTH, defaults::WORKDAYS_PER_MONTH)
    }

    async fn get_monthly_minimum_target(&self) -> ConfigResult<f64> {
        self.get_parsed_or_default(
            config_keys::MONTHLY_MINIMUM_TARGET,
            defaults::MONTHLY_MINIMUM_TARGET,
        )
    }

    async fn get_fetch_timeout_secs(&self) -> ConfigResult<u64> {
        self.get_parsed_or_default(config_keys::FETCH_TIMEOUT_SECS, defaults::FETCH_TIMEOUT_SECS)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 目标
    pub const FALLBACK_DAILY_TARGET: &str = "fallback_daily_target";
    pub const MONTHLY_MINIMUM_TARGET: &str = "monthly_minimum_target";
    pub const WORKDAYS_PER_MONTH: &str = "workdays_per_month";

    // 分类日目标 (JSON: {"分类": kg})
    pub const CLASSIFICATION_TARGETS: &str = "classification_targets";

    // 趋势与窗口
    pub const TREND_THRESHOLD_PCT: &str = "trend_threshold_pct";
    pub const RECENT_WINDOW_SIZE: &str = "recent_window_size";
    pub const PERIOD_WINDOW_MONTHS: &str = "period_window_months";

    // 数据拉取
    pub const FETCH_TIMEOUT_SECS: &str = "fetch_timeout_secs";
}
