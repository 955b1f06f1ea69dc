// ==========================================
// 生产分析与预测引擎 - SQLite 数据源
// ==========================================
// 表: production_day (day_key, payload_json, updated_at)
// 表: config_kv (scope_id='global', key='classification_targets')
// 红线: 只读取，不校验文档键（由归一化器处理）
// ==========================================

use crate::config::config_keys;
use crate::db::{configure_sqlite_connection, init_schema, open_sqlite_connection};
use crate::domain::raw_document::RawDayDocument;
use crate::domain::record::ClassificationTargets;
use crate::source::error::{SourceError, SourceResult};
use crate::source::ProductionDataSource;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

pub struct SqliteProductionSource {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteProductionSource {
    /// 打开数据库并建表
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> SourceResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| SourceError::Connection(format!("{}: {}", db_path, e)))?;
        init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建（与 ConfigManager 共享连接）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> SourceResult<Self> {
        {
            let guard = conn.lock().map_err(|e| SourceError::Lock(e.to_string()))?;
            configure_sqlite_connection(&guard)?;
            init_schema(&guard)?;
        }
        Ok(Self { conn })
    }

    fn get_conn(&self) -> SourceResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| SourceError::Lock(e.to_string()))
    }

    /// 写入/覆盖一天的文档（供宿主程序与测试造数）
    pub fn upsert_day_document(&self, day_key: &str, payload: &Value) -> SourceResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO production_day (day_key, payload_json, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(day_key) DO UPDATE SET
                payload_json = excluded.payload_json,
                updated_at = excluded.updated_at
            "#,
            params![day_key, payload.to_string()],
        )?;
        Ok(())
    }
}

/// 解析分类目标 JSON 对象；非数值项忽略
fn parse_targets(raw: &str) -> ClassificationTargets {
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "分类目标 JSON 解析失败，按未配置处理");
            return ClassificationTargets::empty();
        }
    };

    let Some(object) = value.as_object() else {
        warn!("分类目标不是 JSON 对象，按未配置处理");
        return ClassificationTargets::empty();
    };

    object
        .iter()
        .filter_map(|(label, v)| {
            let target = match v {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            };
            match target {
                Some(t) => Some((label.clone(), t)),
                None => {
                    debug!(classification = %label, "分类目标非数值，忽略");
                    None
                }
            }
        })
        .collect()
}

#[async_trait]
impl ProductionDataSource for SqliteProductionSource {
    async fn fetch_day_documents(&self) -> SourceResult<Vec<RawDayDocument>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT day_key, payload_json FROM production_day ORDER BY day_key")?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut documents = Vec::new();
        for row in rows {
            let (key, payload) = row?;
            let body = match serde_json::from_str::<Value>(&payload) {
                Ok(body) => body,
                Err(e) => {
                    // 交给归一化器计入异常文档
                    warn!(day_key = %key, error = %e, "日文档 JSON 非法");
                    Value::Null
                }
            };
            documents.push(RawDayDocument::new(key, body));
        }

        debug!(documents = documents.len(), "已读取日文档");
        Ok(documents)
    }

    async fn fetch_classification_targets(&self) -> SourceResult<ClassificationTargets> {
        let conn = self.get_conn()?;
        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![config_keys::CLASSIFICATION_TARGETS],
                |row| row.get(0),
            )
            .optional()?;

        Ok(raw.as_deref().map(parse_targets).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn in_memory_source() -> SqliteProductionSource {
        let conn = Connection::open_in_memory().unwrap();
        SqliteProductionSource::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[tokio::test]
    async fn test_documents_ordered_and_invalid_json_as_null() {
        let source = in_memory_source();
        source
            .upsert_day_document("2024-03-02", &json!({"shift1": []}))
            .unwrap();
        source
            .upsert_day_document("2024-03-01", &json!({"summary": {"totalProduced": 10}}))
            .unwrap();
        {
            let conn = source.get_conn().unwrap();
            conn.execute(
                "INSERT INTO production_day (day_key, payload_json) VALUES ('2024-03-03', '{broken')",
                [],
            )
            .unwrap();
        }

        let docs = source.fetch_day_documents().await.unwrap();
        let keys: Vec<&str> = docs.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, vec!["2024-03-01", "2024-03-02", "2024-03-03"]);
        assert_eq!(docs[2].body, Value::Null);
    }

    #[tokio::test]
    async fn test_targets_ignore_non_numeric() {
        let source = in_memory_source();
        {
            let conn = source.get_conn().unwrap();
            conn.execute(
                "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)",
                params![
                    config_keys::CLASSIFICATION_TARGETS,
                    r#"{"A": 1200, "B": "800", "C": "n/a", "D": null}"#
                ],
            )
            .unwrap();
        }

        let targets = source.fetch_classification_targets().await.unwrap();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets.daily_total(), 2000.0);
    }

    #[tokio::test]
    async fn test_missing_targets_is_empty() {
        let source = in_memory_source();
        let targets = source.fetch_classification_targets().await.unwrap();
        assert!(targets.is_empty());
    }
}
