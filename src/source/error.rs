// ==========================================
// 生产分析与预测引擎 - 数据源错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 数据源（端口）错误类型
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("数据源连接失败: {0}")]
    Connection(String),

    #[error("数据源查询失败: {0}")]
    Query(String),

    #[error("数据源锁获取失败: {0}")]
    Lock(String),

    #[error("数据源不可用: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for SourceError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => SourceError::Query(msg),
            rusqlite::Error::InvalidPath(path) => {
                SourceError::Connection(path.display().to_string())
            }
            _ => SourceError::Query(err.to_string()),
        }
    }
}

/// Result 类型别名
pub type SourceResult<T> = Result<T, SourceError>;
