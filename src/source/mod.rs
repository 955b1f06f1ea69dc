// ==========================================
// 生产分析与预测引擎 - 数据源端口
// ==========================================
// 职责: 定义引擎读取原始日文档与分类目标的接口
// 红线: 引擎只通过本端口读数据，不拼 SQL、不写数据
// ==========================================

pub mod error;
pub mod memory_source;
pub mod sqlite_source;

pub use error::{SourceError, SourceResult};
pub use memory_source::InMemoryProductionSource;
pub use sqlite_source::SqliteProductionSource;

use crate::domain::raw_document::RawDayDocument;
use crate::domain::record::ClassificationTargets;
use async_trait::async_trait;

// ==========================================
// ProductionDataSource Trait
// ==========================================
// 实现者: SqliteProductionSource、InMemoryProductionSource
#[async_trait]
pub trait ProductionDataSource: Send + Sync {
    /// 拉取全部日文档
    ///
    /// # 返回
    /// - Ok(Vec<RawDayDocument>): 文档集合（顺序不作要求，键未校验）
    /// - Err(SourceError): 数据源不可用
    async fn fetch_day_documents(&self) -> SourceResult<Vec<RawDayDocument>>;

    /// 拉取分类日目标
    ///
    /// # 返回
    /// - Ok(ClassificationTargets): 分类 → 日目标 (kg)，可能为空
    async fn fetch_classification_targets(&self) -> SourceResult<ClassificationTargets>;
}
