// ==========================================
// 生产分析与预测引擎 - 内存数据源
// ==========================================
// 用途: 宿主程序已缓存数据时直接注入；测试中模拟数据源故障与延迟
// ==========================================

use crate::domain::raw_document::RawDayDocument;
use crate::domain::record::ClassificationTargets;
use crate::source::error::{SourceError, SourceResult};
use crate::source::ProductionDataSource;
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct InMemoryProductionSource {
    documents: Vec<RawDayDocument>,
    targets: ClassificationTargets,
    document_failure: Option<String>,
    target_failure: Option<String>,
    latency: Option<Duration>,
}

impl InMemoryProductionSource {
    pub fn new(documents: Vec<RawDayDocument>, targets: ClassificationTargets) -> Self {
        Self {
            documents,
            targets,
            ..Self::default()
        }
    }

    /// 拉取日文档时返回 Unavailable
    pub fn with_document_failure(mut self, message: impl Into<String>) -> Self {
        self.document_failure = Some(message.into());
        self
    }

    /// 拉取分类目标时返回 Unavailable
    pub fn with_target_failure(mut self, message: impl Into<String>) -> Self {
        self.target_failure = Some(message.into());
        self
    }

    /// 每次拉取前等待（模拟慢数据源）
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl ProductionDataSource for InMemoryProductionSource {
    async fn fetch_day_documents(&self) -> SourceResult<Vec<RawDayDocument>> {
        self.simulate_latency().await;
        if let Some(message) = &self.document_failure {
            return Err(SourceError::Unavailable(message.clone()));
        }
        Ok(self.documents.clone())
    }

    async fn fetch_classification_targets(&self) -> SourceResult<ClassificationTargets> {
        self.simulate_latency().await;
        if let Some(message) = &self.target_failure {
            return Err(SourceError::Unavailable(message.clone()));
        }
        Ok(self.targets.clone())
    }
}
