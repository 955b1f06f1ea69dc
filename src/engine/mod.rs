// ==========================================
// 生产分析与预测引擎 - 引擎层
// ==========================================
// 职责: 归一化 + 各分析引擎 + 编排
// 红线: 引擎不拼 SQL、不读系统时钟，now 一律显式传入
// ==========================================

pub mod calendar;
pub mod cancellation;
pub mod comparative;
pub mod consistency;
pub mod forecast;
pub mod normalizer;
pub mod orchestrator;
pub mod outlook;
pub mod pattern;
pub mod stats;

// 重导出核心引擎
pub use cancellation::{CancellationHandle, CancellationSignal};
pub use comparative::ComparativeAnalyzer;
pub use consistency::ConsistencyCalculator;
pub use forecast::ForecastEngine;
pub use normalizer::{NormalizationOutcome, RecordNormalizer};
pub use orchestrator::AnalyticsOrchestrator;
pub use outlook::MonthlyOutlookEngine;
pub use pattern::PerformancePatternAnalyzer;
