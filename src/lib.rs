// ==========================================
// 生产分析与预测引擎 - 核心库
// ==========================================
// 职责: 日产量一致性、同比环比、目标达成预测、表现模式、月度展望
// 技术栈: Rust + tokio + SQLite
// 系统定位: 分析引擎（无状态，宿主程序持有结果与触发时机）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与分析结果
pub mod domain;

// 配置层 - 分析参数
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA/建表）
pub mod db;

// 数据源端口与适配器
pub mod source;

// 引擎层 - 分析规则与编排
pub mod engine;

// 对外错误类型
pub mod error;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    ConsistencyRating, GoalStatus, PeriodKind, PeriodStatus, ProbabilityBand, TrendDirection,
};

// 领域实体与结果
pub use domain::{
    AnalysisBundle, ClassificationTargets, ComparativePeriodResult, ConsistencyMetrics,
    DailyProductionRecord, ForecastResult, MonthlyOutlook, NormalizationReport,
    PerformanceAnalysis, RawDayDocument, Recommendation,
};

// 配置
pub use config::{AnalyticsConfig, AnalyticsConfigReader, ConfigManager};

// 数据源
pub use source::{InMemoryProductionSource, ProductionDataSource, SqliteProductionSource};

// 引擎
pub use engine::{
    AnalyticsOrchestrator, CancellationHandle, CancellationSignal, ComparativeAnalyzer,
    ConsistencyCalculator, ForecastEngine, MonthlyOutlookEngine, PerformancePatternAnalyzer,
    RecordNormalizer,
};

// 错误
pub use error::{AnalyticsError, AnalyticsResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "生产分析与预测引擎";
