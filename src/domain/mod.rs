// ==========================================
// 生产分析与预测引擎 - 领域模型层
// ==========================================
// 职责: 定义日产量记录、原始文档、分析结果与分类枚举
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod analysis;
pub mod raw_document;
pub mod recommendation;
pub mod record;
pub mod types;

// 重导出核心类型
pub use analysis::{
    AnalysisBundle, ComparativePeriodResult, ConsistencyMetrics, CurrentPeriodSnapshot,
    ForecastResult, MonthlyOutlook, NormalizationReport, PerformanceAnalysis, PeriodDelta,
    PeriodSnapshot, PeriodWindow, PreviousDayStatus, ProductionScenarios, WeekSummary,
    WeekdayPattern,
};
pub use raw_document::{DayPayload, DaySummary, RawDayDocument, ShiftEntry};
pub use recommendation::Recommendation;
pub use record::{
    weekday_index, ClassificationBreakdown, ClassificationTargets, DailyProductionRecord,
    UNCLASSIFIED_LABEL,
};
pub use types::{
    ConsistencyRating, GoalStatus, PeriodKind, PeriodStatus, ProbabilityBand, TrendDirection,
};
