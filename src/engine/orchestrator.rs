// ==========================================
// 生产分析与预测引擎 - 分析编排器
// ==========================================
// 用途: 拉取数据 → 归一化 → 运行各分析引擎 → 组装结果
// 红线: 编排器不持有分析状态，每次调用独立
// 红线: 取消后不产出结果；日文档拉取失败不返回部分结果
// ==========================================

use crate::config::{AnalyticsConfig, AnalyticsConfigReader};
use crate::domain::analysis::AnalysisBundle;
use crate::domain::raw_document::RawDayDocument;
use crate::domain::record::{ClassificationTargets, DailyProductionRecord};
use crate::domain::types::PeriodKind;
use crate::engine::cancellation::CancellationSignal;
use crate::engine::normalizer::resolve_daily_target;
use crate::engine::outlook::resolve_monthly_target;
use crate::engine::{
    calendar, ComparativeAnalyzer, ConsistencyCalculator, ForecastEngine, MonthlyOutlookEngine,
    PerformancePatternAnalyzer, RecordNormalizer,
};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::source::ProductionDataSource;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

// ==========================================
// AnalyticsOrchestrator - 分析编排器
// ==========================================

pub struct AnalyticsOrchestrator<S, C>
where
    S: ProductionDataSource,
    C: AnalyticsConfigReader,
{
    source: Arc<S>,
    config: Arc<C>,
    normalizer: RecordNormalizer,
    consistency: ConsistencyCalculator,
    comparative: ComparativeAnalyzer,
    forecast: ForecastEngine,
    pattern: PerformancePatternAnalyzer,
    outlook: MonthlyOutlookEngine,
}

impl<S, C> AnalyticsOrchestrator<S, C>
where
    S: ProductionDataSource,
    C: AnalyticsConfigReader,
{
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - source: 生产数据源
    /// - config: 配置读取器
    pub fn new(source: Arc<S>, config: Arc<C>) -> Self {
        Self {
            source,
            config,
            normalizer: RecordNormalizer::new(),
            consistency: ConsistencyCalculator::new(),
            comparative: ComparativeAnalyzer::new(),
            forecast: ForecastEngine::new(),
            pattern: PerformancePatternAnalyzer::new(),
            outlook: MonthlyOutlookEngine::new(),
        }
    }

    /// 按配置的默认窗口执行分析
    pub async fn run_default_analysis(
        &self,
        now: NaiveDate,
        cancel: &CancellationSignal,
    ) -> AnalyticsResult<AnalysisBundle> {
        let months = self.config.get_default_period_window_months().await?;
        self.run_analysis(months, now, cancel).await
    }

    /// 执行完整分析
    ///
    /// # 参数
    /// - period_window_months: 分析窗口（月），0 按 1 处理
    /// - now: 参考日期
    /// - cancel: 取消信号
    ///
    /// # 返回
    /// - Ok(AnalysisBundle): 完整结果
    /// - Err(DataUnavailable): 日文档拉取失败或超时
    /// - Err(Cancelled): 拉取前或拉取中被取消
    /// - Err(Config): 配置非法
    pub async fn run_analysis(
        &self,
        period_window_months: u32,
        now: NaiveDate,
        cancel: &CancellationSignal,
    ) -> AnalyticsResult<AnalysisBundle> {
        let run_id = Uuid::new_v4().to_string();
        let months = period_window_months.max(1);
        info!(
            run_id = %run_id,
            reference_date = %now,
            period_window_months = months,
            "开始执行生产分析"
        );

        if cancel.is_cancelled() {
            info!(run_id = %run_id, "分析在开始前已取消");
            return Err(AnalyticsError::Cancelled);
        }

        // ==========================================
        // 步骤1: 读取配置快照
        // ==========================================
        debug!("步骤1: 读取配置快照");
        let config = self.config.snapshot().await?;

        // ==========================================
        // 步骤2: 拉取日文档与分类目标（超时 + 取消）
        // ==========================================
        debug!(timeout_secs = config.fetch_timeout_secs, "步骤2: 拉取生产数据");
        let (documents, targets) = self.fetch(&config, cancel).await?;

        if cancel.is_cancelled() {
            info!(run_id = %run_id, "拉取完成后检测到取消，丢弃结果");
            return Err(AnalyticsError::Cancelled);
        }

        // ==========================================
        // 步骤3: 归一化
        // ==========================================
        let window_start = calendar::window_start(now, months);
        debug!(window_start = %window_start, documents = documents.len(), "步骤3: 归一化");
        let outcome = self
            .normalizer
            .normalize(&documents, &targets, &config, Some(window_start));
        if outcome.report.skipped_malformed > 0 {
            warn!(
                run_id = %run_id,
                skipped_malformed = outcome.report.skipped_malformed,
                "存在格式异常的日文档，已剔除"
            );
        }
        let records = outcome.records;

        // ==========================================
        // 步骤4: 一致性指标（窗口内全部记录）
        // ==========================================
        debug!("步骤4: 计算一致性指标");
        let consistency = self.consistency.calculate(&records);

        // ==========================================
        // 步骤5: 环比 / 同比
        // ==========================================
        debug!("步骤5: 同比/环比分析");
        let comparative_by_month =
            self.comparative
                .analyze(&records, PeriodKind::Month, now, config.trend_threshold_pct);
        let comparative_by_year =
            self.comparative
                .analyze(&records, PeriodKind::Year, now, config.trend_threshold_pct);

        // ==========================================
        // 步骤6: 预测 & 表现模式
        // ==========================================
        debug!("步骤6: 预测与表现模式");
        let forecast = self.forecast.forecast(&records, now, &config);
        let performance = self.pattern.analyze(&records);

        // ==========================================
        // 步骤7: 月度展望
        // ==========================================
        debug!("步骤7: 月度展望");
        let month_records = current_month_records(&records, now);
        let monthly_target = resolve_monthly_target(&targets, &config);
        let outlook = self
            .outlook
            .evaluate(&month_records, monthly_target, now, &config);

        info!(
            run_id = %run_id,
            records = records.len(),
            skipped = outcome.report.total_skipped(),
            daily_target = resolve_daily_target(&targets, &config),
            reliability_index = consistency.reliability_index,
            monthly_probability = forecast.monthly_target_probability,
            "生产分析完成"
        );

        Ok(AnalysisBundle {
            run_id,
            reference_date: now,
            period_window_months: months,
            records,
            normalization: outcome.report,
            consistency,
            comparative_by_month,
            comparative_by_year,
            forecast,
            performance,
            outlook,
        })
    }

    /// 并发拉取日文档与分类目标
    ///
    /// - 日文档失败/超时 → DataUnavailable
    /// - 分类目标失败 → 告警并按未配置处理
    /// - 取消 → Cancelled
    async fn fetch(
        &self,
        config: &AnalyticsConfig,
        cancel: &CancellationSignal,
    ) -> AnalyticsResult<(Vec<RawDayDocument>, ClassificationTargets)> {
        let timeout = config.fetch_timeout();
        let both = futures::future::join(
            self.source.fetch_day_documents(),
            self.source.fetch_classification_targets(),
        );

        let (documents, targets) = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("拉取过程中收到取消信号");
                return Err(AnalyticsError::Cancelled);
            }
            fetched = tokio::time::timeout(timeout, both) => match fetched {
                Ok(pair) => pair,
                Err(_) => {
                    warn!(timeout_secs = config.fetch_timeout_secs, "拉取生产数据超时");
                    return Err(AnalyticsError::DataUnavailable(format!(
                        "拉取超时（{} 秒）",
                        config.fetch_timeout_secs
                    )));
                }
            },
        };

        let documents = documents.map_err(|e| {
            warn!(error = %e, "日文档拉取失败");
            AnalyticsError::DataUnavailable(e.to_string())
        })?;

        let targets = targets.unwrap_or_else(|e| {
            warn!(error = %e, "分类目标拉取失败，使用兜底日目标");
            ClassificationTargets::empty()
        });

        debug!(
            documents = documents.len(),
            classifications = targets.len(),
            "生产数据拉取完成"
        );
        Ok((documents, targets))
    }
}

fn current_month_records(
    records: &[DailyProductionRecord],
    now: NaiveDate,
) -> Vec<DailyProductionRecord> {
    let window = calendar::current_window(PeriodKind::Month, now);
    records
        .iter()
        .filter(|r| window.contains(r.date()))
        .cloned()
        .collect()
}
