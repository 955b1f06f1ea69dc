// ==========================================
// 生产分析与预测引擎 - 记录归一化器
// ==========================================
// 输入: 原始日文档 + 分类日目标 + 分析配置 + 窗口起点
// 输出: 按日期升序、日期唯一的 DailyProductionRecord 序列 + 剔除统计
// 红线: 异常文档只剔除并计数，不中断分析
// ==========================================

use crate::config::AnalyticsConfig;
use crate::domain::analysis::NormalizationReport;
use crate::domain::raw_document::{DayPayload, RawDayDocument, ShiftEntry};
use crate::domain::record::{
    ClassificationBreakdown, ClassificationTargets, DailyProductionRecord, UNCLASSIFIED_LABEL,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// 归一化结果
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationOutcome {
    pub records: Vec<DailyProductionRecord>,
    pub report: NormalizationReport,
}

// ==========================================
// RecordNormalizer - 记录归一化器
// ==========================================
pub struct RecordNormalizer {
    // 无状态引擎,不需要注入依赖
}

impl RecordNormalizer {
    pub fn new() -> Self {
        Self {}
    }

    /// 归一化原始日文档
    ///
    /// # 参数
    /// - documents: 原始文档（顺序不限）
    /// - targets: 分类日目标
    /// - config: 分析配置（兜底日目标）
    /// - window_start: 窗口起点，早于该日期的文档剔除；None 表示不限
    ///
    /// # 剔除规则
    /// - 键不是 YYYY-MM-DD 或不是有效日期 → skipped_invalid_key
    /// - 早于窗口起点 → skipped_out_of_window
    /// - 正文不是对象，或 producedQty / summary.totalProduced 非法 → skipped_malformed
    ///   （code、plannedQty、classificationLabel、空班次等取值异常不影响当日数据）
    /// - 日期已被先前文档占用 → skipped_duplicate（保留先出现的）
    pub fn normalize(
        &self,
        documents: &[RawDayDocument],
        targets: &ClassificationTargets,
        config: &AnalyticsConfig,
        window_start: Option<NaiveDate>,
    ) -> NormalizationOutcome {
        let target = resolve_daily_target(targets, config);
        let mut report = NormalizationReport::default();
        let mut by_date: BTreeMap<NaiveDate, DailyProductionRecord> = BTreeMap::new();

        for document in documents {
            let Some(date) = parse_day_key(&document.key) else {
                debug!(key = %document.key, "文档键不是有效日期，跳过");
                report.skipped_invalid_key += 1;
                continue;
            };

            if window_start.is_some_and(|start| date < start) {
                report.skipped_out_of_window += 1;
                continue;
            }

            let payload = match parse_payload(&document.body) {
                Ok(payload) => payload,
                Err(reason) => {
                    warn!(key = %document.key, reason = %reason, "日文档格式异常，跳过");
                    report.skipped_malformed += 1;
                    continue;
                }
            };

            if by_date.contains_key(&date) {
                debug!(key = %document.key, "日期重复，保留先出现的文档");
                report.skipped_duplicate += 1;
                continue;
            }

            by_date.insert(date, build_record(date, &payload, target));
        }

        report.accepted = by_date.len();
        debug!(
            accepted = report.accepted,
            skipped = report.total_skipped(),
            daily_target = target,
            "归一化完成"
        );

        NormalizationOutcome {
            records: by_date.into_values().collect(),
            report,
        }
    }
}

impl Default for RecordNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// 日目标: 正数分类目标之和；合计 <= 0 时取兜底日目标
pub fn resolve_daily_target(targets: &ClassificationTargets, config: &AnalyticsConfig) -> f64 {
    let total = targets.daily_total();
    if total > 0.0 {
        total
    } else {
        config.fallback_daily_target
    }
}

/// 解析严格的 YYYY-MM-DD 文档键
pub fn parse_day_key(key: &str) -> Option<NaiveDate> {
    let bytes = key.as_bytes();
    if bytes.len() != 10 {
        return None;
    }
    let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

fn parse_payload(body: &serde_json::Value) -> Result<DayPayload, String> {
    if !body.is_object() {
        return Err("正文不是 JSON 对象".to_string());
    }
    DayPayload::deserialize(body).map_err(|e| e.to_string())
}

fn build_record(date: NaiveDate, payload: &DayPayload, target: f64) -> DailyProductionRecord {
    let shift1 = shift_total(&payload.shift1);
    let shift2 = shift_total(&payload.shift2);

    let mut breakdown = ClassificationBreakdown::new();
    for entry in payload.shift1.iter().chain(payload.shift2.iter()) {
        let Some(qty) = entry.produced_qty else {
            continue;
        };
        let label = entry
            .classification_label
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(UNCLASSIFIED_LABEL);
        *breakdown.entry(label.to_string()).or_insert(0.0) += qty;
    }

    // 预汇总总量优先
    let produced = match payload.summary.as_ref().and_then(|s| s.total_produced) {
        Some(total) if total > 0.0 => total,
        _ => shift1 + shift2,
    };

    DailyProductionRecord::new(date, produced, target, shift1, shift2, breakdown)
}

fn shift_total(entries: &[ShiftEntry]) -> f64 {
    entries.iter().filter_map(|e| e.produced_qty).sum()
}
