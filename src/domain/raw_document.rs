// ==========================================
// 生产分析与预测引擎 - 原始日文档
// ==========================================
// 职责: 描述外部文档库中按日存放的生产文档结构
// 约定: 文档键为 YYYY-MM-DD；正文为 JSON 对象
// ==========================================
// 正文结构:
// {
//   "shift1":  [ { "code", "plannedQty", "producedQty", "classificationLabel" } ],
//   "shift2":  [ ... ],
//   "summary": { "totalProduced": 1234.5 }
// }
// 数量字段兼容数字与数字字符串
// 宽松字段: code / plannedQty / classificationLabel 取值异常时按缺失处理；
//           班次为 null 或非数组时视为空班次，数组中非对象条目忽略
// 严格字段: producedQty / summary.totalProduced 非法时整篇文档剔除
// ==========================================

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ==========================================
// RawDayDocument - 原始日文档（端口输出）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDayDocument {
    /// 文档键（期望为 YYYY-MM-DD）
    pub key: String,
    /// 文档正文（未校验）
    pub body: Value,
}

impl RawDayDocument {
    pub fn new(key: impl Into<String>, body: Value) -> Self {
        Self {
            key: key.into(),
            body,
        }
    }
}

// ==========================================
// DayPayload - 类型化后的日文档正文
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPayload {
    #[serde(default, deserialize_with = "deserialize_shift")]
    pub shift1: Vec<ShiftEntry>,

    #[serde(default, deserialize_with = "deserialize_shift")]
    pub shift2: Vec<ShiftEntry>,

    /// 预汇总数据（存在且为正时优先于班次合计）
    #[serde(
        default,
        deserialize_with = "deserialize_summary",
        skip_serializing_if = "Option::is_none"
    )]
    pub summary: Option<DaySummary>,
}

/// 班次条目
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftEntry {
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub code: Option<String>,

    #[serde(
        default,
        deserialize_with = "deserialize_lenient_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub planned_qty: Option<f64>,

    #[serde(
        default,
        deserialize_with = "deserialize_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub produced_qty: Option<f64>,

    #[serde(
        default,
        deserialize_with = "deserialize_lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub classification_label: Option<String>,
}

/// 日预汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    #[serde(
        default,
        deserialize_with = "deserialize_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_produced: Option<f64>,
}

/// 数量解析
///
/// - null / 缺失 / 空字符串 → None
/// - 数字或数字字符串 → Some(v)，要求有限且非负
/// - 其他 → Err
fn quantity_from_value(value: &Value) -> Result<Option<f64>, String> {
    let parsed = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_f64().ok_or_else(|| format!("数量无法表示: {}", n))?,
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map_err(|e| format!("数量无法解析: {} ({})", trimmed, e))?
        }
        other => return Err(format!("数量类型非法: {}", other)),
    };

    if !parsed.is_finite() || parsed < 0.0 {
        return Err(format!("数量必须为有限非负数: {}", parsed));
    }
    Ok(Some(parsed))
}

/// 严格数量字段: 非法时整篇文档按异常剔除
fn deserialize_quantity<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    quantity_from_value(&value).map_err(serde::de::Error::custom)
}

/// 宽松数量字段: 非法时按缺失处理
fn deserialize_lenient_quantity<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(quantity_from_value(&value).ok().flatten())
}

/// 宽松文本字段: 字符串原样保留，数字转为文本，其他按缺失处理
fn deserialize_lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// 班次: 非数组视为空班次；数组内非对象条目忽略
fn deserialize_shift<'de, D>(deserializer: D) -> Result<Vec<ShiftEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    items
        .into_iter()
        .filter(Value::is_object)
        .map(|item| ShiftEntry::deserialize(item).map_err(serde::de::Error::custom))
        .collect()
}

/// 预汇总: 非对象按缺失处理
fn deserialize_summary<'de, D>(deserializer: D) -> Result<Option<DaySummary>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        item @ Value::Object(_) => DaySummary::deserialize(item)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}
