// ==========================================
// 生产分析与预测引擎 - 预测引擎
// ==========================================
// 输入: 记录序列 + now + 分析配置
// 输出: 月度/年度达标概率、日需产量、三种生产情景、建议
// ==========================================
// 注: 当月无数据时返回中性预测（50/50 + INSUFFICIENT_DATA）
// ==========================================

mod core;

#[cfg(test)]
mod tests;

pub use core::ForecastEngine;
