use super::*;
use crate::config::AnalyticsConfig;
use crate::domain::recommendation::Recommendation;
use crate::domain::record::DailyProductionRecord;
use crate::domain::types::ProbabilityBand;
use chrono::{Days, NaiveDate};

// ==========================================
// 测试辅助函数
// ==========================================

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// 从 start 起连续造数
fn run(start: NaiveDate, values: &[f64], target: f64) -> Vec<DailyProductionRecord> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| DailyProductionRecord::from_totals(start + Days::new(i as u64), *v, target))
        .collect()
}

// ==========================================
// 中性预测
// ==========================================

#[test]
fn test_empty_current_month_is_neutral() {
    // 只有上月数据
    let records = run(d(2024, 2, 1), &[1000.0; 10], 1000.0);
    let result =
        ForecastEngine::new().forecast(&records, d(2024, 3, 10), &AnalyticsConfig::default());

    assert_eq!(result.monthly_target_probability, 50.0);
    assert_eq!(result.annual_target_probability, 50.0);
    assert_eq!(result.required_daily_production, 2000.0);
    assert_eq!(result.recommendations, vec![Recommendation::InsufficientData]);
    assert_eq!(result.scenarios.realistic, 0.0);
    assert_eq!(result.remaining_workdays_in_month, 21);
}

#[test]
fn test_records_after_now_are_not_current_month() {
    let records = run(d(2024, 3, 20), &[1000.0; 3], 1000.0);
    let result =
        ForecastEngine::new().forecast(&records, d(2024, 3, 10), &AnalyticsConfig::default());
    assert_eq!(result.recommendations, vec![Recommendation::InsufficientData]);
}

// ==========================================
// 概率
// ==========================================

#[test]
fn test_perfect_month_probabilities() {
    let records = run(d(2024, 3, 1), &[1000.0; 10], 1000.0);
    let result =
        ForecastEngine::new().forecast(&records, d(2024, 3, 10), &AnalyticsConfig::default());

    // 100 * 0.7 + 1.0 * 30 = 100 → 95
    assert_eq!(result.monthly_target_probability, 95.0);
    // 100 * 0.6 + 1.0 * 40 = 100 → 90
    assert_eq!(result.annual_target_probability, 90.0);
    assert_eq!(result.monthly_probability_band, ProbabilityBand::High);
    assert_eq!(result.required_daily_production, 0.0);
    assert!(result.recommendations.is_empty());
}

#[test]
fn test_poor_month_triggers_all_recommendations() {
    let records = run(d(2024, 3, 1), &[200.0; 10], 1000.0);
    let result =
        ForecastEngine::new().forecast(&records, d(2024, 3, 10), &AnalyticsConfig::default());

    // 0 * 0.7 + 0.2 * 30 = 6
    assert!((result.monthly_target_probability - 6.0).abs() < 1e-9);
    // 下限 10
    assert_eq!(result.annual_target_probability, 10.0);
    // (10000 - 2000) / 21
    assert!((result.required_daily_production - 8000.0 / 21.0).abs() < 1e-9);
    assert_eq!(
        result.recommendations,
        vec![
            Recommendation::ReviewProcessConsistency,
            Recommendation::IncreaseDailyCapacity,
            Recommendation::ImmediateCorrectiveAction,
        ]
    );
    assert_eq!(result.monthly_probability_band, ProbabilityBand::Low);
}

#[test]
fn test_zero_month_target_uses_zero_progress() {
    let records = run(d(2024, 3, 1), &[100.0; 5], 0.0);
    let result =
        ForecastEngine::new().forecast(&records, d(2024, 3, 5), &AnalyticsConfig::default());

    // 目标为 0 时全部达标: 100 * 0.7 + 0 = 70
    assert!((result.monthly_target_probability - 70.0).abs() < 1e-9);
    assert!(result.monthly_target_probability.is_finite());
}

#[test]
fn test_last_day_of_month_requires_nothing() {
    let records = run(d(2024, 3, 1), &[500.0; 31], 1000.0);
    let result =
        ForecastEngine::new().forecast(&records, d(2024, 3, 31), &AnalyticsConfig::default());

    assert_eq!(result.remaining_workdays_in_month, 0);
    assert_eq!(result.required_daily_production, 0.0);
}

// ==========================================
// 情景
// ==========================================

#[test]
fn test_scenarios_are_ordered() {
    let values = [1800.0, 2200.0, 900.0, 2500.0, 1600.0, 0.0, 3000.0];
    let records = run(d(2024, 3, 1), &values, 2000.0);
    let result =
        ForecastEngine::new().forecast(&records, d(2024, 3, 7), &AnalyticsConfig::default());

    let s = &result.scenarios;
    assert!(s.conservative >= 0.0);
    assert!(s.conservative <= s.realistic);
    assert!(s.realistic <= s.optimistic);
    assert!((s.realistic - values.iter().sum::<f64>() / 7.0).abs() < 1e-9);
}

#[test]
fn test_recent_window_size_is_respected() {
    // 前 20 天全部未达标，后 5 天全部达标
    let mut values = vec![100.0; 20];
    values.extend(vec![1000.0; 5]);
    let records = run(d(2024, 3, 1), &values, 1000.0);

    let config = AnalyticsConfig {
        recent_window_size: 5,
        ..AnalyticsConfig::default()
    };
    let result = ForecastEngine::new().forecast(&records, d(2024, 3, 25), &config);

    // 近 5 天达标频率 100，不触发一致性建议
    assert!(!result
        .recommendations
        .contains(&Recommendation::ReviewProcessConsistency));
}
