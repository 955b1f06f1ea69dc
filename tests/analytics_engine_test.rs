// ==========================================
// 分析引擎集成测试
// ==========================================
// 测试目标: 各引擎串联后的性质（边界、排序、不变量）
// ==========================================


use production_analytics::engine::pattern::weekly_groups;
use production_analytics::logging;
use production_analytics::{
    AnalyticsConfig, ClassificationTargets, ComparativeAnalyzer, ConsistencyCalculator,
    ForecastEngine, PerformancePatternAnalyzer, PeriodKind, Recommendation, RecordNormalizer,
    TrendDirection,
};
use test_helpers::{daily_documents, date, records_from};

#[test]
fn test_two_day_end_to_end_example() {
    logging::init_test();

    let records = records_from(date(2024, 1, 1), &[2000.0, 1000.0], 2000.0);
    let metrics = ConsistencyCalculator::new().calculate(&records);

    let met: Vec<bool> = records.iter().map(|r| r.met_target()).collect();
    assert_eq!(met, vec![true, false], "达标标记应为 [true, false]");
    assert_eq!(metrics.target_hit_frequency, 50.0);
    assert_eq!(metrics.longest_positive_streak, 1);
    assert_eq!(metrics.longest_negative_streak, 1);
}

#[test]
fn test_thirty_identical_days() {
    let records = records_from(date(2024, 1, 1), &[1500.0; 30], 1500.0);
    let metrics = ConsistencyCalculator::new().calculate(&records);

    assert_eq!(metrics.coefficient_of_variation, 0.0);
    assert_eq!(metrics.target_hit_frequency, 100.0);
    assert_eq!(metrics.reliability_index, 100.0, "可靠性指数应被限制为 100");
}

#[test]
fn test_met_target_boundary_through_normalizer() {
    // 分类目标合计 1000，产量恰好 1000
    let targets: ClassificationTargets = vec![("A".to_string(), 600.0), ("B".to_string(), 400.0)]
        .into_iter()
        .collect();
    let documents = daily_documents(date(2024, 4, 1), &[1000.0, 999.99, 1000.01]);

    let outcome = RecordNormalizer::new().normalize(
        &documents,
        &targets,
        &AnalyticsConfig::default(),
        None,
    );

    for record in &outcome.records {
        assert_eq!(
            record.met_target(),
            record.produced_quantity() >= record.target_quantity(),
            "met_target 必须等价于 produced >= target"
        );
    }
    let met: Vec<bool> = outcome.records.iter().map(|r| r.met_target()).collect();
    assert_eq!(met, vec![true, false, true]);
}

#[test]
fn test_metrics_bounds_over_varied_series() {
    let series: Vec<Vec<f64>> = vec![
        vec![0.0],
        vec![0.0, 0.0, 10_000.0],
        vec![2500.0, 1800.0, 2100.0, 50.0, 4000.0],
        (0..40).map(|i| (i * 137 % 3000) as f64).collect(),
    ];

    for values in series {
        let records = records_from(date(2024, 1, 1), &values, 2000.0);
        let metrics = ConsistencyCalculator::new().calculate(&records);
        assert!((0.0..=100.0).contains(&metrics.target_hit_frequency));
        assert!((0.0..=100.0).contains(&metrics.reliability_index));
    }
}

#[test]
fn test_empty_current_month_forecast() {
    let records = records_from(date(2024, 1, 1), &[1800.0; 20], 2000.0);
    let forecast =
        ForecastEngine::new().forecast(&records, date(2024, 2, 15), &AnalyticsConfig::default());

    assert_eq!(forecast.monthly_target_probability, 50.0);
    assert_eq!(forecast.annual_target_probability, 50.0);
    assert!(
        forecast.recommendations.contains(&Recommendation::InsufficientData),
        "应包含数据不足建议"
    );
}

#[test]
fn test_scenario_ordering_across_inputs() {
    let inputs: Vec<Vec<f64>> = vec![
        vec![2000.0; 10],
        vec![0.0, 0.0, 0.0, 5000.0],
        vec![100.0, 4000.0, 50.0, 3900.0, 10.0],
    ];

    for values in inputs {
        let records = records_from(date(2024, 6, 1), &values, 2000.0);
        let forecast = ForecastEngine::new().forecast(
            &records,
            date(2024, 6, 12),
            &AnalyticsConfig::default(),
        );
        let s = &forecast.scenarios;
        assert!(
            s.conservative <= s.realistic && s.realistic <= s.optimistic,
            "情景必须满足 保守 <= 现实 <= 乐观: {:?}",
            s
        );
    }
}

#[test]
fn test_empty_previous_period_has_no_nan() {
    let records = records_from(date(2024, 5, 1), &[1000.0; 5], 1000.0);
    let result =
        ComparativeAnalyzer::new().analyze(&records, PeriodKind::Month, date(2024, 5, 20), 5.0);

    assert_eq!(result.previous.total_produced, 0.0);
    assert_eq!(result.previous.total_days, 0);
    assert_eq!(result.delta.production_change_pct, 0.0, "上期为空时变化量为 0");
    assert!(!result.delta.target_change_pct.is_nan());
}

#[test]
fn test_trend_threshold_examples() {
    let analyzer = ComparativeAnalyzer::new();

    let mut rising = vec![1000.0; 7];
    rising.extend(vec![1060.0; 7]);
    let records = records_from(date(2024, 7, 1), &rising, 1000.0);
    let result = analyzer.analyze(&records, PeriodKind::Month, date(2024, 7, 14), 5.0);
    assert_eq!(result.current.trend, TrendDirection::Rising, "+6% 应判定为上升");

    let mut stable = vec![1000.0; 7];
    stable.extend(vec![1040.0; 7]);
    let records = records_from(date(2024, 7, 1), &stable, 1000.0);
    let result = analyzer.analyze(&records, PeriodKind::Month, date(2024, 7, 14), 5.0);
    assert_eq!(result.current.trend, TrendDirection::Stable, "+4% 应判定为平稳");
}

#[test]
fn test_weekly_grouping_minimum_records() {
    let eleven = records_from(date(2024, 8, 1), &[1000.0; 11], 1000.0);
    assert_eq!(weekly_groups(&eleven).len(), 1, "7 + 4: 尾组不足 5 条应排除");

    let twelve = records_from(date(2024, 8, 1), &[1000.0; 12], 1000.0);
    assert_eq!(weekly_groups(&twelve).len(), 2, "7 + 5: 尾组恰好 5 条应保留");

    let analysis = PerformancePatternAnalyzer::new().analyze(&twelve);
    assert!(analysis.best_week.is_some());
    assert!(analysis.weekday_patterns.keys().all(|k| *k <= 6));
}
