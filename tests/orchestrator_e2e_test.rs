// ==========================================
// 分析编排器端到端测试
// ==========================================
// 测试目标: 数据源 → 归一化 → 各引擎 → AnalysisBundle
// 覆盖: SQLite 数据源、内存数据源、拉取失败、超时、取消
// ==========================================


use production_analytics::config::config_keys;
use production_analytics::logging;
use production_analytics::{
    AnalyticsConfig, AnalyticsError, AnalyticsOrchestrator, CancellationHandle,
    CancellationSignal, ClassificationTargets, ConfigManager, InMemoryProductionSource,
    PeriodKind, Recommendation, SqliteProductionSource,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use test_helpers::{
    create_test_db, daily_documents, date, day_payload, insert_classification_targets,
    insert_config, insert_day, insert_raw_day, open_test_connection,
};

fn fast_timeout_config() -> AnalyticsConfig {
    AnalyticsConfig {
        fetch_timeout_secs: 1,
        ..AnalyticsConfig::default()
    }
}

#[tokio::test]
async fn test_full_analysis_from_sqlite() {
    logging::init_test();

    // ==========================================
    // 步骤1: 准备数据库
    // ==========================================
    let (_temp_file, db_path) = create_test_db().expect("创建测试数据库失败");
    let conn = open_test_connection(&db_path).expect("打开数据库失败");

    insert_classification_targets(&conn, &json!({"A": 1200, "B": "800", "C": "n/a"}))
        .expect("写入分类目标失败");

    // 2024-02 与 2024-03 每天 1200 + 900
    for day in 1..=29 {
        insert_day(&conn, &format!("2024-02-{:02}", day), &day_payload(1200.0, 900.0)).unwrap();
    }
    for day in 1..=14 {
        insert_day(&conn, &format!("2024-03-{:02}", day), &day_payload(1200.0, 900.0)).unwrap();
    }
    // 窗口外、非法键、非法 JSON
    insert_day(&conn, "2023-11-30", &day_payload(1.0, 1.0)).unwrap();
    insert_day(&conn, "summary", &json!({})).unwrap();
    insert_raw_day(&conn, "2024-03-15", "{not json").unwrap();
    println!("✓ 步骤1: 数据准备完成");

    // ==========================================
    // 步骤2: 执行分析
    // ==========================================
    let source = Arc::new(SqliteProductionSource::new(&db_path).expect("创建数据源失败"));
    let config = Arc::new(ConfigManager::new(&db_path).expect("创建 ConfigManager 失败"));
    let orchestrator = AnalyticsOrchestrator::new(source, config);

    let bundle = orchestrator
        .run_analysis(3, date(2024, 3, 15), &CancellationSignal::never())
        .await
        .expect("分析应成功");
    println!("✓ 步骤2: 分析完成 run_id={}", bundle.run_id);

    // ==========================================
    // 步骤3: 校验结果
    // ==========================================
    let report = &bundle.normalization;
    assert_eq!(report.accepted, 43, "2 月 29 天 + 3 月 14 天");
    assert_eq!(report.skipped_out_of_window, 1);
    assert_eq!(report.skipped_invalid_key, 1);
    assert_eq!(report.skipped_malformed, 1);
    assert_eq!(bundle.records.len(), 43);
    assert!(bundle.records.windows(2).all(|w| w[0].date() < w[1].date()), "记录应升序且唯一");

    let first = &bundle.records[0];
    assert_eq!(first.target_quantity(), 2000.0, "日目标 = 1200 + 800");
    assert_eq!(first.produced_quantity(), 2100.0);
    assert!(first.met_target());

    assert_eq!(bundle.consistency.target_hit_frequency, 100.0);
    assert_eq!(bundle.comparative_by_month.period_kind, PeriodKind::Month);
    assert_eq!(bundle.comparative_by_month.current.stats.total_days, 14);
    assert_eq!(bundle.comparative_by_month.previous.total_days, 29);
    assert_eq!(bundle.forecast.remaining_workdays_in_month, 16);
    assert!(bundle.forecast.recommendations.is_empty());
    assert_eq!(bundle.outlook.monthly_target, 44_000.0, "月目标 = 2000 × 22");
    assert!(bundle.outlook.previous_day.met_target);
    assert!(bundle.performance.best_week.is_some());
    assert!(!bundle.run_id.is_empty());
    println!("✓ 步骤3: 结果校验通过");

    // 结果可序列化为 camelCase JSON
    let value = serde_json::to_value(&bundle).expect("序列化失败");
    assert!(value.get("comparativeByMonth").is_some());
    assert!(value["forecast"].get("monthlyTargetProbability").is_some());
}

#[tokio::test]
async fn test_config_overrides_flow_into_analysis() {
    let (_temp_file, db_path) = create_test_db().expect("创建测试数据库失败");
    let conn = open_test_connection(&db_path).expect("打开数据库失败");
    insert_config(&conn, config_keys::FALLBACK_DAILY_TARGET, "1500").unwrap();
    insert_config(&conn, config_keys::PERIOD_WINDOW_MONTHS, "1").unwrap();
    insert_day(&conn, "2024-05-02", &day_payload(800.0, 800.0)).unwrap();
    insert_day(&conn, "2024-04-30", &day_payload(800.0, 800.0)).unwrap();

    let orchestrator = AnalyticsOrchestrator::new(
        Arc::new(SqliteProductionSource::new(&db_path).unwrap()),
        Arc::new(ConfigManager::new(&db_path).unwrap()),
    );

    let bundle = orchestrator
        .run_default_analysis(date(2024, 5, 3), &CancellationSignal::never())
        .await
        .expect("分析应成功");

    assert_eq!(bundle.period_window_months, 1);
    assert_eq!(bundle.records.len(), 1, "窗口仅含当月");
    assert_eq!(bundle.records[0].target_quantity(), 1500.0, "无分类目标时使用兜底日目标");
}

#[tokio::test]
async fn test_in_memory_source_with_empty_data() {
    let orchestrator = AnalyticsOrchestrator::new(
        Arc::new(InMemoryProductionSource::default()),
        Arc::new(AnalyticsConfig::default()),
    );

    let bundle = orchestrator
        .run_analysis(0, date(2024, 9, 10), &CancellationSignal::never())
        .await
        .expect("空数据不应报错");

    assert_eq!(bundle.period_window_months, 1, "窗口 0 按 1 处理");
    assert!(bundle.records.is_empty());
    assert_eq!(bundle.consistency.reliability_index, 0.0);
    assert_eq!(bundle.forecast.recommendations, vec![Recommendation::InsufficientData]);
    assert!(bundle.performance.best_day.is_none());
    assert_eq!(bundle.outlook.success_probability, 0);
}

#[tokio::test]
async fn test_document_fetch_failure_is_data_unavailable() {
    logging::init_test();
    let source = InMemoryProductionSource::new(
        daily_documents(date(2024, 9, 1), &[2000.0; 5]),
        ClassificationTargets::empty(),
    )
    .with_document_failure("document store offline");

    let orchestrator =
        AnalyticsOrchestrator::new(Arc::new(source), Arc::new(AnalyticsConfig::default()));
    let result = orchestrator
        .run_analysis(3, date(2024, 9, 10), &CancellationSignal::never())
        .await;

    match result {
        Err(AnalyticsError::DataUnavailable(message)) => {
            assert!(message.contains("document store offline"))
        }
        other => panic!("期望 DataUnavailable, 实际 {:?}", other.map(|b| b.run_id)),
    }
}

#[tokio::test]
async fn test_target_fetch_failure_uses_fallback() {
    let targets: ClassificationTargets = vec![("A".to_string(), 900.0)].into_iter().collect();
    let source = InMemoryProductionSource::new(
        daily_documents(date(2024, 9, 1), &[2000.0; 5]),
        targets,
    )
    .with_target_failure("targets unavailable");

    let orchestrator =
        AnalyticsOrchestrator::new(Arc::new(source), Arc::new(AnalyticsConfig::default()));
    let bundle = orchestrator
        .run_analysis(3, date(2024, 9, 10), &CancellationSignal::never())
        .await
        .expect("分类目标失败不应中断分析");

    assert_eq!(bundle.records[0].target_quantity(), 2000.0, "应回退到兜底日目标");
}

#[tokio::test]
async fn test_fetch_timeout_is_data_unavailable() {
    let source = InMemoryProductionSource::default().with_latency(Duration::from_secs(5));
    let orchestrator =
        AnalyticsOrchestrator::new(Arc::new(source), Arc::new(fast_timeout_config()));

    let result = orchestrator
        .run_analysis(3, date(2024, 9, 10), &CancellationSignal::never())
        .await;

    assert!(
        matches!(result, Err(AnalyticsError::DataUnavailable(_))),
        "超时应返回 DataUnavailable"
    );
}

#[tokio::test]
async fn test_cancel_before_start() {
    let (handle, signal) = CancellationHandle::pair();
    handle.cancel();

    let orchestrator = AnalyticsOrchestrator::new(
        Arc::new(InMemoryProductionSource::default()),
        Arc::new(AnalyticsConfig::default()),
    );
    let result = orchestrator.run_analysis(3, date(2024, 9, 10), &signal).await;

    assert!(matches!(result, Err(AnalyticsError::Cancelled)));
}

#[tokio::test]
async fn test_cancel_during_fetch() {
    logging::init_test();
    let source = InMemoryProductionSource::new(
        daily_documents(date(2024, 9, 1), &[2000.0; 5]),
        ClassificationTargets::empty(),
    )
    .with_latency(Duration::from_millis(500));
    let orchestrator = AnalyticsOrchestrator::new(
        Arc::new(source),
        Arc::new(AnalyticsConfig::default()),
    );

    let (handle, signal) = CancellationHandle::pair();
    let cancel_later = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.cancel();
    };

    let (result, _) = tokio::join!(
        orchestrator.run_analysis(3, date(2024, 9, 10), &signal),
        cancel_later
    );

    assert!(
        matches!(result, Err(AnalyticsError::Cancelled)),
        "拉取中取消应返回 Cancelled"
    );
}

#[tokio::test]
async fn test_each_run_has_fresh_run_id() {
    let orchestrator = AnalyticsOrchestrator::new(
        Arc::new(InMemoryProductionSource::new(
            daily_documents(date(2024, 9, 1), &[2000.0; 3]),
            ClassificationTargets::empty(),
        )),
        Arc::new(AnalyticsConfig::default()),
    );
    let signal = CancellationSignal::never();

    let first = orchestrator.run_analysis(3, date(2024, 9, 10), &signal).await.unwrap();
    let second = orchestrator.run_analysis(3, date(2024, 9, 10), &signal).await.unwrap();

    assert_ne!(first.run_id, second.run_id);
    assert_eq!(first.records, second.records, "相同输入应得到相同结果");
    assert_eq!(first.forecast, second.forecast);
}
