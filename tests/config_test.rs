// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 验证分析参数读取、覆写与校验
// ==========================================


use production_analytics::config::{config_keys, AnalyticsConfigReader, ConfigError, ConfigManager};
use production_analytics::logging;
use test_helpers::{create_test_db, insert_config, open_test_connection};

#[tokio::test]
async fn test_config_manager_creation() {
    let (_temp_file, db_path) = create_test_db().expect("创建测试数据库失败");

    let config_manager = ConfigManager::new(&db_path);
    assert!(config_manager.is_ok(), "ConfigManager 应创建成功");
}

#[tokio::test]
async fn test_defaults_without_overrides() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db().expect("创建测试数据库失败");
    let config_manager = ConfigManager::new(&db_path).expect("创建 ConfigManager 失败");

    let config = config_manager.snapshot().await.expect("读取配置快照失败");
    assert_eq!(config.fallback_daily_target, 2000.0, "兜底日目标默认 2000");
    assert_eq!(config.trend_threshold_pct, 5.0, "趋势阈值默认 5%");
    assert_eq!(config.recent_window_size, 30, "近期窗口默认 30");
    assert_eq!(config.default_period_window_months, 3, "默认窗口 3 个月");
    assert_eq!(config.workdays_per_month, 22, "每月工作日默认 22");
    assert_eq!(config.fetch_timeout_secs, 30, "拉取超时默认 30 秒");
}

#[tokio::test]
async fn test_overrides_from_config_kv() {
    let (_temp_file, db_path) = create_test_db().expect("创建测试数据库失败");
    let conn = open_test_connection(&db_path).expect("打开数据库失败");
    insert_config(&conn, config_keys::FALLBACK_DAILY_TARGET, "2500").unwrap();
    insert_config(&conn, config_keys::TREND_THRESHOLD_PCT, " 3.5 ").unwrap();
    insert_config(&conn, config_keys::PERIOD_WINDOW_MONTHS, "6").unwrap();
    insert_config(&conn, config_keys::MONTHLY_MINIMUM_TARGET, "50000").unwrap();

    let config_manager = ConfigManager::new(&db_path).expect("创建 ConfigManager 失败");
    let config = config_manager.snapshot().await.expect("读取配置快照失败");

    assert_eq!(config.fallback_daily_target, 2500.0);
    assert_eq!(config.trend_threshold_pct, 3.5, "配置值应去除首尾空白后解析");
    assert_eq!(config.default_period_window_months, 6);
    assert_eq!(config.monthly_minimum_target, 50000.0);
}

#[tokio::test]
async fn test_malformed_value_falls_back_to_default() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db().expect("创建测试数据库失败");
    let conn = open_test_connection(&db_path).expect("打开数据库失败");
    insert_config(&conn, config_keys::WORKDAYS_PER_MONTH, "twenty").unwrap();

    let config_manager = ConfigManager::new(&db_path).expect("创建 ConfigManager 失败");
    let workdays = config_manager
        .get_workdays_per_month()
        .await
        .expect("格式错误不应报错");
    assert_eq!(workdays, 22, "格式错误应回退默认值");
}

#[tokio::test]
async fn test_out_of_range_value_is_rejected() {
    let (_temp_file, db_path) = create_test_db().expect("创建测试数据库失败");
    let conn = open_test_connection(&db_path).expect("打开数据库失败");
    insert_config(&conn, config_keys::FETCH_TIMEOUT_SECS, "0").unwrap();

    let config_manager = ConfigManager::new(&db_path).expect("创建 ConfigManager 失败");
    match config_manager.snapshot().await {
        Err(ConfigError::InvalidValue { key, .. }) => {
            assert_eq!(key, config_keys::FETCH_TIMEOUT_SECS)
        }
        other => panic!("期望 InvalidValue, 实际 {:?}", other),
    }
}

#[tokio::test]
async fn test_set_global_config_value_roundtrip() {
    let (_temp_file, db_path) = create_test_db().expect("创建测试数据库失败");
    let config_manager = ConfigManager::new(&db_path).expect("创建 ConfigManager 失败");

    config_manager
        .set_global_config_value(config_keys::RECENT_WINDOW_SIZE, "14")
        .expect("写入配置失败");

    assert_eq!(config_manager.get_recent_window_size().await.unwrap(), 14);
}
