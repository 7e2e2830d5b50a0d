// ==========================================
// 引擎参数配置测试
// ==========================================
// 职责: 验证默认值、文件加载与部分字段覆写
// ==========================================

use shipment_tracking::config::EngineConfig;
use std::io::Write;

#[test]
fn test_default_config_values() {
    let config = EngineConfig::default();

    assert_eq!(config.stale_event_threshold_days, 3);
    assert_eq!(config.expected_events_per_shipment, 8);
    assert!((config.sla_usage_warning_ratio - 0.8).abs() < f64::EPSILON);
    assert!((config.on_time_rate_floor_pct - 70.0).abs() < f64::EPSILON);
    assert_eq!(config.status_factor_impact, 80);
    assert_eq!(config.transit_factor_impact, 50);
    assert_eq!(config.history_factor_impact, 30);
    assert_eq!(config.stale_factor_impact, 60);
    assert_eq!(config.performance_window_days, 90);
    assert_eq!(config.scan_concurrency, 4);
    assert_eq!(config.extra_days_on_exception, 5);
}

#[test]
fn test_partial_override_keeps_remaining_defaults() {
    // 配置文件只覆写部分字段,其余字段保持默认值
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"stale_event_threshold_days": 5, "scan_concurrency": 8}}"#
    )
    .unwrap();

    let config = EngineConfig::from_file(file.path()).unwrap();

    assert_eq!(config.stale_event_threshold_days, 5);
    assert_eq!(config.scan_concurrency, 8);
    assert_eq!(config.status_factor_impact, 80);
    assert_eq!(config.performance_window_days, 90);
}

#[test]
fn test_from_file_rejects_invalid_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not a config").unwrap();

    assert!(EngineConfig::from_file(file.path()).is_err());
}

#[test]
fn test_config_round_trips_through_json() {
    let config = EngineConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    let restored: EngineConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.stale_event_threshold_days, config.stale_event_threshold_days);
    assert_eq!(restored.scan_concurrency, config.scan_concurrency);
}
