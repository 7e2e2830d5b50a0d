// ==========================================
// 延误概率评估引擎测试
// ==========================================
// 职责: 验证因子命中条件、均值聚合与边界行为
// ==========================================

mod helpers;

use helpers::{create_test_cache, create_test_event, create_test_order, utc_at};
use shipment_tracking::config::EngineConfig;
use shipment_tracking::domain::{CarrierPerformance, CarrierSla};
use shipment_tracking::engine::DelayProbabilityEstimator;
use shipment_tracking::OrderStatus;

fn pac_sla() -> CarrierSla {
    CarrierSla::service_level("correios", "PAC", 7, 15)
}

#[test]
fn test_no_factors_yields_zero_probability() {
    // 刚创建的正常订单,无缓存、无历史数据 → 零因子
    let order = create_test_order(
        "O1",
        "correios",
        Some("PAC"),
        OrderStatus::Pending,
        utc_at(2026, 6, 26),
    );
    let estimator = DelayProbabilityEstimator::new(EngineConfig::default());

    let prediction = estimator.estimate(&order, None, &pac_sla(), None, utc_at(2026, 6, 29));

    assert!(prediction.factors.is_empty());
    assert_eq!(prediction.probability, 0.0);
    assert!(!prediction.will_be_delayed);
    assert_eq!(prediction.estimated_delay_days, 0);
}

#[test]
fn test_problem_status_factor_alone() {
    // 仅命中状态因子(权重 80) → 概率 80,预估超期 ceil(30/10) = 3
    let order = create_test_order(
        "O1",
        "correios",
        Some("PAC"),
        OrderStatus::Delayed,
        utc_at(2026, 6, 26),
    );
    let estimator = DelayProbabilityEstimator::new(EngineConfig::default());

    let prediction = estimator.estimate(&order, None, &pac_sla(), None, utc_at(2026, 6, 29));

    assert_eq!(prediction.factors.len(), 1);
    assert_eq!(prediction.factors[0].factor, "CARRIER_REPORTED_STATUS");
    assert!((prediction.probability - 80.0).abs() < f64::EPSILON);
    assert!(prediction.will_be_delayed);
    assert_eq!(prediction.estimated_delay_days, 3);
}

#[test]
fn test_transit_factor_alone_stays_at_decision_boundary() {
    // 在途 20 > 0.8 × 15 = 12 → 仅命中在途因子(权重 50)
    // 概率恰为 50,不触发 will_be_delayed(需 > 50)
    let order = create_test_order(
        "O1",
        "correios",
        Some("PAC"),
        OrderStatus::InTransit,
        utc_at(2026, 6, 1),
    );
    let estimator = DelayProbabilityEstimator::new(EngineConfig::default());

    let prediction = estimator.estimate(&order, None, &pac_sla(), None, utc_at(2026, 6, 29));

    assert_eq!(prediction.factors.len(), 1);
    assert_eq!(prediction.factors[0].factor, "TRANSIT_TIME_NEAR_SLA");
    assert!((prediction.probability - 50.0).abs() < f64::EPSILON);
    assert!(!prediction.will_be_delayed);
    assert_eq!(prediction.estimated_delay_days, 0);
}

#[test]
fn test_multiple_factors_aggregate_by_mean() {
    // 状态因子(80) + 停更因子(60) → 均值 70,预估超期 ceil(20/10) = 2
    let order = create_test_order(
        "O1",
        "correios",
        Some("PAC"),
        OrderStatus::Exception,
        utc_at(2026, 6, 26),
    );
    let cache = create_test_cache(
        "BR123BR",
        "correios",
        OrderStatus::Exception,
        vec![create_test_event(utc_at(2026, 6, 19), "Em transito")],
    );
    let estimator = DelayProbabilityEstimator::new(EngineConfig::default());

    let prediction = estimator.estimate(
        &order,
        Some(&cache),
        &pac_sla(),
        None,
        utc_at(2026, 6, 29),
    );

    assert_eq!(prediction.factors.len(), 2);
    assert!((prediction.probability - 70.0).abs() < f64::EPSILON);
    assert!(prediction.will_be_delayed);
    assert_eq!(prediction.estimated_delay_days, 2);
}

#[test]
fn test_poor_history_factor_requires_low_on_time_rate() {
    let order = create_test_order(
        "O1",
        "correios",
        Some("PAC"),
        OrderStatus::Pending,
        utc_at(2026, 6, 26),
    );
    let estimator = DelayProbabilityEstimator::new(EngineConfig::default());

    let poor = CarrierPerformance {
        carrier: "correios".to_string(),
        avg_delay_days: 2.5,
        on_time_rate_pct: 60.0,
        sample_count: 40,
        window_days: 90,
    };
    let prediction = estimator.estimate(
        &order,
        None,
        &pac_sla(),
        Some(&poor),
        utc_at(2026, 6, 29),
    );
    assert_eq!(prediction.factors.len(), 1);
    assert_eq!(prediction.factors[0].factor, "CARRIER_POOR_HISTORY");

    // 按时率达标时不命中
    let good = CarrierPerformance {
        on_time_rate_pct: 92.0,
        ..poor
    };
    let prediction = estimator.estimate(
        &order,
        None,
        &pac_sla(),
        Some(&good),
        utc_at(2026, 6, 29),
    );
    assert!(prediction.factors.is_empty());
}

#[test]
fn test_probability_is_bounded() {
    // 全因子命中: (80 + 50 + 30 + 60) / 4 = 55,仍在 [0, 100]
    let order = create_test_order(
        "O1",
        "correios",
        Some("PAC"),
        OrderStatus::Delayed,
        utc_at(2026, 6, 1),
    );
    let cache = create_test_cache(
        "BR123BR",
        "correios",
        OrderStatus::Delayed,
        vec![create_test_event(utc_at(2026, 6, 19), "Em transito")],
    );
    let poor = CarrierPerformance {
        carrier: "correios".to_string(),
        avg_delay_days: 2.5,
        on_time_rate_pct: 60.0,
        sample_count: 40,
        window_days: 90,
    };
    let estimator = DelayProbabilityEstimator::new(EngineConfig::default());

    let prediction = estimator.estimate(
        &order,
        Some(&cache),
        &pac_sla(),
        Some(&poor),
        utc_at(2026, 6, 29),
    );

    assert_eq!(prediction.factors.len(), 4);
    assert!((prediction.probability - 55.0).abs() < f64::EPSILON);
    assert!(prediction.probability <= 100.0);
    assert!(prediction.will_be_delayed);
    assert_eq!(prediction.estimated_delay_days, 1);
}
