// ==========================================
// 数据仓储层集成测试
// ==========================================
// 职责: 验证 SQLite 实现的读写往返与查询过滤
// 说明: 每个测试使用独立临时数据库文件
// ==========================================

mod helpers;

use helpers::{create_delivered_order, create_test_event, create_test_order, date, utc_at};
use shipment_tracking::db::open_sqlite_connection;
use shipment_tracking::domain::{DelayAlert, TrackingCacheEntry};
use shipment_tracking::engine::{AlertStore, OrderStore, TrackingCacheStore};
use shipment_tracking::repository::{
    init_schema, SqliteAlertRepository, SqliteOrderRepository, SqliteTrackingCacheRepository,
};
use shipment_tracking::{AlertPriority, OrderStatus};
use std::sync::{Arc, Mutex};

/// 创建临时数据库并初始化 schema
fn create_test_db() -> (tempfile::TempDir, Arc<Mutex<rusqlite::Connection>>) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let conn = open_sqlite_connection(db_path.to_str().unwrap()).unwrap();
    init_schema(&conn).unwrap();
    (dir, Arc::new(Mutex::new(conn)))
}

#[tokio::test]
async fn test_order_upsert_and_get_round_trip() {
    let (_dir, conn) = create_test_db();
    let repo = SqliteOrderRepository::from_connection(conn);

    let order = create_test_order(
        "O1",
        "correios",
        Some("PAC"),
        OrderStatus::InTransit,
        utc_at(2026, 6, 1),
    );
    repo.upsert(&order).unwrap();

    let loaded = repo.get_order("O1").await.unwrap().expect("应找到订单");
    assert_eq!(loaded.order_id, "O1");
    assert_eq!(loaded.carrier, "correios");
    assert_eq!(loaded.service_type.as_deref(), Some("PAC"));
    assert_eq!(loaded.status, OrderStatus::InTransit);
    assert_eq!(loaded.created_at, utc_at(2026, 6, 1));
    assert!(loaded.delivered_at.is_none());
}

#[tokio::test]
async fn test_get_missing_order_returns_none() {
    let (_dir, conn) = create_test_db();
    let repo = SqliteOrderRepository::from_connection(conn);

    assert!(repo.get_order("NO_SUCH").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_active_orders_filters_terminal_and_untracked() {
    let (_dir, conn) = create_test_db();
    let repo = SqliteOrderRepository::from_connection(conn);

    let active = create_test_order(
        "O1",
        "correios",
        Some("PAC"),
        OrderStatus::InTransit,
        utc_at(2026, 6, 1),
    );
    let delivered = create_delivered_order("O2", "correios", utc_at(2026, 6, 1), utc_at(2026, 6, 10));
    let cancelled = create_test_order(
        "O3",
        "correios",
        Some("PAC"),
        OrderStatus::Cancelled,
        utc_at(2026, 6, 1),
    );
    let mut untracked = create_test_order(
        "O4",
        "correios",
        Some("PAC"),
        OrderStatus::Pending,
        utc_at(2026, 6, 1),
    );
    untracked.tracking_code = None;

    repo.upsert(&active).unwrap();
    repo.upsert(&delivered).unwrap();
    repo.upsert(&cancelled).unwrap();
    repo.upsert(&untracked).unwrap();

    let listed = repo.list_active_orders().await.unwrap();
    let ids: Vec<&str> = listed.iter().map(|o| o.order_id.as_str()).collect();
    assert_eq!(ids, vec!["O1"]);
}

#[tokio::test]
async fn test_list_delivered_since_filters_by_carrier_and_window() {
    let (_dir, conn) = create_test_db();
    let repo = SqliteOrderRepository::from_connection(conn);

    // 窗口内 correios
    repo.upsert(&create_delivered_order("O1", "correios", utc_at(2026, 6, 1), utc_at(2026, 6, 12)))
        .unwrap();
    // 窗口外 correios
    repo.upsert(&create_delivered_order("O2", "correios", utc_at(2026, 3, 2), utc_at(2026, 3, 13)))
        .unwrap();
    // 窗口内其他承运商
    repo.upsert(&create_delivered_order("O3", "jadlog", utc_at(2026, 6, 1), utc_at(2026, 6, 12)))
        .unwrap();

    let listed = repo
        .list_delivered_since("correios", utc_at(2026, 6, 1))
        .await
        .unwrap();
    let ids: Vec<&str> = listed.iter().map(|o| o.order_id.as_str()).collect();
    assert_eq!(ids, vec!["O1"]);

    // 承运商匹配忽略大小写
    let listed = repo
        .list_delivered_since("Correios", utc_at(2026, 6, 1))
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_tracking_cache_upsert_and_get_round_trip() {
    let (_dir, conn) = create_test_db();
    let repo = SqliteTrackingCacheRepository::from_connection(conn);

    let entry = TrackingCacheEntry {
        tracking_code: "BR123BR".to_string(),
        carrier: "correios".to_string(),
        status: OrderStatus::InTransit,
        events: vec![
            create_test_event(utc_at(2026, 6, 1), "Objeto postado"),
            create_test_event(utc_at(2026, 6, 4), "Em transito"),
        ],
        estimated_delivery: Some(date(2026, 6, 22)),
        last_update: utc_at(2026, 6, 4),
    };
    repo.upsert(&entry).unwrap();

    let loaded = repo
        .get_cache("BR123BR")
        .await
        .unwrap()
        .expect("应找到缓存条目");
    assert_eq!(loaded.tracking_code, "BR123BR");
    assert_eq!(loaded.status, OrderStatus::InTransit);
    assert_eq!(loaded.events.len(), 2);
    assert_eq!(loaded.events[1].description, "Em transito");
    assert_eq!(loaded.estimated_delivery, Some(date(2026, 6, 22)));

    // 缓存缺失返回 None
    assert!(repo.get_cache("NO_SUCH").await.unwrap().is_none());
}

#[tokio::test]
async fn test_alert_insert_and_query_round_trip() {
    let (_dir, conn) = create_test_db();
    let repo = SqliteAlertRepository::from_connection(conn);

    let alert = DelayAlert {
        alert_id: "A1".to_string(),
        order_id: "O1".to_string(),
        alert_type: "DELAY_DETECTED".to_string(),
        priority: AlertPriority::High,
        title: "订单延误 - 5 个工作日".to_string(),
        message: "运单 BR123BR 已超过应达日期".to_string(),
        metadata: serde_json::json!({"delay_days": 5}),
        created_at: utc_at(2026, 6, 29),
    };
    repo.insert_alert(alert).await.unwrap();

    let alerts = repo.find_by_order_id("O1").unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].alert_id, "A1");
    assert_eq!(alerts[0].priority, AlertPriority::High);
    assert_eq!(alerts[0].metadata["delay_days"], 5);

    assert!(repo.find_by_order_id("NO_SUCH").unwrap().is_empty());
}

#[tokio::test]
async fn test_repositories_share_one_connection() {
    // 三个仓储共享同一 Arc<Mutex<Connection>>,与主程序装配方式一致
    let (_dir, conn) = create_test_db();
    let order_repo = SqliteOrderRepository::from_connection(Arc::clone(&conn));
    let tracking_repo = SqliteTrackingCacheRepository::from_connection(Arc::clone(&conn));

    order_repo
        .upsert(&create_test_order(
            "O1",
            "correios",
            Some("PAC"),
            OrderStatus::InTransit,
            utc_at(2026, 6, 1),
        ))
        .unwrap();
    tracking_repo
        .upsert(&TrackingCacheEntry {
            tracking_code: "BRO1XX".to_string(),
            carrier: "correios".to_string(),
            status: OrderStatus::InTransit,
            events: vec![],
            estimated_delivery: None,
            last_update: utc_at(2026, 6, 1),
        })
        .unwrap();

    assert!(order_repo.get_order("O1").await.unwrap().is_some());
    assert!(tracking_repo.get_cache("BRO1XX").await.unwrap().is_some());
}
