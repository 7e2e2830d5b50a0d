// ==========================================
// 测试辅助模块
// ==========================================
// 职责: 提供测试数据构造器与内存版存储替身
// 说明: 各测试文件按需取用,允许存在未使用项
// ==========================================

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use shipment_tracking::domain::{
    DelayAlert, ShipmentOrder, TrackingCacheEntry, TrackingEvent,
};
use shipment_tracking::engine::{AlertStore, OrderStore, TrackingCacheStore};
use shipment_tracking::repository::{RepositoryError, RepositoryResult};
use shipment_tracking::OrderStatus;

// ==========================================
// 测试数据构造器
// ==========================================

/// 构造 UTC 时间戳（0 点）
pub fn utc_at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// 构造日期
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// 创建测试用订单
pub fn create_test_order(
    order_id: &str,
    carrier: &str,
    service_type: Option<&str>,
    status: OrderStatus,
    created_at: DateTime<Utc>,
) -> ShipmentOrder {
    ShipmentOrder {
        order_id: order_id.to_string(),
        carrier: carrier.to_string(),
        service_type: service_type.map(|s| s.to_string()),
        tracking_code: Some(format!("BR{}XX", order_id)),
        status,
        created_at,
        delivered_at: None,
    }
}

/// 创建测试用已签收订单
pub fn create_delivered_order(
    order_id: &str,
    carrier: &str,
    created_at: DateTime<Utc>,
    delivered_at: DateTime<Utc>,
) -> ShipmentOrder {
    ShipmentOrder {
        order_id: order_id.to_string(),
        carrier: carrier.to_string(),
        service_type: None,
        tracking_code: Some(format!("BR{}XX", order_id)),
        status: OrderStatus::Delivered,
        created_at,
        delivered_at: Some(delivered_at),
    }
}

/// 创建测试用物流事件
pub fn create_test_event(occurred_at: DateTime<Utc>, description: &str) -> TrackingEvent {
    TrackingEvent {
        occurred_at,
        location: "Curitiba/PR".to_string(),
        description: description.to_string(),
    }
}

/// 创建测试用追踪缓存条目（events 需按时间升序传入）
pub fn create_test_cache(
    tracking_code: &str,
    carrier: &str,
    status: OrderStatus,
    events: Vec<TrackingEvent>,
) -> TrackingCacheEntry {
    let last_update = events
        .last()
        .map(|e| e.occurred_at)
        .unwrap_or_else(Utc::now);
    TrackingCacheEntry {
        tracking_code: tracking_code.to_string(),
        carrier: carrier.to_string(),
        status,
        events,
        estimated_delivery: None,
        last_update,
    }
}

// ==========================================
// MemoryOrderStore - 内存版订单库
// ==========================================

/// 内存版订单库替身
#[derive(Default)]
pub struct MemoryOrderStore {
    orders: Vec<ShipmentOrder>,
}

impl MemoryOrderStore {
    pub fn new(orders: Vec<ShipmentOrder>) -> Self {
        Self { orders }
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn get_order(&self, order_id: &str) -> RepositoryResult<Option<ShipmentOrder>> {
        Ok(self
            .orders
            .iter()
            .find(|o| o.order_id == order_id)
            .cloned())
    }

    async fn list_active_orders(&self) -> RepositoryResult<Vec<ShipmentOrder>> {
        Ok(self
            .orders
            .iter()
            .filter(|o| o.is_active())
            .cloned()
            .collect())
    }

    async fn list_delivered_since(
        &self,
        carrier: &str,
        since: DateTime<Utc>,
    ) -> RepositoryResult<Vec<ShipmentOrder>> {
        Ok(self
            .orders
            .iter()
            .filter(|o| {
                o.carrier.eq_ignore_ascii_case(carrier)
                    && o.status == OrderStatus::Delivered
                    && o.delivered_at.is_some_and(|d| d >= since)
            })
            .cloned()
            .collect())
    }
}

// ==========================================
// FailingOrderStore - 永远失败的订单库
// ==========================================

/// 所有调用均返回存储故障的订单库替身
pub struct FailingOrderStore;

#[async_trait]
impl OrderStore for FailingOrderStore {
    async fn get_order(&self, _order_id: &str) -> RepositoryResult<Option<ShipmentOrder>> {
        Err(RepositoryError::DatabaseQueryError(
            "模拟订单库故障".to_string(),
        ))
    }

    async fn list_active_orders(&self) -> RepositoryResult<Vec<ShipmentOrder>> {
        Err(RepositoryError::DatabaseQueryError(
            "模拟订单库故障".to_string(),
        ))
    }

    async fn list_delivered_since(
        &self,
        _carrier: &str,
        _since: DateTime<Utc>,
    ) -> RepositoryResult<Vec<ShipmentOrder>> {
        Err(RepositoryError::DatabaseQueryError(
            "模拟订单库故障".to_string(),
        ))
    }
}

// ==========================================
// MemoryTrackingCacheStore - 内存版追踪缓存
// ==========================================

/// 内存版追踪缓存替身
///
/// fail_codes 中的运单号查询时返回存储故障，用于失败隔离测试。
#[derive(Default)]
pub struct MemoryTrackingCacheStore {
    entries: HashMap<String, TrackingCacheEntry>,
    fail_codes: HashSet<String>,
}

impl MemoryTrackingCacheStore {
    pub fn new(entries: Vec<TrackingCacheEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|e| (e.tracking_code.clone(), e))
                .collect(),
            fail_codes: HashSet::new(),
        }
    }

    /// 指定某运单号的查询返回故障
    pub fn with_failure(mut self, tracking_code: &str) -> Self {
        self.fail_codes.insert(tracking_code.to_string());
        self
    }
}

#[async_trait]
impl TrackingCacheStore for MemoryTrackingCacheStore {
    async fn get_cache(
        &self,
        tracking_code: &str,
    ) -> RepositoryResult<Option<TrackingCacheEntry>> {
        if self.fail_codes.contains(tracking_code) {
            return Err(RepositoryError::DatabaseQueryError(
                "模拟追踪缓存故障".to_string(),
            ));
        }
        Ok(self.entries.get(tracking_code).cloned())
    }
}

// ==========================================
// MemoryAlertStore - 内存版告警库
// ==========================================

/// 内存版告警库替身，记录全部写入供断言
#[derive(Default)]
pub struct MemoryAlertStore {
    alerts: Mutex<Vec<DelayAlert>>,
}

impl MemoryAlertStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 快照当前写入的全部告警
    pub fn snapshot(&self) -> Vec<DelayAlert> {
        self.alerts.lock().unwrap().clone()
    }
}

#[async_trait]
impl AlertStore for MemoryAlertStore {
    async fn insert_alert(&self, alert: DelayAlert) -> RepositoryResult<()> {
        self.alerts.lock().unwrap().push(alert);
        Ok(())
    }
}

// ==========================================
// FailingAlertStore - 永远失败的告警库
// ==========================================

/// 所有写入均返回存储故障的告警库替身
pub struct FailingAlertStore;

#[async_trait]
impl AlertStore for FailingAlertStore {
    async fn insert_alert(&self, _alert: DelayAlert) -> RepositoryResult<()> {
        Err(RepositoryError::DatabaseQueryError(
            "模拟告警库故障".to_string(),
        ))
    }
}
