// ==========================================
// 跨境包裹追踪系统 - 订单数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::order::ShipmentOrder;
use crate::domain::types::OrderStatus;
use crate::engine::stores::OrderStore;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// SqliteOrderRepository - 订单仓储
// ==========================================
/// 订单仓储（SQLite 实现）
/// 职责: 管理 shipment_order 表的读取与写入
/// 说明: 延误引擎侧只读;写入方法供导入管道与测试使用
pub struct SqliteOrderRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteOrderRepository {
    /// 创建新的 SqliteOrderRepository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 插入或更新订单（INSERT OR REPLACE）
    pub fn upsert(&self, order: &ShipmentOrder) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO shipment_order (
                order_id, carrier, service_type, tracking_code,
                status, created_at, delivered_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                order.order_id,
                order.carrier,
                order.service_type,
                order.tracking_code,
                order.status.to_string(),
                format_datetime(&order.created_at),
                order.delivered_at.as_ref().map(format_datetime),
            ],
        )?;
        Ok(())
    }

    /// 按订单ID查询（同步内部实现）
    fn find_by_id(&self, order_id: &str) -> RepositoryResult<Option<ShipmentOrder>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT order_id, carrier, service_type, tracking_code,
                   status, created_at, delivered_at
            FROM shipment_order
            WHERE order_id = ?1
            "#,
        )?;

        let result = stmt.query_row(params![order_id], map_order_row);

        match result {
            Ok(order) => Ok(Some(order)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 查询所有活跃订单（同步内部实现）
    fn find_active(&self) -> RepositoryResult<Vec<ShipmentOrder>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT order_id, carrier, service_type, tracking_code,
                   status, created_at, delivered_at
            FROM shipment_order
            WHERE status NOT IN ('DELIVERED', 'CANCELLED')
              AND tracking_code IS NOT NULL
            ORDER BY created_at ASC
            "#,
        )?;

        let orders = stmt
            .query_map([], map_order_row)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(orders)
    }

    /// 查询承运商自 since 以来已签收的订单（同步内部实现）
    fn find_delivered_since(
        &self,
        carrier: &str,
        since: DateTime<Utc>,
    ) -> RepositoryResult<Vec<ShipmentOrder>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT order_id, carrier, service_type, tracking_code,
                   status, created_at, delivered_at
            FROM shipment_order
            WHERE carrier = ?1 COLLATE NOCASE
              AND status = 'DELIVERED'
              AND delivered_at IS NOT NULL
              AND delivered_at >= ?2
            ORDER BY delivered_at ASC
            "#,
        )?;

        let orders = stmt
            .query_map(params![carrier, format_datetime(&since)], map_order_row)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(orders)
    }
}

#[async_trait]
impl OrderStore for SqliteOrderRepository {
    async fn get_order(&self, order_id: &str) -> RepositoryResult<Option<ShipmentOrder>> {
        self.find_by_id(order_id)
    }

    async fn list_active_orders(&self) -> RepositoryResult<Vec<ShipmentOrder>> {
        self.find_active()
    }

    async fn list_delivered_since(
        &self,
        carrier: &str,
        since: DateTime<Utc>,
    ) -> RepositoryResult<Vec<ShipmentOrder>> {
        self.find_delivered_since(carrier, since)
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// 行 → 订单实体映射
fn map_order_row(row: &Row<'_>) -> SqliteResult<ShipmentOrder> {
    Ok(ShipmentOrder {
        order_id: row.get(0)?,
        carrier: row.get(1)?,
        service_type: row.get(2)?,
        tracking_code: row.get(3)?,
        status: parse_order_status(&row.get::<_, String>(4)?),
        created_at: parse_datetime(&row.get::<_, String>(5)?),
        delivered_at: row
            .get::<_, Option<String>>(6)?
            .map(|s| parse_datetime(&s)),
    })
}

/// 解析订单状态字符串
pub(crate) fn parse_order_status(s: &str) -> OrderStatus {
    match s {
        "PENDING" => OrderStatus::Pending,
        "IN_TRANSIT" => OrderStatus::InTransit,
        "OUT_FOR_DELIVERY" => OrderStatus::OutForDelivery,
        "DELIVERED" => OrderStatus::Delivered,
        "DELAYED" => OrderStatus::Delayed,
        "EXCEPTION" => OrderStatus::Exception,
        "CANCELLED" => OrderStatus::Cancelled,
        "RETURNED" => OrderStatus::Returned,
        _ => OrderStatus::Pending, // 默认值
    }
}

/// 格式化时间戳（UTC, "%Y-%m-%d %H:%M:%S"）
pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.naive_utc().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// 解析时间戳字符串
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|_| NaiveDateTime::default());
    Utc.from_utc_datetime(&naive)
}
