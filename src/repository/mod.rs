// ==========================================
// 跨境包裹追踪系统 - 数据仓储层
// ==========================================
// 职责: 提供外部存储契约的 SQLite 实现,屏蔽数据库细节
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod alert_repo;
pub mod error;
pub mod order_repo;
pub mod tracking_repo;

// 重导出核心仓储
pub use alert_repo::SqliteAlertRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use order_repo::SqliteOrderRepository;
pub use tracking_repo::SqliteTrackingCacheRepository;

use rusqlite::Connection;

/// 初始化数据库 schema（幂等）
///
/// # 表结构
/// - shipment_order: 订单主数据（外部订单库的本地实现）
/// - tracking_cache: 运单追踪缓存（events 列为 JSON 数组）
/// - delay_alert: 延误告警（metadata 列为完整分析结果 JSON）
pub fn init_schema(conn: &Connection) -> RepositoryResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS shipment_order (
            order_id        TEXT PRIMARY KEY,
            carrier         TEXT NOT NULL,
            service_type    TEXT,
            tracking_code   TEXT,
            status          TEXT NOT NULL,
            created_at      TEXT NOT NULL,
            delivered_at    TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_order_status ON shipment_order (status);
        CREATE INDEX IF NOT EXISTS idx_order_carrier_delivered
            ON shipment_order (carrier, delivered_at);

        CREATE TABLE IF NOT EXISTS tracking_cache (
            tracking_code       TEXT PRIMARY KEY,
            carrier             TEXT NOT NULL,
            status              TEXT NOT NULL,
            events              TEXT NOT NULL,
            estimated_delivery  TEXT,
            last_update         TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS delay_alert (
            alert_id    TEXT PRIMARY KEY,
            order_id    TEXT NOT NULL,
            alert_type  TEXT NOT NULL,
            priority    TEXT NOT NULL,
            title       TEXT NOT NULL,
            message     TEXT NOT NULL,
            metadata    TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_alert_order_id ON delay_alert (order_id);
        "#,
    )?;
    Ok(())
}
