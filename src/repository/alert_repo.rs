// ==========================================
// 跨境包裹追踪系统 - 延误告警仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 用途: 告警发射器的落库目标,也是审计/排障数据源
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::analysis::DelayAlert;
use crate::domain::types::AlertPriority;
use crate::engine::stores::AlertStore;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::order_repo::{format_datetime, parse_datetime};
use async_trait::async_trait;
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// SqliteAlertRepository - 告警仓储
// ==========================================
/// 延误告警仓储（SQLite 实现）
/// 职责: 管理 delay_alert 表
pub struct SqliteAlertRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteAlertRepository {
    /// 创建新的 SqliteAlertRepository 实例
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

    /// 插入告警（同步内部实现）
    fn insert(&self, alert: &DelayAlert) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO delay_alert (
                alert_id, order_id, alert_type, priority,
                title, message, metadata, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                alert.alert_id,
                alert.order_id,
                alert.alert_type,
                alert.priority.to_string(),
                alert.title,
                alert.message,
                serde_json::to_string(&alert.metadata)?,
                format_datetime(&alert.created_at),
            ],
        )?;
        Ok(())
    }

    /// 查询订单的全部告警（按生成时间升序）
    pub fn find_by_order_id(&self, order_id: &str) -> RepositoryResult<Vec<DelayAlert>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT alert_id, order_id, alert_type, priority,
                   title, message, metadata, created_at
            FROM delay_alert
            WHERE order_id = ?1
            ORDER BY created_at ASC
            "#,
        )?;

        let alerts = stmt
            .query_map(params![order_id], |row| {
                Ok(DelayAlert {
                    alert_id: row.get(0)?,
                    order_id: row.get(1)?,
                    alert_type: row.get(2)?,
                    priority: parse_alert_priority(&row.get::<_, String>(3)?),
                    title: row.get(4)?,
                    message: row.get(5)?,
                    metadata: serde_json::from_str(&row.get::<_, String>(6)?)
                        .unwrap_or(serde_json::Value::Null),
                    created_at: parse_datetime(&row.get::<_, String>(7)?),
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(alerts)
    }
}

#[async_trait]
impl AlertStore for SqliteAlertRepository {
    async fn insert_alert(&self, alert: DelayAlert) -> RepositoryResult<()> {
        self.insert(&alert)
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// 解析告警优先级字符串
fn parse_alert_priority(s: &str) -> AlertPriority {
    match s {
        "URGENT" => AlertPriority::Urgent,
        "HIGH" => AlertPriority::High,
        _ => AlertPriority::Normal, // 默认值
    }
}
