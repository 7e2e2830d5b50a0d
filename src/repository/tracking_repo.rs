// ==========================================
// 跨境包裹追踪系统 - 运单追踪缓存仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 说明: events 列以 JSON 数组存储（时间升序）
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::tracking::{TrackingCacheEntry, TrackingEvent};
use crate::engine::stores::TrackingCacheStore;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::order_repo::{format_datetime, parse_datetime, parse_order_status};
use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// SqliteTrackingCacheRepository - 追踪缓存仓储
// ==========================================
/// 运单追踪缓存仓储（SQLite 实现）
/// 职责: 管理 tracking_cache 表
/// 说明: 缓存由外部抓取管道写入;写入方法供测试与回填使用
pub struct SqliteTrackingCacheRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTrackingCacheRepository {
    /// 创建新的 SqliteTrackingCacheRepository 实例
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

    /// 插入或更新缓存条目（INSERT OR REPLACE）
    pub fn upsert(&self, entry: &TrackingCacheEntry) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO tracking_cache (
                tracking_code, carrier, status, events,
                estimated_delivery, last_update
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                entry.tracking_code,
                entry.carrier,
                entry.status.to_string(),
                serde_json::to_string(&entry.events)?,
                entry.estimated_delivery.map(|d| d.to_string()),
                format_datetime(&entry.last_update),
            ],
        )?;
        Ok(())
    }

    /// 按运单号查询（同步内部实现）
    fn find_by_code(&self, tracking_code: &str) -> RepositoryResult<Option<TrackingCacheEntry>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT tracking_code, carrier, status, events,
                   estimated_delivery, last_update
            FROM tracking_cache
            WHERE tracking_code = ?1
            "#,
        )?;

        let result = stmt.query_row(params![tracking_code], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, String>(5)?,
            ))
        });

        let (tracking_code, carrier, status, events_json, estimated, last_update) = match result {
            Ok(tuple) => tuple,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let events: Vec<TrackingEvent> = serde_json::from_str(&events_json)?;

        Ok(Some(TrackingCacheEntry {
            tracking_code,
            carrier,
            status: parse_order_status(&status),
            events,
            estimated_delivery: estimated
                .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
            last_update: parse_datetime(&last_update),
        }))
    }
}

#[async_trait]
impl TrackingCacheStore for SqliteTrackingCacheRepository {
    async fn get_cache(
        &self,
        tracking_code: &str,
    ) -> RepositoryResult<Option<TrackingCacheEntry>> {
        self.find_by_code(tracking_code)
    }
}
