// ==========================================
// 跨境包裹追踪系统 - 引擎外部存储契约
// ==========================================
// 职责: 定义引擎依赖的三个外部存储的窄接口
// 红线: 引擎只经由本文件的 trait 访问外部数据,禁止直连数据库
// 说明: 构造注入,便于测试替身并行与避免隐藏全局状态
// ==========================================

use crate::domain::{DelayAlert, ShipmentOrder, TrackingCacheEntry};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

// ==========================================
// OrderStore - 订单库读接口
// ==========================================

/// 订单库读接口
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// 按订单ID查询
    ///
    /// # 返回
    /// - Ok(Some): 找到订单
    /// - Ok(None): 订单不存在（不是错误）
    /// - Err: 存储自身故障
    async fn get_order(&self, order_id: &str) -> RepositoryResult<Option<ShipmentOrder>>;

    /// 查询所有活跃订单（状态非终态且运单号非空）
    async fn list_active_orders(&self) -> RepositoryResult<Vec<ShipmentOrder>>;

    /// 查询承运商自 since 以来已签收的订单
    async fn list_delivered_since(
        &self,
        carrier: &str,
        since: DateTime<Utc>,
    ) -> RepositoryResult<Vec<ShipmentOrder>>;
}

// ==========================================
// TrackingCacheStore - 运单追踪缓存读接口
// ==========================================

/// 运单追踪缓存读接口
#[async_trait]
pub trait TrackingCacheStore: Send + Sync {
    /// 按运单号查询缓存条目
    ///
    /// # 返回
    /// - Ok(None): 缓存缺失（引擎容忍,分析降级进行）
    async fn get_cache(&self, tracking_code: &str)
        -> RepositoryResult<Option<TrackingCacheEntry>>;
}

// ==========================================
// AlertStore - 告警库写接口
// ==========================================

/// 告警库写接口
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// 写入一条延误告警
    async fn insert_alert(&self, alert: DelayAlert) -> RepositoryResult<()>;
}

// ==========================================
// DelayRepositories - 引擎存储集合
// ==========================================

/// 延误引擎存储集合
///
/// 聚合引擎所需的三个外部存储，简化依赖注入。
///
/// # 包含的存储
/// - `order_store`: 订单库（只读）
/// - `tracking_store`: 运单追踪缓存（只读）
/// - `alert_store`: 告警库（只写）
#[derive(Clone)]
pub struct DelayRepositories {
    /// 订单库
    pub order_store: Arc<dyn OrderStore>,
    /// 运单追踪缓存
    pub tracking_store: Arc<dyn TrackingCacheStore>,
    /// 告警库
    pub alert_store: Arc<dyn AlertStore>,
}

impl DelayRepositories {
    /// 创建新的存储集合
    pub fn new(
        order_store: Arc<dyn OrderStore>,
        tracking_store: Arc<dyn TrackingCacheStore>,
        alert_store: Arc<dyn AlertStore>,
    ) -> Self {
        Self {
            order_store,
            tracking_store,
            alert_store,
        }
    }
}
