// ==========================================
// 跨境包裹追踪系统 - 运单追踪缓存实体
// ==========================================
// 职责: 定义运单追踪缓存条目与物流事件
// 说明: 缓存由外部抓取管道写入,引擎容忍缓存缺失
// ==========================================

use crate::domain::types::OrderStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// 物流事件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingEvent {
    /// 事件发生时间
    pub occurred_at: DateTime<Utc>,
    /// 事件发生地点
    pub location: String,
    /// 事件描述
    pub description: String,
}

/// 运单追踪缓存条目
///
/// events 按发生时间升序排列（最早在前）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingCacheEntry {
    /// 运单号
    pub tracking_code: String,
    /// 承运商代码
    pub carrier: String,
    /// 缓存中的当前状态
    pub status: OrderStatus,
    /// 物流事件列表（时间升序）
    pub events: Vec<TrackingEvent>,
    /// 承运商预计送达日期
    pub estimated_delivery: Option<NaiveDate>,
    /// 缓存最后更新时间
    pub last_update: DateTime<Utc>,
}

impl TrackingCacheEntry {
    /// 最近一条物流事件（events 升序，取末尾）
    pub fn latest_event(&self) -> Option<&TrackingEvent> {
        self.events.last()
    }

    /// 最早一条物流事件
    pub fn earliest_event(&self) -> Option<&TrackingEvent> {
        self.events.first()
    }
}
