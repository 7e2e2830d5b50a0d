// ==========================================
// 跨境包裹追踪系统 - 领域类型定义
// ==========================================
// 职责: 定义订单状态、延误等级、告警优先级等核心枚举
// 红线: 延误等级是"等级制",不是评分制
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 订单状态 (Order Status)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,        // 待揽收
    InTransit,      // 运输中
    OutForDelivery, // 派送中
    Delivered,      // 已签收
    Delayed,        // 延误
    Exception,      // 异常
    Cancelled,      // 已取消
    Returned,       // 已退回
}

impl OrderStatus {
    /// 是否为终态（已签收/已取消不再参与延误扫描）
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// 承运商是否已上报问题状态
    pub fn is_problem(&self) -> bool {
        matches!(self, OrderStatus::Delayed | OrderStatus::Exception)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "PENDING"),
            OrderStatus::InTransit => write!(f, "IN_TRANSIT"),
            OrderStatus::OutForDelivery => write!(f, "OUT_FOR_DELIVERY"),
            OrderStatus::Delivered => write!(f, "DELIVERED"),
            OrderStatus::Delayed => write!(f, "DELAYED"),
            OrderStatus::Exception => write!(f, "EXCEPTION"),
            OrderStatus::Cancelled => write!(f, "CANCELLED"),
            OrderStatus::Returned => write!(f, "RETURNED"),
        }
    }
}

// ==========================================
// 延误等级 (Delay Severity)
// ==========================================
// 判定输入只有 delay_days 一个维度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DelaySeverity {
    None,     // 无延误
    Warning,  // 轻度延误
    Critical, // 严重延误
    Urgent,   // 紧急延误
}

impl DelaySeverity {
    /// 按延误工作日数判定延误等级
    ///
    /// # 规则（区间下界含）
    /// - 0 → None
    /// - 1-2 → Warning
    /// - 3-5 → Critical
    /// - >5 → Urgent
    pub fn from_delay_days(delay_days: i64) -> Self {
        match delay_days {
            d if d <= 0 => DelaySeverity::None,
            1..=2 => DelaySeverity::Warning,
            3..=5 => DelaySeverity::Critical,
            _ => DelaySeverity::Urgent,
        }
    }
}

impl fmt::Display for DelaySeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DelaySeverity::None => write!(f, "NONE"),
            DelaySeverity::Warning => write!(f, "WARNING"),
            DelaySeverity::Critical => write!(f, "CRITICAL"),
            DelaySeverity::Urgent => write!(f, "URGENT"),
        }
    }
}

// ==========================================
// 告警优先级 (Alert Priority)
// ==========================================
// 由延误等级派生: Urgent → Urgent; Critical → High; 其余 → Normal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertPriority {
    Normal, // 普通
    High,   // 高
    Urgent, // 紧急
}

impl From<DelaySeverity> for AlertPriority {
    fn from(severity: DelaySeverity) -> Self {
        match severity {
            DelaySeverity::Urgent => AlertPriority::Urgent,
            DelaySeverity::Critical => AlertPriority::High,
            _ => AlertPriority::Normal,
        }
    }
}

impl fmt::Display for AlertPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertPriority::Normal => write!(f, "NORMAL"),
            AlertPriority::High => write!(f, "HIGH"),
            AlertPriority::Urgent => write!(f, "URGENT"),
        }
    }
}
