// ==========================================
// 跨境包裹追踪系统 - 订单实体
// ==========================================
// 职责: 定义发货订单主数据
// 红线: 订单归属外部订单库,引擎只读不改
// ==========================================

use crate::domain::types::OrderStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 发货订单
///
/// 由外部订单库持有，延误引擎只读取以下字段：
/// - 承运商与服务类型（SLA 查询）
/// - 创建时间（在途工作日计算基准）
/// - 当前状态（终态过滤、问题状态因子）
/// - 签收时间（历史履约统计）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentOrder {
    /// 订单ID
    pub order_id: String,
    /// 承运商代码（如 correios / jadlog / melhorenvio）
    pub carrier: String,
    /// 服务类型（如 PAC / SEDEX），可缺失
    pub service_type: Option<String>,
    /// 运单号（无运单号的订单不参与延误扫描）
    pub tracking_code: Option<String>,
    /// 当前状态
    pub status: OrderStatus,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 签收时间（未签收为 None）
    pub delivered_at: Option<DateTime<Utc>>,
}

impl ShipmentOrder {
    /// 是否为活跃订单（非终态且有运单号）
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal() && self.tracking_code.is_some()
    }
}
