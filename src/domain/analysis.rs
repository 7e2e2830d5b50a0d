// ==========================================
// 跨境包裹追踪系统 - 延误分析结果实体
// ==========================================
// 职责: 定义延误分析、历史履约、延误预测、延误告警等计算结果
// 红线: 分析结果每次重新计算,引擎自身不持久化、不缓存
// ==========================================

use crate::domain::types::{AlertPriority, DelaySeverity, OrderStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// DelayAnalysis - 延误分析结果
// ==========================================

/// 延误分析结果
///
/// 生命周期：每次分析调用新建，只读消费后丢弃。
///
/// # 不变式
/// - `delay_days >= 0`
/// - `delay_severity == None` ⇒ `delay_days == 0`
/// - `confidence ∈ [0, 100]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelayAnalysis {
    /// 运单号
    pub tracking_code: String,
    /// 订单ID
    pub order_id: String,
    /// 承运商代码
    pub carrier: String,
    /// 当前状态
    pub status: OrderStatus,
    /// 在途工作日数（创建日 → 今日）
    pub business_days_in_transit: i64,
    /// 应达日期（创建日 + SLA 最长工作日）
    pub expected_delivery: NaiveDate,
    /// 预计送达日期（缓存值，缺失回退应达日期）
    pub estimated_delivery: NaiveDate,
    /// 是否已延误
    pub is_delayed: bool,
    /// 延误等级
    pub delay_severity: DelaySeverity,
    /// 延误工作日数（超过应达日期的工作日数，非负）
    pub delay_days: i64,
    /// 预测送达日期（由送达预测引擎给出）
    pub predicted_delivery: NaiveDate,
    /// 预测置信度（0-100）
    pub confidence: u8,
    /// 延误因子（人类可读，按检出顺序排列）
    pub factors: Vec<String>,
}

// ==========================================
// CarrierPerformance - 历史履约快照
// ==========================================

/// 承运商历史履约快照
///
/// 基于近 window_days 天内已签收订单计算，每次请求重算，
/// 引擎不缓存（缓存属于外部关注点）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarrierPerformance {
    /// 承运商代码
    pub carrier: String,
    /// 平均超期工作日数
    pub avg_delay_days: f64,
    /// 按时签收率（%）
    pub on_time_rate_pct: f64,
    /// 样本量
    pub sample_count: usize,
    /// 统计窗口（天）
    pub window_days: i64,
}

// ==========================================
// DelayPrediction - 延误概率预测
// ==========================================

/// 延误概率因子
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbabilityFactor {
    /// 因子代码
    pub factor: String,
    /// 影响权重（0-100）
    pub impact: u8,
    /// 因子说明
    pub description: String,
}

/// 延误概率预测结果
///
/// 针对在途订单的独立多因子启发式评估。
///
/// # 不变式
/// - `probability ∈ [0, 100]`
/// - 无因子命中时 `probability == 0` 且 `will_be_delayed == false`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelayPrediction {
    /// 是否预计延误（probability > 50）
    pub will_be_delayed: bool,
    /// 延误概率（0-100，命中因子权重的均值）
    pub probability: f64,
    /// 预估额外延误工作日数
    pub estimated_delay_days: i64,
    /// 命中因子列表（按检出顺序）
    pub factors: Vec<ProbabilityFactor>,
}

// ==========================================
// DeliveryForecast - 送达预测结果
// ==========================================

/// 送达预测结果（独立调用送达预测引擎时的返回值）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryForecast {
    /// 预测送达日期
    pub predicted_delivery: NaiveDate,
    /// 置信度（0-100）
    pub confidence: u8,
}

// ==========================================
// DelayAlert - 延误告警记录
// ==========================================

/// 延误告警记录
///
/// 由延误分析结果派生，写入外部告警库。
/// metadata 携带完整分析结果，用于审计与排障。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelayAlert {
    /// 告警ID
    pub alert_id: String,
    /// 订单ID
    pub order_id: String,
    /// 告警类型
    pub alert_type: String,
    /// 告警优先级
    pub priority: AlertPriority,
    /// 告警标题
    pub title: String,
    /// 告警正文（运单号 + 延误因子拼接）
    pub message: String,
    /// 元数据（完整 DelayAnalysis 的 JSON）
    pub metadata: serde_json::Value,
    /// 告警生成时间
    pub created_at: DateTime<Utc>,
}
