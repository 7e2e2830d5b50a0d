// ==========================================
// 跨境包裹追踪系统 - 延误告警发射器
// ==========================================
// 职责: 将延误分析结果映射为带优先级的告警记录并落库
// 语义: 尽力而为(fire-and-forget),写入失败记日志不重试
// ==========================================

use crate::domain::analysis::{DelayAlert, DelayAnalysis};
use crate::domain::types::AlertPriority;
use crate::engine::stores::AlertStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// 告警类型标识
pub const ALERT_TYPE_DELAY: &str = "DELAY_DETECTED";

// ==========================================
// AlertEmitter - 延误告警发射器
// ==========================================
pub struct AlertEmitter {
    alert_store: Arc<dyn AlertStore>,
}

impl AlertEmitter {
    /// 创建新的告警发射器
    pub fn new(alert_store: Arc<dyn AlertStore>) -> Self {
        Self { alert_store }
    }

    /// 由延误分析结果构造告警记录
    ///
    /// # 映射规则
    /// - 优先级: Urgent 等级 → URGENT; Critical → HIGH; 其余 → NORMAL
    /// - 标题: 携带延误工作日数
    /// - 正文: 运单号 + 延误因子拼接
    /// - metadata: 完整分析结果 JSON（审计/排障用）
    pub fn build_alert(analysis: &DelayAnalysis, now: DateTime<Utc>) -> DelayAlert {
        let priority = AlertPriority::from(analysis.delay_severity);

        let message = if analysis.factors.is_empty() {
            format!("运单 {} 已超过应达日期", analysis.tracking_code)
        } else {
            format!(
                "运单 {} 已超过应达日期: {}",
                analysis.tracking_code,
                analysis.factors.join("; ")
            )
        };

        DelayAlert {
            alert_id: Uuid::new_v4().to_string(),
            order_id: analysis.order_id.clone(),
            alert_type: ALERT_TYPE_DELAY.to_string(),
            priority,
            title: format!("订单延误 - {} 个工作日", analysis.delay_days),
            message,
            metadata: serde_json::to_value(analysis).unwrap_or(serde_json::Value::Null),
            created_at: now,
        }
    }

    /// 发射单条延误告警
    ///
    /// # 返回
    /// - true: 写入成功
    /// - false: 写入失败（已记日志，不重试不外抛）
    pub async fn emit(&self, analysis: &DelayAnalysis, now: DateTime<Utc>) -> bool {
        let alert = Self::build_alert(analysis, now);

        match self.alert_store.insert_alert(alert).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    order_id = %analysis.order_id,
                    "延误告警写入失败(不重试): {}", e
                );
                false
            }
        }
    }

    /// 批量发射告警,返回成功写入条数
    pub async fn emit_all(&self, analyses: &[DelayAnalysis], now: DateTime<Utc>) -> usize {
        let mut emitted = 0;
        for analysis in analyses {
            if self.emit(analysis, now).await {
                emitted += 1;
            }
        }
        emitted
    }
}
