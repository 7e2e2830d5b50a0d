// ==========================================
// 跨境包裹追踪系统 - 历史履约统计引擎
// ==========================================
// 职责: 统计承运商近 N 天已签收订单的平均超期与按时率
// 输入: 订单库 (已签收订单) + SLA 注册表
// 输出: CarrierPerformance 快照 (每次请求重算,不缓存)
// ==========================================

use crate::domain::analysis::CarrierPerformance;
use crate::engine::calendar::business_days_between;
use crate::engine::sla_registry::SlaRegistry;
use crate::engine::stores::OrderStore;
use crate::repository::error::RepositoryResult;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::instrument;

// ==========================================
// CarrierPerformanceTracker - 历史履约统计引擎
// ==========================================
pub struct CarrierPerformanceTracker {
    order_store: Arc<dyn OrderStore>,
    sla_registry: Arc<SlaRegistry>,
}

impl CarrierPerformanceTracker {
    /// 创建新的历史履约统计引擎
    pub fn new(order_store: Arc<dyn OrderStore>, sla_registry: Arc<SlaRegistry>) -> Self {
        Self {
            order_store,
            sla_registry,
        }
    }

    /// 统计承运商历史履约
    ///
    /// # 算法
    /// 1. 取承运商在 [now - window_days, now] 内已签收的订单
    /// 2. 每单 actual = businessDaysBetween(created_at, delivered_at)
    /// 3. 超期 overage = max(0, actual - sla.max_days) 累加
    /// 4. actual <= sla.max_days 计入按时单数
    /// 5. 平均超期 = 超期总和 / 单数; 按时率 = 按时单数 / 单数 × 100
    ///
    /// # 返回
    /// - Ok(Some): 履约快照
    /// - Ok(None): 承运商未配置 SLA 或窗口内无合格订单
    /// - Err: 订单库故障
    #[instrument(skip(self), fields(carrier = carrier))]
    pub async fn get_performance(
        &self,
        carrier: &str,
        now: DateTime<Utc>,
        window_days: i64,
    ) -> RepositoryResult<Option<CarrierPerformance>> {
        // SLA 未配置时无比较基准,显式返回 None
        let sla_max_days = match self.sla_registry.lookup(carrier, None) {
            Some(sla) => sla.max_days,
            None => {
                tracing::debug!("承运商未配置 SLA, 跳过履约统计: {}", carrier);
                return Ok(None);
            }
        };

        let since = now - Duration::days(window_days);
        let delivered = self.order_store.list_delivered_since(carrier, since).await?;

        let mut total_overage: i64 = 0;
        let mut on_time_count: usize = 0;
        let mut sample_count: usize = 0;

        for order in &delivered {
            let delivered_at = match order.delivered_at {
                Some(ts) => ts,
                None => continue, // 数据质量: 已签收但无签收时间,不计入样本
            };

            let actual_days =
                business_days_between(order.created_at.date_naive(), delivered_at.date_naive());

            total_overage += (actual_days - sla_max_days).max(0);
            if actual_days <= sla_max_days {
                on_time_count += 1;
            }
            sample_count += 1;
        }

        if sample_count == 0 {
            return Ok(None);
        }

        let snapshot = CarrierPerformance {
            carrier: carrier.to_string(),
            avg_delay_days: total_overage as f64 / sample_count as f64,
            on_time_rate_pct: on_time_count as f64 / sample_count as f64 * 100.0,
            sample_count,
            window_days,
        };

        tracing::debug!(
            carrier = carrier,
            samples = sample_count,
            avg_delay = snapshot.avg_delay_days,
            on_time_rate = snapshot.on_time_rate_pct,
            "历史履约统计完成"
        );

        Ok(Some(snapshot))
    }
}
