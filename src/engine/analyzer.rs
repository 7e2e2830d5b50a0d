// ==========================================
// 跨境包裹追踪系统 - 延误分析引擎
// ==========================================
// 职责: 核心编排引擎,综合工作日历/SLA/历史履约产出延误分析
// 输入: 订单ID + 运单号 + 承运商 (订单与缓存查询委托外部存储)
// 输出: DelayAnalysis (含延误判定、等级、因子、送达预测)
// 红线: 订单缺失或 SLA 未配置返回 Ok(None),不抛异常;
//       所有判定必须输出可读因子
// ==========================================

use crate::config::EngineConfig;
use crate::domain::analysis::DelayAnalysis;
use crate::domain::tracking::TrackingCacheEntry;
use crate::domain::types::DelaySeverity;
use crate::engine::calendar::{add_business_days, business_days_between};
use crate::engine::performance::CarrierPerformanceTracker;
use crate::engine::predictor::DeliveryPredictor;
use crate::engine::sla_registry::SlaRegistry;
use crate::engine::stores::{OrderStore, TrackingCacheStore};
use crate::repository::error::RepositoryResult;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tracing::instrument;

// ==========================================
// 辅助函数
// ==========================================

/// 运单追踪停更工作日数
///
/// 返回最近一条物流事件距今日的工作日数；缓存缺失或无事件返回 None。
/// 延误分析与延误概率两个引擎共用此判定，避免靠匹配因子文案联动。
pub fn tracking_idle_business_days(
    cache: Option<&TrackingCacheEntry>,
    today: NaiveDate,
) -> Option<i64> {
    let latest = cache?.latest_event()?;
    Some(business_days_between(latest.occurred_at.date_naive(), today))
}

// ==========================================
// DelayAnalyzer - 延误分析引擎
// ==========================================
pub struct DelayAnalyzer {
    order_store: Arc<dyn OrderStore>,
    tracking_store: Arc<dyn TrackingCacheStore>,
    sla_registry: Arc<SlaRegistry>,
    performance_tracker: CarrierPerformanceTracker,
    predictor: DeliveryPredictor,
    config: EngineConfig,
}

impl DelayAnalyzer {
    /// 创建新的延误分析引擎
    ///
    /// # 参数
    /// - order_store: 订单库（只读）
    /// - tracking_store: 运单追踪缓存（只读）
    /// - sla_registry: SLA 注册表
    /// - config: 引擎参数
    pub fn new(
        order_store: Arc<dyn OrderStore>,
        tracking_store: Arc<dyn TrackingCacheStore>,
        sla_registry: Arc<SlaRegistry>,
        config: EngineConfig,
    ) -> Self {
        let performance_tracker =
            CarrierPerformanceTracker::new(Arc::clone(&order_store), Arc::clone(&sla_registry));
        let predictor = DeliveryPredictor::new(config.clone());
        Self {
            order_store,
            tracking_store,
            sla_registry,
            performance_tracker,
            predictor,
            config,
        }
    }

    /// 分析单个订单的延误情况
    ///
    /// # 返回
    /// - Ok(Some(DelayAnalysis)): 分析完成
    /// - Ok(None): 订单不存在或承运商未配置 SLA（无法继续分析）
    /// - Err: 外部存储故障
    ///
    /// # 说明
    /// 纯计算,无副作用;结果的持久化/缓存由调用方负责。
    #[instrument(skip(self, now), fields(order_id = order_id, carrier = carrier))]
    pub async fn analyze(
        &self,
        order_id: &str,
        tracking_code: &str,
        carrier: &str,
        now: DateTime<Utc>,
    ) -> RepositoryResult<Option<DelayAnalysis>> {
        // 1. 解析订单,缺失直接返回 None
        let order = match self.order_store.get_order(order_id).await? {
            Some(order) => order,
            None => {
                tracing::debug!("订单不存在: {}", order_id);
                return Ok(None);
            }
        };

        // 2. 解析追踪缓存(可缺失,缺失时相关字段降级)
        let cache = self.tracking_store.get_cache(tracking_code).await?;

        // 3. 在途工作日数
        let today = now.date_naive();
        let created = order.created_at.date_naive();
        let days_in_transit = business_days_between(created, today);

        // 4. 解析 SLA,未配置无法继续分析
        let sla = match self
            .sla_registry
            .lookup(carrier, order.service_type.as_deref())
        {
            Some(sla) => sla.clone(),
            None => {
                tracing::debug!("承运商未配置 SLA: {}", carrier);
                return Ok(None);
            }
        };

        // 5. 应达日期 = 创建日 + SLA 上限
        let expected_delivery = add_business_days(created, sla.max_days);

        // 6. 预计送达日期: 缓存值,缺失回退应达日期
        let estimated_delivery = cache
            .as_ref()
            .and_then(|c| c.estimated_delivery)
            .unwrap_or(expected_delivery);

        // 7. 延误判定与延误工作日数
        let is_delayed = today > expected_delivery;
        let delay_days = if is_delayed {
            business_days_between(expected_delivery, today)
        } else {
            0
        };

        // 8. 延误等级(唯一输入是 delay_days)
        let delay_severity = DelaySeverity::from_delay_days(delay_days);

        // 9. 延误因子收集(仅条件命中时追加,顺序即展示顺序)
        let factors = self
            .collect_factors(&order, cache.as_ref(), carrier, today, now)
            .await;

        // 10. 送达预测与置信度
        let (predicted_delivery, confidence) =
            self.predictor.predict(&order, cache.as_ref(), &sla, today);

        Ok(Some(DelayAnalysis {
            tracking_code: tracking_code.to_string(),
            order_id: order.order_id.clone(),
            carrier: carrier.to_string(),
            status: order.status,
            business_days_in_transit: days_in_transit,
            expected_delivery,
            estimated_delivery,
            is_delayed,
            delay_severity,
            delay_days,
            predicted_delivery,
            confidence,
            factors,
        }))
    }

    /// 收集延误因子
    ///
    /// # 因子（顺序即展示顺序）
    /// 1) 承运商上报异常/延误状态
    /// 2) 物流事件停更超过阈值
    /// 3) 承运商历史平均超期 > 0
    ///
    /// 履约统计查询失败按"因子缺席"降级,不中断整单分析。
    async fn collect_factors(
        &self,
        order: &crate::domain::order::ShipmentOrder,
        cache: Option<&TrackingCacheEntry>,
        carrier: &str,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Vec<String> {
        let mut factors = Vec::new();

        if order.status.is_problem() {
            factors.push("承运商上报异常/延误状态".to_string());
        }

        if let Some(idle_days) = tracking_idle_business_days(cache, today) {
            if idle_days > self.config.stale_event_threshold_days {
                factors.push(format!("包裹已连续 {} 个工作日无物流更新", idle_days));
            }
        }

        let performance = match self
            .performance_tracker
            .get_performance(carrier, now, self.config.performance_window_days)
            .await
        {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("历史履约统计失败,跳过该因子: {}", e);
                None
            }
        };
        if let Some(perf) = performance {
            if perf.avg_delay_days > 0.0 {
                factors.push(format!(
                    "承运商历史平均超期 {:.1} 个工作日",
                    perf.avg_delay_days
                ));
            }
        }

        factors
    }

    /// 历史履约统计引擎（供概率评估等独立调用方复用）
    pub fn performance_tracker(&self) -> &CarrierPerformanceTracker {
        &self.performance_tracker
    }
}
