// ==========================================
// 跨境包裹追踪系统 - 送达预测引擎
// ==========================================
// 职责: 按当前状态与事件速率预测送达日期与置信度
// 红线: 预测内部失败不外抛,回退保守的 SLA 基准预测
// ==========================================

use crate::config::EngineConfig;
use crate::domain::order::ShipmentOrder;
use crate::domain::sla::CarrierSla;
use crate::domain::tracking::TrackingCacheEntry;
use crate::domain::types::OrderStatus;
use crate::engine::calendar::{add_business_days, business_days_between};
use chrono::NaiveDate;

// ==========================================
// DeliveryPredictor - 送达预测引擎
// ==========================================
pub struct DeliveryPredictor {
    config: EngineConfig,
}

impl DeliveryPredictor {
    /// 创建新的送达预测引擎
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// 预测送达日期与置信度
    ///
    /// # 规则（顺序执行，命中即返回）
    /// 1) 派送中 → 今日送达, 置信度 95
    /// 2) 运输中且缓存事件 >= 2 → 按事件速率外推, 置信度 75
    /// 3) 延误/异常 → 创建日 + (SLA 上限 + 追加天数), 置信度 50
    /// 4) 其他 → 创建日 + SLA 上限, 置信度 70
    ///
    /// 任一分支计算失败时回退规则 4 的日期, 置信度降为 50。
    pub fn predict(
        &self,
        order: &ShipmentOrder,
        cache: Option<&TrackingCacheEntry>,
        sla: &CarrierSla,
        today: NaiveDate,
    ) -> (NaiveDate, u8) {
        let base_date = add_business_days(order.created_at.date_naive(), sla.max_days);

        match self.try_predict(order, cache, sla, today, base_date) {
            Some(result) => result,
            // 计算失败: 保守回退 SLA 基准,置信度降档
            None => (base_date, 50),
        }
    }

    /// 预测内部实现（失败返回 None，由 predict 统一兜底）
    fn try_predict(
        &self,
        order: &ShipmentOrder,
        cache: Option<&TrackingCacheEntry>,
        sla: &CarrierSla,
        today: NaiveDate,
        base_date: NaiveDate,
    ) -> Option<(NaiveDate, u8)> {
        match order.status {
            // 派送中: 当日送达
            OrderStatus::OutForDelivery => Some((today, 95)),

            // 运输中且事件充足: 事件速率外推
            OrderStatus::InTransit
                if cache.is_some_and(|c| c.events.len() >= 2) =>
            {
                let cache = cache?;
                self.predict_by_event_velocity(cache, today)
            }

            // 承运商已上报问题: SLA 上限追加缓冲
            OrderStatus::Delayed | OrderStatus::Exception => {
                let date = add_business_days(
                    order.created_at.date_naive(),
                    sla.max_days + self.config.extra_days_on_exception,
                );
                Some((date, 50))
            }

            // 其他状态: SLA 基准预测
            _ => Some((base_date, 70)),
        }
    }

    /// 按事件速率外推剩余天数
    ///
    /// # 算法
    /// - elapsed = 最早事件 → 最新事件 的工作日数（至少按 1 计）
    /// - eventsPerDay = 事件数 / elapsed
    /// - remaining = max(0, 典型事件总数 - 事件数)
    /// - daysRemaining = ceil(remaining / eventsPerDay)
    /// - 预测日期 = 今日 + daysRemaining 个工作日
    fn predict_by_event_velocity(
        &self,
        cache: &TrackingCacheEntry,
        today: NaiveDate,
    ) -> Option<(NaiveDate, u8)> {
        let first = cache.earliest_event()?;
        let last = cache.latest_event()?;

        let elapsed_days =
            business_days_between(first.occurred_at.date_naive(), last.occurred_at.date_naive())
                .max(1);

        let event_count = cache.events.len() as i64;
        let events_per_day = event_count as f64 / elapsed_days as f64;
        if events_per_day <= 0.0 {
            return None;
        }

        let remaining_events =
            (self.config.expected_events_per_shipment as i64 - event_count).max(0);
        let days_remaining = (remaining_events as f64 / events_per_day).ceil() as i64;

        Some((add_business_days(today, days_remaining), 75))
    }
}
