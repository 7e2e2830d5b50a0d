// ==========================================
// 跨境包裹追踪系统 - 延误概率评估引擎
// ==========================================
// 职责: 对在途订单评估最终延误的概率与预估超期天数
// 说明: 独立于延误分析/送达预测的多因子启发式,
//       概率 = 命中因子权重的均值 (截断到 100)
// ==========================================

use crate::config::EngineConfig;
use crate::domain::analysis::{DelayPrediction, ProbabilityFactor};
use crate::domain::order::ShipmentOrder;
use crate::domain::sla::CarrierSla;
use crate::domain::tracking::TrackingCacheEntry;
use crate::domain::CarrierPerformance;
use crate::engine::analyzer::tracking_idle_business_days;
use crate::engine::calendar::business_days_between;
use chrono::{DateTime, Utc};

// ==========================================
// DelayProbabilityEstimator - 延误概率评估引擎
// ==========================================
pub struct DelayProbabilityEstimator {
    config: EngineConfig,
}

impl DelayProbabilityEstimator {
    /// 创建新的延误概率评估引擎
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// 评估在途订单的延误概率
    ///
    /// # 因子（命中才计入，顺序即展示顺序）
    /// 1) 承运商上报延误/异常状态 → status_factor_impact
    /// 2) 在途工作日 > 比例阈值 × SLA 上限 → transit_factor_impact
    /// 3) 承运商历史按时率低于下限 → history_factor_impact
    /// 4) 追踪数据停更超过阈值 → stale_factor_impact
    ///
    /// # 聚合
    /// - probability = min(100, 命中权重之和 / 命中因子数)
    /// - estimatedDelayDays = probability > 50 ? ceil((probability-50)/10) : 0
    /// - willBeDelayed = probability > 50
    /// - 无因子命中时 probability = 0
    pub fn estimate(
        &self,
        order: &ShipmentOrder,
        cache: Option<&TrackingCacheEntry>,
        sla: &CarrierSla,
        performance: Option<&CarrierPerformance>,
        now: DateTime<Utc>,
    ) -> DelayPrediction {
        let today = now.date_naive();
        let mut factors: Vec<ProbabilityFactor> = Vec::new();

        // 因子1: 承运商已上报问题状态
        if order.status.is_problem() {
            factors.push(ProbabilityFactor {
                factor: "CARRIER_REPORTED_STATUS".to_string(),
                impact: self.config.status_factor_impact,
                description: "承运商已上报延误/异常状态".to_string(),
            });
        }

        // 因子2: 在途时长逼近/超出 SLA 上限
        let days_in_transit = business_days_between(order.created_at.date_naive(), today);
        let transit_threshold = self.config.sla_usage_warning_ratio * sla.max_days as f64;
        if days_in_transit as f64 > transit_threshold {
            factors.push(ProbabilityFactor {
                factor: "TRANSIT_TIME_NEAR_SLA".to_string(),
                impact: self.config.transit_factor_impact,
                description: format!(
                    "在途 {} 个工作日,已逼近/超出 SLA 上限 {} 个工作日",
                    days_in_transit, sla.max_days
                ),
            });
        }

        // 因子3: 承运商历史履约不佳
        if let Some(perf) = performance {
            if perf.on_time_rate_pct < self.config.on_time_rate_floor_pct {
                factors.push(ProbabilityFactor {
                    factor: "CARRIER_POOR_HISTORY".to_string(),
                    impact: self.config.history_factor_impact,
                    description: format!(
                        "承运商历史按时率仅 {:.1}%",
                        perf.on_time_rate_pct
                    ),
                });
            }
        }

        // 因子4: 追踪数据停更(与延误分析共用同一判定)
        if let Some(idle_days) = tracking_idle_business_days(cache, today) {
            if idle_days > self.config.stale_event_threshold_days {
                factors.push(ProbabilityFactor {
                    factor: "STALE_TRACKING_DATA".to_string(),
                    impact: self.config.stale_factor_impact,
                    description: format!("追踪数据已 {} 个工作日未更新", idle_days),
                });
            }
        }

        // 聚合: 命中权重的均值,截断到 100
        let probability = if factors.is_empty() {
            0.0
        } else {
            let sum: f64 = factors.iter().map(|f| f.impact as f64).sum();
            (sum / factors.len() as f64).min(100.0)
        };

        let estimated_delay_days = if probability > 50.0 {
            ((probability - 50.0) / 10.0).ceil() as i64
        } else {
            0
        };

        DelayPrediction {
            will_be_delayed: probability > 50.0,
            probability,
            estimated_delay_days,
            factors,
        }
    }
}
