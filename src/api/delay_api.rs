// ==========================================
// 跨境包裹追踪系统 - 延误引擎 API
// ==========================================
// 职责: 封装延误分析/送达预测/概率评估/批量扫描,
//       供上层(HTTP 包装层、命令行、UI 命令)调用
// 架构: API 层 → 引擎层 → 外部存储契约
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::config::EngineConfig;
use crate::domain::analysis::{DelayAnalysis, DelayPrediction, DeliveryForecast};
use crate::engine::alert_emitter::AlertEmitter;
use crate::engine::analyzer::DelayAnalyzer;
use crate::engine::probability::DelayProbabilityEstimator;
use crate::engine::scanner::{BatchScanner, ScanCancellation};
use crate::engine::sla_registry::SlaRegistry;
use crate::engine::stores::DelayRepositories;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ScanReport - 扫描汇总
// ==========================================

/// 批量扫描汇总结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// 延误订单的分析结果
    pub delayed_orders: Vec<DelayAnalysis>,
    /// 成功写入的告警条数
    pub alerts_emitted: usize,
}

// ==========================================
// DelayApi - 延误引擎 API
// ==========================================

/// 延误引擎API
///
/// 无共享可变状态；同一实例可被并发调用。
/// 所有依赖构造注入，便于测试替身。
pub struct DelayApi {
    repos: DelayRepositories,
    sla_registry: Arc<SlaRegistry>,
    analyzer: Arc<DelayAnalyzer>,
    estimator: DelayProbabilityEstimator,
    scanner: BatchScanner,
    emitter: AlertEmitter,
    config: EngineConfig,
}

impl DelayApi {
    /// 创建新的DelayApi实例
    ///
    /// # 参数
    /// - repos: 外部存储集合（订单库/追踪缓存/告警库）
    /// - sla_registry: SLA 注册表
    /// - config: 引擎参数
    pub fn new(
        repos: DelayRepositories,
        sla_registry: Arc<SlaRegistry>,
        config: EngineConfig,
    ) -> Self {
        let analyzer = Arc::new(DelayAnalyzer::new(
            Arc::clone(&repos.order_store),
            Arc::clone(&repos.tracking_store),
            Arc::clone(&sla_registry),
            config.clone(),
        ));
        let estimator = DelayProbabilityEstimator::new(config.clone());
        let scanner = BatchScanner::new(
            Arc::clone(&repos.order_store),
            Arc::clone(&analyzer),
            config.scan_concurrency,
        );
        let emitter = AlertEmitter::new(Arc::clone(&repos.alert_store));

        Self {
            repos,
            sla_registry,
            analyzer,
            estimator,
            scanner,
            emitter,
            config,
        }
    }

    /// 分析单个订单的延误情况
    ///
    /// # 返回
    /// - Ok(DelayAnalysis): 分析完成
    /// - Err(ApiError::NotFound): 订单不存在或承运商未配置 SLA
    pub async fn analyze_delay(
        &self,
        order_id: &str,
        tracking_code: &str,
        carrier: &str,
        now: DateTime<Utc>,
    ) -> ApiResult<DelayAnalysis> {
        validate_non_empty("order_id", order_id)?;
        validate_non_empty("tracking_code", tracking_code)?;
        validate_non_empty("carrier", carrier)?;

        match self
            .analyzer
            .analyze(order_id, tracking_code, carrier, now)
            .await?
        {
            Some(analysis) => Ok(analysis),
            None => Err(ApiError::NotFound(format!(
                "订单不存在或承运商未配置 SLA: order_id={}, carrier={}",
                order_id, carrier
            ))),
        }
    }

    /// 独立调用送达预测（UI "预测此订单" 动作）
    pub async fn predict_delivery(
        &self,
        order_id: &str,
        tracking_code: &str,
        now: DateTime<Utc>,
    ) -> ApiResult<DeliveryForecast> {
        validate_non_empty("order_id", order_id)?;
        validate_non_empty("tracking_code", tracking_code)?;

        let (order, cache, sla) = self.resolve_order_context(order_id, tracking_code).await?;

        let (predicted_delivery, confidence) = crate::engine::predictor::DeliveryPredictor::new(
            self.config.clone(),
        )
        .predict(&order, cache.as_ref(), &sla, now.date_naive());

        Ok(DeliveryForecast {
            predicted_delivery,
            confidence,
        })
    }

    /// 独立调用延误概率评估
    pub async fn estimate_delay_probability(
        &self,
        order_id: &str,
        tracking_code: &str,
        now: DateTime<Utc>,
    ) -> ApiResult<DelayPrediction> {
        validate_non_empty("order_id", order_id)?;
        validate_non_empty("tracking_code", tracking_code)?;

        let (order, cache, sla) = self.resolve_order_context(order_id, tracking_code).await?;

        // 履约统计失败按"因子缺席"降级
        let performance = match self
            .analyzer
            .performance_tracker()
            .get_performance(&order.carrier, now, self.config.performance_window_days)
            .await
        {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("历史履约统计失败,概率评估降级: {}", e);
                None
            }
        };

        Ok(self
            .estimator
            .estimate(&order, cache.as_ref(), &sla, performance.as_ref(), now))
    }

    /// 扫描全部活跃订单,返回延误订单的分析结果
    pub async fn scan_all_orders(
        &self,
        now: DateTime<Utc>,
        cancellation: &ScanCancellation,
    ) -> ApiResult<Vec<DelayAnalysis>> {
        Ok(self.scanner.scan_all_orders(now, cancellation).await?)
    }

    /// 扫描并对延误订单发射告警
    pub async fn scan_and_alert(
        &self,
        now: DateTime<Utc>,
        cancellation: &ScanCancellation,
    ) -> ApiResult<ScanReport> {
        let delayed_orders = self.scanner.scan_all_orders(now, cancellation).await?;
        let alerts_emitted = self.emitter.emit_all(&delayed_orders, now).await;

        Ok(ScanReport {
            delayed_orders,
            alerts_emitted,
        })
    }

    /// 解析订单上下文（订单 + 缓存 + SLA），供独立预测/评估入口复用
    async fn resolve_order_context(
        &self,
        order_id: &str,
        tracking_code: &str,
    ) -> ApiResult<(
        crate::domain::ShipmentOrder,
        Option<crate::domain::TrackingCacheEntry>,
        crate::domain::CarrierSla,
    )> {
        let order = self
            .repos
            .order_store
            .get_order(order_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("订单不存在: {}", order_id)))?;

        let cache = self.repos.tracking_store.get_cache(tracking_code).await?;

        let sla = self
            .sla_registry
            .lookup(&order.carrier, order.service_type.as_deref())
            .cloned()
            .ok_or_else(|| {
                ApiError::NotFound(format!("承运商未配置 SLA: {}", order.carrier))
            })?;

        Ok((order, cache, sla))
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// 校验非空输入
fn validate_non_empty(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidInput(format!("{} 不能为空", field)));
    }
    Ok(())
}
