// ==========================================
// 跨境包裹追踪系统 - 批量延误扫描引擎
// ==========================================
// 职责: 遍历全部活跃订单,逐单延误分析,汇集延误子集
// 并发: 有界工作池 (buffer_unordered),并发度可配置;
//       真正的限流约束在外部存储自身的速率限制
// 红线: 单个订单分析失败只记录并跳过,不得中断整批扫描
// ==========================================

use crate::domain::analysis::DelayAnalysis;
use crate::engine::analyzer::DelayAnalyzer;
use crate::engine::stores::OrderStore;
use crate::repository::error::RepositoryResult;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::instrument;

// ==========================================
// ScanCancellation - 扫描取消信号
// ==========================================

/// 扫描取消信号
///
/// 协作式取消：扫描在每个订单分发前检查信号，
/// 已在途的分析会正常完成。
#[derive(Clone, Default)]
pub struct ScanCancellation {
    cancelled: Arc<AtomicBool>,
}

impl ScanCancellation {
    /// 创建新的取消信号
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求取消
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// 是否已请求取消
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

// ==========================================
// BatchScanner - 批量延误扫描引擎
// ==========================================
pub struct BatchScanner {
    order_store: Arc<dyn OrderStore>,
    analyzer: Arc<DelayAnalyzer>,
    concurrency: usize,
}

impl BatchScanner {
    /// 创建新的批量扫描引擎
    ///
    /// # 参数
    /// - order_store: 订单库
    /// - analyzer: 延误分析引擎
    /// - concurrency: 工作池并发度（至少按 1 计）
    pub fn new(
        order_store: Arc<dyn OrderStore>,
        analyzer: Arc<DelayAnalyzer>,
        concurrency: usize,
    ) -> Self {
        Self {
            order_store,
            analyzer,
            concurrency: concurrency.max(1),
        }
    }

    /// 扫描全部活跃订单,返回延误订单的分析结果
    ///
    /// # 返回
    /// - Ok(Vec): is_delayed = true 的分析结果集合
    /// - Err: 仅当活跃订单列表本身查询失败
    ///
    /// # 失败隔离
    /// 单个订单的分析失败(存储故障等)记 warn 日志后跳过,
    /// 一单异常不得导致整批失败。
    #[instrument(skip(self, now, cancellation))]
    pub async fn scan_all_orders(
        &self,
        now: DateTime<Utc>,
        cancellation: &ScanCancellation,
    ) -> RepositoryResult<Vec<DelayAnalysis>> {
        let orders = self.order_store.list_active_orders().await?;
        let total = orders.len();
        tracing::info!("开始延误扫描, 活跃订单数: {}", total);

        let delayed: Vec<DelayAnalysis> = stream::iter(orders)
            // 取消信号在每单分发前检查
            .take_while(|_| {
                let keep_going = !cancellation.is_cancelled();
                async move { keep_going }
            })
            .map(|order| {
                let analyzer = Arc::clone(&self.analyzer);
                async move {
                    let tracking_code = match order.tracking_code.as_deref() {
                        Some(code) => code,
                        None => return None, // 无运单号不参与扫描
                    };

                    match analyzer
                        .analyze(&order.order_id, tracking_code, &order.carrier, now)
                        .await
                    {
                        Ok(Some(analysis)) if analysis.is_delayed => Some(analysis),
                        Ok(_) => None,
                        Err(e) => {
                            tracing::warn!(
                                order_id = %order.order_id,
                                "订单延误分析失败,跳过: {}", e
                            );
                            None
                        }
                    }
                }
            })
            .buffer_unordered(self.concurrency)
            .filter_map(|result| async move { result })
            .collect()
            .await;

        if cancellation.is_cancelled() {
            tracing::info!("延误扫描被调用方取消, 已完成部分: {}", delayed.len());
        } else {
            tracing::info!("延误扫描完成, 延误订单数: {}/{}", delayed.len(), total);
        }

        Ok(delayed)
    }
}
