// ==========================================
// 跨境包裹追踪系统 - 引擎层
// ==========================================
// 职责: 实现延误检测与预测的业务规则引擎
// 红线: Engine 不拼 SQL, 所有判定必须输出可读因子;
//       给定输入必须产出确定性结果(禁止随机兜底)
// ==========================================

pub mod alert_emitter;
pub mod analyzer;
pub mod calendar;
pub mod performance;
pub mod predictor;
pub mod probability;
pub mod scanner;
pub mod sla_registry;
pub mod stores;

// 重导出核心引擎
pub use alert_emitter::{AlertEmitter, ALERT_TYPE_DELAY};
pub use analyzer::DelayAnalyzer;
pub use calendar::{add_business_days, business_days_between, is_business_day};
pub use performance::CarrierPerformanceTracker;
pub use predictor::DeliveryPredictor;
pub use probability::DelayProbabilityEstimator;
pub use scanner::{BatchScanner, ScanCancellation};
pub use sla_registry::SlaRegistry;
pub use stores::{AlertStore, DelayRepositories, OrderStore, TrackingCacheStore};
