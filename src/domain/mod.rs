// ==========================================
// 跨境包裹追踪系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod analysis;
pub mod order;
pub mod sla;
pub mod tracking;
pub mod types;

// 重导出核心类型
pub use analysis::{
    CarrierPerformance, DelayAlert, DelayAnalysis, DelayPrediction, DeliveryForecast,
    ProbabilityFactor,
};
pub use order::ShipmentOrder;
pub use sla::CarrierSla;
pub use tracking::{TrackingCacheEntry, TrackingEvent};
pub use types::{AlertPriority, DelaySeverity, OrderStatus};
