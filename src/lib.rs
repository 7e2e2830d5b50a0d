// ==========================================
// 跨境包裹追踪系统 - 核心库
// ==========================================
// 技术栈: Rust + Tokio + SQLite
// 系统定位: 延误检测与预测引擎 (决策支持, 人工最终控制权)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 引擎参数
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AlertPriority, DelaySeverity, OrderStatus};

// 领域实体
pub use domain::{
    CarrierPerformance, CarrierSla, DelayAlert, DelayAnalysis, DelayPrediction, DeliveryForecast,
    ProbabilityFactor, ShipmentOrder, TrackingCacheEntry, TrackingEvent,
};

// 引擎
pub use engine::{
    AlertEmitter, BatchScanner, CarrierPerformanceTracker, DelayAnalyzer,
    DelayProbabilityEstimator, DeliveryPredictor, ScanCancellation, SlaRegistry,
};

// 外部存储契约
pub use engine::{AlertStore, DelayRepositories, OrderStore, TrackingCacheStore};

// API
pub use api::{ApiError, ApiResult, DelayApi, ScanReport};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "跨境包裹追踪系统";

// ==========================================
// 预编译检查
// ==========================================
