// ==========================================
// 跨境包裹追踪系统 - 配置层
// ==========================================
// 职责: 引擎参数配置管理,支持文件覆写
// 说明: SLA 表的注入式配置见 engine::sla_registry
// ==========================================

pub mod engine_config;

// 重导出核心配置
pub use engine_config::{get_default_config_path, EngineConfig};
