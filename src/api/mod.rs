// ==========================================
// 跨境包裹追踪系统 - API层
// ==========================================
// 职责: 对上层暴露稳定调用面,做输入校验与错误翻译
// 红线: API 层不写业务规则,规则全部下沉到引擎层
// ==========================================

pub mod delay_api;
pub mod error;

pub use delay_api::{DelayApi, ScanReport};
pub use error::{ApiError, ApiResult};
