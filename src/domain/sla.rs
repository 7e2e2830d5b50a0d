// ==========================================
// 跨境包裹追踪系统 - 承运商 SLA 实体
// ==========================================
// 职责: 定义承运商时效承诺（工作日区间）
// 红线: SLA 查不到必须显式返回未配置,禁止静默按 0 天兜底
// ==========================================

use serde::{Deserialize, Serialize};

/// 承运商 SLA（时效承诺）
///
/// 不可变配置数据，由 SlaRegistry 在构造时注入，
/// 支持部署级覆写（新承运商/自定义时效窗口）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarrierSla {
    /// 承运商代码
    pub carrier: String,
    /// 服务类型（如 PAC / SEDEX），None 表示承运商级兜底条目
    #[serde(default)]
    pub service_type: Option<String>,
    /// 最短运输工作日
    pub min_days: i64,
    /// 最长运输工作日（超过即判定延误）
    pub max_days: i64,
    /// 适用区域，默认 ["all"]
    #[serde(default = "default_regions")]
    pub regions: Vec<String>,
}

fn default_regions() -> Vec<String> {
    vec!["all".to_string()]
}

impl CarrierSla {
    /// 构造承运商级条目（不限定服务类型）
    pub fn carrier_level(carrier: &str, min_days: i64, max_days: i64) -> Self {
        Self {
            carrier: carrier.to_string(),
            service_type: None,
            min_days,
            max_days,
            regions: default_regions(),
        }
    }

    /// 构造服务级条目
    pub fn service_level(carrier: &str, service_type: &str, min_days: i64, max_days: i64) -> Self {
        Self {
            carrier: carrier.to_string(),
            service_type: Some(service_type.to_string()),
            min_days,
            max_days,
            regions: default_regions(),
        }
    }
}
