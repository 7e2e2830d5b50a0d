// ==========================================
// 跨境包裹追踪系统 - 承运商 SLA 注册表
// ==========================================
// 职责: 承运商/服务类型 → 时效承诺的查询
// 红线: 查询表在构造时注入,不得硬编码在调用方;
//       查不到必须显式返回 None,禁止按 0 天 SLA 兜底
// ==========================================

use crate::domain::sla::CarrierSla;
use crate::repository::error::{RepositoryError, RepositoryResult};
use std::path::Path;

// ==========================================
// SlaRegistry - SLA 注册表
// ==========================================

/// 承运商 SLA 注册表
///
/// 条目顺序即优先级：覆写条目置于内置默认之前，
/// 查询时先精确匹配（承运商+服务类型），再回退承运商级条目。
pub struct SlaRegistry {
    entries: Vec<CarrierSla>,
}

impl SlaRegistry {
    /// 以注入的条目表构造注册表
    pub fn new(entries: Vec<CarrierSla>) -> Self {
        Self { entries }
    }

    /// 以内置默认条目构造注册表
    ///
    /// # 默认时效（工作日）
    /// - correios/PAC 7-15, correios/SEDEX 1-3
    /// - jadlog/Package 2-7, jadlog/Express 1-2
    /// - melhorenvio/Standard 3-10
    pub fn with_defaults() -> Self {
        Self::new(Self::default_entries())
    }

    /// 内置默认条目
    pub fn default_entries() -> Vec<CarrierSla> {
        vec![
            CarrierSla::service_level("correios", "PAC", 7, 15),
            CarrierSla::service_level("correios", "SEDEX", 1, 3),
            CarrierSla::service_level("jadlog", "Package", 2, 7),
            CarrierSla::service_level("jadlog", "Express", 1, 2),
            CarrierSla::service_level("melhorenvio", "Standard", 3, 10),
        ]
    }

    /// 在内置默认之上叠加部署级覆写（覆写优先）
    pub fn with_overrides(overrides: Vec<CarrierSla>) -> Self {
        let mut entries = overrides;
        entries.extend(Self::default_entries());
        Self::new(entries)
    }

    /// 从 JSON 文件加载覆写条目并叠加内置默认
    ///
    /// # 文件格式
    /// CarrierSla 的 JSON 数组（service_type/regions 可省略）
    pub fn from_override_file(path: &Path) -> RepositoryResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| RepositoryError::ConfigError(format!("读取 SLA 覆写文件失败: {}", e)))?;
        let overrides: Vec<CarrierSla> = serde_json::from_str(&raw)
            .map_err(|e| RepositoryError::ConfigError(format!("解析 SLA 覆写文件失败: {}", e)))?;
        Ok(Self::with_overrides(overrides))
    }

    /// 查询承运商 SLA
    ///
    /// # 规则（顺序执行，命中即返回）
    /// 1) 承运商 + 服务类型 精确匹配
    /// 2) 该承运商的承运商级条目（service_type 为 None）
    /// 3) 该承运商的任意条目（历史数据可能只配了服务级）
    /// 4) None（承运商完全未配置）
    ///
    /// 承运商与服务类型比较均忽略大小写。
    pub fn lookup(&self, carrier: &str, service_type: Option<&str>) -> Option<&CarrierSla> {
        if let Some(service) = service_type {
            let exact = self.entries.iter().find(|e| {
                e.carrier.eq_ignore_ascii_case(carrier)
                    && e.service_type
                        .as_deref()
                        .is_some_and(|s| s.eq_ignore_ascii_case(service))
            });
            if exact.is_some() {
                return exact;
            }
        }

        self.entries
            .iter()
            .find(|e| e.carrier.eq_ignore_ascii_case(carrier) && e.service_type.is_none())
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|e| e.carrier.eq_ignore_ascii_case(carrier))
            })
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空表
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
