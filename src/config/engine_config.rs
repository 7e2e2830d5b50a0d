// ==========================================
// 跨境包裹追踪系统 - 引擎参数配置
// ==========================================
// 职责: 集中管理延误引擎的启发式参数
// 说明: 这些权重/阈值来自线上经验值,未经标定,
//       全部开放为配置项,禁止散落为内联字面量
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ==========================================
// EngineConfig - 引擎参数
// ==========================================

/// 延误引擎参数配置
///
/// 所有字段带默认值，配置文件可只覆写部分字段。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 物流停更告警阈值（工作日）
    #[serde(default = "default_stale_event_threshold_days")]
    pub stale_event_threshold_days: i64,

    /// 单票包裹全程的典型事件总数（事件速率外推用）
    #[serde(default = "default_expected_events_per_shipment")]
    pub expected_events_per_shipment: u32,

    /// 在途时长占 SLA 上限的告警比例
    #[serde(default = "default_sla_usage_warning_ratio")]
    pub sla_usage_warning_ratio: f64,

    /// 承运商按时率告警下限（%）
    #[serde(default = "default_on_time_rate_floor_pct")]
    pub on_time_rate_floor_pct: f64,

    /// 概率因子权重: 承运商上报问题状态
    #[serde(default = "default_status_factor_impact")]
    pub status_factor_impact: u8,

    /// 概率因子权重: 在途时长逼近/超出 SLA
    #[serde(default = "default_transit_factor_impact")]
    pub transit_factor_impact: u8,

    /// 概率因子权重: 承运商历史履约不佳
    #[serde(default = "default_history_factor_impact")]
    pub history_factor_impact: u8,

    /// 概率因子权重: 追踪数据停更
    #[serde(default = "default_stale_factor_impact")]
    pub stale_factor_impact: u8,

    /// 历史履约统计窗口（天）
    #[serde(default = "default_performance_window_days")]
    pub performance_window_days: i64,

    /// 批量扫描并发度（有界工作池）
    #[serde(default = "default_scan_concurrency")]
    pub scan_concurrency: usize,

    /// 异常/延误状态下的预测追加工作日数
    #[serde(default = "default_extra_days_on_exception")]
    pub extra_days_on_exception: i64,
}

fn default_stale_event_threshold_days() -> i64 {
    3
}

fn default_expected_events_per_shipment() -> u32 {
    8
}

fn default_sla_usage_warning_ratio() -> f64 {
    0.8
}

fn default_on_time_rate_floor_pct() -> f64 {
    70.0
}

fn default_status_factor_impact() -> u8 {
    80
}

fn default_transit_factor_impact() -> u8 {
    50
}

fn default_history_factor_impact() -> u8 {
    30
}

fn default_stale_factor_impact() -> u8 {
    60
}

fn default_performance_window_days() -> i64 {
    90
}

fn default_scan_concurrency() -> usize {
    4
}

fn default_extra_days_on_exception() -> i64 {
    5
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stale_event_threshold_days: default_stale_event_threshold_days(),
            expected_events_per_shipment: default_expected_events_per_shipment(),
            sla_usage_warning_ratio: default_sla_usage_warning_ratio(),
            on_time_rate_floor_pct: default_on_time_rate_floor_pct(),
            status_factor_impact: default_status_factor_impact(),
            transit_factor_impact: default_transit_factor_impact(),
            history_factor_impact: default_history_factor_impact(),
            stale_factor_impact: default_stale_factor_impact(),
            performance_window_days: default_performance_window_days(),
            scan_concurrency: default_scan_concurrency(),
            extra_days_on_exception: default_extra_days_on_exception(),
        }
    }
}

impl EngineConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// 加载默认路径配置，文件缺失时回退默认值
    pub fn load_or_default() -> Self {
        let path = get_default_config_path();
        if path.exists() {
            match Self::from_file(&path) {
                Ok(config) => {
                    tracing::info!("已加载引擎配置: {}", path.display());
                    return config;
                }
                Err(e) => {
                    tracing::warn!("引擎配置解析失败，回退默认值: {}", e);
                }
            }
        }
        Self::default()
    }
}

/// 获取默认配置文件路径
///
/// # 解析顺序
/// 1. 环境变量 SHIPMENT_TRACKING_CONFIG
/// 2. 系统配置目录下的应用目录
/// 3. 当前目录兜底
pub fn get_default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var("SHIPMENT_TRACKING_CONFIG") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        return config_dir
            .join("shipment-tracking")
            .join("engine_config.json");
    }

    PathBuf::from("engine_config.json")
}
