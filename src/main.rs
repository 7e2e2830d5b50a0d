// ==========================================
// 跨境包裹追踪系统 - 延误扫描主入口
// ==========================================
// 用途: 定时任务/人工触发的批量延误扫描
// 流程: 初始化日志与数据库 → 装配引擎 → 扫描并发射告警
// ==========================================

use std::sync::{Arc, Mutex};

use shipment_tracking::config::EngineConfig;
use shipment_tracking::db::{get_default_db_path, open_sqlite_connection};
use shipment_tracking::engine::sla_registry::SlaRegistry;
use shipment_tracking::engine::stores::DelayRepositories;
use shipment_tracking::repository::{
    init_schema, SqliteAlertRepository, SqliteOrderRepository, SqliteTrackingCacheRepository,
};
use shipment_tracking::{DelayApi, ScanCancellation};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    shipment_tracking::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 延误检测与预测引擎", shipment_tracking::APP_NAME);
    tracing::info!("系统版本: {}", shipment_tracking::VERSION);
    tracing::info!("==================================================");

    // 获取数据库路径并初始化 schema
    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    // 三个仓储共享同一连接(Arc<Mutex>), SQLite 单写者模型
    let conn = Arc::new(Mutex::new(conn));
    let repos = DelayRepositories::new(
        Arc::new(SqliteOrderRepository::from_connection(Arc::clone(&conn))),
        Arc::new(SqliteTrackingCacheRepository::from_connection(Arc::clone(&conn))),
        Arc::new(SqliteAlertRepository::from_connection(Arc::clone(&conn))),
    );

    // SLA 注册表: 有部署级覆写文件则叠加,否则内置默认
    let sla_registry = match std::env::var("SHIPMENT_TRACKING_SLA_FILE") {
        Ok(path) if !path.trim().is_empty() => {
            tracing::info!("加载 SLA 覆写文件: {}", path);
            Arc::new(SlaRegistry::from_override_file(std::path::Path::new(
                path.trim(),
            ))?)
        }
        _ => Arc::new(SlaRegistry::with_defaults()),
    };
    tracing::info!("SLA 注册表条目数: {}", sla_registry.len());

    // 引擎参数: 默认路径配置,缺失回退默认值
    let config = EngineConfig::load_or_default();

    let api = DelayApi::new(repos, sla_registry, config);

    // 扫描并发射告警
    let cancellation = ScanCancellation::new();
    let report = api.scan_and_alert(chrono::Utc::now(), &cancellation).await?;

    tracing::info!(
        "扫描完成: 延误订单 {} 单, 告警写入 {} 条",
        report.delayed_orders.len(),
        report.alerts_emitted
    );

    Ok(())
}
