// ==========================================
// 仓储运营智能系统 - 批处理主入口
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 决策与估算核心的无头批处理入口
// 触发方式: 外部(定时任务/运维人员)调用,核心不自行调度
// ==========================================

use std::error::Error;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use warehouse_oi::config::{ConfigManager, OiConfigReader};
use warehouse_oi::db::{init_schema, open_sqlite_connection};
use warehouse_oi::domain::order::{EstimateLine, EstimateRun};
use warehouse_oi::estimator::{TimeEstimator, ESTIMATOR_VERSION};
use warehouse_oi::repository::OiRepositories;
use warehouse_oi::ClassificationEngine;

/// 获取默认数据库路径（用户数据目录下）
fn get_default_db_path() -> String {
    let base = dirs::data_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
    let dir = base.join("warehouse-oi");
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!(error = %e, "创建数据目录失败,回退当前目录");
        return "warehouse_oi.db".to_string();
    }
    dir.join("warehouse_oi.db").to_string_lossy().to_string()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // 初始化日志系统
    warehouse_oi::logging::init();

    tracing::info!("==================================================");
    tracing::info!("仓储运营智能系统 - 决策与估算核心");
    tracing::info!("系统版本: {}", warehouse_oi::VERSION);
    tracing::info!("==================================================");

    // 数据库准备
    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(get_default_db_path);
    tracing::info!("使用数据库: {}", db_path);

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;
    let conn = Arc::new(Mutex::new(conn));

    let repos = OiRepositories::from_connection(conn.clone());
    let config = ConfigManager::from_connection(conn);

    // ==========================================
    // 步骤1: 商品分类运行
    // ==========================================
    let threshold = config.get_classification_threshold().await?;
    let summer_mode = config.get_summer_mode().await?;
    tracing::info!(threshold, summer_mode, "开始分类运行");

    let items = repos.item_repo.list_active_items()?;
    let defaults = repos.default_repo.list_active()?;
    let overrides = repos.override_repo.list_active()?;

    let engine = ClassificationEngine::new();
    let outcome = engine.run_classification(
        items,
        &defaults,
        &overrides,
        threshold,
        summer_mode,
        "batch",
        Utc::now(),
    )?;

    repos.item_repo.batch_update_classification(&outcome.items)?;
    repos.run_repo.insert(&outcome.run)?;

    tracing::info!(
        items_scanned = outcome.run.items_scanned,
        items_updated = outcome.run.items_updated,
        items_needing_review = outcome.run.items_needing_review,
        items_failed = outcome.run.items_failed,
        "分类运行完成"
    );

    // ==========================================
    // 步骤2: 订单时间估算（有界批次）
    // ==========================================
    let params = config.get_time_params().await?;
    let max_batch_size = config.get_estimator_max_batch_size().await?;
    let params_snapshot = serde_json::to_string(&params)?;
    let estimator = TimeEstimator::new(params, summer_mode)?;

    let order_nos = repos.order_repo.list_orders_without_estimate()?;
    tracing::info!(
        pending = order_nos.len(),
        max_batch_size,
        "开始批量估算"
    );

    let mut orders = Vec::with_capacity(order_nos.len());
    let mut item_codes = Vec::new();
    for order_no in order_nos {
        let lines = repos.order_repo.get_lines(&order_no)?;
        item_codes.extend(lines.iter().map(|l| l.item_code.clone()));
        orders.push((order_no, lines));
    }

    item_codes.sort();
    item_codes.dedup();
    let item_lookup = repos
        .item_repo
        .get_by_codes(&item_codes)?
        .into_iter()
        .filter(|i| i.active)
        .map(|i| (i.item_code.clone(), i))
        .collect();

    let batch = estimator.estimate_batch(&orders, &item_lookup, max_batch_size);

    for estimate in &batch.estimates {
        repos.order_repo.write_back_estimate(estimate)?;

        // 审计快照: 参数随运行落盘,保证可追溯复算
        let run_id = Uuid::new_v4().to_string();
        let run = EstimateRun {
            run_id: run_id.clone(),
            order_no: estimate.order_no.clone(),
            estimator_version: ESTIMATOR_VERSION.to_string(),
            params_snapshot_json: params_snapshot.clone(),
            summer_mode: estimate.summer_mode,
            estimated_total_seconds: estimate.total_seconds,
            estimated_travel_seconds: estimate.travel.total_seconds(),
            estimated_pick_seconds: estimate.pick_seconds,
            estimated_pack_seconds: estimate.pack.seconds,
            breakdown_json: serde_json::to_string(&estimate)?,
            reason: "batch".to_string(),
            created_at: Utc::now(),
        };
        let lines: Vec<EstimateLine> = estimate
            .lines
            .iter()
            .map(|l| EstimateLine {
                run_id: run_id.clone(),
                order_no: estimate.order_no.clone(),
                line_no: l.line_no,
                item_code: l.item_code.clone(),
                location: l.location.clone(),
                unit_type_normalized: l.unit_type_normalized.clone(),
                qty: l.qty,
                estimated_pick_seconds: l.pick_seconds,
            })
            .collect();
        repos.order_repo.insert_estimate_run(&run, &lines)?;
    }

    tracing::info!(
        estimated = batch.estimates.len(),
        failed = batch.failures.len(),
        deferred = batch.deferred,
        "批量估算完成"
    );
    for (order_no, message) in &batch.failures {
        tracing::warn!(order_no = %order_no, error = %message, "订单估算失败");
    }

    Ok(())
}
