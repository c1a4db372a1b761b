// ==========================================
// 全流程 E2E 测试
// ==========================================
// 测试目标: 商品入库 → 分类运行 → 落库 → 订单估算 → 写回
//           （临时 SQLite 数据库,贯穿仓储层与两个引擎）
// ==========================================


use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use test_helpers::{create_test_db, create_test_item, create_test_line, insert_config,
    open_test_connection};
use warehouse_oi::config::{ConfigManager, OiConfigReader};
use warehouse_oi::domain::item::ItemOverride;
use warehouse_oi::domain::order::Order;
use warehouse_oi::domain::types::{ClassSource, Fragility};
use warehouse_oi::estimator::TimeEstimator;
use warehouse_oi::repository::OiRepositories;
use warehouse_oi::ClassificationEngine;

#[tokio::test]
async fn test_full_classification_and_estimation_flow() {
    warehouse_oi::logging::init_test();
    println!("\n=== E2E：分类 → 落库 → 估算 → 写回 ===");

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let raw_conn = open_test_connection(&db_path).expect("Failed to open db");
    insert_config(&raw_conn, "summer_mode", "true").expect("写入配置失败");

    let conn = Arc::new(Mutex::new(raw_conn));
    let repos = OiRepositories::from_connection(conn.clone());
    let config = ConfigManager::from_connection(conn);

    // ==========================================
    // 步骤1: 准备商品与覆写
    // ==========================================
    let mut vodka = create_test_item("IT0001", "ALD", "Premium Vodka 700ml");
    vodka.weight_kg = Some(1.2);
    let widget = create_test_item("IT0002", "ZZZ", "Mystery widget");
    repos
        .item_repo
        .batch_upsert_items(&[vodka, widget])
        .expect("商品写入失败");

    let mut item_override = ItemOverride {
        item_code: "IT0002".to_string(),
        is_active: true,
        ..ItemOverride::default()
    };
    item_override.fragility = Some(Fragility::Yes);
    repos.override_repo.upsert(&item_override).expect("覆写写入失败");

    // ==========================================
    // 步骤2: 分类运行并落库
    // ==========================================
    let threshold = config.get_classification_threshold().await.expect("读取失败");
    let summer_mode = config.get_summer_mode().await.expect("读取失败");
    assert!(summer_mode);

    let items = repos.item_repo.list_active_items().expect("查询失败");
    let defaults = repos.default_repo.list_active().expect("查询失败");
    let overrides = repos.override_repo.list_active().expect("查询失败");

    let engine = ClassificationEngine::new();
    let outcome = engine
        .run_classification(
            items,
            &defaults,
            &overrides,
            threshold,
            summer_mode,
            "E2E",
            Utc.with_ymd_and_hms(2026, 1, 20, 8, 0, 0).unwrap(),
        )
        .expect("分类运行失败");

    repos
        .item_repo
        .batch_update_classification(&outcome.items)
        .expect("分类落库失败");
    repos.run_repo.insert(&outcome.run).expect("运行记录失败");

    // 落库后读回: 规则结果与覆写均生效
    let vodka = repos
        .item_repo
        .get_by_code("IT0001")
        .expect("查询失败")
        .expect("商品应当存在");
    assert_eq!(vodka.wms_fragility, Some(Fragility::Yes));
    assert_eq!(vodka.wms_spill_risk, Some(true));
    assert_eq!(vodka.wms_class_source, Some(ClassSource::Rules));

    let widget = repos
        .item_repo
        .get_by_code("IT0002")
        .expect("查询失败")
        .expect("商品应当存在");
    assert_eq!(widget.wms_fragility, Some(Fragility::Yes));
    assert_eq!(widget.wms_class_source, Some(ClassSource::Manual));

    let runs = repos.run_repo.list_recent(10).expect("查询失败");
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].items_scanned, 2);

    // ==========================================
    // 步骤3: 订单估算并写回
    // ==========================================
    repos
        .order_repo
        .upsert_order(&Order {
            order_no: "SO1001".to_string(),
            status: Some("NEW".to_string()),
            total_exp_minutes: None,
        })
        .expect("订单写入失败");
    repos
        .order_repo
        .batch_upsert_lines(&[
            create_test_line("SO1001", 1, "IT0001", Some("10-01-A02"), 2),
            create_test_line("SO1001", 2, "IT0002", Some("70-02-C05"), 1),
        ])
        .expect("订单行写入失败");

    let params = config.get_time_params().await.expect("读取失败");
    let estimator = TimeEstimator::new(params, summer_mode).expect("引擎创建失败");

    let lines = repos.order_repo.get_lines("SO1001").expect("查询失败");
    let item_lookup: HashMap<_, _> = repos
        .item_repo
        .get_by_codes(&["IT0001".to_string(), "IT0002".to_string()])
        .expect("查询失败")
        .into_iter()
        .map(|i| (i.item_code.clone(), i))
        .collect();

    let estimate = estimator
        .estimate_order("SO1001", &lines, &item_lookup)
        .expect("估算失败");

    // 分类输出流入估算: 两件均易碎 → 打包特殊组含 fragile
    assert!(estimate.pack.special_groups.contains(&"fragile"));
    // 上层库位 → 楼梯费
    assert!(estimate.travel.stairs_seconds > 0.0);

    repos.order_repo.write_back_estimate(&estimate).expect("写回失败");
    let order = repos
        .order_repo
        .get_order("SO1001")
        .expect("查询失败")
        .expect("订单应当存在");
    assert!(order.total_exp_minutes.unwrap() > 0.0);
}
