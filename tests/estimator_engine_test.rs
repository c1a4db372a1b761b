// ==========================================
// TimeEstimator 引擎集成测试
// ==========================================
// 测试目标: 验证订单估算的四段分解恒等式、楼梯一次性计费、
//           失败隔离与批次上限
// ==========================================


use std::collections::HashMap;
use test_helpers::{create_test_item, create_test_line};
use warehouse_oi::domain::item::Item;
use warehouse_oi::domain::order::OrderLine;
use warehouse_oi::domain::types::{Fragility, TemperatureSensitivity};
use warehouse_oi::estimator::{TimeEstimator, TimeParams};

fn estimator(summer_mode: bool) -> TimeEstimator {
    TimeEstimator::new(TimeParams::default(), summer_mode).expect("估算引擎创建失败")
}

fn item_lookup(items: Vec<Item>) -> HashMap<String, Item> {
    items.into_iter().map(|i| (i.item_code.clone(), i)).collect()
}

// ==========================================
// 测试用例 1: 四段分解恒等式
// ==========================================

#[test]
fn test_breakdown_identity() {
    println!("\n=== 测试：total = overhead + travel + pick + pack ===");

    let estimator = estimator(false);
    let lines = vec![
        create_test_line("SO1001", 1, "IT0001", Some("10-01-A02"), 2),
        create_test_line("SO1001", 2, "IT0002", Some("12-03-B05"), 1),
    ];
    let lookup = item_lookup(vec![
        create_test_item("IT0001", "ALD", "Vodka 700ml"),
        create_test_item("IT0002", "MIS", "Widget"),
    ]);

    let estimate = estimator
        .estimate_order("SO1001", &lines, &lookup)
        .expect("估算失败");

    let sum = estimate.overhead_seconds
        + estimate.travel.total_seconds()
        + estimate.pick_seconds
        + estimate.pack.seconds;
    assert!((estimate.total_seconds - sum).abs() < 1e-9);
    assert!((estimate.total_minutes - estimate.total_seconds / 60.0).abs() < 1e-9);

    // 行级拣货耗时随结果输出
    assert_eq!(estimate.lines.len(), 2);
    let line_sum: f64 = estimate.lines.iter().map(|l| l.pick_seconds).sum();
    assert!((line_sum - estimate.pick_seconds).abs() < 1e-9);
}

// ==========================================
// 测试用例 2: 上层库位楼梯一次性计费
// ==========================================

#[test]
fn test_stairs_once_regardless_of_line_count() {
    println!("\n=== 测试：走廊 10 + 70,楼梯只计一次 ===");

    let params = TimeParams::default();
    let stairs = params.travel.sec_stairs_up + params.travel.sec_stairs_down;
    let estimator = estimator(false);
    let lookup = item_lookup(vec![create_test_item("IT0001", "MIS", "Widget")]);

    let two_lines = vec![
        create_test_line("SO1002", 1, "IT0001", Some("10-01-A02"), 1),
        create_test_line("SO1002", 2, "IT0001", Some("70-02-C05"), 1),
    ];
    let estimate = estimator
        .estimate_order("SO1002", &two_lines, &lookup)
        .expect("估算失败");
    assert_eq!(estimate.travel.stairs_seconds, stairs);

    // 上层行数增加,楼梯费不变
    let four_lines = vec![
        create_test_line("SO1003", 1, "IT0001", Some("10-01-A02"), 1),
        create_test_line("SO1003", 2, "IT0001", Some("70-02-C05"), 1),
        create_test_line("SO1003", 3, "IT0001", Some("70-05-A01"), 1),
        create_test_line("SO1003", 4, "IT0001", Some("80-01-B03"), 1),
    ];
    let estimate4 = estimator
        .estimate_order("SO1003", &four_lines, &lookup)
        .expect("估算失败");
    assert_eq!(estimate4.travel.stairs_seconds, stairs);
}

// ==========================================
// 测试用例 3: 空订单与不可解析库位
// ==========================================

#[test]
fn test_empty_order_and_unparsed_location() {
    let estimator = estimator(false);
    let lookup = HashMap::new();

    // 空订单 → 全零
    let empty = estimator
        .estimate_order("SO1004", &[], &lookup)
        .expect("估算失败");
    assert_eq!(empty.total_seconds, 0.0);
    assert!(empty.lines.is_empty());

    // 不可解析库位: 不崩溃,对位时间照计,诊断可见
    let lines = vec![create_test_line("SO1005", 1, "IT0001", Some("???"), 1)];
    let estimate = estimator
        .estimate_order("SO1005", &lines, &lookup)
        .expect("估算失败");
    assert_eq!(estimate.travel.unparsed_locations, vec!["???".to_string()]);
    assert_eq!(
        estimate.travel.total_seconds(),
        TimeParams::default().travel.sec_align_per_stop
    );
    assert!(estimate.total_seconds > 0.0);
}

// ==========================================
// 测试用例 4: 夏季模式影响拣货与打包
// ==========================================

#[test]
fn test_summer_mode_handling() {
    let mut hot = create_test_item("IT0001", "CHO", "Chocolate bar");
    hot.wms_temperature_sensitivity = Some(TemperatureSensitivity::HeatSensitive);
    hot.wms_fragility = Some(Fragility::Yes);

    let lines = vec![create_test_line("SO1006", 1, "IT0001", Some("10-01-A02"), 1)];

    let winter = estimator(false)
        .estimate_order("SO1006", &lines, &item_lookup(vec![hot.clone()]))
        .expect("估算失败");
    let summer = estimator(true)
        .estimate_order("SO1006", &lines, &item_lookup(vec![hot]))
        .expect("估算失败");

    let params = TimeParams::default();
    // 拣货: 怕热附加;打包: heat_sensitive_summer 组追加一组
    let expected_delta =
        params.pick.handling_seconds.heat_sensitive_summer + params.pack.special_group_seconds;
    assert!((summer.total_seconds - winter.total_seconds - expected_delta).abs() < 1e-9);

    assert_eq!(winter.pack.special_groups, vec!["fragile"]);
    assert_eq!(
        summer.pack.special_groups,
        vec!["fragile", "heat_sensitive_summer"]
    );
}

// ==========================================
// 测试用例 5: 批量估算的失败隔离与批次上限
// ==========================================

#[test]
fn test_batch_isolates_failures_and_bounds_size() {
    println!("\n=== 测试：批量估算失败隔离 + 批次上限 ===");

    let estimator = estimator(false);
    let lookup = HashMap::new();

    let orders: Vec<(String, Vec<OrderLine>)> = vec![
        (
            "SO2001".to_string(),
            vec![create_test_line("SO2001", 1, "IT0001", Some("10-01-A02"), 1)],
        ),
        (
            // 数量非法 → 该订单失败,不影响其余
            "SO2002".to_string(),
            vec![create_test_line("SO2002", 1, "IT0001", Some("10-01-A02"), 0)],
        ),
        (
            "SO2003".to_string(),
            vec![create_test_line("SO2003", 1, "IT0001", Some("11-02-B03"), 1)],
        ),
        (
            "SO2004".to_string(),
            vec![create_test_line("SO2004", 1, "IT0001", Some("12-02-B03"), 1)],
        ),
    ];

    // 批次上限 3: 第 4 单延后
    let outcome = estimator.estimate_batch(&orders, &lookup, 3);
    assert_eq!(outcome.estimates.len(), 2);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].0, "SO2002");
    assert_eq!(outcome.deferred, 1);
}

// ==========================================
// 测试用例 6: 确定性（相同输入相同输出）
// ==========================================

#[test]
fn test_estimation_is_deterministic() {
    let estimator = estimator(false);
    let lines = vec![
        create_test_line("SO3001", 1, "IT0001", Some("10-01-A02"), 3),
        create_test_line("SO3001", 2, "IT0002", Some("70-02-C05"), 1),
    ];
    let lookup = item_lookup(vec![
        create_test_item("IT0001", "ALD", "Vodka 700ml"),
        create_test_item("IT0002", "SNA", "Chips"),
    ]);

    let a = estimator.estimate_order("SO3001", &lines, &lookup).expect("估算失败");
    let b = estimator.estimate_order("SO3001", &lines, &lookup).expect("估算失败");
    assert_eq!(a.total_seconds, b.total_seconds);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}
