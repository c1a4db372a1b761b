// ==========================================
// ClassificationEngine 引擎集成测试
// ==========================================
// 测试目标: 验证分类运行的优先级解析、置信度门控、
//           人工复核判定与幂等性
// ==========================================


use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use test_helpers::create_test_item;
use warehouse_oi::domain::item::{CategoryDefault, ItemOverride};
use warehouse_oi::domain::types::{
    ClassSource, Fragility, PressureSensitivity, ShapeType, Stackability,
};
use warehouse_oi::ClassificationEngine;

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 20, 8, 0, 0).unwrap()
}

fn no_defaults() -> HashMap<String, CategoryDefault> {
    HashMap::new()
}

fn no_overrides() -> HashMap<String, ItemOverride> {
    HashMap::new()
}

// ==========================================
// 测试用例 1: 烈酒品类的规则信号
// ==========================================

#[test]
fn test_spirits_item_classified_by_rules() {
    println!("\n=== 测试：ALD 烈酒按规则分类 ===");

    let engine = ClassificationEngine::new();
    let items = vec![create_test_item("IT0001", "ALD", "Premium Vodka 700ml")];

    let outcome = engine
        .run_classification(items, &no_defaults(), &no_overrides(), 60, false, "TEST", fixed_now())
        .expect("分类运行失败");

    let item = &outcome.items[0];
    assert_eq!(item.wms_fragility, Some(Fragility::Yes));
    assert_eq!(item.wms_spill_risk, Some(true));
    assert_eq!(item.wms_shape_type, Some(ShapeType::Round));
    assert_eq!(item.wms_class_source, Some(ClassSource::Rules));
    assert!(item.wms_class_confidence.unwrap_or(0) >= 75);
    assert!(!item.needs_review(60));

    // 证据记录覆盖全部属性
    let evidence = item.wms_class_evidence.as_deref().expect("证据缺失");
    for attr in [
        "unit_type",
        "spill_risk",
        "fragility",
        "pressure_sensitivity",
        "stackability",
        "temperature_sensitivity",
        "shape_type",
        "pick_difficulty",
        "shelf_height",
        "box_fit_rule",
        "zone",
    ] {
        assert!(evidence.contains(attr), "证据缺少属性: {}", attr);
    }
}

// ==========================================
// 测试用例 2: 覆写优先级与派生属性传递
// ==========================================

#[test]
fn test_override_beats_rules_and_flows_into_derived() {
    println!("\n=== 测试：覆写优先 + 流入派生属性 ===");

    let engine = ClassificationEngine::new();
    // 未知品类: 规则本会给出低置信度的 NO
    let items = vec![create_test_item("IT0002", "ZZZ", "Mystery widget")];

    let mut item_override = ItemOverride {
        item_code: "IT0002".to_string(),
        is_active: true,
        ..ItemOverride::default()
    };
    item_override.fragility = Some(Fragility::Yes);
    item_override.pressure_sensitivity = Some(PressureSensitivity::Low);
    let overrides = HashMap::from([("IT0002".to_string(), item_override)]);

    let outcome = engine
        .run_classification(items, &no_defaults(), &overrides, 60, false, "TEST", fixed_now())
        .expect("分类运行失败");

    let item = &outcome.items[0];
    // 覆写生效,来源 MANUAL
    assert_eq!(item.wms_fragility, Some(Fragility::Yes));
    assert_eq!(item.wms_class_source, Some(ClassSource::Manual));

    // 覆写的易碎等级流入堆叠计算: YES → 禁止堆叠,
    // 且两个前置均已解析（任意来源）→ 置信度 70 ≥ 阈值,落库
    assert_eq!(item.wms_stackability, Some(Stackability::No));
}

// ==========================================
// 测试用例 3: 品类默认值优先级
// ==========================================

#[test]
fn test_category_default_applies_without_override() {
    println!("\n=== 测试：品类默认值生效 ===");

    let engine = ClassificationEngine::new();
    let items = vec![create_test_item("IT0003", "ZZZ", "Mystery widget")];

    let mut default = CategoryDefault {
        category_code: "ZZZ".to_string(),
        is_active: true,
        ..CategoryDefault::default()
    };
    default.fragility = Some(Fragility::Semi);
    let defaults = HashMap::from([("ZZZ".to_string(), default)]);

    let outcome = engine
        .run_classification(items, &defaults, &no_overrides(), 60, false, "TEST", fixed_now())
        .expect("分类运行失败");

    let item = &outcome.items[0];
    assert_eq!(item.wms_fragility, Some(Fragility::Semi));
    assert_eq!(item.wms_class_source, Some(ClassSource::CategoryDefault));
}

// ==========================================
// 测试用例 4: 低置信度置空与人工复核
// ==========================================

#[test]
fn test_ambiguous_item_needs_review() {
    println!("\n=== 测试：证据不足 → 置空 + 人工复核 ===");

    let engine = ClassificationEngine::new();
    // 未知品类、无名称信号、无重量: 关键属性多数低于阈值
    let items = vec![create_test_item("IT0004", "ZZZ", "")];

    let outcome = engine
        .run_classification(items, &no_defaults(), &no_overrides(), 60, false, "TEST", fixed_now())
        .expect("分类运行失败");

    let item = &outcome.items[0];
    // 易碎(45)/漏液(30)/温度(40,未知品类)低于阈值 → 置空
    assert_eq!(item.wms_fragility, None);
    assert_eq!(item.wms_spill_risk, None);
    assert_eq!(item.wms_temperature_sensitivity, None);
    assert!(item.needs_review(60));
    assert_eq!(outcome.run.items_needing_review, 1);
}

// ==========================================
// 测试用例 5: 阈值非法拒绝
// ==========================================

#[test]
fn test_invalid_threshold_rejected() {
    let engine = ClassificationEngine::new();
    let items = vec![create_test_item("IT0005", "ALD", "Gin 500ml")];

    let result =
        engine.run_classification(items, &no_defaults(), &no_overrides(), 101, false, "TEST", fixed_now());
    assert!(result.is_err(), "阈值 101 应当被拒绝");
}

// ==========================================
// 测试用例 6: 幂等性（逐字节一致）
// ==========================================

#[test]
fn test_reclassification_is_idempotent() {
    println!("\n=== 测试：重复运行逐字节一致 ===");

    let engine = ClassificationEngine::new();
    let items = vec![
        create_test_item("IT0006", "ALD", "Whisky 700ml"),
        create_test_item("IT0007", "SNA", "Potato chips family pack"),
        create_test_item("IT0008", "ZZZ", "Mystery widget"),
    ];

    let first = engine
        .run_classification(
            items,
            &no_defaults(),
            &no_overrides(),
            60,
            true,
            "TEST",
            fixed_now(),
        )
        .expect("第一次运行失败");

    // 第二次: 以第一次输出为输入,配置不变
    let second = engine
        .run_classification(
            first.items.clone(),
            &no_defaults(),
            &no_overrides(),
            60,
            true,
            "TEST",
            fixed_now(),
        )
        .expect("第二次运行失败");

    for (a, b) in first.items.iter().zip(second.items.iter()) {
        assert_eq!(a.wms_fragility, b.wms_fragility);
        assert_eq!(a.wms_class_confidence, b.wms_class_confidence);
        assert_eq!(a.wms_class_source, b.wms_class_source);
        // 证据 JSON 逐字节一致（BTreeMap 键序稳定）
        assert_eq!(a.wms_class_evidence, b.wms_class_evidence);
    }

    // 第二次无字段变化
    assert_eq!(second.run.items_updated, 0);
}

// ==========================================
// 测试用例 7: 非在售商品跳过
// ==========================================

#[test]
fn test_inactive_items_skipped() {
    let engine = ClassificationEngine::new();
    let mut inactive = create_test_item("IT0009", "ALD", "Rum 700ml");
    inactive.active = false;

    let outcome = engine
        .run_classification(
            vec![inactive],
            &no_defaults(),
            &no_overrides(),
            60,
            false,
            "TEST",
            fixed_now(),
        )
        .expect("分类运行失败");

    assert_eq!(outcome.run.items_scanned, 0);
    // 原样透传,分类输出保持为空
    assert_eq!(outcome.items[0].wms_fragility, None);
}

// ==========================================
// 测试用例 8: 运行统计
// ==========================================

#[test]
fn test_run_statistics() {
    let engine = ClassificationEngine::new();
    let items = vec![
        create_test_item("IT0010", "ALD", "Vodka 1 l"),
        create_test_item("IT0011", "ZZZ", ""),
    ];

    let outcome = engine
        .run_classification(items, &no_defaults(), &no_overrides(), 60, false, "TEST", fixed_now())
        .expect("分类运行失败");

    assert_eq!(outcome.run.items_scanned, 2);
    assert_eq!(outcome.run.items_updated, 2); // 两件均从空分类变为有输出
    assert_eq!(outcome.run.items_needing_review, 1);
    assert_eq!(outcome.run.items_failed, 0);
    assert_eq!(outcome.run.threshold, 60);
    assert!(outcome.failures.is_empty());
}
