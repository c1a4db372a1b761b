// ==========================================
// 仓储运营智能系统 - 分类编排引擎
// ==========================================
// 职责: 遍历在售商品,按依赖顺序评估属性 → 解析最终值 →
//       聚合整体置信度与审计证据 → 产出运行统计
// 红线: 单品失败不得中断整体运行;引擎本身无 I/O,
//       落库由调用方通过仓储层完成
// ==========================================

use crate::classify::error::{ClassifyError, ClassifyResult};
use crate::classify::resolver::{self, EvidenceMap};
use crate::classify::rules::RuleEvaluator;
use crate::domain::item::{CategoryDefault, ClassificationRun, Item, ItemOverride};
use crate::domain::types::AttributeKind;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

// ==========================================
// ClassificationOutcome - 运行结果
// ==========================================
#[derive(Debug, Clone)]
pub struct ClassificationOutcome {
    /// 更新后的商品列表（含未变化项,供调用方整体落库）
    pub items: Vec<Item>,
    /// 本次运行记录（仅追加）
    pub run: ClassificationRun,
    /// 单品失败明细: (item_code, 错误描述)
    pub failures: Vec<(String, String)>,
}

// ==========================================
// ClassificationEngine - 分类编排引擎
// ==========================================
pub struct ClassificationEngine {
    evaluator: RuleEvaluator,
}

impl ClassificationEngine {
    /// 创建新的分类编排引擎
    pub fn new() -> Self {
        Self {
            evaluator: RuleEvaluator::new(),
        }
    }

    /// 执行一次完整分类运行
    ///
    /// # 参数
    /// - items: 商品全集（非在售项原样跳过）
    /// - category_defaults: 品类默认值（category_code → 默认值,仅含启用项）
    /// - item_overrides: 单品覆写（item_code → 覆写,仅含启用项）
    /// - threshold: 置信度阈值（0-100,默认 60）
    /// - summer_mode: 夏季模式开关（外部拥有）
    /// - run_by: 触发人标识
    /// - now: 当前时间（由调用方传入,保证可重现）
    ///
    /// # 幂等性
    /// 输入与配置不变时,重复运行产出逐字节一致的
    /// 值/置信度/来源/证据
    #[instrument(skip(self, items, category_defaults, item_overrides), fields(items_total = items.len()))]
    pub fn run_classification(
        &self,
        items: Vec<Item>,
        category_defaults: &HashMap<String, CategoryDefault>,
        item_overrides: &HashMap<String, ItemOverride>,
        threshold: i32,
        summer_mode: bool,
        run_by: &str,
        now: DateTime<Utc>,
    ) -> ClassifyResult<ClassificationOutcome> {
        if !(0..=100).contains(&threshold) {
            return Err(ClassifyError::InvalidThreshold { value: threshold });
        }

        let mut out_items = Vec::with_capacity(items.len());
        let mut failures = Vec::new();

        let mut items_scanned = 0;
        let mut items_updated = 0;
        let mut items_needing_review = 0;

        for item in items {
            if !item.active {
                out_items.push(item);
                continue;
            }
            items_scanned += 1;

            let default = item
                .category_code
                .as_deref()
                .and_then(|code| category_defaults.get(code))
                .filter(|d| d.is_active);
            let override_ = item_overrides.get(&item.item_code).filter(|o| o.is_active);

            match self.classify_single_item(&item, default, override_, threshold, summer_mode, now)
            {
                Ok((classified, changed)) => {
                    if changed {
                        items_updated += 1;
                    }
                    if classified.needs_review(threshold) {
                        items_needing_review += 1;
                    }
                    out_items.push(classified);
                }
                Err(e) => {
                    // 单品失败: 记录并继续,保留原有分类
                    warn!(item_code = %item.item_code, error = %e, "单品分类失败,跳过");
                    failures.push((item.item_code.clone(), e.to_string()));
                    out_items.push(item);
                }
            }
        }

        let run = ClassificationRun {
            run_id: Uuid::new_v4().to_string(),
            started_at: now,
            finished_at: Some(now),
            run_by: run_by.to_string(),
            threshold,
            summer_mode,
            items_scanned,
            items_updated,
            items_needing_review,
            items_failed: failures.len() as i32,
            notes: Some(format!(
                "Completed. Threshold: {}, Summer mode: {}",
                threshold, summer_mode
            )),
        };

        debug!(
            items_scanned,
            items_updated,
            items_needing_review,
            items_failed = failures.len(),
            "分类运行完成"
        );

        Ok(ClassificationOutcome {
            items: out_items,
            run,
            failures,
        })
    }

    /// 分类单个商品
    ///
    /// # 属性依赖顺序
    /// 派生属性（堆叠/拣货难度/装箱规则/区域）消费**最终解析值**,
    /// 必须排在其前置属性之后 —— 覆写的易碎等级要流入堆叠计算
    ///
    /// # 返回
    /// (更新后的商品, 是否有字段变化)
    pub fn classify_single_item(
        &self,
        item: &Item,
        category_default: Option<&CategoryDefault>,
        item_override: Option<&ItemOverride>,
        threshold: i32,
        summer_mode: bool,
        now: DateTime<Utc>,
    ) -> ClassifyResult<(Item, bool)> {
        let ev = &self.evaluator;
        let mut evidence = EvidenceMap::new();

        // 1) 单位类型（无品类默认值）
        let unit = resolver::resolve(
            AttributeKind::UnitType,
            &ev.compute_unit_type(item),
            item_override.and_then(|o| o.unit_type),
            None,
            threshold,
        );

        // 2) 漏液风险
        let spill = resolver::resolve(
            AttributeKind::SpillRisk,
            &ev.compute_spill_risk(item),
            item_override.and_then(|o| o.spill_risk),
            category_default.and_then(|d| d.spill_risk),
            threshold,
        );

        // 3) 易碎等级
        let fragility = resolver::resolve(
            AttributeKind::Fragility,
            &ev.compute_fragility(item),
            item_override.and_then(|o| o.fragility),
            category_default.and_then(|d| d.fragility),
            threshold,
        );

        // 4) 受压敏感度
        let pressure = resolver::resolve(
            AttributeKind::PressureSensitivity,
            &ev.compute_pressure_sensitivity(item),
            item_override.and_then(|o| o.pressure_sensitivity),
            category_default.and_then(|d| d.pressure_sensitivity),
            threshold,
        );

        // 5) 堆叠能力（派生: 易碎 + 受压最终值）
        let stackability = resolver::resolve(
            AttributeKind::Stackability,
            &ev.compute_stackability(fragility.value, pressure.value),
            item_override.and_then(|o| o.stackability),
            category_default.and_then(|d| d.stackability),
            threshold,
        );

        // 6) 温度敏感度
        let temperature = resolver::resolve(
            AttributeKind::TemperatureSensitivity,
            &ev.compute_temperature_sensitivity(item),
            item_override.and_then(|o| o.temperature_sensitivity),
            category_default.and_then(|d| d.temperature_sensitivity),
            threshold,
        );

        // 7) 外形类型
        let shape = resolver::resolve(
            AttributeKind::ShapeType,
            &ev.compute_shape_type(item),
            item_override.and_then(|o| o.shape_type),
            category_default.and_then(|d| d.shape_type),
            threshold,
        );

        // 8) 拣货难度（派生: 重量 + 易碎 + 受压最终值）
        let difficulty = resolver::resolve(
            AttributeKind::PickDifficulty,
            &ev.compute_pick_difficulty(item, fragility.value, pressure.value),
            item_override.and_then(|o| o.pick_difficulty),
            category_default.and_then(|d| d.pick_difficulty),
            threshold,
        );

        // 9) 货架高度建议
        let shelf = resolver::resolve(
            AttributeKind::ShelfHeight,
            &ev.compute_shelf_height(item),
            item_override.and_then(|o| o.shelf_height),
            category_default.and_then(|d| d.shelf_height),
            threshold,
        );

        // 10) 装箱位置规则（派生: 易碎/漏液/受压/温度最终值 + 夏季模式）
        let box_fit = resolver::resolve(
            AttributeKind::BoxFitRule,
            &ev.compute_box_fit_rule(
                item,
                fragility.value,
                spill.value,
                pressure.value,
                temperature.value,
                summer_mode,
            ),
            item_override.and_then(|o| o.box_fit_rule),
            category_default.and_then(|d| d.box_fit_rule),
            threshold,
        );

        // 11) 仓储区域（派生: 温度最终值）
        let zone = resolver::resolve(
            AttributeKind::Zone,
            &ev.compute_zone(item, temperature.value),
            item_override.and_then(|o| o.zone),
            category_default.and_then(|d| d.zone),
            threshold,
        );

        // ===== 聚合证据 =====
        let entries: [(AttributeKind, Result<_, serde_json::Error>); 11] = [
            (AttributeKind::UnitType, unit.evidence_entry()),
            (AttributeKind::SpillRisk, spill.evidence_entry()),
            (AttributeKind::Fragility, fragility.evidence_entry()),
            (AttributeKind::PressureSensitivity, pressure.evidence_entry()),
            (AttributeKind::Stackability, stackability.evidence_entry()),
            (AttributeKind::TemperatureSensitivity, temperature.evidence_entry()),
            (AttributeKind::ShapeType, shape.evidence_entry()),
            (AttributeKind::PickDifficulty, difficulty.evidence_entry()),
            (AttributeKind::ShelfHeight, shelf.evidence_entry()),
            (AttributeKind::BoxFitRule, box_fit.evidence_entry()),
            (AttributeKind::Zone, zone.evidence_entry()),
        ];
        for (kind, entry) in entries {
            let entry = entry.map_err(|e| ClassifyError::EvidenceSerialization {
                item_code: item.item_code.clone(),
                message: e.to_string(),
            })?;
            evidence.insert(kind.name().to_string(), entry);
        }

        let overall = resolver::overall_confidence(&evidence);
        let source = resolver::class_source(&evidence);
        let notes = resolver::class_notes(&evidence, overall, threshold);
        let evidence_json =
            serde_json::to_string(&evidence).map_err(|e| ClassifyError::EvidenceSerialization {
                item_code: item.item_code.clone(),
                message: e.to_string(),
            })?;

        // ===== 写回商品 =====
        let mut updated = item.clone();
        updated.wms_unit_type = unit.value;
        updated.wms_spill_risk = spill.value;
        updated.wms_fragility = fragility.value;
        updated.wms_pressure_sensitivity = pressure.value;
        updated.wms_stackability = stackability.value;
        updated.wms_temperature_sensitivity = temperature.value;
        updated.wms_shape_type = shape.value;
        updated.wms_pick_difficulty = difficulty.value;
        updated.wms_shelf_height = shelf.value;
        updated.wms_box_fit_rule = box_fit.value;
        updated.wms_zone = zone.value;

        let changed = updated.wms_unit_type != item.wms_unit_type
            || updated.wms_spill_risk != item.wms_spill_risk
            || updated.wms_fragility != item.wms_fragility
            || updated.wms_pressure_sensitivity != item.wms_pressure_sensitivity
            || updated.wms_stackability != item.wms_stackability
            || updated.wms_temperature_sensitivity != item.wms_temperature_sensitivity
            || updated.wms_shape_type != item.wms_shape_type
            || updated.wms_pick_difficulty != item.wms_pick_difficulty
            || updated.wms_shelf_height != item.wms_shelf_height
            || updated.wms_box_fit_rule != item.wms_box_fit_rule
            || updated.wms_zone != item.wms_zone;

        updated.wms_class_confidence = Some(overall);
        updated.wms_class_source = Some(source);
        updated.wms_class_notes = Some(notes);
        updated.wms_class_evidence = Some(evidence_json);
        updated.wms_classified_at = Some(now);

        Ok((updated, changed))
    }
}

impl Default for ClassificationEngine {
    fn default() -> Self {
        Self::new()
    }
}
