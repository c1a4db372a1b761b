// ==========================================
// 仓储运营智能系统 - 拣货耗时模型
// ==========================================
// 职责: 对单个订单行估算拣货秒数
// 红线: 属性缺失/未知贡献 0 秒,不得为负,不得编造
// ==========================================

use crate::domain::item::Item;
use crate::domain::types::{Fragility, PressureSensitivity, TemperatureSensitivity, UnitType};
use crate::domain::order::OrderLine;
use crate::estimator::location::LocationSpec;
use crate::estimator::params::{LocationParams, PickParams};

// ==========================================
// PickEngine - 拣货耗时引擎
// ==========================================
pub struct PickEngine;

impl PickEngine {
    /// 创建新的拣货耗时引擎
    pub fn new() -> Self {
        Self
    }

    /// 归一化订单行单位类型
    ///
    /// # 规则
    /// 行原始单位 → 商品分类单位 → item 兜底
    pub fn unit_type_for(&self, line: &OrderLine, item: Option<&Item>) -> UnitType {
        line.unit_type_raw
            .as_deref()
            .and_then(UnitType::normalize)
            .or_else(|| item.and_then(|i| i.wms_unit_type))
            .unwrap_or(UnitType::Item)
    }

    /// 估算单行拣货秒数
    ///
    /// # 规则
    /// base[单位类型] + per_qty[单位类型]·(qty−1)   （首件计基础价,追加件计边际价）
    /// + level_seconds[层位] + 梯子层附加
    /// + difficulty_seconds[拣货难度]（难度为空 → 0）
    /// + 处置附加: 易碎 YES/SEMI、漏液、受压 high、
    ///   夏季模式下的怕热商品
    ///
    /// # 边界处理
    /// - 库位不可解析 → 无层位/梯子附加
    /// - 分类属性为空 → 对应附加为 0
    pub fn line_seconds(
        &self,
        line: &OrderLine,
        item: Option<&Item>,
        location: Option<&LocationSpec>,
        pick: &PickParams,
        loc_cfg: &LocationParams,
        summer_mode: bool,
    ) -> f64 {
        let unit = self.unit_type_for(line, item);
        let qty = line.qty.max(1);

        let mut seconds = pick.base_for(unit) + pick.per_qty_for(unit) * (qty - 1) as f64;

        if let Some(spec) = location {
            seconds += pick.level_seconds_for(spec.level);
            if loc_cfg.is_ladder_level(spec.level) {
                seconds += pick.ladder_seconds;
            }
        }

        seconds += pick.difficulty_seconds_for(item.and_then(|i| i.wms_pick_difficulty));

        if let Some(item) = item {
            match item.wms_fragility {
                Some(Fragility::Yes) => seconds += pick.handling_seconds.fragility_yes,
                Some(Fragility::Semi) => seconds += pick.handling_seconds.fragility_semi,
                _ => {}
            }

            if item.wms_spill_risk == Some(true) {
                seconds += pick.handling_seconds.spill_true;
            }

            if item.wms_pressure_sensitivity == Some(PressureSensitivity::High) {
                seconds += pick.handling_seconds.pressure_high;
            }

            if summer_mode
                && item.wms_temperature_sensitivity == Some(TemperatureSensitivity::HeatSensitive)
            {
                seconds += pick.handling_seconds.heat_sensitive_summer;
            }
        }

        seconds
    }
}

impl Default for PickEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::location::LocationPattern;

    fn line(qty: i64, unit: Option<&str>, location: Option<&str>) -> OrderLine {
        OrderLine {
            order_no: "SO1001".to_string(),
            line_no: 1,
            item_code: "IT0001".to_string(),
            location: location.map(|s| s.to_string()),
            zone: None,
            unit_type_raw: unit.map(|s| s.to_string()),
            qty,
            exp_minutes: None,
        }
    }

    fn bare_item() -> Item {
        Item {
            item_code: "IT0001".to_string(),
            item_name: None,
            category_code: None,
            brand_code: None,
            attr1_code: None,
            attr2_code: None,
            attr3_code: None,
            attr4_code: None,
            attr5_code: None,
            attr6_code: None,
            length_cm: None,
            width_cm: None,
            height_cm: None,
            weight_kg: None,
            piece_count: None,
            active: true,
            wms_zone: None,
            wms_unit_type: None,
            wms_fragility: None,
            wms_stackability: None,
            wms_temperature_sensitivity: None,
            wms_pressure_sensitivity: None,
            wms_shape_type: None,
            wms_spill_risk: None,
            wms_pick_difficulty: None,
            wms_shelf_height: None,
            wms_box_fit_rule: None,
            wms_class_confidence: None,
            wms_class_source: None,
            wms_class_notes: None,
            wms_class_evidence: None,
            wms_classified_at: None,
        }
    }

    fn parse(raw: &str) -> LocationSpec {
        LocationPattern::compile("CC-BB-LPP")
            .expect("模式编译失败")
            .parse(raw, &[])
            .expect("解析失败")
    }

    #[test]
    fn test_base_plus_marginal_quantity() {
        let engine = PickEngine::new();
        let pick = PickParams::default();
        let loc_cfg = LocationParams::default();

        // item: 首件 6,追加 2 件各 1.1
        let seconds = engine.line_seconds(&line(3, Some("PCS"), None), None, None, &pick, &loc_cfg, false);
        assert!((seconds - (6.0 + 1.1 * 2.0)).abs() < 1e-9);

        // case: 边际价 0,数量不影响
        let one = engine.line_seconds(&line(1, Some("CS"), None), None, None, &pick, &loc_cfg, false);
        let five = engine.line_seconds(&line(5, Some("CS"), None), None, None, &pick, &loc_cfg, false);
        assert!((one - five).abs() < 1e-9);
    }

    #[test]
    fn test_level_and_ladder_seconds() {
        let engine = PickEngine::new();
        let pick = PickParams::default();
        let loc_cfg = LocationParams::default();

        let ground = parse("10-01-A02");
        let ladder = parse("10-01-C02");

        let base = engine.line_seconds(&line(1, None, None), None, Some(&ground), &pick, &loc_cfg, false);
        let high = engine.line_seconds(&line(1, None, None), None, Some(&ladder), &pick, &loc_cfg, false);

        // C 层: 层位附加 12 + 梯子 15
        assert!((high - base - 12.0 - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_handling_adders() {
        let engine = PickEngine::new();
        let pick = PickParams::default();
        let loc_cfg = LocationParams::default();

        let mut item = bare_item();
        item.wms_fragility = Some(Fragility::Yes);
        item.wms_spill_risk = Some(true);
        item.wms_pressure_sensitivity = Some(PressureSensitivity::High);
        item.wms_temperature_sensitivity = Some(TemperatureSensitivity::HeatSensitive);

        let l = line(1, None, None);
        let without_item = engine.line_seconds(&l, None, None, &pick, &loc_cfg, false);

        // 非夏季: 易碎 6 + 漏液 5 + 受压 4
        let winter = engine.line_seconds(&l, Some(&item), None, &pick, &loc_cfg, false);
        assert!((winter - without_item - 15.0).abs() < 1e-9);

        // 夏季: 追加怕热 8
        let summer = engine.line_seconds(&l, Some(&item), None, &pick, &loc_cfg, true);
        assert!((summer - winter - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_attributes_contribute_zero() {
        let engine = PickEngine::new();
        let pick = PickParams::default();
        let loc_cfg = LocationParams::default();

        let l = line(1, None, None);
        let with_empty = engine.line_seconds(&l, Some(&bare_item()), None, &pick, &loc_cfg, true);
        let without = engine.line_seconds(&l, None, None, &pick, &loc_cfg, true);
        assert!((with_empty - without).abs() < 1e-9);
    }

    #[test]
    fn test_difficulty_seconds() {
        let engine = PickEngine::new();
        let pick = PickParams::default();
        let loc_cfg = LocationParams::default();

        let mut item = bare_item();
        item.wms_pick_difficulty = Some(5);

        let l = line(1, None, None);
        let hard = engine.line_seconds(&l, Some(&item), None, &pick, &loc_cfg, false);
        let easy = engine.line_seconds(&l, Some(&bare_item()), None, &pick, &loc_cfg, false);
        assert!((hard - easy - 20.0).abs() < 1e-9);
    }
}
