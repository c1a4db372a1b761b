// ==========================================
// 仓储运营智能系统 - 分类规则评估器
// ==========================================
// 职责: 对单个商品的原始信号计算各属性候选值
// 输入: Item 原始信号（品类/名称/属性代码/重量尺寸）
// 输出: Candidate{value, confidence, reason}
// 红线: 纯函数,无 I/O;证据不足时必须给出低置信度,
//       禁止在弱信号上编造高置信度答案
// ==========================================

use crate::classify::mappings;
use crate::domain::item::Item;
use crate::domain::types::{
    BoxFitRule, Fragility, PressureSensitivity, ShapeType, ShelfHeight, Stackability,
    TemperatureSensitivity, UnitType, WarehouseZone,
};
use regex::Regex;

// ==========================================
// Candidate - 规则候选结果
// ==========================================
/// 单属性规则输出: 候选值 + 置信度(0-100) + 可读理由
#[derive(Debug, Clone)]
pub struct Candidate<T> {
    pub value: Option<T>,
    pub confidence: i32,
    pub reason: String,
}

impl<T> Candidate<T> {
    /// 构造有值候选
    pub fn of(value: T, confidence: i32, reason: impl Into<String>) -> Self {
        Self {
            value: Some(value),
            confidence,
            reason: reason.into(),
        }
    }

    /// 构造无值候选（证据不足）
    pub fn ambiguous(confidence: i32, reason: impl Into<String>) -> Self {
        Self {
            value: None,
            confidence,
            reason: reason.into(),
        }
    }
}

// ==========================================
// RuleEvaluator - 规则评估器
// ==========================================
pub struct RuleEvaluator {
    // 体积标记检测（"330ml" / "1 l" / "75cl" 等）
    volume_re: Regex,
}

impl RuleEvaluator {
    /// 创建新的规则评估器
    pub fn new() -> Self {
        Self {
            // 内置模式为常量,编译失败属于程序缺陷
            volume_re: Regex::new(r"\d+\s*(ml|cl|l|lt|ltr)\b").expect("内置体积正则非法"),
        }
    }

    // ===== 信号提取辅助 =====

    fn category(item: &Item) -> String {
        item.category_code.as_deref().unwrap_or("").trim().to_uppercase()
    }

    fn name(item: &Item) -> String {
        item.item_name.as_deref().unwrap_or("").trim().to_lowercase()
    }

    fn find_keyword(name: &str, keywords: &[&'static str]) -> Option<&'static str> {
        keywords.iter().copied().find(|k| name.contains(k))
    }

    // ==========================================
    // 单位类型
    // ==========================================

    /// 计算单位类型
    ///
    /// # 规则
    /// - attr1_code 命中映射表 → 映射值,置信度 90
    /// - 其他 → item 兜底,置信度 40（低于阈值,不会落库）
    pub fn compute_unit_type(&self, item: &Item) -> Candidate<UnitType> {
        let attr1 = item.attr1_code.as_deref().unwrap_or("").trim().to_uppercase();

        if let Some(code) = mappings::unit_type_code(&attr1) {
            if let Some(unit) = UnitType::from_db_str(code) {
                return Candidate::of(
                    unit,
                    90,
                    format!("Unit type '{}' from attr1_code='{}'", code, attr1),
                );
            }
        }

        Candidate::of(
            UnitType::Item,
            40,
            format!("Unrecognized attr1_code='{}', defaulting to 'item'", attr1),
        )
    }

    // ==========================================
    // 漏液风险
    // ==========================================

    /// 计算漏液风险
    ///
    /// # 规则
    /// - 已知液体品类 → true,90
    /// - 名称命中液体关键词或体积标记（ml/l/cl）→ true,75
    /// - 其他 → false,30
    pub fn compute_spill_risk(&self, item: &Item) -> Candidate<bool> {
        let category = Self::category(item);
        let name = Self::name(item);

        if mappings::LIQUID_CATEGORIES.contains(&category.as_str()) {
            return Candidate::of(
                true,
                90,
                format!("Category '{}' indicates liquid product", category),
            );
        }

        if let Some(keyword) = Self::find_keyword(&name, mappings::LIQUID_KEYWORDS) {
            return Candidate::of(
                true,
                75,
                format!("Item name contains liquid keyword '{}'", keyword),
            );
        }

        if self.volume_re.is_match(&name) {
            return Candidate::of(true, 75, "Item name contains volume measurement");
        }

        Candidate::of(false, 30, "No liquid indicators found")
    }

    // ==========================================
    // 易碎等级
    // ==========================================

    /// 计算易碎等级
    ///
    /// # 规则
    /// - 已知易碎品类 → 映射等级,90
    /// - 玻璃瓶品类 → YES,85
    /// - 名称命中易碎关键词 → YES,70
    /// - 其他 → NO,45（低于阈值）
    pub fn compute_fragility(&self, item: &Item) -> Candidate<Fragility> {
        let category = Self::category(item);
        let name = Self::name(item);

        if let Some(level) = mappings::fragile_category(&category) {
            return Candidate::of(
                level,
                90,
                format!("Category '{}' has known fragility '{}'", category, level),
            );
        }

        if mappings::GLASS_BOTTLE_CATEGORIES.contains(&category.as_str()) {
            return Candidate::of(
                Fragility::Yes,
                85,
                format!("Category '{}' contains glass bottles", category),
            );
        }

        if let Some(keyword) = Self::find_keyword(&name, mappings::FRAGILE_KEYWORDS) {
            return Candidate::of(
                Fragility::Yes,
                70,
                format!("Item name contains fragile keyword '{}'", keyword),
            );
        }

        Candidate::of(Fragility::No, 45, "No fragility indicators found")
    }

    // ==========================================
    // 受压敏感度
    // ==========================================

    /// 计算受压敏感度
    ///
    /// # 规则
    /// - 高敏感品类（零食/薯片/面包）→ high,90
    /// - 中敏感品类（麦片/饼干/玻璃/蛋）→ medium,85
    /// - 玻璃瓶品类 → medium,80
    /// - 名称命中碎裂关键词 → high,75
    /// - 其他 → low,50
    pub fn compute_pressure_sensitivity(&self, item: &Item) -> Candidate<PressureSensitivity> {
        let category = Self::category(item);
        let name = Self::name(item);

        if mappings::HIGH_PRESSURE_CATEGORIES.contains(&category.as_str()) {
            return Candidate::of(
                PressureSensitivity::High,
                90,
                format!("Category '{}' is highly pressure sensitive", category),
            );
        }

        if mappings::MEDIUM_PRESSURE_CATEGORIES.contains(&category.as_str()) {
            return Candidate::of(
                PressureSensitivity::Medium,
                85,
                format!("Category '{}' is moderately pressure sensitive", category),
            );
        }

        if mappings::GLASS_BOTTLE_CATEGORIES.contains(&category.as_str()) {
            return Candidate::of(
                PressureSensitivity::Medium,
                80,
                format!("Category '{}' contains glass (pressure sensitive)", category),
            );
        }

        if Self::find_keyword(&name, mappings::CRUSHABLE_KEYWORDS).is_some() {
            return Candidate::of(
                PressureSensitivity::High,
                75,
                "Item name indicates crushable product",
            );
        }

        Candidate::of(
            PressureSensitivity::Low,
            50,
            "No high pressure sensitivity indicators",
        )
    }

    // ==========================================
    // 堆叠能力（派生属性）
    // ==========================================

    /// 计算堆叠能力
    ///
    /// # 规则
    /// 输入为**最终解析值**（覆写/默认值同样生效）:
    /// - 易碎 YES → NO
    /// - 受压 high → NO
    /// - 易碎 SEMI 或 受压 medium → LIMITED
    /// - 其他 → YES
    ///
    /// # 置信度
    /// - 两个前置属性均已解析 → 70
    /// - 任一缺失 → 40（不确定性向下游传播,不落库）
    pub fn compute_stackability(
        &self,
        fragility: Option<Fragility>,
        pressure: Option<PressureSensitivity>,
    ) -> Candidate<Stackability> {
        let both_resolved = fragility.is_some() && pressure.is_some();
        let confidence = if both_resolved { 70 } else { 40 };

        let (value, base_reason) = if fragility == Some(Fragility::Yes) {
            (Stackability::No, "Fragile items cannot be stacked")
        } else if pressure == Some(PressureSensitivity::High) {
            (Stackability::No, "High pressure sensitivity prevents stacking")
        } else if fragility == Some(Fragility::Semi) || pressure == Some(PressureSensitivity::Medium)
        {
            (
                Stackability::Limited,
                "Semi-fragile or medium pressure allows limited stacking",
            )
        } else {
            (Stackability::Yes, "No stacking restrictions identified")
        };

        let reason = if both_resolved {
            base_reason.to_string()
        } else {
            format!("{} (fragility/pressure incomplete)", base_reason)
        };

        Candidate {
            value: Some(value),
            confidence,
            reason,
        }
    }

    // ==========================================
    // 温度敏感度
    // ==========================================

    /// 计算温度敏感度
    ///
    /// # 规则
    /// - 冷链品类（FRO/ICE）→ cool_required,95
    /// - 怕热品类（CHO 等）→ heat_sensitive,90
    /// - 名称命中冷链关键词 → cool_required,80
    /// - 名称命中怕热关键词 → heat_sensitive,75
    /// - 其他 → normal,已识别品类 60 / 未知品类 40
    pub fn compute_temperature_sensitivity(&self, item: &Item) -> Candidate<TemperatureSensitivity> {
        let category = Self::category(item);
        let name = Self::name(item);

        if mappings::COOL_REQUIRED_CATEGORIES.contains(&category.as_str()) {
            return Candidate::of(
                TemperatureSensitivity::CoolRequired,
                95,
                format!("Category '{}' requires cold storage", category),
            );
        }

        if mappings::HEAT_SENSITIVE_CATEGORIES.contains(&category.as_str()) {
            return Candidate::of(
                TemperatureSensitivity::HeatSensitive,
                90,
                format!("Category '{}' is heat sensitive", category),
            );
        }

        if let Some(keyword) = Self::find_keyword(&name, mappings::COOL_REQUIRED_KEYWORDS) {
            return Candidate::of(
                TemperatureSensitivity::CoolRequired,
                80,
                format!("Item name contains cold keyword '{}'", keyword),
            );
        }

        if let Some(keyword) = Self::find_keyword(&name, mappings::HEAT_SENSITIVE_KEYWORDS) {
            return Candidate::of(
                TemperatureSensitivity::HeatSensitive,
                75,
                format!("Item name contains heat-sensitive keyword '{}'", keyword),
            );
        }

        if mappings::is_known_category(&category) {
            Candidate::of(
                TemperatureSensitivity::Normal,
                60,
                "No temperature sensitivity indicators",
            )
        } else {
            Candidate::of(
                TemperatureSensitivity::Normal,
                40,
                format!("Unknown category '{}', assuming normal temperature", category),
            )
        }
    }

    // ==========================================
    // 外形类型
    // ==========================================

    /// 计算外形类型
    pub fn compute_shape_type(&self, item: &Item) -> Candidate<ShapeType> {
        let category = Self::category(item);
        let name = Self::name(item);

        if mappings::ROUND_SHAPE_CATEGORIES.contains(&category.as_str()) {
            return Candidate::of(
                ShapeType::Round,
                80,
                format!("Category '{}' typically has round/cylindrical products", category),
            );
        }

        if mappings::FLAT_SHAPE_CATEGORIES.contains(&category.as_str()) {
            return Candidate::of(
                ShapeType::Flat,
                80,
                format!("Category '{}' typically has flat products", category),
            );
        }

        if Self::find_keyword(&name, mappings::CONTAINER_KEYWORDS).is_some() {
            return Candidate::of(ShapeType::Round, 70, "Item name indicates cylindrical container");
        }

        if Self::find_keyword(&name, mappings::MULTI_PIECE_KEYWORDS).is_some() {
            return Candidate::of(
                ShapeType::Irregular,
                65,
                "Item name indicates multi-piece or irregular shape",
            );
        }

        Candidate::of(ShapeType::Cubic, 55, "Default to cubic shape")
    }

    // ==========================================
    // 拣货难度（派生属性）
    // ==========================================

    /// 计算拣货难度 1-5
    ///
    /// # 规则
    /// 基准分 2,按重量/易碎/受压逐项抬升,上限 5:
    /// - 重量 >10kg → +2; >5kg → +1
    /// - 易碎 YES → +1
    /// - 受压 high → +1
    ///
    /// # 边界处理
    /// 重量缺失且易碎/受压均未解析 → 无值,置信度 40（不落库）
    pub fn compute_pick_difficulty(
        &self,
        item: &Item,
        fragility: Option<Fragility>,
        pressure: Option<PressureSensitivity>,
    ) -> Candidate<i32> {
        if item.weight_kg.is_none() && fragility.is_none() && pressure.is_none() {
            return Candidate::ambiguous(40, "Insufficient signals for pick difficulty");
        }

        let mut score = 2;
        let mut confidence = 60;
        let mut reasons: Vec<&str> = Vec::new();

        let weight = item.weight_kg.unwrap_or(0.0);
        if weight > 10.0 {
            score += 2;
            confidence = confidence.max(70);
            reasons.push("Heavy item (>10kg)");
        } else if weight > 5.0 {
            score += 1;
            confidence = confidence.max(65);
            reasons.push("Moderately heavy (>5kg)");
        }

        if fragility == Some(Fragility::Yes) {
            score += 1;
            confidence = confidence.max(70);
            reasons.push("Fragile item");
        }

        if pressure == Some(PressureSensitivity::High) {
            score += 1;
            confidence = confidence.max(70);
            reasons.push("High pressure sensitivity");
        }

        if reasons.is_empty() {
            reasons.push("Standard picking difficulty");
        }

        Candidate::of(score.clamp(1, 5), confidence, reasons.join("; "))
    }

    // ==========================================
    // 货架高度建议
    // ==========================================

    /// 计算货架高度建议
    pub fn compute_shelf_height(&self, item: &Item) -> Candidate<ShelfHeight> {
        let weight = item.weight_kg.unwrap_or(0.0);

        if weight > 8.0 {
            return Candidate::of(ShelfHeight::Low, 70, "Heavy item (>8kg) should be on low shelf");
        }

        if weight > 4.0 {
            return Candidate::of(ShelfHeight::Mid, 60, "Medium weight item");
        }

        Candidate::ambiguous(35, "Weight data insufficient for shelf height recommendation")
    }

    // ==========================================
    // 装箱位置规则（派生属性）
    // ==========================================

    /// 计算装箱位置规则
    ///
    /// # 规则
    /// 输入为**最终解析值**,按优先级命中即返回:
    /// 1) 温度 heat_sensitive 且夏季模式 → COOLER_BAG,90
    /// 2) 漏液 且 重量 >2kg → BOTTOM,85
    /// 3) 易碎 YES → TOP,85
    /// 4) 受压 high → TOP,80
    /// 5) 漏液 → BOTTOM,70
    /// 6) 易碎与受压均未解析 → 无值,40
    /// 7) 其他 → MIDDLE,65
    ///
    /// # 置信度
    /// 任一前置属性（易碎/漏液/受压/温度）未解析时封顶 65,
    /// 保证 ≥75 仅出现在前置齐备的情况下
    pub fn compute_box_fit_rule(
        &self,
        item: &Item,
        fragility: Option<Fragility>,
        spill_risk: Option<bool>,
        pressure: Option<PressureSensitivity>,
        temperature: Option<TemperatureSensitivity>,
        summer_mode: bool,
    ) -> Candidate<BoxFitRule> {
        let all_resolved = fragility.is_some()
            && spill_risk.is_some()
            && pressure.is_some()
            && temperature.is_some();

        let weight = item.weight_kg.unwrap_or(0.0);
        let spill = spill_risk.unwrap_or(false);

        let candidate = if temperature == Some(TemperatureSensitivity::HeatSensitive) && summer_mode
        {
            Candidate::of(
                BoxFitRule::CoolerBag,
                90,
                "Heat-sensitive item in summer mode",
            )
        } else if spill && weight > 2.0 {
            Candidate::of(BoxFitRule::Bottom, 85, "Heavy liquid should go at bottom")
        } else if fragility == Some(Fragility::Yes) {
            Candidate::of(BoxFitRule::Top, 85, "Fragile item should go on top")
        } else if pressure == Some(PressureSensitivity::High) {
            Candidate::of(BoxFitRule::Top, 80, "Pressure-sensitive item should go on top")
        } else if spill {
            Candidate::of(BoxFitRule::Bottom, 70, "Liquid item should go at bottom")
        } else if fragility.is_none() && pressure.is_none() {
            Candidate::ambiguous(40, "Missing data for box-fit determination")
        } else {
            Candidate::of(BoxFitRule::Middle, 65, "Standard item goes in middle")
        };

        if all_resolved {
            candidate
        } else {
            Candidate {
                confidence: candidate.confidence.min(65),
                reason: format!("{} (prerequisites incomplete)", candidate.reason),
                ..candidate
            }
        }
    }

    // ==========================================
    // 仓储区域
    // ==========================================

    /// 计算仓储区域
    pub fn compute_zone(
        &self,
        item: &Item,
        temperature: Option<TemperatureSensitivity>,
    ) -> Candidate<WarehouseZone> {
        let category = Self::category(item);

        if let Some(zone) = mappings::zone_for_category(&category) {
            return Candidate::of(
                zone,
                85,
                format!("Category '{}' maps to zone '{}'", category, zone),
            );
        }

        if matches!(
            temperature,
            Some(TemperatureSensitivity::HeatSensitive) | Some(TemperatureSensitivity::CoolRequired)
        ) {
            return Candidate::of(
                WarehouseZone::Sensitive,
                80,
                "Temperature-sensitive item goes to SENSITIVE zone",
            );
        }

        Candidate::of(WarehouseZone::Main, 60, "Default zone assignment")
    }
}

impl Default for RuleEvaluator {
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

    fn item_with(category: &str, name: &str) -> Item {
        Item {
            item_code: "IT0001".to_string(),
            item_name: Some(name.to_string()),
            category_code: Some(category.to_string()),
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

    #[test]
    fn test_spirits_category_signals() {
        // 场景: ALD（烈酒,玻璃瓶）
        let evaluator = RuleEvaluator::new();
        let item = item_with("ALD", "Premium Vodka 700ml");

        let fragility = evaluator.compute_fragility(&item);
        assert_eq!(fragility.value, Some(Fragility::Yes));
        assert!(fragility.confidence >= 85);

        let spill = evaluator.compute_spill_risk(&item);
        assert_eq!(spill.value, Some(true));
        assert!(spill.confidence >= 75);

        let shape = evaluator.compute_shape_type(&item);
        assert_eq!(shape.value, Some(ShapeType::Round));
    }

    #[test]
    fn test_unit_type_recognized_and_unknown() {
        let evaluator = RuleEvaluator::new();

        let mut item = item_with("MIS", "Widget");
        item.attr1_code = Some("VPACK".to_string());
        let c = evaluator.compute_unit_type(&item);
        assert_eq!(c.value, Some(UnitType::VirtualPack));
        assert_eq!(c.confidence, 90);

        // 未知代码: 兜底 item,置信度 40（低于阈值,不会落库）
        item.attr1_code = Some("XXX".to_string());
        let c = evaluator.compute_unit_type(&item);
        assert_eq!(c.value, Some(UnitType::Item));
        assert_eq!(c.confidence, 40);
    }

    #[test]
    fn test_spill_risk_volume_token() {
        let evaluator = RuleEvaluator::new();
        let item = item_with("MIS", "Mystery refill 250 ml");
        let c = evaluator.compute_spill_risk(&item);
        assert_eq!(c.value, Some(true));
        assert_eq!(c.confidence, 75);
    }

    #[test]
    fn test_spill_risk_no_indicators() {
        let evaluator = RuleEvaluator::new();
        let item = item_with("TOY", "Wooden puzzle");
        let c = evaluator.compute_spill_risk(&item);
        assert_eq!(c.value, Some(false));
        assert_eq!(c.confidence, 30);
    }

    #[test]
    fn test_stackability_requires_both_inputs() {
        let evaluator = RuleEvaluator::new();

        // 两个前置齐备 → 70
        let c = evaluator
            .compute_stackability(Some(Fragility::No), Some(PressureSensitivity::Low));
        assert_eq!(c.value, Some(Stackability::Yes));
        assert_eq!(c.confidence, 70);

        // 任一缺失 → 40（即便值可判定）
        let c = evaluator.compute_stackability(Some(Fragility::Yes), None);
        assert_eq!(c.value, Some(Stackability::No));
        assert_eq!(c.confidence, 40);
    }

    #[test]
    fn test_stackability_table() {
        let evaluator = RuleEvaluator::new();

        let c = evaluator
            .compute_stackability(Some(Fragility::Yes), Some(PressureSensitivity::Low));
        assert_eq!(c.value, Some(Stackability::No));

        let c = evaluator
            .compute_stackability(Some(Fragility::No), Some(PressureSensitivity::High));
        assert_eq!(c.value, Some(Stackability::No));

        let c = evaluator
            .compute_stackability(Some(Fragility::Semi), Some(PressureSensitivity::Low));
        assert_eq!(c.value, Some(Stackability::Limited));

        let c = evaluator
            .compute_stackability(Some(Fragility::No), Some(PressureSensitivity::Medium));
        assert_eq!(c.value, Some(Stackability::Limited));
    }

    #[test]
    fn test_temperature_unknown_category_low_confidence() {
        let evaluator = RuleEvaluator::new();

        let c = evaluator.compute_temperature_sensitivity(&item_with("ZZZ", "Unknown thing"));
        assert_eq!(c.value, Some(TemperatureSensitivity::Normal));
        assert_eq!(c.confidence, 40);

        let c = evaluator.compute_temperature_sensitivity(&item_with("CHO", "Dark chocolate bar"));
        assert_eq!(c.value, Some(TemperatureSensitivity::HeatSensitive));
        assert_eq!(c.confidence, 90);

        let c = evaluator.compute_temperature_sensitivity(&item_with("FRO", "Frozen peas"));
        assert_eq!(c.value, Some(TemperatureSensitivity::CoolRequired));
        assert_eq!(c.confidence, 95);
    }

    #[test]
    fn test_pick_difficulty_insufficient_signals() {
        let evaluator = RuleEvaluator::new();
        let item = item_with("ZZZ", "Unknown thing");

        let c = evaluator.compute_pick_difficulty(&item, None, None);
        assert_eq!(c.value, None);
        assert!(c.confidence < 60);
    }

    #[test]
    fn test_pick_difficulty_composite() {
        let evaluator = RuleEvaluator::new();
        let mut item = item_with("ALD", "Whisky case");
        item.weight_kg = Some(12.0);

        // 2 + 2(重) + 1(易碎) = 5
        let c = evaluator.compute_pick_difficulty(&item, Some(Fragility::Yes), None);
        assert_eq!(c.value, Some(5));
        assert_eq!(c.confidence, 70);
    }

    #[test]
    fn test_box_fit_cooler_bag_only_in_summer() {
        let evaluator = RuleEvaluator::new();
        let item = item_with("CHO", "Chocolate pralines");

        let c = evaluator.compute_box_fit_rule(
            &item,
            Some(Fragility::Yes),
            Some(false),
            Some(PressureSensitivity::Medium),
            Some(TemperatureSensitivity::HeatSensitive),
            true,
        );
        assert_eq!(c.value, Some(BoxFitRule::CoolerBag));
        assert_eq!(c.confidence, 90);

        // 非夏季: 同样的输入落到易碎 → TOP
        let c = evaluator.compute_box_fit_rule(
            &item,
            Some(Fragility::Yes),
            Some(false),
            Some(PressureSensitivity::Medium),
            Some(TemperatureSensitivity::HeatSensitive),
            false,
        );
        assert_eq!(c.value, Some(BoxFitRule::Top));
    }

    #[test]
    fn test_box_fit_confidence_capped_without_prerequisites() {
        let evaluator = RuleEvaluator::new();
        let mut item = item_with("ALD", "Olive oil 1 l");
        item.weight_kg = Some(3.0);

        // 温度未解析 → 即便命中 BOTTOM,置信度封顶 65
        let c = evaluator.compute_box_fit_rule(
            &item,
            Some(Fragility::No),
            Some(true),
            Some(PressureSensitivity::Low),
            None,
            false,
        );
        assert_eq!(c.value, Some(BoxFitRule::Bottom));
        assert!(c.confidence <= 65);
    }

    #[test]
    fn test_zone_mapping() {
        let evaluator = RuleEvaluator::new();

        let c = evaluator.compute_zone(&item_with("SNA", "Potato chips"), None);
        assert_eq!(c.value, Some(WarehouseZone::Snacks));

        let c = evaluator.compute_zone(
            &item_with("MIS", "Candles"),
            Some(TemperatureSensitivity::HeatSensitive),
        );
        assert_eq!(c.value, Some(WarehouseZone::Sensitive));

        let c = evaluator.compute_zone(&item_with("MIS", "Widget"), None);
        assert_eq!(c.value, Some(WarehouseZone::Main));
    }
}
