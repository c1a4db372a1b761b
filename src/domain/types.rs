// ==========================================
// 仓储运营智能系统 - 领域类型定义
// ==========================================
// 红线: 分类属性是封闭枚举集,不是开放字符串注册表
// 序列化格式: 与数据库存储字符串一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 单位类型 (Unit Type)
// ==========================================
// 来源: attr1_code 派生 + 订单行原始单位归一化
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    Item,        // 单件
    Pack,        // 小包装
    Box,         // 整盒
    Case,        // 整箱
    VirtualPack, // 虚拟组合包
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl UnitType {
    /// 从数据库存储字符串解析
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "item" => Some(UnitType::Item),
            "pack" => Some(UnitType::Pack),
            "box" => Some(UnitType::Box),
            "case" => Some(UnitType::Case),
            "virtual_pack" => Some(UnitType::VirtualPack),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            UnitType::Item => "item",
            UnitType::Pack => "pack",
            UnitType::Box => "box",
            UnitType::Case => "case",
            UnitType::VirtualPack => "virtual_pack",
        }
    }

    /// 归一化外部来源的单位代码
    ///
    /// # 规则
    /// - 识别常见别名（PCS/EA/PC/PIECE → item, PK/PAC → pack, BX → box, CS → case, VPACK → virtual_pack）
    /// - 无法识别 → None（由调用方决定兜底值）
    pub fn normalize(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "ITEM" | "EA" | "PC" | "PCS" | "PIECE" => Some(UnitType::Item),
            "PACK" | "PK" | "PAC" => Some(UnitType::Pack),
            "BOX" | "BX" => Some(UnitType::Box),
            "CASE" | "CS" => Some(UnitType::Case),
            "VPACK" | "VIRTUAL_PACK" => Some(UnitType::VirtualPack),
            _ => None,
        }
    }
}

// ==========================================
// 易碎等级 (Fragility)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Fragility {
    Yes,  // 易碎
    Semi, // 半易碎
    No,   // 不易碎
}

impl fmt::Display for Fragility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl Fragility {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "YES" => Some(Fragility::Yes),
            "SEMI" => Some(Fragility::Semi),
            "NO" => Some(Fragility::No),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            Fragility::Yes => "YES",
            Fragility::Semi => "SEMI",
            Fragility::No => "NO",
        }
    }
}

// ==========================================
// 受压敏感度 (Pressure Sensitivity)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureSensitivity {
    Low,    // 耐压
    Medium, // 中等
    High,   // 高度敏感（挤压即损）
}

impl fmt::Display for PressureSensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl PressureSensitivity {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(PressureSensitivity::Low),
            "medium" => Some(PressureSensitivity::Medium),
            "high" => Some(PressureSensitivity::High),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            PressureSensitivity::Low => "low",
            PressureSensitivity::Medium => "medium",
            PressureSensitivity::High => "high",
        }
    }
}

// ==========================================
// 堆叠能力 (Stackability)
// ==========================================
// 派生属性: 由最终易碎等级 + 受压敏感度计算
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stackability {
    Yes,     // 可堆叠
    Limited, // 限制堆叠
    No,      // 禁止堆叠
}

impl fmt::Display for Stackability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl Stackability {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "YES" => Some(Stackability::Yes),
            "LIMITED" => Some(Stackability::Limited),
            "NO" => Some(Stackability::No),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            Stackability::Yes => "YES",
            Stackability::Limited => "LIMITED",
            Stackability::No => "NO",
        }
    }
}

// ==========================================
// 温度敏感度 (Temperature Sensitivity)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureSensitivity {
    Normal,        // 常温
    HeatSensitive, // 怕热（夏季需冷袋）
    CoolRequired,  // 需冷藏
}

impl fmt::Display for TemperatureSensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl TemperatureSensitivity {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Some(TemperatureSensitivity::Normal),
            "heat_sensitive" => Some(TemperatureSensitivity::HeatSensitive),
            "cool_required" => Some(TemperatureSensitivity::CoolRequired),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            TemperatureSensitivity::Normal => "normal",
            TemperatureSensitivity::HeatSensitive => "heat_sensitive",
            TemperatureSensitivity::CoolRequired => "cool_required",
        }
    }
}

// ==========================================
// 外形类型 (Shape Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeType {
    Cubic,     // 方正
    Flat,      // 扁平
    Round,     // 圆柱/瓶罐
    Irregular, // 不规则
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl ShapeType {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cubic" => Some(ShapeType::Cubic),
            "flat" => Some(ShapeType::Flat),
            "round" => Some(ShapeType::Round),
            "irregular" => Some(ShapeType::Irregular),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            ShapeType::Cubic => "cubic",
            ShapeType::Flat => "flat",
            ShapeType::Round => "round",
            ShapeType::Irregular => "irregular",
        }
    }
}

// ==========================================
// 装箱位置规则 (Box Fit Rule)
// ==========================================
// 派生属性: 需要易碎/漏液/受压/温度已解析
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoxFitRule {
    Bottom,    // 箱底
    Middle,    // 中层
    Top,       // 顶层
    CoolerBag, // 冷袋
}

impl fmt::Display for BoxFitRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl BoxFitRule {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "BOTTOM" => Some(BoxFitRule::Bottom),
            "MIDDLE" => Some(BoxFitRule::Middle),
            "TOP" => Some(BoxFitRule::Top),
            "COOLER_BAG" => Some(BoxFitRule::CoolerBag),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            BoxFitRule::Bottom => "BOTTOM",
            BoxFitRule::Middle => "MIDDLE",
            BoxFitRule::Top => "TOP",
            BoxFitRule::CoolerBag => "COOLER_BAG",
        }
    }
}

// ==========================================
// 货架高度建议 (Shelf Height)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShelfHeight {
    Low,  // 低层（重物）
    Mid,  // 中层
    High, // 高层
}

impl fmt::Display for ShelfHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl ShelfHeight {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "LOW" => Some(ShelfHeight::Low),
            "MID" => Some(ShelfHeight::Mid),
            "HIGH" => Some(ShelfHeight::High),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            ShelfHeight::Low => "LOW",
            ShelfHeight::Mid => "MID",
            ShelfHeight::High => "HIGH",
        }
    }
}

// ==========================================
// 仓储区域 (Warehouse Zone)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarehouseZone {
    Main,          // 主拣货区
    Sensitive,     // 敏感品区（温控）
    Snacks,        // 零食区（防压）
    CrossShipping, // 越库直发区
}

impl fmt::Display for WarehouseZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl WarehouseZone {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "MAIN" => Some(WarehouseZone::Main),
            "SENSITIVE" => Some(WarehouseZone::Sensitive),
            "SNACKS" => Some(WarehouseZone::Snacks),
            "CROSS_SHIPPING" => Some(WarehouseZone::CrossShipping),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            WarehouseZone::Main => "MAIN",
            WarehouseZone::Sensitive => "SENSITIVE",
            WarehouseZone::Snacks => "SNACKS",
            WarehouseZone::CrossShipping => "CROSS_SHIPPING",
        }
    }
}

// ==========================================
// 分类来源 (Classification Source)
// ==========================================
// 红线: 优先级固定 MANUAL > CATEGORY_DEFAULT > RULES,运行期不可放宽
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassSource {
    Rules,           // 规则计算
    CategoryDefault, // 品类默认值
    Manual,          // 人工覆写
}

impl fmt::Display for ClassSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl ClassSource {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "RULES" => Some(ClassSource::Rules),
            "CATEGORY_DEFAULT" => Some(ClassSource::CategoryDefault),
            "MANUAL" => Some(ClassSource::Manual),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            ClassSource::Rules => "RULES",
            ClassSource::CategoryDefault => "CATEGORY_DEFAULT",
            ClassSource::Manual => "MANUAL",
        }
    }
}

// ==========================================
// 分类属性种类 (Attribute Kind)
// ==========================================
// 红线: 封闭枚举,穷举 match,缺失规则在编译期暴露
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    UnitType,
    SpillRisk,
    Fragility,
    PressureSensitivity,
    Stackability,
    TemperatureSensitivity,
    ShapeType,
    PickDifficulty,
    ShelfHeight,
    BoxFitRule,
    Zone,
}

impl AttributeKind {
    /// 证据记录中使用的属性键名
    pub fn name(&self) -> &'static str {
        match self {
            AttributeKind::UnitType => "unit_type",
            AttributeKind::SpillRisk => "spill_risk",
            AttributeKind::Fragility => "fragility",
            AttributeKind::PressureSensitivity => "pressure_sensitivity",
            AttributeKind::Stackability => "stackability",
            AttributeKind::TemperatureSensitivity => "temperature_sensitivity",
            AttributeKind::ShapeType => "shape_type",
            AttributeKind::PickDifficulty => "pick_difficulty",
            AttributeKind::ShelfHeight => "shelf_height",
            AttributeKind::BoxFitRule => "box_fit_rule",
            AttributeKind::Zone => "zone",
        }
    }

    /// 关键属性集合
    ///
    /// 参与整体置信度计算;任一关键属性为空即触发人工复核
    pub const CRITICAL: [AttributeKind; 5] = [
        AttributeKind::Fragility,
        AttributeKind::SpillRisk,
        AttributeKind::PressureSensitivity,
        AttributeKind::TemperatureSensitivity,
        AttributeKind::BoxFitRule,
    ];

    /// 判定是否为关键属性
    pub fn is_critical(&self) -> bool {
        Self::CRITICAL.contains(self)
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
