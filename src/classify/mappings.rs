// ==========================================
// 仓储运营智能系统 - 分类启发式映射表
// ==========================================
// 职责: 集中维护品类代码集合与名称关键词表
// 说明: 调整分类行为只需改此文件,不动规则逻辑
// ==========================================

use crate::domain::types::{Fragility, WarehouseZone};

// ===== 液体品类（漏液风险）=====
// 酒类 / 饮料 / 清洁剂 / 油醋酱汁 / 液态乳品
pub const LIQUID_CATEGORIES: &[&str] = &[
    "ALD", "ALE", "ALW", "ALB", // 酒类
    "BEV", "JUI", "SOF", "WAT", "ENE", "SOD", // 饮料
    "CLN", "DET", "FAB", // 清洁用品
    "OIL", "VIN", "SAU", // 油/醋/酱
    "MIL", "CRE", // 液态乳品
];

// ===== 玻璃瓶品类 =====
pub const GLASS_BOTTLE_CATEGORIES: &[&str] = &[
    "ALD", "ALE", "ALW", "ALB", // 玻璃瓶装酒类
    "OLV", "VIN", // 玻璃瓶装油醋
];

// ===== 易碎品类（已知易碎等级）=====
pub const FRAGILE_CATEGORIES: &[(&str, Fragility)] = &[
    ("CHO", Fragility::Yes),  // 巧克力（易融易碎）
    ("BIS", Fragility::Semi), // 饼干
    ("SNA", Fragility::Yes),  // 膨化零食
    ("EGG", Fragility::Yes),  // 蛋类
    ("CER", Fragility::Semi), // 麦片（纸盒易压）
    ("ALD", Fragility::Yes),  // 玻璃瓶烈酒
    ("ALE", Fragility::Yes),  // 玻璃瓶葡萄酒
    ("ALB", Fragility::Semi), // 啤酒（玻璃/罐混合）
    ("GLA", Fragility::Yes),  // 玻璃制品
    ("CRI", Fragility::Yes),  // 薯片
    ("POR", Fragility::Yes),  // 瓷器
];

// ===== 温度敏感品类 =====
pub const HEAT_SENSITIVE_CATEGORIES: &[&str] = &["CHO", "CAN", "WAX"]; // 巧克力/蜡烛/蜡制品
pub const COOL_REQUIRED_CATEGORIES: &[&str] = &["FRO", "ICE"]; // 冷冻/冰淇淋

// ===== 受压敏感品类 =====
pub const HIGH_PRESSURE_CATEGORIES: &[&str] = &["SNA", "CRI", "BRE"]; // 零食/薯片/面包
pub const MEDIUM_PRESSURE_CATEGORIES: &[&str] = &["CER", "BIS", "ALD", "ALE", "EGG"];

// ===== 外形品类 =====
pub const ROUND_SHAPE_CATEGORIES: &[&str] = &[
    "ALD", "ALE", "ALB", "ALW", // 酒瓶
    "BEV", "JUI", "SOF", "WAT", "ENE", "SOD", // 饮料瓶罐
    "OIL", "VIN", // 油醋瓶
    "CLN", "DET", // 喷壶/清洁瓶
    "CAN", // 罐装
];
pub const FLAT_SHAPE_CATEGORIES: &[&str] = &["MAG", "BOO", "PAP", "ENV"]; // 杂志/书/纸品/信封

// ===== 区域映射 =====
pub const ZONE_CATEGORY_MAP: &[(&str, WarehouseZone)] = &[
    ("CHO", WarehouseZone::Sensitive),
    ("SNA", WarehouseZone::Snacks),
    ("CRI", WarehouseZone::Snacks),
    ("FRO", WarehouseZone::Sensitive),
    ("ICE", WarehouseZone::Sensitive),
];

// ===== 名称关键词 =====
pub const LIQUID_KEYWORDS: &[&str] = &[
    "ml", "lt", "ltr", "litre", "liter", "bottle", "spray", "liquid", "juice", "water", "oil",
    "vinegar", "sauce", "syrup", "drink", "beverage", "wine", "beer", "spirit", "vodka", "whisky",
    "gin", "shampoo", "conditioner", "detergent", "cleaner", "bleach",
];

pub const FRAGILE_KEYWORDS: &[&str] = &[
    "glass", "fragile", "delicate", "crystal", "porcelain", "ceramic", "chocolate", "egg", "chip",
    "crisp", "wafer",
];

pub const CRUSHABLE_KEYWORDS: &[&str] = &["chip", "crisp", "wafer"];

pub const HEAT_SENSITIVE_KEYWORDS: &[&str] = &["chocolate", "candy", "candle", "wax"];
pub const COOL_REQUIRED_KEYWORDS: &[&str] = &["ice cream", "frozen"];

pub const CONTAINER_KEYWORDS: &[&str] = &["bottle", "can", "jar", "spray"];
pub const MULTI_PIECE_KEYWORDS: &[&str] = &["set", "kit", "organizer", "combo"];

// ===== 单位类型映射（attr1_code → 单位类型存储值）=====
pub const UNIT_TYPE_MAP: &[(&str, &str)] = &[
    ("VPACK", "virtual_pack"),
    ("PAC", "pack"),
    ("BOX", "box"),
    ("CASE", "case"),
    ("ITEM", "item"),
    ("EA", "item"),
    ("PC", "item"),
    ("PCS", "item"),
];

/// 查询已知易碎品类
pub fn fragile_category(category: &str) -> Option<Fragility> {
    FRAGILE_CATEGORIES
        .iter()
        .find(|(code, _)| *code == category)
        .map(|(_, level)| *level)
}

/// 查询区域映射
pub fn zone_for_category(category: &str) -> Option<WarehouseZone> {
    ZONE_CATEGORY_MAP
        .iter()
        .find(|(code, _)| *code == category)
        .map(|(_, zone)| *zone)
}

/// 查询单位类型映射
pub fn unit_type_code(attr1: &str) -> Option<&'static str> {
    UNIT_TYPE_MAP
        .iter()
        .find(|(code, _)| *code == attr1)
        .map(|(_, unit)| *unit)
}

/// 品类是否在已知品类全集中
///
/// 用于"常温"判定的置信度分档（识别品类 60 / 未知品类 40）
pub fn is_known_category(category: &str) -> bool {
    LIQUID_CATEGORIES.contains(&category)
        || GLASS_BOTTLE_CATEGORIES.contains(&category)
        || HEAT_SENSITIVE_CATEGORIES.contains(&category)
        || COOL_REQUIRED_CATEGORIES.contains(&category)
        || HIGH_PRESSURE_CATEGORIES.contains(&category)
        || MEDIUM_PRESSURE_CATEGORIES.contains(&category)
        || ROUND_SHAPE_CATEGORIES.contains(&category)
        || FLAT_SHAPE_CATEGORIES.contains(&category)
        || FRAGILE_CATEGORIES.iter().any(|(code, _)| *code == category)
        || ZONE_CATEGORY_MAP.iter().any(|(code, _)| *code == category)
}
