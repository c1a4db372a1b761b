// ==========================================
// 仓储运营智能系统 - 商品领域模型
// ==========================================
// 对齐: dw_item / wms_category_default / wms_item_override /
//       wms_classification_run 表
// 红线: 分类输出字段仅由分类引擎写入;原始信号由外部同步进程维护
// ==========================================

use crate::domain::types::{
    BoxFitRule, ClassSource, Fragility, PressureSensitivity, ShapeType, ShelfHeight, Stackability,
    TemperatureSensitivity, UnitType, WarehouseZone,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Item - 商品主数据
// ==========================================
// 用途: 外部同步进程写入原始信号,分类引擎写入 wms_* 输出
// 生命周期: 核心层不删除(停用由外部负责)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    // ===== 主键 =====
    pub item_code: String, // 商品唯一编码（SKU）

    // ===== 原始信号 =====
    pub item_name: Option<String>,     // 商品名称（自由文本）
    pub category_code: Option<String>, // 品类代码
    pub brand_code: Option<String>,    // 品牌代码
    pub attr1_code: Option<String>,    // 通用属性代码 1（单位类型来源）
    pub attr2_code: Option<String>,    // 通用属性代码 2
    pub attr3_code: Option<String>,    // 通用属性代码 3
    pub attr4_code: Option<String>,    // 通用属性代码 4
    pub attr5_code: Option<String>,    // 通用属性代码 5
    pub attr6_code: Option<String>,    // 通用属性代码 6
    pub length_cm: Option<f64>,        // 长（cm）
    pub width_cm: Option<f64>,         // 宽（cm）
    pub height_cm: Option<f64>,        // 高（cm）
    pub weight_kg: Option<f64>,        // 重量（kg）
    pub piece_count: Option<i32>,      // 内含件数
    pub active: bool,                  // 在售标志

    // ===== 分类输出（Classification Engine 写入）=====
    pub wms_zone: Option<WarehouseZone>,
    pub wms_unit_type: Option<UnitType>,
    pub wms_fragility: Option<Fragility>,
    pub wms_stackability: Option<Stackability>,
    pub wms_temperature_sensitivity: Option<TemperatureSensitivity>,
    pub wms_pressure_sensitivity: Option<PressureSensitivity>,
    pub wms_shape_type: Option<ShapeType>,
    pub wms_spill_risk: Option<bool>,
    pub wms_pick_difficulty: Option<i32>, // 1-5
    pub wms_shelf_height: Option<ShelfHeight>,
    pub wms_box_fit_rule: Option<BoxFitRule>,

    // ===== 审计字段 =====
    pub wms_class_confidence: Option<i32>,        // 整体置信度 0-100
    pub wms_class_source: Option<ClassSource>,    // 整体来源标记
    pub wms_class_notes: Option<String>,          // 可读摘要
    pub wms_class_evidence: Option<String>,       // 逐属性证据（JSON）
    pub wms_classified_at: Option<DateTime<Utc>>, // 最后分类时间
}

impl Item {
    /// 判定是否需要人工复核
    ///
    /// # 规则
    /// - 整体置信度 < threshold → 需要复核
    /// - 任一关键属性（易碎/漏液/受压/温度/装箱规则）为空 → 需要复核
    ///
    /// # 说明
    /// 派生事实,每次读取时计算,不单独存储（避免与输入漂移）
    pub fn needs_review(&self, threshold: i32) -> bool {
        if self.wms_class_confidence.unwrap_or(0) < threshold {
            return true;
        }

        self.wms_fragility.is_none()
            || self.wms_spill_risk.is_none()
            || self.wms_pressure_sensitivity.is_none()
            || self.wms_temperature_sensitivity.is_none()
            || self.wms_box_fit_rule.is_none()
    }
}

// ==========================================
// CategoryDefault - 品类默认值
// ==========================================
// 语义: 字段为 None 表示"不强制默认值",而非"强制置空"
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryDefault {
    pub category_code: String, // 品类代码（主键）
    pub is_active: bool,

    pub fragility: Option<Fragility>,
    pub spill_risk: Option<bool>,
    pub pressure_sensitivity: Option<PressureSensitivity>,
    pub stackability: Option<Stackability>,
    pub temperature_sensitivity: Option<TemperatureSensitivity>,
    pub shape_type: Option<ShapeType>,
    pub pick_difficulty: Option<i32>,
    pub shelf_height: Option<ShelfHeight>,
    pub box_fit_rule: Option<BoxFitRule>,
    pub zone: Option<WarehouseZone>,
}

// ==========================================
// ItemOverride - 单品人工覆写
// ==========================================
// 语义: 与 CategoryDefault 相同的可空字段语义,但优先级更高
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemOverride {
    pub item_code: String, // 商品编码（主键）
    pub is_active: bool,

    pub unit_type: Option<UnitType>,
    pub fragility: Option<Fragility>,
    pub spill_risk: Option<bool>,
    pub pressure_sensitivity: Option<PressureSensitivity>,
    pub stackability: Option<Stackability>,
    pub temperature_sensitivity: Option<TemperatureSensitivity>,
    pub shape_type: Option<ShapeType>,
    pub pick_difficulty: Option<i32>,
    pub shelf_height: Option<ShelfHeight>,
    pub box_fit_rule: Option<BoxFitRule>,
    pub zone: Option<WarehouseZone>,
}

// ==========================================
// ClassificationRun - 分类运行记录
// ==========================================
// 红线: 仅追加,不更新历史记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRun {
    pub run_id: String, // UUID
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub run_by: String,    // 触发人/系统标识
    pub threshold: i32,    // 本次运行使用的置信度阈值
    pub summer_mode: bool, // 本次运行的夏季模式开关

    // ===== 运行统计 =====
    pub items_scanned: i32,        // 扫描的在售商品数
    pub items_updated: i32,        // 任一字段发生变化的商品数
    pub items_needing_review: i32, // 需要人工复核的商品数
    pub items_failed: i32,         // 单品评估失败数（不中断运行）

    pub notes: Option<String>,
}
