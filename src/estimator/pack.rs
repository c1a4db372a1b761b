// ==========================================
// 仓储运营智能系统 - 打包耗时模型
// ==========================================
// 职责: 对订单全体行估算打包秒数
// 红线: 特殊处置组按"组"计费 —— 同组命中多行也只计一次
// ==========================================

use crate::domain::item::Item;
use crate::domain::order::OrderLine;
use crate::domain::types::{Fragility, PressureSensitivity, TemperatureSensitivity};
use crate::estimator::params::PackParams;
use serde::Serialize;
use std::collections::HashMap;

// ==========================================
// PackResult - 打包估算结果
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct PackResult {
    pub seconds: f64,
    /// 命中的特殊处置组（诊断用）
    pub special_groups: Vec<&'static str>,
}

// ==========================================
// PackEngine - 打包耗时引擎
// ==========================================
pub struct PackEngine;

impl PackEngine {
    /// 创建新的打包耗时引擎
    pub fn new() -> Self {
        Self
    }

    /// 估算订单打包秒数
    ///
    /// # 规则
    /// base_seconds + per_line_seconds·行数 + special_group_seconds·命中组数
    ///
    /// 特殊处置组（任一行命中即算,整单最多各一次）:
    /// - fragile: 易碎 YES 或 SEMI
    /// - spill_risk: 漏液
    /// - high_pressure: 受压 high
    /// - heat_sensitive_summer: 怕热 且 夏季模式开启
    pub fn pack_seconds(
        &self,
        lines: &[OrderLine],
        item_lookup: &HashMap<String, Item>,
        pack: &PackParams,
        summer_mode: bool,
    ) -> PackResult {
        let mut has_fragile = false;
        let mut has_spill = false;
        let mut has_pressure = false;
        let mut has_heat = false;

        for line in lines {
            let Some(item) = item_lookup.get(&line.item_code) else {
                continue;
            };

            if matches!(item.wms_fragility, Some(Fragility::Yes) | Some(Fragility::Semi)) {
                has_fragile = true;
            }
            if item.wms_spill_risk == Some(true) {
                has_spill = true;
            }
            if item.wms_pressure_sensitivity == Some(PressureSensitivity::High) {
                has_pressure = true;
            }
            if summer_mode
                && item.wms_temperature_sensitivity == Some(TemperatureSensitivity::HeatSensitive)
            {
                has_heat = true;
            }
        }

        let mut special_groups = Vec::new();
        if has_fragile {
            special_groups.push("fragile");
        }
        if has_spill {
            special_groups.push("spill_risk");
        }
        if has_pressure {
            special_groups.push("high_pressure");
        }
        if has_heat {
            special_groups.push("heat_sensitive_summer");
        }

        let seconds = pack.base_seconds
            + pack.per_line_seconds * lines.len() as f64
            + pack.special_group_seconds * special_groups.len() as f64;

        PackResult {
            seconds,
            special_groups,
        }
    }
}

impl Default for PackEngine {
    fn default() -> Self {
        Self::new()
    }
}
