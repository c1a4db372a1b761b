// ==========================================
// 仓储运营智能系统 - 时间估算参数
// ==========================================
// 职责: 强类型参数结构 + 默认值填充 + 载入时校验
// 红线: 在载入边界一次性校验,热路径内不再临时校验;
//       校验失败整体拒绝,绝不带着半合并配置运行
// ==========================================

use crate::domain::types::UnitType;
use crate::estimator::location::{LocationPattern, PatternError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// 估算器版本标识（随参数快照落入审计记录）
pub const ESTIMATOR_VERSION: &str = "oi_estimator_v1";

// ==========================================
// 参数错误类型
// ==========================================
#[derive(Error, Debug)]
pub enum ParamsError {
    #[error("参数缺少必需顶层键: {section}")]
    MissingSection { section: &'static str },

    #[error("参数值非法 (key: {key}): {value} 不得为负")]
    NegativeValue { key: String, value: f64 },

    #[error("上楼步行系数非法: {value}（期望 > 0）")]
    InvalidMultiplier { value: f64 },

    #[error("库位模式非法: {0}")]
    InvalidPattern(#[from] PatternError),

    #[error("参数 JSON 解析失败: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result 类型别名
pub type ParamsResult<T> = Result<T, ParamsError>;

// ==========================================
// 库位参数
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationParams {
    /// 库位结构模式: C=走廊位, B=货架位, L=层位, P=格位, 其余为字面量
    pub pattern: String,
    /// 上层走廊集合（命中即视为楼上库位）
    pub upper_floor_corridors: Vec<String>,
    /// 需要梯子的货架层
    pub ladder_levels: Vec<String>,
}

impl Default for LocationParams {
    fn default() -> Self {
        Self {
            pattern: "CC-BB-LPP".to_string(),
            upper_floor_corridors: vec!["70".to_string(), "80".to_string(), "90".to_string()],
            ladder_levels: vec!["C".to_string()],
        }
    }
}

fn zfill2(s: &str) -> String {
    format!("{:0>2}", s.trim())
}

impl LocationParams {
    /// 判定走廊是否属于上层
    pub fn is_upper_corridor(&self, corridor: &str) -> bool {
        let target = zfill2(corridor);
        self.upper_floor_corridors.iter().any(|c| zfill2(c) == target)
    }

    /// 判定货架层是否需要梯子
    pub fn is_ladder_level(&self, level: char) -> bool {
        self.ladder_levels
            .iter()
            .any(|l| l.trim().eq_ignore_ascii_case(&level.to_string()))
    }
}

// ==========================================
// 固定开销参数
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverheadParams {
    pub start_seconds: f64, // 接单/备箱
    pub end_seconds: f64,   // 收尾/交接
}

impl Default for OverheadParams {
    fn default() -> Self {
        Self {
            start_seconds: 45.0,
            end_seconds: 45.0,
        }
    }
}

// ==========================================
// 行走参数
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelParams {
    pub sec_align_per_stop: f64,       // 每个停靠点的对位时间
    pub sec_per_corridor_change: f64,  // 换走廊固定开销
    pub sec_per_corridor_step: f64,    // 每跨一条走廊
    pub sec_per_bay_step: f64,         // 同走廊内每跨一个货架
    pub sec_per_pos_step: f64,         // 同货架内每跨一个格位
    pub sec_stairs_up: f64,            // 上楼梯（每单一次）
    pub sec_stairs_down: f64,          // 下楼梯（每单一次）
    pub upper_walk_multiplier: f64,    // 上层行走系数
    pub zone_switch_seconds: f64,      // 跨区切换
}

impl Default for TravelParams {
    fn default() -> Self {
        Self {
            sec_align_per_stop: 13.0,
            sec_per_corridor_change: 14.0,
            sec_per_corridor_step: 4.0,
            sec_per_bay_step: 2.5,
            sec_per_pos_step: 0.6,
            sec_stairs_up: 25.0,
            sec_stairs_down: 20.0,
            upper_walk_multiplier: 1.05,
            zone_switch_seconds: 4.0,
        }
    }
}

// ==========================================
// 拣货参数
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PickParams {
    /// 首件基础时间（按单位类型）
    pub base_by_unit_type: BTreeMap<UnitType, f64>,
    /// 每追加一件的边际时间（按单位类型）
    pub per_qty_by_unit_type: BTreeMap<UnitType, f64>,
    /// 货架层附加时间
    pub level_seconds: BTreeMap<String, f64>,
    /// 拣货难度附加时间（键 "1"-"5"）
    pub difficulty_seconds: BTreeMap<String, f64>,
    /// 处置条件附加时间
    pub handling_seconds: HandlingSeconds,
    /// 梯子层附加时间
    pub ladder_seconds: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlingSeconds {
    pub fragility_yes: f64,
    pub fragility_semi: f64,
    pub spill_true: f64,
    pub pressure_high: f64,
    pub heat_sensitive_summer: f64,
}

impl Default for HandlingSeconds {
    fn default() -> Self {
        Self {
            fragility_yes: 6.0,
            fragility_semi: 3.0,
            spill_true: 5.0,
            pressure_high: 4.0,
            heat_sensitive_summer: 8.0,
        }
    }
}

impl Default for PickParams {
    fn default() -> Self {
        let base_by_unit_type = BTreeMap::from([
            (UnitType::Item, 6.0),
            (UnitType::Pack, 8.0),
            (UnitType::Box, 10.0),
            (UnitType::Case, 13.0),
            (UnitType::VirtualPack, 6.0),
        ]);
        let per_qty_by_unit_type = BTreeMap::from([
            (UnitType::Item, 1.1),
            (UnitType::Pack, 1.6),
            (UnitType::Box, 2.0),
            (UnitType::Case, 0.0),
            (UnitType::VirtualPack, 1.1),
        ]);
        let level_seconds = BTreeMap::from([
            ("A".to_string(), 0.0),
            ("B".to_string(), 2.0),
            ("C".to_string(), 12.0),
            ("D".to_string(), 14.0),
        ]);
        let difficulty_seconds = BTreeMap::from([
            ("1".to_string(), 0.0),
            ("2".to_string(), 2.0),
            ("3".to_string(), 6.0),
            ("4".to_string(), 12.0),
            ("5".to_string(), 20.0),
        ]);

        Self {
            base_by_unit_type,
            per_qty_by_unit_type,
            level_seconds,
            difficulty_seconds,
            handling_seconds: HandlingSeconds::default(),
            ladder_seconds: 15.0,
        }
    }
}

impl PickParams {
    /// 首件基础时间（未配置的单位类型回退到 item）
    pub fn base_for(&self, unit: UnitType) -> f64 {
        self.base_by_unit_type
            .get(&unit)
            .or_else(|| self.base_by_unit_type.get(&UnitType::Item))
            .copied()
            .unwrap_or(0.0)
    }

    /// 边际时间（未配置的单位类型回退到 item）
    pub fn per_qty_for(&self, unit: UnitType) -> f64 {
        self.per_qty_by_unit_type
            .get(&unit)
            .or_else(|| self.per_qty_by_unit_type.get(&UnitType::Item))
            .copied()
            .unwrap_or(0.0)
    }

    /// 货架层附加时间（未配置 → 0）
    pub fn level_seconds_for(&self, level: char) -> f64 {
        self.level_seconds
            .get(&level.to_uppercase().to_string())
            .copied()
            .unwrap_or(0.0)
    }

    /// 难度附加时间（难度为空或未配置 → 0）
    pub fn difficulty_seconds_for(&self, difficulty: Option<i32>) -> f64 {
        match difficulty {
            Some(d) => self
                .difficulty_seconds
                .get(&d.to_string())
                .copied()
                .unwrap_or(0.0),
            None => 0.0,
        }
    }
}

// ==========================================
// 打包参数
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackParams {
    pub base_seconds: f64,
    pub per_line_seconds: f64,
    pub special_group_seconds: f64, // 每个特殊处置组一次
}

impl Default for PackParams {
    fn default() -> Self {
        Self {
            base_seconds: 45.0,
            per_line_seconds: 3.0,
            special_group_seconds: 20.0,
        }
    }
}

// ==========================================
// TimeParams - 参数全集
// ==========================================
// 用途: 每次计算加载一份不可变快照,核心层绝不读环境态
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeParams {
    pub version: String,
    pub location: LocationParams,
    pub overhead: OverheadParams,
    pub travel: TravelParams,
    pub pick: PickParams,
    pub pack: PackParams,
}

impl Default for TimeParams {
    fn default() -> Self {
        Self {
            version: "v1".to_string(),
            location: LocationParams::default(),
            overhead: OverheadParams::default(),
            travel: TravelParams::default(),
            pick: PickParams::default(),
            pack: PackParams::default(),
        }
    }
}

impl TimeParams {
    /// 从 JSON 值载入参数
    ///
    /// # 规则
    /// - 顶层必须包含 travel / pick / pack 三个键,缺失整体拒绝
    /// - 未知键忽略,缺失的内层键用内置默认值填充
    /// - 载入后执行数值校验,任一非法即整体拒绝
    pub fn from_json(value: &serde_json::Value) -> ParamsResult<Self> {
        for section in ["travel", "pick", "pack"] {
            if value.get(section).is_none() {
                return Err(ParamsError::MissingSection { section });
            }
        }

        let params: TimeParams = serde_json::from_value(value.clone())?;
        params.validate()?;
        Ok(params)
    }

    /// 数值校验
    ///
    /// # 规则
    /// - 所有秒数参数 ≥ 0（耗时组件不得为负）
    /// - 上楼系数 > 0
    /// - 库位模式可编译
    pub fn validate(&self) -> ParamsResult<()> {
        let non_negative = [
            ("overhead.start_seconds", self.overhead.start_seconds),
            ("overhead.end_seconds", self.overhead.end_seconds),
            ("travel.sec_align_per_stop", self.travel.sec_align_per_stop),
            ("travel.sec_per_corridor_change", self.travel.sec_per_corridor_change),
            ("travel.sec_per_corridor_step", self.travel.sec_per_corridor_step),
            ("travel.sec_per_bay_step", self.travel.sec_per_bay_step),
            ("travel.sec_per_pos_step", self.travel.sec_per_pos_step),
            ("travel.sec_stairs_up", self.travel.sec_stairs_up),
            ("travel.sec_stairs_down", self.travel.sec_stairs_down),
            ("travel.zone_switch_seconds", self.travel.zone_switch_seconds),
            ("pick.ladder_seconds", self.pick.ladder_seconds),
            ("pick.handling_seconds.fragility_yes", self.pick.handling_seconds.fragility_yes),
            ("pick.handling_seconds.fragility_semi", self.pick.handling_seconds.fragility_semi),
            ("pick.handling_seconds.spill_true", self.pick.handling_seconds.spill_true),
            ("pick.handling_seconds.pressure_high", self.pick.handling_seconds.pressure_high),
            (
                "pick.handling_seconds.heat_sensitive_summer",
                self.pick.handling_seconds.heat_sensitive_summer,
            ),
            ("pack.base_seconds", self.pack.base_seconds),
            ("pack.per_line_seconds", self.pack.per_line_seconds),
            ("pack.special_group_seconds", self.pack.special_group_seconds),
        ];
        for (key, value) in non_negative {
            if value < 0.0 {
                return Err(ParamsError::NegativeValue {
                    key: key.to_string(),
                    value,
                });
            }
        }

        for (map_name, map) in [
            ("pick.base_by_unit_type", &self.pick.base_by_unit_type),
            ("pick.per_qty_by_unit_type", &self.pick.per_qty_by_unit_type),
        ] {
            for (unit, value) in map {
                if *value < 0.0 {
                    return Err(ParamsError::NegativeValue {
                        key: format!("{}.{}", map_name, unit),
                        value: *value,
                    });
                }
            }
        }
        for (map_name, map) in [
            ("pick.level_seconds", &self.pick.level_seconds),
            ("pick.difficulty_seconds", &self.pick.difficulty_seconds),
        ] {
            for (key, value) in map {
                if *value < 0.0 {
                    return Err(ParamsError::NegativeValue {
                        key: format!("{}.{}", map_name, key),
                        value: *value,
                    });
                }
            }
        }

        if self.travel.upper_walk_multiplier <= 0.0 {
            return Err(ParamsError::InvalidMultiplier {
                value: self.travel.upper_walk_multiplier,
            });
        }

        LocationPattern::compile(&self.location.pattern)?;

        Ok(())
    }
}
