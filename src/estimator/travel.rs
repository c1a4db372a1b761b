// ==========================================
// 仓储运营智能系统 - 行走耗时模型
// ==========================================
// 职责: 按规范行走顺序对订单的去重停靠点计费
// 红线: 不求解旅行商问题 —— 固定按楼层/走廊/货架/格位
//       升序的规范顺序计费;不可解析库位只计对位时间,
//       并在分解结果中显式暴露
// ==========================================

use crate::domain::order::OrderLine;
use crate::estimator::location::{LocationPattern, LocationSpec};
use crate::estimator::params::{LocationParams, TravelParams};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ==========================================
// Stop - 停靠点
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub location: LocationSpec,
    pub zone: String, // 区域标记（外部标注,跨区切换计费依据）
}

// ==========================================
// TravelBreakdown - 行走耗时分解
// ==========================================
// 总耗时恒等于各分量之和;分量不得为负
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TravelBreakdown {
    pub align_seconds: f64,
    pub zone_switch_seconds: f64,
    pub corridor_change_seconds: f64,
    pub walking_seconds: f64,
    pub stairs_seconds: f64,
    /// 不可解析的库位（诊断用,显式可见,绝不静默吞掉）
    pub unparsed_locations: Vec<String>,
}

impl TravelBreakdown {
    /// 行走总耗时（秒）
    pub fn total_seconds(&self) -> f64 {
        self.align_seconds
            + self.zone_switch_seconds
            + self.corridor_change_seconds
            + self.walking_seconds
            + self.stairs_seconds
    }
}

// ==========================================
// TravelEngine - 行走耗时引擎
// ==========================================
pub struct TravelEngine;

impl TravelEngine {
    /// 创建新的行走耗时引擎
    pub fn new() -> Self {
        Self
    }

    /// 从订单行构建去重停靠点
    ///
    /// # 返回
    /// (停靠点列表, 不可解析库位列表) —— 两者均按原始字符串去重
    pub fn build_stops(
        &self,
        lines: &[OrderLine],
        pattern: &LocationPattern,
        location: &LocationParams,
    ) -> (Vec<Stop>, Vec<String>) {
        let mut stops: Vec<Stop> = Vec::new();
        let mut seen_stops: HashSet<(String, String, String, char, String)> = HashSet::new();
        let mut unparsed: Vec<String> = Vec::new();
        let mut seen_unparsed: HashSet<String> = HashSet::new();

        for line in lines {
            let raw = line.location.as_deref().unwrap_or("");
            let zone = line
                .zone
                .as_deref()
                .unwrap_or("MAIN")
                .trim()
                .to_uppercase();

            match pattern.parse(raw, &location.upper_floor_corridors) {
                Ok(spec) => {
                    let key = (
                        zone.clone(),
                        spec.corridor.clone(),
                        spec.bay.clone(),
                        spec.level,
                        spec.position.clone(),
                    );
                    if seen_stops.insert(key) {
                        stops.push(Stop {
                            location: spec,
                            zone,
                        });
                    }
                }
                Err(_) => {
                    if seen_unparsed.insert(raw.to_string()) {
                        unparsed.push(raw.to_string());
                    }
                }
            }
        }

        (stops, unparsed)
    }

    /// 规范行走顺序排序
    ///
    /// # 规则
    /// 地面层优先,上层最后（每单一次上楼）;
    /// 同层内按 走廊 → 货架 → 层位 → 格位 升序
    pub fn order_stops(&self, mut stops: Vec<Stop>) -> Vec<Stop> {
        stops.sort_by_key(|s| {
            (
                s.location.is_upper_floor,
                s.location.corridor_num(),
                s.location.bay_num(),
                s.location.level,
                s.location.position_num(),
            )
        });
        stops
    }

    /// 估算行走耗时
    ///
    /// # 规则（逐对相邻停靠点）
    /// - 每个停靠点计 sec_align_per_stop（含不可解析停靠点）
    /// - 区域变化 → zone_switch_seconds
    /// - 走廊变化 → sec_per_corridor_change + sec_per_corridor_step·|Δ走廊|
    /// - 否则货架变化 → sec_per_bay_step·|Δ货架|
    /// - 否则 → sec_per_pos_step·|Δ格位|
    /// - 路段任一端在上层 → 该路段步行距离乘 upper_walk_multiplier
    /// - 存在任一上层停靠点 → 上下楼梯各计一次（每单,非每停靠点）
    pub fn estimate(
        &self,
        stops_ordered: &[Stop],
        unparsed: &[String],
        travel: &TravelParams,
    ) -> TravelBreakdown {
        let mut breakdown = TravelBreakdown {
            unparsed_locations: unparsed.to_vec(),
            ..TravelBreakdown::default()
        };

        // 对位时间: 可解析与不可解析的停靠点一视同仁
        breakdown.align_seconds =
            travel.sec_align_per_stop * (stops_ordered.len() + unparsed.len()) as f64;

        for pair in stops_ordered.windows(2) {
            let (prev, cur) = (&pair[0], &pair[1]);

            if prev.zone != cur.zone {
                breakdown.zone_switch_seconds += travel.zone_switch_seconds;
            }

            let mut walk;
            if prev.location.corridor_num() != cur.location.corridor_num() {
                breakdown.corridor_change_seconds += travel.sec_per_corridor_change;
                walk = travel.sec_per_corridor_step
                    * (prev.location.corridor_num() - cur.location.corridor_num()).abs() as f64;
            } else if prev.location.bay_num() != cur.location.bay_num() {
                walk = travel.sec_per_bay_step
                    * (prev.location.bay_num() - cur.location.bay_num()).abs() as f64;
            } else {
                walk = travel.sec_per_pos_step
                    * (prev.location.position_num() - cur.location.position_num()).abs() as f64;
            }

            if prev.location.is_upper_floor || cur.location.is_upper_floor {
                walk *= travel.upper_walk_multiplier;
            }
            breakdown.walking_seconds += walk;
        }

        // 楼梯开销: 每单一次,与上层停靠点数量无关
        if stops_ordered.iter().any(|s| s.location.is_upper_floor) {
            breakdown.stairs_seconds = travel.sec_stairs_up + travel.sec_stairs_down;
        }

        breakdown
    }
}

impl Default for TravelEngine {
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

    fn location_params() -> LocationParams {
        LocationParams::default()
    }

    fn pattern() -> LocationPattern {
        LocationPattern::compile("CC-BB-LPP").expect("模式编译失败")
    }

    fn stop(raw: &str, zone: &str) -> Stop {
        let params = location_params();
        Stop {
            location: pattern().parse(raw, &params.upper_floor_corridors).expect("解析失败"),
            zone: zone.to_string(),
        }
    }

    fn line(no: i32, location: &str, zone: &str) -> OrderLine {
        OrderLine {
            order_no: "SO1001".to_string(),
            line_no: no,
            item_code: format!("IT{:04}", no),
            location: Some(location.to_string()),
            zone: Some(zone.to_string()),
            unit_type_raw: None,
            qty: 1,
            exp_minutes: None,
        }
    }

    #[test]
    fn test_build_stops_dedup_and_unparsed() {
        let engine = TravelEngine::new();
        let lines = vec![
            line(1, "10-01-A02", "MAIN"),
            line(2, "10-01-A02", "MAIN"), // 同库位,去重
            line(3, "garbage", "MAIN"),
            line(4, "garbage", "MAIN"), // 同样去重
        ];
        let (stops, unparsed) = engine.build_stops(&lines, &pattern(), &location_params());
        assert_eq!(stops.len(), 1);
        assert_eq!(unparsed, vec!["garbage".to_string()]);
    }

    #[test]
    fn test_order_ground_before_upper() {
        let engine = TravelEngine::new();
        let ordered = engine.order_stops(vec![
            stop("70-01-A01", "MAIN"),
            stop("30-05-B03", "MAIN"),
            stop("10-02-A01", "MAIN"),
        ]);
        let corridors: Vec<&str> = ordered.iter().map(|s| s.location.corridor.as_str()).collect();
        assert_eq!(corridors, vec!["10", "30", "70"]);
    }

    #[test]
    fn test_stairs_charged_once_per_order() {
        // 场景: 走廊 10 与 70 各一个停靠点（一个上层）
        let engine = TravelEngine::new();
        let travel = TravelParams::default();
        let ordered = engine.order_stops(vec![stop("10-01-A02", "MAIN"), stop("70-02-C05", "MAIN")]);
        let breakdown = engine.estimate(&ordered, &[], &travel);
        assert_eq!(
            breakdown.stairs_seconds,
            travel.sec_stairs_up + travel.sec_stairs_down
        );

        // 上层停靠点加倍,楼梯费不变
        let ordered = engine.order_stops(vec![
            stop("10-01-A02", "MAIN"),
            stop("70-02-C05", "MAIN"),
            stop("70-03-A01", "MAIN"),
            stop("80-01-B02", "MAIN"),
        ]);
        let breakdown2 = engine.estimate(&ordered, &[], &travel);
        assert_eq!(breakdown2.stairs_seconds, breakdown.stairs_seconds);
    }

    #[test]
    fn test_corridor_delta_monotonic() {
        // 走廊差增大,总耗时不减
        let engine = TravelEngine::new();
        let travel = TravelParams::default();

        let near = engine.estimate(
            &engine.order_stops(vec![stop("10-01-A01", "MAIN"), stop("12-01-A01", "MAIN")]),
            &[],
            &travel,
        );
        let far = engine.estimate(
            &engine.order_stops(vec![stop("10-01-A01", "MAIN"), stop("30-01-A01", "MAIN")]),
            &[],
            &travel,
        );
        assert!(far.total_seconds() >= near.total_seconds());
    }

    #[test]
    fn test_segment_charge_is_exclusive() {
        let engine = TravelEngine::new();
        let travel = TravelParams::default();

        // 走廊变化: 只计走廊项,不叠加货架/格位差
        let b = engine.estimate(
            &engine.order_stops(vec![stop("10-01-A01", "MAIN"), stop("11-09-A09", "MAIN")]),
            &[],
            &travel,
        );
        assert_eq!(b.corridor_change_seconds, travel.sec_per_corridor_change);
        assert_eq!(b.walking_seconds, travel.sec_per_corridor_step * 1.0);

        // 同走廊货架变化: 只计货架项
        let b = engine.estimate(
            &engine.order_stops(vec![stop("10-01-A01", "MAIN"), stop("10-04-A09", "MAIN")]),
            &[],
            &travel,
        );
        assert_eq!(b.corridor_change_seconds, 0.0);
        assert_eq!(b.walking_seconds, travel.sec_per_bay_step * 3.0);

        // 同走廊同货架: 只计格位项
        let b = engine.estimate(
            &engine.order_stops(vec![stop("10-01-A01", "MAIN"), stop("10-01-B05", "MAIN")]),
            &[],
            &travel,
        );
        assert_eq!(b.walking_seconds, travel.sec_per_pos_step * 4.0);
    }

    #[test]
    fn test_zone_switch_charged_on_boundary() {
        let engine = TravelEngine::new();
        let travel = TravelParams::default();
        let ordered = engine.order_stops(vec![
            stop("10-01-A01", "MAIN"),
            stop("12-01-A01", "SNACKS"),
        ]);
        let b = engine.estimate(&ordered, &[], &travel);
        assert_eq!(b.zone_switch_seconds, travel.zone_switch_seconds);
    }

    #[test]
    fn test_unparsed_stop_contributes_align_only() {
        let engine = TravelEngine::new();
        let travel = TravelParams::default();

        let baseline = engine.estimate(
            &engine.order_stops(vec![stop("10-01-A01", "MAIN")]),
            &[],
            &travel,
        );
        let with_bad = engine.estimate(
            &engine.order_stops(vec![stop("10-01-A01", "MAIN")]),
            &["garbage".to_string()],
            &travel,
        );
        assert_eq!(
            with_bad.total_seconds(),
            baseline.total_seconds() + travel.sec_align_per_stop
        );
        assert_eq!(with_bad.unparsed_locations, vec!["garbage".to_string()]);
    }

    #[test]
    fn test_upper_multiplier_applies_to_upper_segment() {
        let engine = TravelEngine::new();
        let mut travel = TravelParams::default();
        travel.upper_walk_multiplier = 2.0;

        // 两个上层停靠点: 货架差 2
        let ordered = engine.order_stops(vec![stop("70-01-A01", "MAIN"), stop("70-03-A01", "MAIN")]);
        let b = engine.estimate(&ordered, &[], &travel);
        assert_eq!(b.walking_seconds, travel.sec_per_bay_step * 2.0 * 2.0);
    }
}
