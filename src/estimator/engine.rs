// ==========================================
// 仓储运营智能系统 - 时间估算编排引擎
// ==========================================
// 职责: 对单个订单解析库位 → 行走/拣货/打包估算 →
//       产出行级与单级耗时分解
// 红线: 参数为不可变快照,显式传入;相同输入产出相同结果;
//       批量估算必须有界,单个订单失败不得中断批次
// ==========================================

use crate::domain::item::Item;
use crate::domain::order::OrderLine;
use crate::estimator::error::{EstimateError, EstimateResult};
use crate::estimator::location::{LocationPattern, LocationSpec};
use crate::estimator::pack::{PackEngine, PackResult};
use crate::estimator::params::TimeParams;
use crate::estimator::pick::PickEngine;
use crate::estimator::travel::{TravelBreakdown, TravelEngine};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

// ==========================================
// LineEstimate - 行级估算结果
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct LineEstimate {
    pub line_no: i32,
    pub item_code: String,
    pub location: Option<String>,
    pub unit_type_normalized: String,
    pub qty: i64,
    pub pick_seconds: f64,
    pub pick_minutes: f64,
}

// ==========================================
// OrderEstimate - 单级估算结果
// ==========================================
// 恒等式: total_seconds = overhead + travel + pick + pack
#[derive(Debug, Clone, Serialize)]
pub struct OrderEstimate {
    pub order_no: String,
    pub total_seconds: f64,
    pub total_minutes: f64,
    pub overhead_seconds: f64,
    pub travel: TravelBreakdown,
    pub pick_seconds: f64,
    pub pack: PackResult,
    pub lines: Vec<LineEstimate>,
    pub summer_mode: bool,
    pub params_version: String,
}

impl OrderEstimate {
    fn empty(order_no: &str, summer_mode: bool, params_version: &str) -> Self {
        Self {
            order_no: order_no.to_string(),
            total_seconds: 0.0,
            total_minutes: 0.0,
            overhead_seconds: 0.0,
            travel: TravelBreakdown::default(),
            pick_seconds: 0.0,
            pack: PackResult {
                seconds: 0.0,
                special_groups: Vec::new(),
            },
            lines: Vec::new(),
            summer_mode,
            params_version: params_version.to_string(),
        }
    }
}

// ==========================================
// BatchEstimateOutcome - 批量估算结果
// ==========================================
#[derive(Debug, Clone)]
pub struct BatchEstimateOutcome {
    pub estimates: Vec<OrderEstimate>,
    /// 单订单失败明细: (order_no, 错误描述)
    pub failures: Vec<(String, String)>,
    /// 超出批次上限而本次未处理的订单数
    pub deferred: usize,
}

// ==========================================
// TimeEstimator - 时间估算编排引擎
// ==========================================
pub struct TimeEstimator {
    params: TimeParams,
    pattern: LocationPattern,
    summer_mode: bool,
    travel: TravelEngine,
    pick: PickEngine,
    pack: PackEngine,
}

impl TimeEstimator {
    /// 创建新的时间估算引擎
    ///
    /// # 参数
    /// - params: 参数快照（载入边界已校验）
    /// - summer_mode: 夏季模式开关（外部拥有）
    pub fn new(params: TimeParams, summer_mode: bool) -> EstimateResult<Self> {
        let pattern = LocationPattern::compile(&params.location.pattern)?;
        Ok(Self {
            params,
            pattern,
            summer_mode,
            travel: TravelEngine::new(),
            pick: PickEngine::new(),
            pack: PackEngine::new(),
        })
    }

    /// 当前参数快照
    pub fn params(&self) -> &TimeParams {
        &self.params
    }

    /// 夏季模式开关
    pub fn summer_mode(&self) -> bool {
        self.summer_mode
    }

    /// 估算单个订单
    ///
    /// # 规则
    /// total = overhead.start + overhead.end + travel(去重库位)
    ///       + Σ pick(行) + pack(全体行)
    /// totalMinutes = total / 60
    ///
    /// # 边界处理
    /// - 空订单 → 全零结果
    /// - 行数量 <1 → 整单报错（由批量层隔离）
    /// - 不可解析库位 → 行走只计对位,行级无层位附加,诊断可见
    #[instrument(skip(self, lines, item_lookup), fields(lines_count = lines.len()))]
    pub fn estimate_order(
        &self,
        order_no: &str,
        lines: &[OrderLine],
        item_lookup: &HashMap<String, Item>,
    ) -> EstimateResult<OrderEstimate> {
        if lines.is_empty() {
            return Ok(OrderEstimate::empty(
                order_no,
                self.summer_mode,
                &self.params.version,
            ));
        }

        for line in lines {
            if line.qty < 1 {
                return Err(EstimateError::InvalidQuantity {
                    order_no: order_no.to_string(),
                    line_no: line.line_no,
                    qty: line.qty,
                });
            }
        }

        // ===== 行走 =====
        let (stops, unparsed) =
            self.travel
                .build_stops(lines, &self.pattern, &self.params.location);
        let ordered = self.travel.order_stops(stops);
        let travel = self.travel.estimate(&ordered, &unparsed, &self.params.travel);
        if !travel.unparsed_locations.is_empty() {
            warn!(
                order_no,
                unparsed = ?travel.unparsed_locations,
                "订单包含不可解析库位,按对位时间计费"
            );
        }

        // ===== 拣货（行级）=====
        let mut line_estimates = Vec::with_capacity(lines.len());
        let mut pick_total = 0.0;
        for line in lines {
            let item = item_lookup.get(&line.item_code);
            let location: Option<LocationSpec> = line.location.as_deref().and_then(|raw| {
                self.pattern
                    .parse(raw, &self.params.location.upper_floor_corridors)
                    .ok()
            });

            let seconds = self.pick.line_seconds(
                line,
                item,
                location.as_ref(),
                &self.params.pick,
                &self.params.location,
                self.summer_mode,
            );
            pick_total += seconds;

            line_estimates.push(LineEstimate {
                line_no: line.line_no,
                item_code: line.item_code.clone(),
                location: line.location.clone(),
                unit_type_normalized: self.pick.unit_type_for(line, item).to_db_str().to_string(),
                qty: line.qty,
                pick_seconds: seconds,
                pick_minutes: seconds / 60.0,
            });
        }

        // ===== 打包 =====
        let pack = self
            .pack
            .pack_seconds(lines, item_lookup, &self.params.pack, self.summer_mode);

        // ===== 固定开销与汇总 =====
        let overhead = self.params.overhead.start_seconds + self.params.overhead.end_seconds;
        let total_seconds = overhead + travel.total_seconds() + pick_total + pack.seconds;

        debug!(
            order_no,
            total_seconds,
            travel_seconds = travel.total_seconds(),
            pick_seconds = pick_total,
            pack_seconds = pack.seconds,
            "订单估算完成"
        );

        Ok(OrderEstimate {
            order_no: order_no.to_string(),
            total_seconds,
            total_minutes: total_seconds / 60.0,
            overhead_seconds: overhead,
            travel,
            pick_seconds: pick_total,
            pack,
            lines: line_estimates,
            summer_mode: self.summer_mode,
            params_version: self.params.version.clone(),
        })
    }

    /// 批量估算（有界）
    ///
    /// # 参数
    /// - orders: (order_no, 订单行) 列表
    /// - max_batch_size: 单次调用处理上限,超出部分延后
    ///
    /// # 失败策略
    /// 单个订单失败记录并跳过,绝不中断剩余订单
    #[instrument(skip(self, orders, item_lookup), fields(orders_total = orders.len()))]
    pub fn estimate_batch(
        &self,
        orders: &[(String, Vec<OrderLine>)],
        item_lookup: &HashMap<String, Item>,
        max_batch_size: usize,
    ) -> BatchEstimateOutcome {
        let take = orders.len().min(max_batch_size);
        let deferred = orders.len() - take;
        if deferred > 0 {
            warn!(deferred, max_batch_size, "订单数超出批次上限,超出部分延后处理");
        }

        let mut estimates = Vec::with_capacity(take);
        let mut failures = Vec::new();

        for (order_no, lines) in &orders[..take] {
            match self.estimate_order(order_no, lines, item_lookup) {
                Ok(estimate) => estimates.push(estimate),
                Err(e) => {
                    warn!(order_no = %order_no, error = %e, "订单估算失败,跳过");
                    failures.push((order_no.clone(), e.to_string()));
                }
            }
        }

        BatchEstimateOutcome {
            estimates,
            failures,
            deferred,
        }
    }
}
