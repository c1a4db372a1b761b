// ==========================================
// 仓储运营智能系统 - 估算层
// ==========================================
// 职责: 库位解析 + 行走/拣货/打包耗时模型 + 订单估算编排
// 红线: 纯函数模型,参数显式传入,无隐藏状态与随机性
// ==========================================

pub mod engine;
pub mod error;
pub mod location;
pub mod pack;
pub mod params;
pub mod pick;
pub mod travel;

pub use engine::{BatchEstimateOutcome, LineEstimate, OrderEstimate, TimeEstimator};
pub use error::{EstimateError, EstimateResult};
pub use location::{LocationParseError, LocationPattern, LocationSpec, PatternError};
pub use pack::{PackEngine, PackResult};
pub use params::{
    HandlingSeconds, LocationParams, OverheadParams, PackParams, ParamsError, ParamsResult,
    PickParams, TimeParams, TravelParams, ESTIMATOR_VERSION,
};
pub use pick::PickEngine;
pub use travel::{Stop, TravelBreakdown, TravelEngine};
