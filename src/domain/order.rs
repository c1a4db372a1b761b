// ==========================================
// 仓储运营智能系统 - 订单领域模型
// ==========================================
// 对齐: orders / order_lines / oi_estimate_run / oi_estimate_line 表
// 用途: 订单与订单行由外部系统维护,核心层只读;
//       预估耗时字段由时间估算引擎写回
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Order - 订单
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_no: String, // 订单号（主键）
    pub status: Option<String>,
    pub total_exp_minutes: Option<f64>, // 预估总耗时（分钟,估算引擎写回）
}

// ==========================================
// OrderLine - 订单行
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub order_no: String,
    pub line_no: i32,
    pub item_code: String,
    pub location: Option<String>,      // 库位字符串（如 "10-01-A02"）
    pub zone: Option<String>,          // 区域标记（外部标注,用于跨区惩罚）
    pub unit_type_raw: Option<String>, // 原始单位代码（未归一化）
    pub qty: i64,                      // 数量（≥1）
    pub exp_minutes: Option<f64>,      // 预估拣货耗时（分钟,估算引擎写回）
}

// ==========================================
// EstimateRun - 估算运行快照
// ==========================================
// 红线: 仅追加;参数快照随运行记录落盘,保证可追溯复算
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateRun {
    pub run_id: String, // UUID
    pub order_no: String,
    pub estimator_version: String,
    pub params_snapshot_json: String, // 本次运行使用的参数快照
    pub summer_mode: bool,
    pub estimated_total_seconds: f64,
    pub estimated_travel_seconds: f64,
    pub estimated_pick_seconds: f64,
    pub estimated_pack_seconds: f64,
    pub breakdown_json: String, // 四段分解（JSON,含诊断信息）
    pub reason: String,         // 触发原因（manual/batch/...）
    pub created_at: DateTime<Utc>,
}

// ==========================================
// EstimateLine - 估算行快照
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateLine {
    pub run_id: String,
    pub order_no: String,
    pub line_no: i32,
    pub item_code: String,
    pub location: Option<String>,
    pub unit_type_normalized: String,
    pub qty: i64,
    pub estimated_pick_seconds: f64,
}
