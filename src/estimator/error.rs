// ==========================================
// 仓储运营智能系统 - 估算模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::estimator::location::PatternError;
use crate::estimator::params::ParamsError;
use thiserror::Error;

/// 估算模块错误类型
#[derive(Error, Debug)]
pub enum EstimateError {
    // ===== 输入错误 =====
    #[error("订单行数量非法 (订单 {order_no}, 行 {line_no}): {qty}（期望 ≥1）")]
    InvalidQuantity {
        order_no: String,
        line_no: i32,
        qty: i64,
    },

    // ===== 参数错误 =====
    #[error("库位模式编译失败: {0}")]
    Pattern(#[from] PatternError),

    #[error("估算参数非法: {0}")]
    Params(#[from] ParamsError),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type EstimateResult<T> = Result<T, EstimateError>;
