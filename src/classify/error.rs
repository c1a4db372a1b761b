// ==========================================
// 仓储运营智能系统 - 分类模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 分类模块错误类型
#[derive(Error, Debug)]
pub enum ClassifyError {
    // ===== 配置错误 =====
    #[error("置信度阈值非法: {value}（期望 0-100）")]
    InvalidThreshold { value: i32 },

    // ===== 审计证据错误 =====
    #[error("证据序列化失败 (item: {item_code}): {message}")]
    EvidenceSerialization { item_code: String, message: String },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ClassifyResult<T> = Result<T, ClassifyError>;
