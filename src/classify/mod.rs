// ==========================================
// 仓储运营智能系统 - 分类层
// ==========================================
// 职责: 规则评估 → 优先级解析 → 置信度门控 → 运行编排
// 红线: 所有规则必须输出 reason;证据不足给低置信度,不猜测
// ==========================================

pub mod engine;
pub mod error;
pub mod mappings;
pub mod resolver;
pub mod rules;

pub use engine::{ClassificationEngine, ClassificationOutcome};
pub use error::{ClassifyError, ClassifyResult};
pub use resolver::{resolve, EvidenceEntry, EvidenceMap, Resolved};
pub use rules::{Candidate, RuleEvaluator};
