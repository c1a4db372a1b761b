// ==========================================
// 仓储运营智能系统 - 属性解析引擎
// ==========================================
// 职责: 对单个属性应用固定优先级,得出最终值
// 红线: 优先级不可在运行期放宽:
//       人工覆写 > 品类默认值 > 规则结果(置信度≥阈值) > 空
// ==========================================

use crate::classify::rules::Candidate;
use crate::domain::types::{AttributeKind, ClassSource};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// Resolved - 属性最终解析结果
// ==========================================
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    pub value: Option<T>,
    pub confidence: i32,
    pub source: ClassSource,
    pub reason: String,
}

// ==========================================
// EvidenceEntry - 逐属性审计证据
// ==========================================
// 说明: 折叠进 Item 审计字段（JSON）;键序由 BTreeMap 保证,
//       重复运行产出逐字节一致
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceEntry {
    pub value: Option<serde_json::Value>,
    pub confidence: i32,
    pub source: ClassSource,
    pub reason: String,
}

/// 证据集合: 属性键名 → 证据
pub type EvidenceMap = BTreeMap<String, EvidenceEntry>;

impl<T: Serialize> Resolved<T> {
    /// 转换为审计证据条目
    pub fn evidence_entry(&self) -> Result<EvidenceEntry, serde_json::Error> {
        let value = match &self.value {
            Some(v) => Some(serde_json::to_value(v)?),
            None => None,
        };
        Ok(EvidenceEntry {
            value,
            confidence: self.confidence,
            source: self.source,
            reason: self.reason.clone(),
        })
    }
}

// ==========================================
// 核心解析
// ==========================================

/// 解析单个属性的最终值
///
/// # 规则（严格顺序,命中即返回）
/// 1) 覆写存在 → 覆写值,置信度 100,来源 MANUAL
/// 2) 默认值存在 → 默认值,置信度 85（固定）,来源 CATEGORY_DEFAULT
/// 3) 规则置信度 ≥ 阈值 → 规则值与置信度,来源 RULES
/// 4) 其他 → 空值,保留规则置信度供诊断,理由标记 AMBIGUOUS
///
/// # 边界处理
/// 阈值为闭下界: 置信度恰为阈值时落库,阈值-1 时置空
pub fn resolve<T: Clone>(
    kind: AttributeKind,
    candidate: &Candidate<T>,
    override_value: Option<T>,
    default_value: Option<T>,
    threshold: i32,
) -> Resolved<T> {
    if let Some(value) = override_value {
        return Resolved {
            value: Some(value),
            confidence: 100,
            source: ClassSource::Manual,
            reason: format!("MANUAL override for {}", kind),
        };
    }

    if let Some(value) = default_value {
        return Resolved {
            value: Some(value),
            confidence: 85,
            source: ClassSource::CategoryDefault,
            reason: format!("CATEGORY default for {}", kind),
        };
    }

    if candidate.confidence >= threshold {
        return Resolved {
            value: candidate.value.clone(),
            confidence: candidate.confidence,
            source: ClassSource::Rules,
            reason: candidate.reason.clone(),
        };
    }

    Resolved {
        value: None,
        confidence: candidate.confidence,
        source: ClassSource::Rules,
        reason: format!("AMBIGUOUS (<{}) – {}", threshold, candidate.reason),
    }
}

// ==========================================
// 整体聚合
// ==========================================

/// 计算整体置信度
///
/// # 规则
/// 取**已落库**关键属性置信度的算术平均（整数截断）;
/// 无任何关键属性落库 → 0
pub fn overall_confidence(evidence: &EvidenceMap) -> i32 {
    let confidences: Vec<i32> = AttributeKind::CRITICAL
        .iter()
        .filter_map(|kind| evidence.get(kind.name()))
        .filter(|entry| entry.value.is_some())
        .map(|entry| entry.confidence)
        .collect();

    if confidences.is_empty() {
        return 0;
    }

    confidences.iter().sum::<i32>() / confidences.len() as i32
}

/// 判定整体分类来源
///
/// # 规则
/// 任一属性来自 MANUAL → MANUAL;
/// 否则任一属性来自 CATEGORY_DEFAULT → CATEGORY_DEFAULT;
/// 否则 → RULES
pub fn class_source(evidence: &EvidenceMap) -> ClassSource {
    let mut has_default = false;

    for entry in evidence.values() {
        match entry.source {
            ClassSource::Manual => return ClassSource::Manual,
            ClassSource::CategoryDefault => has_default = true,
            ClassSource::Rules => {}
        }
    }

    if has_default {
        ClassSource::CategoryDefault
    } else {
        ClassSource::Rules
    }
}

/// 生成可读分类摘要
pub fn class_notes(evidence: &EvidenceMap, overall: i32, threshold: i32) -> String {
    let mut parts = vec![format!("Overall confidence: {}%", overall)];

    let sources: Vec<ClassSource> = evidence.values().map(|e| e.source).collect();
    if sources.contains(&ClassSource::Manual) {
        parts.push("Contains manual overrides".to_string());
    }
    if sources.contains(&ClassSource::CategoryDefault) {
        parts.push("Uses category defaults".to_string());
    }

    let ambiguous: Vec<&str> = evidence
        .iter()
        .filter(|(_, e)| e.value.is_none() && e.confidence < threshold)
        .map(|(name, _)| name.as_str())
        .collect();
    if !ambiguous.is_empty() {
        parts.push(format!("Ambiguous: {}", ambiguous.join(", ")));
    }

    parts.join(". ")
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Fragility;

    fn candidate(value: Option<Fragility>, confidence: i32) -> Candidate<Fragility> {
        Candidate {
            value,
            confidence,
            reason: "rule reason".to_string(),
        }
    }

    #[test]
    fn test_override_wins_regardless_of_confidence() {
        // 规则置信度很低,覆写仍然生效
        let resolved = resolve(
            AttributeKind::Fragility,
            &candidate(Some(Fragility::No), 10),
            Some(Fragility::Yes),
            Some(Fragility::Semi),
            60,
        );
        assert_eq!(resolved.value, Some(Fragility::Yes));
        assert_eq!(resolved.confidence, 100);
        assert_eq!(resolved.source, ClassSource::Manual);
    }

    #[test]
    fn test_default_wins_over_rules() {
        let resolved = resolve(
            AttributeKind::Fragility,
            &candidate(Some(Fragility::No), 95),
            None,
            Some(Fragility::Semi),
            60,
        );
        assert_eq!(resolved.value, Some(Fragility::Semi));
        assert_eq!(resolved.confidence, 85);
        assert_eq!(resolved.source, ClassSource::CategoryDefault);
    }

    #[test]
    fn test_threshold_boundary_inclusive() {
        // 恰为阈值 → 落库
        let resolved = resolve(
            AttributeKind::Fragility,
            &candidate(Some(Fragility::Yes), 60),
            None,
            None,
            60,
        );
        assert_eq!(resolved.value, Some(Fragility::Yes));
        assert_eq!(resolved.source, ClassSource::Rules);

        // 阈值-1 → 置空,保留置信度,理由标记 AMBIGUOUS
        let resolved = resolve(
            AttributeKind::Fragility,
            &candidate(Some(Fragility::Yes), 59),
            None,
            None,
            60,
        );
        assert_eq!(resolved.value, None);
        assert_eq!(resolved.confidence, 59);
        assert!(resolved.reason.starts_with("AMBIGUOUS (<60)"));
    }

    #[test]
    fn test_overall_confidence_mean_of_stored_criticals() {
        let mut evidence = EvidenceMap::new();
        evidence.insert(
            "fragility".to_string(),
            EvidenceEntry {
                value: Some(serde_json::json!("YES")),
                confidence: 90,
                source: ClassSource::Rules,
                reason: String::new(),
            },
        );
        evidence.insert(
            "spill_risk".to_string(),
            EvidenceEntry {
                value: Some(serde_json::json!(true)),
                confidence: 70,
                source: ClassSource::Rules,
                reason: String::new(),
            },
        );
        // 未落库的关键属性不参与平均
        evidence.insert(
            "box_fit_rule".to_string(),
            EvidenceEntry {
                value: None,
                confidence: 40,
                source: ClassSource::Rules,
                reason: String::new(),
            },
        );
        // 非关键属性不参与平均
        evidence.insert(
            "shape_type".to_string(),
            EvidenceEntry {
                value: Some(serde_json::json!("round")),
                confidence: 100,
                source: ClassSource::Rules,
                reason: String::new(),
            },
        );

        assert_eq!(overall_confidence(&evidence), 80);
    }

    #[test]
    fn test_overall_confidence_zero_when_nothing_stored() {
        let evidence = EvidenceMap::new();
        assert_eq!(overall_confidence(&evidence), 0);
    }

    #[test]
    fn test_class_source_priority() {
        let mut evidence = EvidenceMap::new();
        evidence.insert(
            "fragility".to_string(),
            EvidenceEntry {
                value: Some(serde_json::json!("YES")),
                confidence: 85,
                source: ClassSource::CategoryDefault,
                reason: String::new(),
            },
        );
        assert_eq!(class_source(&evidence), ClassSource::CategoryDefault);

        evidence.insert(
            "spill_risk".to_string(),
            EvidenceEntry {
                value: Some(serde_json::json!(true)),
                confidence: 100,
                source: ClassSource::Manual,
                reason: String::new(),
            },
        );
        assert_eq!(class_source(&evidence), ClassSource::Manual);
    }
}
