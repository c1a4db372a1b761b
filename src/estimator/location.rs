// ==========================================
// 仓储运营智能系统 - 库位解析器
// ==========================================
// 职责: 按可配置的定宽结构模式解析库位字符串
// 模式语法: C=走廊位 B=货架位 L=层位 P=格位,其余字符为字面量
//           默认 "CC-BB-LPP",如 "10-01-A02"
// 红线: 不匹配即显式报错,禁止尽力猜测
// ==========================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ==========================================
// 错误类型
// ==========================================

/// 模式编译错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatternError {
    #[error("库位模式为空")]
    Empty,

    #[error("库位模式缺少组成部分: {component}")]
    MissingComponent { component: &'static str },
}

/// 库位解析错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocationParseError {
    #[error("库位字符串为空")]
    Empty,

    #[error("库位长度不匹配: 期望 {expected} 字符,实际 {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("库位第 {index} 位期望数字,实际 '{actual}'")]
    ExpectedDigit { index: usize, actual: char },

    #[error("库位第 {index} 位期望字母,实际 '{actual}'")]
    ExpectedLetter { index: usize, actual: char },

    #[error("库位第 {index} 位期望 '{expected}',实际 '{actual}'")]
    LiteralMismatch {
        index: usize,
        expected: char,
        actual: char,
    },
}

// ==========================================
// LocationSpec - 库位分解结果
// ==========================================
// 生命周期: 逐次调用派生,不落库
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSpec {
    pub corridor: String, // 走廊（数字串,如 "10"）
    pub bay: String,      // 货架（数字串）
    pub level: char,      // 层位（单个字母）
    pub position: String, // 格位（数字串）
    pub is_upper_floor: bool,
}

impl LocationSpec {
    /// 走廊序号（数字串保证可解析;防御性回退 0）
    pub fn corridor_num(&self) -> i32 {
        self.corridor.parse().unwrap_or(0)
    }

    /// 货架序号
    pub fn bay_num(&self) -> i32 {
        self.bay.parse().unwrap_or(0)
    }

    /// 格位序号
    pub fn position_num(&self) -> i32 {
        self.position.parse().unwrap_or(0)
    }
}

// ==========================================
// LocationPattern - 定宽结构模式
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum PatternToken {
    CorridorDigit,
    BayDigit,
    LevelLetter,
    PositionDigit,
    Literal(char),
}

#[derive(Debug, Clone)]
pub struct LocationPattern {
    tokens: Vec<PatternToken>,
}

impl LocationPattern {
    /// 编译库位模式
    ///
    /// # 规则
    /// 模式必须同时包含走廊/货架/层/格四种组成部分
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let trimmed = pattern.trim();
        if trimmed.is_empty() {
            return Err(PatternError::Empty);
        }

        let tokens: Vec<PatternToken> = trimmed
            .chars()
            .map(|c| match c {
                'C' => PatternToken::CorridorDigit,
                'B' => PatternToken::BayDigit,
                'L' => PatternToken::LevelLetter,
                'P' => PatternToken::PositionDigit,
                other => PatternToken::Literal(other),
            })
            .collect();

        for (component, token) in [
            ("走廊位 C", PatternToken::CorridorDigit),
            ("货架位 B", PatternToken::BayDigit),
            ("层位 L", PatternToken::LevelLetter),
            ("格位 P", PatternToken::PositionDigit),
        ] {
            if !tokens.contains(&token) {
                return Err(PatternError::MissingComponent { component });
            }
        }

        Ok(Self { tokens })
    }

    /// 解析库位字符串
    ///
    /// # 参数
    /// - raw: 原始库位（先归一化: 去除内部空白并转大写,"31-04-E 02" → "31-04-E02"）
    /// - upper_floor_corridors: 上层走廊集合
    ///
    /// # 返回
    /// - Ok(LocationSpec): 分解结果
    /// - Err: 显式解析错误（调用方必须有明确的兜底策略）
    pub fn parse(
        &self,
        raw: &str,
        upper_floor_corridors: &[String],
    ) -> Result<LocationSpec, LocationParseError> {
        let normalized: String = raw.split_whitespace().collect::<Vec<_>>().join("");
        let normalized = normalized.to_uppercase();
        if normalized.is_empty() {
            return Err(LocationParseError::Empty);
        }

        let chars: Vec<char> = normalized.chars().collect();
        if chars.len() != self.tokens.len() {
            return Err(LocationParseError::LengthMismatch {
                expected: self.tokens.len(),
                actual: chars.len(),
            });
        }

        let mut corridor = String::new();
        let mut bay = String::new();
        let mut level: Option<char> = None;
        let mut position = String::new();

        for (index, (token, c)) in self.tokens.iter().zip(chars.iter()).enumerate() {
            match token {
                PatternToken::CorridorDigit => {
                    if !c.is_ascii_digit() {
                        return Err(LocationParseError::ExpectedDigit { index, actual: *c });
                    }
                    corridor.push(*c);
                }
                PatternToken::BayDigit => {
                    if !c.is_ascii_digit() {
                        return Err(LocationParseError::ExpectedDigit { index, actual: *c });
                    }
                    bay.push(*c);
                }
                PatternToken::PositionDigit => {
                    if !c.is_ascii_digit() {
                        return Err(LocationParseError::ExpectedDigit { index, actual: *c });
                    }
                    position.push(*c);
                }
                PatternToken::LevelLetter => {
                    if !c.is_ascii_alphabetic() {
                        return Err(LocationParseError::ExpectedLetter { index, actual: *c });
                    }
                    level = Some(*c);
                }
                PatternToken::Literal(expected) => {
                    if c != expected {
                        return Err(LocationParseError::LiteralMismatch {
                            index,
                            expected: *expected,
                            actual: *c,
                        });
                    }
                }
            }
        }

        // 编译期已保证模式含层位,此处必有值
        let level = level.unwrap_or('A');

        let target = format!("{:0>2}", corridor);
        let is_upper_floor = upper_floor_corridors
            .iter()
            .any(|c| format!("{:0>2}", c.trim()) == target);

        Ok(LocationSpec {
            corridor,
            bay,
            level,
            position,
            is_upper_floor,
        })
    }
}
