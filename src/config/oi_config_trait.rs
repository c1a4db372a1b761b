// ==========================================
// 仓储运营智能系统 - 运营配置读取 Trait
// ==========================================
// 职责: 定义分类与估算引擎所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑;
//       核心引擎不直接依赖此接口 —— 配置在入口处读取一次,
//       以不可变快照形式传入引擎
// ==========================================

use crate::estimator::params::TimeParams;
use async_trait::async_trait;
use std::error::Error;

// ==========================================
// OiConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait OiConfigReader: Send + Sync {
    // ===== 分类配置 =====

    /// 获取分类置信度阈值
    ///
    /// # 返回
    /// - i32: 阈值（0-100,闭下界门控）
    ///
    /// # 默认值
    /// - 60
    ///
    /// # 校验
    /// - 存储值超出 0-100 → 返回校验错误（配置载入期拒绝）
    async fn get_classification_threshold(&self) -> Result<i32, Box<dyn Error>>;

    /// 获取夏季模式开关
    ///
    /// # 返回
    /// - bool: 真值形式 1/true/yes/y/on
    ///
    /// # 默认值
    /// - false
    ///
    /// # 用途
    /// - 怕热商品的拣货/打包附加与冷袋装箱规则
    async fn get_summer_mode(&self) -> Result<bool, Box<dyn Error>>;

    // ===== 估算配置 =====

    /// 获取时间估算参数快照
    ///
    /// # 返回
    /// - TimeParams: 已校验的参数快照
    ///
    /// # 失败策略
    /// 存储 JSON 非法或校验失败 → 告警并回退到内置默认参数,
    /// 绝不使用半合并配置
    async fn get_time_params(&self) -> Result<TimeParams, Box<dyn Error>>;

    /// 获取单次批量估算的订单数上限
    ///
    /// # 默认值
    /// - 200
    async fn get_estimator_max_batch_size(&self) -> Result<usize, Box<dyn Error>>;
}
