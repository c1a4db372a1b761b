// ==========================================
// 仓储运营智能系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 决策与估算核心 (规则分类 + 参数化耗时模型)
// 红线: 核心计算纯函数化、可解释、可复算;
//       配置与数据以不可变快照显式传入
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 分类层 - 规则评估与解析
pub mod classify;

// 估算层 - 库位解析与耗时模型
pub mod estimator;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA/schema 统一）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    AttributeKind, BoxFitRule, ClassSource, Fragility, PressureSensitivity, ShapeType,
    ShelfHeight, Stackability, TemperatureSensitivity, UnitType, WarehouseZone,
};

// 领域实体
pub use domain::{
    CategoryDefault, ClassificationRun, EstimateLine, EstimateRun, Item, ItemOverride, Order,
    OrderLine,
};

// 分类引擎
pub use classify::{
    Candidate, ClassificationEngine, ClassificationOutcome, ClassifyError, ClassifyResult,
    EvidenceEntry, EvidenceMap, Resolved, RuleEvaluator,
};

// 估算引擎
pub use estimator::{
    BatchEstimateOutcome, EstimateError, EstimateResult, LineEstimate, LocationParseError,
    LocationPattern, LocationSpec, OrderEstimate, PackEngine, PackResult, ParamsError,
    PatternError, PickEngine, TimeEstimator, TimeParams, TravelBreakdown, TravelEngine,
    ESTIMATOR_VERSION,
};

// 配置
pub use config::{ConfigManager, OiConfigReader};

// 仓储
pub use repository::{
    CategoryDefaultRepository, ClassificationRunRepository, ItemOverrideRepository,
    ItemRepository, OiRepositories, OrderRepository, RepositoryError, RepositoryResult,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "仓储运营智能系统";

// ==========================================
// 预编译检查
// ==========================================
