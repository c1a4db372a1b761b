// ==========================================
// 仓储运营智能系统 - 领域层
// ==========================================
// 职责: 实体与类型定义,不含业务规则
// ==========================================

pub mod item;
pub mod order;
pub mod types;

pub use item::{CategoryDefault, ClassificationRun, Item, ItemOverride};
pub use order::{EstimateLine, EstimateRun, Order, OrderLine};
pub use types::{
    AttributeKind, BoxFitRule, ClassSource, Fragility, PressureSensitivity, ShapeType,
    ShelfHeight, Stackability, TemperatureSensitivity, UnitType, WarehouseZone,
};
