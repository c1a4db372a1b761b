// ==========================================
// 仓储运营智能系统 - 仓储聚合
// ==========================================
// 职责: 聚合分类与估算流程所需的所有 Repository
// 目标: 减少批处理入口的构造参数数量,共享同一数据库连接
// ==========================================

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::repository::{
    CategoryDefaultRepository, ClassificationRunRepository, ItemOverrideRepository,
    ItemRepository, OrderRepository,
};

/// 运营智能仓储集合
///
/// 聚合分类与估算流程所需的所有 Repository,简化依赖注入。
///
/// # 包含的仓储
/// - `item_repo`: 商品主数据与分类输出
/// - `default_repo`: 品类默认值
/// - `override_repo`: 单品覆写
/// - `run_repo`: 分类运行记录
/// - `order_repo`: 订单、订单行与估算快照
#[derive(Clone)]
pub struct OiRepositories {
    pub item_repo: Arc<ItemRepository>,
    pub default_repo: Arc<CategoryDefaultRepository>,
    pub override_repo: Arc<ItemOverrideRepository>,
    pub run_repo: Arc<ClassificationRunRepository>,
    pub order_repo: Arc<OrderRepository>,
}

impl OiRepositories {
    /// 从共享连接创建仓储集合
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            item_repo: Arc::new(ItemRepository::from_connection(conn.clone())),
            default_repo: Arc::new(CategoryDefaultRepository::from_connection(conn.clone())),
            override_repo: Arc::new(ItemOverrideRepository::from_connection(conn.clone())),
            run_repo: Arc::new(ClassificationRunRepository::from_connection(conn.clone())),
            order_repo: Arc::new(OrderRepository::from_connection(conn)),
        }
    }
}
