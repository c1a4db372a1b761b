// ==========================================
// 仓储运营智能系统 - 数据仓储层
// ==========================================
// 职责: 数据访问,不含业务逻辑
// 红线: 引擎不拼 SQL;所有 SQL 收敛在本层
// ==========================================

pub mod error;
pub mod item_repo;
pub mod order_repo;
pub mod override_repo;
pub mod repositories;
pub mod run_repo;

pub use error::{RepositoryError, RepositoryResult};
pub use item_repo::ItemRepository;
pub use order_repo::OrderRepository;
pub use override_repo::{CategoryDefaultRepository, ItemOverrideRepository};
pub use repositories::OiRepositories;
pub use run_repo::ClassificationRunRepository;
