// ==========================================
// 仓储运营智能系统 - 默认值与覆写仓储
// ==========================================
// 职责: 管理 wms_category_default / wms_item_override 表的数据访问
// 红线: 不含业务逻辑;启用项按键聚合,供解析引擎整体快照使用
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::item::{CategoryDefault, ItemOverride};
use crate::domain::types::{
    BoxFitRule, Fragility, PressureSensitivity, ShapeType, ShelfHeight, Stackability,
    TemperatureSensitivity, UnitType, WarehouseZone,
};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Row};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ==========================================
// CategoryDefaultRepository - 品类默认值仓储
// ==========================================
pub struct CategoryDefaultRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CategoryDefaultRepository {
    /// 创建新的 CategoryDefaultRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn row_to_default(row: &Row<'_>) -> rusqlite::Result<CategoryDefault> {
        Ok(CategoryDefault {
            category_code: row.get(0)?,
            is_active: row.get(1)?,
            fragility: row
                .get::<_, Option<String>>(2)?
                .and_then(|s| Fragility::from_db_str(&s)),
            spill_risk: row.get(3)?,
            pressure_sensitivity: row
                .get::<_, Option<String>>(4)?
                .and_then(|s| PressureSensitivity::from_db_str(&s)),
            stackability: row
                .get::<_, Option<String>>(5)?
                .and_then(|s| Stackability::from_db_str(&s)),
            temperature_sensitivity: row
                .get::<_, Option<String>>(6)?
                .and_then(|s| TemperatureSensitivity::from_db_str(&s)),
            shape_type: row
                .get::<_, Option<String>>(7)?
                .and_then(|s| ShapeType::from_db_str(&s)),
            pick_difficulty: row.get(8)?,
            shelf_height: row
                .get::<_, Option<String>>(9)?
                .and_then(|s| ShelfHeight::from_db_str(&s)),
            box_fit_rule: row
                .get::<_, Option<String>>(10)?
                .and_then(|s| BoxFitRule::from_db_str(&s)),
            zone: row
                .get::<_, Option<String>>(11)?
                .and_then(|s| WarehouseZone::from_db_str(&s)),
        })
    }

    /// 写入品类默认值（INSERT OR REPLACE）
    pub fn upsert(&self, default: &CategoryDefault) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO wms_category_default (
                category_code, is_active, fragility, spill_risk, pressure_sensitivity,
                stackability, temperature_sensitivity, shape_type, pick_difficulty,
                shelf_height, box_fit_rule, zone
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            params![
                default.category_code,
                default.is_active,
                default.fragility.map(|v| v.to_db_str()),
                default.spill_risk,
                default.pressure_sensitivity.map(|v| v.to_db_str()),
                default.stackability.map(|v| v.to_db_str()),
                default.temperature_sensitivity.map(|v| v.to_db_str()),
                default.shape_type.map(|v| v.to_db_str()),
                default.pick_difficulty,
                default.shelf_height.map(|v| v.to_db_str()),
                default.box_fit_rule.map(|v| v.to_db_str()),
                default.zone.map(|v| v.to_db_str()),
            ],
        )?;
        Ok(())
    }

    /// 查询全部启用的品类默认值（category_code → 默认值）
    pub fn list_active(&self) -> RepositoryResult<HashMap<String, CategoryDefault>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT category_code, is_active, fragility, spill_risk, pressure_sensitivity, \
             stackability, temperature_sensitivity, shape_type, pick_difficulty, \
             shelf_height, box_fit_rule, zone \
             FROM wms_category_default WHERE is_active = 1",
        )?;
        let rows = stmt.query_map([], Self::row_to_default)?;

        let mut map = HashMap::new();
        for row in rows {
            let default = row?;
            map.insert(default.category_code.clone(), default);
        }
        Ok(map)
    }
}

// ==========================================
// ItemOverrideRepository - 单品覆写仓储
// ==========================================
pub struct ItemOverrideRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ItemOverrideRepository {
    /// 创建新的 ItemOverrideRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn row_to_override(row: &Row<'_>) -> rusqlite::Result<ItemOverride> {
        Ok(ItemOverride {
            item_code: row.get(0)?,
            is_active: row.get(1)?,
            unit_type: row
                .get::<_, Option<String>>(2)?
                .and_then(|s| UnitType::from_db_str(&s)),
            fragility: row
                .get::<_, Option<String>>(3)?
                .and_then(|s| Fragility::from_db_str(&s)),
            spill_risk: row.get(4)?,
            pressure_sensitivity: row
                .get::<_, Option<String>>(5)?
                .and_then(|s| PressureSensitivity::from_db_str(&s)),
            stackability: row
                .get::<_, Option<String>>(6)?
                .and_then(|s| Stackability::from_db_str(&s)),
            temperature_sensitivity: row
                .get::<_, Option<String>>(7)?
                .and_then(|s| TemperatureSensitivity::from_db_str(&s)),
            shape_type: row
                .get::<_, Option<String>>(8)?
                .and_then(|s| ShapeType::from_db_str(&s)),
            pick_difficulty: row.get(9)?,
            shelf_height: row
                .get::<_, Option<String>>(10)?
                .and_then(|s| ShelfHeight::from_db_str(&s)),
            box_fit_rule: row
                .get::<_, Option<String>>(11)?
                .and_then(|s| BoxFitRule::from_db_str(&s)),
            zone: row
                .get::<_, Option<String>>(12)?
                .and_then(|s| WarehouseZone::from_db_str(&s)),
        })
    }

    /// 写入单品覆写（INSERT OR REPLACE）
    pub fn upsert(&self, item_override: &ItemOverride) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO wms_item_override (
                item_code, is_active, unit_type, fragility, spill_risk,
                pressure_sensitivity, stackability, temperature_sensitivity, shape_type,
                pick_difficulty, shelf_height, box_fit_rule, zone
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
            params![
                item_override.item_code,
                item_override.is_active,
                item_override.unit_type.map(|v| v.to_db_str()),
                item_override.fragility.map(|v| v.to_db_str()),
                item_override.spill_risk,
                item_override.pressure_sensitivity.map(|v| v.to_db_str()),
                item_override.stackability.map(|v| v.to_db_str()),
                item_override.temperature_sensitivity.map(|v| v.to_db_str()),
                item_override.shape_type.map(|v| v.to_db_str()),
                item_override.pick_difficulty,
                item_override.shelf_height.map(|v| v.to_db_str()),
                item_override.box_fit_rule.map(|v| v.to_db_str()),
                item_override.zone.map(|v| v.to_db_str()),
            ],
        )?;
        Ok(())
    }

    /// 查询全部启用的单品覆写（item_code → 覆写）
    pub fn list_active(&self) -> RepositoryResult<HashMap<String, ItemOverride>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT item_code, is_active, unit_type, fragility, spill_risk, \
             pressure_sensitivity, stackability, temperature_sensitivity, shape_type, \
             pick_difficulty, shelf_height, box_fit_rule, zone \
             FROM wms_item_override WHERE is_active = 1",
        )?;
        let rows = stmt.query_map([], Self::row_to_override)?;

        let mut map = HashMap::new();
        for row in rows {
            let item_override = row?;
            map.insert(item_override.item_code.clone(), item_override);
        }
        Ok(map)
    }
}
