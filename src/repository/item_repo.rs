// ==========================================
// 仓储运营智能系统 - 商品仓储
// ==========================================
// 职责: 管理 dw_item 表的数据访问
// 红线: 不含业务逻辑,只负责数据访问;
//       原始信号由外部同步进程写入,分类输出由引擎结果写回
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::item::Item;
use crate::domain::types::{
    BoxFitRule, ClassSource, Fragility, PressureSensitivity, ShapeType, ShelfHeight, Stackability,
    TemperatureSensitivity, UnitType, WarehouseZone,
};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// ItemRepository - 商品仓储
// ==========================================
pub struct ItemRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ItemRepository {
    /// 创建新的 ItemRepository 实例
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

    const SELECT_COLUMNS: &'static str = "item_code, item_name, category_code, brand_code, \
         attr1_code, attr2_code, attr3_code, attr4_code, attr5_code, attr6_code, \
         length_cm, width_cm, height_cm, weight_kg, piece_count, active, \
         wms_zone, wms_unit_type, wms_fragility, wms_stackability, \
         wms_temperature_sensitivity, wms_pressure_sensitivity, wms_shape_type, \
         wms_spill_risk, wms_pick_difficulty, wms_shelf_height, wms_box_fit_rule, \
         wms_class_confidence, wms_class_source, wms_class_notes, wms_class_evidence, \
         wms_classified_at";

    fn row_to_item(row: &Row<'_>) -> rusqlite::Result<Item> {
        Ok(Item {
            item_code: row.get(0)?,
            item_name: row.get(1)?,
            category_code: row.get(2)?,
            brand_code: row.get(3)?,
            attr1_code: row.get(4)?,
            attr2_code: row.get(5)?,
            attr3_code: row.get(6)?,
            attr4_code: row.get(7)?,
            attr5_code: row.get(8)?,
            attr6_code: row.get(9)?,
            length_cm: row.get(10)?,
            width_cm: row.get(11)?,
            height_cm: row.get(12)?,
            weight_kg: row.get(13)?,
            piece_count: row.get(14)?,
            active: row.get(15)?,
            wms_zone: row
                .get::<_, Option<String>>(16)?
                .and_then(|s| WarehouseZone::from_db_str(&s)),
            wms_unit_type: row
                .get::<_, Option<String>>(17)?
                .and_then(|s| UnitType::from_db_str(&s)),
            wms_fragility: row
                .get::<_, Option<String>>(18)?
                .and_then(|s| Fragility::from_db_str(&s)),
            wms_stackability: row
                .get::<_, Option<String>>(19)?
                .and_then(|s| Stackability::from_db_str(&s)),
            wms_temperature_sensitivity: row
                .get::<_, Option<String>>(20)?
                .and_then(|s| TemperatureSensitivity::from_db_str(&s)),
            wms_pressure_sensitivity: row
                .get::<_, Option<String>>(21)?
                .and_then(|s| PressureSensitivity::from_db_str(&s)),
            wms_shape_type: row
                .get::<_, Option<String>>(22)?
                .and_then(|s| ShapeType::from_db_str(&s)),
            wms_spill_risk: row.get(23)?,
            wms_pick_difficulty: row.get(24)?,
            wms_shelf_height: row
                .get::<_, Option<String>>(25)?
                .and_then(|s| ShelfHeight::from_db_str(&s)),
            wms_box_fit_rule: row
                .get::<_, Option<String>>(26)?
                .and_then(|s| BoxFitRule::from_db_str(&s)),
            wms_class_confidence: row.get(27)?,
            wms_class_source: row
                .get::<_, Option<String>>(28)?
                .and_then(|s| ClassSource::from_db_str(&s)),
            wms_class_notes: row.get(29)?,
            wms_class_evidence: row.get(30)?,
            wms_classified_at: row.get::<_, Option<DateTime<Utc>>>(31)?,
        })
    }

    /// 批量写入商品主数据（INSERT OR REPLACE,含分类输出）
    ///
    /// # 说明
    /// - 供外部同步进程与测试夹具使用
    /// - 使用事务确保原子性
    pub fn batch_upsert_items(&self, items: &[Item]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let mut count = 0;
        for item in items {
            tx.execute(
                r#"
                INSERT OR REPLACE INTO dw_item (
                    item_code, item_name, category_code, brand_code,
                    attr1_code, attr2_code, attr3_code, attr4_code, attr5_code, attr6_code,
                    length_cm, width_cm, height_cm, weight_kg, piece_count, active,
                    wms_zone, wms_unit_type, wms_fragility, wms_stackability,
                    wms_temperature_sensitivity, wms_pressure_sensitivity, wms_shape_type,
                    wms_spill_risk, wms_pick_difficulty, wms_shelf_height, wms_box_fit_rule,
                    wms_class_confidence, wms_class_source, wms_class_notes, wms_class_evidence,
                    wms_classified_at
                ) VALUES (
                    ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                    ?11, ?12, ?13, ?14, ?15, ?16,
                    ?17, ?18, ?19, ?20, ?21, ?22, ?23,
                    ?24, ?25, ?26, ?27, ?28, ?29, ?30, ?31, ?32
                )
                "#,
                params![
                    item.item_code,
                    item.item_name,
                    item.category_code,
                    item.brand_code,
                    item.attr1_code,
                    item.attr2_code,
                    item.attr3_code,
                    item.attr4_code,
                    item.attr5_code,
                    item.attr6_code,
                    item.length_cm,
                    item.width_cm,
                    item.height_cm,
                    item.weight_kg,
                    item.piece_count,
                    item.active,
                    item.wms_zone.map(|v| v.to_db_str()),
                    item.wms_unit_type.map(|v| v.to_db_str()),
                    item.wms_fragility.map(|v| v.to_db_str()),
                    item.wms_stackability.map(|v| v.to_db_str()),
                    item.wms_temperature_sensitivity.map(|v| v.to_db_str()),
                    item.wms_pressure_sensitivity.map(|v| v.to_db_str()),
                    item.wms_shape_type.map(|v| v.to_db_str()),
                    item.wms_spill_risk,
                    item.wms_pick_difficulty,
                    item.wms_shelf_height.map(|v| v.to_db_str()),
                    item.wms_box_fit_rule.map(|v| v.to_db_str()),
                    item.wms_class_confidence,
                    item.wms_class_source.map(|v| v.to_db_str()),
                    item.wms_class_notes,
                    item.wms_class_evidence,
                    item.wms_classified_at,
                ],
            )?;
            count += 1;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(count)
    }

    /// 查询全部在售商品
    pub fn list_active_items(&self) -> RepositoryResult<Vec<Item>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM dw_item WHERE active = 1 ORDER BY item_code",
            Self::SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], Self::row_to_item)?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row?);
        }
        Ok(items)
    }

    /// 按编码查询商品
    pub fn get_by_code(&self, item_code: &str) -> RepositoryResult<Option<Item>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM dw_item WHERE item_code = ?1",
            Self::SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query_map(params![item_code], Self::row_to_item)?;

        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// 按编码集合查询商品
    pub fn get_by_codes(&self, item_codes: &[String]) -> RepositoryResult<Vec<Item>> {
        let mut items = Vec::with_capacity(item_codes.len());
        for code in item_codes {
            if let Some(item) = self.get_by_code(code)? {
                items.push(item);
            }
        }
        Ok(items)
    }

    /// 批量写回分类输出与审计字段
    ///
    /// # 说明
    /// - 仅更新 wms_* 字段,不触碰原始信号
    /// - 使用事务确保原子性（引擎批量产出,落库集中串行化）
    pub fn batch_update_classification(&self, items: &[Item]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let mut count = 0;
        for item in items {
            let affected = tx.execute(
                r#"
                UPDATE dw_item SET
                    wms_zone = ?2, wms_unit_type = ?3, wms_fragility = ?4,
                    wms_stackability = ?5, wms_temperature_sensitivity = ?6,
                    wms_pressure_sensitivity = ?7, wms_shape_type = ?8,
                    wms_spill_risk = ?9, wms_pick_difficulty = ?10,
                    wms_shelf_height = ?11, wms_box_fit_rule = ?12,
                    wms_class_confidence = ?13, wms_class_source = ?14,
                    wms_class_notes = ?15, wms_class_evidence = ?16,
                    wms_classified_at = ?17
                WHERE item_code = ?1
                "#,
                params![
                    item.item_code,
                    item.wms_zone.map(|v| v.to_db_str()),
                    item.wms_unit_type.map(|v| v.to_db_str()),
                    item.wms_fragility.map(|v| v.to_db_str()),
                    item.wms_stackability.map(|v| v.to_db_str()),
                    item.wms_temperature_sensitivity.map(|v| v.to_db_str()),
                    item.wms_pressure_sensitivity.map(|v| v.to_db_str()),
                    item.wms_shape_type.map(|v| v.to_db_str()),
                    item.wms_spill_risk,
                    item.wms_pick_difficulty,
                    item.wms_shelf_height.map(|v| v.to_db_str()),
                    item.wms_box_fit_rule.map(|v| v.to_db_str()),
                    item.wms_class_confidence,
                    item.wms_class_source.map(|v| v.to_db_str()),
                    item.wms_class_notes,
                    item.wms_class_evidence,
                    item.wms_classified_at,
                ],
            )?;
            count += affected;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(count)
    }
}
