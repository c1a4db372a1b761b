// ==========================================
// 仓储运营智能系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为，避免"部分模块外键开启/部分不开启"
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 集中建表语句，保证各仓储看到一致的 schema
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化数据库 schema（幂等,CREATE TABLE IF NOT EXISTS）
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        -- 商品主数据（原始信号 + 分类输出 + 审计字段）
        CREATE TABLE IF NOT EXISTS dw_item (
            item_code                   TEXT PRIMARY KEY,
            item_name                   TEXT,
            category_code               TEXT,
            brand_code                  TEXT,
            attr1_code                  TEXT,
            attr2_code                  TEXT,
            attr3_code                  TEXT,
            attr4_code                  TEXT,
            attr5_code                  TEXT,
            attr6_code                  TEXT,
            length_cm                   REAL,
            width_cm                    REAL,
            height_cm                   REAL,
            weight_kg                   REAL,
            piece_count                 INTEGER,
            active                      INTEGER NOT NULL DEFAULT 1,
            wms_zone                    TEXT,
            wms_unit_type               TEXT,
            wms_fragility               TEXT,
            wms_stackability            TEXT,
            wms_temperature_sensitivity TEXT,
            wms_pressure_sensitivity    TEXT,
            wms_shape_type              TEXT,
            wms_spill_risk              INTEGER,
            wms_pick_difficulty         INTEGER,
            wms_shelf_height            TEXT,
            wms_box_fit_rule            TEXT,
            wms_class_confidence        INTEGER,
            wms_class_source            TEXT,
            wms_class_notes             TEXT,
            wms_class_evidence          TEXT,
            wms_classified_at           TEXT
        );

        -- 品类默认值
        CREATE TABLE IF NOT EXISTS wms_category_default (
            category_code           TEXT PRIMARY KEY,
            is_active               INTEGER NOT NULL DEFAULT 1,
            fragility               TEXT,
            spill_risk              INTEGER,
            pressure_sensitivity    TEXT,
            stackability            TEXT,
            temperature_sensitivity TEXT,
            shape_type              TEXT,
            pick_difficulty         INTEGER,
            shelf_height            TEXT,
            box_fit_rule            TEXT,
            zone                    TEXT
        );

        -- 单品人工覆写
        CREATE TABLE IF NOT EXISTS wms_item_override (
            item_code               TEXT PRIMARY KEY,
            is_active               INTEGER NOT NULL DEFAULT 1,
            unit_type               TEXT,
            fragility               TEXT,
            spill_risk              INTEGER,
            pressure_sensitivity    TEXT,
            stackability            TEXT,
            temperature_sensitivity TEXT,
            shape_type              TEXT,
            pick_difficulty         INTEGER,
            shelf_height            TEXT,
            box_fit_rule            TEXT,
            zone                    TEXT
        );

        -- 分类运行记录（仅追加）
        CREATE TABLE IF NOT EXISTS wms_classification_run (
            run_id               TEXT PRIMARY KEY,
            started_at           TEXT NOT NULL,
            finished_at          TEXT,
            run_by               TEXT NOT NULL,
            threshold            INTEGER NOT NULL,
            summer_mode          INTEGER NOT NULL,
            items_scanned        INTEGER NOT NULL,
            items_updated        INTEGER NOT NULL,
            items_needing_review INTEGER NOT NULL,
            items_failed         INTEGER NOT NULL,
            notes                TEXT
        );

        -- 订单
        CREATE TABLE IF NOT EXISTS orders (
            order_no          TEXT PRIMARY KEY,
            status            TEXT,
            total_exp_minutes REAL
        );

        -- 订单行
        CREATE TABLE IF NOT EXISTS order_lines (
            order_no      TEXT NOT NULL,
            line_no       INTEGER NOT NULL,
            item_code     TEXT NOT NULL,
            location      TEXT,
            zone          TEXT,
            unit_type_raw TEXT,
            qty           INTEGER NOT NULL,
            exp_minutes   REAL,
            PRIMARY KEY (order_no, line_no)
        );

        -- 估算运行快照（仅追加）
        CREATE TABLE IF NOT EXISTS oi_estimate_run (
            run_id                   TEXT PRIMARY KEY,
            order_no                 TEXT NOT NULL,
            estimator_version        TEXT NOT NULL,
            params_snapshot_json     TEXT NOT NULL,
            summer_mode              INTEGER NOT NULL,
            estimated_total_seconds  REAL NOT NULL,
            estimated_travel_seconds REAL NOT NULL,
            estimated_pick_seconds   REAL NOT NULL,
            estimated_pack_seconds   REAL NOT NULL,
            breakdown_json           TEXT NOT NULL,
            reason                   TEXT NOT NULL,
            created_at               TEXT NOT NULL
        );

        -- 估算行快照
        CREATE TABLE IF NOT EXISTS oi_estimate_line (
            run_id                 TEXT NOT NULL,
            order_no               TEXT NOT NULL,
            line_no                INTEGER NOT NULL,
            item_code              TEXT NOT NULL,
            location               TEXT,
            unit_type_normalized   TEXT NOT NULL,
            qty                    INTEGER NOT NULL,
            estimated_pick_seconds REAL NOT NULL,
            PRIMARY KEY (run_id, line_no)
        );

        -- 配置表 (key-value + scope)
        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL,
            key      TEXT NOT NULL,
            value    TEXT NOT NULL,
            PRIMARY KEY (scope_id, key)
        );

        CREATE INDEX IF NOT EXISTS idx_dw_item_category ON dw_item(category_code);
        CREATE INDEX IF NOT EXISTS idx_order_lines_item ON order_lines(item_code);
        CREATE INDEX IF NOT EXISTS idx_estimate_run_order ON oi_estimate_run(order_no);
        "#,
    )
}
