// ==========================================
// 仓储运营智能系统 - 订单仓储
// ==========================================
// 职责: 管理 orders / order_lines / oi_estimate_run /
//       oi_estimate_line 表的数据访问
// 红线: 不含业务逻辑;估算快照仅追加
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::order::{EstimateLine, EstimateRun, Order, OrderLine};
use crate::estimator::engine::OrderEstimate;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// OrderRepository - 订单仓储
// ==========================================
pub struct OrderRepository {
    conn: Arc<Mutex<Connection>>,
}

impl OrderRepository {
    /// 创建新的 OrderRepository 实例
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

    fn row_to_order(row: &Row<'_>) -> rusqlite::Result<Order> {
        Ok(Order {
            order_no: row.get(0)?,
            status: row.get(1)?,
            total_exp_minutes: row.get(2)?,
        })
    }

    fn row_to_line(row: &Row<'_>) -> rusqlite::Result<OrderLine> {
        Ok(OrderLine {
            order_no: row.get(0)?,
            line_no: row.get(1)?,
            item_code: row.get(2)?,
            location: row.get(3)?,
            zone: row.get(4)?,
            unit_type_raw: row.get(5)?,
            qty: row.get(6)?,
            exp_minutes: row.get(7)?,
        })
    }

    /// 写入订单（INSERT OR REPLACE,供外部同步与测试夹具使用）
    pub fn upsert_order(&self, order: &Order) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO orders (order_no, status, total_exp_minutes) VALUES (?1, ?2, ?3)",
            params![order.order_no, order.status, order.total_exp_minutes],
        )?;
        Ok(())
    }

    /// 批量写入订单行
    pub fn batch_upsert_lines(&self, lines: &[OrderLine]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let mut count = 0;
        for line in lines {
            tx.execute(
                r#"
                INSERT OR REPLACE INTO order_lines (
                    order_no, line_no, item_code, location, zone, unit_type_raw, qty, exp_minutes
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
                params![
                    line.order_no,
                    line.line_no,
                    line.item_code,
                    line.location,
                    line.zone,
                    line.unit_type_raw,
                    line.qty,
                    line.exp_minutes,
                ],
            )?;
            count += 1;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(count)
    }

    /// 按订单号查询订单
    pub fn get_order(&self, order_no: &str) -> RepositoryResult<Option<Order>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT order_no, status, total_exp_minutes FROM orders WHERE order_no = ?1")?;
        let mut rows = stmt.query_map(params![order_no], Self::row_to_order)?;

        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// 查询订单行（按行号升序）
    pub fn get_lines(&self, order_no: &str) -> RepositoryResult<Vec<OrderLine>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT order_no, line_no, item_code, location, zone, unit_type_raw, qty, exp_minutes \
             FROM order_lines WHERE order_no = ?1 ORDER BY line_no",
        )?;
        let rows = stmt.query_map(params![order_no], Self::row_to_line)?;

        let mut lines = Vec::new();
        for row in rows {
            lines.push(row?);
        }
        Ok(lines)
    }

    /// 查询尚无估算结果的订单号（按订单号升序,保证批次可重现）
    pub fn list_orders_without_estimate(&self) -> RepositoryResult<Vec<String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT order_no FROM orders WHERE total_exp_minutes IS NULL ORDER BY order_no",
        )?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut order_nos = Vec::new();
        for row in rows {
            order_nos.push(row?);
        }
        Ok(order_nos)
    }

    /// 写回估算结果（单级总分钟 + 行级拣货分钟）
    ///
    /// # 说明
    /// - 使用事务确保单级与行级写回的原子性
    pub fn write_back_estimate(&self, estimate: &OrderEstimate) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tx.execute(
            "UPDATE orders SET total_exp_minutes = ?2 WHERE order_no = ?1",
            params![estimate.order_no, estimate.total_minutes],
        )?;

        for line in &estimate.lines {
            tx.execute(
                "UPDATE order_lines SET exp_minutes = ?3 WHERE order_no = ?1 AND line_no = ?2",
                params![estimate.order_no, line.line_no, line.pick_minutes],
            )?;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(())
    }

    /// 追加估算运行快照（运行记录 + 行快照,事务原子写入）
    pub fn insert_estimate_run(
        &self,
        run: &EstimateRun,
        lines: &[EstimateLine],
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tx.execute(
            r#"
            INSERT INTO oi_estimate_run (
                run_id, order_no, estimator_version, params_snapshot_json, summer_mode,
                estimated_total_seconds, estimated_travel_seconds,
                estimated_pick_seconds, estimated_pack_seconds,
                breakdown_json, reason, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            params![
                run.run_id,
                run.order_no,
                run.estimator_version,
                run.params_snapshot_json,
                run.summer_mode,
                run.estimated_total_seconds,
                run.estimated_travel_seconds,
                run.estimated_pick_seconds,
                run.estimated_pack_seconds,
                run.breakdown_json,
                run.reason,
                run.created_at,
            ],
        )?;

        for line in lines {
            tx.execute(
                r#"
                INSERT INTO oi_estimate_line (
                    run_id, order_no, line_no, item_code, location,
                    unit_type_normalized, qty, estimated_pick_seconds
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
                params![
                    line.run_id,
                    line.order_no,
                    line.line_no,
                    line.item_code,
                    line.location,
                    line.unit_type_normalized,
                    line.qty,
                    line.estimated_pick_seconds,
                ],
            )?;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(())
    }

    /// 查询订单的估算运行快照（按创建时间倒序）
    pub fn list_estimate_runs(&self, order_no: &str) -> RepositoryResult<Vec<EstimateRun>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT run_id, order_no, estimator_version, params_snapshot_json, summer_mode, \
             estimated_total_seconds, estimated_travel_seconds, estimated_pick_seconds, \
             estimated_pack_seconds, breakdown_json, reason, created_at \
             FROM oi_estimate_run WHERE order_no = ?1 ORDER BY created_at DESC, run_id",
        )?;
        let rows = stmt.query_map(params![order_no], |row| {
            Ok(EstimateRun {
                run_id: row.get(0)?,
                order_no: row.get(1)?,
                estimator_version: row.get(2)?,
                params_snapshot_json: row.get(3)?,
                summer_mode: row.get(4)?,
                estimated_total_seconds: row.get(5)?,
                estimated_travel_seconds: row.get(6)?,
                estimated_pick_seconds: row.get(7)?,
                estimated_pack_seconds: row.get(8)?,
                breakdown_json: row.get(9)?,
                reason: row.get(10)?,
                created_at: row.get::<_, DateTime<Utc>>(11)?,
            })
        })?;

        let mut runs = Vec::new();
        for row in rows {
            runs.push(row?);
        }
        Ok(runs)
    }
}
