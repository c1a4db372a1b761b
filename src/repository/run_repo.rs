// ==========================================
// 仓储运营智能系统 - 分类运行记录仓储
// ==========================================
// 职责: 管理 wms_classification_run 表的数据访问
// 红线: 仅追加,不更新历史记录
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::item::ClassificationRun;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// ClassificationRunRepository - 分类运行记录仓储
// ==========================================
pub struct ClassificationRunRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ClassificationRunRepository {
    /// 创建新的 ClassificationRunRepository 实例
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

    fn row_to_run(row: &Row<'_>) -> rusqlite::Result<ClassificationRun> {
        Ok(ClassificationRun {
            run_id: row.get(0)?,
            started_at: row.get::<_, DateTime<Utc>>(1)?,
            finished_at: row.get::<_, Option<DateTime<Utc>>>(2)?,
            run_by: row.get(3)?,
            threshold: row.get(4)?,
            summer_mode: row.get(5)?,
            items_scanned: row.get(6)?,
            items_updated: row.get(7)?,
            items_needing_review: row.get(8)?,
            items_failed: row.get(9)?,
            notes: row.get(10)?,
        })
    }

    /// 追加一条运行记录
    pub fn insert(&self, run: &ClassificationRun) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO wms_classification_run (
                run_id, started_at, finished_at, run_by, threshold, summer_mode,
                items_scanned, items_updated, items_needing_review, items_failed, notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                run.run_id,
                run.started_at,
                run.finished_at,
                run.run_by,
                run.threshold,
                run.summer_mode,
                run.items_scanned,
                run.items_updated,
                run.items_needing_review,
                run.items_failed,
                run.notes,
            ],
        )?;
        Ok(())
    }

    /// 查询最近的运行记录（按开始时间倒序）
    pub fn list_recent(&self, limit: usize) -> RepositoryResult<Vec<ClassificationRun>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT run_id, started_at, finished_at, run_by, threshold, summer_mode, \
             items_scanned, items_updated, items_needing_review, items_failed, notes \
             FROM wms_classification_run ORDER BY started_at DESC, run_id LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], Self::row_to_run)?;

        let mut runs = Vec::new();
        for row in rows {
            runs.push(row?);
        }
        Ok(runs)
    }
}
