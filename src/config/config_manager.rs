// ==========================================
// 仓储运营智能系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// 红线: 配置在载入边界一次性校验;非法配置整体拒绝,
//       沿用上一份有效配置(或内置默认),绝不半合并生效
// ==========================================

use crate::config::oi_config_trait::OiConfigReader;
use crate::db::open_sqlite_connection;
use crate::estimator::params::TimeParams;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

// ===== 配置键 =====
pub mod config_keys {
    /// 分类置信度阈值（0-100）
    pub const CLASSIFICATION_THRESHOLD: &str = "classification_threshold";
    /// 夏季模式开关
    pub const SUMMER_MODE: &str = "summer_mode";
    /// 时间估算参数（JSON）
    pub const TIME_PARAMS: &str = "oi_time_params";
    /// 单次批量估算订单数上限
    pub const ESTIMATOR_MAX_BATCH_SIZE: &str = "estimator_max_batch_size";
}

/// 分类置信度阈值默认值
pub const DEFAULT_CLASSIFICATION_THRESHOLD: i32 = 60;
/// 批量估算上限默认值
pub const DEFAULT_MAX_BATCH_SIZE: usize = 200;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 从 config_kv 表读取配置值,带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self
            .get_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 写入 global scope 配置值（UPSERT）
    fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }

    // ===== 类型化写入（先校验后落库,原子拒绝）=====

    /// 设置分类置信度阈值
    ///
    /// # 校验
    /// - 超出 0-100 → 拒绝,现有配置不变
    pub fn set_classification_threshold(&self, threshold: i32) -> Result<(), Box<dyn Error>> {
        if !(0..=100).contains(&threshold) {
            return Err(format!("置信度阈值非法: {}（期望 0-100）", threshold).into());
        }
        self.set_config_value(config_keys::CLASSIFICATION_THRESHOLD, &threshold.to_string())
    }

    /// 设置时间估算参数
    ///
    /// # 校验
    /// - 先整体解析校验（顶层键存在性 + 数值合法性）,
    ///   任一失败即拒绝写入,上一份配置保持生效
    pub fn set_time_params(&self, params_json: &str) -> Result<(), Box<dyn Error>> {
        let value: serde_json::Value = serde_json::from_str(params_json)?;
        TimeParams::from_json(&value)?;
        self.set_config_value(config_keys::TIME_PARAMS, params_json)
    }

    /// 设置夏季模式开关
    pub fn set_summer_mode(&self, enabled: bool) -> Result<(), Box<dyn Error>> {
        self.set_config_value(config_keys::SUMMER_MODE, if enabled { "true" } else { "false" })
    }

    // ===== 快照 =====

    /// 获取所有配置的快照（JSON格式）
    ///
    /// # 用途
    /// - 在估算运行记录中落盘参数快照,保证可追溯复算
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let mut config_map: HashMap<String, String> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        let json_value = json!(config_map);
        Ok(serde_json::to_string(&json_value)?)
    }

    /// 从配置快照恢复配置
    ///
    /// # 注意
    /// - 此方法会覆盖现有的 global 配置
    /// - 仅用于回滚场景
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> Result<usize, Box<dyn Error>> {
        let config_map: HashMap<String, String> = serde_json::from_str(snapshot_json)?;

        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute("BEGIN TRANSACTION", [])?;

        let mut count = 0;
        for (key, value) in config_map.iter() {
            let affected = conn.execute(
                "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
                 ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2",
                params![key, value],
            )?;
            count += affected;
        }

        conn.execute("COMMIT", [])?;
        Ok(count)
    }
}

// ===== 真值解析 =====
fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

// ==========================================
// OiConfigReader Trait 实现
// ==========================================
#[async_trait]
impl OiConfigReader for ConfigManager {
    async fn get_classification_threshold(&self) -> Result<i32, Box<dyn Error>> {
        let value = self.get_config_or_default(
            config_keys::CLASSIFICATION_THRESHOLD,
            &DEFAULT_CLASSIFICATION_THRESHOLD.to_string(),
        )?;

        let threshold: i32 = value
            .trim()
            .parse()
            .map_err(|_| format!("置信度阈值格式错误: {}", value))?;

        // 载入期校验: 非法阈值直接拒绝,不带病运行
        if !(0..=100).contains(&threshold) {
            return Err(format!("置信度阈值非法: {}（期望 0-100）", threshold).into());
        }
        Ok(threshold)
    }

    async fn get_summer_mode(&self) -> Result<bool, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::SUMMER_MODE, "false")?;
        Ok(parse_bool(&value))
    }

    async fn get_time_params(&self) -> Result<TimeParams, Box<dyn Error>> {
        let raw = match self.get_config_value(config_keys::TIME_PARAMS)? {
            Some(v) => v,
            None => return Ok(TimeParams::default()),
        };

        let parsed = serde_json::from_str::<serde_json::Value>(&raw)
            .map_err(|e| e.to_string())
            .and_then(|value| TimeParams::from_json(&value).map_err(|e| e.to_string()));

        match parsed {
            Ok(params) => Ok(params),
            Err(message) => {
                // 失败即整体回退内置默认,绝不半合并
                tracing::warn!(
                    config_key = config_keys::TIME_PARAMS,
                    error = %message,
                    "估算参数非法,回退内置默认参数"
                );
                Ok(TimeParams::default())
            }
        }
    }

    async fn get_estimator_max_batch_size(&self) -> Result<usize, Box<dyn Error>> {
        let value = self.get_config_or_default(
            config_keys::ESTIMATOR_MAX_BATCH_SIZE,
            &DEFAULT_MAX_BATCH_SIZE.to_string(),
        )?;
        Ok(value.trim().parse().unwrap_or(DEFAULT_MAX_BATCH_SIZE))
    }
}
