// ==========================================
// 搬家估算引擎 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写、快照/恢复
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::estimation_config_trait::{
    EstimationConfigReader, DEFAULT_MINUTES_PER_BOX_PACK, DEFAULT_MINUTES_PER_BOX_UNPACK,
    DEFAULT_WORKERS,
};
use crate::config::ConfigError;
use crate::db::{configure_sqlite_connection, ensure_config_schema, open_sqlite_connection};
use crate::domain::types::ServiceType;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::warn;

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    pub const MINUTES_PER_BOX_PACK: &str = "legacy.minutes_per_box_pack";
    pub const MINUTES_PER_BOX_UNPACK: &str = "legacy.minutes_per_box_unpack";
    pub const DEFAULT_WORKERS: &str = "legacy.default_workers";
    pub const DEFAULT_SERVICE_TYPE: &str = "estimation.default_service_type";
}

const GLOBAL_SCOPE: &str = "global";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例（表不存在时自动建表）
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, ConfigError> {
        let conn = open_sqlite_connection(db_path)?;
        ensure_config_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 会对传入连接再次应用统一 PRAGMA（幂等）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, ConfigError> {
        {
            let guard = lock(&conn)?;
            configure_sqlite_connection(&guard)?;
            ensure_config_schema(&guard)?;
        }

        Ok(Self { conn })
    }

    /// 读取 global scope 的配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let conn = lock(&self.conn)?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![GLOBAL_SCOPE, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3, updated_at = datetime('now')",
            params![GLOBAL_SCOPE, key, value],
        )?;
        Ok(())
    }

    /// 获取所有 global 配置的快照（JSON 对象,键有序）
    pub fn get_config_snapshot(&self) -> Result<String, ConfigError> {
        let conn = lock(&self.conn)?;
        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = ?1 ORDER BY key")?;

        let rows = stmt.query_map(params![GLOBAL_SCOPE], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&config_map)?)
    }

    /// 从配置快照恢复配置（事务内 UPSERT）
    ///
    /// # 返回
    /// - 恢复的配置项数量
    ///
    /// # 注意
    /// - 以 `__meta_` 开头的键是元信息,不回写
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> Result<usize, ConfigError> {
        let config_map: BTreeMap<String, String> = serde_json::from_str(snapshot_json)?;

        let mut conn = lock(&self.conn)?;
        let tx = conn.transaction()?;

        let mut count = 0;
        for (key, value) in config_map.iter() {
            if key.starts_with("__meta_") {
                continue;
            }
            count += tx.execute(
                "INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
                 ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3, updated_at = datetime('now')",
                params![GLOBAL_SCOPE, key, value],
            )?;
        }

        tx.commit()?;
        Ok(count)
    }

    /// 读取 u32 配置,缺失或无法解析时使用默认值
    fn get_u32_or_default(&self, key: &str, default: u32) -> Result<u32, ConfigError> {
        match self.get_global_config_value(key)? {
            None => Ok(default),
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(v) => Ok(v),
                Err(_) => {
                    warn!(key, value = %raw, default, "配置值无法解析,使用默认值");
                    Ok(default)
                }
            },
        }
    }
}

fn lock(conn: &Arc<Mutex<Connection>>) -> Result<MutexGuard<'_, Connection>, ConfigError> {
    conn.lock()
        .map_err(|e| ConfigError::LockError(e.to_string()))
}

// ==========================================
// EstimationConfigReader 实现
// ==========================================
impl EstimationConfigReader for ConfigManager {
    fn get_minutes_per_box_pack(&self) -> Result<u32, ConfigError> {
        self.get_u32_or_default(config_keys::MINUTES_PER_BOX_PACK, DEFAULT_MINUTES_PER_BOX_PACK)
    }

    fn get_minutes_per_box_unpack(&self) -> Result<u32, ConfigError> {
        self.get_u32_or_default(
            config_keys::MINUTES_PER_BOX_UNPACK,
            DEFAULT_MINUTES_PER_BOX_UNPACK,
        )
    }

    fn get_default_workers(&self) -> Result<u32, ConfigError> {
        let workers = self.get_u32_or_default(config_keys::DEFAULT_WORKERS, DEFAULT_WORKERS)?;
        if workers == 0 {
            warn!("default_workers 配置为 0,按 1 处理");
        }
        Ok(workers.max(1))
    }

    fn get_default_service_type(&self) -> Result<Option<ServiceType>, ConfigError> {
        let value = self.get_global_config_value(config_keys::DEFAULT_SERVICE_TYPE)?;
        Ok(value
            .filter(|v| !v.trim().is_empty())
            .map(|v| ServiceType::from_label(&v)))
    }
}
