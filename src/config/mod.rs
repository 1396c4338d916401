// ==========================================
// 搬家估算引擎 - 配置层
// ==========================================
// 职责: 按件费率契约的可配置默认值
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod estimation_config_trait;

use thiserror::Error;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use estimation_config_trait::{EstimationConfigReader, StaticConfig};

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置数据库错误: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("配置锁获取失败: {0}")]
    LockError(String),

    #[error("配置快照格式错误: {0}")]
    Snapshot(#[from] serde_json::Error),
}
