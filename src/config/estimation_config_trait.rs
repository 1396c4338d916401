// ==========================================
// 搬家估算引擎 - 估算配置读取 Trait
// ==========================================
// 职责: 定义按件费率契约所需的配置读取接口（不包含实现）
// 红线: 固定查表（房间分配/分钟表/倍率）不走配置
// ==========================================

use crate::config::ConfigError;
use crate::domain::request::RateConfig;
use crate::domain::types::ServiceType;

/// 默认每箱打包分钟
pub const DEFAULT_MINUTES_PER_BOX_PACK: u32 = 6;
/// 默认每箱拆包分钟
pub const DEFAULT_MINUTES_PER_BOX_UNPACK: u32 = 4;
/// 默认作业人数
pub const DEFAULT_WORKERS: u32 = 2;

// ==========================================
// EstimationConfigReader Trait
// ==========================================
// 实现者: ConfigManager（config_kv 表） / StaticConfig（内存）
pub trait EstimationConfigReader: Send + Sync {
    /// 每箱打包分钟
    ///
    /// # 默认值
    /// - 6
    fn get_minutes_per_box_pack(&self) -> Result<u32, ConfigError>;

    /// 每箱拆包分钟
    ///
    /// # 默认值
    /// - 4
    fn get_minutes_per_box_unpack(&self) -> Result<u32, ConfigError>;

    /// 默认作业人数（≥1）
    ///
    /// # 默认值
    /// - 2
    fn get_default_workers(&self) -> Result<u32, ConfigError>;

    /// 未指定服务类型时使用的默认服务类型
    ///
    /// # 默认值
    /// - None
    fn get_default_service_type(&self) -> Result<Option<ServiceType>, ConfigError>;

    /// 组合读取按件费率
    fn get_flat_rates(&self) -> Result<RateConfig, ConfigError> {
        Ok(RateConfig {
            minutes_per_box_pack: self.get_minutes_per_box_pack()?,
            minutes_per_box_unpack: self.get_minutes_per_box_unpack()?,
        })
    }
}

// ==========================================
// StaticConfig - 内存配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticConfig {
    pub minutes_per_box_pack: u32,
    pub minutes_per_box_unpack: u32,
    pub default_workers: u32,
    pub default_service_type: Option<ServiceType>,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            minutes_per_box_pack: DEFAULT_MINUTES_PER_BOX_PACK,
            minutes_per_box_unpack: DEFAULT_MINUTES_PER_BOX_UNPACK,
            default_workers: DEFAULT_WORKERS,
            default_service_type: None,
        }
    }
}

impl EstimationConfigReader for StaticConfig {
    fn get_minutes_per_box_pack(&self) -> Result<u32, ConfigError> {
        Ok(self.minutes_per_box_pack)
    }

    fn get_minutes_per_box_unpack(&self) -> Result<u32, ConfigError> {
        Ok(self.minutes_per_box_unpack)
    }

    fn get_default_workers(&self) -> Result<u32, ConfigError> {
        Ok(self.default_workers.max(1))
    }

    fn get_default_service_type(&self) -> Result<Option<ServiceType>, ConfigError> {
        Ok(self.default_service_type.clone())
    }
}
