// ==========================================
// 搬家估算引擎 - 按件费率请求（旧版契约）
// ==========================================
// 与主引擎的固定分箱型工时表相互独立:
// 这里的每箱分钟数是调用方提供的单一费率
// ==========================================

use crate::domain::estimate::BoxCounts;
use crate::domain::types::{BoxType, PackingIntensity, PropertyType, RoomType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 调用方提供的按件费率
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateConfig {
    pub minutes_per_box_pack: u32,
    pub minutes_per_box_unpack: u32,
}

/// 房屋输入（rooms 为部分映射: 缺省的房间不计入）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationInput {
    pub property_type: PropertyType,
    pub rooms: BTreeMap<RoomType, u32>,
    pub packing_intensity: PackingIntensity,
    /// 作业人数（≥1）
    pub workers: u32,
}

/// 经校验的估算请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationRequest {
    pub config: RateConfig,
    pub input: EstimationInput,
}

/// 单条纸箱数量（旧版汇总入参）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxQuantity {
    pub box_type: BoxType,
    pub quantity: u32,
}

/// 按件费率估算结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatRateEstimate {
    pub counts: BoxCounts,
    pub total_boxes: u32,
    /// 总打包分钟（人·分钟）
    pub pack_minutes: u32,
    /// 总拆包分钟（人·分钟）
    pub unpack_minutes: u32,
    pub workers: u32,
    /// 按人数分摊后的打包时长（向上取整）
    pub crew_pack_minutes: u32,
    /// 按人数分摊后的拆包时长（向上取整）
    pub crew_unpack_minutes: u32,
}
