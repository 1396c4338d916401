// ==========================================
// 搬家估算引擎 - 引擎层
// ==========================================
// 职责: 纸箱估算 / 工时估算 / 组合估算 / 按件费率估算
// 红线: 纯函数,无 I/O,无共享可变状态
// 红线: 计算函数对其类型化输入是全函数,不返回错误
// ==========================================

pub mod box_estimator;
pub mod legacy;
pub mod orchestrator;
pub mod tables;
pub mod time_estimator;

// 重导出核心引擎
pub use box_estimator::BoxEstimationEngine;
pub use legacy::{estimate_flat_rate, summarize_boxes, summarize_boxes_with_rates};
pub use orchestrator::EstimateOrchestrator;
pub use tables::{room_allocation, MinuteTable, PACK_MINUTES, UNPACK_MINUTES};
pub use time_estimator::TimeEstimationEngine;

use crate::domain::estimate::{
    CombinedEstimate, EstimateAllParams, EstimateBoxesResult, EstimateTimeParams,
    EstimateTimeResult,
};
use crate::domain::types::{PackingIntensity, PropertyType};

// ==========================================
// 函数式入口
// ==========================================

/// 纸箱估算
pub fn estimate_boxes(
    property_type: PropertyType,
    bedrooms: i32,
    packing_intensity: PackingIntensity,
) -> EstimateBoxesResult {
    BoxEstimationEngine::new().estimate(property_type, bedrooms, packing_intensity)
}

/// 工时估算
pub fn estimate_time(params: &EstimateTimeParams) -> EstimateTimeResult {
    TimeEstimationEngine::new().estimate(params)
}

/// 组合估算（纸箱 → 工时）
pub fn estimate_all(params: &EstimateAllParams) -> CombinedEstimate {
    EstimateOrchestrator::new().estimate_all(params)
}
