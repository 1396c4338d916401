// ==========================================
// 搬家估算引擎 - 领域模型层
// ==========================================
// 职责: 定义领域类型与值对象
// 红线: 不含计算逻辑,不含校验逻辑
// ==========================================

pub mod batch;
pub mod estimate;
pub mod request;
pub mod types;

// 重导出核心类型
pub use batch::{BatchEstimateReport, BatchRowResult, BatchSummary, RowIssue, RowIssueLevel};
pub use estimate::{
    BoxCounts, CombinedEstimate, EstimateAllParams, EstimateBoxesParams, EstimateBoxesResult,
    EstimateTimeParams, EstimateTimeResult,
};
pub use request::{BoxQuantity, EstimationInput, EstimationRequest, FlatRateEstimate, RateConfig};
pub use types::{BoxType, PackingIntensity, PropertyType, RoomType, ServiceType};
