// ==========================================
// 搬家估算引擎 - 核心库
// ==========================================
// 职责: 按房屋类型/卧室数/打包强度估算纸箱数量与打包、拆包工时
// 技术栈: Rust + SQLite（仅配置）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 类型与值对象
pub mod domain;

// 引擎层 - 估算规则
pub mod engine;

// 导入层 - 批量文件估算
pub mod importer;

// 配置层 - 可配置默认值
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 校验与对外入口
pub mod api;

// 命令行命令（参数解析与分发）
pub mod cli;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{BoxType, PackingIntensity, PropertyType, RoomType, ServiceType};

// 领域值对象
pub use domain::{
    BatchEstimateReport, BoxCounts, CombinedEstimate, EstimateAllParams, EstimateBoxesParams,
    EstimateBoxesResult, EstimateTimeParams, EstimateTimeResult, EstimationRequest,
    FlatRateEstimate,
};

// 引擎
pub use engine::{
    estimate_all, estimate_boxes, estimate_time, BoxEstimationEngine, EstimateOrchestrator,
    TimeEstimationEngine,
};

// API
pub use api::{validate_estimation_request, ApiError, ApiResult, EstimationApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "搬家估算引擎";
