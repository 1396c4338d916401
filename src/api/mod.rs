// ==========================================
// 搬家估算引擎 - API 层
// ==========================================
// 职责: 请求校验 + 对外估算入口,供 CLI 与嵌入方调用
// ==========================================

pub mod error;
pub mod estimation_api;
pub mod validator;

// 重导出核心类型
pub use error::{ApiError, ApiResult, FieldError, FieldErrorCode, ValidationErrors};
pub use estimation_api::{default_flat_rates, EstimationApi};
pub use validator::{validate_estimate_params, validate_estimation_request};
