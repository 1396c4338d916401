// ==========================================
// 搬家估算引擎 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型与字段级校验错误
// 红线: 校验失败必须列出全部字段错误,不只第一个
// ==========================================

use crate::config::ConfigError;
use crate::importer::error::ImportError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    /// 请求校验失败（带全部字段错误）
    #[error("数据验证失败: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("配置错误: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("文件导入失败: {0}")]
    ImportError(#[from] ImportError),

    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 字段级校验错误
// ==========================================

/// 字段错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldErrorCode {
    Required,     // 缺失
    InvalidType,  // 类型错误
    NotInteger,   // 非整数
    TooSmall,     // 低于下限
    TooBig,       // 超出上限
    InvalidEnum,  // 不在枚举取值内
}

impl fmt::Display for FieldErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldErrorCode::Required => write!(f, "REQUIRED"),
            FieldErrorCode::InvalidType => write!(f, "INVALID_TYPE"),
            FieldErrorCode::NotInteger => write!(f, "NOT_INTEGER"),
            FieldErrorCode::TooSmall => write!(f, "TOO_SMALL"),
            FieldErrorCode::TooBig => write!(f, "TOO_BIG"),
            FieldErrorCode::InvalidEnum => write!(f, "INVALID_ENUM"),
        }
    }
}

/// 单个字段错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// 字段路径（点分隔,如 input.rooms.bedroom;根对象为空串）
    pub path: String,
    pub code: FieldErrorCode,
    /// 面向用户的提示（随 locale 变化）
    pub message: String,
}

/// 一次校验的全部字段错误（非空）
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{} 个字段校验失败", .errors.len())]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// 是否存在指定路径的错误
    pub fn has_path(&self, path: &str) -> bool {
        self.errors.iter().any(|e| e.path == path)
    }

    /// 指定路径的错误
    pub fn for_path(&self, path: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.path == path)
    }
}
