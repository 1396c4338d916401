// ==========================================
// 搬家估算引擎 - 批量估算报告
// ==========================================
// 用途: 批量文件估算的批次信息、逐行结果与数据问题
// ==========================================

use crate::domain::estimate::{CombinedEstimate, EstimateAllParams};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// RowIssueLevel - 行级问题级别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowIssueLevel {
    Error,   // 错误（该行不估算）
    Warning, // 警告（该行仍估算）
}

// ==========================================
// RowIssue - 行级问题
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowIssue {
    pub row_number: usize,
    pub level: RowIssueLevel,
    pub field: String,
    pub message: String,
}

// ==========================================
// BatchRowResult - 单行估算结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRowResult {
    pub row_number: usize,
    pub params: EstimateAllParams,
    pub estimate: CombinedEstimate,
}

// ==========================================
// BatchSummary - 批次汇总
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total_rows: usize, // 总行数
    pub estimated: usize,  // 已估算
    pub blocked: usize,    // 阻断（ERROR）
    pub warning: usize,    // 带警告估算（WARNING）
    pub total_pack_minutes: u64,
    pub total_unpack_minutes: u64,
}

// ==========================================
// BatchEstimateReport - 批量估算报告
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEstimateReport {
    pub batch_id: String, // 批次 ID（UUID）
    pub file_name: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub summary: BatchSummary,
    pub rows: Vec<BatchRowResult>,
    pub violations: Vec<RowIssue>,
}
