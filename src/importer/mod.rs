// ==========================================
// 搬家估算引擎 - 导入层
// ==========================================
// 职责: 外部估算清单导入,逐行组合估算
// 支持: Excel, CSV
// ==========================================

pub mod batch_estimator;
pub mod error;
pub mod file_parser;

// 重导出核心类型
pub use batch_estimator::BatchEstimator;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRow, UniversalFileParser};
