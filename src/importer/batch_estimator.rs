// ==========================================
// 搬家估算引擎 - 批量估算
// ==========================================
// 流程: 文件解析 → 列映射 → 行校验 → 组合估算 → 报告
// 行级问题:
// - ERROR: 必填列缺失/非法 → 该行不估算
// - WARNING: 卧室数越界 → 引擎钳制后仍估算
// ==========================================

use crate::domain::batch::{
    BatchEstimateReport, BatchRowResult, BatchSummary, RowIssue, RowIssueLevel,
};
use crate::domain::estimate::EstimateAllParams;
use crate::domain::types::{PackingIntensity, PropertyType, ServiceType};
use crate::engine::orchestrator::EstimateOrchestrator;
use crate::i18n::t_with_args;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::{RawRow, UniversalFileParser};
use chrono::Utc;
use std::path::Path;
use std::time::Instant;
use tracing::{info, instrument, warn};
use uuid::Uuid;

// ==========================================
// 列定义（别名按归一化后比较）
// ==========================================
pub mod columns {
    pub const PROPERTY_TYPE: &str = "propertyType";
    pub const BEDROOMS: &str = "bedrooms";
    pub const PACKING_INTENSITY: &str = "packingIntensity";
    pub const SERVICE_TYPE: &str = "serviceType";
}

fn aliases(column: &str) -> &'static [&'static str] {
    match column {
        columns::PROPERTY_TYPE => &["propertytype", "property", "hometype"],
        columns::BEDROOMS => &["bedrooms", "bedroom", "beds"],
        columns::PACKING_INTENSITY => &["packingintensity", "intensity", "packing"],
        columns::SERVICE_TYPE => &["servicetype", "service"],
        _ => &[],
    }
}

/// 归一化: 小写,去掉空格/下划线/连字符
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// 按列顺序取第一个命中别名且非空的单元格
fn cell<'a>(row: &'a RawRow, column: &str) -> Option<&'a str> {
    let wanted = aliases(column);
    row.fields
        .iter()
        .filter(|(header, _)| wanted.contains(&normalize(header).as_str()))
        .map(|(_, value)| value.as_str())
        .find(|value| !value.is_empty())
}

/// 枚举匹配（大小写与分隔符不敏感）
fn match_tag<T: Copy>(raw: &str, all: &[T], as_str: impl Fn(&T) -> &'static str) -> Option<T> {
    let key = normalize(raw);
    all.iter().copied().find(|v| normalize(as_str(v)) == key)
}

fn parse_bedrooms(raw: &str) -> Option<i32> {
    if let Ok(v) = raw.parse::<i32>() {
        return Some(v);
    }
    // Excel 数字单元格常以 "3.0" 形式出现
    let f = raw.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
        Some(f as i32)
    } else {
        None
    }
}

// ==========================================
// BatchEstimator - 批量估算器
// ==========================================
#[derive(Debug, Default, Clone)]
pub struct BatchEstimator {
    orchestrator: EstimateOrchestrator,
    default_service_type: Option<ServiceType>,
}

impl BatchEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 未填写 serviceType 的行使用的服务类型
    pub fn with_default_service_type(mut self, service_type: Option<ServiceType>) -> Self {
        self.default_service_type = service_type;
        self
    }

    /// 从文件批量估算
    #[instrument(skip(self, file_path), fields(file = %file_path.as_ref().display()))]
    pub fn estimate_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<BatchEstimateReport> {
        let path = file_path.as_ref();
        let rows = UniversalFileParser.parse(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        Ok(self.estimate_rows(&rows, file_name))
    }

    /// 对已解析的原始行批量估算
    pub fn estimate_rows(&self, rows: &[RawRow], file_name: Option<String>) -> BatchEstimateReport {
        let started = Instant::now();
        let batch_id = Uuid::new_v4().to_string();

        let mut summary = BatchSummary {
            total_rows: rows.len(),
            ..BatchSummary::default()
        };
        let mut results = Vec::with_capacity(rows.len());
        let mut violations = Vec::new();

        for row in rows {
            let (params, mut row_issues) = self.check_row(row);
            let warned = !row_issues.is_empty();
            violations.append(&mut row_issues);

            let Some(params) = params else {
                summary.blocked += 1;
                continue;
            };

            let estimate = self.orchestrator.estimate_all(&params);
            summary.estimated += 1;
            if warned {
                summary.warning += 1;
            }
            summary.total_pack_minutes += u64::from(estimate.pack_minutes);
            summary.total_unpack_minutes += u64::from(estimate.unpack_minutes);
            results.push(BatchRowResult {
                row_number: row.row_number,
                params,
                estimate,
            });
        }

        let elapsed_ms = started.elapsed().as_millis() as u64;
        info!(
            batch_id = %batch_id,
            total = summary.total_rows,
            estimated = summary.estimated,
            blocked = summary.blocked,
            warning = summary.warning,
            elapsed_ms,
            "批量估算完成"
        );

        BatchEstimateReport {
            batch_id,
            file_name,
            generated_at: Utc::now(),
            elapsed_ms,
            summary,
            rows: results,
            violations,
        }
    }

    /// 单行校验
    ///
    /// 返回 (可估算参数, 行级问题); 参数为 None 表示该行被阻断
    fn check_row(&self, row: &RawRow) -> (Option<EstimateAllParams>, Vec<RowIssue>) {
        let mut issues = Vec::new();

        let property_type = self.required(row, columns::PROPERTY_TYPE, &mut issues, |raw| {
            match_tag(raw, &PropertyType::ALL, PropertyType::as_str)
        });
        let bedrooms = self.required(row, columns::BEDROOMS, &mut issues, parse_bedrooms);
        let packing_intensity =
            self.required(row, columns::PACKING_INTENSITY, &mut issues, |raw| {
                match_tag(raw, &PackingIntensity::ALL, PackingIntensity::as_str)
            });

        let service_type = match cell(row, columns::SERVICE_TYPE) {
            Some(label) => Some(ServiceType::from_label(label)),
            None => self.default_service_type.clone(),
        };

        let (Some(property_type), Some(bedrooms), Some(packing_intensity)) =
            (property_type, bedrooms, packing_intensity)
        else {
            return (None, issues);
        };

        if !property_type.bedroom_range().contains(&bedrooms) {
            let range = property_type.bedroom_range();
            let clamped = property_type.clamp_bedrooms(bedrooms);
            warn!(row = row.row_number, bedrooms, clamped, "卧室数越界,按钳制值估算");
            issues.push(RowIssue {
                row_number: row.row_number,
                level: RowIssueLevel::Warning,
                field: columns::BEDROOMS.to_string(),
                message: t_with_args(
                    "batch.bedrooms_clamped",
                    &[
                        ("requested", bedrooms.to_string().as_str()),
                        ("min", range.start().to_string().as_str()),
                        ("max", range.end().to_string().as_str()),
                        ("property_type", property_type.as_str()),
                        ("clamped", clamped.to_string().as_str()),
                    ],
                ),
            });
        }

        let params = EstimateAllParams {
            property_type,
            bedrooms,
            packing_intensity,
            service_type,
        };
        (Some(params), issues)
    }

    /// 读取必填列; 缺失或无法解析时记录 ERROR
    fn required<T>(
        &self,
        row: &RawRow,
        column: &str,
        issues: &mut Vec<RowIssue>,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Option<T> {
        let message = match cell(row, column) {
            None => t_with_args("batch.missing_column", &[("column", column)]),
            Some(raw) => match parse(raw) {
                Some(value) => return Some(value),
                None => t_with_args("batch.invalid_value", &[("column", column), ("value", raw)]),
            },
        };

        issues.push(RowIssue {
            row_number: row.row_number,
            level: RowIssueLevel::Error,
            field: column.to_string(),
            message,
        });
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(row_number: usize, cells: &[(&str, &str)]) -> RawRow {
        RawRow {
            row_number,
            fields: cells
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_normalize_strips_separators() {
        assert_eq!(normalize("Property Type"), "propertytype");
        assert_eq!(normalize("packing_intensity"), "packingintensity");
        assert_eq!(normalize("less-than-normal"), "lessthannormal");
    }

    #[test]
    fn test_header_aliases_and_case_insensitive_tags() {
        let rows = vec![row(
            2,
            &[
                ("Property Type", "APARTMENT"),
                ("Beds", "0"),
                ("packing_intensity", "Normal"),
            ],
        )];
        let report = BatchEstimator::new().estimate_rows(&rows, None);
        assert_eq!(report.summary.estimated, 1);
        assert!(report.violations.is_empty());
        assert_eq!(report.rows[0].estimate.counts.small, 7);
    }

    #[test]
    fn test_leftmost_matching_column_wins() {
        let rows = vec![row(
            2,
            &[
                ("propertyType", "normalHome"),
                ("beds", ""),
                ("bedrooms", "1"),
                ("Beds", "4"),
                ("packingIntensity", "normal"),
            ],
        )];
        let report = BatchEstimator::new().estimate_rows(&rows, None);
        assert_eq!(report.summary.estimated, 1);
        assert_eq!(report.rows[0].params.bedrooms, 1);

        let reordered = vec![row(
            2,
            &[
                ("propertyType", "normalHome"),
                ("Beds", "4"),
                ("bedrooms", "1"),
                ("packingIntensity", "normal"),
            ],
        )];
        let report = BatchEstimator::new().estimate_rows(&reordered, None);
        assert_eq!(report.rows[0].params.bedrooms, 4);
    }

    #[test]
    fn test_missing_and_invalid_columns_block_row() {
        let rows = vec![row(2, &[("propertyType", "castle"), ("bedrooms", "two")])];
        let report = BatchEstimator::new().estimate_rows(&rows, Some("x.csv".to_string()));

        assert_eq!(report.summary.blocked, 1);
        assert_eq!(report.summary.estimated, 0);
        assert!(report.rows.is_empty());
        let fields: Vec<_> = report.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["propertyType", "bedrooms", "packingIntensity"]);
        assert!(report
            .violations
            .iter()
            .all(|v| v.level == RowIssueLevel::Error));
    }

    #[test]
    fn test_out_of_range_bedrooms_warns_and_estimates() {
        let rows = vec![row(
            3,
            &[
                ("propertyType", "largeHome"),
                ("bedrooms", "9"),
                ("packingIntensity", "normal"),
            ],
        )];
        let report = BatchEstimator::new().estimate_rows(&rows, None);

        assert_eq!(report.summary.estimated, 1);
        assert_eq!(report.summary.warning, 1);
        assert_eq!(report.violations[0].level, RowIssueLevel::Warning);
        assert_eq!(report.violations[0].row_number, 3);
        // 按 5 间卧室估算
        assert_eq!(report.rows[0].estimate.counts.small, 42);
    }

    #[test]
    fn test_default_service_type_applies_to_blank_cells() {
        let rows = vec![row(
            2,
            &[
                ("propertyType", "apartment"),
                ("bedrooms", "0"),
                ("packingIntensity", "normal"),
            ],
        )];
        let plain = BatchEstimator::new().estimate_rows(&rows, None);
        let white_glove = BatchEstimator::new()
            .with_default_service_type(Some(ServiceType::WhiteGlove))
            .estimate_rows(&rows, None);

        let base = plain.rows[0].estimate.pack_minutes as f64;
        assert_eq!(
            white_glove.rows[0].estimate.pack_minutes,
            (base * 1.2).round() as u32
        );
        assert_eq!(white_glove.rows[0].params.service_type, Some(ServiceType::WhiteGlove));
    }

    #[test]
    fn test_excel_style_float_bedrooms() {
        assert_eq!(parse_bedrooms("3.0"), Some(3));
        assert_eq!(parse_bedrooms("2.5"), None);
        assert_eq!(parse_bedrooms(""), None);
    }
}
