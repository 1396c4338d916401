// ==========================================
// 搬家估算引擎 - 命令行命令
// ==========================================
// 职责: 命令行参数 → 请求 → EstimationApi → JSON 结果
// 入口进程（src/main.rs）只负责日志、配置库与输出
// ==========================================

use crate::api::{ApiError, ApiResult, EstimationApi};
use anyhow::Context;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

pub const USAGE: &str = "用法:
  move-estimation estimate <propertyType> <bedrooms> <packingIntensity> [serviceType]
  move-estimation validate <request.json>
  move-estimation flat-rate <request.json>
  move-estimation batch <file.csv|file.xlsx>";

/// 已解析的命令
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// 组合估算（请求已组装为 JSON,交给校验器）
    Estimate(Value),
    /// 严格校验旧版请求后按件费率估算
    Validate(PathBuf),
    /// 旧版请求缺省的费率/人数取配置值
    FlatRate(PathBuf),
    /// 批量文件估算
    Batch(PathBuf),
}

/// 解析参数（不含程序名）
pub fn parse_args(args: &[String]) -> ApiResult<Command> {
    let Some((command, rest)) = args.split_first() else {
        return Err(ApiError::InvalidInput(format!("缺少命令\n{}", USAGE)));
    };

    match command.as_str() {
        "estimate" => Ok(Command::Estimate(estimate_request_from_args(rest)?)),
        "validate" => Ok(Command::Validate(single_path(command, rest)?)),
        "flat-rate" => Ok(Command::FlatRate(single_path(command, rest)?)),
        "batch" => Ok(Command::Batch(single_path(command, rest)?)),
        other => Err(ApiError::InvalidInput(format!("未知命令: {}\n{}", other, USAGE))),
    }
}

/// estimate 的位置参数 → 组合估算请求
///
/// bedrooms 原样保留为字符串,由校验器做数字转换
pub fn estimate_request_from_args(args: &[String]) -> ApiResult<Value> {
    let (property_type, bedrooms, packing_intensity, service_type) = match args {
        [p, b, i] => (p, b, i, None),
        [p, b, i, s] => (p, b, i, Some(s)),
        _ => {
            return Err(ApiError::InvalidInput(format!(
                "estimate 需要 3 或 4 个参数\n{}",
                USAGE
            )))
        }
    };

    let mut request = json!({
        "propertyType": property_type,
        "bedrooms": bedrooms,
        "packingIntensity": packing_intensity,
    });
    if let Some(service_type) = service_type {
        request["serviceType"] = Value::String(service_type.clone());
    }
    Ok(request)
}

fn single_path(command: &str, rest: &[String]) -> ApiResult<PathBuf> {
    match rest {
        [path] => Ok(PathBuf::from(path)),
        _ => Err(ApiError::InvalidInput(format!(
            "{} 需要一个文件路径\n{}",
            command, USAGE
        ))),
    }
}

/// 执行命令,返回待输出的 JSON
pub fn run_command(api: &EstimationApi, command: &Command) -> ApiResult<Value> {
    match command {
        Command::Estimate(request) => to_json(&api.estimate_from_json(request)?),
        Command::Validate(path) => to_json(&api.estimate_legacy_json(&read_request(path)?)?),
        Command::FlatRate(path) => {
            to_json(&api.estimate_legacy_json_with_defaults(&read_request(path)?)?)
        }
        Command::Batch(path) => to_json(&api.estimate_batch_file(path)?),
    }
}

fn read_request(path: &Path) -> ApiResult<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("无法读取 {}", path.display()))?;
    let request = serde_json::from_str(&content)
        .with_context(|| format!("{} 不是合法 JSON", path.display()))?;
    Ok(request)
}

fn to_json<T: Serialize>(value: &T) -> ApiResult<Value> {
    serde_json::to_value(value).map_err(|e| ApiError::InternalError(format!("序列化失败: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticConfig;
    use std::sync::Arc;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_estimate_args_map_to_request() {
        let request =
            estimate_request_from_args(&args(&["normalHome", "3", "normal", "White Glove"])).unwrap();
        assert_eq!(
            request,
            json!({
                "propertyType": "normalHome",
                "bedrooms": "3",
                "packingIntensity": "normal",
                "serviceType": "White Glove"
            })
        );

        let request = estimate_request_from_args(&args(&["apartment", "1", "normal"])).unwrap();
        assert!(request.get("serviceType").is_none());
    }

    #[test]
    fn test_estimate_arg_count() {
        for bad in [args(&["apartment", "1"]), args(&["a", "1", "normal", "x", "y"])] {
            assert!(matches!(
                estimate_request_from_args(&bad),
                Err(ApiError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_args(&args(&["batch", "quotes.csv"])).unwrap(),
            Command::Batch(PathBuf::from("quotes.csv"))
        );
        assert_eq!(
            parse_args(&args(&["flat-rate", "req.json"])).unwrap(),
            Command::FlatRate(PathBuf::from("req.json"))
        );
        assert!(matches!(parse_args(&[]), Err(ApiError::InvalidInput(_))));
        assert!(matches!(
            parse_args(&args(&["validate"])),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_args(&args(&["quote", "x"])),
            Err(ApiError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_run_estimate_reports_field_errors() {
        let api = EstimationApi::new(Arc::new(StaticConfig::default()));
        let command = parse_args(&args(&["estimate", "castle", "two", "normal"])).unwrap();
        match run_command(&api, &command) {
            Err(ApiError::ValidationError(errors)) => {
                assert!(errors.has_path("propertyType"));
                assert!(errors.has_path("bedrooms"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_run_missing_request_file() {
        let api = EstimationApi::new(Arc::new(StaticConfig::default()));
        let command = Command::Validate(PathBuf::from("/nonexistent/move_request.json"));
        assert!(matches!(run_command(&api, &command), Err(ApiError::Other(_))));
    }
}
