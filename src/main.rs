// ==========================================
// 搬家估算引擎 - 命令行入口
// ==========================================
// 用法见 move_estimation::cli::USAGE
//
// 结果以 JSON 输出到 stdout,日志输出到 stderr
// 配置库路径可用 MOVE_ESTIMATION_DB 覆盖
// ==========================================

use anyhow::Context;
use move_estimation::api::{ApiError, EstimationApi};
use move_estimation::cli::{parse_args, run_command, USAGE};
use move_estimation::config::ConfigManager;
use move_estimation::db::default_db_path;
use move_estimation::logging;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    logging::init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("错误: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("{}", USAGE);
        return Ok(ExitCode::from(2));
    }
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(ExitCode::from(2));
        }
    };

    let db_path = std::env::var("MOVE_ESTIMATION_DB")
        .unwrap_or_else(|_| default_db_path().to_string_lossy().into_owned());
    tracing::debug!("使用配置库: {}", db_path);
    let config = ConfigManager::new(&db_path)
        .with_context(|| format!("无法打开配置库 {}", db_path))?;
    let api = EstimationApi::new(Arc::new(config));

    // 校验失败时输出全部字段错误并返回退出码 1
    match run_command(&api, &command) {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(ApiError::ValidationError(errors)) => {
            println!("{}", serde_json::to_string_pretty(&errors)?);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
