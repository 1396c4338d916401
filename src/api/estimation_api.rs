// ==========================================
// 搬家估算引擎 - 估算 API
// ==========================================
// 职责: 对外估算入口（强类型 / JSON / 批量文件）
// 红线: API 层只做校验与转发,不追加计算规则
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{validate_estimate_params, validate_estimation_request};
use crate::config::EstimationConfigReader;
use crate::domain::batch::BatchEstimateReport;
use crate::domain::estimate::{CombinedEstimate, EstimateAllParams};
use crate::domain::request::{FlatRateEstimate, RateConfig};
use crate::engine::legacy::estimate_flat_rate;
use crate::engine::orchestrator::EstimateOrchestrator;
use crate::importer::batch_estimator::BatchEstimator;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// 从配置读取按件费率默认值
pub fn default_flat_rates(config: &dyn EstimationConfigReader) -> ApiResult<RateConfig> {
    Ok(config.get_flat_rates()?)
}

// ==========================================
// EstimationApi - 估算 API
// ==========================================
pub struct EstimationApi {
    orchestrator: EstimateOrchestrator,
    config: Arc<dyn EstimationConfigReader>,
}

impl EstimationApi {
    /// 创建新的 EstimationApi 实例
    pub fn new(config: Arc<dyn EstimationConfigReader>) -> Self {
        Self {
            orchestrator: EstimateOrchestrator::new(),
            config,
        }
    }

    /// 组合估算（纸箱 + 工时）
    #[instrument(skip(self), level = "debug")]
    pub fn estimate(&self, params: &EstimateAllParams) -> CombinedEstimate {
        let estimate = self.orchestrator.estimate_all(params);
        info!(
            property_type = %params.property_type,
            bedrooms = params.bedrooms,
            total_boxes = estimate.counts.total(),
            pack_minutes = estimate.pack_minutes,
            unpack_minutes = estimate.unpack_minutes,
            "组合估算完成"
        );
        estimate
    }

    /// 原始 JSON 组合估算
    ///
    /// 未提供 serviceType 时使用配置的默认服务类型
    pub fn estimate_from_json(&self, raw: &Value) -> ApiResult<CombinedEstimate> {
        let mut params = validate_estimate_params(raw).map_err(|errors| {
            warn!(error_count = errors.len(), "组合估算请求校验失败");
            ApiError::from(errors)
        })?;

        if params.service_type.is_none() {
            params.service_type = self.config.get_default_service_type()?;
        }
        Ok(self.estimate(&params))
    }

    /// 原始 JSON 按件费率估算（旧版契约）
    pub fn estimate_legacy_json(&self, raw: &Value) -> ApiResult<FlatRateEstimate> {
        let request = validate_estimation_request(raw).map_err(|errors| {
            warn!(error_count = errors.len(), "按件费率请求校验失败");
            ApiError::from(errors)
        })?;
        Ok(estimate_flat_rate(&request))
    }

    /// 原始 JSON 按件费率估算,缺省的费率与人数取配置值
    pub fn estimate_legacy_json_with_defaults(&self, raw: &Value) -> ApiResult<FlatRateEstimate> {
        let filled = self.fill_flat_rate_defaults(raw)?;
        self.estimate_legacy_json(&filled)
    }

    /// 补齐旧版请求的缺省项
    ///
    /// - config 缺失或为 null: 整体取配置费率
    /// - config 为对象: 只补缺失或为 null 的单项费率
    /// - input.workers 缺失或为 null: 取配置默认人数
    ///
    /// 其余结构原样保留,类型错误仍由校验器报告
    pub fn fill_flat_rate_defaults(&self, raw: &Value) -> ApiResult<Value> {
        let mut filled = raw.clone();
        let Value::Object(root) = &mut filled else {
            return Ok(filled);
        };

        if root.get("config").map_or(true, Value::is_null) {
            root.insert("config".to_string(), Value::Object(Map::new()));
        }
        if let Some(Value::Object(config)) = root.get_mut("config") {
            let rates = self.flat_rates()?;
            fill_missing(config, "minutesPerBoxPack", rates.minutes_per_box_pack);
            fill_missing(config, "minutesPerBoxUnpack", rates.minutes_per_box_unpack);
        }

        if let Some(Value::Object(input)) = root.get_mut("input") {
            if input.get("workers").map_or(true, Value::is_null) {
                fill_missing(input, "workers", self.config.get_default_workers()?);
            }
        }
        Ok(filled)
    }

    /// 当前配置下的按件费率
    pub fn flat_rates(&self) -> ApiResult<RateConfig> {
        default_flat_rates(self.config.as_ref())
    }

    /// 批量估算文件（CSV / Excel）
    pub fn estimate_batch_file<P: AsRef<Path>>(&self, file_path: P) -> ApiResult<BatchEstimateReport> {
        let estimator = BatchEstimator::new()
            .with_default_service_type(self.config.get_default_service_type()?);
        Ok(estimator.estimate_file(file_path)?)
    }
}

fn fill_missing(obj: &mut Map<String, Value>, key: &str, value: u32) {
    if obj.get(key).map_or(true, Value::is_null) {
        obj.insert(key.to_string(), Value::from(value));
    }
}
