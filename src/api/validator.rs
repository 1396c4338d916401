// ==========================================
// 搬家估算引擎 - 请求校验器
// ==========================================
// 职责: 原始 JSON → 强类型请求
// - 数字字符串强制转换为整数（"6" → 6）
// - 下限校验: 数量/分钟 ≥ 0, workers ≥ 1
// - 枚举校验: propertyType / packingIntensity
// 红线: 不 panic、不提前返回,收集全部字段错误
// 红线: 校验层严格,计算层宽松（卧室数越界由引擎钳制）
// ==========================================

use crate::api::error::{FieldError, FieldErrorCode, ValidationErrors};
use crate::domain::estimate::EstimateAllParams;
use crate::domain::request::{EstimationInput, EstimationRequest, RateConfig};
use crate::domain::types::{PackingIntensity, PropertyType, RoomType, ServiceType};
use crate::i18n::{t, t_with_args};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

// ==========================================
// 公开入口
// ==========================================

/// 校验按件费率估算请求
///
/// 结构: `{ config: { minutesPerBoxPack, minutesPerBoxUnpack },
///          input: { propertyType, rooms, packingIntensity, workers } }`
///
/// - rooms 缺失或为 null 视为空映射
/// - rooms 内各房间字段可选,缺失/null 不计入
/// - rooms 内未知键忽略
pub fn validate_estimation_request(raw: &Value) -> Result<EstimationRequest, ValidationErrors> {
    let mut collector = FieldCollector::default();
    let Some(root) = collector.root(raw) else {
        return collector.finish(None);
    };

    let config = match collector.object(root.get("config"), "config") {
        Some(obj) => rate_config(&mut collector, obj),
        None => None,
    };
    let input = match collector.object(root.get("input"), "input") {
        Some(obj) => estimation_input(&mut collector, obj),
        None => None,
    };

    collector.finish(
        config
            .zip(input)
            .map(|(config, input)| EstimationRequest { config, input }),
    )
}

/// 校验组合估算参数（主引擎契约）
///
/// 结构: `{ propertyType, bedrooms, packingIntensity, serviceType? }`
///
/// bedrooms 只要求是整数,越界值交给引擎钳制
pub fn validate_estimate_params(raw: &Value) -> Result<EstimateAllParams, ValidationErrors> {
    let mut collector = FieldCollector::default();
    let Some(root) = collector.root(raw) else {
        return collector.finish(None);
    };

    let property_type = collector.enumeration(
        root.get("propertyType"),
        "propertyType",
        &PropertyType::ALL,
        PropertyType::as_str,
    );
    let bedrooms = collector
        .integer(root.get("bedrooms"), "bedrooms", i32::MIN as i64, i32::MAX as i64)
        .map(|v| v as i32);
    let packing_intensity = collector.enumeration(
        root.get("packingIntensity"),
        "packingIntensity",
        &PackingIntensity::ALL,
        PackingIntensity::as_str,
    );
    let service_type = match root.get("serviceType") {
        None | Some(Value::Null) => Some(None),
        Some(Value::String(s)) => Some(Some(ServiceType::from_label(s))),
        Some(other) => {
            collector.invalid_type("serviceType", "string", other);
            None
        }
    };

    let params = (|| {
        Some(EstimateAllParams {
            property_type: property_type?,
            bedrooms: bedrooms?,
            packing_intensity: packing_intensity?,
            service_type: service_type?,
        })
    })();
    collector.finish(params)
}

// ==========================================
// 子结构校验
// ==========================================

fn rate_config(c: &mut FieldCollector, obj: &Map<String, Value>) -> Option<RateConfig> {
    let pack = c.count(obj.get("minutesPerBoxPack"), "config.minutesPerBoxPack", 0);
    let unpack = c.count(obj.get("minutesPerBoxUnpack"), "config.minutesPerBoxUnpack", 0);

    Some(RateConfig {
        minutes_per_box_pack: pack?,
        minutes_per_box_unpack: unpack?,
    })
}

fn estimation_input(c: &mut FieldCollector, obj: &Map<String, Value>) -> Option<EstimationInput> {
    let property_type = c.enumeration(
        obj.get("propertyType"),
        "input.propertyType",
        &PropertyType::ALL,
        PropertyType::as_str,
    );
    let rooms = c.rooms(obj.get("rooms"), "input.rooms");
    let packing_intensity = c.enumeration(
        obj.get("packingIntensity"),
        "input.packingIntensity",
        &PackingIntensity::ALL,
        PackingIntensity::as_str,
    );
    let workers = c.count(obj.get("workers"), "input.workers", 1);

    Some(EstimationInput {
        property_type: property_type?,
        rooms: rooms?,
        packing_intensity: packing_intensity?,
        workers: workers?,
    })
}

// ==========================================
// 数值强制转换
// ==========================================

enum Coerced {
    Int(i64),
    NotInteger,
    NotNumber,
}

/// JSON 数字或数字字符串 → 整数
///
/// 空串、布尔、数组、对象、NaN/Infinity 均不是数字
fn coerce_integer(value: &Value) -> Coerced {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Coerced::Int(i)
            } else if let Some(u) = n.as_u64() {
                Coerced::Int(i64::try_from(u).unwrap_or(i64::MAX))
            } else {
                coerce_float(n.as_f64())
            }
        }
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Coerced::NotNumber;
            }
            match s.parse::<i64>() {
                Ok(i) => Coerced::Int(i),
                Err(_) => coerce_float(s.parse::<f64>().ok()),
            }
        }
        _ => Coerced::NotNumber,
    }
}

/// 超出 i64 的整值浮点饱和到 i64::MAX / i64::MIN,交给范围检查报 TOO_BIG / TOO_SMALL
fn coerce_float(value: Option<f64>) -> Coerced {
    match value {
        Some(f) if f.is_finite() && f.fract() == 0.0 => {
            if f >= i64::MAX as f64 {
                Coerced::Int(i64::MAX)
            } else if f <= i64::MIN as f64 {
                Coerced::Int(i64::MIN)
            } else {
                Coerced::Int(f as i64)
            }
        }
        Some(f) if f.is_finite() => Coerced::NotInteger,
        _ => Coerced::NotNumber,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ==========================================
// FieldCollector - 字段错误收集器
// ==========================================
#[derive(Default)]
struct FieldCollector {
    errors: Vec<FieldError>,
}

impl FieldCollector {
    fn push(&mut self, path: &str, code: FieldErrorCode, message: String) {
        self.errors.push(FieldError {
            path: path.to_string(),
            code,
            message,
        });
    }

    fn required(&mut self, path: &str) {
        self.push(path, FieldErrorCode::Required, t("validation.required"));
    }

    fn invalid_type(&mut self, path: &str, expected: &str, received: &Value) {
        let message = t_with_args(
            "validation.invalid_type",
            &[("expected", expected), ("received", type_name(received))],
        );
        self.push(path, FieldErrorCode::InvalidType, message);
    }

    fn root<'a>(&mut self, raw: &'a Value) -> Option<&'a Map<String, Value>> {
        match raw {
            Value::Object(obj) => Some(obj),
            other => {
                self.invalid_type("", "object", other);
                None
            }
        }
    }

    /// 必填对象
    fn object<'a>(&mut self, value: Option<&'a Value>, path: &str) -> Option<&'a Map<String, Value>> {
        match value {
            None | Some(Value::Null) => {
                self.required(path);
                None
            }
            Some(Value::Object(obj)) => Some(obj),
            Some(other) => {
                self.invalid_type(path, "object", other);
                None
            }
        }
    }

    /// 必填整数,闭区间 [min, max]
    fn integer(&mut self, value: Option<&Value>, path: &str, min: i64, max: i64) -> Option<i64> {
        let value = match value {
            None | Some(Value::Null) => {
                self.required(path);
                return None;
            }
            Some(v) => v,
        };

        match coerce_integer(value) {
            Coerced::Int(i) if i < min => {
                let message = t_with_args("validation.too_small", &[("min", min.to_string().as_str())]);
                self.push(path, FieldErrorCode::TooSmall, message);
                None
            }
            Coerced::Int(i) if i > max => {
                let message = t_with_args("validation.too_big", &[("max", max.to_string().as_str())]);
                self.push(path, FieldErrorCode::TooBig, message);
                None
            }
            Coerced::Int(i) => Some(i),
            Coerced::NotInteger => {
                let message =
                    t_with_args("validation.not_integer", &[("received", value.to_string().as_str())]);
                self.push(path, FieldErrorCode::NotInteger, message);
                None
            }
            Coerced::NotNumber => {
                self.invalid_type(path, "number", value);
                None
            }
        }
    }

    /// 非负计数（u32,下限 min）
    fn count(&mut self, value: Option<&Value>, path: &str, min: u32) -> Option<u32> {
        self.integer(value, path, min as i64, u32::MAX as i64)
            .map(|v| v as u32)
    }

    fn enumeration<T: Copy>(
        &mut self,
        value: Option<&Value>,
        path: &str,
        options: &[T],
        as_str: fn(&T) -> &'static str,
    ) -> Option<T> {
        match value {
            None | Some(Value::Null) => {
                self.required(path);
                None
            }
            Some(Value::String(s)) => {
                let found = options.iter().find(|o| as_str(*o) == s.as_str()).copied();
                if found.is_none() {
                    let expected = options
                        .iter()
                        .map(|o| format!("'{}'", as_str(o)))
                        .collect::<Vec<_>>()
                        .join(" | ");
                    let message = t_with_args(
                        "validation.invalid_enum",
                        &[("options", expected.as_str()), ("received", s.as_str())],
                    );
                    self.push(path, FieldErrorCode::InvalidEnum, message);
                }
                found
            }
            Some(other) => {
                self.invalid_type(path, "string", other);
                None
            }
        }
    }

    /// 房间计数映射（整体可缺省,各房间可缺省）
    fn rooms(&mut self, value: Option<&Value>, path: &str) -> Option<BTreeMap<RoomType, u32>> {
        let obj = match value {
            None | Some(Value::Null) => return Some(BTreeMap::new()),
            Some(Value::Object(obj)) => obj,
            Some(other) => {
                self.invalid_type(path, "object", other);
                return None;
            }
        };

        let mut rooms = BTreeMap::new();
        let mut valid = true;
        for room in RoomType::ALL {
            let raw = match obj.get(room.as_str()) {
                None | Some(Value::Null) => continue,
                Some(v) => v,
            };
            let field_path = format!("{}.{}", path, room.as_str());
            match self.count(Some(raw), &field_path, 0) {
                Some(n) => {
                    rooms.insert(room, n);
                }
                None => valid = false,
            }
        }

        for key in obj.keys().filter(|k| RoomType::parse(k).is_none()) {
            debug!(key = %key, "忽略未知房间类型");
        }

        valid.then_some(rooms)
    }

    fn finish<T>(self, value: Option<T>) -> Result<T, ValidationErrors> {
        match value {
            Some(v) if self.errors.is_empty() => Ok(v),
            _ => {
                debug!(error_count = self.errors.len(), "请求校验失败");
                Err(ValidationErrors::new(self.errors))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_request() -> Value {
        json!({
            "config": { "minutesPerBoxPack": 6, "minutesPerBoxUnpack": 4 },
            "input": {
                "propertyType": "normalHome",
                "rooms": { "bedroom": 3, "kitchen": 1 },
                "packingIntensity": "normal",
                "workers": 2
            }
        })
    }

    #[test]
    fn test_valid_request_passes() {
        let req = validate_estimation_request(&valid_request()).unwrap();
        assert_eq!(req.config.minutes_per_box_pack, 6);
        assert_eq!(req.input.property_type, PropertyType::NormalHome);
        assert_eq!(req.input.rooms.get(&RoomType::Bedroom), Some(&3));
        assert_eq!(req.input.rooms.get(&RoomType::Garage), None);
        assert_eq!(req.input.workers, 2);
    }

    #[test]
    fn test_empty_object_reports_config_and_input() {
        let err = validate_estimation_request(&json!({})).unwrap_err();
        assert_eq!(err.len(), 2);
        assert_eq!(err.for_path("config").unwrap().code, FieldErrorCode::Required);
        assert_eq!(err.for_path("input").unwrap().code, FieldErrorCode::Required);
        assert!(err.errors.iter().all(|e| !e.message.is_empty()));
    }

    #[test]
    fn test_non_object_root() {
        let err = validate_estimation_request(&json!([1, 2])).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.errors[0].path, "");
        assert_eq!(err.errors[0].code, FieldErrorCode::InvalidType);
    }

    #[test]
    fn test_string_numbers_are_coerced() {
        let mut raw = valid_request();
        raw["input"]["rooms"]["bedroom"] = json!("2");
        raw["input"]["workers"] = json!(" 3 ");
        raw["config"]["minutesPerBoxPack"] = json!("7");

        let req = validate_estimation_request(&raw).unwrap();
        assert_eq!(req.input.rooms.get(&RoomType::Bedroom), Some(&2));
        assert_eq!(req.input.workers, 3);
        assert_eq!(req.config.minutes_per_box_pack, 7);
    }

    #[test]
    fn test_whole_float_is_integer() {
        let mut raw = valid_request();
        raw["input"]["workers"] = json!(2.0);
        assert_eq!(validate_estimation_request(&raw).unwrap().input.workers, 2);
    }

    #[test]
    fn test_huge_whole_float_is_too_big() {
        let mut raw = valid_request();
        raw["input"]["workers"] = json!(1e20);
        raw["input"]["rooms"]["kitchen"] = json!("-9e18");
        let err = validate_estimation_request(&raw).unwrap_err();
        assert_eq!(err.len(), 2);
        assert_eq!(err.for_path("input.workers").unwrap().code, FieldErrorCode::TooBig);
        assert_eq!(err.for_path("input.rooms.kitchen").unwrap().code, FieldErrorCode::TooSmall);

        let err = validate_estimate_params(&json!({
            "propertyType": "apartment",
            "bedrooms": 1e16,
            "packingIntensity": "normal"
        }))
        .unwrap_err();
        assert_eq!(err.for_path("bedrooms").unwrap().code, FieldErrorCode::TooBig);
    }

    #[test]
    fn test_reports_every_invalid_field() {
        let raw = json!({
            "config": { "minutesPerBoxPack": -1, "minutesPerBoxUnpack": "abc" },
            "input": {
                "propertyType": "castle",
                "rooms": { "bedroom": 1.5, "office": -2 },
                "packingIntensity": 3,
                "workers": 0
            }
        });
        let err = validate_estimation_request(&raw).unwrap_err();

        assert_eq!(err.for_path("config.minutesPerBoxPack").unwrap().code, FieldErrorCode::TooSmall);
        assert_eq!(
            err.for_path("config.minutesPerBoxUnpack").unwrap().code,
            FieldErrorCode::InvalidType
        );
        assert_eq!(err.for_path("input.propertyType").unwrap().code, FieldErrorCode::InvalidEnum);
        assert_eq!(err.for_path("input.rooms.bedroom").unwrap().code, FieldErrorCode::NotInteger);
        assert_eq!(err.for_path("input.rooms.office").unwrap().code, FieldErrorCode::TooSmall);
        assert_eq!(
            err.for_path("input.packingIntensity").unwrap().code,
            FieldErrorCode::InvalidType
        );
        assert_eq!(err.for_path("input.workers").unwrap().code, FieldErrorCode::TooSmall);
        assert_eq!(err.len(), 7);
    }

    #[test]
    fn test_rooms_optional_and_unknown_keys_ignored() {
        let mut raw = valid_request();
        raw["input"]["rooms"] = json!({ "ballroom": 4, "garage": null });
        let req = validate_estimation_request(&raw).unwrap();
        assert!(req.input.rooms.is_empty());

        raw["input"].as_object_mut().unwrap().remove("rooms");
        let req = validate_estimation_request(&raw).unwrap();
        assert!(req.input.rooms.is_empty());
    }

    #[test]
    fn test_booleans_and_empty_strings_are_not_numbers() {
        let mut raw = valid_request();
        raw["input"]["workers"] = json!(true);
        raw["config"]["minutesPerBoxUnpack"] = json!("");
        let err = validate_estimation_request(&raw).unwrap_err();
        assert_eq!(err.for_path("input.workers").unwrap().code, FieldErrorCode::InvalidType);
        assert_eq!(
            err.for_path("config.minutesPerBoxUnpack").unwrap().code,
            FieldErrorCode::InvalidType
        );
    }

    #[test]
    fn test_estimate_params_allow_out_of_range_bedrooms() {
        let params = validate_estimate_params(&json!({
            "propertyType": "apartment",
            "bedrooms": "-4",
            "packingIntensity": "lessThanNormal",
            "serviceType": "White Glove"
        }))
        .unwrap();
        assert_eq!(params.bedrooms, -4);
        assert_eq!(params.service_type, Some(ServiceType::WhiteGlove));
    }

    #[test]
    fn test_estimate_params_missing_fields() {
        let err = validate_estimate_params(&json!({ "serviceType": 5 })).unwrap_err();
        assert!(err.has_path("propertyType"));
        assert!(err.has_path("bedrooms"));
        assert!(err.has_path("packingIntensity"));
        assert_eq!(err.for_path("serviceType").unwrap().code, FieldErrorCode::InvalidType);
    }
}
