// ==========================================
// 组合估算集成测试
// ==========================================
// 测试目标: 组合估算与分步估算结果一致
// ==========================================


use move_estimation::domain::estimate::EstimateTimeParams;
use move_estimation::domain::types::{PackingIntensity, PropertyType, ServiceType};
use move_estimation::engine::{estimate_all, estimate_boxes, estimate_time};
use test_helpers::{all_combinations, params};

#[test]
fn test_composition_law() {
    for (property_type, intensity) in all_combinations() {
        for bedrooms in -2..=8 {
            for service_type in [None, Some(ServiceType::WhiteGlove)] {
                let p = params(property_type, bedrooms, intensity, service_type.clone());
                let all = estimate_all(&p);
                let boxes = estimate_boxes(property_type, bedrooms, intensity);
                let time = estimate_time(&EstimateTimeParams {
                    counts: boxes.counts,
                    total_rooms: boxes.total_rooms,
                    service_type,
                });

                assert_eq!(all.counts, boxes.counts);
                assert_eq!(all.total_rooms, boxes.total_rooms);
                assert_eq!(all.pack_minutes, time.pack_minutes);
                assert_eq!(all.unpack_minutes, time.unpack_minutes);
            }
        }
    }
}

#[test]
fn test_studio_apartment_end_to_end() {
    let result = estimate_all(&params(
        PropertyType::Apartment,
        0,
        PackingIntensity::Normal,
        Some(ServiceType::WhiteGlove),
    ));
    assert_eq!(result.total_rooms, 2);
    // 259 * 1.2 = 310.8, 225 * 1.2 = 270
    assert_eq!(result.pack_minutes, 311);
    assert_eq!(result.unpack_minutes, 270);
}

#[test]
fn test_combined_estimate_serializes_camel_case() {
    let result = estimate_all(&params(
        PropertyType::NormalHome,
        2,
        PackingIntensity::Normal,
        None,
    ));
    let value = serde_json::to_value(result).unwrap();
    assert!(value.get("totalRooms").is_some());
    assert!(value.get("packMinutes").is_some());
    assert!(value["counts"].get("dishPack").is_some());
    assert!(value["counts"].get("tvBox").is_some());
}
