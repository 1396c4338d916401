// ==========================================
// 纸箱估算集成测试
// ==========================================
// 测试目标: 卧室数钳制、强度倍率、模板求和
// ==========================================


use move_estimation::domain::estimate::BoxCounts;
use move_estimation::domain::types::{BoxType, PackingIntensity, PropertyType, RoomType};
use move_estimation::engine::{estimate_boxes, room_allocation, BoxEstimationEngine};
use test_helpers::all_combinations;

#[test]
fn test_apartment_studio_scenario() {
    let result = estimate_boxes(PropertyType::Apartment, 0, PackingIntensity::Normal);

    assert_eq!(result.total_rooms, 2);
    assert_eq!(result.counts, BoxCounts::new(7, 11, 5, 1, 4, 0, 1));
}

#[test]
fn test_bedrooms_always_clamped_into_range() {
    for (property_type, intensity) in all_combinations() {
        let fixed = property_type.fixed_rooms().len() as u32;
        let range = property_type.bedroom_range();

        for bedrooms in -50..=50 {
            let result = estimate_boxes(property_type, bedrooms, intensity);
            let used = result.total_rooms - fixed;
            assert!(
                range.contains(&(used as i32)),
                "{property_type} bedrooms={bedrooms} used={used}"
            );
            assert_eq!(used, property_type.clamp_bedrooms(bedrooms));
        }
    }
}

#[test]
fn test_extreme_bedroom_values_do_not_overflow() {
    let low = estimate_boxes(PropertyType::LargeHome, i32::MIN, PackingIntensity::Normal);
    let high = estimate_boxes(PropertyType::LargeHome, i32::MAX, PackingIntensity::Normal);
    assert_eq!(low.total_rooms, 8);
    assert_eq!(high.total_rooms, 12);
}

#[test]
fn test_normal_intensity_equals_template_sum() {
    let engine = BoxEstimationEngine::new();
    for property_type in PropertyType::ALL {
        for bedrooms in property_type.bedroom_range() {
            let mut expected = BoxCounts::ZERO;
            for (room, n) in engine.room_counts(property_type, bedrooms) {
                expected += room_allocation(room).times(n);
            }

            let result = estimate_boxes(property_type, bedrooms, PackingIntensity::Normal);
            assert_eq!(result.counts, expected, "{property_type} x {bedrooms}");
        }
    }
}

#[test]
fn test_intensity_is_monotonic_per_field() {
    for property_type in PropertyType::ALL {
        for bedrooms in -1..=7 {
            let less = estimate_boxes(property_type, bedrooms, PackingIntensity::LessThanNormal);
            let normal = estimate_boxes(property_type, bedrooms, PackingIntensity::Normal);
            let more = estimate_boxes(property_type, bedrooms, PackingIntensity::MoreThanNormal);

            for box_type in BoxType::ALL {
                assert!(more.counts.get(box_type) >= normal.counts.get(box_type));
                assert!(normal.counts.get(box_type) >= less.counts.get(box_type));
            }
            // 房间数与强度无关
            assert_eq!(less.total_rooms, more.total_rooms);
        }
    }
}

#[test]
fn test_more_than_normal_rounds_each_field() {
    let result = estimate_boxes(PropertyType::Apartment, 0, PackingIntensity::MoreThanNormal);
    // 7*1.5=10.5→11, 11*1.5=16.5→17, 5*1.5=7.5→8, 1.5→2, 4*1.5=6, 0, 1.5→2
    assert_eq!(result.counts, BoxCounts::new(11, 17, 8, 2, 6, 0, 2));
}

#[test]
fn test_normal_home_room_set() {
    let engine = BoxEstimationEngine::new();
    let rooms = engine.room_counts(PropertyType::NormalHome, 3);
    assert_eq!(rooms[0], (RoomType::Bedroom, 3));
    assert_eq!(rooms.len(), 5);

    let result = estimate_boxes(PropertyType::NormalHome, 3, PackingIntensity::Normal);
    assert_eq!(result.total_rooms, 7);
    // 3*6 + 5 + 6 + 3 + 7
    assert_eq!(result.counts.medium, 39);
}
