// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 文件型配置库的读写、默认值与快照恢复
// ==========================================


use move_estimation::api::{default_flat_rates, EstimationApi};
use move_estimation::config::{config_keys, ConfigManager, EstimationConfigReader, StaticConfig};
use move_estimation::domain::types::ServiceType;
use move_estimation::logging;
use serde_json::json;
use std::sync::Arc;
use test_helpers::create_test_db;

#[test]
fn test_config_manager_creates_schema_on_empty_file() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    assert_eq!(manager.get_minutes_per_box_pack().unwrap(), 6);
    assert_eq!(manager.get_minutes_per_box_unpack().unwrap(), 4);
    assert_eq!(manager.get_default_workers().unwrap(), 2);
    assert_eq!(manager.get_default_service_type().unwrap(), None);
}

#[test]
fn test_values_persist_across_managers() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    {
        let manager = ConfigManager::new(&db_path).unwrap();
        manager
            .set_global_config_value(config_keys::MINUTES_PER_BOX_PACK, "8")
            .unwrap();
        manager
            .set_global_config_value(config_keys::DEFAULT_WORKERS, "3")
            .unwrap();
    }

    let reopened = ConfigManager::new(&db_path).unwrap();
    let rates = default_flat_rates(&reopened).unwrap();
    assert_eq!(rates.minutes_per_box_pack, 8);
    assert_eq!(rates.minutes_per_box_unpack, 4);
    assert_eq!(reopened.get_default_workers().unwrap(), 3);
}

#[test]
fn test_snapshot_round_trip_between_databases() {
    logging::init_test();

    let (_source_file, source_path) = create_test_db().unwrap();
    let (_target_file, target_path) = create_test_db().unwrap();

    let source = ConfigManager::new(&source_path).unwrap();
    source
        .set_global_config_value(config_keys::MINUTES_PER_BOX_UNPACK, "5")
        .unwrap();
    source
        .set_global_config_value(config_keys::DEFAULT_SERVICE_TYPE, "White Glove")
        .unwrap();
    let snapshot = source.get_config_snapshot().unwrap();

    let target = ConfigManager::new(&target_path).unwrap();
    assert_eq!(target.restore_config_from_snapshot(&snapshot).unwrap(), 2);
    assert_eq!(target.get_minutes_per_box_unpack().unwrap(), 5);
    assert_eq!(
        target.get_default_service_type().unwrap(),
        Some(ServiceType::WhiteGlove)
    );
}

#[test]
fn test_malformed_snapshot_is_rejected() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().unwrap();
    let manager = ConfigManager::new(&db_path).unwrap();
    assert!(manager.restore_config_from_snapshot("not json").is_err());
}

#[test]
fn test_stored_default_service_type_reaches_api() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().unwrap();
    let manager = ConfigManager::new(&db_path).unwrap();
    manager
        .set_global_config_value(config_keys::DEFAULT_SERVICE_TYPE, "White Glove")
        .unwrap();

    let request = json!({
        "propertyType": "apartment",
        "bedrooms": 0,
        "packingIntensity": "normal"
    });
    let stored = EstimationApi::new(Arc::new(manager))
        .estimate_from_json(&request)
        .unwrap();
    let plain = EstimationApi::new(Arc::new(StaticConfig::default()))
        .estimate_from_json(&request)
        .unwrap();

    assert_eq!(stored.pack_minutes, 311);
    assert_eq!(plain.pack_minutes, 259);
}

#[test]
fn test_stored_flat_rates_fill_legacy_request() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().unwrap();
    let manager = ConfigManager::new(&db_path).unwrap();
    manager
        .set_global_config_value(config_keys::MINUTES_PER_BOX_PACK, "8")
        .unwrap();
    manager
        .set_global_config_value(config_keys::DEFAULT_WORKERS, "0")
        .unwrap();

    let est = EstimationApi::new(Arc::new(manager))
        .estimate_legacy_json_with_defaults(&json!({
            "input": {
                "propertyType": "apartment",
                "rooms": { "bedroom": 1 },
                "packingIntensity": "normal"
            }
        }))
        .unwrap();

    // 卧室 17 箱; 存储的人数 0 按 1 人计
    assert_eq!(est.pack_minutes, 136);
    assert_eq!(est.unpack_minutes, 68);
    assert_eq!(est.workers, 1);
    assert_eq!(est.crew_pack_minutes, 136);
}
