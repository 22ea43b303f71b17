// ==========================================
// 配置层测试
// ==========================================
// 测试目标: 默认参数、config_kv 覆写与非法值回退
// ==========================================

mod test_helpers;

use hotel_pricing_dss::config::{config_keys, ConfigManager, GuardrailParams, TrainingParams};
use test_helpers::{create_test_db, open_shared_conn};

// ==========================================
// 测试用例 1: 内置默认值
// ==========================================

#[test]
fn test_default_params_without_overrides() {
    let (_guard, db_path) = create_test_db().unwrap();
    let config = ConfigManager::from_connection(open_shared_conn(&db_path).unwrap()).unwrap();

    let training = config.load_training_params().unwrap();
    assert_eq!(training, TrainingParams::default());
    assert_eq!(training.learning_rate, 5e-7);
    assert_eq!(training.max_epochs, 5000);
    assert_eq!(training.loss_tolerance, 1e-6);

    let guardrails = config.load_guardrail_params().unwrap();
    assert_eq!(guardrails, GuardrailParams::default());
    assert_eq!(guardrails.price_floor, 20.0);
    assert_eq!(guardrails.increase_factor, 1.05);
    assert_eq!(guardrails.decrease_factor, 0.95);
}

// ==========================================
// 测试用例 2: config_kv 覆写生效
// ==========================================

#[test]
fn test_config_kv_overrides() {
    let (_guard, db_path) = create_test_db().unwrap();
    let config = ConfigManager::from_connection(open_shared_conn(&db_path).unwrap()).unwrap();

    config
        .set_config_value(config_keys::TRAIN_MAX_EPOCHS, "1000")
        .unwrap();
    config
        .set_config_value(config_keys::GUARDRAIL_PRICE_FLOOR, "30")
        .unwrap();

    let training = config.load_training_params().unwrap();
    assert_eq!(training.max_epochs, 1000);
    // 未覆写的键保持默认
    assert_eq!(training.learning_rate, 5e-7);

    let guardrails = config.load_guardrail_params().unwrap();
    assert_eq!(guardrails.price_floor, 30.0);
    assert_eq!(guardrails.max_allowed_ratio, 1.25);
}

// ==========================================
// 测试用例 3: 非法值回退默认
// ==========================================

#[test]
fn test_invalid_config_value_falls_back() {
    let (_guard, db_path) = create_test_db().unwrap();
    let config = ConfigManager::from_connection(open_shared_conn(&db_path).unwrap()).unwrap();

    config
        .set_config_value(config_keys::TRAIN_LEARNING_RATE, "not-a-number")
        .unwrap();

    let training = config.load_training_params().unwrap();
    assert_eq!(training.learning_rate, TrainingParams::default().learning_rate);
}
