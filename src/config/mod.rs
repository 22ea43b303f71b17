// ==========================================
// 酒店房价决策支持系统 - 配置层
// ==========================================
// 职责: 训练/护栏参数管理,支持 config_kv 覆写
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager, GuardrailParams, TrainingParams};
