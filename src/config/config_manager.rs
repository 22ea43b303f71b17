// ==========================================
// 酒店房价决策支持系统 - 配置管理器
// ==========================================
// 职责: 训练参数与价格护栏参数的加载、查询、覆写
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::db::configure_sqlite_connection;
use crate::db::open_sqlite_connection;
use rusqlite::{params, Connection};
use std::error::Error;
use std::sync::{Arc, Mutex};

// ==========================================
// 配置键全集
// ==========================================
pub mod config_keys {
    /// 梯度下降学习率
    pub const TRAIN_LEARNING_RATE: &str = "pricing.train.learning_rate";
    /// 最大训练轮数
    pub const TRAIN_MAX_EPOCHS: &str = "pricing.train.max_epochs";
    /// 收敛损失容差
    pub const TRAIN_LOSS_TOLERANCE: &str = "pricing.train.loss_tolerance";
    /// 发散保护耐心值(连续上升轮数)
    pub const TRAIN_DIVERGENCE_PATIENCE: &str = "pricing.train.divergence_patience";

    /// 保底价
    pub const GUARDRAIL_PRICE_FLOOR: &str = "pricing.guardrail.price_floor";
    /// 展示下界系数
    pub const GUARDRAIL_MIN_RATIO: &str = "pricing.guardrail.min_allowed_ratio";
    /// 展示上界系数
    pub const GUARDRAIL_MAX_RATIO: &str = "pricing.guardrail.max_allowed_ratio";
    /// 涨价意图系数
    pub const GUARDRAIL_INCREASE_FACTOR: &str = "pricing.guardrail.increase_factor";
    /// 降价意图系数
    pub const GUARDRAIL_DECREASE_FACTOR: &str = "pricing.guardrail.decrease_factor";
}

// ==========================================
// TrainingParams - 训练参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingParams {
    /// 学习率
    pub learning_rate: f64,
    /// 最大轮数
    pub max_epochs: u32,
    /// 收敛损失容差
    pub loss_tolerance: f64,
    /// 发散保护耐心值
    pub divergence_patience: u32,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            learning_rate: 5e-7,
            max_epochs: 5000,
            loss_tolerance: 1e-6,
            divergence_patience: 10,
        }
    }
}

// ==========================================
// GuardrailParams - 价格护栏参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuardrailParams {
    /// 保底价,建议价恒不低于此值
    pub price_floor: f64,
    /// 展示下界系数(相对当前房价)
    pub min_allowed_ratio: f64,
    /// 展示上界系数(相对当前房价)
    pub max_allowed_ratio: f64,
    /// 涨价意图系数
    pub increase_factor: f64,
    /// 降价意图系数
    pub decrease_factor: f64,
}

impl Default for GuardrailParams {
    fn default() -> Self {
        Self {
            price_floor: 20.0,
            min_allowed_ratio: 0.8,
            max_allowed_ratio: 1.25,
            increase_factor: 1.05,
            decrease_factor: 0.95,
        }
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明: 为保证连接行为一致,会对传入连接再次应用统一 PRAGMA(幂等)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            configure_sqlite_connection(&conn_guard)?;
        }
        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值 (scope_id='global')
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入配置值 (scope_id='global', INSERT OR REPLACE)
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT OR REPLACE INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// 加载训练参数,缺失或非法的键回退默认值
    pub fn load_training_params(&self) -> Result<TrainingParams, Box<dyn Error>> {
        let defaults = TrainingParams::default();
        Ok(TrainingParams {
            learning_rate: self
                .get_f64(config_keys::TRAIN_LEARNING_RATE)?
                .unwrap_or(defaults.learning_rate),
            max_epochs: self
                .get_u32(config_keys::TRAIN_MAX_EPOCHS)?
                .unwrap_or(defaults.max_epochs),
            loss_tolerance: self
                .get_f64(config_keys::TRAIN_LOSS_TOLERANCE)?
                .unwrap_or(defaults.loss_tolerance),
            divergence_patience: self
                .get_u32(config_keys::TRAIN_DIVERGENCE_PATIENCE)?
                .unwrap_or(defaults.divergence_patience),
        })
    }

    /// 加载价格护栏参数,缺失或非法的键回退默认值
    pub fn load_guardrail_params(&self) -> Result<GuardrailParams, Box<dyn Error>> {
        let defaults = GuardrailParams::default();
        Ok(GuardrailParams {
            price_floor: self
                .get_f64(config_keys::GUARDRAIL_PRICE_FLOOR)?
                .unwrap_or(defaults.price_floor),
            min_allowed_ratio: self
                .get_f64(config_keys::GUARDRAIL_MIN_RATIO)?
                .unwrap_or(defaults.min_allowed_ratio),
            max_allowed_ratio: self
                .get_f64(config_keys::GUARDRAIL_MAX_RATIO)?
                .unwrap_or(defaults.max_allowed_ratio),
            increase_factor: self
                .get_f64(config_keys::GUARDRAIL_INCREASE_FACTOR)?
                .unwrap_or(defaults.increase_factor),
            decrease_factor: self
                .get_f64(config_keys::GUARDRAIL_DECREASE_FACTOR)?
                .unwrap_or(defaults.decrease_factor),
        })
    }

    /// 读取 f64 配置,解析失败视为缺失并告警
    fn get_f64(&self, key: &str) -> Result<Option<f64>, Box<dyn Error>> {
        match self.get_config_value(key)? {
            Some(raw) => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(Some(v)),
                _ => {
                    tracing::warn!(key, raw = %raw, "配置值解析失败,回退默认值");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// 读取 u32 配置,解析失败视为缺失并告警
    fn get_u32(&self, key: &str) -> Result<Option<u32>, Box<dyn Error>> {
        match self.get_config_value(key)? {
            Some(raw) => match raw.parse::<u32>() {
                Ok(v) => Ok(Some(v)),
                Err(_) => {
                    tracing::warn!(key, raw = %raw, "配置值解析失败,回退默认值");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }
}
