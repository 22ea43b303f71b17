// ==========================================
// 酒店房价决策支持系统 - 房型领域模型
// ==========================================
// 职责: 房型实体与竞品均价派生
// 红线: current_price 只允许审批引擎在批准后修改
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Room - 房型
// ==========================================
// 对齐: room 表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// 房型ID
    pub id: String,
    /// 展示名称
    pub name: String,
    /// 当前房价(正实数,货币单位)
    pub current_price: f64,
    /// 出租率([0,1])
    pub occupancy: f64,
    /// 竞品房价序列(可为空)
    pub competitor_prices: Vec<f64>,
}

impl Room {
    /// 竞品均价
    ///
    /// # 返回
    /// - 竞品房价的算术平均值;序列为空时返回 0(不报错)
    pub fn competitor_avg(&self) -> f64 {
        if self.competitor_prices.is_empty() {
            return 0.0;
        }
        self.competitor_prices.iter().sum::<f64>() / self.competitor_prices.len() as f64
    }
}
