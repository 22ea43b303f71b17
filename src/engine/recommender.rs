// ==========================================
// 酒店房价决策支持系统 - 调价推荐引擎
// ==========================================
// 职责: 模型估价 + 意图系数 + 保底价 → 有界建议价
// 红线: 建议价恒不低于保底价;上界仅展示,不在本层拦截,
//       越界处置权留给操作员(人工最终控制权)
// ==========================================

use crate::config::GuardrailParams;
use crate::domain::pricing::{ModelWeights, PriceProposal};
use crate::domain::room::Room;
use crate::domain::types::Intent;
use crate::engine::predictor::predict;

/// 四舍五入保留 2 位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ==========================================
// Recommender - 调价推荐引擎
// ==========================================
pub struct Recommender {
    guardrails: GuardrailParams,
}

impl Recommender {
    /// 构造函数(使用默认护栏参数)
    pub fn new() -> Self {
        Self {
            guardrails: GuardrailParams::default(),
        }
    }

    /// 使用指定护栏参数构造
    pub fn with_params(guardrails: GuardrailParams) -> Self {
        Self { guardrails }
    }

    /// 计算建议价与变动百分比
    ///
    /// # 参数
    /// - `room`: 房型
    /// - `intent`: 调价意图
    /// - `weights`: 模型权重;缺省时退化为以当前房价为基准(无模型回退)
    ///
    /// # 返回
    /// - `suggested`: max(保底价, round2(基准价 × 意图系数))
    /// - `delta_pct`: (suggested − 当前房价) / 当前房价 × 100
    pub fn recommend(
        &self,
        room: &Room,
        intent: Intent,
        weights: Option<&ModelWeights>,
    ) -> PriceProposal {
        let base = match weights {
            Some(w) => predict(w, room),
            None => room.current_price,
        };

        let adjusted = match intent {
            Intent::Increase => base * self.guardrails.increase_factor,
            Intent::Decrease => base * self.guardrails.decrease_factor,
            Intent::Review => base,
        };

        let suggested = round2(adjusted).max(self.guardrails.price_floor);
        let delta_pct = (suggested - room.current_price) / room.current_price * 100.0;

        PriceProposal {
            suggested,
            delta_pct,
        }
    }

    /// 展示用护栏价格区间
    ///
    /// # 返回
    /// - `(min_allowed, max_allowed)`:
    ///   min = max(保底价, 0.8 × 当前房价), max = 1.25 × 当前房价
    pub fn guardrail_bounds(&self, room: &Room) -> (f64, f64) {
        let min_allowed = (self.guardrails.min_allowed_ratio * room.current_price)
            .max(self.guardrails.price_floor);
        let max_allowed = self.guardrails.max_allowed_ratio * room.current_price;
        (min_allowed, max_allowed)
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new()
    }
}
