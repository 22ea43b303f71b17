// ==========================================
// 酒店房价决策支持系统 - 推荐解释引擎
// ==========================================
// 职责: 将模型估价分解为各信号贡献,生成可读解释
// 红线: 可解释性,每条推荐必须附带信号分解与文案
// ==========================================

use crate::domain::pricing::{
    Explanation, FeatureVector, ModelWeights, Recommendation, SignalContribution,
};
use crate::domain::room::Room;
use crate::domain::types::{Intent, Signal};
use crate::engine::predictor::predict;
use crate::engine::recommender::Recommender;
use std::cmp::Ordering;

// ==========================================
// Explainer - 推荐解释引擎
// ==========================================
pub struct Explainer {
    recommender: Recommender,
}

impl Explainer {
    /// 构造函数(使用默认护栏参数的推荐引擎)
    pub fn new() -> Self {
        Self {
            recommender: Recommender::new(),
        }
    }

    /// 使用指定推荐引擎构造
    pub fn with_recommender(recommender: Recommender) -> Self {
        Self { recommender }
    }

    /// 生成单房型的推荐解释
    ///
    /// # 参数
    /// - `weights`: 模型权重
    /// - `room`: 房型
    /// - `intent`: 调价意图
    ///
    /// # 返回
    /// 含信号贡献分解、解释文案与嵌入推荐结果的 Explanation
    pub fn explain(&self, weights: &ModelWeights, room: &Room, intent: Intent) -> Explanation {
        let signals = FeatureVector::from_room(room);
        let values = signals.values();

        // 各信号贡献 = 权重 × 特征值
        let mut signal_weights: Vec<SignalContribution> = Signal::ALL
            .iter()
            .enumerate()
            .map(|(idx, signal)| SignalContribution {
                signal: *signal,
                value: values[idx],
                contribution: weights.values[idx] * values[idx],
                normalized_weight: 0.0,
            })
            .collect();

        // 归一化基数 = 贡献绝对值之和;全零时归一化权重保持 0,避免除零
        let total_abs: f64 = signal_weights.iter().map(|c| c.contribution.abs()).sum();
        if total_abs > 0.0 {
            for entry in signal_weights.iter_mut() {
                entry.normalized_weight = entry.contribution / total_abs;
            }
        }

        let model_prediction = predict(weights, room);

        // 头部信号: 按贡献绝对值降序取前 2,稳定排序保证并列时按信号声明顺序
        let mut ranked: Vec<&SignalContribution> = signal_weights.iter().collect();
        ranked.sort_by(|a, b| {
            b.contribution
                .abs()
                .partial_cmp(&a.contribution.abs())
                .unwrap_or(Ordering::Equal)
        });
        let top_signals: Vec<&SignalContribution> = ranked.into_iter().take(2).collect();

        let reason_summary: Vec<String> = top_signals
            .iter()
            .map(|c| c.signal.label().to_string())
            .collect();

        let headline = top_signals
            .iter()
            .map(|c| {
                format!(
                    "{}:{}%",
                    c.signal.label(),
                    (c.normalized_weight * 100.0).round() as i64
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        let reason = format!("Model ${:.2} — top signals: {}", model_prediction, headline);

        // 同房型同意图的推荐结果,供审批界面与审计复用
        let proposal = self.recommender.recommend(room, intent, Some(weights));
        let (min_allowed, max_allowed) = self.recommender.guardrail_bounds(room);
        let recommendation = Recommendation {
            id: room.id.clone(),
            name: room.name.clone(),
            current_price: room.current_price,
            competitor_avg: room.competitor_avg(),
            occupancy: room.occupancy,
            min_allowed,
            max_allowed,
            suggested: proposal.suggested,
            delta_pct: proposal.delta_pct,
            reason: reason.clone(),
            reason_summary: reason_summary.clone(),
            signal_weights: signal_weights.clone(),
        };

        Explanation {
            signals,
            signal_weights,
            model_prediction,
            reason,
            reason_summary,
            recommendation,
        }
    }
}

impl Default for Explainer {
    fn default() -> Self {
        Self::new()
    }
}
