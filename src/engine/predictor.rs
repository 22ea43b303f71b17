// ==========================================
// 酒店房价决策支持系统 - 价格预测
// ==========================================
// 职责: 权重与特征向量的点积估价
// ==========================================

use crate::domain::pricing::{FeatureVector, ModelWeights};
use crate::domain::room::Room;

/// 模型价格估计
///
/// 按 [intercept, current_price, occupancy, competitor_avg]
/// 的位置对齐做点积,纯函数,无失败路径
pub fn predict(weights: &ModelWeights, room: &Room) -> f64 {
    let features = FeatureVector::from_room(room).values();
    weights
        .values
        .iter()
        .zip(features.iter())
        .map(|(w, x)| w * x)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_dot_product() {
        let room = Room {
            id: "R001".to_string(),
            name: "标准大床房".to_string(),
            current_price: 100.0,
            occupancy: 0.6,
            competitor_prices: vec![110.0, 90.0],
        };
        let weights = ModelWeights::new([0.0, 0.5, 0.5, 0.2]);
        // 0×1 + 0.5×100 + 0.5×0.6 + 0.2×100 = 70.3
        let prediction = predict(&weights, &room);
        assert!((prediction - 70.3).abs() < 1e-12);
    }
}
