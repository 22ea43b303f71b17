// ==========================================
// Explainer 引擎测试
// ==========================================
// 测试目标: 信号贡献分解、归一化、头部信号与解释文案
// ==========================================

mod test_helpers;

use hotel_pricing_dss::domain::pricing::ModelWeights;
use hotel_pricing_dss::domain::types::{Intent, Signal};
use hotel_pricing_dss::engine::explainer::Explainer;
use hotel_pricing_dss::engine::recommender::Recommender;
use test_helpers::create_test_room;

// ==========================================
// 测试用例 1: 贡献分解与归一化
// ==========================================

#[test]
fn test_contributions_and_normalization() {
    let room = create_test_room("A", 100.0, 0.6, vec![110.0, 90.0]);
    let weights = ModelWeights::new([0.0, 0.5, 0.5, 0.2]);
    let explainer = Explainer::new();

    let explanation = explainer.explain(&weights, &room, Intent::Review);

    // 贡献 = 权重 × 特征值: [0, 50, 0.3, 20]
    let contributions: Vec<f64> = explanation
        .signal_weights
        .iter()
        .map(|c| c.contribution)
        .collect();
    assert!((contributions[0] - 0.0).abs() < 1e-12);
    assert!((contributions[1] - 50.0).abs() < 1e-12);
    assert!((contributions[2] - 0.3).abs() < 1e-12);
    assert!((contributions[3] - 20.0).abs() < 1e-12);

    // 归一化基数 = 贡献绝对值之和
    let total_abs: f64 = contributions.iter().map(|c| c.abs()).sum();
    assert!((total_abs - 70.3).abs() < 1e-12);

    // 归一化权重绝对值之和 = 1
    let normalized_abs_sum: f64 = explanation
        .signal_weights
        .iter()
        .map(|c| c.normalized_weight.abs())
        .sum();
    assert!((normalized_abs_sum - 1.0).abs() < 1e-12);

    // 模型估价 = 贡献之和
    assert!((explanation.model_prediction - 70.3).abs() < 1e-12);
}

// ==========================================
// 测试用例 2: 全零贡献不除零
// ==========================================

#[test]
fn test_zero_contributions_no_division_by_zero() {
    let room = create_test_room("A", 100.0, 0.6, vec![110.0, 90.0]);
    let weights = ModelWeights::new([0.0, 0.0, 0.0, 0.0]);
    let explainer = Explainer::new();

    let explanation = explainer.explain(&weights, &room, Intent::Review);

    for entry in &explanation.signal_weights {
        assert_eq!(entry.contribution, 0.0);
        assert_eq!(entry.normalized_weight, 0.0);
    }
    // 并列时按信号声明顺序取头部信号
    assert_eq!(
        explanation.reason_summary,
        vec!["intercept".to_string(), "current_price".to_string()]
    );
}

// ==========================================
// 测试用例 3: 头部信号排序与并列打破
// ==========================================

#[test]
fn test_top_signals_by_abs_contribution() {
    let room = create_test_room("A", 100.0, 0.6, vec![110.0, 90.0]);
    let weights = ModelWeights::new([0.0, 0.5, 0.5, 0.2]);
    let explainer = Explainer::new();

    let explanation = explainer.explain(&weights, &room, Intent::Review);
    // |50| > |20| > |0.3| > |0|
    assert_eq!(
        explanation.reason_summary,
        vec!["current_price".to_string(), "competitor_avg".to_string()]
    );
}

#[test]
fn test_tie_breaks_by_declaration_order() {
    // 贡献 [0.5, 0.5, 0, 0] → intercept 与 current_price 并列,
    // 稳定排序保证 intercept 在前
    let room = create_test_room("A", 1.0, 0.0, vec![]);
    let weights = ModelWeights::new([0.5, 0.5, 0.0, 0.0]);
    let explainer = Explainer::new();

    let explanation = explainer.explain(&weights, &room, Intent::Review);
    assert_eq!(
        explanation.reason_summary,
        vec!["intercept".to_string(), "current_price".to_string()]
    );
}

// ==========================================
// 测试用例 4: 解释文案格式
// ==========================================

#[test]
fn test_reason_text_format() {
    let room = create_test_room("A", 100.0, 0.6, vec![110.0, 90.0]);
    let weights = ModelWeights::new([0.0, 0.5, 0.5, 0.2]);
    let explainer = Explainer::new();

    let explanation = explainer.explain(&weights, &room, Intent::Review);
    // 50/70.3 → 71%, 20/70.3 → 28%
    assert_eq!(
        explanation.reason,
        "Model $70.30 — top signals: current_price:71%, competitor_avg:28%"
    );
}

// ==========================================
// 测试用例 5: 嵌入推荐结果一致性
// ==========================================

#[test]
fn test_embedded_recommendation_consistency() {
    let room = create_test_room("A", 100.0, 0.6, vec![110.0, 90.0]);
    let weights = ModelWeights::new([0.0, 0.5, 0.5, 0.2]);
    let explainer = Explainer::new();

    let explanation = explainer.explain(&weights, &room, Intent::Increase);
    let recommendation = &explanation.recommendation;

    assert_eq!(recommendation.id, "A");
    assert_eq!(recommendation.current_price, 100.0);
    assert_eq!(recommendation.competitor_avg, 100.0);
    assert_eq!(recommendation.min_allowed, 80.0);
    assert_eq!(recommendation.max_allowed, 125.0);
    // 嵌入的建议价与推荐引擎直接计算结果逐位一致
    let expected = Recommender::new().recommend(&room, Intent::Increase, Some(&weights));
    assert_eq!(recommendation.suggested, expected.suggested);
    assert_eq!(recommendation.delta_pct, expected.delta_pct);
    assert_eq!(recommendation.reason, explanation.reason);
    assert_eq!(recommendation.reason_summary, explanation.reason_summary);
    assert_eq!(recommendation.signal_weights.len(), 4);

    // 特征向量信号顺序固定
    assert_eq!(explanation.signal_weights[0].signal, Signal::Intercept);
    assert_eq!(explanation.signal_weights[3].signal, Signal::CompetitorAvg);
}
