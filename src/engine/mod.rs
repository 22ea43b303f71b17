// ==========================================
// 酒店房价决策支持系统 - 引擎层
// ==========================================
// 职责: 训练/预测/解释/推荐的纯计算规则
// 红线: 引擎无状态,不持有仓储,不做持久化
// ==========================================

pub mod explainer;
pub mod predictor;
pub mod recommender;
pub mod trainer;

// 重导出引擎
pub use explainer::Explainer;
pub use predictor::predict;
pub use recommender::{round2, Recommender};
pub use trainer::{ModelTrainer, TrainingReport, INITIAL_WEIGHTS, OCCUPANCY_BASELINE};
