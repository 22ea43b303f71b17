// ==========================================
// 酒店房价决策支持系统 - 模型训练引擎
// ==========================================
// 职责: 基于当前房型集合拟合线性价格模型
// 输入: 房型集合(可为空,空集得到初始权重)
// 输出: 4 元权重向量 + 训练报告
// 红线: 无随机性,相同输入必须得到逐位一致的权重
// ==========================================

use crate::config::TrainingParams;
use crate::domain::pricing::{FeatureVector, ModelWeights};
use crate::domain::room::Room;

/// 初始权重,结构上对应合成目标的系数先验
/// 顺序: [intercept, current_price, occupancy, competitor_avg]
pub const INITIAL_WEIGHTS: [f64; 4] = [0.0, 0.5, 0.5, 0.2];

/// 出租率基线,目标函数中偏离此值的部分才参与调价
pub const OCCUPANCY_BASELINE: f64 = 0.6;

// ==========================================
// TrainingReport - 训练报告
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingReport {
    /// 实际执行的轮数
    pub epochs_run: u32,
    /// 最后一轮的总平方误差
    pub final_loss: f64,
    /// 是否因发散保护提前终止
    pub diverged: bool,
}

// ==========================================
// ModelTrainer - 模型训练引擎
// ==========================================
// 无状态引擎,不注入仓储依赖,数据由调用方加载
pub struct ModelTrainer {
    params: TrainingParams,
}

impl ModelTrainer {
    /// 构造函数(使用默认训练参数)
    pub fn new() -> Self {
        Self {
            params: TrainingParams::default(),
        }
    }

    /// 使用指定训练参数构造
    pub fn with_params(params: TrainingParams) -> Self {
        Self { params }
    }

    /// 合成回归目标
    ///
    /// 无外部真值标签,以"向竞品均价靠拢 + 按出租率偏离修正"
    /// 构造自监督目标:
    /// target = p + 0.5×(竞品均价 − p) + 0.2×(出租率 − 0.6)×p
    pub fn synthetic_target(room: &Room) -> f64 {
        let p = room.current_price;
        p + 0.5 * (room.competitor_avg() - p) + 0.2 * (room.occupancy - OCCUPANCY_BASELINE) * p
    }

    /// 训练模型权重
    ///
    /// # 参数
    /// - `rooms`: 当前房型集合
    ///
    /// # 返回
    /// 4 元权重向量;空集合直接返回初始权重
    pub fn train(&self, rooms: &[Room]) -> ModelWeights {
        self.train_with_report(rooms).0
    }

    /// 训练模型权重并返回训练报告
    ///
    /// 固定轮数批量梯度下降,平方误差损失:
    /// - 总损失低于容差时提前收敛退出
    /// - 总损失连续上升超过耐心值时触发发散保护,
    ///   终止训练并回退到已观测到的最优权重
    pub fn train_with_report(&self, rooms: &[Room]) -> (ModelWeights, TrainingReport) {
        let mut weights = INITIAL_WEIGHTS;

        if rooms.is_empty() {
            tracing::debug!("训练输入为空,返回初始权重");
            return (
                ModelWeights::new(weights),
                TrainingReport {
                    epochs_run: 0,
                    final_loss: 0.0,
                    diverged: false,
                },
            );
        }

        // 预提取特征与合成目标
        let samples: Vec<([f64; 4], f64)> = rooms
            .iter()
            .map(|room| {
                (
                    FeatureVector::from_room(room).values(),
                    Self::synthetic_target(room),
                )
            })
            .collect();

        let mut best_weights = weights;
        let mut best_loss = f64::INFINITY;
        let mut prev_loss = f64::INFINITY;
        let mut rising_epochs: u32 = 0;
        let mut diverged = false;
        let mut epochs_run: u32 = 0;
        let mut loss = 0.0;

        for epoch in 0..self.params.max_epochs {
            // 批量梯度与总损失
            let mut gradient = [0.0f64; 4];
            loss = 0.0;
            for (features, target) in &samples {
                let prediction: f64 = weights
                    .iter()
                    .zip(features.iter())
                    .map(|(w, x)| w * x)
                    .sum();
                let error = prediction - target;
                loss += error * error;
                for (g, x) in gradient.iter_mut().zip(features.iter()) {
                    *g += error * x;
                }
            }
            epochs_run = epoch + 1;

            // 记录最优权重(当前损失对应更新前的权重)
            if loss < best_loss {
                best_loss = loss;
                best_weights = weights;
            }

            // 收敛提前退出
            if loss < self.params.loss_tolerance {
                break;
            }

            // 发散保护: 损失连续上升达到耐心值即终止
            if loss > prev_loss {
                rising_epochs += 1;
                if rising_epochs >= self.params.divergence_patience {
                    diverged = true;
                    weights = best_weights;
                    tracing::warn!(
                        epoch = epochs_run,
                        loss,
                        best_loss,
                        "训练发散,终止并回退到最优权重"
                    );
                    break;
                }
            } else {
                rising_epochs = 0;
            }
            prev_loss = loss;

            // 权重更新
            for (w, g) in weights.iter_mut().zip(gradient.iter()) {
                *w -= self.params.learning_rate * g;
            }
        }

        tracing::debug!(epochs = epochs_run, loss, diverged, "模型训练完成");
        (
            ModelWeights::new(weights),
            TrainingReport {
                epochs_run,
                final_loss: loss,
                diverged,
            },
        )
    }
}

impl Default for ModelTrainer {
    fn default() -> Self {
        Self::new()
    }
}
