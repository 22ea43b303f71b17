// ==========================================
// 酒店房价决策支持系统 - 定价领域模型
// ==========================================
// 职责: 特征向量、模型权重、推荐结果与解释结构
// 红线: 模型权重每次请求重新训练,不跨请求持久化
// ==========================================

use crate::domain::room::Room;
use crate::domain::types::Signal;
use serde::{Deserialize, Serialize};

// ==========================================
// FeatureVector - 特征向量
// ==========================================
// 派生值对象,不持久化
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// 截距项,恒为 1
    pub intercept: f64,
    /// 当前房价
    pub current_price: f64,
    /// 出租率
    pub occupancy: f64,
    /// 竞品均价(竞品序列为空时为 0)
    pub competitor_avg: f64,
}

impl FeatureVector {
    /// 从房型记录派生特征向量(纯函数,无失败路径)
    pub fn from_room(room: &Room) -> Self {
        Self {
            intercept: 1.0,
            current_price: room.current_price,
            occupancy: room.occupancy,
            competitor_avg: room.competitor_avg(),
        }
    }

    /// 按信号位置顺序展开为数组
    /// 顺序: [intercept, current_price, occupancy, competitor_avg]
    pub fn values(&self) -> [f64; 4] {
        [
            self.intercept,
            self.current_price,
            self.occupancy,
            self.competitor_avg,
        ]
    }

    /// 取单个信号的特征值
    pub fn value_of(&self, signal: Signal) -> f64 {
        match signal {
            Signal::Intercept => self.intercept,
            Signal::CurrentPrice => self.current_price,
            Signal::Occupancy => self.occupancy,
            Signal::CompetitorAvg => self.competitor_avg,
        }
    }
}

// ==========================================
// ModelWeights - 模型权重
// ==========================================
// 与 FeatureVector 位置对齐的 4 元权重向量
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelWeights {
    pub values: [f64; 4],
}

impl ModelWeights {
    pub fn new(values: [f64; 4]) -> Self {
        Self { values }
    }

    /// 取单个信号的权重
    pub fn weight_of(&self, signal: Signal) -> f64 {
        let idx = Signal::ALL
            .iter()
            .position(|s| *s == signal)
            .unwrap_or_default();
        self.values[idx]
    }
}

// ==========================================
// SignalContribution - 单信号贡献
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalContribution {
    /// 信号
    pub signal: Signal,
    /// 特征值
    pub value: f64,
    /// 贡献值 = 权重 × 特征值
    pub contribution: f64,
    /// 归一化权重 = 贡献值 / 贡献绝对值之和(全零时为 0)
    pub normalized_weight: f64,
}

// ==========================================
// PriceProposal - 建议价结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceProposal {
    /// 建议价(含保底价兜底,保留 2 位小数)
    pub suggested: f64,
    /// 相对当前房价的变动百分比
    pub delta_pct: f64,
}

// ==========================================
// Recommendation - 房型调价推荐
// ==========================================
// 驾驶舱/审批界面的展示单元
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// 房型ID
    pub id: String,
    /// 房型名称
    pub name: String,
    /// 当前房价
    pub current_price: f64,
    /// 竞品均价
    pub competitor_avg: f64,
    /// 出租率
    pub occupancy: f64,
    /// 展示用价格下界 = max(保底价, 0.8 × 当前房价)
    pub min_allowed: f64,
    /// 展示用价格上界 = 1.25 × 当前房价
    pub max_allowed: f64,
    /// 建议价
    pub suggested: f64,
    /// 变动百分比
    pub delta_pct: f64,
    /// 解释文案
    pub reason: String,
    /// 头部信号标签(按贡献绝对值降序取前 2)
    pub reason_summary: Vec<String>,
    /// 全部信号的贡献分解
    pub signal_weights: Vec<SignalContribution>,
}

// ==========================================
// Explanation - 推荐解释
// ==========================================
// 嵌入同房型/同意图的 Recommendation,供审计与展示复用
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explanation {
    /// 特征向量
    pub signals: FeatureVector,
    /// 信号贡献分解(按信号声明顺序)
    pub signal_weights: Vec<SignalContribution>,
    /// 模型价格估计
    pub model_prediction: f64,
    /// 解释文案
    pub reason: String,
    /// 头部信号标签
    pub reason_summary: Vec<String>,
    /// 同房型同意图的推荐结果
    pub recommendation: Recommendation,
}

// ==========================================
// Approval - 单房型审批决定
// ==========================================
// 红线: 人工最终控制权,未批准的房型一律不动
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Approval {
    /// 房型ID
    pub id: String,
    /// 是否批准
    pub approved: bool,
    /// 操作员确认的价格(可在建议价基础上人工修改)
    pub suggested: f64,
}
