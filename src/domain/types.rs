// ==========================================
// 酒店房价决策支持系统 - 领域类型定义
// ==========================================
// 职责: 调价意图与模型信号的枚举类型
// 红线: 等级制意图,不做自由文本解析(由外层对话解析产出)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 调价意图 (Intent)
// ==========================================
// 由操作员自然语言请求归一化得到的三值方向提示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Increase, // 涨价
    Decrease, // 降价
    Review,   // 仅评估,不加方向系数
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Increase => "increase",
            Intent::Decrease => "decrease",
            Intent::Review => "review",
        }
    }

    /// 从字符串解析意图,未知值回退为 Review (保守默认)
    pub fn from_str(s: &str) -> Self {
        match s {
            "increase" => Intent::Increase,
            "decrease" => Intent::Decrease,
            "review" => Intent::Review,
            _ => Intent::Review,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 模型信号 (Signal)
// ==========================================
// 线性模型的四个特征,声明顺序即权重向量的位置顺序,
// 同时是解释排序的并列打破顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Intercept,     // 截距项(恒为1)
    CurrentPrice,  // 当前房价
    Occupancy,     // 出租率
    CompetitorAvg, // 竞品均价
}

impl Signal {
    /// 全部信号,按权重向量位置顺序排列
    pub const ALL: [Signal; 4] = [
        Signal::Intercept,
        Signal::CurrentPrice,
        Signal::Occupancy,
        Signal::CompetitorAvg,
    ];

    /// 信号标签(用于解释文案与审计记录)
    pub fn label(&self) -> &'static str {
        match self {
            Signal::Intercept => "intercept",
            Signal::CurrentPrice => "current_price",
            Signal::Occupancy => "occupancy",
            Signal::CompetitorAvg => "competitor_avg",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
