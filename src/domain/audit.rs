// ==========================================
// 酒店房价决策支持系统 - 审计领域模型
// ==========================================
// 职责: 审批应用的审计追踪记录
// 红线: 所有写入必须记录;审计记录只追加,不修改不删除
// 对齐: audit_log 表
// ==========================================

use crate::domain::pricing::{Approval, Explanation};
use crate::domain::types::Intent;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// AppliedChange - 单房型应用记录
// ==========================================
// 仅批准的房型产生应用记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedChange {
    /// 房型ID
    pub id: String,
    /// 房型名称
    pub name: String,
    /// 应用时重新推导的建议价(基于变更前房价)
    pub proposed: f64,
    /// 审批标志(应用记录中恒为 true)
    pub approved: bool,
    /// 最终写入的价格(操作员确认值优先于建议价)
    pub final_price: f64,
    /// 基于已更新房价重新推导的解释,供审计回溯
    pub explanation: Explanation,
    /// 头部信号标签
    pub reason_summary: Vec<String>,
}

// ==========================================
// AuditEntry - 审计条目
// ==========================================
// 每次审批应用调用恰好生成一条,创建后不可变
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// 审计ID
    pub audit_id: String,
    /// 创建时间戳
    pub created_at: NaiveDateTime,
    /// 操作员标识
    pub operator: String,
    /// 操作员的原始请求文本
    pub prompt: String,
    /// 归一化后的调价意图
    pub intent: Intent,
    /// 本次调用收到的完整审批列表(含未批准项)
    pub approvals: Vec<Approval>,
    /// 实际应用的变更列表(可为空)
    pub applied: Vec<AppliedChange>,
}

impl AuditEntry {
    /// 创建新的审计条目
    ///
    /// # 参数
    /// - `operator`: 操作员标识
    /// - `prompt`: 原始请求文本
    /// - `intent`: 调价意图
    /// - `approvals`: 完整审批列表
    /// - `applied`: 实际应用的变更列表
    pub fn new(
        operator: &str,
        prompt: &str,
        intent: Intent,
        approvals: Vec<Approval>,
        applied: Vec<AppliedChange>,
    ) -> Self {
        Self {
            audit_id: Uuid::new_v4().to_string(),
            created_at: Utc::now().naive_utc(),
            operator: operator.to_string(),
            prompt: prompt.to_string(),
            intent,
            approvals,
            applied,
        }
    }
}
