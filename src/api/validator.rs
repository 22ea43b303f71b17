// ==========================================
// 酒店房价决策支持系统 - 审批输入校验器
// ==========================================
// 职责: 审批载荷的结构与数值校验
// 红线: 人工最终控制权,校验失败必须在任何状态变更之前拒绝
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::pricing::Approval;
use serde_json::Value as JsonValue;

/// 解析并校验审批载荷
///
/// 外层传输把审批列表作为宽松 JSON 交给核心,本函数负责把它
/// 收紧为强类型列表:
/// - 载荷必须是数组
/// - 每个元素必须含非空字符串 id、布尔 approved、有限数值 suggested
/// - 批准项(approved=true)的 suggested 必须为正数
///
/// 所有违规一次性收集并汇总成单个 InvalidInput 错误返回,
/// 此时房型集合与审计日志均未被触碰
///
/// # 返回
/// - Ok(Vec<Approval>): 校验通过的审批列表
/// - Err(InvalidInput): 载荷不合法,带逐项原因
pub fn parse_approvals(payload: &JsonValue) -> ApiResult<Vec<Approval>> {
    let items = payload
        .as_array()
        .ok_or_else(|| ApiError::InvalidInput("审批载荷必须是数组".to_string()))?;

    let mut approvals = Vec::with_capacity(items.len());
    let mut violations: Vec<String> = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let obj = match item.as_object() {
            Some(obj) => obj,
            None => {
                violations.push(format!("第{}项: 审批记录必须是对象", index + 1));
                continue;
            }
        };

        let id = match obj.get("id").and_then(|v| v.as_str()) {
            Some(id) if !id.trim().is_empty() => id.to_string(),
            _ => {
                violations.push(format!("第{}项: 缺少非空字符串 id", index + 1));
                continue;
            }
        };

        let approved = match obj.get("approved").and_then(|v| v.as_bool()) {
            Some(approved) => approved,
            None => {
                violations.push(format!("第{}项 (id={}): 缺少布尔 approved", index + 1, id));
                continue;
            }
        };

        let suggested = match obj.get("suggested").and_then(|v| v.as_f64()) {
            Some(suggested) if suggested.is_finite() => suggested,
            _ => {
                violations.push(format!(
                    "第{}项 (id={}): 缺少有限数值 suggested",
                    index + 1,
                    id
                ));
                continue;
            }
        };

        if approved && suggested <= 0.0 {
            violations.push(format!(
                "第{}项 (id={}): 批准项的 suggested 必须为正数,实际为 {}",
                index + 1,
                id,
                suggested
            ));
            continue;
        }

        approvals.push(Approval {
            id,
            approved,
            suggested,
        });
    }

    if !violations.is_empty() {
        return Err(ApiError::InvalidInput(format!(
            "审批载荷校验失败: {}",
            violations.join("; ")
        )));
    }

    Ok(approvals)
}
