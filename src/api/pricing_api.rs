// ==========================================
// 酒店房价决策支持系统 - 定价业务接口
// ==========================================
// 职责: 建议生成与审批应用的业务编排
// 流程: 加载集合 → 重新训练 → 推荐/解释 → 乐观校验持久化 → 追加审计
// 红线: 人工最终控制权,仅批准项落库
// 红线: 所有写入必须记录(审计追加为尽力而为,不阻断主写入)
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::parse_approvals;
use crate::config::{ConfigManager, GuardrailParams, TrainingParams};
use crate::domain::audit::{AppliedChange, AuditEntry};
use crate::domain::pricing::{Explanation, Recommendation};
use crate::domain::room::Room;
use crate::domain::types::Intent;
use crate::engine::explainer::Explainer;
use crate::engine::recommender::Recommender;
use crate::engine::trainer::ModelTrainer;
use crate::repository::audit_repo::AuditLogRepository;
use crate::repository::room_repo::RoomRepository;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ==========================================
// 请求/响应结构
// ==========================================

/// 建议生成响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestAllResponse {
    /// 每房型一条推荐(审批界面展示单元)
    pub suggestions: Vec<Recommendation>,
    /// 每房型一条完整解释(含信号分解)
    pub analyses: Vec<Explanation>,
}

/// 审批应用的调用上下文
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyContext {
    /// 操作员标识
    pub operator: String,
    /// 操作员的原始请求文本
    pub prompt: String,
    /// 归一化后的调价意图
    pub intent: Intent,
}

/// 审批应用响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyResponse {
    /// 持久化后的完整房型集合
    pub updated_rooms: Vec<Room>,
    /// 本次调用生成的审计条目
    pub audit: AuditEntry,
}

// ==========================================
// PricingApi - 定价业务接口
// ==========================================
pub struct PricingApi {
    room_repo: RoomRepository,
    audit_repo: AuditLogRepository,
    config: ConfigManager,
}

impl PricingApi {
    /// 创建新的 PricingApi 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ApiResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 从已有连接创建(同一连接上的仓储共享互斥锁,单进程内天然串行写入)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ApiResult<Self> {
        let config = ConfigManager::from_connection(conn.clone())
            .map_err(|e| ApiError::InternalError(e.to_string()))?;
        Ok(Self {
            room_repo: RoomRepository::from_connection(conn.clone()),
            audit_repo: AuditLogRepository::from_connection(conn),
            config,
        })
    }

    /// 加载引擎参数(缺省回退内置默认值)
    fn load_params(&self) -> ApiResult<(TrainingParams, GuardrailParams)> {
        let training = self
            .config
            .load_training_params()
            .map_err(|e| ApiError::InternalError(e.to_string()))?;
        let guardrails = self
            .config
            .load_guardrail_params()
            .map_err(|e| ApiError::InternalError(e.to_string()))?;
        Ok((training, guardrails))
    }

    // ==========================================
    // 建议生成
    // ==========================================

    /// 为全部房型生成调价建议与解释
    ///
    /// 每次调用都从当前集合重新训练模型,无跨请求模型状态
    pub fn suggest_all(&self, intent: Intent) -> ApiResult<SuggestAllResponse> {
        let (training, guardrails) = self.load_params()?;
        let collection = self.room_repo.load_collection()?;
        tracing::info!(
            room_count = collection.rooms.len(),
            intent = %intent,
            "生成调价建议"
        );
        Ok(Self::suggest_for_rooms(
            &collection.rooms,
            intent,
            training,
            guardrails,
        ))
    }

    /// 对给定房型集合生成建议(纯计算,不触碰持久化)
    pub fn suggest_for_rooms(
        rooms: &[Room],
        intent: Intent,
        training: TrainingParams,
        guardrails: GuardrailParams,
    ) -> SuggestAllResponse {
        let trainer = ModelTrainer::with_params(training);
        let explainer = Explainer::with_recommender(Recommender::with_params(guardrails));
        let weights = trainer.train(rooms);

        let analyses: Vec<Explanation> = rooms
            .iter()
            .map(|room| explainer.explain(&weights, room, intent))
            .collect();
        let suggestions: Vec<Recommendation> = analyses
            .iter()
            .map(|analysis| analysis.recommendation.clone())
            .collect();

        SuggestAllResponse {
            suggestions,
            analyses,
        }
    }

    // ==========================================
    // 审批应用
    // ==========================================

    /// 应用操作员审批
    ///
    /// 每房型独立评估: 有匹配审批且 approved=true 的房型,
    /// 其价格被更新为操作员确认值;其余房型保持不动。
    /// 模型在应用时从当前集合重新训练(不复用建议阶段的权重),
    /// 审计解释基于已更新的房价重新推导。
    ///
    /// # 参数
    /// - `payload`: 审批列表的宽松 JSON 载荷
    /// - `context`: 操作员/原始请求/意图上下文
    ///
    /// # 返回
    /// - Ok(ApplyResponse): 持久化成功(审计追加失败仅告警,不回滚)
    /// - Err(InvalidInput): 载荷不合法,任何状态均未变更
    /// - Err(OptimisticLockFailure): 集合版本冲突,本次写入整体放弃
    pub fn apply_approvals(
        &self,
        payload: &JsonValue,
        context: &ApplyContext,
    ) -> ApiResult<ApplyResponse> {
        // 1. 校验先行,失败则集合与日志均未触碰
        let approvals = parse_approvals(payload)?;

        // 2. 加载当前集合(带版本号)
        let collection = self.room_repo.load_collection()?;

        // 3. 基于当前集合重新训练
        let (training, guardrails) = self.load_params()?;
        let trainer = ModelTrainer::with_params(training);
        let recommender = Recommender::with_params(guardrails);
        let explainer = Explainer::with_recommender(Recommender::with_params(guardrails));
        let weights = trainer.train(&collection.rooms);

        // 审批按房型ID索引,同ID重复时首条生效
        let mut lookup: HashMap<&str, &crate::domain::pricing::Approval> = HashMap::new();
        for approval in &approvals {
            lookup.entry(approval.id.as_str()).or_insert(approval);
        }

        // 4. 逐房型独立应用
        let mut rooms = collection.rooms;
        let mut applied: Vec<AppliedChange> = Vec::new();
        for room in rooms.iter_mut() {
            let approval = match lookup.get(room.id.as_str()) {
                Some(approval) if approval.approved => *approval,
                _ => continue,
            };

            // 应用时重新推导的建议价(基于变更前房价)
            let proposed = recommender
                .recommend(room, context.intent, Some(&weights))
                .suggested;

            // 操作员确认值优先于建议价
            room.current_price = approval.suggested;

            // 审计解释基于已更新的房价推导
            let explanation = explainer.explain(&weights, room, context.intent);
            applied.push(AppliedChange {
                id: room.id.clone(),
                name: room.name.clone(),
                proposed,
                approved: true,
                final_price: approval.suggested,
                reason_summary: explanation.reason_summary.clone(),
                explanation,
            });
        }

        // 5. 整集合持久化(乐观版本校验),失败则本次应用整体失败
        self.room_repo
            .replace_collection(&rooms, collection.revision)?;

        // 6. 审计追加为尽力而为: 失败仅告警,主写入不回滚
        let audit = AuditEntry::new(
            &context.operator,
            &context.prompt,
            context.intent,
            approvals,
            applied,
        );
        if let Err(e) = self.audit_repo.append(&audit) {
            tracing::warn!(audit_id = %audit.audit_id, error = %e, "审计日志追加失败");
        }

        tracing::info!(
            operator = %context.operator,
            intent = %context.intent,
            approval_count = audit.approvals.len(),
            applied_count = audit.applied.len(),
            "审批应用完成"
        );

        Ok(ApplyResponse {
            updated_rooms: rooms,
            audit,
        })
    }

    // ==========================================
    // 审计查询
    // ==========================================

    /// 查询最近的审计条目(时间降序)
    pub fn list_audit_trail(&self, limit: u32) -> ApiResult<Vec<AuditEntry>> {
        Ok(self.audit_repo.list_recent(limit)?)
    }
}
