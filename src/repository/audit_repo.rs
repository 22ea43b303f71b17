// ==========================================
// 酒店房价决策支持系统 - 审计日志数据仓储
// ==========================================
// 红线: 所有写入必须记录
// 红线: 审计日志只追加,本仓储不提供更新/删除接口
// 对齐: audit_log 表
// ==========================================

use crate::domain::audit::{AppliedChange, AuditEntry};
use crate::domain::pricing::Approval;
use crate::domain::types::Intent;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

/// 时间戳列存储格式
const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ==========================================
// AuditLogRepository - 审计日志仓储
// ==========================================
pub struct AuditLogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AuditLogRepository {
    /// 创建新的审计日志仓储实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 追加审计条目
    ///
    /// # 返回
    /// - Ok(audit_id): 成功追加
    /// - Err(...): 数据库错误(调用方决定是否降级为尽力而为)
    pub fn append(&self, entry: &AuditEntry) -> RepositoryResult<String> {
        let conn = self.get_conn()?;

        let approvals_json = serde_json::to_string(&entry.approvals)
            .map_err(|e| RepositoryError::InternalError(format!("审批列表序列化失败: {}", e)))?;
        let applied_json = serde_json::to_string(&entry.applied)
            .map_err(|e| RepositoryError::InternalError(format!("应用列表序列化失败: {}", e)))?;

        conn.execute(
            r#"
            INSERT INTO audit_log (
                audit_id, created_at, operator, prompt, intent,
                approvals_json, applied_json
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                entry.audit_id,
                entry.created_at.format(TS_FORMAT).to_string(),
                entry.operator,
                entry.prompt,
                entry.intent.as_str(),
                approvals_json,
                applied_json,
            ],
        )?;

        Ok(entry.audit_id.clone())
    }

    /// 查询最近的审计条目(时间降序)
    ///
    /// # 参数
    /// - `limit`: 返回条数上限
    pub fn list_recent(&self, limit: u32) -> RepositoryResult<Vec<AuditEntry>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT audit_id, created_at, operator, prompt, intent,
                   approvals_json, applied_json
            FROM audit_log
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?1
            "#,
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (audit_id, created_at, operator, prompt, intent, approvals_json, applied_json) =
                row?;

            let created_at = NaiveDateTime::parse_from_str(&created_at, TS_FORMAT)
                .map_err(|e| {
                    RepositoryError::ValidationError(format!(
                        "审计时间戳解析失败 (audit_id={}): {}",
                        audit_id, e
                    ))
                })?;
            let approvals: Vec<Approval> = serde_json::from_str(&approvals_json).map_err(|e| {
                RepositoryError::ValidationError(format!(
                    "审批列表反序列化失败 (audit_id={}): {}",
                    audit_id, e
                ))
            })?;
            let applied: Vec<AppliedChange> = serde_json::from_str(&applied_json).map_err(|e| {
                RepositoryError::ValidationError(format!(
                    "应用列表反序列化失败 (audit_id={}): {}",
                    audit_id, e
                ))
            })?;

            entries.push(AuditEntry {
                audit_id,
                created_at,
                operator,
                prompt,
                intent: Intent::from_str(&intent),
                approvals,
                applied,
            });
        }

        Ok(entries)
    }

    /// 审计条目总数
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM audit_log", [], |row| row.get(0))?;
        Ok(count)
    }
}
