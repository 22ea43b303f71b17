// ==========================================
// 酒店房价决策支持系统 - 房型数据仓储
// ==========================================
// 职责: 管理 room 表与集合版本号的读写
// 红线: Repository 不含业务逻辑,只做数据映射
// 红线: 整集合替换必须通过乐观版本校验,防止并发覆盖
// ==========================================

use crate::domain::room::Room;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// RoomCollection - 带版本号的房型集合
// ==========================================
#[derive(Debug, Clone)]
pub struct RoomCollection {
    /// 房型列表(按 seq_no 顺序)
    pub rooms: Vec<Room>,
    /// 集合版本号,整集合替换时校验并递增
    pub revision: i64,
}

// ==========================================
// RoomRepository - 房型仓储
// ==========================================
pub struct RoomRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RoomRepository {
    /// 创建新的房型仓储实例
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

    // ==========================================
    // 读取操作
    // ==========================================

    /// 加载完整房型集合与当前版本号
    pub fn load_collection(&self) -> RepositoryResult<RoomCollection> {
        let conn = self.get_conn()?;

        let revision: i64 = conn.query_row(
            "SELECT revision FROM room_collection_meta WHERE meta_id = 1",
            [],
            |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(
            r#"
            SELECT room_id, name, current_price, occupancy, competitor_prices_json
            FROM room
            ORDER BY seq_no
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut rooms = Vec::new();
        for row in rows {
            let (id, name, current_price, occupancy, competitors_json) = row?;
            let competitor_prices: Vec<f64> =
                serde_json::from_str(&competitors_json).map_err(|e| {
                    RepositoryError::ValidationError(format!(
                        "竞品价格反序列化失败 (room_id={}): {}",
                        id, e
                    ))
                })?;
            rooms.push(Room {
                id,
                name,
                current_price,
                occupancy,
                competitor_prices,
            });
        }

        Ok(RoomCollection { rooms, revision })
    }

    /// 按ID查询单个房型
    pub fn find_by_id(&self, room_id: &str) -> RepositoryResult<Option<Room>> {
        let conn = self.get_conn()?;

        let row = conn
            .query_row(
                r#"
                SELECT room_id, name, current_price, occupancy, competitor_prices_json
                FROM room WHERE room_id = ?1
                "#,
                params![room_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, f64>(2)?,
                        row.get::<_, f64>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((id, name, current_price, occupancy, competitors_json)) => {
                let competitor_prices: Vec<f64> = serde_json::from_str(&competitors_json)
                    .map_err(|e| {
                        RepositoryError::ValidationError(format!(
                            "竞品价格反序列化失败 (room_id={}): {}",
                            id, e
                        ))
                    })?;
                Ok(Some(Room {
                    id,
                    name,
                    current_price,
                    occupancy,
                    competitor_prices,
                }))
            }
            None => Ok(None),
        }
    }

    /// 房型数量
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM room", [], |row| row.get(0))?;
        Ok(count)
    }

    // ==========================================
    // 写入操作
    // ==========================================

    /// 整集合替换(事务内完成,带乐观版本校验)
    ///
    /// # 参数
    /// - `rooms`: 替换后的完整房型集合
    /// - `expected_revision`: 调用方加载集合时拿到的版本号
    ///
    /// # 返回
    /// - Ok(i64): 新版本号(= expected_revision + 1)
    /// - Err(OptimisticLockFailure): 版本号已被其他调用推进,本次写入整体放弃
    pub fn replace_collection(
        &self,
        rooms: &[Room],
        expected_revision: i64,
    ) -> RepositoryResult<i64> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let actual: i64 = tx.query_row(
            "SELECT revision FROM room_collection_meta WHERE meta_id = 1",
            [],
            |row| row.get(0),
        )?;
        if actual != expected_revision {
            return Err(RepositoryError::OptimisticLockFailure {
                expected: expected_revision,
                actual,
            });
        }

        tx.execute("DELETE FROM room", [])?;
        for (seq_no, room) in rooms.iter().enumerate() {
            let competitors_json = serde_json::to_string(&room.competitor_prices)
                .map_err(|e| RepositoryError::InternalError(format!("竞品价格序列化失败: {}", e)))?;
            tx.execute(
                r#"
                INSERT INTO room (room_id, name, current_price, occupancy, competitor_prices_json, seq_no)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![
                    room.id,
                    room.name,
                    room.current_price,
                    room.occupancy,
                    competitors_json,
                    seq_no as i64,
                ],
            )?;
        }

        let new_revision = actual + 1;
        tx.execute(
            "UPDATE room_collection_meta SET revision = ?1, updated_at = datetime('now') WHERE meta_id = 1",
            params![new_revision],
        )?;

        tx.commit()?;
        Ok(new_revision)
    }

    /// 插入或更新单个房型(导入/种子数据用)
    ///
    /// 已存在的房型保留原 seq_no,新房型追加到末尾
    pub fn upsert(&self, room: &Room) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let existing_seq: Option<i64> = conn
            .query_row(
                "SELECT seq_no FROM room WHERE room_id = ?1",
                params![room.id],
                |row| row.get(0),
            )
            .optional()?;

        let seq_no = match existing_seq {
            Some(seq) => seq,
            None => conn.query_row(
                "SELECT COALESCE(MAX(seq_no), -1) + 1 FROM room",
                [],
                |row| row.get(0),
            )?,
        };

        let competitors_json = serde_json::to_string(&room.competitor_prices)
            .map_err(|e| RepositoryError::InternalError(format!("竞品价格序列化失败: {}", e)))?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO room
                (room_id, name, current_price, occupancy, competitor_prices_json, seq_no, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, datetime('now'))
            "#,
            params![
                room.id,
                room.name,
                room.current_price,
                room.occupancy,
                competitors_json,
                seq_no,
            ],
        )?;
        Ok(())
    }
}
