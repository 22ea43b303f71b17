// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、测试数据生成等功能
// ==========================================

use hotel_pricing_dss::db::{init_schema, open_sqlite_connection};
use hotel_pricing_dss::domain::room::Room;
use rusqlite::Connection;
use std::error::Error;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化库结构
///
/// # 返回
/// - NamedTempFile: 临时数据库文件(需要保持存活)
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 打开测试数据库连接(共享互斥锁形式)
pub fn open_shared_conn(db_path: &str) -> Result<Arc<Mutex<Connection>>, Box<dyn Error>> {
    let conn = open_sqlite_connection(db_path)?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// 创建测试用的房型
pub fn create_test_room(
    id: &str,
    current_price: f64,
    occupancy: f64,
    competitor_prices: Vec<f64>,
) -> Room {
    Room {
        id: id.to_string(),
        name: format!("测试房型-{}", id),
        current_price,
        occupancy,
        competitor_prices,
    }
}
