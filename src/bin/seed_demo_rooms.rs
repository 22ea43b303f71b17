// ==========================================
// 酒店房价决策支持系统 - 演示数据种子工具
// ==========================================
// 用法: seed_demo_rooms [db_path]
// 职责: 初始化库结构并写入一组演示房型
// ==========================================

use hotel_pricing_dss::db::{default_db_path, init_schema, open_sqlite_connection};
use hotel_pricing_dss::domain::room::Room;
use hotel_pricing_dss::repository::room_repo::RoomRepository;
use std::error::Error;
use std::sync::{Arc, Mutex};

fn demo_rooms() -> Vec<Room> {
    vec![
        Room {
            id: "standard".to_string(),
            name: "标准大床房".to_string(),
            current_price: 329.0,
            occupancy: 0.62,
            competitor_prices: vec![349.0, 315.0, 338.0],
        },
        Room {
            id: "twin".to_string(),
            name: "高级双床房".to_string(),
            current_price: 389.0,
            occupancy: 0.71,
            competitor_prices: vec![399.0, 405.0],
        },
        Room {
            id: "deluxe".to_string(),
            name: "豪华江景房".to_string(),
            current_price: 568.0,
            occupancy: 0.48,
            competitor_prices: vec![529.0, 586.0, 549.0, 602.0],
        },
        Room {
            id: "suite".to_string(),
            name: "行政套房".to_string(),
            current_price: 888.0,
            occupancy: 0.35,
            competitor_prices: vec![],
        },
    ]
}

fn main() -> Result<(), Box<dyn Error>> {
    hotel_pricing_dss::logging::init();

    let db_path = std::env::args().nth(1).unwrap_or_else(default_db_path);
    tracing::info!("使用数据库: {}", db_path);

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    let repo = RoomRepository::from_connection(Arc::new(Mutex::new(conn)));
    let rooms = demo_rooms();
    for room in &rooms {
        repo.upsert(room)?;
    }

    tracing::info!(room_count = rooms.len(), "演示房型写入完成");
    Ok(())
}
