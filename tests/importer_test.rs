// ==========================================
// 房型 CSV 导入测试
// ==========================================
// 测试目标: 逐行校验、批内去重与导入汇总
// ==========================================

mod test_helpers;

use hotel_pricing_dss::importer::room_importer::RoomCsvImporter;
use hotel_pricing_dss::repository::room_repo::RoomRepository;
use std::io::Write;
use std::sync::Arc;
use test_helpers::{create_test_db, open_shared_conn};

fn write_csv(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// ==========================================
// 测试用例 1: 正常导入
// ==========================================

#[test]
fn test_import_valid_rows() {
    let (_guard, db_path) = create_test_db().unwrap();
    let repo = Arc::new(RoomRepository::from_connection(
        open_shared_conn(&db_path).unwrap(),
    ));
    let importer = RoomCsvImporter::new(repo.clone());

    let csv_file = write_csv(
        "id,name,current_price,occupancy,competitor_prices\n\
         std,标准大床房,329,0.62,349;315\n\
         dlx,豪华江景房,568,0.48,529\n\
         ste,行政套房,888,0.35,\n",
    );

    let summary = importer.import_file(csv_file.path()).unwrap();
    assert_eq!(summary.total_rows, 3);
    assert_eq!(summary.imported, 3);
    assert_eq!(summary.skipped, 0);
    assert!(summary.errors.is_empty());

    let std_room = repo.find_by_id("std").unwrap().unwrap();
    assert_eq!(std_room.name, "标准大床房");
    assert_eq!(std_room.competitor_prices, vec![349.0, 315.0]);

    // 竞品列为空 → 空列表
    let suite = repo.find_by_id("ste").unwrap().unwrap();
    assert!(suite.competitor_prices.is_empty());
}

// ==========================================
// 测试用例 2: 非法行跳过并计入汇总
// ==========================================

#[test]
fn test_import_skips_invalid_rows() {
    let (_guard, db_path) = create_test_db().unwrap();
    let repo = Arc::new(RoomRepository::from_connection(
        open_shared_conn(&db_path).unwrap(),
    ));
    let importer = RoomCsvImporter::new(repo.clone());

    let csv_file = write_csv(
        "id,name,current_price,occupancy,competitor_prices\n\
         ok1,正常房型,100,0.5,\n\
         bad1,出租率越界,100,1.5,\n\
         bad2,负价格,-10,0.5,\n\
         bad3,竞品非法,100,0.5,abc\n",
    );

    let summary = importer.import_file(csv_file.path()).unwrap();
    assert_eq!(summary.total_rows, 4);
    assert_eq!(summary.imported, 1);
    assert_eq!(summary.skipped, 3);
    assert_eq!(summary.errors.len(), 3);
    // 行号指向数据行(表头为第 1 行)
    assert_eq!(summary.errors[0].row_number, 3);

    assert_eq!(repo.count().unwrap(), 1);
}

// ==========================================
// 测试用例 3: 批内重复仅首行生效
// ==========================================

#[test]
fn test_import_deduplicates_within_batch() {
    let (_guard, db_path) = create_test_db().unwrap();
    let repo = Arc::new(RoomRepository::from_connection(
        open_shared_conn(&db_path).unwrap(),
    ));
    let importer = RoomCsvImporter::new(repo.clone());

    let csv_file = write_csv(
        "id,name,current_price,occupancy,competitor_prices\n\
         std,首次出现,100,0.5,\n\
         std,重复出现,300,0.6,\n",
    );

    let summary = importer.import_file(csv_file.path()).unwrap();
    assert_eq!(summary.imported, 1);
    assert_eq!(summary.skipped, 1);

    let room = repo.find_by_id("std").unwrap().unwrap();
    assert_eq!(room.name, "首次出现");
    assert_eq!(room.current_price, 100.0);
}
