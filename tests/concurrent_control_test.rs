// ==========================================
// 并发控制测试
// ==========================================
// 测试目标: 整集合替换的乐观版本校验
// 覆盖范围: 正常推进/过期版本拒绝/冲突后重载恢复
// ==========================================

mod test_helpers;

use hotel_pricing_dss::repository::error::RepositoryError;
use hotel_pricing_dss::repository::room_repo::RoomRepository;
use test_helpers::{create_test_db, create_test_room, open_shared_conn};

// ==========================================
// 测试用例 1: 正常版本推进
// ==========================================

#[test]
fn test_replace_collection_bumps_revision() {
    let (_guard, db_path) = create_test_db().unwrap();
    let repo = RoomRepository::from_connection(open_shared_conn(&db_path).unwrap());

    let rooms = vec![create_test_room("A", 100.0, 0.6, vec![110.0])];
    let collection = repo.load_collection().unwrap();
    assert_eq!(collection.revision, 0);

    let new_revision = repo.replace_collection(&rooms, collection.revision).unwrap();
    assert_eq!(new_revision, 1);
    assert_eq!(repo.load_collection().unwrap().revision, 1);
}

// ==========================================
// 测试用例 2: 过期版本整体拒绝
// ==========================================

#[test]
fn test_stale_revision_rejected() {
    let (_guard, db_path) = create_test_db().unwrap();
    let repo = RoomRepository::from_connection(open_shared_conn(&db_path).unwrap());

    let rooms_v1 = vec![create_test_room("A", 100.0, 0.6, vec![110.0])];
    let rooms_v2 = vec![create_test_room("A", 130.0, 0.6, vec![110.0])];

    // 两个调用方同时基于 revision=0 加载
    let stale_revision = repo.load_collection().unwrap().revision;

    // 第一个写入成功
    repo.replace_collection(&rooms_v1, stale_revision).unwrap();

    // 第二个写入基于过期版本,必须整体拒绝
    let err = repo
        .replace_collection(&rooms_v2, stale_revision)
        .unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::OptimisticLockFailure {
            expected: 0,
            actual: 1
        }
    ));

    // 被拒绝的写入未造成任何修改(丢失更新被阻止)
    let collection = repo.load_collection().unwrap();
    assert_eq!(collection.revision, 1);
    assert_eq!(collection.rooms[0].current_price, 100.0);
}

// ==========================================
// 测试用例 3: 冲突后重载即可恢复
// ==========================================

#[test]
fn test_conflict_recovers_after_reload() {
    let (_guard, db_path) = create_test_db().unwrap();
    let repo = RoomRepository::from_connection(open_shared_conn(&db_path).unwrap());

    let rooms_v1 = vec![create_test_room("A", 100.0, 0.6, vec![110.0])];
    let rooms_v2 = vec![create_test_room("A", 130.0, 0.6, vec![110.0])];

    let revision = repo.load_collection().unwrap().revision;
    repo.replace_collection(&rooms_v1, revision).unwrap();

    assert!(repo.replace_collection(&rooms_v2, revision).is_err());

    // 重新加载取得新版本号后写入成功
    let fresh = repo.load_collection().unwrap().revision;
    repo.replace_collection(&rooms_v2, fresh).unwrap();
    assert_eq!(
        repo.load_collection().unwrap().rooms[0].current_price,
        130.0
    );
}

// ==========================================
// 测试用例 4: 跨连接的冲突检测
// ==========================================

#[test]
fn test_conflict_detected_across_connections() {
    let (_guard, db_path) = create_test_db().unwrap();
    let repo_a = RoomRepository::from_connection(open_shared_conn(&db_path).unwrap());
    let repo_b = RoomRepository::from_connection(open_shared_conn(&db_path).unwrap());

    let rooms = vec![create_test_room("A", 100.0, 0.6, vec![])];
    let revision_a = repo_a.load_collection().unwrap().revision;
    let revision_b = repo_b.load_collection().unwrap().revision;

    repo_a.replace_collection(&rooms, revision_a).unwrap();

    // 另一连接上的写入同样被版本校验拦住
    let err = repo_b.replace_collection(&rooms, revision_b).unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::OptimisticLockFailure { .. }
    ));
}
