mod common;

#[test]
fn test_pool_connects_and_migrates() {
    let test_db = common::TestDb::new("test_pool_connects_and_migrates.db");
    let conn = test_db.pool().get();
    assert!(conn.is_ok());
}
