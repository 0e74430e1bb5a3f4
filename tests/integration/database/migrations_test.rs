//! Migration and file-backed database tests

use cloudboard::backend::cloudboard::db::{boards, nodes};
use cloudboard::backend::server::config::load_database;
use cloudboard::shared::board::CreateNodeRequest;
use cloudboard::shared::NodeKind;

use crate::assert_ok;
use crate::common::{create_test_pool, TestDatabase};

const TABLES: [&str; 8] = [
    "cloud_boards",
    "nodes",
    "connectors",
    "connections",
    "sorting_applications",
    "sorting_process_steps",
    "sorting_market_segments",
    "sorting_target_materials",
];

#[tokio::test]
async fn test_migrations_create_all_tables() {
    let pool = create_test_pool().await;
    for table in TABLES {
        let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind(table)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(exists, 1, "table {} missing", table);
    }
}

#[tokio::test]
async fn test_foreign_keys_enforced() {
    let pool = create_test_pool().await;
    let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys").fetch_one(&pool).await.unwrap();
    assert_eq!(enabled, 1);
}

#[tokio::test]
async fn test_file_database_survives_reopen() {
    let db = TestDatabase::new().await;
    let board = assert_ok!(boards::create_board(db.pool(), "Persistent", "user-1").await);
    assert_ok!(
        nodes::create_node(
            db.pool(),
            &CreateNodeRequest {
                id: None,
                board_id: board.id,
                name: "Kept".to_string(),
                x: 1.0,
                y: 2.0,
                kind: NodeKind::default(),
            },
        )
        .await
    );
    db.pool().close().await;

    // Migrations are idempotent on an existing file.
    let reopened = assert_ok!(load_database(db.url()).await, "reopen failed");
    let loaded = assert_ok!(boards::get_board(&reopened, board.id).await)
        .expect("board should still exist");
    assert_eq!(loaded.name, "Persistent");
    assert_eq!(loaded.nodes.len(), 1);
    assert_eq!(loaded.nodes[0].name, "Kept");
}
