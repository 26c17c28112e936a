use authentcare::startup::connect_to_database;
use sea_orm::ConnectionTrait;

use crate::{memory_context, test_config};

/// Expect Ok when connecting to an in-memory database
#[tokio::test]
async fn connects_to_memory_database() {
    let config = test_config("sqlite::memory:");

    let result = connect_to_database(&config).await;

    assert!(result.is_ok());
}

/// Expect Error for a URL no driver understands
#[tokio::test]
async fn fails_for_unsupported_url() {
    let config = test_config("not-a-database://nowhere");

    let result = connect_to_database(&config).await;

    assert!(result.is_err());
}

/// Expect a row referencing a missing parent to be rejected by the database itself
#[tokio::test]
async fn enforces_foreign_keys() {
    let ctx = memory_context().await;

    let result = ctx
        .db
        .execute_unprepared(
            "INSERT INTO device (project_id, name, type, specifications, status, created_at, updated_at) \
             VALUES (999, 'Orphan', '', '', 'active', '2025-01-01 00:00:00', '2025-01-01 00:00:00')",
        )
        .await;

    assert!(result.is_err());
}
