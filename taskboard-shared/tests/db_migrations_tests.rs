/// Integration tests for database migrations
///
/// These tests require a running PostgreSQL database reachable via the
/// `DATABASE_URL` environment variable; they return early when it is not
/// set.

use taskboard_shared::db::migrations::{ensure_database_exists, run_migrations};
use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
use std::env;

/// Helper to get the test database URL, if one is configured
fn test_database_url() -> Option<String> {
    dotenvy::dotenv().ok();
    env::var("DATABASE_URL").ok()
}

#[tokio::test]
async fn test_ensure_database_exists() {
    let Some(url) = test_database_url() else {
        return;
    };

    // This should succeed whether the database exists or not
    let result = ensure_database_exists(&url).await;
    assert!(
        result.is_ok(),
        "Failed to ensure database exists: {:?}",
        result.err()
    );
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let Some(url) = test_database_url() else {
        return;
    };

    ensure_database_exists(&url)
        .await
        .expect("Failed to create database");

    let config = DatabaseConfig {
        url,
        ..Default::default()
    };
    let pool = create_pool(config).await.expect("Failed to create pool");

    // Running twice must be a no-op the second time
    run_migrations(&pool).await.expect("First migration run failed");
    run_migrations(&pool).await.expect("Second migration run failed");
}

#[tokio::test]
async fn test_migration_creates_all_tables() {
    let Some(url) = test_database_url() else {
        return;
    };

    ensure_database_exists(&url)
        .await
        .expect("Failed to create database");

    let config = DatabaseConfig {
        url,
        ..Default::default()
    };
    let pool = create_pool(config).await.expect("Failed to create pool");

    run_migrations(&pool).await.expect("Migrations failed");

    for table_name in ["users", "sessions", "tasks"] {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT FROM information_schema.tables
                WHERE table_schema = 'public'
                AND table_name = $1
            )",
        )
        .bind(table_name)
        .fetch_one(&pool)
        .await
        .unwrap_or_else(|e| panic!("Failed to check for table {}: {}", table_name, e));

        assert!(exists, "Table '{}' should exist after migrations", table_name);
    }
}
