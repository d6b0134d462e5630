//! Shared helpers for database-backed integration tests.
//!
//! Tests using these helpers need a running `PostgreSQL` reachable through
//! `DATABASE_URL` and are marked `#[ignore]`.
#![allow(dead_code)]

use club_server::config::Config;
use club_server::db::{self, User};
use sqlx::PgPool;
use uuid::Uuid;

/// Connect to the test database and apply migrations.
pub async fn create_test_pool() -> PgPool {
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| Config::default_for_test().database_url);

    let pool = db::create_pool(&database_url, 2)
        .await
        .expect("Failed to connect to test database");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Unique email so parallel tests never collide.
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@club.test", Uuid::now_v7().simple())
}

/// Create a member with the given role and password hash.
pub async fn create_member(
    pool: &PgPool,
    role_id: Option<i64>,
    password_hash: Option<&str>,
) -> User {
    db::create_user(
        pool,
        &unique_email("member"),
        "Test Member",
        role_id,
        password_hash,
    )
    .await
    .expect("Failed to create test user")
}

/// Role id unlikely to collide with seeded or concurrently created roles.
pub fn random_role_id() -> i64 {
    10_000 + i64::from(rand::random::<u32>() % 1_000_000)
}
