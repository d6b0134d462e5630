//! Password reset integration tests.
//!
//! Run with: `cargo test --test password_reset_test -- --ignored`

mod helpers;

use chrono::Duration;
use club_server::auth::{
    cleanup_expired_reset_tokens, hash_password, hash_token, request_password_reset,
    reset_password, verify_password, AuthError,
};
use club_server::db::{find_user_by_id, find_user_by_email};
use helpers::{create_member, create_test_pool, unique_email};

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn test_unknown_email_issues_nothing() {
    let pool = create_test_pool().await;

    let issued = request_password_reset(&pool, &unique_email("nobody"), Duration::hours(1))
        .await
        .unwrap();
    assert!(issued.is_none());
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn test_reset_replaces_password_once() {
    let pool = create_test_pool().await;
    let old_hash = hash_password("old-password").unwrap();
    let member = create_member(&pool, None, Some(&old_hash)).await;

    // Email lookup ignores case
    let issued = request_password_reset(&pool, &member.email.to_uppercase(), Duration::hours(1))
        .await
        .unwrap()
        .expect("token issued");
    assert_eq!(issued.user_id, member.id);

    let user_id = reset_password(&pool, &issued.raw_token, "new-password")
        .await
        .unwrap();
    assert_eq!(user_id, member.id);

    let updated = find_user_by_id(&pool, member.id).await.unwrap().unwrap();
    let stored = updated.password_hash.expect("password set");
    assert!(verify_password("new-password", &stored));
    assert!(!verify_password("old-password", &stored));

    let replay = reset_password(&pool, &issued.raw_token, "another-password").await;
    assert!(matches!(replay, Err(AuthError::TokenUsed)));
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn test_new_request_invalidates_previous_token() {
    let pool = create_test_pool().await;
    let member = create_member(&pool, None, None).await;

    let first = request_password_reset(&pool, &member.email, Duration::hours(1))
        .await
        .unwrap()
        .unwrap();
    let second = request_password_reset(&pool, &member.email, Duration::hours(1))
        .await
        .unwrap()
        .unwrap();

    let stale = reset_password(&pool, &first.raw_token, "new-password").await;
    assert!(matches!(stale, Err(AuthError::TokenUsed)));
    assert!(reset_password(&pool, &second.raw_token, "new-password").await.is_ok());
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn test_expired_and_unknown_tokens_rejected() {
    let pool = create_test_pool().await;
    let member = create_member(&pool, None, None).await;

    let issued = request_password_reset(&pool, &member.email, Duration::seconds(-1))
        .await
        .unwrap()
        .unwrap();
    let expired = reset_password(&pool, &issued.raw_token, "new-password").await;
    assert!(matches!(expired, Err(AuthError::TokenExpired)));

    let unknown = reset_password(&pool, "not-a-real-token", "new-password").await;
    assert!(matches!(unknown, Err(AuthError::InvalidToken)));
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn test_short_password_rejected_before_token_lookup() {
    let pool = create_test_pool().await;
    let member = create_member(&pool, None, None).await;
    let issued = request_password_reset(&pool, &member.email, Duration::hours(1))
        .await
        .unwrap()
        .unwrap();

    let result = reset_password(&pool, &issued.raw_token, "short").await;
    assert!(matches!(result, Err(AuthError::Validation(_))));

    // Token survives the failed attempt
    assert!(reset_password(&pool, &issued.raw_token, "long-enough").await.is_ok());
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn test_cleanup_removes_only_long_expired_tokens() {
    let pool = create_test_pool().await;
    let member = create_member(&pool, None, None).await;

    let stale = request_password_reset(&pool, &member.email, Duration::hours(-25))
        .await
        .unwrap()
        .unwrap();
    let recent = request_password_reset(&pool, &member.email, Duration::hours(-1))
        .await
        .unwrap()
        .unwrap();

    let purged = cleanup_expired_reset_tokens(&pool).await.unwrap();
    assert!(purged >= 1);

    let remaining: Vec<String> =
        sqlx::query_scalar("SELECT token_hash FROM password_reset_tokens WHERE user_id = $1")
            .bind(member.id)
            .fetch_all(&pool)
            .await
            .unwrap();
    assert!(!remaining.contains(&hash_token(&stale.raw_token)));
    assert!(remaining.contains(&hash_token(&recent.raw_token)));

    assert!(find_user_by_email(&pool, &member.email).await.unwrap().is_some());
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn test_failed_request_keeps_previous_token() {
    let pool = create_test_pool().await;
    let member = create_member(&pool, None, None).await;

    let issued = request_password_reset(&pool, &member.email, Duration::hours(1))
        .await
        .unwrap()
        .unwrap();

    let overflow = request_password_reset(&pool, &member.email, Duration::MAX).await;
    assert!(matches!(overflow, Err(AuthError::Validation(_))));

    let outstanding: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM password_reset_tokens WHERE user_id = $1 AND used_at IS NULL",
    )
    .bind(member.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(outstanding, 1);

    assert!(reset_password(&pool, &issued.raw_token, "new-password").await.is_ok());
}
