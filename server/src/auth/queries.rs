//! Password reset token queries.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::reset::PasswordResetToken;
use crate::db::db_error;

/// Create a password reset token.
pub async fn create_password_reset_token(
    conn: &mut PgConnection,
    user_id: Uuid,
    token_hash: &str,
    expires_at: DateTime<Utc>,
) -> sqlx::Result<PasswordResetToken> {
    sqlx::query_as::<_, PasswordResetToken>(
        r"
        INSERT INTO password_reset_tokens (id, user_id, token_hash, expires_at)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        ",
    )
    .bind(Uuid::now_v7())
    .bind(user_id)
    .bind(token_hash)
    .bind(expires_at)
    .fetch_one(conn)
    .await
    .map_err(db_error!("create_password_reset_token", user_id = %user_id))
}

/// Find a reset token by hash, regardless of state.
///
/// Callers decide validity with [`PasswordResetToken::check`] so expired and
/// used tokens can be told apart.
pub async fn find_reset_token_by_hash(
    pool: &PgPool,
    token_hash: &str,
) -> sqlx::Result<Option<PasswordResetToken>> {
    sqlx::query_as::<_, PasswordResetToken>(
        "SELECT * FROM password_reset_tokens WHERE token_hash = $1",
    )
    .bind(token_hash)
    .fetch_optional(pool)
    .await
    .map_err(db_error!("find_reset_token_by_hash"))
}

/// Invalidate all unused password reset tokens for a user.
pub async fn invalidate_user_reset_tokens(
    conn: &mut PgConnection,
    user_id: Uuid,
) -> sqlx::Result<u64> {
    let result = sqlx::query(
        "UPDATE password_reset_tokens SET used_at = NOW() WHERE user_id = $1 AND used_at IS NULL",
    )
    .bind(user_id)
    .execute(conn)
    .await
    .map_err(db_error!("invalidate_user_reset_tokens", user_id = %user_id))?;
    Ok(result.rows_affected())
}

/// Clean up expired password reset tokens.
///
/// Removes tokens that expired more than 24 hours ago.
pub async fn cleanup_expired_reset_tokens(pool: &PgPool) -> sqlx::Result<u64> {
    let result = sqlx::query(
        "DELETE FROM password_reset_tokens WHERE expires_at < NOW() - INTERVAL '24 hours'",
    )
    .execute(pool)
    .await
    .map_err(db_error!("cleanup_expired_reset_tokens"))?;
    Ok(result.rows_affected())
}
