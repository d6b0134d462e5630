//! Password reset tokens.
//!
//! The raw token is handed to the member (by email, outside this crate); only
//! its SHA-256 hash is stored. A token is valid until it is used or its
//! expiry timestamp is reached.

use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::Serialize;
use sha2::{Digest, Sha256};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::error::{AuthError, AuthResult};
use super::password::{hash_password, validate_new_password};
use super::queries::{
    create_password_reset_token, find_reset_token_by_hash, invalidate_user_reset_tokens,
};
use crate::db::find_user_by_email;

/// Stored reset token.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PasswordResetToken {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl PasswordResetToken {
    /// Check the token against `now`.
    ///
    /// A token is expired from its `expires_at` instant onwards.
    pub fn check(&self, now: DateTime<Utc>) -> AuthResult<()> {
        if self.used_at.is_some() {
            return Err(AuthError::TokenUsed);
        }
        if self.expires_at <= now {
            return Err(AuthError::TokenExpired);
        }
        Ok(())
    }
}

/// SHA-256 hex digest of a raw token.
#[must_use]
pub fn hash_token(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}

/// Generate a new token: 32 random bytes as URL-safe base64, plus its hash.
#[must_use]
pub fn generate_reset_token() -> (String, String) {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    let raw = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes);
    let hash = hash_token(&raw);
    (raw, hash)
}

/// Expiry instant for a token issued at `now`.
///
/// Fails instead of overflowing when `ttl` reaches past chrono's date range.
pub fn reset_expiry(now: DateTime<Utc>, ttl: Duration) -> AuthResult<DateTime<Utc>> {
    now.checked_add_signed(ttl)
        .ok_or_else(|| AuthError::Validation("Reset token lifetime is out of range".into()))
}

/// Issued token, returned to the caller for delivery.
#[derive(Debug, Clone)]
pub struct IssuedResetToken {
    pub user_id: Uuid,
    pub raw_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Start a reset for the account registered under `email`.
///
/// Returns `Ok(None)` for unknown emails so callers can answer identically
/// either way. Outstanding tokens of the user are invalidated in the same
/// transaction that stores the new one.
#[tracing::instrument(skip(pool, email))]
pub async fn request_password_reset(
    pool: &PgPool,
    email: &str,
    ttl: Duration,
) -> AuthResult<Option<IssuedResetToken>> {
    let Some(user) = find_user_by_email(pool, email).await? else {
        tracing::debug!("Password reset requested for unknown email");
        return Ok(None);
    };

    let expires_at = reset_expiry(Utc::now(), ttl)?;
    let (raw_token, token_hash) = generate_reset_token();

    let mut tx = pool.begin().await?;
    invalidate_user_reset_tokens(&mut *tx, user.id).await?;
    create_password_reset_token(&mut *tx, user.id, &token_hash, expires_at).await?;
    tx.commit().await?;

    tracing::info!(user_id = %user.id, %expires_at, "Password reset token issued");

    Ok(Some(IssuedResetToken {
        user_id: user.id,
        raw_token,
        expires_at,
    }))
}

/// Consume a reset token and set a new password.
///
/// The token is marked used and the password replaced in one transaction.
#[tracing::instrument(skip(pool, raw_token, new_password))]
pub async fn reset_password(pool: &PgPool, raw_token: &str, new_password: &str) -> AuthResult<Uuid> {
    validate_new_password(new_password)?;

    let token = find_reset_token_by_hash(pool, &hash_token(raw_token))
        .await?
        .ok_or(AuthError::InvalidToken)?;
    token.check(Utc::now())?;

    let password_hash = hash_password(new_password)?;

    let mut tx = pool.begin().await?;

    // Guard against a concurrent reset consuming the same token
    let marked = sqlx::query(
        "UPDATE password_reset_tokens SET used_at = NOW() WHERE id = $1 AND used_at IS NULL",
    )
    .bind(token.id)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, token_id = %token.id, "Failed to mark reset token used");
        AuthError::Database(e)
    })?;

    if marked.rows_affected() == 0 {
        return Err(AuthError::TokenUsed);
    }

    sqlx::query("UPDATE users SET password_hash = $1, updated_at = NOW() WHERE id = $2")
        .bind(&password_hash)
        .bind(token.user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %token.user_id, "Failed to update password");
            AuthError::Database(e)
        })?;

    tx.commit().await?;

    tracing::info!(user_id = %token.user_id, "Password reset successful");
    Ok(token.user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(expires_in: Duration, used: bool) -> (PasswordResetToken, DateTime<Utc>) {
        let now = Utc::now();
        let token = PasswordResetToken {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            token_hash: hash_token("raw"),
            expires_at: now + expires_in,
            used_at: used.then_some(now - Duration::minutes(1)),
            created_at: now - Duration::minutes(5),
        };
        (token, now)
    }

    #[test]
    fn test_fresh_token_is_valid() {
        let (token, now) = token(Duration::hours(1), false);
        assert!(token.check(now).is_ok());
    }

    #[test]
    fn test_token_expires_at_boundary() {
        let (token, now) = token(Duration::zero(), false);
        assert!(matches!(token.check(now), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_past_token_is_expired() {
        let (token, now) = token(Duration::hours(-2), false);
        assert!(matches!(token.check(now), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_used_token_rejected_before_expiry_check() {
        let (token, now) = token(Duration::hours(-2), true);
        assert!(matches!(token.check(now), Err(AuthError::TokenUsed)));
    }

    #[test]
    fn test_reset_expiry_adds_ttl() {
        let now = Utc::now();
        assert_eq!(reset_expiry(now, Duration::hours(1)).unwrap(), now + Duration::hours(1));
    }

    #[test]
    fn test_reset_expiry_out_of_range_is_error() {
        let now = Utc::now();
        let result = reset_expiry(now, Duration::MAX);
        assert!(matches!(result, Err(AuthError::Validation(_))));

        let result = reset_expiry(now, Duration::seconds(9_000_000_000_000));
        assert!(matches!(result, Err(AuthError::Validation(_))));
    }

    #[test]
    fn test_hash_token_is_sha256_hex() {
        let hash = hash_token("abc");
        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_generated_tokens_are_unique_and_url_safe() {
        let (raw_a, hash_a) = generate_reset_token();
        let (raw_b, _) = generate_reset_token();

        assert_ne!(raw_a, raw_b);
        assert_eq!(raw_a.len(), 43);
        assert!(raw_a
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_eq!(hash_a, hash_token(&raw_a));
    }
}
