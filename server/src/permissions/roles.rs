//! Well-known role identifiers.
//!
//! The admin and dev roles are seeded rows in the `roles` table. Their ids
//! default to the seeded values and may be overridden through configuration;
//! [`verify_role_ids`] checks them against the table once at startup.

use sqlx::PgPool;
use thiserror::Error;

use super::queries::get_role;

/// Seeded id of the administrator role.
pub const DEFAULT_ADMIN_ROLE_ID: i64 = 55;

/// Seeded id of the developer role.
pub const DEFAULT_DEV_ROLE_ID: i64 = 56;

/// Expected `roles.name` of the administrator role.
pub const ADMIN_ROLE_NAME: &str = "admin";

/// Expected `roles.name` of the developer role.
pub const DEV_ROLE_NAME: &str = "dev";

/// Check a role id against the default administrator id.
#[must_use]
pub const fn is_admin(role_id: i64) -> bool {
    role_id == DEFAULT_ADMIN_ROLE_ID
}

/// Check a role id against the default developer id.
#[must_use]
pub const fn is_dev(role_id: i64) -> bool {
    role_id == DEFAULT_DEV_ROLE_ID
}

/// Resolved ids of the privileged roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleIds {
    pub admin: i64,
    pub dev: i64,
}

impl Default for RoleIds {
    fn default() -> Self {
        Self {
            admin: DEFAULT_ADMIN_ROLE_ID,
            dev: DEFAULT_DEV_ROLE_ID,
        }
    }
}

impl RoleIds {
    #[must_use]
    pub const fn is_admin(&self, role_id: i64) -> bool {
        role_id == self.admin
    }

    #[must_use]
    pub const fn is_dev(&self, role_id: i64) -> bool {
        role_id == self.dev
    }

    /// Admin or dev.
    #[must_use]
    pub const fn is_privileged(&self, role_id: i64) -> bool {
        self.is_admin(role_id) || self.is_dev(role_id)
    }
}

/// Mismatch between a configured role id and the `roles` table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleIdDrift {
    /// No row exists for the configured id.
    #[error("Role id {id} (expected '{expected}') does not exist")]
    Missing { id: i64, expected: &'static str },

    /// A row exists but carries a different name.
    #[error("Role id {id} is named '{found}', expected '{expected}'")]
    NameMismatch {
        id: i64,
        expected: &'static str,
        found: String,
    },
}

/// Compare one configured id with the row loaded for it.
#[must_use]
pub fn check_role_name(id: i64, expected: &'static str, found: Option<&str>) -> Option<RoleIdDrift> {
    match found {
        None => Some(RoleIdDrift::Missing { id, expected }),
        Some(name) if name != expected => Some(RoleIdDrift::NameMismatch {
            id,
            expected,
            found: name.to_string(),
        }),
        Some(_) => None,
    }
}

/// Load both privileged roles and report every mismatch.
#[tracing::instrument(skip(pool))]
pub async fn verify_role_ids(pool: &PgPool, ids: &RoleIds) -> sqlx::Result<Vec<RoleIdDrift>> {
    let mut drift = Vec::new();

    for (id, expected) in [(ids.admin, ADMIN_ROLE_NAME), (ids.dev, DEV_ROLE_NAME)] {
        let role = get_role(pool, id).await?;
        if let Some(mismatch) = check_role_name(id, expected, role.as_ref().map(|r| r.name.as_str()))
        {
            drift.push(mismatch);
        }
    }

    Ok(drift)
}
