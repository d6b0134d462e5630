//! Per-user access context.
//!
//! Bundles a user's role with the evaluator so page- and action-level checks
//! don't need to thread the raw permission record around.

use sqlx::PgPool;
use uuid::Uuid;

use super::evaluator::{
    has_panel_access, has_permission, has_site_config_permission, require_permission,
    require_site_config_permission, PermissionError,
};
use super::models::{Role, RolePermissions};
use super::permission::Permission;
use super::queries::get_user_role;
use super::roles::RoleIds;
use super::site_config::SiteConfigPermission;
use crate::db::find_user_by_id;

/// Resolved authorization data for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessContext {
    pub user_id: Uuid,
    /// `None` if the user has no role.
    pub role_id: Option<i64>,
    /// `None` if the user has no role or the role's record is malformed.
    pub permissions: Option<RolePermissions>,
}

impl AccessContext {
    /// Build a context from a user id and the role assigned to it.
    #[must_use]
    pub fn new(user_id: Uuid, role: Option<Role>) -> Self {
        match role {
            Some(role) => Self {
                user_id,
                role_id: Some(role.id),
                permissions: role.permissions,
            },
            None => Self {
                user_id,
                role_id: None,
                permissions: None,
            },
        }
    }

    #[must_use]
    pub const fn can(&self, permission: Permission) -> bool {
        has_permission(self.permissions.as_ref(), permission)
    }

    #[must_use]
    pub fn can_configure(&self, section: SiteConfigPermission) -> bool {
        has_site_config_permission(self.permissions.as_ref(), section)
    }

    #[must_use]
    pub const fn has_panel_access(&self) -> bool {
        has_panel_access(self.permissions.as_ref())
    }

    #[must_use]
    pub fn is_admin(&self, ids: &RoleIds) -> bool {
        self.role_id.is_some_and(|id| ids.is_admin(id))
    }

    #[must_use]
    pub fn is_dev(&self, ids: &RoleIds) -> bool {
        self.role_id.is_some_and(|id| ids.is_dev(id))
    }

    /// Panel access or a privileged role id.
    #[must_use]
    pub fn is_staff(&self, ids: &RoleIds) -> bool {
        self.has_panel_access() || self.role_id.is_some_and(|id| ids.is_privileged(id))
    }

    pub const fn require(&self, permission: Permission) -> Result<(), PermissionError> {
        require_permission(self.permissions.as_ref(), permission)
    }

    pub fn require_site_config(&self, section: SiteConfigPermission) -> Result<(), PermissionError> {
        require_site_config_permission(self.permissions.as_ref(), section)
    }

    pub const fn require_panel_access(&self) -> Result<(), PermissionError> {
        if self.has_panel_access() {
            Ok(())
        } else {
            Err(PermissionError::NoPanelAccess)
        }
    }
}

/// Load the access context for a user.
///
/// Returns `None` if the user does not exist.
#[tracing::instrument(skip(pool))]
pub async fn load_access_context(
    pool: &PgPool,
    user_id: Uuid,
) -> sqlx::Result<Option<AccessContext>> {
    let Some(user) = find_user_by_id(pool, user_id).await? else {
        return Ok(None);
    };

    let role = match user.role_id {
        Some(_) => get_user_role(pool, user.id).await?,
        None => None,
    };

    if user.role_id.is_some() && role.is_none() {
        tracing::warn!(user_id = %user.id, role_id = ?user.role_id, "User references a missing role");
    }

    Ok(Some(AccessContext::new(user.id, role)))
}
