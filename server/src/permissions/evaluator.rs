//! Permission evaluation.
//!
//! Every check here fails closed: an absent record grants nothing.

use thiserror::Error;

use super::models::{Role, RolePermissions};
use super::permission::Permission;
use super::site_config::SiteConfigPermission;

/// Check whether `permissions` grants `permission`.
///
/// # Examples
///
/// ```
/// use club_server::permissions::{has_permission, Permission, RolePermissions};
///
/// let perms = RolePermissions::default().with(Permission::ManageNews);
/// assert!(has_permission(Some(&perms), Permission::ManageNews));
/// assert!(!has_permission(Some(&perms), Permission::ManageStore));
/// assert!(!has_permission(None, Permission::ManageNews));
/// ```
#[must_use]
pub const fn has_permission(permissions: Option<&RolePermissions>, permission: Permission) -> bool {
    match permissions {
        Some(perms) => perms.flag(permission),
        None => false,
    }
}

/// Check whether `permissions` grants a site configuration section.
///
/// Full `manage_site_config` access short-circuits before the limited map is
/// consulted.
#[must_use]
pub fn has_site_config_permission(
    permissions: Option<&RolePermissions>,
    section: SiteConfigPermission,
) -> bool {
    let Some(perms) = permissions else {
        return false;
    };

    if perms.manage_site_config {
        return true;
    }

    perms
        .manage_site_config_limited
        .is_some_and(|limited| limited.section(section))
}

/// Check whether `permissions` allows entering the admin panel.
#[must_use]
pub const fn has_panel_access(permissions: Option<&RolePermissions>) -> bool {
    has_permission(permissions, Permission::PanelAdmin)
}

/// Name shown for a role in listings and badges.
#[must_use]
pub fn get_role_display(role: &Role) -> &str {
    &role.display_name
}

/// Authorization failures for callers that prefer `?` over booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PermissionError {
    /// The role does not carry the required flag.
    #[error("Missing permission: {0}")]
    MissingPermission(Permission),

    /// Neither full nor section-level site config access is granted.
    #[error("Missing site configuration access: {0}")]
    MissingSiteConfigSection(SiteConfigPermission),

    /// The role cannot enter the admin panel.
    #[error("Admin panel access required")]
    NoPanelAccess,
}

/// Require `permission`, returning [`PermissionError::MissingPermission`] otherwise.
pub const fn require_permission(
    permissions: Option<&RolePermissions>,
    permission: Permission,
) -> Result<(), PermissionError> {
    if has_permission(permissions, permission) {
        Ok(())
    } else {
        Err(PermissionError::MissingPermission(permission))
    }
}

/// Require access to a site configuration section.
pub fn require_site_config_permission(
    permissions: Option<&RolePermissions>,
    section: SiteConfigPermission,
) -> Result<(), PermissionError> {
    if has_site_config_permission(permissions, section) {
        Ok(())
    } else {
        Err(PermissionError::MissingSiteConfigSection(section))
    }
}
