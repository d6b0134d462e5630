//! Role-based permission system.
//!
//! Each role owns one flat [`RolePermissions`] record of boolean flags, plus
//! a nested per-section map for limited site configuration access. The
//! evaluator answers "does this record grant X" and fails closed on absent
//! or malformed records.

pub mod context;
pub mod evaluator;
pub mod models;
pub mod permission;
pub mod queries;
pub mod roles;
pub mod site_config;

pub use context::{load_access_context, AccessContext};
pub use evaluator::{
    get_role_display, has_panel_access, has_permission, has_site_config_permission,
    require_permission, require_site_config_permission, PermissionError,
};
pub use models::*;
pub use permission::Permission;
pub use queries::*;
pub use roles::{
    is_admin, is_dev, verify_role_ids, RoleIdDrift, RoleIds, DEFAULT_ADMIN_ROLE_ID,
    DEFAULT_DEV_ROLE_ID,
};
pub use site_config::SiteConfigPermission;
