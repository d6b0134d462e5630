//! Role and permission record types.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

use super::permission::Permission;
use super::site_config::SiteConfigPermission;

/// Deserialize a flag that only counts when it is the JSON literal `true`.
///
/// Strings, numbers, `null` and nested values all read as `false`, so a
/// hand-edited record can never grant access by accident.
fn strict_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(matches!(value, JsonValue::Bool(true)))
}

/// Deserialize the limited site config map, treating anything that is not an
/// object as absent.
fn lenient_grants<'de, D>(deserializer: D) -> Result<Option<SiteConfigGrants>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    match value {
        JsonValue::Object(_) => Ok(serde_json::from_value(value).ok()),
        _ => Ok(None),
    }
}

/// Per-section grants used when full site config access is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfigGrants {
    #[serde(default, deserialize_with = "strict_true")]
    pub banner: bool,
    #[serde(default, deserialize_with = "strict_true")]
    pub popup: bool,
    #[serde(default, deserialize_with = "strict_true")]
    pub status: bool,
    #[serde(default, deserialize_with = "strict_true")]
    pub navbar: bool,
    #[serde(default, deserialize_with = "strict_true")]
    pub footer: bool,
    #[serde(default, deserialize_with = "strict_true")]
    pub colors: bool,
}

impl SiteConfigGrants {
    /// Whether the given section is granted.
    #[must_use]
    pub const fn section(&self, section: SiteConfigPermission) -> bool {
        match section {
            SiteConfigPermission::Banner => self.banner,
            SiteConfigPermission::Popup => self.popup,
            SiteConfigPermission::Status => self.status,
            SiteConfigPermission::Navbar => self.navbar,
            SiteConfigPermission::Footer => self.footer,
            SiteConfigPermission::Colors => self.colors,
        }
    }

    /// Builder-style setter, mostly for seeding and tests.
    #[must_use]
    pub fn with(mut self, section: SiteConfigPermission) -> Self {
        match section {
            SiteConfigPermission::Banner => self.banner = true,
            SiteConfigPermission::Popup => self.popup = true,
            SiteConfigPermission::Status => self.status = true,
            SiteConfigPermission::Navbar => self.navbar = true,
            SiteConfigPermission::Footer => self.footer = true,
            SiteConfigPermission::Colors => self.colors = true,
        }
        self
    }
}

/// Permission record owned by a role.
///
/// Stored as a JSONB object keyed by [`Permission`] names. Missing keys and
/// non-boolean values deserialize to `false`; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermissions {
    #[serde(default, deserialize_with = "strict_true")]
    pub panel_admin: bool,
    #[serde(default, deserialize_with = "strict_true")]
    pub manage_news: bool,
    #[serde(default, deserialize_with = "strict_true")]
    pub manage_store: bool,
    #[serde(default, deserialize_with = "strict_true")]
    pub manage_users: bool,
    #[serde(default, deserialize_with = "strict_true")]
    pub manage_site_config: bool,
    #[serde(default, deserialize_with = "strict_true")]
    pub manage_banners: bool,
    #[serde(default, deserialize_with = "strict_true")]
    pub manage_popups: bool,
    #[serde(default, deserialize_with = "strict_true")]
    pub manage_roles: bool,
    #[serde(default, deserialize_with = "strict_true")]
    pub view_analytics: bool,
    #[serde(default, deserialize_with = "strict_true")]
    pub manage_colors: bool,
    #[serde(default, deserialize_with = "strict_true")]
    pub manage_own_profile: bool,
    /// Only meaningful while `manage_site_config` is `false`.
    #[serde(
        default,
        deserialize_with = "lenient_grants",
        skip_serializing_if = "Option::is_none"
    )]
    pub manage_site_config_limited: Option<SiteConfigGrants>,
}

impl RolePermissions {
    /// Parse a stored record. Anything other than a JSON object yields `None`.
    #[must_use]
    pub fn from_json(value: JsonValue) -> Option<Self> {
        match value {
            JsonValue::Object(_) => serde_json::from_value(value).ok(),
            _ => None,
        }
    }

    /// Read the flag backing `permission`.
    #[must_use]
    pub const fn flag(&self, permission: Permission) -> bool {
        match permission {
            Permission::PanelAdmin => self.panel_admin,
            Permission::ManageNews => self.manage_news,
            Permission::ManageStore => self.manage_store,
            Permission::ManageUsers => self.manage_users,
            Permission::ManageSiteConfig => self.manage_site_config,
            Permission::ManageBanners => self.manage_banners,
            Permission::ManagePopups => self.manage_popups,
            Permission::ManageRoles => self.manage_roles,
            Permission::ViewAnalytics => self.view_analytics,
            Permission::ManageColors => self.manage_colors,
            Permission::ManageOwnProfile => self.manage_own_profile,
        }
    }

    /// Builder-style setter, mostly for seeding and tests.
    #[must_use]
    pub fn with(mut self, permission: Permission) -> Self {
        match permission {
            Permission::PanelAdmin => self.panel_admin = true,
            Permission::ManageNews => self.manage_news = true,
            Permission::ManageStore => self.manage_store = true,
            Permission::ManageUsers => self.manage_users = true,
            Permission::ManageSiteConfig => self.manage_site_config = true,
            Permission::ManageBanners => self.manage_banners = true,
            Permission::ManagePopups => self.manage_popups = true,
            Permission::ManageRoles => self.manage_roles = true,
            Permission::ViewAnalytics => self.view_analytics = true,
            Permission::ManageColors => self.manage_colors = true,
            Permission::ManageOwnProfile => self.manage_own_profile = true,
        }
        self
    }

    /// Replace the limited site config grants.
    #[must_use]
    pub fn with_limited(mut self, grants: SiteConfigGrants) -> Self {
        self.manage_site_config_limited = Some(grants);
        self
    }
}

/// Role with its permission record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    /// `None` when the stored record is missing or not an object.
    pub permissions: Option<RolePermissions>,
    pub is_system_role: bool,
}

/// Raw `roles` row as stored in the database.
#[derive(Debug, Clone, FromRow)]
pub struct RoleRow {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub permissions: Option<JsonValue>,
    pub is_system_role: bool,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        let permissions = row.permissions.and_then(|value| {
            let parsed = RolePermissions::from_json(value);
            if parsed.is_none() {
                tracing::warn!(role_id = row.id, "Role has a malformed permissions record");
            }
            parsed
        });

        Self {
            id: row.id,
            name: row.name,
            display_name: row.display_name,
            description: row.description,
            color: row.color,
            permissions,
            is_system_role: row.is_system_role,
        }
    }
}
