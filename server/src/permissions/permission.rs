//! Named capabilities a role can be granted.
//!
//! Each variant corresponds to one boolean flag in a role's
//! [`RolePermissions`](super::RolePermissions) record.

/// Capability flag attached to a role.
///
/// The serialized form is the snake_case field name used in the stored
/// permissions record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Enter the admin panel at all
    PanelAdmin,
    /// Create, edit and publish news posts
    ManageNews,
    /// Manage store products and orders
    ManageStore,
    /// Manage member accounts and role assignments
    ManageUsers,
    /// Full access to every site configuration section
    ManageSiteConfig,
    /// Manage home page banners
    ManageBanners,
    /// Manage popups
    ManagePopups,
    /// Create and edit roles
    ManageRoles,
    /// View visitor analytics
    ViewAnalytics,
    /// Change the site color palette
    ManageColors,
    /// Edit one's own profile
    ManageOwnProfile,
}

impl Permission {
    /// Returns the field name of this permission in the stored record.
    ///
    /// # Examples
    ///
    /// ```
    /// use club_server::permissions::Permission;
    ///
    /// assert_eq!(Permission::ManageBanners.as_str(), "manage_banners");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PanelAdmin => "panel_admin",
            Self::ManageNews => "manage_news",
            Self::ManageStore => "manage_store",
            Self::ManageUsers => "manage_users",
            Self::ManageSiteConfig => "manage_site_config",
            Self::ManageBanners => "manage_banners",
            Self::ManagePopups => "manage_popups",
            Self::ManageRoles => "manage_roles",
            Self::ViewAnalytics => "view_analytics",
            Self::ManageColors => "manage_colors",
            Self::ManageOwnProfile => "manage_own_profile",
        }
    }

    /// Returns all permissions as a slice.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::PanelAdmin,
            Self::ManageNews,
            Self::ManageStore,
            Self::ManageUsers,
            Self::ManageSiteConfig,
            Self::ManageBanners,
            Self::ManagePopups,
            Self::ManageRoles,
            Self::ViewAnalytics,
            Self::ManageColors,
            Self::ManageOwnProfile,
        ]
    }

    /// Human-readable label shown in the role editor.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::PanelAdmin => "Access the admin panel",
            Self::ManageNews => "Manage news",
            Self::ManageStore => "Manage the store",
            Self::ManageUsers => "Manage users",
            Self::ManageSiteConfig => "Full site configuration",
            Self::ManageBanners => "Manage banners",
            Self::ManagePopups => "Manage popups",
            Self::ManageRoles => "Manage roles",
            Self::ViewAnalytics => "View analytics",
            Self::ManageColors => "Manage site colors",
            Self::ManageOwnProfile => "Edit own profile",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
