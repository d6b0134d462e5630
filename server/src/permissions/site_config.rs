//! Site configuration sections that can be granted one by one.

/// Subsection of the site configuration editor.
///
/// Only consulted when a role lacks the blanket
/// [`Permission::ManageSiteConfig`](super::Permission::ManageSiteConfig) flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteConfigPermission {
    Banner,
    Popup,
    Status,
    Navbar,
    Footer,
    Colors,
}

impl SiteConfigPermission {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Banner => "banner",
            Self::Popup => "popup",
            Self::Status => "status",
            Self::Navbar => "navbar",
            Self::Footer => "footer",
            Self::Colors => "colors",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Banner,
            Self::Popup,
            Self::Status,
            Self::Navbar,
            Self::Footer,
            Self::Colors,
        ]
    }
}

impl std::fmt::Display for SiteConfigPermission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
