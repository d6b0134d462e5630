//! Selection of what public pages show right now.

use chrono::{DateTime, Utc};

use super::types::{Banner, Popup, SiteSettings, SiteStatus};
use crate::permissions::{AccessContext, RoleIds};

/// Banners visible at `now`, by position then creation time.
#[must_use]
pub fn visible_banners(banners: &[Banner], now: DateTime<Utc>) -> Vec<&Banner> {
    let mut visible: Vec<&Banner> = banners.iter().filter(|b| b.is_visible_at(now)).collect();
    visible.sort_by_key(|b| (b.position, b.created_at));
    visible
}

/// The popup to show at `now`: the most recently created visible one.
#[must_use]
pub fn select_popup(popups: &[Popup], now: DateTime<Utc>) -> Option<&Popup> {
    popups
        .iter()
        .filter(|p| p.is_visible_at(now))
        .max_by_key(|p| p.created_at)
}

/// Status a given viewer should see.
///
/// Staff (panel access or an admin/dev role) always see the live site so they
/// can work while it is closed to the public.
#[must_use]
pub fn effective_status(
    settings: &SiteSettings,
    viewer: Option<&AccessContext>,
    ids: &RoleIds,
) -> SiteStatus {
    if settings.status == SiteStatus::Online {
        return SiteStatus::Online;
    }

    match viewer {
        Some(ctx) if ctx.is_staff(ids) => SiteStatus::Online,
        _ => settings.status,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use uuid::Uuid;

    use super::*;
    use crate::permissions::{Permission, Role, RolePermissions};

    fn banner(position: i32, created_offset_secs: i64) -> Banner {
        Banner {
            id: Uuid::now_v7(),
            title: format!("Banner {position}"),
            image_url: "https://cdn.example.org/banner.webp".to_string(),
            link_url: None,
            position,
            is_active: true,
            starts_at: None,
            ends_at: None,
            created_at: base_time() + Duration::seconds(created_offset_secs),
        }
    }

    fn popup(created_offset_secs: i64) -> Popup {
        Popup {
            id: Uuid::now_v7(),
            title: "Tryouts".to_string(),
            content: "Registration is open".to_string(),
            image_url: None,
            link_url: None,
            is_active: true,
            starts_at: None,
            ends_at: None,
            created_at: base_time() + Duration::seconds(created_offset_secs),
        }
    }

    fn base_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn settings(status: SiteStatus) -> SiteSettings {
        SiteSettings {
            status,
            status_message: Some("Back soon".to_string()),
            updated_at: base_time(),
        }
    }

    fn viewer(role_id: i64, permissions: RolePermissions) -> AccessContext {
        AccessContext::new(
            Uuid::now_v7(),
            Some(Role {
                id: role_id,
                name: "member".to_string(),
                display_name: "Member".to_string(),
                description: None,
                color: None,
                permissions: Some(permissions),
                is_system_role: false,
            }),
        )
    }

    #[test]
    fn test_banners_sorted_by_position_then_age() {
        let banners = vec![banner(2, 0), banner(1, 10), banner(1, 5)];
        let visible = visible_banners(&banners, base_time() + Duration::hours(1));

        let order: Vec<(i32, DateTime<Utc>)> =
            visible.iter().map(|b| (b.position, b.created_at)).collect();
        assert_eq!(
            order,
            vec![
                (1, base_time() + Duration::seconds(5)),
                (1, base_time() + Duration::seconds(10)),
                (2, base_time()),
            ]
        );
    }

    #[test]
    fn test_inactive_banner_hidden() {
        let mut hidden = banner(1, 0);
        hidden.is_active = false;
        assert!(visible_banners(&[hidden], base_time()).is_empty());
    }

    #[test]
    fn test_banner_window_boundaries() {
        let mut b = banner(1, 0);
        b.starts_at = Some(base_time());
        b.ends_at = Some(base_time() + Duration::days(1));

        assert!(!b.is_visible_at(base_time() - Duration::seconds(1)));
        assert!(b.is_visible_at(base_time()));
        assert!(b.is_visible_at(base_time() + Duration::hours(23)));
        assert!(!b.is_visible_at(base_time() + Duration::days(1)));
    }

    #[test]
    fn test_select_newest_visible_popup() {
        let mut expired = popup(100);
        expired.ends_at = Some(base_time());
        let older = popup(10);
        let newer = popup(20);

        let popups = vec![older, newer.clone(), expired];
        let chosen = select_popup(&popups, base_time() + Duration::minutes(5));
        assert_eq!(chosen.map(|p| p.id), Some(newer.id));
    }

    #[test]
    fn test_select_popup_none_visible() {
        let mut scheduled = popup(0);
        scheduled.starts_at = Some(base_time() + Duration::days(7));
        assert!(select_popup(&[scheduled], base_time()).is_none());
        assert!(select_popup(&[], base_time()).is_none());
    }

    #[test]
    fn test_online_site_is_online_for_everyone() {
        let ids = RoleIds::default();
        assert_eq!(
            effective_status(&settings(SiteStatus::Online), None, &ids),
            SiteStatus::Online
        );
    }

    #[test]
    fn test_maintenance_for_anonymous_and_members() {
        let ids = RoleIds::default();
        let member = viewer(3, RolePermissions::default().with(Permission::ManageOwnProfile));

        assert_eq!(
            effective_status(&settings(SiteStatus::Maintenance), None, &ids),
            SiteStatus::Maintenance
        );
        assert_eq!(
            effective_status(&settings(SiteStatus::ComingSoon), Some(&member), &ids),
            SiteStatus::ComingSoon
        );
    }

    #[test]
    fn test_staff_bypass_maintenance() {
        let ids = RoleIds::default();
        let editor = viewer(9, RolePermissions::default().with(Permission::PanelAdmin));
        let dev = viewer(ids.dev, RolePermissions::default());

        assert_eq!(
            effective_status(&settings(SiteStatus::Maintenance), Some(&editor), &ids),
            SiteStatus::Online
        );
        assert_eq!(
            effective_status(&settings(SiteStatus::Maintenance), Some(&dev), &ids),
            SiteStatus::Online
        );
    }
}
