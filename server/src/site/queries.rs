//! Database queries for site content.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::types::{Banner, CreateBannerRequest, CreatePopupRequest, Popup, SiteSettings, SiteStatus};
use crate::db::db_error;

// ============================================================================
// Banners
// ============================================================================

/// Active banners whose window has not closed yet.
///
/// Coarse database-side filter; [`visible_banners`](super::visible_banners)
/// applies the exact window and ordering.
pub async fn list_active_banners(pool: &PgPool, now: DateTime<Utc>) -> sqlx::Result<Vec<Banner>> {
    sqlx::query_as::<_, Banner>(
        r"
        SELECT * FROM banners
        WHERE is_active = true AND (ends_at IS NULL OR ends_at > $1)
        ORDER BY position ASC, created_at ASC
        ",
    )
    .bind(now)
    .fetch_all(pool)
    .await
    .map_err(db_error!("list_active_banners"))
}

/// Create a banner, appended after existing ones unless a position is given.
pub async fn create_banner(pool: &PgPool, req: &CreateBannerRequest) -> sqlx::Result<Banner> {
    sqlx::query_as::<_, Banner>(
        r"
        INSERT INTO banners (id, title, image_url, link_url, position, starts_at, ends_at)
        VALUES (
            $1, $2, $3, $4,
            COALESCE($5, (SELECT COALESCE(MAX(position), -1) + 1 FROM banners)),
            $6, $7
        )
        RETURNING *
        ",
    )
    .bind(Uuid::now_v7())
    .bind(&req.title)
    .bind(&req.image_url)
    .bind(&req.link_url)
    .bind(req.position)
    .bind(req.starts_at)
    .bind(req.ends_at)
    .fetch_one(pool)
    .await
    .map_err(db_error!("create_banner"))
}

/// Toggle a banner on or off.
pub async fn set_banner_active(pool: &PgPool, id: Uuid, active: bool) -> sqlx::Result<bool> {
    let result = sqlx::query("UPDATE banners SET is_active = $2 WHERE id = $1")
        .bind(id)
        .bind(active)
        .execute(pool)
        .await
        .map_err(db_error!("set_banner_active", banner_id = %id))?;
    Ok(result.rows_affected() > 0)
}

/// Delete a banner.
pub async fn delete_banner(pool: &PgPool, id: Uuid) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM banners WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(db_error!("delete_banner", banner_id = %id))?;
    Ok(result.rows_affected() > 0)
}

// ============================================================================
// Popups
// ============================================================================

/// Active popups whose window has not closed yet.
pub async fn list_active_popups(pool: &PgPool, now: DateTime<Utc>) -> sqlx::Result<Vec<Popup>> {
    sqlx::query_as::<_, Popup>(
        r"
        SELECT * FROM popups
        WHERE is_active = true AND (ends_at IS NULL OR ends_at > $1)
        ORDER BY created_at DESC
        ",
    )
    .bind(now)
    .fetch_all(pool)
    .await
    .map_err(db_error!("list_active_popups"))
}

/// Create a popup.
pub async fn create_popup(pool: &PgPool, req: &CreatePopupRequest) -> sqlx::Result<Popup> {
    sqlx::query_as::<_, Popup>(
        r"
        INSERT INTO popups (id, title, content, image_url, link_url, starts_at, ends_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        ",
    )
    .bind(Uuid::now_v7())
    .bind(&req.title)
    .bind(&req.content)
    .bind(&req.image_url)
    .bind(&req.link_url)
    .bind(req.starts_at)
    .bind(req.ends_at)
    .fetch_one(pool)
    .await
    .map_err(db_error!("create_popup"))
}

/// Delete a popup.
pub async fn delete_popup(pool: &PgPool, id: Uuid) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM popups WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(db_error!("delete_popup", popup_id = %id))?;
    Ok(result.rows_affected() > 0)
}

// ============================================================================
// Site Settings
// ============================================================================

/// Load the settings row, if it has been seeded.
pub async fn get_site_settings(pool: &PgPool) -> sqlx::Result<Option<SiteSettings>> {
    sqlx::query_as::<_, SiteSettings>(
        "SELECT status, status_message, updated_at FROM site_settings WHERE id = 1",
    )
    .fetch_optional(pool)
    .await
    .map_err(db_error!("get_site_settings"))
}

/// Set the site status and its message.
pub async fn update_site_status(
    pool: &PgPool,
    status: SiteStatus,
    message: Option<&str>,
) -> sqlx::Result<SiteSettings> {
    sqlx::query_as::<_, SiteSettings>(
        r"
        INSERT INTO site_settings (id, status, status_message, updated_at)
        VALUES (1, $1, $2, NOW())
        ON CONFLICT (id) DO UPDATE
            SET status = EXCLUDED.status,
                status_message = EXCLUDED.status_message,
                updated_at = NOW()
        RETURNING status, status_message, updated_at
        ",
    )
    .bind(status)
    .bind(message)
    .fetch_one(pool)
    .await
    .map_err(db_error!("update_site_status", status = ?status))
}
