//! Database queries for roles.
//!
//! Roles are maintained by the admin panel; this module only reads them,
//! plus the insert/delete helpers used for seeding and tests.

use sqlx::PgPool;
use uuid::Uuid;

use super::models::{Role, RolePermissions, RoleRow};
use crate::db::db_error;

const ROLE_COLUMNS: &str =
    "id, name, display_name, description, color, permissions, is_system_role";

/// Get a role by id.
pub async fn get_role(pool: &PgPool, role_id: i64) -> sqlx::Result<Option<Role>> {
    let row = sqlx::query_as::<_, RoleRow>(&format!(
        "SELECT {ROLE_COLUMNS} FROM roles WHERE id = $1"
    ))
    .bind(role_id)
    .fetch_optional(pool)
    .await
    .map_err(db_error!("get_role", role_id = role_id))?;

    Ok(row.map(Role::from))
}

/// List all roles ordered by id.
pub async fn list_roles(pool: &PgPool) -> sqlx::Result<Vec<Role>> {
    let rows = sqlx::query_as::<_, RoleRow>(&format!(
        "SELECT {ROLE_COLUMNS} FROM roles ORDER BY id ASC"
    ))
    .fetch_all(pool)
    .await
    .map_err(db_error!("list_roles"))?;

    Ok(rows.into_iter().map(Role::from).collect())
}

/// Get the role assigned to a user.
///
/// Returns `None` if the user does not exist or has no role.
#[tracing::instrument(skip(pool))]
pub async fn get_user_role(pool: &PgPool, user_id: Uuid) -> sqlx::Result<Option<Role>> {
    let row = sqlx::query_as::<_, RoleRow>(
        r"
        SELECT r.id, r.name, r.display_name, r.description, r.color, r.permissions, r.is_system_role
        FROM users u
        INNER JOIN roles r ON r.id = u.role_id
        WHERE u.id = $1
        ",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(db_error!("get_user_role", user_id = %user_id))?;

    Ok(row.map(Role::from))
}

/// Parameters for [`insert_role`].
pub struct NewRole<'a> {
    pub id: i64,
    pub name: &'a str,
    pub display_name: &'a str,
    pub description: Option<&'a str>,
    pub color: Option<&'a str>,
    pub permissions: &'a RolePermissions,
    pub is_system_role: bool,
}

/// Insert a role with an explicit id.
pub async fn insert_role(pool: &PgPool, role: NewRole<'_>) -> sqlx::Result<Role> {
    let permissions = serde_json::to_value(role.permissions)
        .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

    let row = sqlx::query_as::<_, RoleRow>(&format!(
        r"
        INSERT INTO roles (id, name, display_name, description, color, permissions, is_system_role)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {ROLE_COLUMNS}
        "
    ))
    .bind(role.id)
    .bind(role.name)
    .bind(role.display_name)
    .bind(role.description)
    .bind(role.color)
    .bind(permissions)
    .bind(role.is_system_role)
    .fetch_one(pool)
    .await
    .map_err(db_error!("insert_role", role_id = role.id))?;

    Ok(Role::from(row))
}

/// Delete a role. Users holding it fall back to no role.
pub async fn delete_role(pool: &PgPool, role_id: i64) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM roles WHERE id = $1")
        .bind(role_id)
        .execute(pool)
        .await
        .map_err(db_error!("delete_role", role_id = role_id))?;

    Ok(result.rows_affected() > 0)
}
