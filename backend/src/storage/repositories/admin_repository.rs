use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::models::admin::Admin;
use crate::storage::connection::DbConnection;
use crate::storage::traits::AdminStorage;

/// Repository for administrator accounts
#[derive(Clone)]
pub struct AdminRepository {
    db: DbConnection,
}

impl AdminRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn admin_from_row(row: &SqliteRow) -> Result<Admin> {
    let id: String = row.try_get("id")?;
    Ok(Admin {
        id: Uuid::parse_str(&id).with_context(|| format!("Corrupt admin id '{}'", id))?,
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
        full_name: row.try_get("full_name")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl AdminStorage for AdminRepository {
    async fn insert_admin(&self, admin: &Admin) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO admins (id, username, password_hash, full_name, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(admin.id.to_string())
        .bind(&admin.username)
        .bind(&admin.password_hash)
        .bind(&admin.full_name)
        .bind(admin.created_at)
        .bind(admin.updated_at)
        .execute(self.db.pool())
        .await
        .with_context(|| format!("Failed to insert admin {}", admin.username))?;
        Ok(())
    }

    async fn get_admin(&self, id: Uuid) -> Result<Option<Admin>> {
        let row = sqlx::query(
            "SELECT id, username, password_hash, full_name, created_at, updated_at FROM admins WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(self.db.pool())
        .await?;
        row.as_ref().map(admin_from_row).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>> {
        let row = sqlx::query(
            "SELECT id, username, password_hash, full_name, created_at, updated_at FROM admins WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(self.db.pool())
        .await?;
        row.as_ref().map(admin_from_row).transpose()
    }

    async fn find_by_compact_full_name(&self, compact_name: &str) -> Result<Option<Admin>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password_hash, full_name, created_at, updated_at
            FROM admins
            WHERE REPLACE(full_name, ' ', '') = ?
            LIMIT 1
            "#,
        )
        .bind(compact_name)
        .fetch_optional(self.db.pool())
        .await?;
        row.as_ref().map(admin_from_row).transpose()
    }
}
