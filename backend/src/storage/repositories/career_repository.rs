use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::models::career::{CareerCategory, SubCategory};
use crate::storage::connection::DbConnection;
use crate::storage::traits::CareerStorage;

/// Repository for career categories and their sub categories
#[derive(Clone)]
pub struct CareerRepository {
    db: DbConnection,
}

impl CareerRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    async fn sub_categories_for(&self, category_ids: &[Uuid], search: Option<&str>) -> Result<Vec<SubCategory>> {
        if category_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT id, category_id, sub_category_name, sub_net_profit, created_at, updated_at \
             FROM sub_categories WHERE category_id IN (",
        );
        let mut separated = builder.separated(", ");
        for id in category_ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");
        if let Some(search) = search {
            builder.push(" AND REPLACE(sub_category_name, ' ', '') LIKE ");
            builder.push_bind(compact_pattern(search));
            builder.push(" ESCAPE '\\'");
        }
        builder.push(" ORDER BY sub_category_name ASC");

        let rows = builder.build().fetch_all(self.db.pool()).await?;
        rows.iter().map(sub_category_from_row).collect()
    }
}

/// Substring LIKE pattern over a name with spaces removed.
fn compact_pattern(needle: &str) -> String {
    let escaped = needle
        .replace(' ', "")
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).with_context(|| format!("Corrupt id '{}'", raw))
}

fn sub_category_from_row(row: &SqliteRow) -> Result<SubCategory> {
    Ok(SubCategory {
        id: parse_id(row.try_get("id")?)?,
        category_id: parse_id(row.try_get("category_id")?)?,
        sub_category_name: row.try_get("sub_category_name")?,
        sub_net_profit: row.try_get("sub_net_profit")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn category_from_row(row: &SqliteRow) -> Result<CareerCategory> {
    Ok(CareerCategory {
        id: parse_id(row.try_get("id")?)?,
        category_name: row.try_get("category_name")?,
        sub_categories: Vec::new(),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl CareerStorage for CareerRepository {
    async fn insert_category(&self, category: &CareerCategory) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO career_categories (id, category_name, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(category.id.to_string())
        .bind(&category.category_name)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(self.db.pool())
        .await
        .with_context(|| format!("Failed to insert career category {}", category.category_name))?;
        Ok(())
    }

    async fn list_categories(
        &self,
        name_filter: Option<&str>,
        sub_category_search: Option<&str>,
    ) -> Result<Vec<CareerCategory>> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT id, category_name, created_at, updated_at FROM career_categories WHERE 1 = 1",
        );
        if let Some(name) = name_filter {
            builder.push(" AND REPLACE(category_name, ' ', '') LIKE ");
            builder.push_bind(compact_pattern(name));
            builder.push(" ESCAPE '\\'");
        }
        builder.push(" ORDER BY category_name ASC");

        let rows = builder
            .build()
            .fetch_all(self.db.pool())
            .await
            .context("Failed to list career categories")?;
        let mut categories = rows.iter().map(category_from_row).collect::<Result<Vec<_>>>()?;

        let ids: Vec<Uuid> = categories.iter().map(|c| c.id).collect();
        let mut grouped: HashMap<Uuid, Vec<SubCategory>> = HashMap::new();
        for sub in self.sub_categories_for(&ids, sub_category_search).await? {
            grouped.entry(sub.category_id).or_default().push(sub);
        }

        for category in categories.iter_mut() {
            category.sub_categories = grouped.remove(&category.id).unwrap_or_default();
        }
        if sub_category_search.is_some() {
            categories.retain(|c| !c.sub_categories.is_empty());
        }

        Ok(categories)
    }

    async fn get_category(&self, id: Uuid) -> Result<Option<CareerCategory>> {
        let row = sqlx::query(
            "SELECT id, category_name, created_at, updated_at FROM career_categories WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(row) => {
                let mut category = category_from_row(&row)?;
                category.sub_categories = self.sub_categories_for(&[id], None).await?;
                Ok(Some(category))
            }
            None => Ok(None),
        }
    }

    async fn find_category_by_compact_name(
        &self,
        compact_name: &str,
        excluding: Option<Uuid>,
    ) -> Result<Option<CareerCategory>> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT id, category_name, created_at, updated_at FROM career_categories \
             WHERE REPLACE(category_name, ' ', '') = ",
        );
        builder.push_bind(compact_name.to_string());
        if let Some(id) = excluding {
            builder.push(" AND id != ");
            builder.push_bind(id.to_string());
        }
        builder.push(" LIMIT 1");

        let row = builder.build().fetch_optional(self.db.pool()).await?;
        row.as_ref().map(category_from_row).transpose()
    }

    async fn update_category(&self, category: &CareerCategory) -> Result<()> {
        sqlx::query("UPDATE career_categories SET category_name = ?, updated_at = ? WHERE id = ?")
            .bind(&category.category_name)
            .bind(category.updated_at)
            .bind(category.id.to_string())
            .execute(self.db.pool())
            .await
            .with_context(|| format!("Failed to update career category {}", category.id))?;
        Ok(())
    }

    async fn delete_category(&self, id: Uuid) -> Result<bool> {
        let mut tx = self.db.pool().begin().await?;

        sqlx::query("DELETE FROM sub_categories WHERE category_id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM career_categories WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;

        tx.commit()
            .await
            .with_context(|| format!("Failed to delete career category {}", id))?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_sub_category(&self, sub_category: &SubCategory) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sub_categories (id, category_id, sub_category_name, sub_net_profit, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(sub_category.id.to_string())
        .bind(sub_category.category_id.to_string())
        .bind(&sub_category.sub_category_name)
        .bind(sub_category.sub_net_profit)
        .bind(sub_category.created_at)
        .bind(sub_category.updated_at)
        .execute(self.db.pool())
        .await
        .with_context(|| format!("Failed to insert sub category {}", sub_category.sub_category_name))?;
        Ok(())
    }

    async fn list_sub_categories(&self) -> Result<Vec<SubCategory>> {
        let rows = sqlx::query(
            r#"
            SELECT id, category_id, sub_category_name, sub_net_profit, created_at, updated_at
            FROM sub_categories
            ORDER BY sub_category_name ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await
        .context("Failed to list sub categories")?;
        rows.iter().map(sub_category_from_row).collect()
    }

    async fn get_sub_category(&self, id: Uuid) -> Result<Option<SubCategory>> {
        let row = sqlx::query(
            r#"
            SELECT id, category_id, sub_category_name, sub_net_profit, created_at, updated_at
            FROM sub_categories
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(self.db.pool())
        .await?;
        row.as_ref().map(sub_category_from_row).transpose()
    }

    async fn list_sub_categories_by_category(
        &self,
        category_id: Uuid,
        search: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<SubCategory>, i64)> {
        fn push_where<'a>(builder: &mut QueryBuilder<'a, Sqlite>, category_id: Uuid, search: Option<&str>) {
            builder.push(" WHERE category_id = ");
            builder.push_bind(category_id.to_string());
            if let Some(search) = search {
                builder.push(" AND REPLACE(sub_category_name, ' ', '') LIKE ");
                builder.push_bind(compact_pattern(search));
                builder.push(" ESCAPE '\\'");
            }
        }

        let mut count_query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM sub_categories");
        push_where(&mut count_query, category_id, search);
        let total = count_query
            .build_query_scalar::<i64>()
            .fetch_one(self.db.pool())
            .await
            .context("Failed to count sub categories")?;

        let mut page_query = QueryBuilder::<Sqlite>::new(
            "SELECT id, category_id, sub_category_name, sub_net_profit, created_at, updated_at FROM sub_categories",
        );
        push_where(&mut page_query, category_id, search);
        page_query.push(" ORDER BY sub_category_name ASC LIMIT ");
        page_query.push_bind(limit);
        page_query.push(" OFFSET ");
        page_query.push_bind(offset);

        let rows = page_query
            .build()
            .fetch_all(self.db.pool())
            .await
            .context("Failed to list sub categories by category")?;
        let page = rows.iter().map(sub_category_from_row).collect::<Result<Vec<_>>>()?;

        Ok((page, total))
    }

    async fn find_sub_category_by_compact_name(
        &self,
        compact_name: &str,
        excluding: Option<Uuid>,
    ) -> Result<Option<SubCategory>> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT id, category_id, sub_category_name, sub_net_profit, created_at, updated_at \
             FROM sub_categories WHERE REPLACE(sub_category_name, ' ', '') = ",
        );
        builder.push_bind(compact_name.to_string());
        if let Some(id) = excluding {
            builder.push(" AND id != ");
            builder.push_bind(id.to_string());
        }
        builder.push(" LIMIT 1");

        let row = builder.build().fetch_optional(self.db.pool()).await?;
        row.as_ref().map(sub_category_from_row).transpose()
    }

    async fn update_sub_category(&self, sub_category: &SubCategory) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE sub_categories
            SET category_id = ?, sub_category_name = ?, sub_net_profit = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(sub_category.category_id.to_string())
        .bind(&sub_category.sub_category_name)
        .bind(sub_category.sub_net_profit)
        .bind(sub_category.updated_at)
        .bind(sub_category.id.to_string())
        .execute(self.db.pool())
        .await
        .with_context(|| format!("Failed to update sub category {}", sub_category.id))?;
        Ok(())
    }

    async fn delete_sub_category(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sub_categories WHERE id = ?")
            .bind(id.to_string())
            .execute(self.db.pool())
            .await
            .with_context(|| format!("Failed to delete sub category {}", id))?;
        Ok(result.rows_affected() > 0)
    }
}
