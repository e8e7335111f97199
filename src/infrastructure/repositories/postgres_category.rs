use super::map_sqlx;
use crate::application::{
    ApplicationResult,
    ports::category::{CategoryDirectory, CategoryInfo},
};
use crate::domain::article::CategoryId;
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

/// Read-only view of the `categories` table owned by the category module.
#[derive(Clone)]
pub struct PostgresCategoryDirectory {
    pool: PgPool,
}

impl PostgresCategoryDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    name: String,
    color: String,
}

#[async_trait]
impl CategoryDirectory for PostgresCategoryDirectory {
    async fn find(&self, id: &CategoryId) -> ApplicationResult<Option<CategoryInfo>> {
        let row = sqlx::query_as::<_, CategoryRow>("SELECT name, color FROM categories WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(row.map(|row| CategoryInfo {
            name: row.name,
            color: row.color,
        }))
    }
}
