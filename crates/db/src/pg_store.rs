//! PostgreSQL page store.
//!
//! Row-level reads and writes against the `pages` table. The author's display
//! name is filled in with a `LEFT JOIN` on `users`, so a dangling `author_id`
//! simply yields a `NULL` name.

use async_trait::async_trait;
use sqlx::PgPool;
use wikimasters_core::types::DbId;

use crate::models::page::{CreatePage, Page, UpdatePage};
use crate::store::{PageStore, StoreResult};

/// Select list for a `pages p LEFT JOIN users u` query.
const COLUMNS: &str = "p.id, p.title, p.content, p.author_id, u.name AS author_name, \
    p.created_at, p.updated_at";

pub struct PgPageStore {
    pool: PgPool,
}

impl PgPageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escape `%`, `_` and `\` so user input matches literally inside `ILIKE`.
fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl PageStore for PgPageStore {
    async fn list(&self) -> StoreResult<Vec<Page>> {
        let query = format!(
            "SELECT {COLUMNS} FROM pages p
             LEFT JOIN users u ON u.id = p.author_id
             ORDER BY p.id"
        );
        Ok(sqlx::query_as::<_, Page>(&query)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_by_id(&self, id: DbId) -> StoreResult<Option<Page>> {
        let query = format!(
            "SELECT {COLUMNS} FROM pages p
             LEFT JOIN users u ON u.id = p.author_id
             WHERE p.id = $1"
        );
        Ok(sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn create(&self, input: CreatePage) -> StoreResult<Page> {
        let query = format!(
            "WITH p AS (
                INSERT INTO pages (title, content, author_id)
                VALUES ($1, $2, $3)
                RETURNING *
             )
             SELECT {COLUMNS} FROM p
             LEFT JOIN users u ON u.id = p.author_id"
        );
        let page = sqlx::query_as::<_, Page>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.author_id)
            .fetch_one(&self.pool)
            .await?;

        tracing::info!(page_id = page.id, title = %page.title, "Created page");
        Ok(page)
    }

    async fn update(&self, id: DbId, input: UpdatePage) -> StoreResult<Option<Page>> {
        let query = format!(
            "WITH p AS (
                UPDATE pages SET
                    title = COALESCE($1, title),
                    content = COALESCE($2, content),
                    updated_at = GREATEST(now(), updated_at + INTERVAL '1 microsecond')
                WHERE id = $3
                RETURNING *
             )
             SELECT {COLUMNS} FROM p
             LEFT JOIN users u ON u.id = p.author_id"
        );
        let page = sqlx::query_as::<_, Page>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(ref page) = page {
            tracing::info!(page_id = id, title = %page.title, "Updated page");
        }
        Ok(page)
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(page_id = id, "Deleted page");
        }
        Ok(deleted)
    }

    async fn search(&self, query_str: &str) -> StoreResult<Vec<Page>> {
        let query = format!(
            "SELECT {COLUMNS} FROM pages p
             LEFT JOIN users u ON u.id = p.author_id
             WHERE p.title ILIKE $1 ESCAPE '\\' OR p.content ILIKE $1 ESCAPE '\\'
             ORDER BY p.id"
        );
        Ok(sqlx::query_as::<_, Page>(&query)
            .bind(like_pattern(query_str))
            .fetch_all(&self.pool)
            .await?)
    }

    async fn health_check(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_wraps_and_escapes() {
        assert_eq!(like_pattern("rust"), "%rust%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
    }
}
