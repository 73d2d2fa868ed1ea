use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, PgPool};
use tracing::{debug, info};
use uuid::Uuid;

use super::manager::DatabaseError;
use super::order::PageOrder;
use super::store::{PageStore, ReplaceOutcome};
use crate::page::{Page, PageSeo, Section};

const PAGE_COLUMNS: &str = "id, slug, title, meta_title, meta_description, is_active, \
                            sections, seo, revision, created_at, updated_at";

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS pages (
        id               UUID PRIMARY KEY,
        slug             TEXT NOT NULL,
        title            TEXT NOT NULL,
        meta_title       TEXT,
        meta_description TEXT,
        is_active        BOOLEAN NOT NULL DEFAULT TRUE,
        sections         JSONB NOT NULL DEFAULT '[]'::jsonb,
        seo              JSONB,
        revision         BIGINT NOT NULL DEFAULT 1,
        created_at       TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at       TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE UNIQUE INDEX IF NOT EXISTS pages_slug_key ON pages (slug)",
    "CREATE INDEX IF NOT EXISTS pages_updated_at_idx ON pages (updated_at DESC)",
];

#[derive(Debug, FromRow)]
struct PageRow {
    id: Uuid,
    slug: String,
    title: String,
    meta_title: Option<String>,
    meta_description: Option<String>,
    is_active: bool,
    sections: Json<Vec<Section>>,
    seo: Option<Json<PageSeo>>,
    revision: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PageRow> for Page {
    fn from(row: PageRow) -> Self {
        Page {
            id: row.id,
            slug: row.slug,
            title: row.title,
            meta_title: row.meta_title,
            meta_description: row.meta_description,
            is_active: row.is_active,
            sections: row.sections.0,
            seo: row.seo.map(|s| s.0),
            revision: row.revision,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Pages stored one row per page, sections embedded as JSONB.
#[derive(Clone)]
pub struct PgPageStore {
    pool: PgPool,
    log_queries: bool,
}

impl PgPageStore {
    pub fn new(pool: PgPool, log_queries: bool) -> Self {
        Self { pool, log_queries }
    }

    /// Creates the `pages` table and its indexes if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Page schema ready");
        Ok(())
    }

    fn log_sql(&self, sql: &str) {
        if self.log_queries {
            debug!(sql = %sql, "page query");
        }
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}

fn map_unique(err: sqlx::Error, slug: &str) -> DatabaseError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            return DatabaseError::UniqueViolation(format!("slug '{}'", slug));
        }
    }
    DatabaseError::Sqlx(err)
}

#[async_trait]
impl PageStore for PgPageStore {
    async fn insert(&self, page: &Page) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO pages (id, slug, title, meta_title, meta_description, is_active,
                                sections, seo, revision, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(page.id)
        .bind(&page.slug)
        .bind(&page.title)
        .bind(&page.meta_title)
        .bind(&page.meta_description)
        .bind(page.is_active)
        .bind(Json(&page.sections))
        .bind(page.seo.as_ref().map(Json))
        .bind(page.revision)
        .bind(page.created_at)
        .bind(page.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique(e, &page.slug))?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Page>, DatabaseError> {
        let sql = format!("SELECT {} FROM pages WHERE id = $1", PAGE_COLUMNS);
        self.log_sql(&sql);
        let row = sqlx::query_as::<_, PageRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Page::from))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Page>, DatabaseError> {
        let sql = format!("SELECT {} FROM pages WHERE slug = $1", PAGE_COLUMNS);
        self.log_sql(&sql);
        let row = sqlx::query_as::<_, PageRow>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Page::from))
    }

    async fn list(&self, order: &[PageOrder]) -> Result<Vec<Page>, DatabaseError> {
        let sql = format!("SELECT {} FROM pages {}", PAGE_COLUMNS, PageOrder::generate(order));
        self.log_sql(&sql);
        let rows = sqlx::query_as::<_, PageRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Page::from).collect())
    }

    async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, DatabaseError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM pages WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2)",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(count.0 > 0)
    }

    async fn replace(&self, page: &Page, expected_revision: i64) -> Result<ReplaceOutcome, DatabaseError> {
        let result = sqlx::query(
            "UPDATE pages
                SET slug = $2, title = $3, meta_title = $4, meta_description = $5,
                    is_active = $6, sections = $7, seo = $8, revision = $9, updated_at = $10
              WHERE id = $1 AND revision = $11",
        )
        .bind(page.id)
        .bind(&page.slug)
        .bind(&page.title)
        .bind(&page.meta_title)
        .bind(&page.meta_description)
        .bind(page.is_active)
        .bind(Json(&page.sections))
        .bind(page.seo.as_ref().map(Json))
        .bind(page.revision)
        .bind(page.updated_at)
        .bind(expected_revision)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique(e, &page.slug))?;

        if result.rows_affected() > 0 {
            return Ok(ReplaceOutcome::Replaced);
        }

        let current: Option<(i64,)> = sqlx::query_as("SELECT revision FROM pages WHERE id = $1")
            .bind(page.id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(match current {
            Some((current,)) => ReplaceOutcome::Stale { current },
            None => ReplaceOutcome::Missing,
        })
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
