use async_trait::async_trait;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::order::PageOrder;
use crate::page::Page;

/// Result of a compare-and-swap replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceOutcome {
    Replaced,
    /// No page with that id.
    Missing,
    /// The stored revision moved on since the caller read the page.
    Stale { current: i64 },
}

/// Whole-document persistence for pages. Sections live inside the page.
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Inserts a new page; `UniqueViolation` when the slug is taken.
    async fn insert(&self, page: &Page) -> Result<(), DatabaseError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Page>, DatabaseError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Page>, DatabaseError>;

    async fn list(&self, order: &[PageOrder]) -> Result<Vec<Page>, DatabaseError>;

    /// True when another page (not `exclude`) already uses `slug`.
    async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, DatabaseError>;

    /// Writes `page` only if the stored revision still equals `expected_revision`.
    async fn replace(&self, page: &Page, expected_revision: i64) -> Result<ReplaceOutcome, DatabaseError>;

    /// Returns false when there was nothing to delete.
    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
