use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::order::PageOrder;
use super::store::{PageStore, ReplaceOutcome};
use crate::page::Page;

/// Process-local page store. Used by tests and `PAGE_STORE=memory` deployments.
#[derive(Clone, Default)]
pub struct MemoryPageStore {
    pages: Arc<RwLock<HashMap<Uuid, Page>>>,
}

impl MemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PageStore for MemoryPageStore {
    async fn insert(&self, page: &Page) -> Result<(), DatabaseError> {
        let mut pages = self.pages.write().await;
        if pages.values().any(|p| p.slug == page.slug) {
            return Err(DatabaseError::UniqueViolation(format!("slug '{}'", page.slug)));
        }
        if pages.contains_key(&page.id) {
            return Err(DatabaseError::UniqueViolation(format!("id '{}'", page.id)));
        }
        pages.insert(page.id, page.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Page>, DatabaseError> {
        Ok(self.pages.read().await.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Page>, DatabaseError> {
        Ok(self
            .pages
            .read()
            .await
            .values()
            .find(|p| p.slug == slug)
            .cloned())
    }

    async fn list(&self, order: &[PageOrder]) -> Result<Vec<Page>, DatabaseError> {
        let mut all: Vec<Page> = self.pages.read().await.values().cloned().collect();
        all.sort_by(|a, b| PageOrder::compare(order, a, b));
        Ok(all)
    }

    async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, DatabaseError> {
        Ok(self
            .pages
            .read()
            .await
            .values()
            .any(|p| p.slug == slug && Some(p.id) != exclude))
    }

    async fn replace(&self, page: &Page, expected_revision: i64) -> Result<ReplaceOutcome, DatabaseError> {
        let mut pages = self.pages.write().await;

        if pages.values().any(|p| p.slug == page.slug && p.id != page.id) {
            return Err(DatabaseError::UniqueViolation(format!("slug '{}'", page.slug)));
        }

        match pages.get_mut(&page.id) {
            None => Ok(ReplaceOutcome::Missing),
            Some(stored) if stored.revision != expected_revision => Ok(ReplaceOutcome::Stale {
                current: stored.revision,
            }),
            Some(stored) => {
                *stored = page.clone();
                Ok(ReplaceOutcome::Replaced)
            }
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        Ok(self.pages.write().await.remove(&id).is_some())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn page(slug: &str) -> Page {
        let now = Utc::now();
        Page {
            id: Uuid::new_v4(),
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            meta_title: None,
            meta_description: None,
            is_active: true,
            sections: Vec::new(),
            seo: None,
            revision: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn insert_enforces_unique_slug() {
        let store = MemoryPageStore::new();
        store.insert(&page("about")).await.unwrap();
        let err = store.insert(&page("about")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::UniqueViolation(_)));
    }

    #[tokio::test]
    async fn replace_compares_revision() {
        let store = MemoryPageStore::new();
        let mut p = page("about");
        store.insert(&p).await.unwrap();

        p.title = "About us".into();
        p.revision = 2;
        assert_eq!(store.replace(&p, 1).await.unwrap(), ReplaceOutcome::Replaced);
        assert_eq!(
            store.replace(&p, 1).await.unwrap(),
            ReplaceOutcome::Stale { current: 2 }
        );

        let missing = page("ghost");
        assert_eq!(store.replace(&missing, 1).await.unwrap(), ReplaceOutcome::Missing);
    }

    #[tokio::test]
    async fn slug_taken_excludes_self() {
        let store = MemoryPageStore::new();
        let p = page("services");
        store.insert(&p).await.unwrap();
        assert!(store.slug_taken("services", None).await.unwrap());
        assert!(!store.slug_taken("services", Some(p.id)).await.unwrap());
        assert!(!store.slug_taken("contact", None).await.unwrap());
    }
}
