use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::AdminContext;
use crate::database::{DatabaseError, PageOrder, PageStore, ReplaceOutcome};
use crate::page::editor::build_sections;
use crate::page::payload::validate_page_fields;
use crate::page::{Page, PageError, PageInput, PagePatch};

/// CRUD over page documents with slug uniqueness.
#[derive(Clone)]
pub struct PageService {
    store: Arc<dyn PageStore>,
}

impl PageService {
    pub fn new(store: Arc<dyn PageStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, ctx: &AdminContext, input: PageInput) -> Result<Page, PageError> {
        validate_page_fields(
            &input.slug,
            &input.title,
            input.meta_title.as_deref(),
            input.meta_description.as_deref(),
        )?;

        if self.store.slug_taken(&input.slug, None).await? {
            return Err(PageError::DuplicateSlug(input.slug));
        }

        let now = Utc::now();
        let page = Page {
            id: Uuid::new_v4(),
            slug: input.slug,
            title: input.title,
            meta_title: non_empty(input.meta_title),
            meta_description: non_empty(input.meta_description),
            is_active: input.is_active.unwrap_or(true),
            sections: build_sections(input.sections)?,
            seo: input.seo,
            revision: 1,
            created_at: now,
            updated_at: now,
        };

        match self.store.insert(&page).await {
            Ok(()) => {}
            // Lost a race with another create between the check and the insert
            Err(DatabaseError::UniqueViolation(_)) => return Err(PageError::DuplicateSlug(page.slug)),
            Err(e) => return Err(e.into()),
        }

        info!(actor = %ctx.username, page = %page.id, slug = %page.slug, "page created");
        Ok(page)
    }

    pub async fn get_by_slug(&self, slug: &str, include_inactive: bool) -> Result<Page, PageError> {
        match self.store.find_by_slug(slug).await? {
            Some(page) if page.is_active || include_inactive => Ok(page),
            _ => Err(PageError::NotFound(slug.to_string())),
        }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Page, PageError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| PageError::NotFound(id.to_string()))
    }

    /// All pages, active or not. An empty `order` means most recently updated first.
    pub async fn list_all(&self, order: &[PageOrder]) -> Result<Vec<Page>, PageError> {
        let default_order;
        let order = if order.is_empty() {
            default_order = PageOrder::default_listing();
            &default_order
        } else {
            order
        };
        Ok(self.store.list(order).await?)
    }

    /// Merges the provided fields. `sections`, when present, replaces the whole list.
    ///
    /// Empty `metaTitle`/`metaDescription` strings clear the override.
    pub async fn update(
        &self,
        ctx: &AdminContext,
        id: Uuid,
        patch: PagePatch,
        expected_revision: Option<i64>,
    ) -> Result<Page, PageError> {
        let current = self.get_by_id(id).await?;
        check_revision(&current, expected_revision)?;
        let base_revision = current.revision;
        let mut next = current;

        if let Some(slug) = patch.slug {
            if slug != next.slug && self.store.slug_taken(&slug, Some(id)).await? {
                return Err(PageError::DuplicateSlug(slug));
            }
            next.slug = slug;
        }
        if let Some(title) = patch.title {
            next.title = title;
        }
        if let Some(meta_title) = patch.meta_title {
            next.meta_title = non_empty(Some(meta_title));
        }
        if let Some(meta_description) = patch.meta_description {
            next.meta_description = non_empty(Some(meta_description));
        }
        if let Some(is_active) = patch.is_active {
            next.is_active = is_active;
        }
        if let Some(sections) = patch.sections {
            next.sections = build_sections(sections)?;
        }
        if let Some(seo) = patch.seo {
            next.seo = Some(seo);
        }

        validate_page_fields(
            &next.slug,
            &next.title,
            next.meta_title.as_deref(),
            next.meta_description.as_deref(),
        )?;

        let page = commit(self.store.as_ref(), next, base_revision).await?;
        info!(actor = %ctx.username, page = %page.id, revision = page.revision, "page updated");
        Ok(page)
    }

    pub async fn delete(&self, ctx: &AdminContext, id: Uuid) -> Result<(), PageError> {
        if !self.store.delete(id).await? {
            return Err(PageError::NotFound(id.to_string()));
        }
        info!(actor = %ctx.username, page = %id, "page deleted");
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Fails with `Conflict` when the caller edited an older revision than the stored one.
pub(crate) fn check_revision(page: &Page, expected: Option<i64>) -> Result<(), PageError> {
    match expected {
        Some(expected) if expected != page.revision => {
            warn!(page = %page.id, expected, current = page.revision, "stale revision supplied");
            Err(PageError::Conflict {
                expected,
                current: page.revision,
            })
        }
        _ => Ok(()),
    }
}

/// Persists `next` as the successor of `base_revision` in one document replace.
pub(crate) async fn commit(
    store: &dyn PageStore,
    mut next: Page,
    base_revision: i64,
) -> Result<Page, PageError> {
    next.revision = base_revision + 1;
    next.updated_at = Utc::now();

    match store.replace(&next, base_revision).await {
        Ok(ReplaceOutcome::Replaced) => Ok(next),
        Ok(ReplaceOutcome::Missing) => Err(PageError::NotFound(next.id.to_string())),
        Ok(ReplaceOutcome::Stale { current }) => {
            warn!(page = %next.id, base_revision, current, "concurrent page write rejected");
            Err(PageError::Conflict {
                expected: base_revision,
                current,
            })
        }
        Err(DatabaseError::UniqueViolation(_)) => Err(PageError::DuplicateSlug(next.slug)),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{MemoryPageStore, PageColumn, SortDirection};
    use crate::page::{SectionInput, SectionType};

    fn service() -> PageService {
        PageService::new(Arc::new(MemoryPageStore::new()))
    }

    fn ctx() -> AdminContext {
        AdminContext::system("test")
    }

    fn input(slug: &str, title: &str) -> PageInput {
        PageInput {
            slug: slug.to_string(),
            title: title.to_string(),
            meta_title: None,
            meta_description: None,
            is_active: None,
            sections: Vec::new(),
            seo: None,
        }
    }

    #[tokio::test]
    async fn duplicate_slug_is_rejected_until_changed() {
        let svc = service();
        svc.create(&ctx(), input("about", "About")).await.unwrap();

        let err = svc.create(&ctx(), input("about", "About again")).await.unwrap_err();
        assert!(matches!(err, PageError::DuplicateSlug(s) if s == "about"));

        let page = svc.create(&ctx(), input("about-us", "About again")).await.unwrap();
        assert_eq!(page.slug, "about-us");
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let svc = service();
        let mut req = input("services", "Services");
        req.meta_title = Some("Our services".into());
        req.sections = vec![SectionInput::of_kind(SectionType::Hero)];
        let created = svc.create(&ctx(), req).await.unwrap();

        let fetched = svc.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.meta_title.as_deref(), Some("Our services"));
        assert!(fetched.is_active);
        assert_eq!(fetched.revision, 1);
        assert!(!fetched.sections[0].id.is_empty());
    }

    #[tokio::test]
    async fn inactive_pages_hidden_unless_requested() {
        let svc = service();
        let mut req = input("draft", "Draft");
        req.is_active = Some(false);
        svc.create(&ctx(), req).await.unwrap();

        assert!(matches!(svc.get_by_slug("draft", false).await, Err(PageError::NotFound(_))));
        assert!(svc.get_by_slug("draft", true).await.is_ok());
    }

    #[tokio::test]
    async fn update_rechecks_slug_excluding_self() {
        let svc = service();
        let a = svc.create(&ctx(), input("a", "A")).await.unwrap();
        svc.create(&ctx(), input("b", "B")).await.unwrap();

        let same = PagePatch { slug: Some("a".into()), title: Some("A2".into()), ..Default::default() };
        let updated = svc.update(&ctx(), a.id, same, None).await.unwrap();
        assert_eq!(updated.title, "A2");
        assert_eq!(updated.revision, 2);
        assert!(updated.updated_at >= a.updated_at);

        let clash = PagePatch { slug: Some("b".into()), ..Default::default() };
        let err = svc.update(&ctx(), a.id, clash, None).await.unwrap_err();
        assert!(matches!(err, PageError::DuplicateSlug(_)));
    }

    #[tokio::test]
    async fn update_validates_like_create() {
        let svc = service();
        let page = svc.create(&ctx(), input("a", "A")).await.unwrap();

        let bad = PagePatch { slug: Some("Bad Slug".into()), ..Default::default() };
        assert!(matches!(
            svc.update(&ctx(), page.id, bad, None).await,
            Err(PageError::InvalidPage { field: "slug", .. })
        ));

        let missing = svc.update(&ctx(), Uuid::new_v4(), PagePatch::default(), None).await;
        assert!(matches!(missing, Err(PageError::NotFound(_))));
    }

    #[tokio::test]
    async fn stale_revision_conflicts() {
        let svc = service();
        let page = svc.create(&ctx(), input("a", "A")).await.unwrap();
        svc.update(&ctx(), page.id, PagePatch { title: Some("B".into()), ..Default::default() }, Some(1))
            .await
            .unwrap();

        let err = svc
            .update(&ctx(), page.id, PagePatch { title: Some("C".into()), ..Default::default() }, Some(1))
            .await
            .unwrap_err();
        assert!(matches!(err, PageError::Conflict { expected: 1, current: 2 }));
    }

    #[tokio::test]
    async fn list_defaults_to_most_recently_updated() {
        let svc = service();
        let first = svc.create(&ctx(), input("first", "Zeta")).await.unwrap();
        svc.create(&ctx(), input("second", "Alpha")).await.unwrap();
        svc.update(&ctx(), first.id, PagePatch { title: Some("Zeta 2".into()), ..Default::default() }, None)
            .await
            .unwrap();

        let pages = svc.list_all(&[]).await.unwrap();
        assert_eq!(pages[0].slug, "first");

        let by_title = svc
            .list_all(&[PageOrder { column: PageColumn::Title, sort: SortDirection::Asc }])
            .await
            .unwrap();
        assert_eq!(by_title[0].title, "Alpha");
    }

    #[tokio::test]
    async fn delete_is_hard_and_reports_missing() {
        let svc = service();
        let page = svc.create(&ctx(), input("gone", "Gone")).await.unwrap();
        svc.delete(&ctx(), page.id).await.unwrap();
        assert!(matches!(svc.get_by_id(page.id).await, Err(PageError::NotFound(_))));
        assert!(matches!(svc.delete(&ctx(), page.id).await, Err(PageError::NotFound(_))));
    }
}
