use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::page_service::{check_revision, commit};
use crate::auth::AdminContext;
use crate::database::PageStore;
use crate::page::editor;
use crate::page::{Page, PageError, ReorderPolicy, SectionInput, SectionPatch};

/// Section-level edits. Each call is one read-modify-write of the owning page.
#[derive(Clone)]
pub struct SectionEditor {
    store: Arc<dyn PageStore>,
    reorder_policy: ReorderPolicy,
}

impl SectionEditor {
    pub fn new(store: Arc<dyn PageStore>, reorder_policy: ReorderPolicy) -> Self {
        Self { store, reorder_policy }
    }

    async fn load(&self, page_id: Uuid, expected_revision: Option<i64>) -> Result<Page, PageError> {
        let page = self
            .store
            .find_by_id(page_id)
            .await?
            .ok_or_else(|| PageError::NotFound(page_id.to_string()))?;
        check_revision(&page, expected_revision)?;
        Ok(page)
    }

    /// Appends a section after the current highest `sortOrder`.
    pub async fn add_section(
        &self,
        ctx: &AdminContext,
        page_id: Uuid,
        input: SectionInput,
        expected_revision: Option<i64>,
    ) -> Result<Page, PageError> {
        let mut page = self.load(page_id, expected_revision).await?;
        let base_revision = page.revision;
        let section_id = editor::add_section(&mut page.sections, input)?;

        let page = commit(self.store.as_ref(), page, base_revision).await?;
        info!(actor = %ctx.username, page = %page_id, section = %section_id, "section added");
        Ok(page)
    }

    pub async fn update_section(
        &self,
        ctx: &AdminContext,
        page_id: Uuid,
        section_id: &str,
        patch: SectionPatch,
        expected_revision: Option<i64>,
    ) -> Result<Page, PageError> {
        let mut page = self.load(page_id, expected_revision).await?;
        let base_revision = page.revision;
        editor::update_section(&mut page.sections, section_id, patch)?;

        let page = commit(self.store.as_ref(), page, base_revision).await?;
        info!(actor = %ctx.username, page = %page_id, section = %section_id, "section updated");
        Ok(page)
    }

    pub async fn delete_section(
        &self,
        ctx: &AdminContext,
        page_id: Uuid,
        section_id: &str,
        expected_revision: Option<i64>,
    ) -> Result<Page, PageError> {
        let mut page = self.load(page_id, expected_revision).await?;
        let base_revision = page.revision;
        editor::delete_section(&mut page.sections, section_id)?;

        let page = commit(self.store.as_ref(), page, base_revision).await?;
        info!(actor = %ctx.username, page = %page_id, section = %section_id, "section deleted");
        Ok(page)
    }

    /// Rewrites the section list to follow `ordered_ids`.
    ///
    /// Sections not named are removed. Ids that match nothing are dropped or
    /// rejected depending on the configured policy.
    pub async fn reorder_sections(
        &self,
        ctx: &AdminContext,
        page_id: Uuid,
        ordered_ids: &[String],
        expected_revision: Option<i64>,
    ) -> Result<Page, PageError> {
        let mut page = self.load(page_id, expected_revision).await?;
        let base_revision = page.revision;
        page.sections = editor::reorder_sections(&page.sections, ordered_ids, self.reorder_policy)?;

        let page = commit(self.store.as_ref(), page, base_revision).await?;
        info!(
            actor = %ctx.username,
            page = %page_id,
            sections = page.sections.len(),
            "sections reordered"
        );
        Ok(page)
    }
}
