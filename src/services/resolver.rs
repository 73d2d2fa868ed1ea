use serde::Serialize;

use super::PageService;
use crate::page::{render_section, sorted_for_display, Page, PageError, PageSeo, RenderedSection};

/// A page as handed to the public site: active only, sections in display order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPage {
    pub slug: String,
    pub title: String,
    /// `metaTitle`, falling back to the page title.
    pub head_title: String,
    pub meta_description: Option<String>,
    pub seo: Option<PageSeo>,
    pub sections: Vec<RenderedSection>,
}

impl From<&Page> for RenderedPage {
    fn from(page: &Page) -> Self {
        Self {
            slug: page.slug.clone(),
            title: page.title.clone(),
            head_title: page.meta_title.clone().unwrap_or_else(|| page.title.clone()),
            meta_description: page.meta_description.clone(),
            seo: page.seo.clone(),
            sections: page.sections.iter().map(render_section).collect(),
        }
    }
}

/// Public read path: slug to renderable page.
#[derive(Clone)]
pub struct PageResolver {
    pages: PageService,
}

impl PageResolver {
    pub fn new(pages: PageService) -> Self {
        Self { pages }
    }

    /// Inactive and missing pages are indistinguishable to callers.
    pub async fn resolve(&self, slug: &str) -> Result<Page, PageError> {
        let mut page = self.pages.get_by_slug(slug, false).await?;
        sorted_for_display(&mut page.sections);
        Ok(page)
    }

    pub async fn render(&self, slug: &str) -> Result<RenderedPage, PageError> {
        let page = self.resolve(slug).await?;
        Ok(RenderedPage::from(&page))
    }
}
