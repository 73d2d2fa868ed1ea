// Page/section composition engine.
//
// model    - Page, Section, Item and client input shapes (camelCase JSON)
// payload  - per-type validation and typed section views
// editor   - pure section list mutations (add/update/delete/reorder)
// render   - section -> presentation block
mod wire;

pub mod editor;
pub mod error;
pub mod model;
pub mod payload;
pub mod render;

pub use editor::ReorderPolicy;
pub use error::PageError;
pub use model::{
    Alignment, ImageRef, Item, MetadataScalar, MetadataValue, Page, PageInput, PagePatch, PageSeo,
    Section, SectionInput, SectionPatch, SectionSettings, SectionType, Spacing,
};
pub use payload::{validate, SectionBody};
pub use render::{render_section, Block, RenderedSection};

/// Sections in display order: ascending `sortOrder`, ties keep stored order.
pub fn sorted_for_display(sections: &mut [Section]) {
    sections.sort_by_key(|s| s.sort_order);
}
