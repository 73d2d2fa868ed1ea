pub mod page_service;
pub mod resolver;
pub mod section_editor;

pub use page_service::PageService;
pub use resolver::{PageResolver, RenderedPage};
pub use section_editor::SectionEditor;
