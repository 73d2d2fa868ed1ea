// handlers/protected/sections - section edits; each returns the full updated page
pub mod create;
pub mod delete;
pub mod reorder;
pub mod update;

pub use create::section_create;
pub use delete::section_delete;
pub use reorder::sections_reorder;
pub use update::section_update;
