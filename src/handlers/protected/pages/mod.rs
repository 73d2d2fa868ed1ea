// handlers/protected/pages - whole-page admin operations
pub mod create;
pub mod delete;
pub mod list;
pub mod show;
pub mod update;

pub use create::page_create;
pub use delete::page_delete;
pub use list::page_list;
pub use show::page_show;
pub use update::page_update;
