// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Page reads for the public site and token acquisition for admins.
pub mod login;
pub mod page_get;
pub mod page_render;

pub use login::login_post;
pub use page_get::page_get;
pub use page_render::page_render;
