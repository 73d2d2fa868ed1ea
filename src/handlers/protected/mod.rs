// handlers/protected/mod.rs - Admin handlers (JWT authentication required)
//
// Route Prefix: /admin/pages
// Middleware: require_admin, which injects AdminContext into request extensions
pub mod pages;
pub mod sections;
mod utils;
