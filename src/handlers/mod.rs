// handlers/mod.rs - two-tier handler layout
//
// public    - no authentication (/pages/*, /admin/login)
// protected - admin JWT required (/admin/pages/*)
pub mod protected;
pub mod public;
