pub mod auth;
pub mod check;
pub mod init;
pub mod pages;
