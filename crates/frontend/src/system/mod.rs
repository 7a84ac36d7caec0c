pub mod app_context;
pub mod auth;
