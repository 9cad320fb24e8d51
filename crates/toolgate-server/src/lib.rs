pub mod app_state;
pub mod config;
pub mod handlers;
pub mod lifecycle;
pub mod router;
