pub mod api;
pub mod config;
pub mod session;
pub mod types;
pub mod ui;
pub mod views;
