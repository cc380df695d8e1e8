pub mod app;
pub mod config;
pub mod render;
pub mod replay;
pub mod views;
