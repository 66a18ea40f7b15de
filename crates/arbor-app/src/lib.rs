//! Application service layer - config, estimate workflow, export

pub mod app;
pub mod config;
pub mod export;
pub mod repository;
