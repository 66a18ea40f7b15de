//! Domain layer: the estimate pricing engine and everything that reads its output

pub mod model;
pub mod repository;
pub mod service;

pub use model::*;
pub use repository::{SessionRepository, SettingsRepository};
