//! JSON-file stores for settings and the estimate being built

pub mod session;
pub mod settings;

pub use session::SessionStore;
pub use settings::{load_settings_file, SettingsStore, StoredSettings};
