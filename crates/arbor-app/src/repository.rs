//! Store adapters for the persistence layer

use std::path::PathBuf;

use arbor_store::{SessionStore, SettingsStore};
use arbor_types::Result;

use crate::app::EstimateService;
use crate::config::Config;

/// Open the settings store
pub fn open_settings_store(config: &Config) -> Result<SettingsStore> {
    let store_dir = config.store_dir()?;
    SettingsStore::open(store_dir)
}

/// Open an estimate service over the file stores at a custom directory
pub fn open_estimate_service_at(
    store_dir: PathBuf,
) -> Result<EstimateService<SettingsStore, SessionStore>> {
    let settings = SettingsStore::open(store_dir.clone())?;
    let session = SessionStore::open(store_dir)?;
    Ok(EstimateService::new(settings, session))
}

/// Open an estimate service over the configured file stores
pub fn open_estimate_service(
    config: &Config,
) -> Result<EstimateService<SettingsStore, SessionStore>> {
    open_estimate_service_at(config.store_dir()?)
}
