//! Pricing and company settings

use arbor_domain::SettingsRepository;
use arbor_types::{CompanyInfo, Error, PricingConfig, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const SETTINGS_FILE: &str = "settings.json";

/// Persisted settings record. Fields missing on disk fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoredSettings {
    pub pricing: PricingConfig,
    pub company_info: CompanyInfo,
}

/// Settings read once at open and written on every explicit save
pub struct SettingsStore {
    store_path: PathBuf,
    settings: StoredSettings,
}

impl SettingsStore {
    /// Create or load a settings store
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join(SETTINGS_FILE);

        let settings = if store_path.exists() {
            let file = File::open(&store_path)?;
            let reader = BufReader::new(file);
            match serde_json::from_reader(reader) {
                Ok(settings) => settings,
                Err(e) => {
                    warn!(path = %store_path.display(), error = %e, "unreadable settings, using defaults");
                    StoredSettings::default()
                }
            }
        } else {
            StoredSettings::default()
        };
        debug!(path = %store_path.display(), "settings loaded");

        Ok(Self {
            store_path,
            settings,
        })
    }

    pub fn path(&self) -> &Path {
        &self.store_path
    }

    pub fn settings(&self) -> &StoredSettings {
        &self.settings
    }

    pub fn pricing(&self) -> &PricingConfig {
        &self.settings.pricing
    }

    pub fn company(&self) -> &CompanyInfo {
        &self.settings.company_info
    }

    /// Save store to disk
    fn persist(&self) -> Result<()> {
        let file = File::create(&self.store_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.settings)?;
        info!(path = %self.store_path.display(), "settings saved");
        Ok(())
    }

    /// Restore default prices and company details
    pub fn reset(&mut self) -> Result<()> {
        self.settings = StoredSettings::default();
        self.persist()
    }
}

impl SettingsRepository for SettingsStore {
    fn pricing_config(&self) -> std::result::Result<PricingConfig, Error> {
        Ok(self.settings.pricing)
    }

    fn company_info(&self) -> std::result::Result<CompanyInfo, Error> {
        Ok(self.settings.company_info.clone())
    }

    fn save(
        &mut self,
        pricing: &PricingConfig,
        company: &CompanyInfo,
    ) -> std::result::Result<(), Error> {
        self.settings = StoredSettings {
            pricing: *pricing,
            company_info: company.clone(),
        };
        self.persist()
    }
}

/// Read a settings record from a `.json` or `.toml` file.
///
/// Uses the same field names as the stored record; anything missing takes the
/// default value.
pub fn load_settings_file(path: &Path) -> Result<StoredSettings> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    if is_toml {
        toml::from_str(&content).map_err(|e| Error::Import(e.to_string()))
    } else {
        serde_json::from_str(&content).map_err(|e| Error::Import(e.to_string()))
    }
}
