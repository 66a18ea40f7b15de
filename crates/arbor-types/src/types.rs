//! Estimate data model

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Unit a service dimension is measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DimensionUnit {
    /// Tree height
    Feet,
    /// Stump diameter
    Inches,
}

/// Kind of tree work being priced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceKind {
    Trim,
    Cut,
    Grind,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 3] = [ServiceKind::Trim, ServiceKind::Cut, ServiceKind::Grind];

    /// Settings key for this service's unit price
    pub fn key(&self) -> &'static str {
        match self {
            ServiceKind::Trim => "TRIM",
            ServiceKind::Cut => "CUT",
            ServiceKind::Grind => "GRIND",
        }
    }

    /// Display title
    pub fn title(&self) -> &'static str {
        match self {
            ServiceKind::Trim => "Tree Trimming",
            ServiceKind::Cut => "Tree Removal",
            ServiceKind::Grind => "Stump Grinding",
        }
    }

    pub fn unit(&self) -> DimensionUnit {
        match self {
            ServiceKind::Trim | ServiceKind::Cut => DimensionUnit::Feet,
            ServiceKind::Grind => DimensionUnit::Inches,
        }
    }

    /// Dimension label shown next to item quantities
    pub fn unit_label(&self) -> &'static str {
        match self.unit() {
            DimensionUnit::Feet => "ft height",
            DimensionUnit::Inches => "inch diameter",
        }
    }

    /// Price label used on the settings screen
    pub fn price_label(&self) -> &'static str {
        match self.unit() {
            DimensionUnit::Feet => "$ / foot",
            DimensionUnit::Inches => "$ / inch diameter",
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Per-unit prices, keyed the same way as the persisted settings record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// $ per foot of height
    #[serde(rename = "TRIM")]
    pub trim: f64,
    /// $ per foot of height
    #[serde(rename = "CUT")]
    pub cut: f64,
    /// $ per inch of stump diameter
    #[serde(rename = "GRIND")]
    pub grind: f64,
    /// $ per truckload
    #[serde(rename = "haulAwayPerLoad")]
    pub haul_away_per_load: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            trim: 15.0,
            cut: 30.0,
            grind: 8.0,
            haul_away_per_load: 150.0,
        }
    }
}

impl PricingConfig {
    pub fn unit_price(&self, service: ServiceKind) -> f64 {
        match service {
            ServiceKind::Trim => self.trim,
            ServiceKind::Cut => self.cut,
            ServiceKind::Grind => self.grind,
        }
    }

    pub fn set_unit_price(&mut self, service: ServiceKind, price: f64) {
        match service {
            ServiceKind::Trim => self.trim = price,
            ServiceKind::Cut => self.cut = price,
            ServiceKind::Grind => self.grind = price,
        }
    }
}

/// Company details printed on every estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompanyInfo {
    pub name: String,
    pub contact_name: String,
    pub phone: String,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        Self {
            name: "Your Tree Service Pro".to_string(),
            contact_name: "John Doe".to_string(),
            phone: "(123) 456-7890".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerInfo {
    pub name: String,
    pub address: String,
}

impl CustomerInfo {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

fn default_quantity() -> u32 {
    1
}

/// One priced unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Opaque id, only used for display and removal
    pub id: String,
    pub service: ServiceKind,
    /// Height in feet or diameter in inches, see [`ServiceKind::unit`]
    pub dimension: f64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// dimension × quantity × unit price, fixed when the item was added
    pub cost: f64,
}

/// Generate a fresh line item id
pub fn new_item_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Whether haul-away is wanted and for how many loads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HaulAwaySelection {
    pub included: bool,
    pub truckloads: u32,
}

impl Default for HaulAwaySelection {
    fn default() -> Self {
        Self {
            included: false,
            truckloads: 1,
        }
    }
}

impl HaulAwaySelection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn loads(truckloads: u32) -> Self {
        Self {
            included: true,
            truckloads,
        }
    }
}

/// Haul-away selection together with its computed cost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HaulAway {
    pub included: bool,
    pub truckloads: u32,
    pub cost: f64,
}

/// Snapshot produced by a finalize action. Never mutated; a new finalize
/// replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizedEstimate {
    pub company_info: CompanyInfo,
    pub customer_info: CustomerInfo,
    pub line_items: Vec<LineItem>,
    pub haul_away: HaulAway,
    /// Items plus haul-away, before the minimum charge floor
    pub sub_total: f64,
    /// max(sub_total, minimum charge)
    pub final_total: f64,
    pub date: NaiveDate,
    pub minimum_charge_applied: bool,
}

impl FinalizedEstimate {
    /// Amount added on top of the sub-total to reach the minimum charge
    pub fn minimum_charge_adjustment(&self) -> f64 {
        self.final_total - self.sub_total
    }
}
