//! In-progress estimate, before finalize

use arbor_types::{CustomerInfo, HaulAwaySelection, LineItem, PricingConfig};
use serde::{Deserialize, Serialize};

use crate::service::pricing::{compute_totals, MINIMUM_CHARGE};

/// Customer, items and haul-away choice collected while building an estimate.
///
/// `Default` is the state after "Create New Estimate": no customer, no items,
/// haul-away off with one truckload pre-filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EstimateDraft {
    pub customer_info: CustomerInfo,
    pub line_items: Vec<LineItem>,
    pub haul_away: HaulAwaySelection,
}

impl EstimateDraft {
    pub fn set_customer(&mut self, customer_info: CustomerInfo) {
        self.customer_info = customer_info;
    }

    /// Append an item; insertion order is display order
    pub fn push_item(&mut self, item: LineItem) {
        self.line_items.push(item);
    }

    pub fn remove_item(&mut self, id: &str) -> Option<LineItem> {
        let index = self.line_items.iter().position(|item| item.id == id)?;
        Some(self.line_items.remove(index))
    }

    pub fn set_haul_away(&mut self, haul_away: HaulAwaySelection) {
        self.haul_away = haul_away;
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// Items plus haul-away, without the minimum charge floor
    pub fn running_total(&self, pricing: &PricingConfig) -> f64 {
        compute_totals(&self.line_items, &self.haul_away, pricing, MINIMUM_CHARGE).sub_total
    }
}
