//! Estimate pricing and aggregation
//!
//! Pure functions from line items, haul-away selection and pricing to a
//! finalized estimate. Nothing here validates input or rounds money: callers
//! check input first (see [`super::validation`]) and rounding to cents only
//! happens when a value is formatted.

use arbor_types::{
    CompanyInfo, CustomerInfo, FinalizedEstimate, HaulAway, HaulAwaySelection, LineItem,
    PricingConfig, ServiceKind,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Floor on the amount ever billed for an estimate
pub const MINIMUM_CHARGE: f64 = 150.0;

/// Totals derived from a set of line items and a haul-away selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateTotals {
    pub items_total: f64,
    pub haul_cost: f64,
    pub sub_total: f64,
    pub final_total: f64,
    pub minimum_charge_applied: bool,
}

/// Cost of one line item: dimension × quantity × unit price
pub fn price_line_item(
    service: ServiceKind,
    dimension: f64,
    quantity: u32,
    pricing: &PricingConfig,
) -> f64 {
    dimension * f64::from(quantity) * pricing.unit_price(service)
}

/// Build a line item with its cost filled in
pub fn new_line_item(
    id: String,
    service: ServiceKind,
    dimension: f64,
    quantity: u32,
    pricing: &PricingConfig,
) -> LineItem {
    LineItem {
        id,
        service,
        dimension,
        quantity,
        cost: price_line_item(service, dimension, quantity, pricing),
    }
}

pub fn haul_away_cost(selection: &HaulAwaySelection, pricing: &PricingConfig) -> f64 {
    if selection.included {
        f64::from(selection.truckloads) * pricing.haul_away_per_load
    } else {
        0.0
    }
}

/// Sum item costs and haul-away, then apply the minimum charge floor
pub fn compute_totals(
    line_items: &[LineItem],
    haul_away: &HaulAwaySelection,
    pricing: &PricingConfig,
    minimum_charge: f64,
) -> EstimateTotals {
    let items_total: f64 = line_items.iter().map(|item| item.cost).sum();
    let haul_cost = haul_away_cost(haul_away, pricing);
    let sub_total = items_total + haul_cost;

    EstimateTotals {
        items_total,
        haul_cost,
        sub_total,
        final_total: sub_total.max(minimum_charge),
        minimum_charge_applied: sub_total < minimum_charge,
    }
}

/// Produce the immutable estimate snapshot.
///
/// Total over all inputs: an empty item list yields a zero sub-total floored
/// at `minimum_charge`. Refusing to finalize an empty estimate is the
/// caller's decision.
pub fn finalize_estimate(
    line_items: &[LineItem],
    haul_away: HaulAwaySelection,
    pricing: &PricingConfig,
    minimum_charge: f64,
    customer_info: CustomerInfo,
    company_info: CompanyInfo,
    date: NaiveDate,
) -> FinalizedEstimate {
    let totals = compute_totals(line_items, &haul_away, pricing, minimum_charge);

    FinalizedEstimate {
        company_info,
        customer_info,
        line_items: line_items.to_vec(),
        haul_away: HaulAway {
            included: haul_away.included,
            truckloads: haul_away.truckloads,
            cost: totals.haul_cost,
        },
        sub_total: totals.sub_total,
        final_total: totals.final_total,
        date,
        minimum_charge_applied: totals.minimum_charge_applied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(id: &str, service: ServiceKind, dimension: f64, quantity: u32) -> LineItem {
        new_line_item(
            id.to_string(),
            service,
            dimension,
            quantity,
            &PricingConfig::default(),
        )
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn finalize(items: &[LineItem], haul_away: HaulAwaySelection) -> FinalizedEstimate {
        finalize_estimate(
            items,
            haul_away,
            &PricingConfig::default(),
            MINIMUM_CHARGE,
            CustomerInfo::new("Jane Smith", "12 Elm St"),
            CompanyInfo::default(),
            date(),
        )
    }

    fn assert_money(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_price_line_item() {
        let pricing = PricingConfig::default();
        assert_money(price_line_item(ServiceKind::Trim, 20.0, 1, &pricing), 300.0);
        assert_money(price_line_item(ServiceKind::Cut, 15.0, 1, &pricing), 450.0);
        assert_money(price_line_item(ServiceKind::Grind, 5.0, 3, &pricing), 120.0);
    }

    #[test]
    fn test_price_uses_supplied_config() {
        let pricing = PricingConfig {
            trim: 12.5,
            ..PricingConfig::default()
        };
        assert_money(price_line_item(ServiceKind::Trim, 4.0, 2, &pricing), 100.0);
    }

    #[test]
    fn test_haul_away_excluded_costs_nothing() {
        let selection = HaulAwaySelection {
            included: false,
            truckloads: 3,
        };
        assert_money(haul_away_cost(&selection, &PricingConfig::default()), 0.0);
    }

    #[test]
    fn test_single_trim_above_minimum() {
        let estimate = finalize(&[item("a", ServiceKind::Trim, 20.0, 1)], HaulAwaySelection::none());
        assert_money(estimate.line_items[0].cost, 300.0);
        assert_money(estimate.sub_total, 300.0);
        assert_money(estimate.final_total, 300.0);
        assert!(!estimate.minimum_charge_applied);
    }

    #[test]
    fn test_single_grind_hits_minimum() {
        let estimate = finalize(&[item("a", ServiceKind::Grind, 10.0, 1)], HaulAwaySelection::none());
        assert_money(estimate.line_items[0].cost, 80.0);
        assert_money(estimate.sub_total, 80.0);
        assert_money(estimate.final_total, 150.0);
        assert!(estimate.minimum_charge_applied);
        assert_money(estimate.minimum_charge_adjustment(), 70.0);
    }

    #[test]
    fn test_two_items_with_haul_away() {
        let items = [
            item("a", ServiceKind::Cut, 15.0, 1),
            item("b", ServiceKind::Trim, 8.0, 2),
        ];
        let estimate = finalize(&items, HaulAwaySelection::loads(1));
        assert_money(estimate.line_items[0].cost, 450.0);
        assert_money(estimate.line_items[1].cost, 240.0);
        assert_money(estimate.haul_away.cost, 150.0);
        assert_money(estimate.sub_total, 840.0);
        assert_money(estimate.final_total, 840.0);
        assert!(!estimate.minimum_charge_applied);
    }

    #[test]
    fn test_empty_estimate_is_floored() {
        let estimate = finalize(&[], HaulAwaySelection::none());
        assert_money(estimate.sub_total, 0.0);
        assert_money(estimate.final_total, 150.0);
        assert!(estimate.minimum_charge_applied);
    }

    #[test]
    fn test_grind_with_two_loads() {
        let estimate = finalize(&[item("a", ServiceKind::Grind, 5.0, 3)], HaulAwaySelection::loads(2));
        assert_money(estimate.line_items[0].cost, 120.0);
        assert_money(estimate.haul_away.cost, 300.0);
        assert_money(estimate.sub_total, 420.0);
        assert_money(estimate.final_total, 420.0);
        assert!(!estimate.minimum_charge_applied);
    }

    #[test]
    fn test_subtotal_exactly_at_minimum_is_not_adjusted() {
        let estimate = finalize(&[item("a", ServiceKind::Trim, 10.0, 1)], HaulAwaySelection::none());
        assert_money(estimate.sub_total, 150.0);
        assert_money(estimate.final_total, 150.0);
        assert!(!estimate.minimum_charge_applied);
    }

    #[test]
    fn test_finalize_keeps_metadata_and_item_order() {
        let items = [
            item("first", ServiceKind::Grind, 10.0, 1),
            item("second", ServiceKind::Trim, 20.0, 1),
        ];
        let estimate = finalize(&items, HaulAwaySelection::none());
        assert_eq!(estimate.customer_info.name, "Jane Smith");
        assert_eq!(estimate.company_info, CompanyInfo::default());
        assert_eq!(estimate.date, date());
        let ids: Vec<_> = estimate.line_items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["first", "second"]);
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let items = [item("a", ServiceKind::Cut, 12.3, 2)];
        assert_eq!(
            finalize(&items, HaulAwaySelection::loads(1)),
            finalize(&items, HaulAwaySelection::loads(1))
        );
    }

    fn arb_price() -> impl Strategy<Value = f64> {
        prop_oneof![Just(0.0), 0.0f64..1000.0]
    }

    fn arb_pricing() -> impl Strategy<Value = PricingConfig> {
        (arb_price(), arb_price(), arb_price(), arb_price()).prop_map(
            |(trim, cut, grind, haul_away_per_load)| PricingConfig {
                trim,
                cut,
                grind,
                haul_away_per_load,
            },
        )
    }

    fn arb_item(pricing: PricingConfig) -> impl Strategy<Value = LineItem> {
        (
            prop::sample::select(ServiceKind::ALL.to_vec()),
            0.1f64..200.0,
            1u32..10,
        )
            .prop_map(move |(service, dimension, quantity)| {
                new_line_item("p".to_string(), service, dimension, quantity, &pricing)
            })
    }

    fn arb_items(
        len: std::ops::Range<usize>,
    ) -> impl Strategy<Value = (PricingConfig, Vec<LineItem>)> {
        arb_pricing().prop_flat_map(move |pricing| {
            (
                Just(pricing),
                prop::collection::vec(arb_item(pricing), len.clone()),
            )
        })
    }

    fn arb_haul_away() -> impl Strategy<Value = HaulAwaySelection> {
        (any::<bool>(), 1u32..6).prop_map(|(included, truckloads)| HaulAwaySelection {
            included,
            truckloads,
        })
    }

    proptest! {
        #[test]
        fn prop_subtotal_is_sum_of_costs(
            (pricing, items) in arb_items(0..12),
            haul_away in arb_haul_away(),
        ) {
            let totals = compute_totals(&items, &haul_away, &pricing, MINIMUM_CHARGE);
            let expected: f64 = items
                .iter()
                .map(|i| i.dimension * f64::from(i.quantity) * pricing.unit_price(i.service))
                .sum::<f64>()
                + haul_away_cost(&haul_away, &pricing);
            prop_assert!((totals.sub_total - expected).abs() < 1e-6);
        }

        #[test]
        fn prop_subtotal_ignores_item_order(
            (pricing, items) in arb_items(0..12),
            haul_away in arb_haul_away(),
        ) {
            let forward = compute_totals(&items, &haul_away, &pricing, MINIMUM_CHARGE);
            let mut reversed_items = items.clone();
            reversed_items.reverse();
            let reversed = compute_totals(&reversed_items, &haul_away, &pricing, MINIMUM_CHARGE);
            prop_assert!((forward.sub_total - reversed.sub_total).abs() < 1e-6);
        }

        #[test]
        fn prop_final_total_is_floored_subtotal(
            (pricing, items) in arb_items(0..6),
            haul_away in arb_haul_away(),
            minimum_charge in 0.0f64..1000.0,
        ) {
            let totals = compute_totals(&items, &haul_away, &pricing, minimum_charge);
            prop_assert_eq!(totals.final_total, totals.sub_total.max(minimum_charge));
            prop_assert!(totals.final_total >= minimum_charge);
            prop_assert_eq!(totals.minimum_charge_applied, totals.sub_total < minimum_charge);
            if totals.minimum_charge_applied {
                prop_assert_eq!(totals.final_total - totals.sub_total, minimum_charge - totals.sub_total);
            }
        }

        #[test]
        fn prop_removing_item_subtracts_its_cost(
            (pricing, items) in arb_items(1..10),
            haul_away in arb_haul_away(),
            index in any::<prop::sample::Index>(),
        ) {
            let full = compute_totals(&items, &haul_away, &pricing, MINIMUM_CHARGE);

            let mut remaining = items.clone();
            let removed = remaining.remove(index.index(items.len()));
            let reduced = compute_totals(&remaining, &haul_away, &pricing, MINIMUM_CHARGE);
            prop_assert!((full.sub_total - reduced.sub_total - removed.cost).abs() < 1e-6);
            prop_assert_eq!(full.haul_cost, reduced.haul_cost);

            remaining.push(removed);
            let restored = compute_totals(&remaining, &haul_away, &pricing, MINIMUM_CHARGE);
            prop_assert!((restored.sub_total - full.sub_total).abs() < 1e-6);
        }
    }
}
