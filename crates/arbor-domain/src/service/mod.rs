//! Domain services

pub mod pricing;
pub mod summary;
pub mod validation;

pub use pricing::{
    compute_totals, finalize_estimate, haul_away_cost, new_line_item, price_line_item,
    EstimateTotals, MINIMUM_CHARGE,
};
pub use summary::{
    format_amount, format_dimension, format_estimate_date, format_money, render_breakdown,
    render_text_estimate, BreakdownRow, EstimateBreakdown, DISCLAIMER,
};
