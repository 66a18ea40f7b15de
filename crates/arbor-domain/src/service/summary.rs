//! Human-readable estimate summaries
//!
//! Every renderer here reads the numbers stored in a [`FinalizedEstimate`].
//! Nothing is recomputed, so the screen view and the text export always
//! agree on the totals.

use arbor_types::FinalizedEstimate;
use chrono::NaiveDate;
use serde::Serialize;

pub const DISCLAIMER: &str = "This is a good faith estimate based on AI analysis of photos. \
The final cost may increase due to unforeseen on-site factors such as proximity to powerlines \
or structures, difficult access, or other complexities not visible in the photo.";

const HAUL_AWAY_TITLE: &str = "Wood Haul Away";
const RULE_WIDTH: usize = 60;

/// Amount with exactly two decimals, e.g. `80.00`.
///
/// An amount sitting exactly on a half cent rounds away from zero
/// (`6.125` -> `6.13`); everything else rounds to the nearest cent.
pub fn format_amount(amount: f64) -> String {
    let magnitude = amount.abs();
    let half_cents = (magnitude * 200.0).round();
    let on_half_cent = half_cents % 2.0 == 1.0 && magnitude.mul_add(200.0, -half_cents) == 0.0;
    if !on_half_cent {
        return format!("{:.2}", amount);
    }

    // magnitude * 100 is exactly n + 0.5 here
    let cents = (magnitude * 100.0).ceil() as u64;
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, cents / 100, cents % 100)
}

/// Currency with exactly two decimals, e.g. `$80.00`
pub fn format_money(amount: f64) -> String {
    format!("${}", format_amount(amount))
}

/// Dimensions are shown with one decimal, e.g. `20.0`
pub fn format_dimension(dimension: f64) -> String {
    format!("{:.1}", dimension)
}

/// Long US date, e.g. `October 16, 2026`
pub fn format_estimate_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BreakdownRow {
    Item {
        title: &'static str,
        quantity: u32,
        dimension: f64,
        unit: &'static str,
        cost: f64,
    },
    HaulAway {
        truckloads: u32,
        cost: f64,
    },
}

impl BreakdownRow {
    pub fn title(&self) -> &'static str {
        match self {
            BreakdownRow::Item { title, .. } => *title,
            BreakdownRow::HaulAway { .. } => HAUL_AWAY_TITLE,
        }
    }

    /// Second line under the title, e.g. `2 x 8.0 ft height`
    pub fn detail(&self) -> String {
        match self {
            BreakdownRow::Item {
                quantity,
                dimension,
                unit,
                ..
            } => format!("{} x {} {}", quantity, format_dimension(*dimension), unit),
            BreakdownRow::HaulAway { truckloads, .. } => format!("{} truckload(s)", truckloads),
        }
    }

    pub fn cost(&self) -> f64 {
        match self {
            BreakdownRow::Item { cost, .. } | BreakdownRow::HaulAway { cost, .. } => *cost,
        }
    }
}

/// Itemized view of a finalized estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateBreakdown {
    pub rows: Vec<BreakdownRow>,
    pub sub_total: f64,
    /// Present only when the minimum charge was applied
    pub adjustment: Option<f64>,
    pub final_total: f64,
}

impl EstimateBreakdown {
    pub fn from_estimate(estimate: &FinalizedEstimate) -> Self {
        let mut rows: Vec<BreakdownRow> = estimate
            .line_items
            .iter()
            .map(|item| BreakdownRow::Item {
                title: item.service.title(),
                quantity: item.quantity,
                dimension: item.dimension,
                unit: item.service.unit_label(),
                cost: item.cost,
            })
            .collect();

        if estimate.haul_away.included {
            rows.push(BreakdownRow::HaulAway {
                truckloads: estimate.haul_away.truckloads,
                cost: estimate.haul_away.cost,
            });
        }

        Self {
            rows,
            sub_total: estimate.sub_total,
            adjustment: estimate
                .minimum_charge_applied
                .then(|| estimate.minimum_charge_adjustment()),
            final_total: estimate.final_total,
        }
    }
}

fn amount_line(label: &str, amount: &str) -> String {
    let width = RULE_WIDTH.saturating_sub(label.chars().count());
    format!("{}{:>width$}\n", label, amount, width = width)
}

/// On-screen itemized estimate
pub fn render_breakdown(estimate: &FinalizedEstimate) -> String {
    let breakdown = EstimateBreakdown::from_estimate(estimate);
    let rule = "-".repeat(RULE_WIDTH);

    let mut out = String::new();
    out.push_str(&format!("{}\n", estimate.company_info.name));
    out.push_str(&format!(
        "Estimate for: {}, {}\n",
        estimate.customer_info.name, estimate.customer_info.address
    ));
    out.push_str(&format!("Date: {}\n\n", format_estimate_date(estimate.date)));
    out.push_str("Itemized Estimate\n");
    out.push_str(&rule);
    out.push('\n');

    for row in &breakdown.rows {
        out.push_str(&amount_line(row.title(), &format_money(row.cost())));
        out.push_str(&format!("  {}\n", row.detail()));
    }

    out.push_str(&rule);
    out.push('\n');
    out.push_str(&amount_line("Sub-total", &format_money(breakdown.sub_total)));
    if let Some(adjustment) = breakdown.adjustment {
        out.push_str(&amount_line(
            "Minimum Charge Adjustment",
            &format!("+{}", format_money(adjustment)),
        ));
    }
    out.push_str(&amount_line("Final Estimate", &format_money(breakdown.final_total)));
    out.push('\n');
    out.push_str("Please Note: ");
    out.push_str(DISCLAIMER);
    out.push('\n');
    out
}

/// Plain-text version suitable for a text message or email
pub fn render_text_estimate(estimate: &FinalizedEstimate) -> String {
    let breakdown = EstimateBreakdown::from_estimate(estimate);

    let mut text = format!(
        "Hi {}, here is your tree service estimate from {}:\n\n",
        estimate.customer_info.name, estimate.company_info.name
    );
    for row in &breakdown.rows {
        match row {
            BreakdownRow::Item {
                title,
                quantity,
                dimension,
                unit,
                cost,
            } => text.push_str(&format!(
                "- {}: {}x at ~{} {} = {}\n",
                title,
                quantity,
                format_dimension(*dimension),
                unit,
                format_money(*cost)
            )),
            BreakdownRow::HaulAway { truckloads, cost } => text.push_str(&format!(
                "- {}: {} truckload(s) = {}\n",
                HAUL_AWAY_TITLE,
                truckloads,
                format_money(*cost)
            )),
        }
    }

    text.push_str(&format!("\nSub-Total: {}", format_money(breakdown.sub_total)));
    if let Some(adjustment) = breakdown.adjustment {
        text.push_str(&format!(
            "\nMinimum Charge Adjustment: +{}",
            format_money(adjustment)
        ));
    }
    text.push_str(&format!(
        "\nFinal Estimated Cost: {}\n\n",
        format_money(breakdown.final_total)
    ));
    text.push_str(&format!(
        "Thanks,\n{}\n{}",
        estimate.company_info.contact_name, estimate.company_info.phone
    ));
    text
}
