//! Output formatting module

use arbor_domain::service::{format_dimension, format_money, haul_away_cost, MINIMUM_CHARGE};
use arbor_domain::EstimateDraft;
use arbor_store::StoredSettings;
use arbor_types::{FinalizedEstimate, LineItem, OutputFormat, PricingConfig, Result, ServiceKind};
use serde::Serialize;

const SHORT_ID_LEN: usize = 8;

fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    println!("{}", content);
    Ok(())
}

fn item_row(item: &LineItem) -> String {
    format!(
        "  {:<8}  {:<16} {:>3} x {:>6} {:<14} {:>12}",
        short_id(&item.id),
        item.service.title(),
        item.quantity,
        format_dimension(item.dimension),
        item.service.unit_label(),
        format_money(item.cost)
    )
}

pub fn output_item(output_format: OutputFormat, action: &str, item: &LineItem) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(item);
    }
    println!("{}:", action);
    println!("{}", item_row(item));
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DraftView<'a> {
    #[serde(flatten)]
    draft: &'a EstimateDraft,
    haul_away_cost: f64,
    running_total: f64,
}

pub fn output_draft(
    output_format: OutputFormat,
    draft: &EstimateDraft,
    pricing: &PricingConfig,
) -> Result<()> {
    let haul_cost = haul_away_cost(&draft.haul_away, pricing);
    let running_total = draft.running_total(pricing);

    if output_format == OutputFormat::Json {
        return print_json(&DraftView {
            draft,
            haul_away_cost: haul_cost,
            running_total,
        });
    }

    println!("\nEstimate in Progress");
    println!("====================");
    if draft.customer_info.name.is_empty() {
        println!("Customer:  (not set, run `customer`)");
    } else {
        println!(
            "Customer:  {}, {}",
            draft.customer_info.name, draft.customer_info.address
        );
    }

    println!("\nItems:");
    if draft.is_empty() {
        println!("  No items added yet.");
    }
    for item in &draft.line_items {
        println!("{}", item_row(item));
    }

    println!("\nWood Disposal:");
    if draft.haul_away.included {
        println!(
            "  {} truckload(s){:>44}",
            draft.haul_away.truckloads,
            format_money(haul_cost)
        );
    } else {
        println!("  No haul-away");
    }

    println!("\nCurrent Total: {}", format_money(running_total));
    Ok(())
}

pub fn output_estimate(output_format: OutputFormat, estimate: &FinalizedEstimate) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(estimate);
    }
    println!("{}", arbor_domain::service::render_breakdown(estimate));
    Ok(())
}

pub fn output_settings(output_format: OutputFormat, settings: &StoredSettings) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(settings);
    }

    let company = &settings.company_info;
    let pricing = &settings.pricing;

    println!("\nCompany Information");
    println!("===================");
    println!("Name:      {}", company.name);
    println!("Contact:   {}", company.contact_name);
    println!("Phone:     {}", company.phone);

    println!("\nService Pricing");
    println!("===============");
    for service in ServiceKind::ALL {
        let label = format!("{} ({})", service.title(), service.price_label());
        println!("{:<36} {:>10}", label, format_money(pricing.unit_price(service)));
    }
    println!(
        "{:<36} {:>10}",
        "Wood Haul Away ($ / truckload)",
        format_money(pricing.haul_away_per_load)
    );
    println!("\nMinimum charge: {}", format_money(MINIMUM_CHARGE));
    Ok(())
}
