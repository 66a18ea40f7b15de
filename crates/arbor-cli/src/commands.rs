//! Command handlers

use crate::cli::{Cli, Commands, SettingsAction};
use crate::output::{output_draft, output_estimate, output_item, output_settings};
use arbor_app::config::Config;
use arbor_app::export::{default_export_path, export_estimate, ExportFormat};
use arbor_app::repository::{open_estimate_service, open_settings_store};
use arbor_domain::service::render_text_estimate;
use arbor_store::{load_settings_file, StoredSettings};
use arbor_types::{OutputFormat, Result, ServiceKind};
use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use tracing::debug;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref store_dir) = cli.store_dir {
        config.store_dir = Some(store_dir.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);
    debug!(store_dir = ?config.store_dir, format = %output_format, "config resolved");

    match cli.command {
        Commands::Customer { name, address } => cmd_customer(&config, &name, &address),

        Commands::Add {
            service,
            dimension,
            quantity,
        } => cmd_add(&config, output_format, service, &dimension, quantity),

        Commands::Remove { id } => cmd_remove(&config, output_format, &id),

        Commands::Haul { truckloads, off } => cmd_haul(&config, output_format, truckloads, off),

        Commands::Show => cmd_show(&config, output_format),

        Commands::Finalize { date } => cmd_finalize(&config, output_format, date),

        Commands::View => {
            let service = open_estimate_service(&config)?;
            output_estimate(output_format, &service.current_estimate()?)
        }

        Commands::Text => {
            let service = open_estimate_service(&config)?;
            println!("{}", render_text_estimate(&service.current_estimate()?));
            Ok(())
        }

        Commands::Export { export_as, output } => {
            let format = export_as.unwrap_or(config.export_format);
            cmd_export(&config, format, output)
        }

        Commands::Reset => {
            let mut service = open_estimate_service(&config)?;
            service.reset()?;
            println!("Started a new estimate.");
            Ok(())
        }

        Commands::Settings { action } => {
            cmd_settings(&config, output_format, action.unwrap_or(SettingsAction::Show))
        }

        Commands::Config {
            show,
            set_output,
            set_export,
            set_store_dir,
            set_export_dir,
            reset,
        } => cmd_config(
            show,
            set_output,
            set_export,
            set_store_dir,
            set_export_dir,
            reset,
        ),
    }
}

fn cmd_customer(config: &Config, name: &str, address: &str) -> Result<()> {
    let mut service = open_estimate_service(config)?;
    let customer = service.set_customer(name, address)?;
    println!("Customer: {}, {}", customer.name, customer.address);
    Ok(())
}

fn cmd_add(
    config: &Config,
    output_format: OutputFormat,
    service_kind: ServiceKind,
    dimension: &str,
    quantity: u32,
) -> Result<()> {
    let mut service = open_estimate_service(config)?;
    let item = service.add_item_from_input(Some(service_kind), dimension, quantity)?;
    output_item(output_format, "Added", &item)
}

fn cmd_remove(config: &Config, output_format: OutputFormat, id: &str) -> Result<()> {
    let mut service = open_estimate_service(config)?;
    let item = service.remove_item(id)?;
    output_item(output_format, "Removed", &item)
}

fn cmd_haul(
    config: &Config,
    output_format: OutputFormat,
    truckloads: u32,
    off: bool,
) -> Result<()> {
    let mut service = open_estimate_service(config)?;
    service.set_haul_away(!off, truckloads)?;
    output_draft(output_format, &service.draft()?, &service.pricing()?)
}

fn cmd_show(config: &Config, output_format: OutputFormat) -> Result<()> {
    let service = open_estimate_service(config)?;
    output_draft(output_format, &service.draft()?, &service.pricing()?)
}

fn cmd_finalize(
    config: &Config,
    output_format: OutputFormat,
    date: Option<NaiveDate>,
) -> Result<()> {
    let mut service = open_estimate_service(config)?;
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let estimate = service.finalize(date)?;

    if output_format == OutputFormat::Table {
        println!("Your Estimate is Ready!\n");
    }
    output_estimate(output_format, &estimate)
}

fn cmd_export(config: &Config, format: ExportFormat, output: Option<PathBuf>) -> Result<()> {
    let service = open_estimate_service(config)?;
    let estimate = service.current_estimate()?;

    let output_path =
        output.unwrap_or_else(|| default_export_path(&config.export_dir(), &estimate, format));
    export_estimate(&estimate, format, &output_path)?;
    println!("Exported to: {}", output_path.display());
    Ok(())
}

fn cmd_settings(config: &Config, output_format: OutputFormat, action: SettingsAction) -> Result<()> {
    match action {
        SettingsAction::Show => {
            let store = open_settings_store(config)?;
            output_settings(output_format, store.settings())
        }

        SettingsAction::Prices {
            trim,
            cut,
            grind,
            haul,
        } => {
            let mut service = open_estimate_service(config)?;
            let mut pricing = service.pricing()?;
            let company = service.company()?;

            for (kind, price) in [
                (ServiceKind::Trim, trim),
                (ServiceKind::Cut, cut),
                (ServiceKind::Grind, grind),
            ] {
                if let Some(price) = price {
                    pricing.set_unit_price(kind, price);
                }
            }
            if let Some(haul) = haul {
                pricing.haul_away_per_load = haul;
            }

            service.update_settings(&pricing, &company)?;
            output_settings(
                output_format,
                &StoredSettings {
                    pricing,
                    company_info: company,
                },
            )
        }

        SettingsAction::Company {
            name,
            contact,
            phone,
        } => {
            let mut service = open_estimate_service(config)?;
            let pricing = service.pricing()?;
            let mut company = service.company()?;

            if let Some(name) = name {
                company.name = name;
            }
            if let Some(contact) = contact {
                company.contact_name = contact;
            }
            if let Some(phone) = phone {
                company.phone = phone;
            }

            service.update_settings(&pricing, &company)?;
            output_settings(
                output_format,
                &StoredSettings {
                    pricing,
                    company_info: company,
                },
            )
        }

        SettingsAction::Import { file } => {
            let imported = load_settings_file(&file)?;
            let mut service = open_estimate_service(config)?;
            service.update_settings(&imported.pricing, &imported.company_info)?;
            println!("Imported settings from: {}", file.display());
            output_settings(output_format, &imported)
        }

        SettingsAction::Reset => {
            let mut store = open_settings_store(config)?;
            store.reset()?;
            println!("Settings reset to defaults");
            output_settings(output_format, store.settings())
        }
    }
}

fn cmd_config(
    show: bool,
    set_output: Option<OutputFormat>,
    set_export: Option<ExportFormat>,
    set_store_dir: Option<PathBuf>,
    set_export_dir: Option<PathBuf>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(format) = set_output {
        config.output_format = format;
        modified = true;
    }
    if let Some(format) = set_export {
        config.export_format = format;
        modified = true;
    }
    if let Some(dir) = set_store_dir {
        config.store_dir = Some(dir);
        modified = true;
    }
    if let Some(dir) = set_export_dir {
        config.export_dir = Some(dir);
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration saved");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
