//! CLI definition using clap

use arbor_app::export::ExportFormat;
use arbor_types::{OutputFormat, ServiceKind};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "arbor-estimate")]
#[command(version)]
#[command(about = "Build, price and export tree-service estimates")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Store directory override (settings.json, session.json)
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set customer details for the estimate being built
    Customer {
        /// Customer name
        #[arg(long, short = 'n')]
        name: String,

        /// Customer street address
        #[arg(long, short = 'a')]
        address: String,
    },

    /// Add a tree or stump to the estimate
    Add {
        /// Service type
        #[arg(value_enum)]
        service: ServiceKind,

        /// Height in feet (trim, cut) or diameter in inches (grind)
        dimension: String,

        /// Number of identical trees or stumps
        #[arg(long, short = 'q', default_value_t = 1)]
        quantity: u32,
    },

    /// Remove a line item by id (a unique prefix is enough)
    Remove {
        id: String,
    },

    /// Include wood haul-away, or turn it off with --off
    Haul {
        /// Number of truckloads
        #[arg(default_value_t = 1)]
        truckloads: u32,

        /// Remove haul-away from the estimate, keeping the truckload count
        #[arg(long)]
        off: bool,
    },

    /// Show the estimate being built with its running total
    Show,

    /// Finalize the estimate
    Finalize {
        /// Estimate date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show the finalized estimate
    View,

    /// Print the plain-text version of the finalized estimate
    Text,

    /// Export the finalized estimate to a file
    Export {
        /// File format. Uses config value if not specified.
        #[arg(long = "as", value_enum)]
        export_as: Option<ExportFormat>,

        /// Output file path. Defaults to estimate-<customer>.<ext> in the export dir.
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Start a new estimate (clears the draft and the finalized estimate)
    Reset,

    /// Manage company info and pricing
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set default export format
        #[arg(long)]
        set_export: Option<ExportFormat>,

        /// Set store directory
        #[arg(long)]
        set_store_dir: Option<PathBuf>,

        /// Set default export directory
        #[arg(long)]
        set_export_dir: Option<PathBuf>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show company info and prices
    Show,

    /// Change unit prices
    Prices {
        /// Tree trimming, $ per foot
        #[arg(long)]
        trim: Option<f64>,

        /// Tree removal, $ per foot
        #[arg(long)]
        cut: Option<f64>,

        /// Stump grinding, $ per inch diameter
        #[arg(long)]
        grind: Option<f64>,

        /// Wood haul-away, $ per truckload
        #[arg(long)]
        haul: Option<f64>,
    },

    /// Change company details
    Company {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        contact: Option<String>,

        #[arg(long)]
        phone: Option<String>,
    },

    /// Load prices and company info from a .json or .toml file
    Import {
        file: PathBuf,
    },

    /// Restore default prices and company info
    Reset,
}
